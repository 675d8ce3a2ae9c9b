use crate::config::KeyCode;
use crate::dom::NodeId;

/// User input delivered to an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Short pointer activation.
    Click,
    /// Key released while the icon has focus.
    KeyUp(KeyCode),
    /// Sustained press reported by a long-press detector.
    LongClick,
}

/// Coarse trigger category used by the dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// Click or accepted key.
    Primary,
    /// Long press: acts on the whole branch.
    LongPress,
}

impl Trigger {
    pub const fn kind(self) -> TriggerKind {
        match self {
            Self::Click | Self::KeyUp(_) => TriggerKind::Primary,
            Self::LongClick => TriggerKind::LongPress,
        }
    }
}

/// Item-level events: one item changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemEvent {
    ExpandItem,
    ContractItem,
}

/// What a handled trigger did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The item's nested list is now shown.
    Expanded(NodeId),
    /// The item's nested list is now hidden.
    Contracted(NodeId),
    /// A long press walked a branch; `count` items were switched.
    Cascade { root: NodeId, count: usize },
}

/// Why a trigger did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The target is not an icon decorated by this list.
    NotAnIcon,
    /// The icon belongs to a leaf item.
    Childless,
    /// The item carries no state class.
    Unclassified,
    /// The key is not accepted in the item's current state.
    KeyNotAllowed(KeyCode),
    /// A key arrived while no icon has focus.
    NoFocus,
    /// The terminal key has no key code.
    UnmappedKey,
}

/// Result of delivering a trigger or key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListEvent {
    /// State was updated.
    Handled(Transition),
    /// Keyboard focus moved to another icon.
    FocusMoved(NodeId),
    /// The input was suppressed.
    Ignored(IgnoreReason),
}

impl ListEvent {
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}
