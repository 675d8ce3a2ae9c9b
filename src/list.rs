use log::{debug, trace};

use crate::action::{IgnoreReason, ItemEvent, ListEvent, Transition, Trigger, TriggerKind};
use crate::config::{ExpandableListConfig, ExpandableListOptions, KeyCode};
use crate::decorator::{Decoration, decorate, sync_icon};
use crate::dom::{ListDocument, NodeId};
use crate::node::{NodeState, sublists};

type Handler = fn(&ExpandableList, &mut ListDocument, NodeId) -> ListEvent;

/// Transition table: `(current state, trigger kind) -> handler`.
///
/// Childless items have no rows, so every trigger on them is ignored.
const DISPATCH: [(NodeState, TriggerKind, Handler); 4] = [
    (NodeState::Expanded, TriggerKind::Primary, contract_item),
    (NodeState::Contracted, TriggerKind::Primary, expand_item),
    (NodeState::Expanded, TriggerKind::LongPress, contract_branch),
    (NodeState::Contracted, TriggerKind::LongPress, expand_branch),
];

fn lookup(state: NodeState, kind: TriggerKind) -> Option<Handler> {
    DISPATCH
        .iter()
        .find(|(row_state, row_kind, _)| *row_state == state && *row_kind == kind)
        .map(|(_, _, handler)| *handler)
}

fn contract_item(list: &ExpandableList, doc: &mut ListDocument, icon: NodeId) -> ListEvent {
    list.fire(doc, icon, ItemEvent::ContractItem)
}

fn expand_item(list: &ExpandableList, doc: &mut ListDocument, icon: NodeId) -> ListEvent {
    list.fire(doc, icon, ItemEvent::ExpandItem)
}

fn contract_branch(list: &ExpandableList, doc: &mut ListDocument, icon: NodeId) -> ListEvent {
    list.cascade(doc, icon, NodeState::Expanded)
}

fn expand_branch(list: &ExpandableList, doc: &mut ListDocument, icon: NodeId) -> ListEvent {
    list.cascade(doc, icon, NodeState::Contracted)
}

/// An expandable list attached to a container element of a [`ListDocument`].
///
/// Holds the immutable configuration for that container; the document itself stays the only
/// source of truth for item state, so the handle can be shared freely between views.
#[derive(Clone, Debug)]
pub struct ExpandableList {
    container: NodeId,
    config: ExpandableListConfig,
    icon_class: String,
    decoration: Decoration,
}

impl ExpandableList {
    /// Decorates every item under `container` and returns the attached list.
    pub fn attach(doc: &mut ListDocument, container: NodeId, config: ExpandableListConfig) -> Self {
        let decoration = decorate(doc, container, &config);
        Self {
            container,
            icon_class: config.icon_class(),
            config,
            decoration,
        }
    }

    /// Same as [`attach`](Self::attach) with options merged over the defaults.
    pub fn with_options(
        doc: &mut ListDocument,
        container: NodeId,
        options: ExpandableListOptions,
    ) -> Self {
        Self::attach(doc, container, ExpandableListConfig::from_options(options))
    }

    pub const fn container(&self) -> NodeId {
        self.container
    }

    pub const fn config(&self) -> &ExpandableListConfig {
        &self.config
    }

    /// Item counts found when the list was attached.
    pub const fn decoration(&self) -> Decoration {
        self.decoration
    }

    /// Returns `true` if `id` is an icon created by this list.
    pub fn is_icon(&self, doc: &ListDocument, id: NodeId) -> bool {
        self.item_of(doc, id).is_some()
    }

    /// Icons of this list in document order.
    pub fn icons(&self, doc: &ListDocument) -> Vec<NodeId> {
        doc.descendants(self.container)
            .filter(|id| self.is_icon(doc, *id))
            .collect()
    }

    /// Icons that take keyboard focus and are currently rendered, in tab order.
    pub fn focusable_icons(&self, doc: &ListDocument) -> Vec<NodeId> {
        doc.descendants(self.container)
            .filter(|id| {
                self.is_icon(doc, *id) && doc.attr(*id, "tabindex").is_some() && doc.is_rendered(*id)
            })
            .collect()
    }

    /// The `li` an icon belongs to.
    pub fn item_of(&self, doc: &ListDocument, icon: NodeId) -> Option<NodeId> {
        if !doc.is_tag(icon, "img") || !doc.has_class(icon, &self.icon_class) {
            return None;
        }
        let item = doc.parent(icon)?;
        (doc.is_tag(item, "li") && doc.is_ancestor(self.container, item)).then_some(item)
    }

    /// The icon decorating an item.
    pub fn icon_of(&self, doc: &ListDocument, item: NodeId) -> Option<NodeId> {
        doc.child_elements(item)
            .find(|child| doc.has_class(*child, &self.icon_class))
    }

    /// Current state of the item an icon belongs to.
    pub fn state_of(&self, doc: &ListDocument, icon: NodeId) -> Option<NodeState> {
        let item = self.item_of(doc, icon)?;
        NodeState::of(doc, item, &self.config.class_names)
    }

    /// Delivers a trigger to an icon.
    ///
    /// Childless items ignore every trigger. Keys outside the accepted set for the item's
    /// current state are suppressed before the dispatch table is consulted.
    pub fn dispatch(&self, doc: &mut ListDocument, target: NodeId, trigger: Trigger) -> ListEvent {
        let Some(item) = self.item_of(doc, target) else {
            trace!("{trigger:?} on {target:?} ignored: not an icon of this list");
            return ListEvent::Ignored(IgnoreReason::NotAnIcon);
        };
        let Some(state) = NodeState::of(doc, item, &self.config.class_names) else {
            trace!("{trigger:?} on {item:?} ignored: item has no state class");
            return ListEvent::Ignored(IgnoreReason::Unclassified);
        };
        if state.is_childless() {
            trace!("{trigger:?} on {item:?} ignored: childless");
            return ListEvent::Ignored(IgnoreReason::Childless);
        }
        if let Trigger::KeyUp(key) = trigger
            && !self.config.allowed_keys.allows(state, key)
        {
            trace!("key {} on {item:?} ignored in state {state:?}", key.code());
            return ListEvent::Ignored(IgnoreReason::KeyNotAllowed(key));
        }
        lookup(state, trigger.kind()).map_or(
            ListEvent::Ignored(IgnoreReason::Childless),
            |handler| handler(self, doc, target),
        )
    }

    /// Runs an item event on any branch icon, whatever state its item is in.
    ///
    /// Both transitions are idempotent: contracting a contracted item leaves it unchanged and
    /// records no visibility change. Childless items are ignored.
    pub fn fire(&self, doc: &mut ListDocument, icon: NodeId, event: ItemEvent) -> ListEvent {
        let Some(item) = self.item_of(doc, icon) else {
            return ListEvent::Ignored(IgnoreReason::NotAnIcon);
        };
        let names = &self.config.class_names;
        if doc.has_class(item, &names.childless) {
            return ListEvent::Ignored(IgnoreReason::Childless);
        }

        let (target, hide) = match event {
            ItemEvent::ContractItem => (NodeState::Contracted, true),
            ItemEvent::ExpandItem => (NodeState::Expanded, false),
        };
        for list in sublists(doc, item) {
            if hide {
                doc.hide(list);
            } else {
                doc.show(list);
            }
        }
        sync_icon(doc, icon, &self.config, target);
        doc.remove_class(item, target.toggled().class_name(names));
        doc.add_class(item, target.class_name(names));

        debug!("{event:?} on {item:?}");
        ListEvent::Handled(match target {
            NodeState::Contracted => Transition::Contracted(item),
            _ => Transition::Expanded(item),
        })
    }

    /// Expands the item an icon belongs to.
    pub fn expand(&self, doc: &mut ListDocument, icon: NodeId) -> ListEvent {
        self.fire(doc, icon, ItemEvent::ExpandItem)
    }

    /// Contracts the item an icon belongs to.
    pub fn contract(&self, doc: &mut ListDocument, icon: NodeId) -> ListEvent {
        self.fire(doc, icon, ItemEvent::ContractItem)
    }

    // Synthesizes Enter on the root icon and on every descendant icon whose item shares the
    // root's state. Childless icons inside the branch are left as they are.
    fn cascade(&self, doc: &mut ListDocument, icon: NodeId, state: NodeState) -> ListEvent {
        let Some(root) = self.item_of(doc, icon) else {
            return ListEvent::Ignored(IgnoreReason::NotAnIcon);
        };
        let class = state.class_name(&self.config.class_names);
        let mut targets = vec![icon];
        targets.extend(
            doc.descendants(root)
                .filter(|id| doc.is_tag(*id, "li") && doc.has_class(*id, class))
                .filter_map(|item| self.icon_of(doc, item)),
        );

        let mut count = 0;
        for target in targets {
            if self
                .dispatch(doc, target, Trigger::KeyUp(KeyCode::ENTER))
                .is_handled()
            {
                count += 1;
            }
        }
        debug!("long press on {root:?} switched {count} items");
        ListEvent::Handled(Transition::Cascade { root, count })
    }
}
