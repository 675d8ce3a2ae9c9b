pub use crate::{
    ExpandableList, ExpandableListConfig, ExpandableListOptions, ExpandableListStyle,
    ExpandableListView, ExpandableListViewState, IconGlyphs, ItemEvent, KeyCode, ListDocument,
    ListEvent, LongPressDetector, NodeId, NodeState, ScrollPolicy, Transition, Trigger, Visibility,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, ListKeyBindings};
