//! Expandable nested list widget: click, key and long-press folding of `ul`/`li` trees.
//!
//! [`ExpandableList::attach`] decorates a container of a [`ListDocument`] with state icons and
//! routes triggers through a `(state, trigger)` dispatch table. [`ExpandableListView`] renders
//! the result with ratatui.
//!
//! Feature flags:
//! - `keymap`: crossterm key and mouse handling on `ExpandableListViewState`.
//! - `serde`: serde support for `ExpandableListOptions` and `ExpandableListConfig`.

mod action;
mod config;
mod context;
mod decorator;
mod dom;
mod error;
mod glyphs;
#[cfg(feature = "keymap")]
mod keymap;
mod list;
mod longpress;
pub mod markup;
mod node;
pub mod prelude;
mod state;
mod style;
mod widget;

pub use action::{IgnoreReason, ItemEvent, ListEvent, Transition, Trigger, TriggerKind};
pub use config::{
    AllowedKeys, ClassNameOptions, ClassNames, ExpandableListConfig, ExpandableListOptions,
    IconOptions, KeyCode, KeyCodeOptions, LabelOptions, StateIcons, StateLabels,
};
pub use context::ItemRowContext;
pub use decorator::Decoration;
pub use dom::{
    DOCUMENT_TAG, Descendants, ElementData, ListDocument, NodeData, NodeId, Visibility,
};
pub use error::MarkupError;
pub use glyphs::{IconGlyphs, item_label_cell, item_label_line};
#[cfg(feature = "keymap")]
pub use keymap::{KeyInput, KeymapProfile, ListKeyBindings, key_code};
pub use list::ExpandableList;
pub use longpress::{LongPressDetector, Press};
pub use node::{NodeState, has_sublist, sublists};
pub use state::{ExpandableListViewState, VisibleItem};
pub use style::{ExpandableListStyle, ScrollPolicy};
pub use widget::ExpandableListView;
