//! Strongly typed widget configuration.
//!
//! [`ExpandableListConfig`] is built once per attachment and handed to every handler by
//! reference. [`ExpandableListOptions`] carries the caller's partial overrides; each field left
//! as `None` keeps its default.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::NodeState;

/// Numeric key code as reported by keyboard events (`13` for Enter and so on).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const PAGE_UP: Self = Self(33);
    pub const PAGE_DOWN: Self = Self(34);
    pub const END: Self = Self(35);
    pub const HOME: Self = Self(36);
    pub const LEFT: Self = Self(37);
    pub const UP: Self = Self(38);
    pub const RIGHT: Self = Self(39);
    pub const DOWN: Self = Self(40);
    pub const INSERT: Self = Self(45);
    pub const DELETE: Self = Self(46);

    pub const fn code(self) -> u32 {
        self.0
    }
}

/// Class names marking each item state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    pub expanded: String,
    pub contracted: String,
    pub childless: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            expanded: "expanded".to_string(),
            contracted: "contracted".to_string(),
            childless: "childless".to_string(),
        }
    }
}

/// Icon sources per state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateIcons {
    pub expanded: String,
    pub contracted: String,
    pub childless: String,
}

impl Default for StateIcons {
    fn default() -> Self {
        Self {
            expanded: "plugin/minus.svg".to_string(),
            contracted: "plugin/plus.svg".to_string(),
            childless: "plugin/disc.svg".to_string(),
        }
    }
}

impl StateIcons {
    pub fn for_state(&self, state: NodeState) -> &str {
        match state {
            NodeState::Childless => &self.childless,
            NodeState::Expanded => &self.expanded,
            NodeState::Contracted => &self.contracted,
        }
    }
}

/// Text shown per branch state (titles or alt text). Childless icons carry none.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateLabels {
    pub expanded: String,
    pub contracted: String,
}

impl StateLabels {
    pub fn new(expanded: impl Into<String>, contracted: impl Into<String>) -> Self {
        Self {
            expanded: expanded.into(),
            contracted: contracted.into(),
        }
    }

    pub fn for_state(&self, state: NodeState) -> Option<&str> {
        match state {
            NodeState::Childless => None,
            NodeState::Expanded => Some(&self.expanded),
            NodeState::Contracted => Some(&self.contracted),
        }
    }
}

/// Key codes that act on an icon, per state of its item.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedKeys {
    pub expanded: Vec<KeyCode>,
    pub contracted: Vec<KeyCode>,
}

impl Default for AllowedKeys {
    fn default() -> Self {
        Self {
            expanded: vec![KeyCode::ENTER, KeyCode::LEFT, KeyCode::UP],
            contracted: vec![KeyCode::ENTER, KeyCode::RIGHT, KeyCode::DOWN],
        }
    }
}

impl AllowedKeys {
    pub fn allows(&self, state: NodeState, key: KeyCode) -> bool {
        match state {
            NodeState::Childless => false,
            NodeState::Expanded => self.expanded.contains(&key),
            NodeState::Contracted => self.contracted.contains(&key),
        }
    }
}

/// Complete configuration of one attached list.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandableListConfig {
    /// Prefix for the classes the widget adds on its own elements.
    pub namespace: String,
    pub class_names: ClassNames,
    pub icons: StateIcons,
    pub titles: StateLabels,
    pub alts: StateLabels,
    pub allowed_keys: AllowedKeys,
}

impl Default for ExpandableListConfig {
    fn default() -> Self {
        Self {
            namespace: "expandablelist-".to_string(),
            class_names: ClassNames::default(),
            icons: StateIcons::default(),
            titles: StateLabels::new("Show less", "Show more"),
            alts: StateLabels::new("Less", "More"),
            allowed_keys: AllowedKeys::default(),
        }
    }
}

impl ExpandableListConfig {
    /// Builds a configuration from defaults with the given overrides applied.
    pub fn from_options(options: ExpandableListOptions) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    fn apply(&mut self, options: ExpandableListOptions) {
        let ExpandableListOptions {
            namespace,
            class_names,
            icons,
            titles,
            alts,
            allowed_key_codes,
        } = options;

        if let Some(namespace) = namespace {
            self.namespace = namespace;
        }
        if let Some(names) = class_names {
            merge(&mut self.class_names.expanded, names.expanded);
            merge(&mut self.class_names.contracted, names.contracted);
            merge(&mut self.class_names.childless, names.childless);
        }
        if let Some(icons) = icons {
            merge(&mut self.icons.expanded, icons.expanded);
            merge(&mut self.icons.contracted, icons.contracted);
            merge(&mut self.icons.childless, icons.childless);
        }
        if let Some(titles) = titles {
            merge(&mut self.titles.expanded, titles.expanded);
            merge(&mut self.titles.contracted, titles.contracted);
        }
        if let Some(alts) = alts {
            merge(&mut self.alts.expanded, alts.expanded);
            merge(&mut self.alts.contracted, alts.contracted);
        }
        if let Some(keys) = allowed_key_codes {
            merge(&mut self.allowed_keys.expanded, keys.expanded);
            merge(&mut self.allowed_keys.contracted, keys.contracted);
        }
    }

    /// Class put on every icon this list creates.
    pub fn icon_class(&self) -> String {
        format!("{}icon", self.namespace)
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Partial overrides for [`ExpandableListConfig`].
///
/// With the `serde` feature enabled the field names follow the camelCase option object
/// (`classNames`, `allowedKeyCodes`, `NS` is accepted for the namespace).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandableListOptions {
    #[cfg_attr(feature = "serde", serde(alias = "NS"))]
    pub namespace: Option<String>,
    pub class_names: Option<ClassNameOptions>,
    pub icons: Option<IconOptions>,
    pub titles: Option<LabelOptions>,
    pub alts: Option<LabelOptions>,
    pub allowed_key_codes: Option<KeyCodeOptions>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassNameOptions {
    pub expanded: Option<String>,
    pub contracted: Option<String>,
    pub childless: Option<String>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconOptions {
    pub expanded: Option<String>,
    pub contracted: Option<String>,
    pub childless: Option<String>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelOptions {
    pub expanded: Option<String>,
    pub contracted: Option<String>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyCodeOptions {
    pub expanded: Option<Vec<KeyCode>>,
    pub contracted: Option<Vec<KeyCode>>,
}
