use crate::config::ClassNames;
use crate::dom::{ListDocument, NodeId};

/// Expand/contract state of a list item, carried by a class on the `li`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Leaf item without a nested list; never transitions.
    Childless,
    /// Nested list shown.
    Expanded,
    /// Nested list hidden.
    Contracted,
}

impl NodeState {
    pub const fn is_childless(self) -> bool {
        matches!(self, Self::Childless)
    }

    /// The state a primary action leads to. Childless stays childless.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Childless => Self::Childless,
            Self::Expanded => Self::Contracted,
            Self::Contracted => Self::Expanded,
        }
    }

    /// Class name carrying this state.
    pub fn class_name(self, names: &ClassNames) -> &str {
        match self {
            Self::Childless => &names.childless,
            Self::Expanded => &names.expanded,
            Self::Contracted => &names.contracted,
        }
    }

    /// Reads the state of an item from its classes.
    ///
    /// Expanded is checked first, so an item wrongly carrying both expanded and contracted
    /// behaves as expanded. Items without any state class (added after decoration) are `None`.
    pub fn of(doc: &ListDocument, item: NodeId, names: &ClassNames) -> Option<Self> {
        [Self::Expanded, Self::Contracted, Self::Childless]
            .into_iter()
            .find(|state| doc.has_class(item, state.class_name(names)))
    }
}

/// Returns `true` if the item has a nested list as a direct child.
pub fn has_sublist(doc: &ListDocument, item: NodeId) -> bool {
    doc.child_elements(item).any(|child| doc.is_list(child))
}

/// Nested lists directly under an item.
pub fn sublists(doc: &ListDocument, item: NodeId) -> Vec<NodeId> {
    doc.child_elements(item)
        .filter(|child| doc.is_list(*child))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;

    #[test]
    fn expanded_wins_over_contracted() {
        let doc = markup::parse(r#"<li class="contracted expanded"><ul></ul></li>"#).unwrap();
        let li = doc.children(doc.root())[0];

        assert_eq!(
            NodeState::of(&doc, li, &ClassNames::default()),
            Some(NodeState::Expanded)
        );
    }

    #[test]
    fn unclassified_item_has_no_state() {
        let doc = markup::parse("<li>plain</li>").unwrap();
        let li = doc.children(doc.root())[0];

        assert_eq!(NodeState::of(&doc, li, &ClassNames::default()), None);
        assert!(!has_sublist(&doc, li));
    }

    #[test]
    fn toggled_flips_only_branch_states() {
        assert_eq!(NodeState::Expanded.toggled(), NodeState::Contracted);
        assert_eq!(NodeState::Contracted.toggled(), NodeState::Expanded);
        assert_eq!(NodeState::Childless.toggled(), NodeState::Childless);
    }
}
