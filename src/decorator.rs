use log::debug;

use crate::config::ExpandableListConfig;
use crate::dom::{ListDocument, NodeId};
use crate::node::{NodeState, has_sublist, sublists};

/// Counts of items classified by the initialization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoration {
    pub childless: usize,
    pub expanded: usize,
    pub contracted: usize,
}

/// Classifies every `li` under `container`, prepends its icon and hides contracted sublists.
///
/// Runs in three passes like the markup contract reads: leaves first, then items the author
/// marked expanded, then everything else becomes contracted.
pub(crate) fn decorate(
    doc: &mut ListDocument,
    container: NodeId,
    config: &ExpandableListConfig,
) -> Decoration {
    let names = &config.class_names;
    let items: Vec<NodeId> = doc
        .descendants(container)
        .filter(|id| doc.is_tag(*id, "li"))
        .collect();
    let mut decoration = Decoration::default();

    for &item in &items {
        if has_sublist(doc, item) {
            continue;
        }
        doc.remove_class(item, &names.expanded);
        doc.remove_class(item, &names.contracted);
        doc.add_class(item, &names.childless);
        let icon = create_icon(doc, config, NodeState::Childless);
        doc.prepend_child(item, icon);
        decoration.childless += 1;
    }

    for &item in &items {
        if !doc.has_class(item, &names.expanded) || doc.has_class(item, &names.childless) {
            continue;
        }
        let icon = create_icon(doc, config, NodeState::Expanded);
        doc.prepend_child(item, icon);
        decoration.expanded += 1;
    }

    for &item in &items {
        if doc.has_class(item, &names.expanded) || doc.has_class(item, &names.childless) {
            continue;
        }
        doc.add_class(item, &names.contracted);
        let icon = create_icon(doc, config, NodeState::Contracted);
        doc.prepend_child(item, icon);
        for list in sublists(doc, item) {
            doc.hide(list);
        }
        decoration.contracted += 1;
    }

    debug!(
        "decorated {} items: {} childless, {} expanded, {} contracted",
        items.len(),
        decoration.childless,
        decoration.expanded,
        decoration.contracted
    );
    decoration
}

fn create_icon(doc: &mut ListDocument, config: &ExpandableListConfig, state: NodeState) -> NodeId {
    let icon = doc.create_element("img");
    doc.add_class(icon, &config.icon_class());
    sync_icon(doc, icon, config, state);
    if !state.is_childless() {
        doc.set_attr(icon, "tabindex", "0");
    }
    icon
}

/// Points the icon's source, alt text and title at the given state.
pub(crate) fn sync_icon(
    doc: &mut ListDocument,
    icon: NodeId,
    config: &ExpandableListConfig,
    state: NodeState,
) {
    doc.set_attr(icon, "src", config.icons.for_state(state));
    doc.set_attr(icon, "alt", config.alts.for_state(state).unwrap_or_default());
    match config.titles.for_state(state) {
        Some(title) => doc.set_attr(icon, "title", title),
        None => doc.remove_attr(icon, "title"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;

    const MARKUP: &str = r#"<div id="box"><ul>
        <li class="expanded">Fruits<ul><li>Apple</li><li>Pear</li></ul></li>
        <li>Stones<ul><li>Granite</li></ul></li>
        <li class="expanded">Empty</li>
    </ul></div>"#;

    fn decorated() -> (ListDocument, Decoration) {
        let mut doc = markup::parse(MARKUP).unwrap();
        let container = doc.children(doc.root())[0];
        let decoration = decorate(&mut doc, container, &ExpandableListConfig::default());
        (doc, decoration)
    }

    fn items(doc: &ListDocument) -> Vec<NodeId> {
        doc.descendants(doc.root())
            .filter(|id| doc.is_tag(*id, "li"))
            .collect()
    }

    #[test]
    fn counts_each_class_of_item() {
        let (_, decoration) = decorated();
        assert_eq!(
            decoration,
            Decoration {
                childless: 4,
                expanded: 1,
                contracted: 1,
            }
        );
    }

    #[test]
    fn every_item_gets_exactly_one_state_class_and_one_icon() {
        let (doc, _) = decorated();
        let names = ExpandableListConfig::default().class_names;

        for item in items(&doc) {
            let states = [&names.expanded, &names.contracted, &names.childless]
                .into_iter()
                .filter(|class| doc.has_class(item, class))
                .count();
            assert_eq!(states, 1);

            let icons = doc
                .child_elements(item)
                .filter(|child| doc.has_class(*child, "expandablelist-icon"))
                .count();
            assert_eq!(icons, 1);
            assert!(doc.is_tag(doc.children(item)[0], "img"));
        }
    }

    #[test]
    fn leaf_marked_expanded_becomes_childless() {
        let (doc, _) = decorated();
        let empty = items(&doc)[5];

        assert_eq!(doc.text_content(empty), "Empty");
        assert!(doc.has_class(empty, "childless"));
        assert!(!doc.has_class(empty, "expanded"));
    }

    #[test]
    fn childless_icons_are_not_focusable() {
        let (doc, _) = decorated();
        let apple = items(&doc)[1];
        let icon = doc.children(apple)[0];

        assert_eq!(doc.attr(icon, "src"), Some("plugin/disc.svg"));
        assert_eq!(doc.attr(icon, "alt"), Some(""));
        assert_eq!(doc.attr(icon, "title"), None);
        assert_eq!(doc.attr(icon, "tabindex"), None);
    }

    #[test]
    fn contracted_items_hide_their_sublist() {
        let (doc, _) = decorated();
        let all = items(&doc);
        let (fruits, stones) = (all[0], all[3]);

        let fruits_icon = doc.children(fruits)[0];
        assert_eq!(doc.attr(fruits_icon, "src"), Some("plugin/minus.svg"));
        assert_eq!(doc.attr(fruits_icon, "title"), Some("Show less"));
        assert!(sublists(&doc, fruits).iter().all(|list| !doc.is_hidden(*list)));

        let stones_icon = doc.children(stones)[0];
        assert!(doc.has_class(stones, "contracted"));
        assert_eq!(doc.attr(stones_icon, "src"), Some("plugin/plus.svg"));
        assert_eq!(doc.attr(stones_icon, "alt"), Some("More"));
        assert_eq!(doc.attr(stones_icon, "tabindex"), Some("0"));
        assert!(sublists(&doc, stones).iter().all(|list| doc.is_hidden(*list)));
    }

    #[test]
    fn initial_hiding_is_recorded() {
        let (mut doc, _) = decorated();
        let stones = items(&doc)[3];

        let changes = doc.take_visibility_changes();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].is_hidden());
        assert_eq!(changes[0].element(), sublists(&doc, stones)[0]);
    }
}
