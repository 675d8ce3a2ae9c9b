use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Tag name of the synthetic element that owns every top-level node.
pub const DOCUMENT_TAG: &str = "#document";

/// Handle of a node inside a [`ListDocument`].
///
/// Handles are only meaningful for the document that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Element payload: tag, classes, attributes and display state.
#[derive(Clone, Debug, Default)]
pub struct ElementData {
    tag: String,
    classes: SmallVec<[String; 2]>,
    attrs: FxHashMap<String, String>,
    hidden: bool,
}

#[derive(Clone, Debug)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A display change recorded by [`ListDocument::hide`] or [`ListDocument::show`].
///
/// The document switches immediately; a host that animates folding replays these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden(NodeId),
    Shown(NodeId),
}

impl Visibility {
    pub const fn element(self) -> NodeId {
        match self {
            Self::Hidden(id) | Self::Shown(id) => id,
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden(_))
    }
}

/// In-memory list document the widget decorates and mutates.
///
/// Nodes live in an arena and are never freed; detached nodes simply have no parent.
#[derive(Clone, Debug)]
pub struct ListDocument {
    nodes: Vec<Node>,
    root: NodeId,
    visibility: Vec<Visibility>,
}

impl Default for ListDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ListDocument {
    /// Creates an empty document holding only the synthetic root element.
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData {
                tag: DOCUMENT_TAG.to_string(),
                ..ElementData::default()
            }),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            visibility: Vec::new(),
        }
    }

    /// Returns the synthetic root element.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created, attached or not.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..ElementData::default()
        }))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Moves `child` to the front of `parent`'s children.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.insert(0, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Removes the node from its parent; the subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|child| *child != id);
        self.nodes[id.0].parent = None;
    }

    // Rejects foreign handles, text parents and cycles.
    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        self.element(parent).is_some()
            && child.0 < self.nodes.len()
            && child != self.root
            && parent != child
            && !self.is_ancestor(child, parent)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |node| node.children.as_slice())
    }

    /// Direct children that are elements.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
    }

    /// All nodes below `id` in document order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = self.children(id).iter().rev().copied().collect();
        Descendants { doc: self, stack }
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|node| &node.data)
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.data(id) {
            Some(NodeData::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.data) {
            Some(NodeData::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Lowercase tag name, `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.tag.as_str())
    }

    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id) == Some(tag)
    }

    /// `ul` or `ol`.
    pub fn is_list(&self, id: NodeId) -> bool {
        matches!(self.tag(id), Some("ul" | "ol"))
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            Some(NodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map_or(&[], |element| element.classes.as_slice())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|name| name == class)
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if class.is_empty() || self.has_class(id, class) {
            return;
        }
        if let Some(element) = self.element_mut(id) {
            element.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.element_mut(id) {
            element.classes.retain(|name| name.as_str() != class);
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|element| element.attrs.get(name))
            .map(String::as_str)
    }

    /// Sets an attribute; `class` is routed to the class list.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "class" {
            for class in value.split_whitespace() {
                self.add_class(id, class);
            }
            return;
        }
        if let Some(element) = self.element_mut(id) {
            element.attrs.insert(name.to_string(), value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attrs.remove(name);
        }
    }

    /// Attributes sorted by name.
    pub fn attrs(&self, id: NodeId) -> Vec<(&str, &str)> {
        let mut attrs: Vec<_> = self
            .element(id)
            .map(|element| {
                element
                    .attrs
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        attrs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        attrs
    }

    /// Returns `true` if the element itself is hidden (`display: none`).
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|element| element.hidden)
    }

    /// Hides or shows an element. Returns `true` if the display state changed.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        match self.element_mut(id) {
            Some(element) if element.hidden != hidden => {
                element.hidden = hidden;
                true
            }
            _ => false,
        }
    }

    /// Hides an element and records the change. Returns `None` if it was already hidden.
    pub fn hide(&mut self, id: NodeId) -> Option<Visibility> {
        self.record(id, true)
    }

    /// Shows an element and records the change. Returns `None` if it was already shown.
    pub fn show(&mut self, id: NodeId) -> Option<Visibility> {
        self.record(id, false)
    }

    fn record(&mut self, id: NodeId, hidden: bool) -> Option<Visibility> {
        if !self.set_hidden(id, hidden) {
            return None;
        }
        let change = if hidden {
            Visibility::Hidden(id)
        } else {
            Visibility::Shown(id)
        };
        self.visibility.push(change);
        Some(change)
    }

    /// Changes recorded by `hide`/`show` since the last call, oldest first.
    pub fn take_visibility_changes(&mut self) -> Vec<Visibility> {
        std::mem::take(&mut self.visibility)
    }

    /// Returns `true` if neither the node nor any ancestor is hidden.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        if self.is_hidden(id) {
            return false;
        }
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.is_hidden(node) {
                return false;
            }
            current = self.parent(node);
        }
        true
    }

    /// Visible label of an item: its text with nested lists left out, whitespace collapsed.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in self.children(id) {
            match self.data(*child) {
                Some(NodeData::Text(text)) => {
                    out.push(' ');
                    out.push_str(text);
                }
                Some(NodeData::Element(_)) if !self.is_list(*child) => {
                    self.collect_text(*child, out);
                }
                _ => {}
            }
        }
    }
}

/// Pre-order iterator returned by [`ListDocument::descendants`].
pub struct Descendants<'a> {
    doc: &'a ListDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ListDocument, NodeId, NodeId, NodeId) {
        let mut doc = ListDocument::new();
        let ul = doc.create_element("UL");
        let li = doc.create_element("li");
        let text = doc.create_text("Fruits");
        let nested = doc.create_element("ul");
        doc.append_child(doc.root(), ul);
        doc.append_child(ul, li);
        doc.append_child(li, text);
        doc.append_child(li, nested);
        (doc, ul, li, nested)
    }

    #[test]
    fn prepend_moves_node_to_front() {
        let (mut doc, _, li, nested) = sample();
        let img = doc.create_element("img");
        doc.prepend_child(li, img);

        assert_eq!(doc.children(li).first(), Some(&img));
        assert_eq!(doc.children(li).last(), Some(&nested));
        assert_eq!(doc.parent(img), Some(li));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let (doc, ul, li, nested) = sample();
        let order: Vec<_> = doc.descendants(doc.root()).collect();

        assert_eq!(order.len(), 4);
        assert_eq!(order[0], ul);
        assert_eq!(order[1], li);
        assert_eq!(order[3], nested);
    }

    #[test]
    fn classes_do_not_duplicate() {
        let (mut doc, _, li, _) = sample();
        doc.add_class(li, "expanded");
        doc.set_attr(li, "class", "expanded extra");
        assert_eq!(doc.classes(li), ["expanded", "extra"]);

        doc.remove_class(li, "expanded");
        assert!(!doc.has_class(li, "expanded"));
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let (mut doc, ul, li, nested) = sample();
        assert!(doc.is_rendered(nested));

        assert!(doc.set_hidden(ul, true));
        assert!(!doc.set_hidden(ul, true));
        assert!(!doc.is_rendered(li));
        assert!(!doc.is_hidden(li));
    }

    #[test]
    fn hide_and_show_record_only_real_changes() {
        let (mut doc, _, _, nested) = sample();

        assert_eq!(doc.hide(nested), Some(Visibility::Hidden(nested)));
        assert_eq!(doc.hide(nested), None);
        assert!(doc.is_hidden(nested));
        assert_eq!(doc.show(nested), Some(Visibility::Shown(nested)));
        assert!(!doc.set_hidden(nested, false));

        assert_eq!(
            doc.take_visibility_changes(),
            [Visibility::Hidden(nested), Visibility::Shown(nested)]
        );
        assert!(doc.take_visibility_changes().is_empty());
    }

    #[test]
    fn cycles_are_rejected() {
        let (mut doc, ul, _, nested) = sample();
        doc.append_child(nested, ul);
        assert_eq!(doc.parent(ul), Some(doc.root()));
    }

    #[test]
    fn text_content_skips_nested_lists() {
        let (mut doc, _, li, nested) = sample();
        let inner = doc.create_element("li");
        let inner_text = doc.create_text("Apple");
        doc.append_child(nested, inner);
        doc.append_child(inner, inner_text);

        assert_eq!(doc.text_content(li), "Fruits");
        assert_eq!(doc.text_content(inner), "Apple");
    }
}
