//! Arena-backed XHTML tree.
//!
//! A [`Document`] owns every node; [`DomElement`] is a shared handle to one
//! element and implements [`ElementHandle`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use codeswitch_multilang::ElementHandle;

/// Tag of the synthetic element wrapping the parsed fragment.
pub(crate) const ROOT_TAG: &str = "codeswitch-root";

pub(crate) type NodeId = usize;

#[derive(Debug)]
pub(crate) enum NodeData {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    /// Raw `<![CDATA[...]]>` content, written back unescaped.
    CData(String),
    Comment(String),
    /// `<?...?>` content, including the XML declaration.
    Instruction(String),
    Doctype(String),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Node storage shared by a document and its element handles.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    fn insert(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        let children = &mut self.nodes[parent].children;
        match index {
            Some(i) => children.insert(i, child),
            None => children.push(child),
        }
    }

    fn attrs(&self, id: NodeId) -> Option<&Vec<(String, String)>> {
        match &self.nodes[id].data {
            NodeData::Element { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    fn attrs_mut(&mut self, id: NodeId) -> Option<&mut Vec<(String, String)>> {
        match &mut self.nodes[id].data {
            NodeData::Element { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].data {
            NodeData::Text(text) | NodeData::CData(text) => out.push_str(text),
            NodeData::Element { .. } => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            }
            NodeData::Comment(_) | NodeData::Instruction(_) | NodeData::Doctype(_) => {}
        }
    }
}

/// Parsed XHTML document.
#[derive(Debug)]
pub struct Document {
    arena: Rc<RefCell<Arena>>,
    root: NodeId,
    doctype: Option<String>,
}

impl Document {
    /// Create an empty document with only the synthetic root element.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.push(NodeData::Element {
            tag: ROOT_TAG.to_owned(),
            attrs: Vec::new(),
        });
        Self {
            arena: Rc::new(RefCell::new(arena)),
            root,
            doctype: None,
        }
    }

    /// Handle to the synthetic root. Its children are the top-level nodes.
    pub fn root(&self) -> DomElement {
        DomElement {
            arena: Rc::clone(&self.arena),
            id: self.root,
        }
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    /// Record the doctype and keep it in place among the top-level nodes.
    pub(crate) fn set_doctype(&mut self, parent: NodeId, doctype: String) {
        self.append_node(parent, NodeData::Doctype(doctype.clone()));
        self.doctype = Some(doctype);
    }

    pub(crate) fn root_id(&self) -> NodeId {
        self.root
    }

    pub(crate) fn append_element(
        &self,
        parent: NodeId,
        tag: String,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let mut arena = self.arena.borrow_mut();
        let id = arena.push(NodeData::Element { tag, attrs });
        arena.insert(parent, id, None);
        id
    }

    /// Append text, merging with a preceding text node.
    pub(crate) fn append_text(&self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut arena = self.arena.borrow_mut();
        if let Some(&last) = arena.node(parent).children.last()
            && let NodeData::Text(existing) = &mut arena.node_mut(last).data
        {
            existing.push_str(text);
            return;
        }
        let id = arena.push(NodeData::Text(text.to_owned()));
        arena.insert(parent, id, None);
    }

    /// Append a node that is not merged with its siblings.
    pub(crate) fn append_node(&self, parent: NodeId, data: NodeData) {
        let mut arena = self.arena.borrow_mut();
        let id = arena.push(data);
        arena.insert(parent, id, None);
    }

    pub(crate) fn with_arena<R>(&self, f: impl FnOnce(&Arena) -> R) -> R {
        f(&self.arena.borrow())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to an element of a [`Document`].
#[derive(Clone)]
pub struct DomElement {
    arena: Rc<RefCell<Arena>>,
    id: NodeId,
}

impl PartialEq for DomElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena) && self.id == other.id
    }
}

impl Eq for DomElement {}

impl fmt::Debug for DomElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomElement")
            .field("id", &self.id)
            .field("tag", &self.tag_name())
            .finish()
    }
}

impl DomElement {
    fn handle(&self, id: NodeId) -> Self {
        Self {
            arena: Rc::clone(&self.arena),
            id,
        }
    }

    fn style(&self) -> Option<String> {
        self.attribute("style")
    }
}

impl ElementHandle for DomElement {
    fn tag_name(&self) -> String {
        match &self.arena.borrow().node(self.id).data {
            NodeData::Element { tag, .. } => tag.to_ascii_lowercase(),
            _ => String::new(),
        }
    }

    fn class_list(&self) -> Vec<String> {
        self.attribute("class")
            .map(|value| value.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    fn set_class_list(&self, classes: &[String]) {
        self.set_attribute("class", &classes.join(" "));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.arena
            .borrow()
            .attrs(self.id)?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut arena = self.arena.borrow_mut();
        let Some(attrs) = arena.attrs_mut(self.id) else {
            return;
        };
        if let Some(entry) = attrs.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value.to_owned();
        } else {
            attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Some(attrs) = self.arena.borrow_mut().attrs_mut(self.id) {
            attrs.retain(|(key, _)| key != name);
        }
    }

    fn children(&self) -> Vec<Self> {
        let arena = self.arena.borrow();
        arena
            .node(self.id)
            .children
            .iter()
            .filter(|&&child| matches!(arena.node(child).data, NodeData::Element { .. }))
            .map(|&child| self.handle(child))
            .collect()
    }

    fn append_child(&self, child: &Self) {
        self.arena.borrow_mut().insert(self.id, child.id, None);
    }

    fn prepend_child(&self, child: &Self) {
        self.arena.borrow_mut().insert(self.id, child.id, Some(0));
    }

    fn create_element(&self, tag: &str) -> Self {
        let id = self.arena.borrow_mut().push(NodeData::Element {
            tag: tag.to_owned(),
            attrs: Vec::new(),
        });
        self.handle(id)
    }

    fn set_text(&self, text: &str) {
        let mut arena = self.arena.borrow_mut();
        for child in std::mem::take(&mut arena.node_mut(self.id).children) {
            arena.node_mut(child).parent = None;
        }
        if !text.is_empty() {
            let id = arena.push(NodeData::Text(text.to_owned()));
            arena.insert(self.id, id, None);
        }
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.arena.borrow().collect_text(self.id, &mut out);
        out
    }

    fn is_visible(&self) -> bool {
        if self.attribute("hidden").is_some() {
            return false;
        }
        self.style()
            .and_then(|style| display_value(&style))
            .is_none_or(|display| !display.eq_ignore_ascii_case("none"))
    }

    fn set_visible(&self, visible: bool) {
        self.remove_attribute("hidden");
        let display = if visible { "block" } else { "none" };
        let style = with_display(self.style().as_deref().unwrap_or_default(), display);
        self.set_attribute("style", &style);
    }
}

/// Value of the last `display` declaration in an inline style.
fn display_value(style: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(property, _)| property.trim().eq_ignore_ascii_case("display"))
        .map(|(_, value)| value.trim().to_owned())
        .last()
}

/// Replace the `display` declaration of an inline style, keeping the others.
fn with_display(style: &str, display: &str) -> String {
    let mut decls: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split_once(':')
                .is_none_or(|(property, _)| !property.trim().eq_ignore_ascii_case("display"))
        })
        .map(str::to_owned)
        .collect();
    decls.push(format!("display: {display}"));
    decls.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(doc: &Document, tag: &str) -> DomElement {
        let id = doc.append_element(doc.root_id(), tag.to_owned(), Vec::new());
        doc.root().handle(id)
    }

    #[test]
    fn test_children_skip_text_nodes() {
        let doc = Document::new();
        let div = element(&doc, "div");
        doc.append_text(div.id, "before");
        let span = doc.append_element(div.id, "span".to_owned(), Vec::new());
        doc.append_text(div.id, "after");

        assert_eq!(div.children(), vec![div.handle(span)]);
        assert_eq!(div.text_content(), "beforeafter");
    }

    #[test]
    fn test_adjacent_text_merged() {
        let doc = Document::new();
        let p = element(&doc, "p");
        doc.append_text(p.id, "a");
        doc.append_text(p.id, "b");

        doc.with_arena(|arena| assert_eq!(arena.node(p.id).children.len(), 1));
        assert_eq!(p.text_content(), "ab");
    }

    #[test]
    fn test_prepend_moves_existing_node() {
        let doc = Document::new();
        let a = element(&doc, "a");
        let b = element(&doc, "b");

        doc.root().prepend_child(&b);

        assert_eq!(doc.root().children(), vec![b, a]);
    }

    #[test]
    fn test_set_text_replaces_children() {
        let doc = Document::new();
        let div = element(&doc, "div");
        doc.append_element(div.id, "span".to_owned(), Vec::new());

        div.set_text("Title");

        assert!(div.children().is_empty());
        assert_eq!(div.text_content(), "Title");
    }

    #[test]
    fn test_set_visible_keeps_other_declarations() {
        let doc = Document::new();
        let code = element(&doc, "code");
        code.set_attribute("style", "color: red; display: inline");

        code.set_visible(false);
        assert_eq!(
            code.attribute("style").as_deref(),
            Some("color: red; display: none")
        );
        assert!(!code.is_visible());

        code.set_visible(true);
        assert_eq!(
            code.attribute("style").as_deref(),
            Some("color: red; display: block")
        );
        assert!(code.is_visible());
    }

    #[test]
    fn test_hidden_attribute_means_invisible() {
        let doc = Document::new();
        let code = element(&doc, "code");
        code.set_attribute("hidden", "");
        assert!(!code.is_visible());

        code.set_visible(true);
        assert_eq!(code.attribute("hidden"), None);
        assert!(code.is_visible());
    }

    #[test]
    fn test_tag_name_lowercase() {
        let doc = Document::new();
        assert_eq!(element(&doc, "PRE").tag_name(), "pre");
    }
}
