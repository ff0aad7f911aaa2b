//! In-memory element implementation for testing.
//!
//! Provides [`MockElement`] for exercising the switcher without a DOM.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::ElementHandle;

#[derive(Default)]
struct MockNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<MockElement>,
    text: String,
    parent: Weak<RefCell<MockNode>>,
    hidden: bool,
}

/// Mock element for testing.
///
/// Handles compare equal when they point at the same node.
///
/// # Example
///
/// ```ignore
/// use codeswitch_multilang::{ElementHandle, MockElement};
///
/// let group = MockElement::new("div").with_attr("data-multilang", "");
/// let pre = MockElement::new("pre");
/// pre.append_child(&MockElement::new("code").with_classes(&["hljs", "go"]));
/// group.append_child(&pre);
/// ```
#[derive(Clone)]
pub struct MockElement(Rc<RefCell<MockNode>>);

impl MockElement {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(MockNode {
            tag: tag.to_owned(),
            ..MockNode::default()
        })))
    }

    #[must_use]
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_classes(self, classes: &[&str]) -> Self {
        let classes: Vec<String> = classes.iter().map(|c| (*c).to_owned()).collect();
        self.set_class_list(&classes);
        self
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(Self)
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.borrow_mut().children.retain(|c| c != self);
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn adopt(&self, child: &Self) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    }
}

impl PartialEq for MockElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MockElement {}

impl fmt::Debug for MockElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("MockElement")
            .field("tag", &node.tag)
            .field("attrs", &node.attrs)
            .field("children", &node.children.len())
            .finish()
    }
}

impl ElementHandle for MockElement {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
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
        self.0
            .borrow()
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if let Some(entry) = node.attrs.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value.to_owned();
        } else {
            node.attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attrs.retain(|(key, _)| key != name);
    }

    fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn append_child(&self, child: &Self) {
        self.adopt(child);
        self.0.borrow_mut().children.push(child.clone());
    }

    fn prepend_child(&self, child: &Self) {
        self.adopt(child);
        self.0.borrow_mut().children.insert(0, child.clone());
    }

    fn create_element(&self, tag: &str) -> Self {
        Self::new(tag)
    }

    fn set_text(&self, text: &str) {
        let children = self.children();
        for child in &children {
            child.detach();
        }
        self.0.borrow_mut().text = text.to_owned();
    }

    fn text_content(&self) -> String {
        let node = self.0.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text_content());
        }
        text
    }

    fn is_visible(&self) -> bool {
        !self.0.borrow().hidden
    }

    fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().hidden = !visible;
    }
}
