//! Element capability interface.

/// Minimal element interface required by the switcher.
///
/// Handles are cheap references into a host document: cloning a handle yields
/// another reference to the same element, and mutating methods take `&self`,
/// matching how a browser DOM behaves. Implementations decide how visibility
/// is represented (inline `display` style, `hidden` attribute, ...).
pub trait ElementHandle: Clone {
    /// Lowercase tag name.
    fn tag_name(&self) -> String;

    /// Class tokens in attribute order. Empty when no class attribute exists.
    fn class_list(&self) -> Vec<String>;

    /// Replace the class attribute with the given tokens.
    fn set_class_list(&self, classes: &[String]);

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    /// Child elements in document order. Text nodes are not included.
    fn children(&self) -> Vec<Self>;

    /// Append `child` as the last child, detaching it from any previous parent.
    fn append_child(&self, child: &Self);

    /// Insert `child` as the first child, detaching it from any previous parent.
    fn prepend_child(&self, child: &Self);

    /// Create a detached element owned by the same document.
    fn create_element(&self, tag: &str) -> Self;

    /// Replace all content with a single text node.
    fn set_text(&self, text: &str);

    /// Concatenated text of this element and its descendants.
    fn text_content(&self) -> String;

    fn is_visible(&self) -> bool;

    /// Show the element as a block, or hide it.
    fn set_visible(&self, visible: bool);

    fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.class_list();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
            self.set_class_list(&classes);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut classes = self.class_list();
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.set_class_list(&classes);
        }
    }
}

/// Find all descendants of `root` carrying attribute `name`, in document order.
///
/// `root` itself is not included. Matches nested inside a matching element are
/// still returned.
pub fn find_by_attribute<E: ElementHandle>(root: &E, name: &str) -> Vec<E> {
    let mut found = Vec::new();
    collect(root, &mut |el| el.attribute(name).is_some(), &mut found);
    found
}

/// Find all `pre > code` blocks below `root`, in document order.
pub fn code_blocks<E: ElementHandle>(root: &E) -> Vec<E> {
    let mut found = Vec::new();
    collect_code_blocks(root, &mut found);
    found
}

fn collect<E: ElementHandle>(el: &E, matches: &mut impl FnMut(&E) -> bool, out: &mut Vec<E>) {
    for child in el.children() {
        if matches(&child) {
            out.push(child.clone());
        }
        collect(&child, matches, out);
    }
}

fn collect_code_blocks<E: ElementHandle>(el: &E, out: &mut Vec<E>) {
    let is_pre = el.tag_name() == "pre";
    for child in el.children() {
        if is_pre && child.tag_name() == "code" {
            out.push(child.clone());
        }
        collect_code_blocks(&child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockElement;

    #[test]
    fn test_find_by_attribute_document_order() {
        let root = MockElement::new("body");
        let first = MockElement::new("div").with_attr("data-multilang", "");
        let nested = MockElement::new("section");
        let second = MockElement::new("div").with_attr("data-multilang", "B");
        nested.append_child(&second);
        root.append_child(&first);
        root.append_child(&MockElement::new("p"));
        root.append_child(&nested);

        let found = find_by_attribute(&root, "data-multilang");

        assert_eq!(found, vec![first, second]);
    }

    #[test]
    fn test_find_by_attribute_excludes_root() {
        let root = MockElement::new("div").with_attr("data-multilang", "");
        assert!(find_by_attribute(&root, "data-multilang").is_empty());
    }

    #[test]
    fn test_code_blocks_only_direct_children_of_pre() {
        let root = MockElement::new("div");
        let pre = MockElement::new("pre");
        let code = MockElement::new("code");
        pre.append_child(&code);
        let stray = MockElement::new("code");
        let p = MockElement::new("p");
        p.append_child(&stray);
        root.append_child(&pre);
        root.append_child(&p);

        assert_eq!(code_blocks(&root), vec![code]);
    }

    #[test]
    fn test_add_and_remove_class() {
        let el = MockElement::new("button").with_classes(&["btn"]);

        el.add_class("btn-info");
        el.add_class("btn-info");
        assert_eq!(el.class_list(), vec!["btn", "btn-info"]);

        el.remove_class("btn");
        assert_eq!(el.class_list(), vec!["btn-info"]);
        assert!(el.has_class("btn-info"));
        assert!(!el.has_class("btn"));
    }
}
