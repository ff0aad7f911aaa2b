//! XHTML serializer.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::fmt::Write;

use crate::tree::{Arena, Document, NodeData, NodeId};

/// Elements written as `<tag />` when empty. Everything else gets an
/// explicit closing tag, which browsers require for `div`, `script`, etc.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize a [`Document`] back to markup.
pub struct XhtmlSerializer;

impl XhtmlSerializer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize the document. The synthetic root element is not written.
    pub fn serialize(&self, document: &Document) -> String {
        let mut out = String::with_capacity(4096);
        document.with_arena(|arena| {
            for &child in &arena.node(document.root_id()).children {
                serialize_node(arena, child, &mut out);
            }
        });
        out
    }
}

impl Default for XhtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_node(arena: &Arena, id: NodeId, out: &mut String) {
    let node = arena.node(id);
    match &node.data {
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::CData(text) => {
            let _ = write!(out, "<![CDATA[{text}]]>");
        }
        NodeData::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
        NodeData::Instruction(text) => {
            let _ = write!(out, "<?{text}?>");
        }
        NodeData::Doctype(text) => {
            let _ = write!(out, "<!DOCTYPE {text}>");
        }
        NodeData::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attrs {
                let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
            }

            if node.children.is_empty() && is_void(tag) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for &child in &node.children {
                serialize_node(arena, child, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
