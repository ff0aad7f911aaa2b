//! XHTML parser.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::convert_html_entities;
use crate::error::ParseError;
use crate::tree::{Document, NodeData, NodeId, ROOT_TAG};

/// HTML elements that never have content and may appear without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parse XHTML fragments or pages into a [`Document`].
///
/// The input is wrapped in a synthetic root element so that fragments with
/// several top-level nodes parse. Void elements are accepted with or without
/// the self-closing slash.
pub struct XhtmlParser;

impl XhtmlParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into a document tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup is not well-formed enough for the XML
    /// reader.
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        let html = convert_html_entities(html);
        let wrapped = format!("<{ROOT_TAG}>{html}</{ROOT_TAG}>");

        let mut reader = Reader::from_str(&wrapped);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = false;

        let mut document = Document::new();
        let mut buf = Vec::new();

        // Skip the synthetic root start tag
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(_) => break,
                Event::Eof => return Ok(document),
                _ => {}
            }
            buf.clear();
        }

        let root = document.root_id();
        self.parse_children(&mut reader, &mut document, root, ROOT_TAG)?;
        Ok(document)
    }

    fn parse_children<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        document: &mut Document,
        parent: NodeId,
        parent_tag: &str,
    ) -> Result<(), ParseError> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = self.decode_name(reader, e.name().as_ref());
                    let attrs = self.decode_attrs(reader, &e);
                    let child = document.append_element(parent, tag.clone(), attrs);
                    if !is_void(&tag) {
                        self.parse_children(reader, document, child, &tag)?;
                    }
                }
                Event::Empty(e) => {
                    let tag = self.decode_name(reader, e.name().as_ref());
                    let attrs = self.decode_attrs(reader, &e);
                    document.append_element(parent, tag, attrs);
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    document.append_text(parent, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    document.append_text(parent, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    document.append_node(parent, NodeData::CData(text));
                }
                Event::Comment(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    document.append_node(parent, NodeData::Comment(text));
                }
                Event::Decl(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    document.append_node(parent, NodeData::Instruction(text));
                }
                Event::PI(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    document.append_node(parent, NodeData::Instruction(text));
                }
                Event::DocType(e) => {
                    let doctype = reader.decoder().decode(&e)?.trim().to_owned();
                    document.set_doctype(parent, doctype);
                }
                Event::End(e) => {
                    let end_tag = self.decode_name(reader, e.name().as_ref());
                    if end_tag.eq_ignore_ascii_case(parent_tag) {
                        return Ok(());
                    }
                    // Stray end tag (closing a void element, or mismatched)
                }
                Event::Eof => return Ok(()),
            }
            buf.clear();
        }
    }

    fn decode_name<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader.decoder().decode(name).map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            Cow::into_owned,
        )
    }

    fn decode_attrs<R: BufRead>(
        &self,
        reader: &Reader<R>,
        e: &BytesStart,
    ) -> Vec<(String, String)> {
        // HTML mode: valueless attributes (`<details open>`) get an empty value
        e.html_attributes()
            .flatten()
            .map(|attr| {
                let key = self.decode_name(reader, attr.key.as_ref());
                let value = attr.unescape_value().map_or_else(
                    |_| String::from_utf8_lossy(&attr.value).into_owned(),
                    Cow::into_owned,
                );
                (key, value)
            })
            .collect()
    }
}

impl Default for XhtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Decode an XML entity reference to its character value.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use codeswitch_multilang::ElementHandle;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(html: &str) -> Document {
        XhtmlParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_parse_nested_elements() {
        let doc = parse(r#"<div class="a b"><p>Hello <strong>World</strong></p></div>"#);

        let div = &doc.root().children()[0];
        assert_eq!(div.tag_name(), "div");
        assert_eq!(div.class_list(), vec!["a", "b"]);
        assert_eq!(div.text_content(), "Hello World");
        assert_eq!(div.children()[0].children()[0].tag_name(), "strong");
    }

    #[test]
    fn test_parse_multiple_top_level_nodes() {
        let doc = parse("<p>One</p><p>Two</p>");
        assert_eq!(doc.root().children().len(), 2);
    }

    #[test]
    fn test_parse_entities() {
        let doc = parse("<code>a &lt; b &amp;&amp; c&nbsp;d &#65;</code>");
        assert_eq!(
            doc.root().children()[0].text_content(),
            "a < b && c\u{00a0}d A"
        );
    }

    #[test]
    fn test_parse_attribute_entities() {
        let doc = parse(r#"<div title="A &amp; B"></div>"#);
        assert_eq!(
            doc.root().children()[0].attribute("title").as_deref(),
            Some("A & B")
        );
    }

    #[test]
    fn test_parse_void_elements_without_slash() {
        let doc = parse("<p>Line<br>Next</p><p>After</p>");

        let top = doc.root().children();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].children()[0].tag_name(), "br");
        assert_eq!(top[0].text_content(), "LineNext");
    }

    #[test]
    fn test_parse_valueless_attributes() {
        let doc = parse(r#"<div data-multilang title="Example"><details open></details></div>"#);

        let div = &doc.root().children()[0];
        assert_eq!(div.attribute("data-multilang").as_deref(), Some(""));
        assert_eq!(div.attribute("title").as_deref(), Some("Example"));
        assert_eq!(div.children()[0].attribute("open").as_deref(), Some(""));
    }

    #[test]
    fn test_parse_hidden_without_value() {
        let doc = parse("<pre hidden><code>a</code></pre>");
        assert!(!doc.root().children()[0].is_visible());
    }

    #[test]
    fn test_parse_cdata_counts_as_text() {
        let doc = parse("<script>//<![CDATA[\nif (a < b) {}\n//]]></script>");
        assert_eq!(
            doc.root().children()[0].text_content(),
            "//\nif (a < b) {}\n//"
        );
    }

    #[test]
    fn test_parse_doctype() {
        let doc = parse("<!DOCTYPE html><html><body></body></html>");
        assert_eq!(doc.doctype(), Some("html"));
        assert_eq!(doc.root().children()[0].tag_name(), "html");
    }

    #[test]
    fn test_parse_preserves_code_whitespace() {
        let doc = parse("<pre><code>fn main() {\n    run();\n}\n</code></pre>");
        assert_eq!(
            doc.root().children()[0].children()[0].text_content(),
            "fn main() {\n    run();\n}\n"
        );
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("lt"), "<");
        assert_eq!(decode_entity("#x41"), "A");
        assert_eq!(decode_entity("#66"), "B");
        assert_eq!(decode_entity("unknown"), "&unknown;");
    }
}
