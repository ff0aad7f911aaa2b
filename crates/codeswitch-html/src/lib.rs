//! XHTML host for the multi-language code switcher.
//!
//! Parses rendered documentation pages into an arena tree whose elements
//! implement [`ElementHandle`](codeswitch_multilang::ElementHandle), runs the
//! switcher over them and serializes the result.
//!
//! # Example
//!
//! ```
//! use codeswitch_html::MultiLangProcessor;
//! use codeswitch_multilang::MultiLangOptions;
//!
//! let html = r#"<div data-multilang="" title="Hello"><pre><code class="hljs go">a</code></pre></div>"#;
//!
//! let mut processor = MultiLangProcessor::new(MultiLangOptions::default());
//! let outcome = processor.process(html).unwrap();
//!
//! assert!(outcome.html.contains(r#"<div class="multilang-title">Hello</div>"#));
//! ```

mod entities;
mod error;
mod parser;
mod processor;
mod serializer;
mod tree;

pub use error::ParseError;
pub use parser::XhtmlParser;
pub use processor::{MultiLangProcessor, ProcessOutcome};
pub use serializer::XhtmlSerializer;
pub use tree::{Document, DomElement};
