//! Language switcher for groups of code blocks.
//!
//! A documentation page may present the same snippet in several programming
//! languages. Such a group is marked with a `data-multilang` attribute:
//!
//! ```html
//! <div data-multilang="" title="Example">
//!   <pre><code class="hljs go">...</code></pre>
//!   <pre><code class="hljs rust">...</code></pre>
//! </div>
//! ```
//!
//! [`MultiLangPage::initialize`] turns every group into a switcher: it renders
//! a header with the title and one button per language, shows the default
//! variant and hides the rest. Afterwards [`MultiLangPage::click`] keeps the
//! buttons and the code blocks of a group in a consistent state, with exactly
//! one language visible at a time.
//!
//! # Architecture
//!
//! The crate never touches a concrete DOM. All element access goes through the
//! [`ElementHandle`] trait, so the same logic runs against a browser binding,
//! the XHTML tree in `codeswitch-html`, or [`MockElement`] in tests.
//!
//! Syntax highlighting is delegated to a [`Highlighter`]. It runs once per
//! code block that does not yet carry the highlight marker class.

mod element;
mod group;
mod highlight;
mod language;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod options;
mod page;
mod warning;

pub use element::{ElementHandle, code_blocks, find_by_attribute};
pub use group::{ClickBinding, Control, MultiLangGroup, Selection, Variant};
pub use highlight::{Highlighter, MarkerHighlighter};
pub use language::{capitalize, derive_language_key, language_key};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockElement;
pub use options::{DefaultActivation, MultiLangOptions};
pub use page::MultiLangPage;
pub use warning::Warning;

/// Class of the generated header element.
pub const HEADER_CLASS: &str = "multilang-header";

/// Class of the title element inside the header.
pub const TITLE_CLASS: &str = "multilang-title";

/// Class of the button container inside the header.
pub const BUTTON_GROUP_CLASS: &str = "multilang-btn-group";

/// Button class marking the active language.
pub const ACTIVE_BUTTON_CLASS: &str = "btn-info";

/// Button class marking an inactive language.
pub const NEUTRAL_BUTTON_CLASS: &str = "btn-neutral";

/// Prefix of the per-language button class (`lang-go`, `lang-rust`).
pub const LANGUAGE_CLASS_PREFIX: &str = "lang-";
