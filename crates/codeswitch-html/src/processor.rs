//! Multi-language post-processor for rendered HTML.
//!
//! Runs the switcher over a rendered page at build time, so the page ships
//! with the header, buttons and default visibility already in place.

use codeswitch_multilang::{Highlighter, MarkerHighlighter, MultiLangOptions, MultiLangPage};

use crate::error::ParseError;
use crate::{Document, DomElement, XhtmlParser, XhtmlSerializer};

/// Result of processing one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Output markup. Identical to the input when nothing changed.
    pub html: String,
    /// Groups initialized.
    pub groups: usize,
    /// Groups skipped because they already had a switcher header.
    pub skipped: usize,
}

impl ProcessOutcome {
    fn unchanged(html: &str, skipped: usize) -> Self {
        Self {
            html: html.to_owned(),
            groups: 0,
            skipped,
        }
    }

    /// Whether the output differs from the input.
    pub fn changed(&self) -> bool {
        self.groups > 0
    }
}

/// Post-processor that turns `data-multilang` groups into switchers.
///
/// # Output HTML Structure
///
/// ```html
/// <div data-multilang="">
///   <div class="multilang-header">
///     <div class="multilang-title">Example</div>
///     <div class="multilang-btn-group">
///       <button class="btn btn-small lang-go btn-info">Go</button>
///       <button class="btn btn-small lang-rust btn-neutral">Rust</button>
///     </div>
///   </div>
///   <pre><code class="hljs go" style="display: block">...</code></pre>
///   <pre><code class="hljs rust" style="display: none">...</code></pre>
/// </div>
/// ```
pub struct MultiLangProcessor {
    options: MultiLangOptions,
    highlighter: Box<dyn Highlighter<DomElement>>,
    warnings: Vec<String>,
}

impl MultiLangProcessor {
    /// Create a processor that tags unhighlighted blocks with the marker class.
    #[must_use]
    pub fn new(options: MultiLangOptions) -> Self {
        let highlighter = MarkerHighlighter::new(options.highlight_marker.clone());
        Self {
            options,
            highlighter: Box::new(highlighter),
            warnings: Vec::new(),
        }
    }

    /// Replace the highlighter.
    #[must_use]
    pub fn with_highlighter(
        mut self,
        highlighter: impl Highlighter<DomElement> + 'static,
    ) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn options(&self) -> &MultiLangOptions {
        &self.options
    }

    /// Initialize every group in an already parsed document.
    pub fn initialize(&self, document: &Document) -> MultiLangPage<DomElement> {
        MultiLangPage::initialize(&document.root(), &self.options, self.highlighter.as_ref())
    }

    /// Process one page of markup.
    ///
    /// Markup without any group marker is returned untouched without being
    /// parsed. Defects are collected in [`warnings`](Self::warnings).
    ///
    /// # Errors
    ///
    /// Returns an error if the markup contains a group but cannot be parsed.
    pub fn process(&mut self, html: &str) -> Result<ProcessOutcome, ParseError> {
        if !html.contains(self.options.marker_attribute.as_str()) {
            return Ok(ProcessOutcome::unchanged(html, 0));
        }

        let document = XhtmlParser::new().parse(html)?;
        let page = self.initialize(&document);
        self.warnings.extend(page.warnings().map(ToString::to_string));

        let groups = page.groups().len();
        if groups == 0 {
            return Ok(ProcessOutcome::unchanged(html, page.skipped()));
        }

        Ok(ProcessOutcome {
            html: XhtmlSerializer::new().serialize(&document),
            groups,
            skipped: page.skipped(),
        })
    }

    /// Process `html` in place.
    ///
    /// On a parse error the markup is left unchanged and a warning recorded.
    pub fn post_process(&mut self, html: &mut String) {
        match self.process(html) {
            Ok(outcome) => {
                if outcome.changed() {
                    *html = outcome.html;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse HTML, leaving it unchanged");
                self.warnings
                    .push(format!("multilang groups not processed: {e}"));
            }
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Return and clear the collected warnings.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
