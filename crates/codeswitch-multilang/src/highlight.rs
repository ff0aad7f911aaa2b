//! Syntax highlighting collaborator.

use crate::ElementHandle;

/// Applies syntax highlighting to a code block.
///
/// Called at most once per block, and only for blocks that do not carry the
/// highlight marker class yet. Implementations are expected to add the marker
/// class themselves.
pub trait Highlighter<E: ElementHandle> {
    fn highlight(&self, block: &E);
}

/// Highlighter that only tags blocks with the marker class.
///
/// Coloring is left to the client-side highlighter of the rendered page.
#[derive(Debug, Clone)]
pub struct MarkerHighlighter {
    marker: String,
}

impl MarkerHighlighter {
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for MarkerHighlighter {
    fn default() -> Self {
        Self::new("hljs")
    }
}

impl<E: ElementHandle> Highlighter<E> for MarkerHighlighter {
    fn highlight(&self, block: &E) {
        let mut classes = block.class_list();
        if !classes.iter().any(|c| *c == self.marker) {
            classes.insert(0, self.marker.clone());
            block.set_class_list(&classes);
        }
    }
}
