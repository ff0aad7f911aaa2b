//! Terminal reporting for processed pages.

use std::path::Path;

use console::{Style, Term};

/// Writes progress, page defects and summaries to stderr.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    err: Style,
    path: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            err: Style::new().red(),
            path: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.ok.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.warn.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.err.apply_to(msg).to_string());
    }

    /// Heading line naming a page, followed by its defects.
    pub(crate) fn page(&self, path: &Path, defects: &[String]) {
        let _ = self
            .term
            .write_line(&self.path.apply_to(path.display()).to_string());
        for defect in defects {
            self.warning(&format!("  {defect}"));
        }
    }

    /// One defect prefixed with the page it was found in.
    pub(crate) fn page_warning(&self, path: &Path, msg: &str) {
        self.warning(&format!("{}: {msg}", path.display()));
    }
}
