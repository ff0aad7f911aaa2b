//! Switcher options.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::capitalize;

/// Which variant a group shows right after initialization.
///
/// Spelled `first-variant` / `first-key` in config files and on the command
/// line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DefaultActivation {
    /// Show the first variant in document order.
    ///
    /// If its language key is empty the variant is shown by position, so a
    /// group never starts with every block hidden.
    #[default]
    FirstVariant,
    /// Activate the key of the first variant, even when that key is empty.
    ///
    /// An empty key matches nothing: every block stays hidden and no button
    /// is active.
    FirstKey,
}

impl DefaultActivation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstVariant => "first-variant",
            Self::FirstKey => "first-key",
        }
    }
}

impl fmt::Display for DefaultActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultActivation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-variant" => Ok(Self::FirstVariant),
            "first-key" => Ok(Self::FirstKey),
            other => Err(format!(
                "unknown default activation '{other}', expected 'first-variant' or 'first-key'"
            )),
        }
    }
}

/// Options controlling group discovery and rendering.
#[derive(Debug, Clone)]
pub struct MultiLangOptions {
    /// Attribute marking a group element.
    pub marker_attribute: String,
    /// Attribute holding the group title. Removed once rendered.
    pub title_attribute: String,
    /// Attribute carrying an explicit language key on a code block.
    pub language_attribute: Option<String>,
    /// Class added by the highlighter to processed code blocks.
    pub highlight_marker: String,
    pub default_activation: DefaultActivation,
    /// Button labels by language key, replacing the capitalized key.
    pub labels: HashMap<String, String>,
}

impl Default for MultiLangOptions {
    fn default() -> Self {
        Self {
            marker_attribute: "data-multilang".to_owned(),
            title_attribute: "title".to_owned(),
            language_attribute: Some("data-lang".to_owned()),
            highlight_marker: "hljs".to_owned(),
            default_activation: DefaultActivation::default(),
            labels: HashMap::new(),
        }
    }
}

impl MultiLangOptions {
    /// Button label for a language key.
    #[must_use]
    pub fn label_for(&self, key: &str) -> String {
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| capitalize(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_activation_from_str() {
        assert_eq!(
            "first-variant".parse::<DefaultActivation>(),
            Ok(DefaultActivation::FirstVariant)
        );
        assert_eq!(
            "first-key".parse::<DefaultActivation>(),
            Ok(DefaultActivation::FirstKey)
        );
        assert!("first".parse::<DefaultActivation>().is_err());
        assert_eq!(DefaultActivation::FirstKey.to_string(), "first-key");
    }

    #[test]
    fn test_label_defaults_to_capitalized_key() {
        let options = MultiLangOptions::default();
        assert_eq!(options.label_for("cpp"), "Cpp");
    }

    #[test]
    fn test_label_override() {
        let mut options = MultiLangOptions::default();
        options.labels.insert("cpp".to_owned(), "C++".to_owned());

        assert_eq!(options.label_for("cpp"), "C++");
        assert_eq!(options.label_for("go"), "Go");
    }
}
