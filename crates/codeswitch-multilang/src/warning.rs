//! Defects found while initializing groups.

use std::fmt;

/// A markup defect. Defects never stop initialization; they only leave a
/// group in a visually inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Neither the title attribute nor the marker attribute held a title.
    MissingTitle { group: usize },
    /// The group holds no `pre > code` blocks.
    NoVariants { group: usize },
    /// A code block has no language key.
    EmptyLanguageKey { group: usize, variant: usize },
    /// An explicit language tag contains whitespace and was ignored.
    InvalidLanguageTag {
        group: usize,
        variant: usize,
        tag: String,
    },
    /// Several code blocks in one group share a language key.
    DuplicateLanguageKey { group: usize, key: String },
    /// An activation matched no code block.
    UnmatchedKey { group: usize, key: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle { group } => write!(f, "multilang group {group} has no title"),
            Self::NoVariants { group } => {
                write!(f, "multilang group {group} contains no code blocks")
            }
            Self::EmptyLanguageKey { group, variant } => write!(
                f,
                "code block {variant} in multilang group {group} has no language class"
            ),
            Self::InvalidLanguageTag {
                group,
                variant,
                tag,
            } => write!(
                f,
                "code block {variant} in multilang group {group} has language tag '{tag}' \
                 containing whitespace, using its class instead"
            ),
            Self::DuplicateLanguageKey { group, key } => write!(
                f,
                "language '{key}' appears more than once in multilang group {group}"
            ),
            Self::UnmatchedKey { group, key } => write!(
                f,
                "language '{key}' matches no code block in multilang group {group}"
            ),
        }
    }
}
