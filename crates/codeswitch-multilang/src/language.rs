//! Language key derivation.

use crate::ElementHandle;

/// Derive the language key from a class list.
///
/// Returns the first token that is not the highlight `marker`. An empty list,
/// or a list holding only the marker, yields an empty key.
///
/// # Examples
///
/// ```
/// use codeswitch_multilang::derive_language_key;
///
/// let classes = ["hljs".to_owned(), "go".to_owned()];
/// assert_eq!(derive_language_key(&classes, "hljs"), "go");
/// assert_eq!(derive_language_key(&["hljs".to_owned()], "hljs"), "");
/// ```
pub fn derive_language_key(classes: &[String], marker: &str) -> String {
    classes
        .iter()
        .find(|class| class.as_str() != marker && !class.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Language key of a code block element.
///
/// A non-blank `language_attribute` wins over the class list, unless it
/// contains whitespace: keys double as class tokens, so such a tag is ignored
/// and the first non-marker class is used instead.
pub fn language_key<E: ElementHandle>(
    block: &E,
    language_attribute: Option<&str>,
    marker: &str,
) -> String {
    match language_tag(block, language_attribute) {
        Some(tag) if is_valid_key(&tag) => tag,
        _ => derive_language_key(&block.class_list(), marker),
    }
}

/// Trimmed value of the explicit language tag, if present and non-blank.
pub(crate) fn language_tag<E: ElementHandle>(
    block: &E,
    language_attribute: Option<&str>,
) -> Option<String> {
    let value = block.attribute(language_attribute?)?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// A key must be usable as a single class token.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.contains(char::is_whitespace)
}

/// Upper-case the first character, leaving the rest unchanged.
///
/// # Examples
///
/// ```
/// use codeswitch_multilang::capitalize;
///
/// assert_eq!(capitalize("rust"), "Rust");
/// assert_eq!(capitalize("cpp"), "Cpp");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockElement;

    fn classes(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn test_derive_marker_first() {
        assert_eq!(derive_language_key(&classes(&["hljs", "go"]), "hljs"), "go");
    }

    #[test]
    fn test_derive_marker_last() {
        assert_eq!(
            derive_language_key(&classes(&["rust", "hljs"]), "hljs"),
            "rust"
        );
    }

    #[test]
    fn test_derive_first_non_marker_wins() {
        assert_eq!(
            derive_language_key(&classes(&["hljs", "cpp", "wide"]), "hljs"),
            "cpp"
        );
    }

    #[test]
    fn test_derive_only_marker() {
        assert_eq!(derive_language_key(&classes(&["hljs"]), "hljs"), "");
        assert_eq!(derive_language_key(&classes(&["hljs", "hljs"]), "hljs"), "");
    }

    #[test]
    fn test_derive_no_classes() {
        assert_eq!(derive_language_key(&[], "hljs"), "");
    }

    #[test]
    fn test_language_attribute_wins() {
        let block = MockElement::new("code")
            .with_classes(&["hljs", "wide"])
            .with_attr("data-lang", "python");

        assert_eq!(language_key(&block, Some("data-lang"), "hljs"), "python");
    }

    #[test]
    fn test_blank_language_attribute_falls_back_to_classes() {
        let block = MockElement::new("code")
            .with_classes(&["hljs", "go"])
            .with_attr("data-lang", "  ");

        assert_eq!(language_key(&block, Some("data-lang"), "hljs"), "go");
    }

    #[test]
    fn test_language_attribute_with_whitespace_falls_back_to_classes() {
        let block = MockElement::new("code")
            .with_classes(&["hljs", "objectivec"])
            .with_attr("data-lang", "objective c");

        assert_eq!(language_key(&block, Some("data-lang"), "hljs"), "objectivec");
        assert_eq!(
            language_tag(&block, Some("data-lang")).as_deref(),
            Some("objective c")
        );
    }

    #[test]
    fn test_language_attribute_trimmed() {
        let block = MockElement::new("code").with_attr("data-lang", " rust\n");
        assert_eq!(language_key(&block, Some("data-lang"), "hljs"), "rust");
    }

    #[test]
    fn test_language_attribute_disabled() {
        let block = MockElement::new("code")
            .with_classes(&["hljs", "go"])
            .with_attr("data-lang", "python");

        assert_eq!(language_key(&block, None, "hljs"), "go");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("go"), "Go");
        assert_eq!(capitalize("Go"), "Go");
        assert_eq!(capitalize("objectiveC"), "ObjectiveC");
        assert_eq!(capitalize("é"), "É");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_multichar_uppercase() {
        // German sharp s upper-cases to two characters
        assert_eq!(capitalize("ßx"), "SSx");
    }
}
