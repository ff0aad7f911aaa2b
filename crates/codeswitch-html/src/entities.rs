//! HTML entity to Unicode conversion.
//!
//! XHTML produced by documentation tools routinely contains named HTML
//! entities that an XML parser rejects. They are replaced by their characters
//! before parsing. The five XML entities are left for the parser.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex"));

/// Replace named HTML entities with Unicode characters.
///
/// Unknown entities and the XML entities (`amp`, `lt`, `gt`, `quot`, `apos`)
/// are left unchanged.
pub(crate) fn convert_html_entities(html: &str) -> String {
    if !html.contains('&') {
        return html.to_owned();
    }
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            entity_to_unicode(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
        .into_owned()
}

fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "hellip" => "\u{2026}",

        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "rArr" => "\u{21d2}",
        "lArr" => "\u{21d0}",

        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "minus" => "\u{2212}",

        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "sect" => "\u{00a7}",
        "para" => "\u{00b6}",
        "deg" => "\u{00b0}",

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_known_entities() {
        assert_eq!(
            convert_html_entities("a&nbsp;b&mdash;c"),
            "a\u{00a0}b\u{2014}c"
        );
    }

    #[test]
    fn test_xml_entities_untouched() {
        assert_eq!(
            convert_html_entities("&lt;T&gt; &amp;&amp; &quot;"),
            "&lt;T&gt; &amp;&amp; &quot;"
        );
    }

    #[test]
    fn test_unknown_entity_untouched() {
        assert_eq!(convert_html_entities("&bogus;"), "&bogus;");
    }
}
