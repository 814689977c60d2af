use std::borrow::Cow;

/// Decodes HTML character references in keycap label text.
///
/// Follows the HTML5 rules: every named entity, decimal and hex references,
/// and the legacy names that may omit the trailing semicolon (`&amp`,
/// `&copy 2024`). Anything unrecognized is kept verbatim.
pub fn unescape_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    htmlize::unescape(input)
}

/// Escapes text for use in XML content or attribute values.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(unescape_entities("Shift"), Cow::Borrowed("Shift")));
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(unescape_entities("&uarr;"), "↑");
        assert_eq!(unescape_entities("&lt;&gt;"), "<>");
        assert_eq!(unescape_entities("Fn &amp; Ctrl"), "Fn & Ctrl");
        assert_eq!(unescape_entities("&euro;"), "€");
    }

    #[test]
    fn decodes_greek_and_punctuation_entities() {
        assert_eq!(unescape_entities("&Omega;"), "Ω");
        assert_eq!(unescape_entities("&alpha;&pi;&Delta;"), "απΔ");
        assert_eq!(unescape_entities("&lsaquo;"), "‹");
        assert_eq!(unescape_entities("&shy;"), "\u{ad}");
    }

    #[test]
    fn decodes_legacy_entities_without_semicolon() {
        assert_eq!(unescape_entities("&amp"), "&");
        assert_eq!(unescape_entities("&copy 2024"), "© 2024");
        assert_eq!(unescape_entities("&lt;Alt&gt"), "<Alt>");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(unescape_entities("&#65;"), "A");
        assert_eq!(unescape_entities("&#x2191;"), "↑");
        assert_eq!(unescape_entities("&#X41;&#66;"), "AB");
    }

    #[test]
    fn leaves_unknown_entities_alone() {
        assert_eq!(unescape_entities("&bogus;"), "&bogus;");
        assert_eq!(unescape_entities("a & b"), "a & b");
    }

    #[test]
    fn escape_round_trips_through_unescape() {
        let raw = "<Alt> & \"Gr\"";
        assert_eq!(unescape_entities(&escape_xml(raw)), raw);
    }
}
