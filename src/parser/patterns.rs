// file: src/parser/patterns.rs
// description: compiled regex patterns for markup scanning
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use quick_xml::escape::{resolve_html5_entity, resolve_xml_entity};
use regex::Regex;

lazy_static! {
    // One alternative per markup construct; leftmost-first order matters.
    pub static ref MARKUP: Regex = Regex::new(concat!(
        r"(?is)",
        r"<!--.*?-->",
        r"|<!\[CDATA\[(?P<cdata>.*?)\]\]>",
        r"|<\?.*?\?>",
        r"|<![^>]*>",
        r"|<script\b[^>]*>.*?</script\s*>",
        r"|<style\b[^>]*>.*?</style\s*>",
        r"|<noscript\b[^>]*>.*?</noscript\s*>",
        r"|<template\b[^>]*>.*?</template\s*>",
        r"|<title\b[^>]*>(?P<title>.*?)</title\s*>",
        r"|<textarea\b[^>]*>(?P<textarea>.*?)</textarea\s*>",
        r#"|</?(?P<tag>[a-z][a-z0-9:_.-]*)[^>"']*(?:(?:"[^"]*"|'[^']*')[^>"']*)*>"#,
    ))
    .expect("MARKUP regex is valid");

    pub static ref WORD_CHAR: Regex = Regex::new(r"^\w$").expect("WORD_CHAR regex is valid");

    pub static ref UNSEGMENTED_CHAR: Regex = Regex::new(concat!(
        r"^[\p{Han}\p{Hiragana}\p{Katakana}\p{Bopomofo}",
        r"\p{Thai}\p{Lao}\p{Khmer}\p{Myanmar}",
        r"\x{3000}-\x{30FF}\x{FF66}-\x{FF9F}]$",
    ))
    .expect("UNSEGMENTED_CHAR regex is valid");

    pub static ref CHAR_REFERENCE: Regex = Regex::new(
        r"&(?:#(?P<dec>[0-9]{1,7})|#[xX](?P<hex>[0-9a-fA-F]{1,6})|(?P<name>[A-Za-z][A-Za-z0-9]{1,31}));"
    ).expect("CHAR_REFERENCE regex is valid");
}

/// Elements that do not interrupt the flow of rendered text.
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "font", "i",
    "ins", "kbd", "label", "mark", "q", "rb", "rp", "rt", "ruby", "s", "samp", "small", "span",
    "strike", "strong", "sub", "sup", "time", "tt", "u", "var", "wbr",
];

/// Expansion of a named character reference (`amp`, `eacute`, ...), from
/// the full HTML5 table. A few names expand to two chars.
pub fn named_entity(name: &str) -> Option<&'static str> {
    resolve_xml_entity(name).or_else(|| resolve_html5_entity(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_with_quoted_gt() {
        let html = r#"<a title="a>b" href='x'>link</a>"#;
        let first = MARKUP.find(html).unwrap();
        assert_eq!(first.as_str(), r#"<a title="a>b" href='x'>"#);
    }

    #[test]
    fn test_script_block_is_one_match() {
        let html = "<script>if (a < b) { x = '<p>'; }</script>after";
        let first = MARKUP.find(html).unwrap();
        assert_eq!(first.end(), html.len() - "after".len());
    }

    #[test]
    fn test_bare_less_than_is_not_markup() {
        assert!(MARKUP.find("1 < 2 and 3 > 2").is_none());
    }

    #[test]
    fn test_char_reference_forms() {
        let caps = CHAR_REFERENCE.captures("&#x41;").unwrap();
        assert_eq!(caps.name("hex").unwrap().as_str(), "41");
        let caps = CHAR_REFERENCE.captures("&amp;").unwrap();
        assert_eq!(caps.name("name").unwrap().as_str(), "amp");
        assert_eq!(named_entity("amp"), Some("&"));
        assert_eq!(named_entity("bogus"), None);
    }

    #[test]
    fn test_named_entities_cover_html5_table() {
        assert_eq!(named_entity("apos"), Some("'"));
        assert_eq!(named_entity("eacute"), Some("é"));
        assert_eq!(named_entity("uuml"), Some("ü"));
        assert_eq!(named_entity("Omega"), Some("Ω"));
        assert_eq!(named_entity("mdash"), Some("\u{2014}"));
    }
}
