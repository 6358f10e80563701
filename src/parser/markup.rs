// file: src/parser/markup.rs
// description: rendered-text extraction from HTML/XML with byte offsets into the raw markup
// reference: https://docs.rs/regex

use crate::parser::patterns::{CHAR_REFERENCE, INLINE_ELEMENTS, MARKUP, named_entity};
use std::borrow::Cow;
use std::ops::Range;

/// One character of rendered text and the raw bytes it came from.
///
/// Character references map their expansion onto the whole `&...;` range.
/// Separators inserted for block-level markup have an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChar {
    pub ch: char,
    pub start: usize,
    pub end: usize,
}

impl TextChar {
    pub fn is_separator(&self) -> bool {
        self.start == self.end
    }
}

/// A contiguous raw byte range holding visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub range: Range<usize>,
    /// False where inserted markup would not render as markup (title,
    /// textarea, CDATA sections).
    pub highlightable: bool,
}

/// Visible text of a markup document.
///
/// Extraction never fails: anything the scanner does not recognise as markup
/// (a stray `<`, an unterminated comment) is kept as text.
#[derive(Debug, Clone)]
pub struct MarkupText {
    chars: Vec<TextChar>,
    segments: Vec<TextSegment>,
    /// Char index at which each line starts; always begins with 0.
    line_starts: Vec<usize>,
}

impl MarkupText {
    pub fn extract(raw: &str) -> Self {
        let mut text = Self {
            chars: Vec::with_capacity(raw.len()),
            segments: Vec::new(),
            line_starts: Vec::new(),
        };
        let mut cursor = 0;

        for caps in MARKUP.captures_iter(raw) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            text.push_text(raw, cursor..whole.start(), true, true);

            if let Some(cdata) = caps.name("cdata") {
                text.push_text(raw, cdata.range(), false, false);
            } else if let Some(inner) = caps.name("title").or_else(|| caps.name("textarea")) {
                text.push_separator(whole.start());
                text.push_text(raw, inner.range(), true, false);
                text.push_separator(whole.end());
            } else if let Some(tag) = caps.name("tag") {
                let name = tag.as_str().to_ascii_lowercase();
                if !INLINE_ELEMENTS.contains(&name.as_str()) {
                    text.push_separator(whole.start());
                }
            } else if !whole.as_str().starts_with("<!--") {
                text.push_separator(whole.start());
            }

            cursor = whole.end();
        }
        text.push_text(raw, cursor..raw.len(), true, true);

        text.line_starts = std::iter::once(0)
            .chain(
                text.chars
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.ch == '\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        text
    }

    pub fn chars(&self) -> &[TextChar] {
        &self.chars
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    pub fn text(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 1-based line and column of the char at `index` in the rendered text.
    pub fn position(&self, index: usize) -> (usize, usize) {
        let line = self.line_of(index);
        (line + 1, index - self.line_starts[line] + 1)
    }

    /// Up to `radius` chars either side of `[start, end)`, clipped to the line.
    pub fn context(&self, start: usize, end: usize, radius: usize) -> String {
        let line_start = self.line_starts[self.line_of(start)];
        let line_end = self
            .line_starts
            .get(self.line_of(end.saturating_sub(1).max(start)) + 1)
            .map(|next| next - 1)
            .unwrap_or(self.chars.len());

        let from = start.saturating_sub(radius).max(line_start);
        let to = (end + radius).min(line_end).max(from);

        self.chars[from..to]
            .iter()
            .map(|c| c.ch)
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Zero-based index into `line_starts` of the line holding char `index`.
    fn line_of(&self, index: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= index) - 1
    }

    fn push_separator(&mut self, at: usize) {
        if self.chars.last().is_some_and(TextChar::is_separator) {
            return;
        }
        self.chars.push(TextChar {
            ch: '\n',
            start: at,
            end: at,
        });
    }

    fn push_text(&mut self, raw: &str, range: Range<usize>, decode: bool, highlightable: bool) {
        if range.is_empty() {
            return;
        }
        self.segments.push(TextSegment {
            range: range.clone(),
            highlightable,
        });

        let slice = &raw[range.clone()];
        let base = range.start;
        let mut cursor = 0;

        if decode {
            for caps in CHAR_REFERENCE.captures_iter(slice) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let Some(decoded) = decode_reference(&caps) else {
                    continue;
                };
                self.push_literal(&slice[cursor..whole.start()], base + cursor);
                for ch in decoded.chars() {
                    self.chars.push(TextChar {
                        ch,
                        start: base + whole.start(),
                        end: base + whole.end(),
                    });
                }
                cursor = whole.end();
            }
        }

        self.push_literal(&slice[cursor..], base + cursor);
    }

    fn push_literal(&mut self, slice: &str, base: usize) {
        for (offset, ch) in slice.char_indices() {
            self.chars.push(TextChar {
                ch,
                start: base + offset,
                end: base + offset + ch.len_utf8(),
            });
        }
    }
}

fn decode_reference(caps: &regex::Captures<'_>) -> Option<Cow<'static, str>> {
    let numeric = if let Some(dec) = caps.name("dec") {
        dec.as_str().parse::<u32>().ok()
    } else if let Some(hex) = caps.name("hex") {
        u32::from_str_radix(hex.as_str(), 16).ok()
    } else {
        return caps
            .name("name")
            .and_then(|name| named_entity(name.as_str()))
            .map(Cow::Borrowed);
    };

    numeric
        .and_then(char::from_u32)
        .map(|ch| Cow::Owned(ch.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tags_comments_and_scripts_are_not_text() {
        let html = "<html><head><script>var cat = 1;</script><style>p{}</style></head>\
                    <body><!-- secret --><p class=\"hidden\">Visible</p></body></html>";
        let text = MarkupText::extract(html);
        assert_eq!(text.text().trim(), "Visible");
    }

    #[test]
    fn test_inline_markup_keeps_text_contiguous() {
        let text = MarkupText::extract("<p>ex<b>am</b>ple</p>");
        assert!(text.text().contains("example"));
    }

    #[test]
    fn test_block_markup_separates_text() {
        let text = MarkupText::extract("<div>foo</div><div>bar</div>");
        assert!(!text.text().contains("foobar"));
        assert!(text.text().contains("foo\nbar"));
    }

    #[test]
    fn test_comment_does_not_separate() {
        let text = MarkupText::extract("<p>ex<!-- x -->ample</p>");
        assert!(text.text().contains("example"));
    }

    #[test]
    fn test_offsets_point_at_raw_bytes() {
        let html = "<p>a&amp;b 毒</p>";
        let text = MarkupText::extract(html);
        let chars: Vec<&TextChar> = text.chars().iter().filter(|c| !c.is_separator()).collect();

        assert_eq!(chars[0].ch, 'a');
        assert_eq!(&html[chars[0].start..chars[0].end], "a");
        assert_eq!(chars[1].ch, '&');
        assert_eq!(&html[chars[1].start..chars[1].end], "&amp;");
        assert_eq!(chars[4].ch, '毒');
        assert_eq!(&html[chars[4].start..chars[4].end], "毒");
    }

    #[test]
    fn test_numeric_references_decode() {
        let text = MarkupText::extract("<p>&#65;&#x42;C</p>");
        assert!(text.text().contains("ABC"));
    }

    #[test]
    fn test_cdata_is_text_without_decoding() {
        let text = MarkupText::extract("<r><![CDATA[x &amp; y]]></r>");
        assert!(text.text().contains("x &amp; y"));
    }

    #[test]
    fn test_cdata_text_is_not_highlightable() {
        let html = "<r><![CDATA[example]]></r>";
        let text = MarkupText::extract(html);
        let segments: Vec<(&str, bool)> = text
            .segments()
            .iter()
            .map(|s| (&html[s.range.clone()], s.highlightable))
            .collect();
        assert_eq!(segments, vec![("example", false)]);
    }

    #[test]
    fn test_html5_named_references_decode() {
        let html = "<p>caf&eacute; M&uuml;ller</p>";
        let text = MarkupText::extract(html);
        assert!(text.text().contains("café Müller"));

        let e_acute = text.chars().iter().find(|c| c.ch == 'é').unwrap();
        assert_eq!(&html[e_acute.start..e_acute.end], "&eacute;");
    }

    #[test]
    fn test_unknown_named_reference_stays_literal() {
        let text = MarkupText::extract("<p>&notanentity; ok</p>");
        assert!(text.text().contains("&notanentity; ok"));
    }

    #[test]
    fn test_title_text_is_not_highlightable() {
        let html = "<title>Report</title><p>Body</p>";
        let text = MarkupText::extract(html);
        let segments: Vec<(&str, bool)> = text
            .segments()
            .iter()
            .map(|s| (&html[s.range.clone()], s.highlightable))
            .collect();
        assert_eq!(segments, vec![("Report", false), ("Body", true)]);
    }

    #[test]
    fn test_malformed_markup_degrades_to_text() {
        let text = MarkupText::extract("<p>a < b and <!-- unterminated");
        assert!(text.text().contains("a < b"));
    }

    #[test]
    fn test_position_and_context() {
        let text = MarkupText::extract("line one\nthe word here");
        let rendered: Vec<char> = text.text().chars().collect();
        let start = rendered
            .windows(4)
            .position(|w| w.iter().collect::<String>() == "word")
            .unwrap();

        assert_eq!(text.position(start), (2, 5));
        assert_eq!(text.position(0), (1, 1));
        assert_eq!(text.context(start, start + 4, 3), "he word he");
        assert_eq!(text.context(0, 4, 50), "line one");
    }

    #[test]
    fn test_positions_on_many_lines() {
        let raw: String = (0..20_000).map(|i| format!("row {}\n", i)).collect();
        let text = MarkupText::extract(&raw);

        let last_line_start = text.text().rfind("row 19999").unwrap();
        let index = text.text()[..last_line_start].chars().count();
        assert_eq!(text.position(index), (20_000, 1));
        assert_eq!(text.position(index + 4), (20_000, 5));
        assert_eq!(text.context(index, index + 3, 50), "row 19999");
    }
}
