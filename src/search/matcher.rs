// file: src/search/matcher.rs
// description: case-folded exact word matching over rendered markup text
// reference: https://docs.rs/caseless

use crate::models::MatchSpan;
use crate::parser::{BoundaryRule, MarkupText, is_boundary_char};

/// One occurrence of a word: raw byte span plus its char range in the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    pub span: MatchSpan,
    pub char_start: usize,
    pub char_end: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WordMatcher;

/// A folded char and the index of the rendered char it came from.
#[derive(Debug, Clone, Copy)]
struct FoldedChar {
    ch: char,
    source: usize,
}

impl WordMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Raw-content spans of every occurrence of `word`, ascending and non-overlapping.
    pub fn find_matches(&self, content: &str, word: &str) -> Vec<MatchSpan> {
        let text = MarkupText::extract(content);
        self.find_in_text(&text, word)
            .into_iter()
            .map(|m| m.span)
            .collect()
    }

    pub fn find_in_text(&self, text: &MarkupText, word: &str) -> Vec<TextMatch> {
        let pattern: Vec<char> = fold(word.chars().enumerate())
            .into_iter()
            .map(|f| f.ch)
            .collect();
        if pattern.is_empty() {
            return Vec::new();
        }

        let chars = text.chars();
        let haystack = fold(chars.iter().map(|c| c.ch).enumerate());
        let rule = BoundaryRule::for_word(word);

        let mut matches = Vec::new();
        let mut pos = 0;

        while pos + pattern.len() <= haystack.len() {
            let end = pos + pattern.len();
            let candidate = &haystack[pos..end];

            let equal = candidate
                .iter()
                .zip(&pattern)
                .all(|(folded, expected)| folded.ch == *expected);

            // A match may not begin or end in the middle of one char's folding.
            let aligned = (pos == 0 || haystack[pos - 1].source != haystack[pos].source)
                && (end == haystack.len() || haystack[end].source != haystack[end - 1].source);

            if equal && aligned {
                let char_start = haystack[pos].source;
                let char_end = haystack[end - 1].source + 1;

                if rule == BoundaryRule::Substring || has_boundaries(text, char_start, char_end) {
                    matches.push(TextMatch {
                        span: MatchSpan::new(chars[char_start].start, chars[char_end - 1].end),
                        char_start,
                        char_end,
                    });
                    pos = end;
                    continue;
                }
            }

            pos += 1;
        }

        matches
    }
}

fn has_boundaries(text: &MarkupText, char_start: usize, char_end: usize) -> bool {
    let chars = text.chars();
    let before = char_start == 0 || is_boundary_char(chars[char_start - 1].ch);
    let after = char_end == chars.len() || is_boundary_char(chars[char_end].ch);
    before && after
}

/// Full Unicode case folding with whitespace runs collapsed to one space.
fn fold(source: impl Iterator<Item = (usize, char)>) -> Vec<FoldedChar> {
    let mut folded: Vec<FoldedChar> = Vec::new();
    let mut buf = [0u8; 4];
    let mut previous_space = false;

    for (index, ch) in source {
        if ch.is_whitespace() {
            if !previous_space {
                folded.push(FoldedChar {
                    ch: ' ',
                    source: index,
                });
            }
            previous_space = true;
            continue;
        }
        previous_space = false;

        for ch in caseless::default_case_fold_str(ch.encode_utf8(&mut buf)).chars() {
            folded.push(FoldedChar { ch, source: index });
        }
    }

    folded
}
