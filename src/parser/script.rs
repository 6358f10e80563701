// file: src/parser/script.rs
// description: script classification for word boundary decisions
// reference: Unicode general categories and script properties via regex

use crate::parser::patterns::{UNSEGMENTED_CHAR, WORD_CHAR};

/// How a query word's occurrences are delimited in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryRule {
    /// Occurrence must be flanked by non-word characters or text edges.
    WordBoundary,
    /// Any contiguous occurrence counts.
    Substring,
}

impl BoundaryRule {
    /// Word boundaries apply only when no character of the word belongs to a
    /// script written without inter-word separators.
    pub fn for_word(word: &str) -> Self {
        if word.chars().any(is_unsegmented_script) {
            Self::Substring
        } else {
            Self::WordBoundary
        }
    }
}

/// Characters of scripts that do not separate words with spaces
/// (Han, kana, Bopomofo, Thai, Lao, Khmer, Myanmar, CJK symbols).
pub fn is_unsegmented_script(c: char) -> bool {
    !c.is_ascii() && UNSEGMENTED_CHAR.is_match(c.encode_utf8(&mut [0u8; 4]))
}

/// Word characters for boundary checks: Unicode `\w`, so letters, marks
/// (including Indic viramas and vowel signs), digits and connectors.
pub fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    WORD_CHAR.is_match(c.encode_utf8(&mut [0u8; 4]))
}

/// A neighbour that ends a boundary-sensitive word. Unsegmented-script
/// characters count as boundaries, so "ABC" is found in "ABC株式会社".
pub fn is_boundary_char(c: char) -> bool {
    !is_word_char(c) || is_unsegmented_script(c)
}
