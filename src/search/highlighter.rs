// file: src/search/highlighter.rs
// description: inserts highlight markers around matched spans without touching other bytes
// reference: single-pass rewrite against original offsets

use crate::error::{Result, SearchError};
use crate::models::{Document, MatchSpan};
use crate::parser::{MarkupText, TextSegment};
use std::ops::Range;

const CLOSE_MARKER: &str = "</mark>";

#[derive(Debug, Clone)]
pub struct Highlighter {
    open_marker: String,
}

impl Highlighter {
    pub fn new(style: &str) -> Self {
        Self {
            open_marker: format!("<mark style=\"{}\">", style),
        }
    }

    pub fn open_marker(&self) -> &str {
        &self.open_marker
    }

    pub fn close_marker(&self) -> &str {
        CLOSE_MARKER
    }

    pub fn apply_highlights(&self, document: &Document, spans: &[MatchSpan]) -> Result<Vec<u8>> {
        self.highlight_content(&document.raw_content, spans)
            .map(String::into_bytes)
    }

    /// Wraps the visible-text parts of each span in a `<mark>` element.
    ///
    /// A span crossing inline markup becomes several marks, one per text
    /// piece, so the element structure stays well nested. Output is built in
    /// one forward pass over the original buffer.
    pub fn highlight_content(&self, raw: &str, spans: &[MatchSpan]) -> Result<String> {
        validate_spans(raw, spans)?;

        let text = MarkupText::extract(raw);
        let pieces = text_pieces(text.segments(), spans);

        let mut output = String::with_capacity(
            raw.len() + pieces.len() * (self.open_marker.len() + CLOSE_MARKER.len()),
        );
        let mut cursor = 0;

        for piece in pieces {
            output.push_str(&raw[cursor..piece.start]);
            output.push_str(&self.open_marker);
            output.push_str(&raw[piece.clone()]);
            output.push_str(CLOSE_MARKER);
            cursor = piece.end;
        }
        output.push_str(&raw[cursor..]);

        Ok(output)
    }

    /// Removes every marker this highlighter inserts.
    pub fn strip_markers(&self, highlighted: &str) -> String {
        highlighted
            .replace(&self.open_marker, "")
            .replace(CLOSE_MARKER, "")
    }
}

fn validate_spans(raw: &str, spans: &[MatchSpan]) -> Result<()> {
    let mut previous_end = 0;

    for span in spans {
        if span.is_empty()
            || span.end_offset > raw.len()
            || !raw.is_char_boundary(span.start_offset)
            || !raw.is_char_boundary(span.end_offset)
        {
            return Err(SearchError::Validation(format!(
                "invalid match span {}..{} for content of {} bytes",
                span.start_offset,
                span.end_offset,
                raw.len()
            )));
        }

        if span.start_offset < previous_end {
            return Err(SearchError::Validation(format!(
                "match spans overlap or are unordered at offset {}",
                span.start_offset
            )));
        }
        previous_end = span.end_offset;
    }

    Ok(())
}

/// Intersections of spans with highlightable text segments, in ascending
/// order. Both inputs are ascending, so one merge sweep suffices.
fn text_pieces(segments: &[TextSegment], spans: &[MatchSpan]) -> Vec<Range<usize>> {
    let segments: Vec<&TextSegment> = segments.iter().filter(|s| s.highlightable).collect();
    let mut pieces = Vec::new();
    let mut first = 0;

    for span in spans {
        while first < segments.len() && segments[first].range.end <= span.start_offset {
            first += 1;
        }

        for segment in &segments[first..] {
            if segment.range.start >= span.end_offset {
                break;
            }
            let start = span.start_offset.max(segment.range.start);
            let end = span.end_offset.min(segment.range.end);
            if start < end {
                pieces.push(start..end);
            }
        }
    }

    pieces
}
