// file: src/pipeline/processor.rs
// description: runs every requested word against one document and prepares highlighted output
// reference: parses markup once, matches each word, highlights documents with hits

use crate::error::Result;
use crate::models::{Document, HitPosition, MatchSpan};
use crate::parser::MarkupText;
use crate::search::{Highlighter, TextMatch, WordMatcher};
use std::sync::Arc;
use tracing::debug;

const CONTEXT_RADIUS: usize = 50;

/// Outcome of one word against one document.
#[derive(Debug, Clone)]
pub struct WordHits {
    pub match_spans: Vec<MatchSpan>,
    pub hit_positions: Vec<HitPosition>,
    /// Present iff there is at least one span.
    pub highlighted: Option<Vec<u8>>,
}

/// Per-word outcomes for one document, in request word order.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub document_index: usize,
    pub words: Vec<WordHits>,
}

pub struct DocumentProcessor {
    matcher: WordMatcher,
    highlighter: Highlighter,
    words: Arc<Vec<String>>,
}

impl DocumentProcessor {
    pub fn new(matcher: WordMatcher, highlighter: Highlighter, words: Vec<String>) -> Self {
        Self {
            matcher,
            highlighter,
            words: Arc::new(words),
        }
    }

    pub fn process(&self, document_index: usize, document: &Document) -> Result<ProcessingResult> {
        let text = MarkupText::extract(&document.raw_content);
        let mut words = Vec::with_capacity(self.words.len());

        for word in self.words.iter() {
            let matches = self.matcher.find_in_text(&text, word);
            let match_spans: Vec<MatchSpan> = matches.iter().map(|m| m.span).collect();

            let highlighted = if match_spans.is_empty() {
                None
            } else {
                Some(self.highlighter.apply_highlights(document, &match_spans)?)
            };

            debug!(
                "{}: {} hit(s) for '{}'",
                document.relative_path,
                match_spans.len(),
                word
            );

            words.push(WordHits {
                hit_positions: hit_positions(&text, &matches),
                match_spans,
                highlighted,
            });
        }

        Ok(ProcessingResult {
            document_index,
            words,
        })
    }
}

fn hit_positions(text: &MarkupText, matches: &[TextMatch]) -> Vec<HitPosition> {
    matches
        .iter()
        .map(|m| {
            let (line, column) = text.position(m.char_start);
            HitPosition {
                line,
                column,
                context: text.context(m.char_start, m.char_end, CONTEXT_RADIUS),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document(content: &str) -> Document {
        Document::from_bytes(
            PathBuf::from("doc.html"),
            "doc.html".to_string(),
            content.as_bytes().to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_process_multiple_words() {
        let processor = DocumentProcessor::new(
            WordMatcher::new(),
            Highlighter::new("x"),
            vec!["example".to_string(), "absent".to_string()],
        );
        let result = processor
            .process(7, &document("<p>Example and example</p>"))
            .unwrap();

        assert_eq!(result.document_index, 7);
        assert_eq!(result.words[0].match_spans.len(), 2);
        assert!(result.words[0].highlighted.is_some());
        assert!(result.words[1].match_spans.is_empty());
        assert!(result.words[1].highlighted.is_none());
        assert!(result.words[1].hit_positions.is_empty());
    }

    #[test]
    fn test_hit_positions_have_context() {
        let processor =
            DocumentProcessor::new(WordMatcher::new(), Highlighter::new("x"), vec!["word".to_string()]);
        let result = processor
            .process(0, &document("<p>first line</p>\n<p>the word is here</p>"))
            .unwrap();

        let hit = &result.words[0].hit_positions[0];
        assert!(hit.line > 1);
        assert_eq!(hit.context, "the word is here");
    }

    #[test]
    fn test_hit_positions_for_many_hits() {
        let content = format!("<p>{}</p>", "a ".repeat(40_000));
        let processor =
            DocumentProcessor::new(WordMatcher::new(), Highlighter::new("x"), vec!["a".to_string()]);
        let result = processor.process(0, &document(&content)).unwrap();

        let positions = &result.words[0].hit_positions;
        assert_eq!(positions.len(), 40_000);
        assert_eq!((positions[0].line, positions[0].column), (2, 1));
        // the opening <p> puts a separator line before the text
        let last = positions.last().unwrap();
        assert_eq!((last.line, last.column), (2, 79_999));
        assert!(last.context.chars().count() <= 101);
    }
}
