// file: src/models/search_result.rs
// description: per-word and per-document search results recorded in certificates
// reference: certificate data model

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start_offset, end_offset)` into a document's raw content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start_offset: usize,
    pub end_offset: usize,
}

impl MatchSpan {
    pub fn new(start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_offset,
            end_offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset >= self.end_offset
    }

    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        self.start_offset < other.end_offset && other.start_offset < self.end_offset
    }
}

/// Human-oriented location of a hit in the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPosition {
    /// 1-based line in the rendered text.
    pub line: usize,
    /// 1-based character column within that line.
    pub column: usize,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub filename: String,
    pub relative_path: String,
    pub content_hash: String,
    pub hit_count: usize,
    pub match_spans: Vec<MatchSpan>,
    pub hit_positions: Vec<HitPosition>,
    /// Path relative to the output root; present iff `hit_count > 0`.
    pub highlighted_output_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub word: String,
    pub per_document: Vec<DocumentResult>,
}

impl WordResult {
    pub fn total_hits(&self) -> usize {
        self.per_document.iter().map(|doc| doc.hit_count).sum()
    }

    pub fn documents_with_hits(&self) -> usize {
        self.per_document
            .iter()
            .filter(|doc| doc.hit_count > 0)
            .count()
    }
}

/// A corpus file that matched the allow-list but could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub relative_path: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlap() {
        let a = MatchSpan::new(0, 5);
        let b = MatchSpan::new(5, 8);
        let c = MatchSpan::new(4, 6);

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_word_result_totals() {
        let doc = |hits: usize| DocumentResult {
            filename: "a.html".to_string(),
            relative_path: "a.html".to_string(),
            content_hash: String::new(),
            hit_count: hits,
            match_spans: vec![MatchSpan::new(0, 1); hits],
            hit_positions: Vec::new(),
            highlighted_output_path: None,
        };

        let result = WordResult {
            word: "example".to_string(),
            per_document: vec![doc(1), doc(0), doc(2)],
        };

        assert_eq!(result.total_hits(), 3);
        assert_eq!(result.documents_with_hits(), 2);
    }

    #[test]
    fn test_absent_highlight_serializes_as_null() {
        let doc = DocumentResult {
            filename: "a.html".to_string(),
            relative_path: "a.html".to_string(),
            content_hash: "00".to_string(),
            hit_count: 0,
            match_spans: Vec::new(),
            hit_positions: Vec::new(),
            highlighted_output_path: None,
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["highlighted_output_path"].is_null());
    }
}
