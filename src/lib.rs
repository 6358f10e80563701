// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

//! Exact-word search over a corpus of HTML/XML documents.
//!
//! A search validates the requested words, loads every allow-listed document
//! under the corpus directory, runs a fixed self-test of the matcher, then
//! counts whole-word hits per word and document. Documents with hits are
//! written out with `<mark>` highlighting, and every run ends with a
//! SHA-256 sealed [`Certificate`] that lists every document, hits or not.

pub mod certificate;
pub mod config;
pub mod corpus;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod search;
pub mod utils;

pub use certificate::{CertificateBuilder, CertificateWriter, PendingOutput, RunMetadata};
pub use config::{Config, CorpusConfig, OutputConfig, PipelineConfig, SearchLimits};
pub use corpus::{DocumentStore, FileScanner, LoadedCorpus, ScannedFile};
pub use error::{Result, SearchError};
pub use models::{
    Certificate, ControlCase, Document, DocumentResult, HitPosition, MatchSpan,
    PositiveControlResult, SearchRequest, SkippedDocument, SystemInfo, WordResult,
};
pub use parser::{BoundaryRule, MarkupText};
pub use pipeline::{ProgressTracker, SearchOrchestrator, SearchOutcome, SearchStats};
pub use search::{Highlighter, PositiveControl, WordMatcher};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        let _highlighter = Highlighter::new(&config.output.highlight_style);
        let _matcher = WordMatcher::new();
    }
}
