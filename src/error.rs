// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corpus unavailable at {path}: {reason}")]
    CorpusUnavailable { path: PathBuf, reason: String },

    #[error("Document read failed for {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    #[error("Persistence failed for {path}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Stable category name, usable by transports to map errors to responses.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::CorpusUnavailable { .. } => "corpus_unavailable",
            Self::DocumentRead { .. } => "document_read",
            Self::Persistence { .. } => "persistence",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_distinct() {
        let validation = SearchError::Validation("too many words".to_string());
        let corpus = SearchError::CorpusUnavailable {
            path: PathBuf::from("/missing"),
            reason: "not found".to_string(),
        };
        let persistence = SearchError::persistence(
            "/out",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(validation.category(), "validation");
        assert_eq!(corpus.category(), "corpus_unavailable");
        assert_eq!(persistence.category(), "persistence");
        assert!(persistence.to_string().contains("/out"));
    }

    #[test]
    fn test_document_read_category() {
        let err = SearchError::DocumentRead {
            path: PathBuf::from("a.html"),
            reason: "invalid UTF-8".to_string(),
        };
        assert_eq!(err.category(), "document_read");
        assert!(err.to_string().contains("invalid UTF-8"));
    }
}
