// file: src/corpus/store.rs
// description: loads and fingerprints corpus documents for one search request
// reference: https://docs.rs/sha2

use crate::config::CorpusConfig;
use crate::corpus::scanner::{FileScanner, ScannedFile};
use crate::error::{Result, SearchError};
use crate::models::{Document, SkippedDocument};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Documents loaded for a request plus the files that could not be loaded.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedDocument>,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    scanner: FileScanner,
}

impl DocumentStore {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            scanner: FileScanner::new(config),
        }
    }

    /// Reads every allow-listed file fresh from disk. Unreadable files are
    /// recorded as skipped; only an unavailable directory is an error.
    pub fn load_corpus(&self, directory: &Path) -> Result<LoadedCorpus> {
        let scan = self.scanner.scan(directory)?;
        let mut corpus = LoadedCorpus {
            documents: Vec::with_capacity(scan.files.len()),
            skipped: scan.unreadable,
        };

        for file in scan.files {
            match self.load_document(&file) {
                Ok(document) => {
                    debug!(
                        "Loaded {} ({} bytes, sha256 {})",
                        document.relative_path, document.file_size, document.content_hash
                    );
                    corpus.documents.push(document);
                }
                Err(SearchError::DocumentRead { reason, .. }) => {
                    warn!("Skipping {}: {}", file.relative_path, reason);
                    corpus.skipped.push(SkippedDocument {
                        relative_path: file.relative_path.clone(),
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        corpus
            .skipped
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!(
            "Loaded {} documents ({} skipped)",
            corpus.documents.len(),
            corpus.skipped.len()
        );
        Ok(corpus)
    }

    pub fn list_files(&self, directory: &Path) -> Result<Vec<ScannedFile>> {
        self.scanner.scan_directory(directory)
    }

    fn load_document(&self, file: &ScannedFile) -> Result<Document> {
        let read_error = |reason: String| SearchError::DocumentRead {
            path: file.path.clone(),
            reason,
        };

        let max_bytes = self.scanner.max_file_size_bytes();
        if max_bytes > 0 && file.size > max_bytes {
            return Err(read_error(format!(
                "file too large ({} bytes, limit {})",
                file.size, max_bytes
            )));
        }

        let bytes = fs::read(&file.path).map_err(|e| read_error(e.to_string()))?;

        Document::from_bytes(file.path.clone(), file.relative_path.clone(), bytes)
            .map_err(read_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn store() -> DocumentStore {
        DocumentStore::new(CorpusConfig {
            directory: PathBuf::from("."),
            allowed_extensions: vec!["html".to_string()],
            max_file_size_mb: 1,
        })
    }

    #[test]
    fn test_hash_matches_bytes_on_disk() {
        let temp = TempDir::new().unwrap();
        let content = b"<html><body>Example</body></html>";
        fs::write(temp.path().join("doc.html"), content).unwrap();

        let corpus = store().load_corpus(temp.path()).unwrap();
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(
            corpus.documents[0].content_hash,
            Document::compute_hash(content)
        );
    }

    #[test]
    fn test_reload_is_fresh() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.html");
        fs::write(&path, "<p>one</p>").unwrap();
        let first = store().load_corpus(temp.path()).unwrap();

        fs::write(&path, "<p>One</p>").unwrap();
        let second = store().load_corpus(temp.path()).unwrap();

        assert_ne!(
            first.documents[0].content_hash,
            second.documents[0].content_hash
        );
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.html"), "<p>fine</p>").unwrap();
        fs::write(temp.path().join("bad.html"), [0xffu8, 0xfe, 0x00]).unwrap();

        let corpus = store().load_corpus(temp.path()).unwrap();
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.skipped.len(), 1);
        assert_eq!(corpus.skipped[0].relative_path, "bad.html");
    }

    #[test]
    fn test_oversized_document_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.html"), vec![b'a'; 1024 * 1024 + 1]).unwrap();

        let corpus = store().load_corpus(temp.path()).unwrap();
        assert!(corpus.documents.is_empty());
        assert!(corpus.skipped[0].reason.contains("too large"));
    }
}
