// file: src/models/document.rs
// description: loaded corpus document with content fingerprint
// reference: internal data structures

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A corpus document as read from disk for a single search request.
///
/// `content_hash` is taken over the exact bytes read, before any decoding or
/// highlighting, and is what the certificate records.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub relative_path: String,
    pub raw_content: String,
    pub content_hash: String,
    pub file_size: u64,
}

impl Document {
    /// Builds a document from raw file bytes. Fails when the bytes are not
    /// UTF-8, since match offsets are byte offsets into the decoded text.
    pub fn from_bytes(
        path: PathBuf,
        relative_path: String,
        bytes: Vec<u8>,
    ) -> std::result::Result<Self, String> {
        let content_hash = Self::compute_hash(&bytes);
        let file_size = bytes.len() as u64;
        let raw_content = String::from_utf8(bytes)
            .map_err(|e| format!("content is not valid UTF-8: {}", e.utf8_error()))?;

        Ok(Self {
            path,
            relative_path,
            raw_content,
            content_hash,
            file_size,
        })
    }

    pub fn compute_hash(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    pub fn filename(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.relative_path.clone())
    }
}
