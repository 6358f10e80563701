// file: src/corpus/scanner.rs
// description: Directory walking and file discovery with extension filtering
// reference: https://docs.rs/walkdir

use crate::config::CorpusConfig;
use crate::error::{Result, SearchError};
use crate::models::SkippedDocument;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FileScanner {
    config: CorpusConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
    pub modified: Option<String>,
}

/// Files found under a corpus root, plus entries the walk could not read.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScan {
    pub files: Vec<ScannedFile>,
    pub unreadable: Vec<SkippedDocument>,
}

impl FileScanner {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// Lists allow-listed files under `root`, sorted by relative path.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        self.scan(root).map(|scan| scan.files)
    }

    /// Like [`scan_directory`](Self::scan_directory), but also reports the
    /// directories and entries the walk failed to read.
    pub fn scan(&self, root: &Path) -> Result<DirectoryScan> {
        info!("Scanning corpus directory: {}", root.display());

        let metadata = std::fs::metadata(root).map_err(|e| SearchError::CorpusUnavailable {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(SearchError::CorpusUnavailable {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }
        std::fs::read_dir(root).map_err(|e| SearchError::CorpusUnavailable {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut scan = DirectoryScan::default();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let relative = e
                        .path()
                        .map(|path| relative_path(root, path))
                        .unwrap_or_default();
                    warn!("Cannot read corpus entry {}: {}", relative, e);
                    scan.unreadable.push(SkippedDocument {
                        relative_path: relative,
                        reason: format!("unreadable: {}", e),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if !self.config.allows(path) {
                debug!("Skipping non-document file: {}", path.display());
                continue;
            }

            let (size, modified) = match entry.metadata() {
                Ok(metadata) => (
                    metadata.len(),
                    metadata
                        .modified()
                        .ok()
                        .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339()),
                ),
                Err(_) => (0, None),
            };

            scan.files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path: relative_path(root, path),
                size,
                modified,
            });
        }

        scan.files
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!(
            "Found {} document files ({} unreadable entries)",
            scan.files.len(),
            scan.unreadable.len()
        );
        Ok(scan)
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        (self.config.max_file_size_mb as u64) * 1024 * 1024
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
