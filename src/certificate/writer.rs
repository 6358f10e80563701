// file: src/certificate/writer.rs
// description: atomic persistence of certificates and highlighted documents
// reference: https://docs.rs/tempfile

use crate::error::{Result, SearchError};
use crate::models::Certificate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub const CERTIFICATE_FILENAME: &str = "certificate.json";

/// A highlighted document waiting to be written, addressed relative to the output root.
#[derive(Debug, Clone)]
pub struct PendingOutput {
    pub relative_path: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CertificateWriter {
    output_root: PathBuf,
}

impl CertificateWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Writes highlighted outputs, then the certificate. Run directories must
    /// not exist yet. The certificate is renamed into place as the last step,
    /// so a `certificate.json` only exists for a completely written run. On
    /// failure, directories created here are removed again.
    pub fn persist(
        &self,
        certificate: &Certificate,
        certificate_dir: &str,
        run_dirs: &[String],
        outputs: &[PendingOutput],
    ) -> Result<PathBuf> {
        let mut created = Vec::new();

        let result = self.persist_inner(certificate, certificate_dir, run_dirs, outputs, &mut created);

        if result.is_err() {
            for dir in created.iter().rev() {
                if let Err(e) = fs::remove_dir_all(dir) {
                    warn!("Failed to clean up {}: {}", dir.display(), e);
                }
            }
        }

        result
    }

    fn persist_inner(
        &self,
        certificate: &Certificate,
        certificate_dir: &str,
        run_dirs: &[String],
        outputs: &[PendingOutput],
        created: &mut Vec<PathBuf>,
    ) -> Result<PathBuf> {
        for run_dir in run_dirs {
            let path = self.output_root.join(run_dir);
            if let Some(parent) = path.parent() {
                let missing = outermost_missing(parent);
                fs::create_dir_all(parent).map_err(|e| SearchError::persistence(parent, e))?;
                created.extend(missing);
            }
            fs::create_dir(&path).map_err(|e| SearchError::persistence(&path, e))?;
            created.push(path);
        }

        for output in outputs {
            let path = self.output_root.join(&output.relative_path);
            write_atomically(&path, &output.content)?;
        }

        let json = serde_json::to_vec_pretty(certificate)?;
        let certificate_path = self
            .output_root
            .join(certificate_dir)
            .join(CERTIFICATE_FILENAME);
        write_atomically(&certificate_path, &json)?;

        info!(
            "Certificate {} written to {}",
            certificate.search_id,
            certificate_path.display()
        );
        Ok(certificate_path)
    }

    /// Reads a persisted certificate back, for verification by viewers.
    pub fn read(path: &Path) -> Result<Certificate> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// The highest ancestor of `dir` (or `dir` itself) that does not exist yet.
fn outermost_missing(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
        .last()
        .map(Path::to_path_buf)
}

fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| SearchError::persistence(path, std::io::Error::other("no parent directory")))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| SearchError::persistence(dir, e))?;
    temp.write_all(content)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| SearchError::persistence(path, e))?;
    temp.persist(path)
        .map_err(|e| SearchError::persistence(path, e.error))?;

    Ok(())
}
