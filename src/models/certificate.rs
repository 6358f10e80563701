// file: src/models/certificate.rs
// description: hash-sealed search certificate and its canonical serialization
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::models::search_result::{SkippedDocument, WordResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCase {
    pub name: String,
    pub expected_hit: bool,
    pub actual_hit: bool,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositiveControlResult {
    pub executed: bool,
    pub test_cases: Vec<ControlCase>,
    pub all_passed: bool,
    /// Set when any case failed; the certificate still carries real results.
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub runtime_version: String,
    pub app_version: String,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            runtime_version: format!(
                "rust ({} {})",
                std::env::consts::OS,
                std::env::consts::ARCH
            ),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Persisted search evidence. Field order here is the canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub search_id: String,
    pub timestamp: String,
    pub requested_words: Vec<String>,
    pub total_documents_scanned: usize,
    pub skipped_documents: Vec<SkippedDocument>,
    pub results: BTreeMap<String, WordResult>,
    pub positive_control: PositiveControlResult,
    pub system_info: SystemInfo,
    pub certificate_hash: String,
}

/// Every certificate field except the hash, borrowed, in canonical order.
#[derive(Serialize)]
struct CanonicalCertificate<'a> {
    search_id: &'a str,
    timestamp: &'a str,
    requested_words: &'a [String],
    total_documents_scanned: usize,
    skipped_documents: &'a [SkippedDocument],
    results: &'a BTreeMap<String, WordResult>,
    positive_control: &'a PositiveControlResult,
    system_info: &'a SystemInfo,
}

impl Certificate {
    /// Compact JSON of every field but `certificate_hash`.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        let canonical = CanonicalCertificate {
            search_id: &self.search_id,
            timestamp: &self.timestamp,
            requested_words: &self.requested_words,
            total_documents_scanned: self.total_documents_scanned,
            skipped_documents: &self.skipped_documents,
            results: &self.results,
            positive_control: &self.positive_control,
            system_info: &self.system_info,
        };
        Ok(serde_json::to_vec(&canonical)?)
    }

    pub fn compute_hash(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_bytes()?);
        Ok(format!("{:x}", hasher.finalize()))
    }

    pub fn seal(&mut self) -> Result<()> {
        self.certificate_hash = self.compute_hash()?;
        Ok(())
    }

    pub fn verify(&self) -> Result<bool> {
        Ok(self.compute_hash()? == self.certificate_hash)
    }

    pub fn total_hits(&self) -> usize {
        self.results.values().map(WordResult::total_hits).sum()
    }
}
