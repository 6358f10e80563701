// file: src/certificate/builder.rs
// description: assembles and seals search certificates
// reference: https://docs.rs/uuid

use crate::error::Result;
use crate::models::{
    Certificate, PositiveControlResult, SearchRequest, SkippedDocument, SystemInfo, WordResult,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

/// Facts about the run that are not per-word results.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    /// Instant the request was accepted.
    pub accepted_at: DateTime<Utc>,
    pub total_documents_scanned: usize,
    pub skipped_documents: Vec<SkippedDocument>,
    pub system_info: SystemInfo,
}

impl RunMetadata {
    pub fn new(accepted_at: DateTime<Utc>) -> Self {
        Self {
            accepted_at,
            total_documents_scanned: 0,
            skipped_documents: Vec::new(),
            system_info: SystemInfo::current(),
        }
    }
}

pub struct CertificateBuilder;

impl CertificateBuilder {
    /// Builds a sealed certificate with a fresh random `search_id`.
    pub fn build(
        request: &SearchRequest,
        per_word_results: Vec<WordResult>,
        positive_control: PositiveControlResult,
        metadata: RunMetadata,
    ) -> Result<Certificate> {
        let results: BTreeMap<String, WordResult> = per_word_results
            .into_iter()
            .map(|result| (result.word.clone(), result))
            .collect();

        let mut certificate = Certificate {
            search_id: Uuid::new_v4().to_string(),
            timestamp: format_timestamp(&metadata.accepted_at),
            requested_words: request.words().to_vec(),
            total_documents_scanned: metadata.total_documents_scanned,
            skipped_documents: metadata.skipped_documents,
            results,
            positive_control,
            system_info: metadata.system_info,
            certificate_hash: String::new(),
        };
        certificate.seal()?;

        debug!(
            "Sealed certificate {} with hash {}",
            certificate.search_id, certificate.certificate_hash
        );
        Ok(certificate)
    }
}

/// ISO-8601 UTC with microseconds, e.g. `2026-10-19T08:15:30.123456Z`.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Directory-safe form of the acceptance instant, e.g. `20261019_081530_123456`.
pub fn directory_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%d_%H%M%S_%6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchLimits;
    use chrono::TimeZone;

    fn control() -> PositiveControlResult {
        PositiveControlResult {
            executed: true,
            test_cases: Vec::new(),
            all_passed: true,
            warning: None,
        }
    }

    fn accepted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap()
            + chrono::Duration::microseconds(123_456)
    }

    #[test]
    fn test_build_seals_and_orders_results() {
        let request = SearchRequest::new(&["zeta", "alpha"], &SearchLimits::default()).unwrap();
        let results = vec![
            WordResult {
                word: "zeta".to_string(),
                per_document: Vec::new(),
            },
            WordResult {
                word: "alpha".to_string(),
                per_document: Vec::new(),
            },
        ];

        let cert =
            CertificateBuilder::build(&request, results, control(), RunMetadata::new(accepted_at()))
                .unwrap();

        assert!(cert.verify().unwrap());
        assert_eq!(cert.requested_words, vec!["zeta", "alpha"]);
        assert_eq!(
            cert.results.keys().collect::<Vec<_>>(),
            vec!["alpha", "zeta"]
        );
        assert_eq!(cert.timestamp, "2026-10-19T08:15:30.123456Z");
    }

    #[test]
    fn test_search_ids_are_unique() {
        let request = SearchRequest::new(&["a"], &SearchLimits::default()).unwrap();
        let first =
            CertificateBuilder::build(&request, Vec::new(), control(), RunMetadata::new(accepted_at()))
                .unwrap();
        let second =
            CertificateBuilder::build(&request, Vec::new(), control(), RunMetadata::new(accepted_at()))
                .unwrap();

        assert_ne!(first.search_id, second.search_id);
        assert_ne!(first.certificate_hash, second.certificate_hash);
    }

    #[test]
    fn test_directory_timestamp() {
        assert_eq!(directory_timestamp(&accepted_at()), "20261019_081530_123456");
    }
}
