// file: src/pipeline/orchestrator.rs
// description: coordinates corpus loading, matching, self-test, certification and persistence
// reference: orchestrates one search request end to end

use crate::certificate::{
    CertificateBuilder, CertificateWriter, PendingOutput, RunMetadata, directory_timestamp,
};
use crate::config::Config;
use crate::corpus::{DocumentStore, LoadedCorpus, ScannedFile};
use crate::error::{Result, SearchError};
use crate::models::{
    Certificate, Document, DocumentResult, PositiveControlResult, SearchRequest, WordResult,
};
use crate::pipeline::processor::{DocumentProcessor, ProcessingResult};
use crate::pipeline::progress::{ProgressTracker, SearchStats};
use crate::search::{Highlighter, PositiveControl, WordMatcher};
use crate::utils::Validator;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What a caller gets back from a successful search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub certificate: Certificate,
    pub certificate_path: PathBuf,
    /// Highlighted files, relative to the output directory.
    pub highlighted_files: Vec<String>,
    pub stats: SearchStats,
}

pub struct SearchOrchestrator {
    config: Config,
    store: DocumentStore,
    matcher: WordMatcher,
    highlighter: Highlighter,
    writer: CertificateWriter,
    max_concurrent_tasks: usize,
    show_progress: bool,
}

impl SearchOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Validator::validate_output_outside_corpus(
            &config.output.directory,
            &config.corpus.directory,
        )?;

        Ok(Self {
            store: DocumentStore::new(config.corpus.clone()),
            matcher: WordMatcher::new(),
            highlighter: Highlighter::new(&config.output.highlight_style),
            writer: CertificateWriter::new(config.output.directory.clone()),
            max_concurrent_tasks: config.pipeline.parallel_workers.max(1),
            show_progress: false,
            config,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Validates `words` and runs the search. Invalid input never touches the corpus.
    pub async fn search<S: AsRef<str>>(&self, words: &[S]) -> Result<SearchOutcome> {
        let request = SearchRequest::new(words, &self.config.search)?;
        self.execute(&request).await
    }

    pub async fn execute(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let accepted_at = Utc::now();
        info!("Search accepted for {} word(s): {:?}", request.words().len(), request.words());

        let corpus = self.load_corpus().await?;
        let documents: Vec<Arc<Document>> = corpus.documents.into_iter().map(Arc::new).collect();
        let skipped = corpus.skipped;

        let positive_control = self.run_positive_control();

        let progress = Arc::new(if self.show_progress {
            ProgressTracker::new(documents.len())
        } else {
            ProgressTracker::hidden(documents.len())
        });
        let processed = self
            .process_documents(&documents, request, progress.clone())
            .await?;

        let layout = OutputLayout::new(request, &accepted_at, &documents);
        let (word_results, outputs) = assemble(request, &documents, processed, &layout);

        let metadata = RunMetadata {
            total_documents_scanned: documents.len(),
            skipped_documents: skipped.clone(),
            ..RunMetadata::new(accepted_at)
        };
        let certificate =
            CertificateBuilder::build(request, word_results, positive_control, metadata)?;

        let certificate_path = self
            .writer
            .persist(
                &certificate,
                layout.certificate_dir(),
                &layout.word_dirs,
                &outputs,
            )
            .inspect_err(|e| error!("Certificate persistence failed: {}", e))?;

        progress.finish();
        let stats = progress.get_stats(skipped.len());
        self.log_final_stats(&certificate, &stats);

        Ok(SearchOutcome {
            highlighted_files: outputs.into_iter().map(|o| o.relative_path).collect(),
            certificate,
            certificate_path,
            stats,
        })
    }

    pub fn run_positive_control(&self) -> PositiveControlResult {
        let result = PositiveControl::new(self.matcher, &self.highlighter).run();
        if !result.all_passed {
            warn!("Matcher self-test failed; certificate will carry the warning");
        }
        result
    }

    /// Files that would be searched, without reading their contents.
    pub fn list_files(&self) -> Result<Vec<ScannedFile>> {
        self.store.list_files(&self.config.corpus.directory)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn load_corpus(&self) -> Result<LoadedCorpus> {
        let store = self.store.clone();
        let directory = self.config.corpus.directory.clone();

        tokio::task::spawn_blocking(move || store.load_corpus(&directory))
            .await
            .map_err(|e| SearchError::CorpusUnavailable {
                path: self.config.corpus.directory.clone(),
                reason: format!("corpus loading task failed: {}", e),
            })?
    }

    async fn process_documents(
        &self,
        documents: &[Arc<Document>],
        request: &SearchRequest,
        progress: Arc<ProgressTracker>,
    ) -> Result<Vec<ProcessingResult>> {
        let processor = Arc::new(DocumentProcessor::new(
            self.matcher,
            self.highlighter.clone(),
            request.words().to_vec(),
        ));

        let tasks = documents.iter().enumerate().map(|(index, document)| {
            let processor = processor.clone();
            let document = document.clone();
            let progress = progress.clone();

            async move {
                let relative_path = document.relative_path.clone();
                let processed =
                    tokio::task::spawn_blocking(move || processor.process(index, &document)).await;

                match processed {
                    Ok(Ok(result)) => {
                        let hits = result.words.iter().map(|w| w.match_spans.len()).sum();
                        let highlighted = result
                            .words
                            .iter()
                            .filter(|w| w.highlighted.is_some())
                            .count();
                        progress.record_document(hits, highlighted);
                        Ok(result)
                    }
                    Ok(Err(e)) => {
                        error!("Failed to process {}: {}", relative_path, e);
                        Err(e)
                    }
                    Err(e) => {
                        error!("Processing task for {} panicked: {}", relative_path, e);
                        Err(SearchError::Io(std::io::Error::other(format!(
                            "processing task for {} failed: {}",
                            relative_path, e
                        ))))
                    }
                }
            }
        });

        let results: Vec<Result<ProcessingResult>> = stream::iter(tasks)
            .buffer_unordered(self.max_concurrent_tasks)
            .collect()
            .await;

        // Completion order is arbitrary; certificate order follows the corpus order.
        let mut processed = results.into_iter().collect::<Result<Vec<_>>>()?;
        processed.sort_by_key(|result| result.document_index);
        Ok(processed)
    }

    fn log_final_stats(&self, certificate: &Certificate, stats: &SearchStats) {
        info!("=== Search Summary ===");
        info!("Search ID: {}", certificate.search_id);
        info!("Timestamp: {}", certificate.timestamp);
        info!("Documents scanned: {}", stats.documents_scanned);
        info!("Documents skipped: {}", stats.documents_skipped);
        info!(
            "Documents with hits: {} ({:.1}%)",
            stats.documents_with_hits,
            stats.hit_rate()
        );
        info!("Total hits: {}", stats.total_hits);
        info!("Highlighted files: {}", stats.highlighted_files);
        info!(
            "Positive control: {}",
            if certificate.positive_control.all_passed {
                "passed"
            } else {
                "FAILED"
            }
        );
        info!("Certificate hash: {}", certificate.certificate_hash);
        info!(
            "Duration: {} ms ({:.1} documents/s)",
            stats.duration_ms,
            stats.documents_per_second()
        );
        info!("======================");
    }
}

/// Output directory per word and highlighted filename per document for one run.
struct OutputLayout {
    word_dirs: Vec<String>,
    output_names: Vec<String>,
}

impl OutputLayout {
    fn new(request: &SearchRequest, accepted_at: &DateTime<Utc>, documents: &[Arc<Document>]) -> Self {
        let timestamp = directory_timestamp(accepted_at);

        let mut used_dirs = HashSet::new();
        let word_dirs = request
            .words()
            .iter()
            .map(|word| {
                let name = unique_name(Validator::sanitize_filename(word), &mut used_dirs);
                format!("{}/{}", name, timestamp)
            })
            .collect();

        let mut filename_counts: HashMap<String, usize> = HashMap::new();
        for document in documents {
            *filename_counts.entry(document.filename()).or_default() += 1;
        }

        // Filenames shared by several documents fall back to the flattened relative path.
        let mut used_names = HashSet::new();
        let output_names = documents
            .iter()
            .map(|document| {
                let filename = document.filename();
                let base = if filename_counts.get(&filename).copied().unwrap_or(0) > 1 {
                    document.relative_path.replace('/', "_")
                } else {
                    filename
                };
                let name = Validator::sanitize_filename(&format!("highlighted_{}", base));
                unique_name(name, &mut used_names)
            })
            .collect();

        Self {
            word_dirs,
            output_names,
        }
    }

    fn certificate_dir(&self) -> &str {
        &self.word_dirs[0]
    }

    fn output_path(&self, word_index: usize, document_index: usize) -> String {
        format!(
            "{}/{}",
            self.word_dirs[word_index], self.output_names[document_index]
        )
    }
}

/// Appends `_2`, `_3`, ... until `base` is unused; comparison ignores case.
fn unique_name(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !used.insert(candidate.to_lowercase()) {
        candidate = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    candidate
}

fn assemble(
    request: &SearchRequest,
    documents: &[Arc<Document>],
    mut processed: Vec<ProcessingResult>,
    layout: &OutputLayout,
) -> (Vec<WordResult>, Vec<PendingOutput>) {
    let mut word_results = Vec::with_capacity(request.words().len());
    let mut outputs = Vec::new();

    for (word_index, word) in request.words().iter().enumerate() {
        let mut per_document = Vec::with_capacity(documents.len());

        for (document_index, document) in documents.iter().enumerate() {
            let hits = &mut processed[document_index].words[word_index];

            let highlighted_output_path = hits.highlighted.take().map(|content| {
                let relative_path = layout.output_path(word_index, document_index);
                outputs.push(PendingOutput {
                    relative_path: relative_path.clone(),
                    content,
                });
                relative_path
            });

            per_document.push(DocumentResult {
                filename: document.filename(),
                relative_path: document.relative_path.clone(),
                content_hash: document.content_hash.clone(),
                hit_count: hits.match_spans.len(),
                match_spans: std::mem::take(&mut hits.match_spans),
                hit_positions: std::mem::take(&mut hits.hit_positions),
                highlighted_output_path,
            });
        }

        word_results.push(WordResult {
            word: word.clone(),
            per_document,
        });
    }

    (word_results, outputs)
}
