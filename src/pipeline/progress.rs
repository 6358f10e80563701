// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for search runs
// reference: uses indicatif for progress bars and tracks matching metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    pub documents_scanned: usize,
    pub documents_skipped: usize,
    pub documents_with_hits: usize,
    pub total_hits: usize,
    pub highlighted_files: usize,
    pub duration_ms: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.documents_scanned as f64 * 1000.0 / self.duration_ms as f64
    }

    pub fn hit_rate(&self) -> f64 {
        if self.documents_scanned == 0 {
            return 0.0;
        }
        (self.documents_with_hits as f64 / self.documents_scanned as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    documents_scanned: Arc<AtomicUsize>,
    documents_with_hits: Arc<AtomicUsize>,
    total_hits: Arc<AtomicUsize>,
    highlighted_files: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_documents: usize) -> Self {
        Self::build(total_documents, true)
    }

    /// Tracker that counts but never draws.
    pub fn hidden(total_documents: usize) -> Self {
        Self::build(total_documents, false)
    }

    fn build(total_documents: usize, visible: bool) -> Self {
        let multi_progress = if visible {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let main_bar = create_progress_bar(&multi_progress, total_documents as u64);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            documents_scanned: Arc::new(AtomicUsize::new(0)),
            documents_with_hits: Arc::new(AtomicUsize::new(0)),
            total_hits: Arc::new(AtomicUsize::new(0)),
            highlighted_files: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn record_document(&self, hits: usize, highlighted_files: usize) {
        self.documents_scanned.fetch_add(1, Ordering::SeqCst);
        if hits > 0 {
            self.documents_with_hits.fetch_add(1, Ordering::SeqCst);
        }
        self.total_hits.fetch_add(hits, Ordering::SeqCst);
        self.highlighted_files
            .fetch_add(highlighted_files, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Matching complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self, documents_skipped: usize) -> SearchStats {
        SearchStats {
            documents_scanned: self.documents_scanned.load(Ordering::SeqCst),
            documents_skipped,
            documents_with_hits: self.documents_with_hits.load(Ordering::SeqCst),
            total_hits: self.total_hits.load(Ordering::SeqCst),
            highlighted_files: self.highlighted_files.load(Ordering::SeqCst),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    fn update_detail_bar(&self) {
        let with_hits = self.documents_with_hits.load(Ordering::SeqCst);
        let hits = self.total_hits.load(Ordering::SeqCst);

        self.detail_bar
            .set_message(format!("Documents with hits: {} | Hits: {}", with_hits, hits));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("█▓▒░"));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_stats_calculations() {
        let mut stats = SearchStats::new();
        stats.documents_scanned = 100;
        stats.documents_with_hits = 25;
        stats.duration_ms = 500;

        assert_eq!(stats.documents_per_second(), 200.0);
        assert_eq!(stats.hit_rate(), 25.0);
    }

    #[test]
    fn test_search_stats_zero_values() {
        let stats = SearchStats::new();
        assert_eq!(stats.documents_per_second(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_records_documents() {
        let tracker = ProgressTracker::hidden(3);

        tracker.record_document(1, 1);
        tracker.record_document(0, 0);
        tracker.record_document(2, 1);

        let stats = tracker.get_stats(1);
        assert_eq!(stats.documents_scanned, 3);
        assert_eq!(stats.documents_with_hits, 2);
        assert_eq!(stats.total_hits, 3);
        assert_eq!(stats.highlighted_files, 2);
        assert_eq!(stats.documents_skipped, 1);
    }
}
