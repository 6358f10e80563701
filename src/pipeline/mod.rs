// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod processor;
mod progress;

pub use orchestrator::{SearchOrchestrator, SearchOutcome};
pub use processor::{DocumentProcessor, ProcessingResult, WordHits};
pub use progress::{ProgressTracker, SearchStats};
