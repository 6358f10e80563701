// file: src/corpus/mod.rs
// description: Corpus discovery and loading module exports
// reference: Internal module structure

pub mod scanner;
pub mod store;

pub use scanner::{DirectoryScan, FileScanner, ScannedFile};
pub use store::{DocumentStore, LoadedCorpus};
