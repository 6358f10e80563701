// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod certificate;
pub mod document;
pub mod request;
pub mod search_result;

pub use certificate::{Certificate, ControlCase, PositiveControlResult, SystemInfo};
pub use document::Document;
pub use request::SearchRequest;
pub use search_result::{DocumentResult, HitPosition, MatchSpan, SkippedDocument, WordResult};
