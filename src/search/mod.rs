// file: src/search/mod.rs
// description: matching, highlighting and self-test module exports
// reference: internal module structure

pub mod highlighter;
pub mod matcher;
pub mod positive_control;

pub use highlighter::Highlighter;
pub use matcher::{TextMatch, WordMatcher};
pub use positive_control::PositiveControl;
