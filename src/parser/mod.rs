// file: src/parser/mod.rs
// description: markup text extraction module exports
// reference: internal module structure

pub mod markup;
pub mod patterns;
pub mod script;

pub use markup::{MarkupText, TextChar, TextSegment};
pub use script::{BoundaryRule, is_boundary_char, is_unsegmented_script};
