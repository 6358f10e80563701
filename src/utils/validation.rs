// file: src/utils/validation.rs
// description: path validation and filename sanitising helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex =
        Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#).expect("UNSAFE_FILENAME_CHARS regex is valid");
    static ref REPEATED_UNDERSCORES: Regex =
        Regex::new(r"_+").expect("REPEATED_UNDERSCORES regex is valid");
}

const MAX_FILENAME_BYTES: usize = 255;

pub struct Validator;

impl Validator {
    /// Makes `name` safe as a single path component.
    pub fn sanitize_filename(name: &str) -> String {
        let trimmed = name.trim();
        let replaced = UNSAFE_FILENAME_CHARS.replace_all(trimmed, "_");
        let collapsed = REPEATED_UNDERSCORES.replace_all(&replaced, "_");
        let stripped = collapsed.trim_matches(|c| c == '.' || c == '_');

        if stripped.is_empty() {
            return "unnamed".to_string();
        }

        Self::truncate_bytes(stripped, MAX_FILENAME_BYTES).to_string()
    }

    /// Fails when `output` is the corpus directory or inside it, since
    /// highlighted files would then be scanned by later searches.
    pub fn validate_output_outside_corpus(output: &Path, corpus: &Path) -> Result<()> {
        let output = std::path::absolute(output)?;
        let corpus = std::path::absolute(corpus)?;

        if output.starts_with(&corpus) {
            return Err(SearchError::Config(format!(
                "Output directory {} must not be inside corpus directory {}",
                output.display(),
                corpus.display()
            )));
        }

        Ok(())
    }

    fn truncate_bytes(text: &str, max_bytes: usize) -> &str {
        if text.len() <= max_bytes {
            return text;
        }
        let mut end = max_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(Validator::sanitize_filename("my/file<name>.txt"), "my_file_name_.txt");
        assert_eq!(Validator::sanitize_filename("file:name*test?.txt"), "file_name_test_.txt");
        assert_eq!(Validator::sanitize_filename("example"), "example");
        assert_eq!(Validator::sanitize_filename("劇薬"), "劇薬");
    }

    #[test]
    fn test_sanitize_degenerate_names() {
        assert_eq!(Validator::sanitize_filename(""), "unnamed");
        assert_eq!(Validator::sanitize_filename("   "), "unnamed");
        assert_eq!(Validator::sanitize_filename(".."), "unnamed");
        assert_eq!(Validator::sanitize_filename("///"), "unnamed");
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "薬".repeat(100);
        let sanitized = Validator::sanitize_filename(&long);
        assert!(sanitized.len() <= 255);
        assert!(sanitized.chars().all(|c| c == '薬'));
    }

    #[test]
    fn test_output_inside_corpus_rejected() {
        let corpus = Path::new("/srv/corpus");
        assert!(Validator::validate_output_outside_corpus(Path::new("/srv/corpus/out"), corpus).is_err());
        assert!(Validator::validate_output_outside_corpus(Path::new("/srv/output"), corpus).is_ok());
    }
}
