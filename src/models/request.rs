// file: src/models/request.rs
// description: validated search request
// reference: input validation patterns

use crate::config::SearchLimits;
use crate::error::{Result, SearchError};
use serde::Serialize;

/// An ordered, bounded list of non-empty words. Only constructible through
/// [`SearchRequest::new`], so a request that reaches the matcher is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    words: Vec<String>,
}

impl SearchRequest {
    pub fn new<S: AsRef<str>>(words: &[S], limits: &SearchLimits) -> Result<Self> {
        if words.is_empty() {
            return Err(SearchError::Validation(
                "At least one word is required".to_string(),
            ));
        }

        if words.len() > limits.max_words {
            return Err(SearchError::Validation(format!(
                "Maximum {} words allowed, got {}",
                limits.max_words,
                words.len()
            )));
        }

        let mut accepted: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref().trim();

            if word.is_empty() {
                return Err(SearchError::Validation(
                    "Empty words are not allowed".to_string(),
                ));
            }

            let length = word.chars().count();
            if length > limits.max_word_length {
                return Err(SearchError::Validation(format!(
                    "Maximum word length is {} characters, got {}",
                    limits.max_word_length, length
                )));
            }

            if !accepted.iter().any(|existing| existing == word) {
                accepted.push(word.to_string());
            }
        }

        Ok(Self { words: accepted })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
