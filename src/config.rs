// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub search: SearchLimits,
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub directory: PathBuf,
    pub allowed_extensions: Vec<String>,
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SearchLimits {
    pub max_words: usize,
    pub max_word_length: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    #[serde(default = "default_highlight_style")]
    pub highlight_style: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
}

fn default_max_file_size_mb() -> usize {
    50
}

fn default_highlight_style() -> String {
    "background-color: #FFFF00;".to_string()
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_words: 100,
            max_word_length: 200,
        }
    }
}

impl CorpusConfig {
    /// Extension allow-list check, case-insensitive, leading dots ignored.
    pub fn allows(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        self.allowed_extensions
            .iter()
            .map(|allowed| allowed.trim_start_matches('.'))
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WORDSEARCH")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("corpus.allowed_extensions")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            corpus: CorpusConfig {
                directory: PathBuf::from("./data"),
                allowed_extensions: vec!["html".to_string(), "htm".to_string(), "xml".to_string()],
                max_file_size_mb: default_max_file_size_mb(),
            },
            search: SearchLimits::default(),
            output: OutputConfig {
                directory: PathBuf::from("./output"),
                highlight_style: default_highlight_style(),
            },
            pipeline: PipelineConfig {
                parallel_workers: 4,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(SearchError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.search.max_words == 0 || self.search.max_word_length == 0 {
            return Err(SearchError::Config(
                "max_words and max_word_length must be greater than 0".to_string(),
            ));
        }

        if self.corpus.allowed_extensions.is_empty() {
            return Err(SearchError::Config(
                "allowed_extensions must list at least one extension".to_string(),
            ));
        }

        if self.output.highlight_style.contains('"') {
            return Err(SearchError::Config(
                "highlight_style must not contain double quotes".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_words, 100);
        assert_eq!(config.search.max_word_length, 200);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = 0;
        assert!(matches!(config.validate(), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let mut config = Config::default_config();
        config.corpus.allowed_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_allow_list() {
        let mut corpus = Config::default_config().corpus;
        corpus.allowed_extensions = vec![".HTML".to_string(), "xml".to_string()];

        assert!(corpus.allows(Path::new("page.html")));
        assert!(corpus.allows(Path::new("dir/feed.XML")));
        assert!(!corpus.allows(Path::new("notes.txt")));
        assert!(!corpus.allows(Path::new("README")));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "[search]\nmax_words = 5\nmax_word_length = 10\n\n[pipeline]\nparallel_workers = 2\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.search.max_words, 5);
        assert_eq!(config.pipeline.parallel_workers, 2);
        assert_eq!(config.output.highlight_style, "background-color: #FFFF00;");
    }
}
