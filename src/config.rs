use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::chunk::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::pipeline::{DEFAULT_MAX_CHUNKS, DEFAULT_WARN_CHUNK_THRESHOLD};
use crate::summarize::DEFAULT_MODEL;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub model: Option<String>,
    pub lang: Option<String>,
    pub chunk_size: Option<usize>,
    pub chunk_overlap: Option<usize>,
    pub max_chunks: Option<usize>,
    pub warn_chunk_threshold: Option<usize>,
}

impl Config {
    /// Load config from ~/.config/urlsum/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or("en")
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap.unwrap_or(DEFAULT_CHUNK_OVERLAP)
    }

    pub fn max_chunks(&self) -> usize {
        self.max_chunks.unwrap_or(DEFAULT_MAX_CHUNKS)
    }

    pub fn warn_chunk_threshold(&self) -> usize {
        self.warn_chunk_threshold.unwrap_or(DEFAULT_WARN_CHUNK_THRESHOLD)
    }
}

/// Pick the API key for a run: override, then environment, then config file
pub fn resolve_api_key(
    override_key: Option<&str>,
    env_key: Option<&str>,
    config_key: Option<&str>,
) -> std::result::Result<String, Error> {
    [override_key, env_key, config_key]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingCredential)
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("urlsum")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
groq_api_key = "gsk_file"
model = "llama-3.3-70b-versatile"
lang = "de"
chunk_size = 2000
chunk_overlap = 100
max_chunks = 3
warn_chunk_threshold = 10
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk_file"));
        assert_eq!(config.model(), "llama-3.3-70b-versatile");
        assert_eq!(config.lang(), "de");
        assert_eq!(config.chunk_size(), 2000);
        assert_eq!(config.chunk_overlap(), 100);
        assert_eq!(config.max_chunks(), 3);
        assert_eq!(config.warn_chunk_threshold(), 10);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.lang(), "en");
        assert_eq!(config.chunk_size(), 1500);
        assert_eq!(config.chunk_overlap(), 200);
        assert_eq!(config.max_chunks(), 5);
        assert_eq!(config.warn_chunk_threshold(), 20);
    }

    #[test]
    fn test_override_takes_precedence() {
        let key = resolve_api_key(Some("gsk_override"), Some("gsk_env"), Some("gsk_file")).unwrap();
        assert_eq!(key, "gsk_override");
    }

    #[test]
    fn test_blank_override_falls_through() {
        assert_eq!(resolve_api_key(Some("  "), Some("gsk_env"), None).unwrap(), "gsk_env");
        assert_eq!(resolve_api_key(None, Some(""), Some("gsk_file")).unwrap(), "gsk_file");
    }

    #[test]
    fn test_missing_credential() {
        let err = resolve_api_key(Some(""), None, Some(" ")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }
}
