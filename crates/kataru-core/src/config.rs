//! Application configuration.
//!
//! A TOML file layered over embedded defaults, with environment overrides for
//! the two secrets so they can stay out of the file entirely.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub suggest: SuggestConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Client id sent with every catalog API request.
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    pub enabled: bool,
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded defaults ship with the binary; failing to parse them
        // is a build defect, not a runtime condition.
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config is valid")
    }
}

impl AppConfig {
    /// Load from the user config file if present, otherwise the defaults.
    /// Environment overrides apply either way.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::read_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, for the `--config` flag.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config file");
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("MAL_CLIENT_ID") {
            if !id.is_empty() {
                self.catalog.client_id = id;
            }
        }
        if let Ok(key) = std::env::var("SUGGEST_API_KEY") {
            if !key.is_empty() {
                self.suggest.api_key = key;
            }
        }
    }
}

/// Location of the user config file, when a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kataru").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = AppConfig::default();
        assert!(!config.suggest.enabled);
        assert_eq!(config.http.timeout_secs, 10);
        assert!(config.catalog.client_id.is_empty());
    }

    #[test]
    fn partial_file_is_rejected() {
        // Sections are mandatory so a typo'd file fails loudly instead of
        // silently losing settings.
        let err = toml::from_str::<AppConfig>("[catalog]\nclient_id = \"x\"\n");
        assert!(err.is_err());
    }
}
