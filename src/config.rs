//! config
//!
//! Optional user configuration.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Location
//!
//! 1. `$SAWYER_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/sawyer/config.toml` (platform config dir elsewhere)
//!
//! A missing file is not an error; defaults apply.
//!
//! # Example
//!
//! ```toml
//! api_base = "https://github.example.com/api/v3"
//! user = "octocat"
//! head = "main"
//! template = "/home/octocat/.config/sawyer/changelog.j2"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::forge::github::DEFAULT_API_BASE;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SAWYER_CONFIG";

/// Head ref used when neither the CLI nor the config names one.
pub const DEFAULT_HEAD: &str = "develop";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API base URL (GitHub Enterprise)
    pub api_base: Option<String>,
    /// Login used for basic auth
    pub user: Option<String>,
    /// Default head ref
    pub head: Option<String>,
    /// Path to a changelog template
    pub template: Option<PathBuf>,
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::parse(&content).map_err(|message| ConfigError::ParseError {
            path: path.to_path_buf(),
            message,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Path the config is read from, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("sawyer").join("config.toml"))
    }

    /// Reject values that can never work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api_base {
            if !(base.starts_with("https://") || base.starts_with("http://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base must be an http(s) URL, got '{}'",
                    base
                )));
            }
        }
        if matches!(&self.head, Some(head) if head.trim().is_empty()) {
            return Err(ConfigError::InvalidValue("head cannot be empty".into()));
        }
        Ok(())
    }

    /// Effective API base URL.
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Effective head ref.
    pub fn head(&self) -> &str {
        self.head.as_deref().unwrap_or(DEFAULT_HEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_base(), "https://api.github.com");
        assert_eq!(config.head(), "develop");
        assert!(config.user.is_none());
        assert!(config.template.is_none());
    }

    #[test]
    fn parse_full_file() {
        let config = Config::parse(
            r#"
            api_base = "https://github.example.com/api/v3"
            user = "octocat"
            head = "main"
            template = "/tmp/changelog.j2"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base(), "https://github.example.com/api/v3");
        assert_eq!(config.user.as_deref(), Some("octocat"));
        assert_eq!(config.head(), "main");
        assert_eq!(config.template, Some(PathBuf::from("/tmp/changelog.j2")));
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        assert!(Config::parse("token = \"nope\"").is_err());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "head = ").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_validates_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base = \"ftp://example.com\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn validate_rejects_blank_head() {
        let config = Config {
            head: Some("  ".into()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
