//! CLI configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sitekit::SiteConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`.
///
/// ```toml
/// base_url = "https://www.azigroup.com"
/// timeout_secs = 20
///
/// [site]
/// flash_lifetime_ms = 8000
///
/// [site.messages]
/// required = "Ce champ est obligatoire"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub site: SiteConfig,
}

impl CliConfig {
    /// Load `path`, or the default location if it exists. No file means
    /// defaults; an explicit path that is missing is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match crate::paths::config_file() {
                Some(default) if default.exists() => Self::from_file(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
