//! Settings system for typed key-value storage.

mod backend;
mod file;
mod memory;

pub use backend::SettingsBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),
    #[error("settings store lock poisoned")]
    Poisoned,
}

/// Typed settings provider.
///
/// Wraps a `SettingsBackend` with typed serialization via serde_json, so a
/// `bool` is stored as the string `true` or `false`.
///
/// # Example
///
/// ```
/// use sitekit::settings::{MemoryBackend, SettingsProvider};
///
/// let settings = SettingsProvider::new(MemoryBackend::new());
/// settings.set("darkMode", &true).unwrap();
/// assert_eq!(settings.get_raw("darkMode").unwrap().as_deref(), Some("true"));
/// assert!(settings.get_or("darkMode", false).unwrap());
/// ```
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    /// Create a new settings provider with the given backend.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Provider over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Get a typed value for a key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get_raw(key)? {
            Some(raw) => Ok(Some(
                serde_json::from_str(&raw).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Get a typed value for a key, returning a default if not found.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, SettingsError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Get the stored string as is.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        self.backend.get_raw(key)
    }

    /// Set a typed value for a key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(value).map_err(SettingsError::Serialization)?;
        self.backend.set_raw(key, raw)
    }

    /// Delete a key.
    pub fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.delete(key)
    }

    /// Get all keys matching a prefix.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.backend.keys_with_prefix(prefix)
    }
}

impl Default for SettingsProvider {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider").finish_non_exhaustive()
    }
}
