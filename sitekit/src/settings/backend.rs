//! Settings backend trait.

use super::SettingsError;

/// Backend trait for settings storage.
///
/// Implementations store raw strings, the way a browser's local storage
/// does. The `SettingsProvider` wraps this with typed serialization.
pub trait SettingsBackend: Send + Sync {
    /// Get the raw value for a key.
    fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Set the raw value for a key.
    fn set_raw(&self, key: &str, value: String) -> Result<(), SettingsError>;

    /// Delete a key.
    fn delete(&self, key: &str) -> Result<(), SettingsError>;

    /// Get all keys matching a prefix.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
