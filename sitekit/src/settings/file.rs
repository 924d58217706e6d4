//! JSON file settings backend with in-memory cache.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

/// Settings persisted as one flat JSON object.
///
/// The whole file is read once at open and rewritten on every change.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    cache: DashMap<String, String>,
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open the file at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let cache = DashMap::new();

        match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => {
                let entries: BTreeMap<String, String> =
                    serde_json::from_str(&contents).map_err(SettingsError::Deserialization)?;
                for (key, value) in entries {
                    cache.insert(key, value);
                }
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            path,
            cache,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().map_err(|_| SettingsError::Poisoned)?;

        let entries: BTreeMap<String, String> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = serde_json::to_string_pretty(&entries).map_err(SettingsError::Serialization)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsBackend for FileBackend {
    fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.cache.get(key).map(|v| v.clone()))
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), SettingsError> {
        self.cache.insert(key.to_string(), value);
        self.flush()
    }

    fn delete(&self, key: &str) -> Result<(), SettingsError> {
        if self.cache.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let mut keys: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
