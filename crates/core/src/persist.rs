//! Single-slot persistence of the current table.
//!
//! A [`Storage`] is a string key-value store. [`Persistence`] keeps one JSON
//! snapshot `{time, columns, dataSource}` in it under a fixed key; saving
//! overwrites it and clearing removes it.

use crate::error::{HelperError, Result};
use crate::model::{Dataset, Field};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default storage key of the snapshot slot.
pub const DEFAULT_STORAGE_KEY: &str = "EXCEL_HELPER";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A saved table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Local capture time, `YYYY-MM-DD HH:MM:SS`
    pub time: String,
    pub columns: Vec<Field>,
    #[serde(rename = "dataSource")]
    pub data_source: Dataset,
}

/// String key-value storage backing the snapshot slot.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(HelperError::Storage(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The snapshot slot on top of a [`Storage`].
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
    key: String,
}

impl<S: Storage> Persistence<S> {
    /// Use the default `EXCEL_HELPER` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Persistence {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Overwrite the slot with `columns` and `dataset`, stamped with the
    /// current local time.
    pub fn save(&mut self, columns: &[Field], dataset: &Dataset) -> Result<Snapshot> {
        let snapshot = Snapshot {
            time: chrono::Local::now().format(TIME_FORMAT).to_string(),
            columns: columns.to_vec(),
            data_source: dataset.clone(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set_item(&self.key, &json)?;
        tracing::info!(key = %self.key, rows = dataset.len(), time = %snapshot.time, "saved snapshot");
        Ok(snapshot)
    }

    /// The saved snapshot, if any.
    ///
    /// An empty object counts as no record. So does a payload that no longer
    /// parses; that case is logged and left in place.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored snapshot is not JSON; ignoring it");
                return Ok(None);
            }
        };
        if value.as_object().map_or(true, serde_json::Map::is_empty) {
            return Ok(None);
        }

        match serde_json::from_value(value) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored snapshot has an unexpected shape; ignoring it");
                Ok(None)
            }
        }
    }

    /// Whether a restorable snapshot exists.
    pub fn has_record(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }

    /// Remove the snapshot.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        tracing::info!(key = %self.key, "cleared snapshot");
        Ok(())
    }
}
