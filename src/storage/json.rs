//! JSON file-based key-value storage backend.
//!
//! This module provides a small local key-value store persisted as one
//! human-readable JSON file. The shopping list is stored under
//! [`LIST_KEY`] as a JSON-serialized string, the same shape a browser's local
//! storage would hold. Writes are atomic (write-to-temp + rename) so a crash
//! never leaves a half-written file behind.

use crate::domain::error::{Result, ShoplistError};
use crate::domain::ShoppingList;
use crate::storage::backend::{Storage, LIST_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// A stored value with its last write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    /// Unix timestamp of the last write.
    updated_at: i64,
}

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, StoredValue>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value storage backend.
///
/// The whole file is kept in memory and rewritten on every `set`.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "shoppingList": {
///       "value": "{\"כללי\":[{\"name\":\"Milk\",\"selected\":false,\"quantity\":1}]}",
///       "updated_at": 1760600000
///     }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonStorage {
    /// Creates or opens a JSON storage file.
    ///
    /// If the file exists, loads existing entries. Otherwise starts empty; the
    /// file is created on the first write. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shoplist::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/shoplist/store.json"))?;
    /// # Ok::<(), shoplist::ShoplistError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "storage initialized");

        Ok(Self { file_path, data })
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.entries.get(key).map(|v| v.value.as_str())
    }

    /// Stores `value` under `key` and writes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.data.entries.insert(
            key.to_string(),
            StoredValue {
                value,
                updated_at: chrono::Utc::now().timestamp(),
            },
        );
        self.save_to_file()
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ShoplistError::Storage(format!("failed to parse store file: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Writes to a temporary file, then renames it over the target path.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<Option<ShoppingList>> {
        let _span = tracing::debug_span!("json_load", key = LIST_KEY).entered();

        let Some(raw) = self.get(LIST_KEY) else {
            tracing::debug!("no stored list");
            return Ok(None);
        };

        let list: ShoppingList = serde_json::from_str(raw)
            .map_err(|e| ShoplistError::Storage(format!("stored list is invalid: {e}")))?;

        tracing::debug!(items = list.item_count(), "stored list loaded");
        Ok(Some(list))
    }

    fn save(&mut self, list: &ShoppingList) -> Result<()> {
        let _span = tracing::debug_span!("json_save", items = list.item_count()).entered();

        let value = serde_json::to_string(list)?;
        self.set(LIST_KEY, value)
    }
}
