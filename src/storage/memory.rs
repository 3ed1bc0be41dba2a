//! Process-local storage backend.
//!
//! Holds the serialized list in memory behind a shared handle. Cloning a
//! `MemoryStorage` yields another handle to the same slot, so a caller can hand
//! one clone to a session and keep another to observe what was saved.

use crate::domain::error::{Result, ShoplistError};
use crate::domain::ShoppingList;
use crate::storage::backend::Storage;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Slot {
    value: Option<String>,
    saves: usize,
}

/// In-memory storage used by tests and `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    /// Creates a storage that already holds `list`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized.
    pub fn with_list(list: &ShoppingList) -> Result<Self> {
        let storage = Self::default();
        storage.lock()?.value = Some(serde_json::to_string(list)?);
        Ok(storage)
    }

    /// Number of successful saves since creation.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().map_or(0, |slot| slot.saves)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slot>> {
        self.slot
            .lock()
            .map_err(|e| ShoplistError::Storage(format!("memory slot poisoned: {e}")))
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<ShoppingList>> {
        let slot = self.lock()?;
        slot.value
            .as_deref()
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|e| ShoplistError::Storage(format!("stored list is invalid: {e}")))
            })
            .transpose()
    }

    fn save(&mut self, list: &ShoppingList) -> Result<()> {
        let value = serde_json::to_string(list)?;
        let mut slot = self.lock()?;
        slot.value = Some(value);
        slot.saves += 1;
        Ok(())
    }
}
