//! Persistence adapter abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over where the
//! shopping list lives between runs. The application calls [`Storage::load`]
//! once at startup and [`Storage::save`] after every mutation; nothing else
//! touches persistence.

use crate::domain::error::Result;
use crate::domain::ShoppingList;

/// Fixed key under which the serialized list is stored.
pub const LIST_KEY: &str = "shoppingList";

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): key-value JSON file with atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local, for tests and ephemeral runs
///
/// # Examples
///
/// ```
/// use shoplist::storage::{MemoryStorage, Storage};
/// use shoplist::ShoppingList;
///
/// let mut storage = MemoryStorage::default();
/// assert!(storage.load()?.is_none());
/// storage.save(&ShoppingList::new())?;
/// assert!(storage.load()?.is_some());
/// # Ok::<(), shoplist::ShoplistError>(())
/// ```
pub trait Storage: Send {
    /// Loads the stored list.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or is not a valid list.
    fn load(&self) -> Result<Option<ShoppingList>>;

    /// Replaces the stored list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn save(&mut self, list: &ShoppingList) -> Result<()>;
}
