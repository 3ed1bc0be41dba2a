//! Domain layer for the shopping-list manager.
//!
//! This module contains the core domain types, independent of storage, the
//! terminal host or the gesture engine.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`category`]: The nine fixed categories and their display order
//! - [`item`]: Items, their store-assigned ids and clamped quantities
//! - [`list`]: The category → items root that gets persisted
//!
//! # Examples
//!
//! ```
//! use shoplist::domain::{Category, Item, ItemId, ShoppingList};
//!
//! let mut list = ShoppingList::new();
//! list.entry(Category::Dairy).push(Item::new(ItemId::new(1), "Milk"));
//! assert_eq!(list.items(Category::Dairy).len(), 1);
//! ```

pub mod category;
pub mod error;
pub mod item;
pub mod list;

pub use category::Category;
pub use error::{ImportError, Result, ShoplistError};
pub use item::{Item, ItemId, Quantity};
pub use list::ShoppingList;
