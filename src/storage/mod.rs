//! Storage layer: the persistence adapter behind the item store.
//!
//! # Modules
//!
//! - `backend`: the [`Storage`] trait and the fixed list key
//! - `json`: local key-value JSON file implementation
//! - `memory`: in-memory implementation for tests and ephemeral runs

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::{Storage, LIST_KEY};
pub use json::{JsonStorage, STORE_FILE_NAME};
pub use memory::MemoryStorage;
