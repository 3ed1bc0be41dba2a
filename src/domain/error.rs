//! Error types for the shopping-list manager.
//!
//! This module defines the centralized error type [`ShoplistError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Import failures get
//! their own [`ImportError`] because they are reported to the user rather than
//! propagated: a bad file must never disturb the list that is already loaded.

use thiserror::Error;

/// The main error type for shopping-list operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion. None of them is fatal to the event loop; callers log or
/// report them and return to an idle state.
///
/// # Examples
///
/// ```
/// use shoplist::ShoplistError;
///
/// fn read_config() -> Result<(), ShoplistError> {
///     Err(ShoplistError::Config("row_height must be positive".to_string()))
/// }
///
/// assert!(read_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ShoplistError {
    /// Storage operation failed.
    ///
    /// Occurs when the key-value file cannot be parsed or a stored value is
    /// not a valid shopping list.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A category name did not match any of the fixed categories.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Importing a shopping list failed.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Every clipboard strategy failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Reasons an import can be refused.
///
/// The store is left untouched whenever one of these is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The file could not be read.
    #[error("Import failed: cannot read file ({0})")]
    Read(String),

    /// The file is not valid JSON.
    #[error("Import failed: the file is not valid JSON ({0})")]
    Parse(String),

    /// The file is JSON but not a shopping list object.
    #[error("Import failed: invalid shopping list format ({0})")]
    Format(String),
}

/// A specialized `Result` type for shopping-list operations.
pub type Result<T> = std::result::Result<T, ShoplistError>;
