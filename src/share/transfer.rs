//! JSON export and import of the whole list.
//!
//! Export writes the list verbatim, pretty-printed, in the same shape the
//! storage layer persists. Import is deliberately forgiving about content
//! (unknown categories are skipped, missing fields get defaults, quantities are
//! clamped) but strict about shape: anything that is not an object of item
//! arrays is refused and the current list stays as it is.

use crate::domain::error::{ImportError, Result};
use crate::domain::{Category, Item, ShoppingList};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name used for every export.
pub const EXPORT_FILE_NAME: &str = "shoppingList_data.json";

/// Serializes the list as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(list: &ShoppingList) -> Result<String> {
    Ok(serde_json::to_string_pretty(list)?)
}

/// Writes an export into `dir`, creating it if needed, and returns the file path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_export(dir: &Path, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, contents)?;
    tracing::debug!(path = ?path, bytes = contents.len(), "export written");
    Ok(path)
}

/// Reads an import file.
///
/// # Errors
///
/// Returns [`ImportError::Read`] if the file cannot be read as UTF-8 text.
pub fn read_import(path: &Path) -> std::result::Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|e| ImportError::Read(format!("{}: {e}", path.display())))
}

/// Parses an imported file into a list that replaces the current one.
///
/// # Errors
///
/// - [`ImportError::Parse`] if `contents` is not JSON
/// - [`ImportError::Format`] if it is JSON but not an object whose values are
///   item arrays
///
/// ```
/// use shoplist::share::import_json;
/// use shoplist::ImportError;
///
/// assert!(matches!(import_json("\"hello\""), Err(ImportError::Format(_))));
/// assert!(matches!(import_json("{"), Err(ImportError::Parse(_))));
/// ```
pub fn import_json(contents: &str) -> std::result::Result<ShoppingList, ImportError> {
    let value: Value =
        serde_json::from_str(contents).map_err(|e| ImportError::Parse(e.to_string()))?;

    let Value::Object(entries) = value else {
        return Err(ImportError::Format(format!(
            "expected an object of categories, found {}",
            kind(&value)
        )));
    };

    let mut list = ShoppingList::new();
    for (key, items) in entries {
        let Some(category) = Category::from_name(&key) else {
            tracing::warn!(key = %key, "skipping unknown category in import");
            continue;
        };

        let items: Vec<Item> = serde_json::from_value(items)
            .map_err(|e| ImportError::Format(format!("category {category}: {e}")))?;

        let mut seen = HashSet::new();
        let items: Vec<Item> = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.name.clone());
                if !fresh {
                    tracing::warn!(%category, name = %item.name, "dropping duplicate imported item");
                }
                fresh
            })
            .collect();

        list.entry(category).extend(items);
    }

    tracing::debug!(items = list.item_count(), "import parsed");
    Ok(list)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
