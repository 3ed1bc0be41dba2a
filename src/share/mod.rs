//! Share, export and import: everything that takes the list out of the app
//! or brings one in.
//!
//! # Modules
//!
//! - [`text`]: the plain-text share summary
//! - [`transfer`]: JSON export file and lenient import
//! - [`clipboard`]: the clipboard fallback chain

pub mod clipboard;
pub mod text;
pub mod transfer;

pub use clipboard::{ClipboardChain, ClipboardError, ClipboardStrategy, CommandClipboard, Osc52Clipboard};
pub use text::{share_text, SHARE_HEADER};
pub use transfer::{export_json, import_json, read_import, write_export, EXPORT_FILE_NAME};
