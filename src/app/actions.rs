//! Actions representing side effects to be executed by the session runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing an event. Actions bridge pure state
//! transformations and effectful operations: persistence, timers, the
//! clipboard, the export file and user notices.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several side effects can be queued atomically. [`Session`] executes them in
//! order.
//!
//! [`Session`]: crate::app::session::Session
//!
//! # Example
//!
//! ```
//! use shoplist::app::{Action, Notice};
//!
//! let actions = vec![Action::Persist, Action::Notify(Notice::ShareEmpty)];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::ImportError;
use crate::gesture::TimerId;
use std::fmt;
use std::path::PathBuf;

/// Commands representing side effects to be executed by the session runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Saves the whole list through the storage backend.
    ///
    /// Fire-and-forget: a failed save is logged and the event still completes.
    Persist,

    /// Arms a long-press timer on the session clock.
    ScheduleTimer {
        /// Timer identity, echoed back when it fires.
        id: TimerId,
        /// Delay from the current clock reading.
        delay_ms: u64,
    },

    /// Disarms a pending timer. Unknown ids are ignored.
    CancelTimer(TimerId),

    /// Shows a message to the user.
    Notify(Notice),

    /// Runs the clipboard chain on the given text.
    CopyToClipboard(String),

    /// Writes the export file into the export directory.
    WriteExport {
        /// Pretty-printed JSON of the list.
        contents: String,
    },
}

/// User-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Share requested but every item is selected or the list is empty.
    ShareEmpty,
    /// The share text is ready to copy.
    ShareReady,
    Copied { strategy: String },
    CopyFailed,
    Exported { path: PathBuf },
    ExportFailed { reason: String },
    Imported { items: usize },
    ImportFailed(ImportError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShareEmpty => f.write_str("The list is empty! Add items to share."),
            Self::ShareReady => f.write_str("Share text ready. Use `copy` to copy it or `close` to dismiss."),
            Self::Copied { strategy } => {
                write!(f, "List copied to the clipboard ({strategy}). Paste it into a chat or mail.")
            }
            Self::CopyFailed => f.write_str("Copy failed: automatic copying did not work, copy the text manually."),
            Self::Exported { path } => write!(f, "Shopping list exported to {}", path.display()),
            Self::ExportFailed { reason } => write!(f, "Export failed: {reason}"),
            Self::Imported { items } => write!(f, "Shopping list imported ({items} items)."),
            Self::ImportFailed(error) => write!(f, "{error}"),
        }
    }
}
