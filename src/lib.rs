//! Shoplist: a categorized shopping-list manager with lockable drag reordering.
//!
//! Shoplist provides:
//! - Nine fixed categories of items with selection and 0-9 quantities
//! - Drag-to-reorder within a category, by pointer drag or touch long-press
//! - A lock mode that gates reordering without disabling editing
//! - JSON export/import and a plain-text share summary with clipboard fallback
//! - Persistence in a local key-value JSON file with atomic writes
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Host (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Command parsing, session runtime                 │
//! │  - Event handling, action dispatching               │
//! │  - Item store, lock mode, timers                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Gesture       │   │ Storage Layer │   │ Share Layer   │
//! │ (gesture/)    │   │ (storage/)    │   │ (share/)      │
//! │ - Phases      │   │ - JSON K/V    │   │ - Share text  │
//! │ - Insertion   │   │ - In-memory   │   │ - Export/import│
//! │ - Commit      │   │ - Backend API │   │ - Clipboard   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  UI Layer (ui/)                                     │
//! │  - Render tree with geometry                        │
//! │  - ANSI drawing and themes                          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Domain & Observability             │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Categories, items, errors (domain/)              │
//! │  - Rotating log file (observability/)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (categories, items, errors)
//! - [`gesture`]: The drag-reorder engine
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Persistence adapters
//! - [`share`]: Share text, export/import and clipboard
//! - [`ui`]: Render tree and terminal drawing
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Read from `<config dir>/shoplist/config.toml` (or `--config`), every key
//! optional:
//!
//! ```toml
//! data_dir = "~/.local/share/shoplist"
//! export_dir = "~/Downloads"
//! trace_level = "debug"
//! long_press_ms = 500
//! row_height = 40.0
//! header_height = 32.0
//! theme = "latte"
//! clipboard = ["system", "osc52"]
//! ```
//!
//! # Examples
//!
//! ```
//! use shoplist::app::command::parse_command;
//! use shoplist::share::ClipboardChain;
//! use shoplist::storage::MemoryStorage;
//! use shoplist::{Category, Config, Session};
//!
//! let mut session = Session::start(
//!     &Config::default(),
//!     Box::new(MemoryStorage::default()),
//!     ClipboardChain::default(),
//! );
//!
//! for line in ["add general A", "add general B", "lock", "drag-start general B"] {
//!     if let Some(command) = parse_command(line).unwrap() {
//!         session.apply(command);
//!     }
//! }
//! let above_a = session.state().tree.node(
//!     session.state().store.find_id(Category::General, "A").unwrap(),
//! ).unwrap().top;
//! session.apply(parse_command(&format!("drag-over @{above_a}")).unwrap().unwrap());
//! session.apply(parse_command("drag-end").unwrap().unwrap());
//!
//! assert_eq!(session.state().store.items(Category::General)[0].name, "B");
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod gesture;
pub mod infrastructure;
pub mod observability;
pub mod share;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Notice, Session};
pub use domain::{Category, ImportError, Item, ItemId, Quantity, Result, ShoplistError, ShoppingList};
pub use ui::Theme;

use crate::ui::tree::LayoutMetrics;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// Sources in increasing precedence: these defaults, the TOML config file,
/// command-line flags (applied by the binary).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `store.json` and `shoplist.log`.
    ///
    /// `~` is expanded. Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Directory exports are written to. Default: the current directory.
    pub export_dir: Option<PathBuf>,

    /// Log level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Press duration that turns a touch into a drag. Default: 500
    pub long_press_ms: u64,

    /// Height of one item row. Default: 40.0
    pub row_height: f64,

    /// Height of a category header. Default: 32.0
    pub header_height: f64,

    /// Built-in theme name, `mocha` or `latte`. Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Clipboard strategies in the order they are tried.
    pub clipboard: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let metrics = LayoutMetrics::default();
        Self {
            data_dir: None,
            export_dir: None,
            trace_level: None,
            long_press_ms: gesture::LONG_PRESS_DELAY_MS,
            row_height: metrics.row_height,
            header_height: metrics.header_height,
            theme: None,
            theme_file: None,
            clipboard: vec!["system".to_string(), "osc52".to_string()],
        }
    }
}

impl Config {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Returns [`ShoplistError::Config`] on invalid TOML or out-of-range values.
    ///
    /// ```
    /// use shoplist::Config;
    ///
    /// let config = Config::from_toml_str("long_press_ms = 300\ntheme = \"latte\"")?;
    /// assert_eq!(config.long_press_ms, 300);
    /// assert_eq!(config.row_height, 40.0);
    /// # Ok::<(), shoplist::ShoplistError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| ShoplistError::Config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShoplistError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads the config from `explicit`, or from the default location if it exists.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match infrastructure::default_config_file() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ShoplistError::Config`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ShoplistError::Config("row_height must be positive".to_string()));
        }
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            return Err(ShoplistError::Config(
                "header_height must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            row_height: self.row_height,
            header_height: self.header_height,
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::get_data_dir, infrastructure::expand_path)
    }

    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map_or_else(|| PathBuf::from("."), infrastructure::expand_path)
    }

    /// Resolves the configured theme: file first, then name, then the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }
        self.theme.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the application state for a loaded list.
///
/// ```
/// use shoplist::{initialize, Config, ShoppingList};
///
/// let state = initialize(&Config::default(), ShoppingList::new());
/// assert!(state.lock.is_locked());
/// assert_eq!(state.tree.containers().len(), 9);
/// ```
#[must_use]
pub fn initialize(config: &Config, list: ShoppingList) -> AppState {
    tracing::debug!(items = list.item_count(), "initializing shoplist");
    AppState::new(
        list,
        config.layout_metrics(),
        config.long_press_ms,
        config.load_theme(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_the_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn bad_metrics_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("row_height = 0.0"),
            Err(ShoplistError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("header_height = -1.0"),
            Err(ShoplistError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("long_press_ms = \"soon\""),
            Err(ShoplistError::Config(_))
        ));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export_dir = \"/tmp/lists\"\nclipboard = [\"osc52\"]").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/lists"));
        assert_eq!(config.clipboard, ["osc52"]);
    }

    #[test]
    fn theme_file_wins_over_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.toml");
        let mut custom = Theme::from_name("latte").unwrap();
        custom.name = "mine".into();
        std::fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let config = Config {
            theme: Some("mocha".into()),
            theme_file: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "mine");
        assert_eq!(Config { theme: Some("nope".into()), ..Config::default() }.load_theme().name, "mocha");
    }
}
