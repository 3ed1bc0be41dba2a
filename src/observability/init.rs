//! Tracing initialization and subscriber setup.
//!
//! Installs a `tracing-subscriber` registry with an env filter and a fmt
//! layer that writes plain-text lines to a rotating log file in the data
//! directory. Nothing is written to the terminal, which belongs to the list
//! view.

use super::file_writer::{FileWriter, LogSink};
use crate::Config;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "shoplist.log";

/// Initializes the tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates `data_dir` if it doesn't exist
/// - Silently does nothing if directory creation fails (logging is optional)
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use shoplist::observability::init_tracing;
/// use shoplist::Config;
///
/// let config = Config { trace_level: Some("debug".to_string()), ..Default::default() };
/// init_tracing(&config, &config.data_dir());
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config, data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let writer = Arc::new(FileWriter::new(data_dir.join(LOG_FILE_NAME)));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(move || LogSink(Arc::clone(&writer)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
