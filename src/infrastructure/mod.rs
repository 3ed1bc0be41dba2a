//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the store, the log file and the config file live.

pub mod paths;

pub use paths::{default_config_file, expand_path, expand_tilde, get_data_dir};
