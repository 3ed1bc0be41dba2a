//! Platform directory lookup and tilde expansion.
//!
//! Locations follow the platform conventions exposed by the `dirs` crate
//! (`~/.local/share` and `~/.config` on Linux, `~/Library/...` on macOS,
//! `%APPDATA%` on Windows), each with a `shoplist` subdirectory.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "shoplist";

/// Returns the data directory holding `store.json` and `shoplist.log`.
///
/// Falls back to `./.shoplist` when the platform has no data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".shoplist"), |dir| dir.join(APP_DIR))
}

/// Returns the default config file path, if the platform has a config directory.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use shoplist::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/lists"), home.join("lists"));
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Expands a configured directory, accepting `Path` input.
#[must_use]
pub fn expand_path(path: &Path) -> PathBuf {
    path.to_str().map_or_else(|| path.to_path_buf(), expand_tilde)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        let dir = get_data_dir();
        assert!(dir.ends_with(APP_DIR) || dir == PathBuf::from(".shoplist"));
    }

    #[test]
    fn non_tilde_paths_are_untouched() {
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
        assert_eq!(expand_tilde("~user/dir"), PathBuf::from("~user/dir"));
        assert_eq!(expand_path(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
    }
}
