//! XDG directory helpers for config/data locations.

use std::cell::RefCell;
use std::path::PathBuf;

/// File name of the single persisted state document. The versioned name is
/// the storage key: older schema revisions wrote the same document shape
/// under the same key and are migrated on load, never side-by-side.
pub const STATE_FILE: &str = "forge_data_v1.json";

/// Base directory for persistent data (the state document).
///
/// Uses `FORGE_DATA_DIR` if set, otherwise `$XDG_DATA_HOME/forge-log` or
/// `~/.local/share/forge-log`.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = thread_local_data_dir_override() {
        return dir;
    }

    if let Ok(dir) = std::env::var("FORGE_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    std::env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("forge-log")
}

/// Path of the persisted state document.
pub fn state_path() -> PathBuf {
    data_dir().join(STATE_FILE)
}

/// Base directory for configuration files.
///
/// Uses `FORGE_CONFIG_DIR` if set, otherwise `$XDG_CONFIG_HOME/forge-log` or
/// `~/.config/forge-log`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FORGE_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("forge-log")
}

#[doc(hidden)]
pub struct DataDirOverride {
    prev: Option<PathBuf>,
}

impl DataDirOverride {
    pub fn new(path: Option<PathBuf>) -> Self {
        let prev = DATA_DIR_OVERRIDE.with(|cell| cell.replace(path));
        Self { prev }
    }
}

impl Drop for DataDirOverride {
    fn drop(&mut self) {
        let prev = self.prev.take();
        DATA_DIR_OVERRIDE.with(|cell| {
            cell.replace(prev);
        });
    }
}

/// Redirect `data_dir()` for the current thread; tests use this to run
/// against temp directories in parallel.
#[doc(hidden)]
pub fn override_data_dir_for_tests(path: Option<PathBuf>) -> DataDirOverride {
    DataDirOverride::new(path)
}

fn thread_local_data_dir_override() -> Option<PathBuf> {
    DATA_DIR_OVERRIDE.with(|cell| cell.borrow().clone())
}

thread_local! {
    static DATA_DIR_OVERRIDE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}
