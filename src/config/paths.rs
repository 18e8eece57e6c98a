//! Default path helpers and symlink checks.
//! Determines OS-appropriate temp/app-data/config/log paths and detects symlinked ancestors.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{APP_NAME_DEFAULT, CONFIG_ENV};

/// Per-application folder inside the system temp directory.
pub fn default_temp_root(app_name: &str) -> PathBuf {
    env::temp_dir().join(app_name)
}

/// Per-application folder inside the user's data directory.
pub fn default_app_data_root(app_name: &str) -> PathBuf {
    match data_dir() {
        Some(base) => base.join(app_name),
        None => env::var("HOME")
            .map(|h| PathBuf::from(h).join(".local").join("share").join(app_name))
            .unwrap_or_else(|_| default_temp_root(app_name).join("app_data")),
    }
}

/// Config file location: `$VFS_MOVE_CONFIG` if set, else `<config dir>/vfs_move/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    config_dir().map(|base| base.join(APP_NAME_DEFAULT).join("config.xml"))
}

/// Default log file inside the app-data root.
pub fn default_log_path(app_name: &str) -> PathBuf {
    default_app_data_root(app_name).join(format!("{app_name}.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
