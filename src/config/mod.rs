//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{
    default_app_data_root, default_config_path, default_log_path, default_temp_root,
    path_has_symlink_ancestor,
};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Defaults shared across submodules.
pub const APP_NAME_DEFAULT: &str = "vfs_move";
pub const SCRATCH_FOLDER_DEFAULT: &str = "TmpCopies";

/// Names an XML config file to load instead of the platform default.
pub const CONFIG_ENV: &str = "VFS_MOVE_CONFIG";
/// When set to `1`/`true`, directory moves always take the guarded (scratch copy) path.
pub const FORCE_EMULATED_MOVE_ENV: &str = "VFS_MOVE_FORCE_EMULATED_MOVE";
