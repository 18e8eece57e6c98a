//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::{APP_NAME_DEFAULT, SCRATCH_FOLDER_DEFAULT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the environment and logging.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder name used under the temp and app-data roots
    pub app_name: String,
    /// Host directory backing temp folders (scratch copies live here)
    pub temp_root: PathBuf,
    /// Host directory backing app-data folders
    pub app_data_root: PathBuf,
    /// Temp folder holding scratch copies made before guarded moves
    pub scratch_folder: String,
    /// Guard every directory move with a scratch copy, even on reliable backends
    pub force_emulated_move: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Emit JSON log lines instead of the compact format
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_app(APP_NAME_DEFAULT)
    }
}

impl Config {
    /// Defaults with all roots derived from `app_name`.
    pub fn for_app(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            temp_root: paths::default_temp_root(&app_name),
            app_data_root: paths::default_app_data_root(&app_name),
            app_name,
            scratch_folder: SCRATCH_FOLDER_DEFAULT.to_string(),
            force_emulated_move: false,
            log_level: LogLevel::Normal,
            log_file: None,
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parse_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Normal));
        assert_eq!(LogLevel::parse("Verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert!("loud".parse::<LogLevel>().unwrap_err().contains("invalid log level"));
    }

    #[test]
    fn log_level_display_round_trips() {
        for lvl in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(lvl.to_string().parse::<LogLevel>().unwrap(), lvl);
        }
    }

    #[test]
    fn roots_follow_app_name() {
        let cfg = Config::for_app("demo_app");
        assert!(cfg.temp_root.ends_with("demo_app"));
        assert!(cfg.app_data_root.ends_with("demo_app"));
        assert_eq!(cfg.scratch_folder, "TmpCopies");
        assert!(!cfg.force_emulated_move);
    }
}
