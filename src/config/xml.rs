//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - `$VFS_MOVE_CONFIG` selects the file; `$VFS_MOVE_FORCE_EMULATED_MOVE` overrides the move mode.
//!
//! Example:
//! <config>
//!   <app_name>my_app</app_name>
//!   <temp_root>/tmp/my_app</temp_root>
//!   <scratch_folder>TmpCopies</scratch_folder>
//!   <force_emulated_move>true</force_emulated_move>
//!   <log_level>debug</log_level>
//! </config>
//!
//! Unknown XML fields are rejected so misconfigurations surface early.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::paths::{default_app_data_root, default_config_path, default_temp_root};
use super::types::{Config, LogLevel};
use super::{APP_NAME_DEFAULT, CONFIG_ENV, FORCE_EMULATED_MOVE_ENV};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    app_name: Option<String>,
    temp_root: Option<String>,
    app_data_root: Option<String>,
    scratch_folder: Option<String>,
    force_emulated_move: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    log_json: Option<bool>,
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config; unset fields keep defaults derived from the app name.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let app_name = trimmed(parsed.app_name.as_deref()).unwrap_or(APP_NAME_DEFAULT);
    let mut cfg = Config::for_app(app_name);

    cfg.temp_root = trimmed(parsed.temp_root.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_temp_root(app_name));
    cfg.app_data_root = trimmed(parsed.app_data_root.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_app_data_root(app_name));
    if let Some(folder) = trimmed(parsed.scratch_folder.as_deref()) {
        cfg.scratch_folder = folder.to_string();
    }
    cfg.log_file = trimmed(parsed.log_file.as_deref()).map(PathBuf::from);

    if let Some(s) = trimmed(parsed.log_level.as_deref()) {
        match s.parse::<LogLevel>() {
            Ok(level) => cfg.log_level = level,
            Err(e) => warn!("{e}; keeping '{}'", cfg.log_level),
        }
    }

    cfg.force_emulated_move = parsed.force_emulated_move.unwrap_or(false);
    cfg.log_json = parsed.log_json.unwrap_or(false);
    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Resolve the effective Config:
/// 1) `$VFS_MOVE_CONFIG` or the platform default config.xml, when it exists;
/// 2) built-in defaults otherwise;
/// then environment overrides on top.
pub fn load_config() -> Result<Config> {
    let mut cfg = match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Using config from {}", path.display());
            load_config_from_xml_path(&path)?
        }
        Some(path) if env::var_os(CONFIG_ENV).is_some() => {
            bail!("config file named by {CONFIG_ENV} does not exist: {}", path.display());
        }
        _ => Config::default(),
    };
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = env::var(FORCE_EMULATED_MOVE_ENV) {
        cfg.force_emulated_move = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
    }
}
