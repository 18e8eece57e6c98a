//! Config validation logic.
//! Verifies that the temp and app-data roots are usable directories and that
//! folder names are single path segments.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;

impl Config {
    /// Validate names and make sure both roots exist (creating them if needed).
    pub fn validate(&self) -> Result<()> {
        ensure_single_segment(&self.app_name, "app_name")?;
        ensure_single_segment(&self.scratch_folder, "scratch_folder")?;

        ensure_dir_is_or_create(&self.temp_root, "temp_root")?;
        ensure_dir_is_or_create(&self.app_data_root, "app_data_root")?;

        info!(
            "Config validated: temp_root='{}' app_data_root='{}' scratch='{}'",
            self.temp_root.display(),
            self.app_data_root.display(),
            self.scratch_folder
        );
        Ok(())
    }
}

fn ensure_single_segment(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        error!("{name} is empty");
        bail!("{name} must not be empty");
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        error!("{name} is not a plain folder name: {value}");
        bail!("{name} must be a plain folder name, got '{value}'");
    }
    Ok(())
}

/// Ensure directory exists (create if missing). If it exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
        debug!("{name} exists: {}", path.display());
    } else {
        fs::create_dir_all(path).with_context(|| {
            format!("Failed to create {name} directory '{}'", path.display())
        })?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}
