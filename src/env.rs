//! Environment context: where temp and app-data folders live.
//!
//! Passed explicitly to the operations that need scratch space (directory moves)
//! instead of being a process-wide singleton, so tests can inject any backend.

use anyhow::{Context, Result as AnyResult};

use crate::backend::MemoryFs;
use crate::config::{Config, SCRATCH_FOLDER_DEFAULT};
use crate::entry::DirectoryEntry;
use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct Environment {
    temp_root: DirectoryEntry,
    app_data_root: DirectoryEntry,
    scratch_folder: String,
    force_emulated_move: bool,
}

impl Environment {
    pub fn new(temp_root: DirectoryEntry, app_data_root: DirectoryEntry) -> Self {
        Self {
            temp_root,
            app_data_root,
            scratch_folder: SCRATCH_FOLDER_DEFAULT.to_string(),
            force_emulated_move: false,
        }
    }

    /// Both roots on a fresh in-memory filesystem (`/tmp` and `/app_data`).
    pub fn in_memory() -> Self {
        let root = DirectoryEntry::root(MemoryFs::shared());
        Self::new(root.child_dir("tmp"), root.child_dir("app_data"))
    }

    /// Roots on the host, as described by `cfg`. Validates the config first.
    pub fn from_config(cfg: &Config) -> AnyResult<Self> {
        cfg.validate()?;
        let temp_root = DirectoryEntry::from_host_dir(&cfg.temp_root)
            .with_context(|| format!("open temp root '{}'", cfg.temp_root.display()))?;
        let app_data_root = DirectoryEntry::from_host_dir(&cfg.app_data_root)
            .with_context(|| format!("open app data root '{}'", cfg.app_data_root.display()))?;
        Ok(Self::new(temp_root, app_data_root)
            .with_scratch_folder(cfg.scratch_folder.clone())
            .forcing_emulated_move(cfg.force_emulated_move))
    }

    pub fn with_scratch_folder(mut self, name: impl Into<String>) -> Self {
        self.scratch_folder = name.into();
        self
    }

    /// Guard every directory move with a scratch copy, whatever the backend reports.
    pub fn forcing_emulated_move(mut self, force: bool) -> Self {
        self.force_emulated_move = force;
        self
    }

    pub fn force_emulated_move(&self) -> bool {
        self.force_emulated_move
    }

    pub fn temp_root(&self) -> &DirectoryEntry {
        &self.temp_root
    }

    pub fn app_data_root(&self) -> &DirectoryEntry {
        &self.app_data_root
    }

    pub fn get_or_create_temp_folder(&self, name: &str) -> Result<DirectoryEntry> {
        let dir = self.temp_root.child_dir(name);
        dir.create()?;
        Ok(dir)
    }

    pub fn get_or_create_app_data_folder(&self, name: &str) -> Result<DirectoryEntry> {
        let dir = self.app_data_root.child_dir(name);
        dir.create()?;
        Ok(dir)
    }

    /// Folder that holds all scratch copies.
    pub fn scratch_root(&self) -> Result<DirectoryEntry> {
        self.get_or_create_temp_folder(&self.scratch_folder)
    }

    /// Scratch directory for one move attempt. Only the parent is created.
    pub fn scratch_dir(&self, token: &str) -> Result<DirectoryEntry> {
        Ok(self.scratch_root()?.child_dir(token))
    }
}
