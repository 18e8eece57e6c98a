//! File and directory handles.
//!
//! An entry is a capability handle: a backing filesystem plus a path. It owns no data
//! and caches nothing; existence and metadata are queried from the backend on demand.
//! Two entries are equal when they point at the same backend instance and path.

use std::fmt;
use std::io;
use std::path::Path;
use tracing::{error, warn};

use crate::backend::{same_fs, FsRef, PhysicalFs};
use crate::env::Environment;
use crate::errors::{backend_error, Result, VfsError};
use crate::ops;
use crate::path::UPath;
use crate::platform::open_in_external_app;

/// Behavior shared by files and directories.
pub trait Entry {
    fn file_system(&self) -> &FsRef;
    fn path(&self) -> &UPath;
    fn exists(&self) -> bool;

    /// Last path segment; empty for the root.
    fn name(&self) -> &str {
        self.path().name().unwrap_or("")
    }

    fn full_name(&self) -> String {
        self.path().to_string()
    }

    fn parent(&self) -> Option<DirectoryEntry> {
        self.path()
            .parent()
            .map(|p| DirectoryEntry::new(self.file_system().clone(), p))
    }

    /// Ask the host to open the entry with its default application.
    /// Best effort: any failure is logged and reported as `false`.
    fn open_externally(&self) -> bool {
        if !self.exists() {
            warn!(path = %self.path(), "can't open missing entry externally");
            return false;
        }
        let Some(host) = self.file_system().host_path(self.path()) else {
            warn!(path = %self.path(), "entry has no host path; can't open it externally");
            return false;
        };
        match open_in_external_app(&host) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, path = %host.display(), "failed to open entry externally");
                false
            }
        }
    }
}

/// `false` for an absent handle, otherwise the entry's current existence.
pub fn exists<E: Entry>(entry: Option<&E>) -> bool {
    entry.is_some_and(|e| e.exists())
}

fn absolute(path: UPath) -> UPath {
    if path.is_absolute() { path } else { path.to_absolute() }
}

#[derive(Clone)]
pub struct DirectoryEntry {
    fs: FsRef,
    path: UPath,
}

impl DirectoryEntry {
    pub fn new(fs: FsRef, path: UPath) -> Self {
        Self {
            fs,
            path: absolute(path),
        }
    }

    pub fn root(fs: FsRef) -> Self {
        Self::new(fs, UPath::root())
    }

    /// Root entry of a filesystem rooted at a host directory (created if missing).
    pub fn from_host_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let fs = PhysicalFs::shared(dir).map_err(|source| VfsError::Backend {
            op: "open host directory",
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self::root(fs))
    }

    pub fn child_dir(&self, name: &str) -> DirectoryEntry {
        DirectoryEntry::new(self.fs.clone(), self.path.join(name))
    }

    pub fn child(&self, name: &str) -> FileEntry {
        FileEntry::new(self.fs.clone(), self.path.join(name))
    }

    /// Create the directory (and missing parents) unless it already exists.
    pub fn create(&self) -> Result<&Self> {
        if !self.exists() {
            self.fs
                .create_directory(&self.path)
                .map_err(backend_error("create directory", &self.path))?;
        }
        Ok(self)
    }

    pub fn directories(&self) -> Result<Vec<DirectoryEntry>> {
        let dirs = self
            .fs
            .enumerate_directories(&self.path)
            .map_err(backend_error("enumerate directories", &self.path))?;
        Ok(dirs
            .into_iter()
            .map(|p| DirectoryEntry::new(self.fs.clone(), p))
            .collect())
    }

    pub fn files(&self) -> Result<Vec<FileEntry>> {
        let files = self
            .fs
            .enumerate_files(&self.path)
            .map_err(backend_error("enumerate files", &self.path))?;
        Ok(files
            .into_iter()
            .map(|p| FileEntry::new(self.fs.clone(), p))
            .collect())
    }

    pub fn is_empty(&self) -> bool {
        ops::is_empty(self)
    }

    /// Recursive delete; `Ok(false)` if the directory did not exist.
    pub fn delete(&self) -> Result<bool> {
        ops::delete_dir(self, true)
    }

    pub fn copy_to(&self, target: &DirectoryEntry, replace_existing: bool) -> Result<bool> {
        ops::copy_dir(self, target, replace_existing)
    }

    /// Move onto `target`; on success this handle points at `target`.
    pub fn move_to(&mut self, target: &DirectoryEntry, env: &Environment) -> Result<bool> {
        ops::move_dir(self, target, env)
    }

    pub fn rename(&mut self, new_name: &str, env: &Environment) -> Result<bool> {
        ops::rename_dir(self, new_name, env)
    }
}

impl Entry for DirectoryEntry {
    fn file_system(&self) -> &FsRef {
        &self.fs
    }

    fn path(&self) -> &UPath {
        &self.path
    }

    fn exists(&self) -> bool {
        self.fs.directory_exists(&self.path)
    }
}

#[derive(Clone)]
pub struct FileEntry {
    fs: FsRef,
    path: UPath,
}

impl FileEntry {
    pub fn new(fs: FsRef, path: UPath) -> Self {
        Self {
            fs,
            path: absolute(path),
        }
    }

    /// Length in bytes.
    pub fn size(&self) -> Result<u64> {
        self.fs
            .file_length(&self.path)
            .map_err(backend_error("stat file", &self.path))
    }

    pub fn name_without_extension(&self) -> &str {
        self.path.name_without_extension().unwrap_or("")
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.extension()
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.fs
            .read_file(&self.path)
            .map_err(backend_error("read file", &self.path))
    }

    pub fn read_to_string(&self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| VfsError::Backend {
            op: "decode file as utf-8",
            path: self.path.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }

    /// Replace the file content, creating the parent directory when missing.
    pub fn write_bytes(&self, content: &[u8]) -> Result<()> {
        if let Some(parent) = self.parent() {
            parent.create()?;
        }
        self.fs
            .write_file(&self.path, content)
            .map_err(backend_error("write file", &self.path))
    }

    pub fn write_str(&self, content: &str) -> Result<()> {
        self.write_bytes(content.as_bytes())
    }

    /// `false` if the file did not exist or could not be removed.
    pub fn delete(&self) -> bool {
        ops::delete_file(self)
    }

    pub fn copy_to(&self, target: &FileEntry, overwrite: bool) -> Result<FileEntry> {
        ops::copy_file(self, target, overwrite)
    }

    /// Move onto `target`; on success this handle points at `target`.
    pub fn move_to(&mut self, target: &FileEntry) -> Result<bool> {
        ops::move_file(self, target)
    }

    pub fn move_into(&mut self, dir: &DirectoryEntry) -> Result<bool> {
        ops::move_file_into(self, dir)
    }

    pub fn rename(&mut self, new_name: &str) -> Result<bool> {
        ops::rename_file(self, new_name)
    }
}

impl Entry for FileEntry {
    fn file_system(&self) -> &FsRef {
        &self.fs
    }

    fn path(&self) -> &UPath {
        &self.path
    }

    fn exists(&self) -> bool {
        self.fs.file_exists(&self.path)
    }
}

macro_rules! entry_common_impls {
    ($ty:ident) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.path == other.path && same_fs(&self.fs, &other.fs)
            }
        }

        impl Eq for $ty {}

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.path.to_string()).finish()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.path, f)
            }
        }
    };
}

entry_common_impls!(DirectoryEntry);
entry_common_impls!(FileEntry);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryFs;

    #[test]
    fn child_handles_are_pure() {
        let root = DirectoryEntry::root(MemoryFs::shared());
        let dir = root.child_dir("TestDir 1");
        assert_eq!(dir.full_name(), "/TestDir 1");
        assert!(!dir.exists());
        let also = dir.parent().unwrap().child_dir("TestDir 1");
        assert_eq!(dir, also);
        assert_eq!(dir.child("f.txt").full_name(), "/TestDir 1/f.txt");
    }

    #[test]
    fn equality_requires_same_backend_instance() {
        let a = DirectoryEntry::root(MemoryFs::shared()).child_dir("x");
        let b = DirectoryEntry::root(MemoryFs::shared()).child_dir("x");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn absent_handle_does_not_exist() {
        let none: Option<&FileEntry> = None;
        assert!(!exists(none));
        let root = DirectoryEntry::root(MemoryFs::shared());
        assert!(exists(Some(&root)));
    }

    #[test]
    fn create_is_idempotent() {
        let root = DirectoryEntry::root(MemoryFs::shared());
        let dir = root.child_dir("a").child_dir("b");
        assert!(dir.create().unwrap().exists());
        dir.create().unwrap();
        assert!(root.child_dir("a").exists());
    }

    #[test]
    fn file_metadata() {
        let root = DirectoryEntry::root(MemoryFs::shared());
        let file = root.child_dir("docs").child("report.final.txt");
        file.write_str("hello").unwrap();
        assert_eq!(file.size().unwrap(), 5);
        assert_eq!(file.name(), "report.final.txt");
        assert_eq!(file.name_without_extension(), "report.final");
        assert_eq!(file.extension(), Some("txt"));
        assert_eq!(file.read_to_string().unwrap(), "hello");
    }

    #[test]
    fn open_externally_is_false_without_host_path() {
        let root = DirectoryEntry::root(MemoryFs::shared());
        let file = root.child("a.txt");
        assert!(!file.open_externally());
        file.write_str("x").unwrap();
        assert!(!file.open_externally());
    }
}
