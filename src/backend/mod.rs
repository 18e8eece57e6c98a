//! Backing filesystems.
//! An entry is always bound to one `FileSystem` instance; everything the core needs
//! from storage goes through this trait so backends can differ in semantics.
//!
//! Conventions every backend follows:
//! - Paths are absolute `UPath`s inside the backend.
//! - `create_directory` creates missing parents and is a no-op for existing directories.
//! - `delete_directory` only removes empty directories.
//! - `move_*` fail with `AlreadyExists` when the destination is taken.
//! - `copy_file` requires the destination's parent directory to exist.

mod memory;
mod physical;
mod unreliable;

pub use memory::MemoryFs;
pub use physical::PhysicalFs;
pub use unreliable::UnreliableMoveFs;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::path::UPath;

/// Shared handle to a backing filesystem. Identity is the allocation, not the contents.
pub type FsRef = Arc<dyn FileSystem>;

pub trait FileSystem: fmt::Debug + Send + Sync {
    /// Whether `move_directory` reliably materializes the destination.
    /// When false, directory moves are guarded by a scratch copy and verified afterwards.
    fn native_move_is_reliable(&self) -> bool {
        true
    }

    fn directory_exists(&self, path: &UPath) -> bool;
    fn file_exists(&self, path: &UPath) -> bool;
    fn file_length(&self, path: &UPath) -> io::Result<u64>;

    /// Child directories of `path`, as full paths. Each call re-reads the backend.
    fn enumerate_directories(&self, path: &UPath) -> io::Result<Vec<UPath>>;
    /// Child files of `path`, as full paths. Each call re-reads the backend.
    fn enumerate_files(&self, path: &UPath) -> io::Result<Vec<UPath>>;

    fn create_directory(&self, path: &UPath) -> io::Result<()>;
    fn delete_directory(&self, path: &UPath) -> io::Result<()>;
    fn delete_file(&self, path: &UPath) -> io::Result<()>;

    fn move_directory(&self, src: &UPath, dest: &UPath) -> io::Result<()>;
    fn move_file(&self, src: &UPath, dest: &UPath) -> io::Result<()>;
    fn copy_file(&self, src: &UPath, dest: &UPath, overwrite: bool) -> io::Result<()>;

    fn read_file(&self, path: &UPath) -> io::Result<Vec<u8>>;
    /// Create or truncate `path` with `content`. The parent directory must exist.
    fn write_file(&self, path: &UPath, content: &[u8]) -> io::Result<()>;

    /// Host path for `path` when the backend is disk-backed.
    fn host_path(&self, _path: &UPath) -> Option<PathBuf> {
        None
    }
}

/// True if both handles point at the same backend instance.
pub fn same_fs(a: &FsRef, b: &FsRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

pub(crate) fn not_found(path: &UPath) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("'{path}' does not exist"))
}

pub(crate) fn already_exists(path: &UPath) -> io::Error {
    io::Error::new(io::ErrorKind::AlreadyExists, format!("'{path}' already exists"))
}
