//! Decorator reproducing a broken native directory move.
//!
//! Some platforms implement a directory move that removes the source but never
//! materializes the destination. `UnreliableMoveFs` wraps any backend and behaves
//! exactly like it except for `move_directory`, which deletes the source tree and
//! reports success. It also reports `native_move_is_reliable() == false`.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use super::{already_exists, not_found, FileSystem, FsRef};
use crate::path::UPath;

#[derive(Debug)]
pub struct UnreliableMoveFs<F> {
    inner: F,
    leave_empty_source: bool,
}

impl<F: FileSystem + 'static> UnreliableMoveFs<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            leave_empty_source: false,
        }
    }

    /// Keep an empty directory at the source path after a move, like some
    /// platforms do when only the contents get dropped.
    pub fn leaving_empty_source(mut self, leave: bool) -> Self {
        self.leave_empty_source = leave;
        self
    }

    pub fn shared(self) -> FsRef {
        Arc::new(self)
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn remove_tree(&self, path: &UPath) -> io::Result<()> {
        for dir in self.inner.enumerate_directories(path)? {
            self.remove_tree(&dir)?;
        }
        for file in self.inner.enumerate_files(path)? {
            self.inner.delete_file(&file)?;
        }
        self.inner.delete_directory(path)
    }
}

impl<F: FileSystem + 'static> FileSystem for UnreliableMoveFs<F> {
    fn native_move_is_reliable(&self) -> bool {
        false
    }

    fn directory_exists(&self, path: &UPath) -> bool {
        self.inner.directory_exists(path)
    }

    fn file_exists(&self, path: &UPath) -> bool {
        self.inner.file_exists(path)
    }

    fn file_length(&self, path: &UPath) -> io::Result<u64> {
        self.inner.file_length(path)
    }

    fn enumerate_directories(&self, path: &UPath) -> io::Result<Vec<UPath>> {
        self.inner.enumerate_directories(path)
    }

    fn enumerate_files(&self, path: &UPath) -> io::Result<Vec<UPath>> {
        self.inner.enumerate_files(path)
    }

    fn create_directory(&self, path: &UPath) -> io::Result<()> {
        self.inner.create_directory(path)
    }

    fn delete_directory(&self, path: &UPath) -> io::Result<()> {
        self.inner.delete_directory(path)
    }

    fn delete_file(&self, path: &UPath) -> io::Result<()> {
        self.inner.delete_file(path)
    }

    fn move_directory(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        if !self.inner.directory_exists(src) {
            return Err(not_found(src));
        }
        if self.inner.directory_exists(dest) || self.inner.file_exists(dest) {
            return Err(already_exists(dest));
        }
        self.remove_tree(src)?;
        if self.leave_empty_source {
            self.inner.create_directory(src)?;
        }
        Ok(())
    }

    fn move_file(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        self.inner.move_file(src, dest)
    }

    fn copy_file(&self, src: &UPath, dest: &UPath, overwrite: bool) -> io::Result<()> {
        self.inner.copy_file(src, dest, overwrite)
    }

    fn read_file(&self, path: &UPath) -> io::Result<Vec<u8>> {
        self.inner.read_file(path)
    }

    fn write_file(&self, path: &UPath, content: &[u8]) -> io::Result<()> {
        self.inner.write_file(path, content)
    }

    fn host_path(&self, path: &UPath) -> Option<PathBuf> {
        self.inner.host_path(path)
    }
}
