//! Host directory exposed as a rooted filesystem.
//! Virtual `/` maps to the root directory given at construction; nothing outside it
//! is reachable because `UPath` never keeps `..` segments.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{already_exists, not_found, FileSystem, FsRef};
use crate::ops::io_error_with_help;
use crate::path::UPath;

#[derive(Debug, Clone)]
pub struct PhysicalFs {
    root: PathBuf,
}

impl PhysicalFs {
    /// Root the filesystem at `root`, creating it if missing.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        if root.exists() && !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("root must be a directory: {}", root.display()),
            ));
        }
        fs::create_dir_all(root).map_err(io_error_with_help("create root directory", root))?;
        let root = dunce::canonicalize(root).map_err(io_error_with_help("canonicalize root", root))?;
        Ok(Self { root })
    }

    pub fn shared(root: impl AsRef<Path>) -> io::Result<FsRef> {
        Ok(Arc::new(Self::new(root)?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn host(&self, path: &UPath) -> PathBuf {
        let mut host = self.root.clone();
        host.extend(path.segments());
        host
    }

    fn children(&self, path: &UPath, want_dirs: bool) -> io::Result<Vec<UPath>> {
        let host = self.host(path);
        if !host.is_dir() {
            return Err(not_found(path));
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(&host).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_dir() != want_dirs {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("entry name is not valid UTF-8: {}", entry.path().display()),
                ));
            };
            found.push(path.join(name));
        }
        Ok(found)
    }
}

impl FileSystem for PhysicalFs {
    fn directory_exists(&self, path: &UPath) -> bool {
        self.host(path).is_dir()
    }

    fn file_exists(&self, path: &UPath) -> bool {
        self.host(path).is_file()
    }

    fn file_length(&self, path: &UPath) -> io::Result<u64> {
        let host = self.host(path);
        let meta = fs::metadata(&host).map_err(io_error_with_help("stat", &host))?;
        Ok(meta.len())
    }

    fn enumerate_directories(&self, path: &UPath) -> io::Result<Vec<UPath>> {
        self.children(path, true)
    }

    fn enumerate_files(&self, path: &UPath) -> io::Result<Vec<UPath>> {
        self.children(path, false)
    }

    fn create_directory(&self, path: &UPath) -> io::Result<()> {
        let host = self.host(path);
        fs::create_dir_all(&host).map_err(io_error_with_help("create directory", &host))
    }

    fn delete_directory(&self, path: &UPath) -> io::Result<()> {
        if path.is_root() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "the root directory can't be deleted",
            ));
        }
        let host = self.host(path);
        fs::remove_dir(&host).map_err(io_error_with_help("remove directory", &host))
    }

    fn delete_file(&self, path: &UPath) -> io::Result<()> {
        let host = self.host(path);
        fs::remove_file(&host).map_err(io_error_with_help("remove file", &host))
    }

    fn move_directory(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        if !self.directory_exists(src) {
            return Err(not_found(src));
        }
        let to = self.host(dest);
        // rename(2) silently replaces an empty destination directory on Unix.
        if to.exists() {
            return Err(already_exists(dest));
        }
        let from = self.host(src);
        fs::rename(&from, &to).map_err(io_error_with_help("rename directory", &from))
    }

    fn move_file(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        if !self.file_exists(src) {
            return Err(not_found(src));
        }
        let to = self.host(dest);
        if to.exists() {
            return Err(already_exists(dest));
        }
        let from = self.host(src);
        fs::rename(&from, &to).map_err(io_error_with_help("rename file", &from))
    }

    fn copy_file(&self, src: &UPath, dest: &UPath, overwrite: bool) -> io::Result<()> {
        let to = self.host(dest);
        if !overwrite && to.exists() {
            return Err(already_exists(dest));
        }
        let from = self.host(src);
        fs::copy(&from, &to)
            .map(|_| ())
            .map_err(io_error_with_help("copy file", &to))
    }

    fn read_file(&self, path: &UPath) -> io::Result<Vec<u8>> {
        let host = self.host(path);
        fs::read(&host).map_err(io_error_with_help("read file", &host))
    }

    fn write_file(&self, path: &UPath, content: &[u8]) -> io::Result<()> {
        let host = self.host(path);
        fs::write(&host, content).map_err(io_error_with_help("write file", &host))
    }

    fn host_path(&self, path: &UPath) -> Option<PathBuf> {
        Some(self.host(path))
    }
}
