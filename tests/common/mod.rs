//! Shared test backends.
#![allow(dead_code)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use vfs_move::{FileSystem, FsRef, UPath};

/// When a failing native directory move reports its error.
#[derive(Debug, Clone, Copy)]
pub enum MoveFault {
    /// Fail without touching anything.
    Before(io::ErrorKind),
    /// Run the inner move first, then fail anyway.
    After(io::ErrorKind),
}

/// Wraps a backend and injects failures into selected operations.
#[derive(Debug)]
pub struct FaultyFs {
    inner: Box<dyn FileSystem>,
    fail_copy_under: Option<UPath>,
    move_fault: Option<MoveFault>,
    refuse_dir_delete: bool,
}

impl FaultyFs {
    pub fn over(inner: impl FileSystem + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            fail_copy_under: None,
            move_fault: None,
            refuse_dir_delete: false,
        }
    }

    /// Fail every file copy whose destination lies under `dir`.
    pub fn failing_copies_under(mut self, dir: &str) -> Self {
        self.fail_copy_under = Some(UPath::parse(dir).expect("valid path"));
        self
    }

    pub fn failing_moves(mut self, fault: MoveFault) -> Self {
        self.move_fault = Some(fault);
        self
    }

    pub fn refusing_dir_delete(mut self) -> Self {
        self.refuse_dir_delete = true;
        self
    }

    pub fn shared(self) -> FsRef {
        Arc::new(self)
    }
}

impl FileSystem for FaultyFs {
    fn native_move_is_reliable(&self) -> bool {
        self.inner.native_move_is_reliable()
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
        if self.refuse_dir_delete {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "directory is locked"));
        }
        self.inner.delete_directory(path)
    }
    fn delete_file(&self, path: &UPath) -> io::Result<()> {
        self.inner.delete_file(path)
    }
    fn move_directory(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        match self.move_fault {
            None => self.inner.move_directory(src, dest),
            Some(MoveFault::Before(kind)) => Err(io::Error::new(kind, "move refused")),
            Some(MoveFault::After(kind)) => {
                self.inner.move_directory(src, dest)?;
                Err(io::Error::new(kind, "I/O error after partial move"))
            }
        }
    }
    fn move_file(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        self.inner.move_file(src, dest)
    }
    fn copy_file(&self, src: &UPath, dest: &UPath, overwrite: bool) -> io::Result<()> {
        if let Some(dir) = &self.fail_copy_under {
            if dest.is_in_directory(dir, true) {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
            }
        }
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

/// In-memory sink for log lines written by a scoped subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Run `f` with a subscriber writing into this buffer.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
