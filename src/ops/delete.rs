//! Emptiness checks and guaranteed-recursive delete.

use tracing::{debug, error, warn};

use crate::entry::{DirectoryEntry, Entry, FileEntry};
use crate::errors::{Result, VfsError};

/// True if the directory has no children.
/// An enumeration failure (e.g. the directory vanished meanwhile) counts as empty.
pub fn is_empty(dir: &DirectoryEntry) -> bool {
    let fs = dir.file_system();
    let dirs = match fs.enumerate_directories(dir.path()) {
        Ok(dirs) => dirs,
        Err(e) => {
            debug!(path = %dir, error = %e, "enumeration failed; treating directory as empty");
            return true;
        }
    };
    if !dirs.is_empty() {
        return false;
    }
    match fs.enumerate_files(dir.path()) {
        Ok(files) => files.is_empty(),
        Err(e) => {
            debug!(path = %dir, error = %e, "enumeration failed; treating directory as empty");
            true
        }
    }
}

/// Delete a directory. Returns `Ok(false)` when it did not exist or the backend
/// refused the final delete (logged).
///
/// With `recursive`, child directories are deleted depth-first and child files after
/// them. If children remain afterwards (or `recursive` is off and the directory has
/// children), `NonEmptyDirectory` is returned.
pub fn delete_dir(dir: &DirectoryEntry, recursive: bool) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    if recursive && !is_empty(dir) {
        match dir.directories() {
            Ok(subdirs) => {
                for sub in &subdirs {
                    delete_dir(sub, true)?;
                }
            }
            Err(e) => warn!(path = %dir, error = %e, "could not list subdirectories for delete"),
        }
        match dir.files() {
            Ok(files) => {
                for file in &files {
                    delete_file(file);
                }
            }
            Err(e) => warn!(path = %dir, error = %e, "could not list files for delete"),
        }
    }
    if !is_empty(dir) {
        return Err(VfsError::NonEmptyDirectory(dir.full_name()));
    }

    let deleted = match dir.file_system().delete_directory(dir.path()) {
        Ok(()) => true,
        Err(e) => {
            error!(path = %dir, error = %e, "failed to delete directory");
            false
        }
    };
    assert!(!deleted || !dir.exists(), "directory still exists after delete: {dir}");
    Ok(deleted)
}

/// Delete a file. `false` when it did not exist or the backend refused (logged).
pub fn delete_file(file: &FileEntry) -> bool {
    if !file.exists() {
        return false;
    }
    match file.file_system().delete_file(file.path()) {
        Ok(()) => {
            assert!(!file.exists(), "file still exists after delete: {file}");
            true
        }
        Err(e) => {
            error!(path = %file, error = %e, "failed to delete file");
            false
        }
    }
}
