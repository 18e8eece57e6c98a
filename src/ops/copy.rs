//! Recursive directory copy and single-file copy.
//! Source and target may be bound to different backends; file content is then
//! streamed through read/write instead of the backend's native copy.

use tracing::{debug, error};

use super::ensure_not_identical;
use crate::backend::{already_exists, same_fs};
use crate::entry::{DirectoryEntry, Entry, FileEntry};
use crate::errors::{backend_error, Result, VfsError};

/// Copy the tree under `source` into `target`.
///
/// - `IdenticalPath` if both are the same entry; `InvalidPath` if `target` lies inside `source`.
/// - `TargetAlreadyExists` if `target` exists and `replace_existing` is false, before anything is copied.
/// - With `replace_existing`, existing files under `target` are overwritten one by one.
///
/// Backend failures while copying are logged and reported as `Ok(false)`.
/// Otherwise returns whether `target` exists afterwards.
pub fn copy_dir(source: &DirectoryEntry, target: &DirectoryEntry, replace_existing: bool) -> Result<bool> {
    ensure_not_identical(source, target)?;
    if same_fs(source.file_system(), target.file_system())
        && target.path().is_in_directory(source.path(), true)
    {
        return Err(VfsError::invalid_path(
            target.path(),
            format!("can't copy '{source}' into itself"),
        ));
    }
    if !replace_existing && target.exists() {
        return Err(VfsError::TargetAlreadyExists(target.full_name()));
    }

    match copy_tree(source, target, replace_existing) {
        Ok(()) => {
            debug!(src = %source, dest = %target, "copied directory tree");
            Ok(target.exists())
        }
        Err(e) if e.is_backend() => {
            error!(src = %source, dest = %target, error = %e, "directory copy failed");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

// Subdirectories first (depth-first), then the files of this level.
fn copy_tree(source: &DirectoryEntry, target: &DirectoryEntry, replace_existing: bool) -> Result<()> {
    target.create()?;
    for sub in source.directories()? {
        copy_tree(&sub, &target.child_dir(sub.name()), replace_existing)?;
    }
    for file in source.files()? {
        let created = target.child(file.name());
        transfer_file(&file, &created, replace_existing)?;
        assert!(created.exists(), "copied file does not exist: {created}");
    }
    Ok(())
}

/// Copy one file onto `target`. The target's parent directory must exist.
pub fn copy_file(source: &FileEntry, target: &FileEntry, overwrite: bool) -> Result<FileEntry> {
    ensure_not_identical(source, target)?;
    if !overwrite && target.exists() {
        return Err(VfsError::TargetAlreadyExists(target.full_name()));
    }
    transfer_file(source, target, overwrite)?;
    Ok(target.clone())
}

pub(super) fn transfer_file(source: &FileEntry, target: &FileEntry, overwrite: bool) -> Result<()> {
    let fs = source.file_system();
    if same_fs(fs, target.file_system()) {
        return fs
            .copy_file(source.path(), target.path(), overwrite)
            .map_err(backend_error("copy file", target.path()));
    }
    if !overwrite && target.exists() {
        return Err(backend_error("copy file", target.path())(already_exists(target.path())));
    }
    let content = source.read_bytes()?;
    target
        .file_system()
        .write_file(target.path(), &content)
        .map_err(backend_error("write copied file", target.path()))
}
