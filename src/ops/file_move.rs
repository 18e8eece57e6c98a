//! Single-file moves. Native move on one backend, copy then delete across backends.

use std::io;
use tracing::{info, warn};

use super::copy::transfer_file;
use super::ensure_not_identical;
use crate::backend::{not_found, same_fs};
use crate::entry::{DirectoryEntry, Entry, FileEntry};
use crate::errors::{backend_error, Result, VfsError};

/// Move `file` onto `target`, creating the target's parent when missing.
/// On success the handle is rebound to `target`.
pub fn move_file(file: &mut FileEntry, target: &FileEntry) -> Result<bool> {
    ensure_not_identical(file, target)?;
    if !file.exists() {
        return Err(backend_error("move file", file.path())(not_found(file.path())));
    }
    if target.exists() || target.file_system().directory_exists(target.path()) {
        return Err(VfsError::TargetAlreadyExists(target.full_name()));
    }
    if let Some(parent) = target.parent() {
        parent.create()?;
    }

    if same_fs(file.file_system(), target.file_system()) {
        let moved = file.file_system().move_file(file.path(), target.path());
        match moved {
            Ok(()) => {
                info!(src = %file, dest = %target, "moved file");
                *file = target.clone();
                return Ok(target.exists());
            }
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                info!(src = %file, dest = %target, "native move crosses devices; copying then deleting");
            }
            Err(e) => return Err(backend_error("move file", file.path())(e)),
        }
    }

    transfer_file(file, target, false)?;
    if !file.delete() {
        warn!(src = %file, "copied file but could not remove source");
    }
    info!(src = %file, dest = %target, "copied file and removed source");
    *file = target.clone();
    Ok(target.exists())
}

/// Move `file` into `dir`, keeping its name.
pub fn move_file_into(file: &mut FileEntry, dir: &DirectoryEntry) -> Result<bool> {
    let target = dir.child(file.name());
    move_file(file, &target)
}
