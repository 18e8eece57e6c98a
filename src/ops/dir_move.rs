//! Directory move implementation.
//!
//! Uses the backend's native move. When the backend reports that its native move
//! can't be trusted (or the environment forces it), the source tree is first copied
//! into a scratch folder under the temp root. If the target is missing after the
//! native move, it is rebuilt from that scratch copy. Moves across backends copy the
//! tree and then delete the source.

use std::io;
use tracing::{debug, error, info, warn};

use super::copy::copy_dir;
use super::delete::{delete_dir, is_empty};
use super::ensure_not_identical;
use crate::backend::{not_found, same_fs};
use crate::entry::{DirectoryEntry, Entry};
use crate::env::Environment;
use crate::errors::{backend_error, Result, VfsError};
use crate::platform::temp_copy_id;

/// Move `source` onto `target`, which must not exist yet.
///
/// On success `source` is rebound to `target`. Returns whether the target exists
/// afterwards; `Ok(false)` also covers an aborted safeguard copy and a failed
/// recovery, in which case the scratch copy is kept and logged.
///
/// When a guarded native move fails, the scratch copy is only dropped if the source
/// still matches it. Otherwise the target is rebuilt from the scratch copy.
pub fn move_dir(source: &mut DirectoryEntry, target: &DirectoryEntry, env: &Environment) -> Result<bool> {
    ensure_not_identical(source, target)?;
    if !source.exists() {
        return Err(backend_error("move directory", source.path())(not_found(source.path())));
    }
    if target.exists() || target.file_system().file_exists(target.path()) {
        return Err(VfsError::TargetAlreadyExists(target.full_name()));
    }

    if !same_fs(source.file_system(), target.file_system()) {
        info!(src = %source, dest = %target, "different filesystems; copying then deleting");
        return move_across(source, target);
    }
    if target.path().is_in_directory(source.path(), true) {
        return Err(VfsError::invalid_path(
            target.path(),
            format!("can't move '{source}' into its own subdirectory"),
        ));
    }
    if let Some(parent) = target.parent() {
        parent.create()?;
    }

    let original = source.clone();
    let fs = original.file_system();
    let guarded = env.force_emulated_move() || !fs.native_move_is_reliable();
    let scratch = if guarded {
        match take_safeguard_copy(&original, env)? {
            Some(scratch) => Some(scratch),
            None => return Ok(false),
        }
    } else {
        None
    };

    if let Err(e) = fs.move_directory(original.path(), target.path()) {
        if let Some(scratch) = &scratch {
            if !same_tree(&original, scratch) {
                // The failed move already took content away from the source.
                error!(src = %original, dest = %target, scratch = %scratch, error = %e,
                    "native move failed after touching the source; recovering");
                if !recover_from_scratch(&original, scratch, target) {
                    return Ok(false);
                }
                *source = target.clone();
                return Ok(true);
            }
            discard_scratch(scratch);
        }
        if e.kind() == io::ErrorKind::CrossesDevices {
            info!(src = %original, dest = %target, "native move crosses devices; copying then deleting");
            return move_across(source, target);
        }
        return Err(backend_error("move directory", original.path())(e));
    }
    *source = target.clone();

    let Some(scratch) = scratch else {
        info!(src = %original, dest = %target, "moved directory");
        return Ok(target.exists());
    };
    if target.exists() {
        warn!(src = %original, dest = %target, "native move succeeded; safeguard copy was not needed");
        discard_scratch(&scratch);
        return Ok(true);
    }
    warn!(src = %original, dest = %target, scratch = %scratch, "target missing after native move; recovering");
    Ok(recover_from_scratch(&original, &scratch, target))
}

/// Copy the source tree into a fresh scratch folder.
/// `None` when the copy failed; the partial copy is already removed then.
fn take_safeguard_copy(original: &DirectoryEntry, env: &Environment) -> Result<Option<DirectoryEntry>> {
    let scratch = env.scratch_dir(&temp_copy_id())?;
    debug!(src = %original, scratch = %scratch, "taking safeguard copy");
    match copy_dir(original, &scratch, false) {
        Ok(true) => Ok(Some(scratch)),
        Ok(false) => {
            error!(src = %original, scratch = %scratch, "safeguard copy failed; move aborted");
            discard_scratch(&scratch);
            Ok(None)
        }
        Err(e) => {
            discard_scratch(&scratch);
            Err(e)
        }
    }
}

/// Rebuild `target` from the scratch copy, then remove the scratch copy and whatever
/// is left at the original location. On failure the scratch copy is kept.
///
/// `target` did not exist before the move, so anything a failed native move left
/// there came from the source and is overwritten from the scratch copy.
fn recover_from_scratch(original: &DirectoryEntry, scratch: &DirectoryEntry, target: &DirectoryEntry) -> bool {
    let restored = if !scratch.exists() || is_empty(scratch) {
        target.create().map(|_| true)
    } else {
        copy_dir(scratch, target, true)
    };
    match restored {
        Ok(true) => {}
        Ok(false) => {
            error!(dest = %target, scratch = %scratch, "recovery copy failed; scratch copy kept");
            return false;
        }
        Err(e) => {
            error!(dest = %target, scratch = %scratch, error = %e, "recovery copy failed; scratch copy kept");
            return false;
        }
    }

    discard_scratch(scratch);
    if original.exists() {
        match delete_dir(original, true) {
            Ok(_) => debug!(path = %original, "removed dangling original"),
            Err(e) => warn!(path = %original, error = %e, "could not remove dangling original"),
        }
    }
    info!(src = %original, dest = %target, "recovered directory move from safeguard copy");
    target.exists()
}

/// True when both trees hold the same directory names and files of the same size.
fn same_tree(a: &DirectoryEntry, b: &DirectoryEntry) -> bool {
    if !a.exists() || !b.exists() {
        return false;
    }
    let (Ok(mut a_dirs), Ok(mut b_dirs), Ok(mut a_files), Ok(mut b_files)) =
        (a.directories(), b.directories(), a.files(), b.files())
    else {
        return false;
    };
    if a_dirs.len() != b_dirs.len() || a_files.len() != b_files.len() {
        return false;
    }
    a_dirs.sort_by(|x, y| x.name().cmp(y.name()));
    b_dirs.sort_by(|x, y| x.name().cmp(y.name()));
    a_files.sort_by(|x, y| x.name().cmp(y.name()));
    b_files.sort_by(|x, y| x.name().cmp(y.name()));

    let files_match = a_files.iter().zip(&b_files).all(|(x, y)| {
        x.name() == y.name() && matches!((x.size(), y.size()), (Ok(m), Ok(n)) if m == n)
    });
    files_match
        && a_dirs
            .iter()
            .zip(&b_dirs)
            .all(|(x, y)| x.name() == y.name() && same_tree(x, y))
}

fn discard_scratch(scratch: &DirectoryEntry) {
    match delete_dir(scratch, true) {
        Ok(_) => debug!(scratch = %scratch, "removed scratch copy"),
        Err(e) => warn!(scratch = %scratch, error = %e, "could not remove scratch copy"),
    }
}

fn move_across(source: &mut DirectoryEntry, target: &DirectoryEntry) -> Result<bool> {
    if !copy_dir(source, target, false)? {
        return Ok(false);
    }
    match delete_dir(source, true) {
        Ok(true) => {}
        Ok(false) => warn!(src = %source, dest = %target, "copied directory but the source was not removed"),
        Err(e) => warn!(src = %source, error = %e, "copied directory but could not remove source"),
    }
    *source = target.clone();
    Ok(true)
}
