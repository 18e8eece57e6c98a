//! Filesystem operations on entries: delete, copy, move and rename.
//!
//! Every operation runs to completion on the calling thread. Backend I/O failures in
//! best-effort steps are logged and reduced to `false`; failures that could hide data
//! loss are returned to the caller.

mod copy;
mod delete;
mod dir_move;
mod file_move;
mod helpers;
mod rename;

pub use copy::{copy_dir, copy_file};
pub use delete::{delete_dir, delete_file, is_empty};
pub use dir_move::move_dir;
pub use file_move::{move_file, move_file_into};
pub use helpers::io_error_with_help;
pub use rename::{rename_dir, rename_file};

use crate::entry::Entry;
use crate::errors::{Result, VfsError};

/// Reject operations whose source and target are the same entry.
fn ensure_not_identical<E: Entry + PartialEq>(source: &E, target: &E) -> Result<()> {
    if source == target {
        return Err(VfsError::IdenticalPath(source.full_name()));
    }
    Ok(())
}
