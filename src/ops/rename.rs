//! Renames are moves to a sibling with a new name.

use super::dir_move::move_dir;
use super::file_move::move_file;
use crate::entry::{DirectoryEntry, Entry, FileEntry};
use crate::env::Environment;
use crate::errors::{Result, VfsError};
use crate::path::UPath;

fn sibling_parent(path: &UPath, new_name: &str) -> Result<UPath> {
    if new_name.is_empty() || new_name == "." || new_name == ".." {
        return Err(VfsError::invalid_path(new_name, "not a valid entry name"));
    }
    if new_name.contains(['/', '\\']) {
        return Err(VfsError::invalid_path(new_name, "name must not contain a separator"));
    }
    path.parent()
        .ok_or_else(|| VfsError::invalid_path(path, "the root directory can't be renamed"))
}

fn ensure_free(dir: &DirectoryEntry, new_name: &str) -> Result<()> {
    if dir.child_dir(new_name).exists() || dir.child(new_name).exists() {
        return Err(VfsError::TargetAlreadyExists(dir.path().join(new_name).to_string()));
    }
    Ok(())
}

pub fn rename_dir(dir: &mut DirectoryEntry, new_name: &str, env: &Environment) -> Result<bool> {
    let parent = DirectoryEntry::new(dir.file_system().clone(), sibling_parent(dir.path(), new_name)?);
    ensure_free(&parent, new_name)?;
    move_dir(dir, &parent.child_dir(new_name), env)
}

pub fn rename_file(file: &mut FileEntry, new_name: &str) -> Result<bool> {
    let parent = DirectoryEntry::new(file.file_system().clone(), sibling_parent(file.path(), new_name)?);
    ensure_free(&parent, new_name)?;
    move_file(file, &parent.child(new_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryFs;

    #[test]
    fn rejects_bad_names_and_root() {
        let env = Environment::in_memory();
        let root = DirectoryEntry::root(MemoryFs::shared());
        let mut dir = root.child_dir("a");
        dir.create().unwrap();
        for bad in ["", ".", "..", "x/y", "x\\y"] {
            assert!(matches!(rename_dir(&mut dir, bad, &env), Err(VfsError::InvalidPath { .. })), "{bad}");
        }
        let mut top = root.clone();
        assert!(matches!(rename_dir(&mut top, "b", &env), Err(VfsError::InvalidPath { .. })));
    }

    #[test]
    fn file_rename_rebinds_handle() {
        let root = DirectoryEntry::root(MemoryFs::shared());
        let mut file = root.child("a.txt");
        file.write_str("hello").unwrap();
        assert!(rename_file(&mut file, "b.txt").unwrap());
        assert_eq!(file.full_name(), "/b.txt");
        assert_eq!(file.read_to_string().unwrap(), "hello");
        assert!(!root.child("a.txt").exists());
    }

    #[test]
    fn rename_onto_sibling_file_fails() {
        let env = Environment::in_memory();
        let root = DirectoryEntry::root(MemoryFs::shared());
        let mut dir = root.child_dir("a");
        dir.create().unwrap();
        root.child("b").write_str("x").unwrap();
        assert!(matches!(rename_dir(&mut dir, "b", &env), Err(VfsError::TargetAlreadyExists(_))));
        assert_eq!(dir.full_name(), "/a");
    }
}
