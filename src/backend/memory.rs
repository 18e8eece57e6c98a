//! In-process filesystem backed by an ordered map.
//!
//! Keys are absolute normalized paths; because `UPath` orders segment-wise, all
//! descendants of a directory sit in one contiguous range right after it.
//! The root `/` is always present and is a directory.

use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{already_exists, not_found, FileSystem, FsRef};
use crate::path::UPath;

#[derive(Debug, Clone)]
enum Node {
    Directory,
    File(Vec<u8>),
}

type Tree = BTreeMap<UPath, Node>;

#[derive(Debug)]
pub struct MemoryFs {
    entries: Mutex<Tree>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(UPath::root(), Node::Directory);
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// New empty filesystem behind a shared handle.
    pub fn shared() -> FsRef {
        Arc::new(Self::new())
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_dir(tree: &Tree, path: &UPath) -> bool {
    matches!(tree.get(path), Some(Node::Directory))
}

fn is_file(tree: &Tree, path: &UPath) -> bool {
    matches!(tree.get(path), Some(Node::File(_)))
}

/// `path` itself followed by everything below it.
fn subtree<'a>(tree: &'a Tree, path: &'a UPath) -> impl Iterator<Item = (&'a UPath, &'a Node)> + 'a {
    tree.range(path.clone()..)
        .take_while(move |(key, _)| *key == path || key.is_in_directory(path, true))
}

fn children(tree: &Tree, path: &UPath, want_dirs: bool) -> io::Result<Vec<UPath>> {
    if !is_dir(tree, path) {
        return Err(not_found(path));
    }
    Ok(subtree(tree, path)
        .filter(|(key, _)| key.is_in_directory(path, false))
        .filter(|(_, node)| matches!(node, Node::Directory) == want_dirs)
        .map(|(key, _)| key.clone())
        .collect())
}

fn require_parent_dir(tree: &Tree, path: &UPath) -> io::Result<()> {
    match path.parent() {
        Some(parent) if is_dir(tree, &parent) => Ok(()),
        Some(parent) => Err(not_found(&parent)),
        None => Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("'{path}' has no parent directory"),
        )),
    }
}

impl FileSystem for MemoryFs {
    fn directory_exists(&self, path: &UPath) -> bool {
        is_dir(&self.tree(), path)
    }

    fn file_exists(&self, path: &UPath) -> bool {
        is_file(&self.tree(), path)
    }

    fn file_length(&self, path: &UPath) -> io::Result<u64> {
        match self.tree().get(path) {
            Some(Node::File(content)) => Ok(content.len() as u64),
            Some(Node::Directory) => Err(io::Error::new(
                ErrorKind::IsADirectory,
                format!("'{path}' is a directory"),
            )),
            None => Err(not_found(path)),
        }
    }

    fn enumerate_directories(&self, path: &UPath) -> io::Result<Vec<UPath>> {
        children(&self.tree(), path, true)
    }

    fn enumerate_files(&self, path: &UPath) -> io::Result<Vec<UPath>> {
        children(&self.tree(), path, false)
    }

    fn create_directory(&self, path: &UPath) -> io::Result<()> {
        let mut tree = self.tree();
        let mut current = UPath::root();
        for segment in path.segments() {
            current = current.join(segment);
            match tree.get(&current) {
                Some(Node::Directory) => {}
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        ErrorKind::NotADirectory,
                        format!("'{current}' is a file"),
                    ));
                }
                None => {
                    tree.insert(current.clone(), Node::Directory);
                }
            }
        }
        Ok(())
    }

    fn delete_directory(&self, path: &UPath) -> io::Result<()> {
        let mut tree = self.tree();
        if path.is_root() {
            return Err(io::Error::new(
                ErrorKind::PermissionDenied,
                "the root directory can't be deleted",
            ));
        }
        if !is_dir(&tree, path) {
            return Err(not_found(path));
        }
        if subtree(&tree, path).nth(1).is_some() {
            return Err(io::Error::new(
                ErrorKind::DirectoryNotEmpty,
                format!("'{path}' is not empty"),
            ));
        }
        tree.remove(path);
        Ok(())
    }

    fn delete_file(&self, path: &UPath) -> io::Result<()> {
        let mut tree = self.tree();
        if !is_file(&tree, path) {
            return Err(not_found(path));
        }
        tree.remove(path);
        Ok(())
    }

    fn move_directory(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        let mut tree = self.tree();
        if src.is_root() || !is_dir(&tree, src) {
            return Err(not_found(src));
        }
        if tree.contains_key(dest) {
            return Err(already_exists(dest));
        }
        if dest.is_in_directory(src, true) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("can't move '{src}' into its own subdirectory '{dest}'"),
            ));
        }
        require_parent_dir(&tree, dest)?;

        let moved: Vec<(UPath, Node)> = subtree(&tree, src)
            .map(|(key, node)| (key.clone(), node.clone()))
            .collect();
        for (key, node) in moved {
            tree.remove(&key);
            let rest = key.remove_prefix(src).map_err(io::Error::other)?;
            tree.insert(dest.join_path(&rest), node);
        }
        Ok(())
    }

    fn move_file(&self, src: &UPath, dest: &UPath) -> io::Result<()> {
        let mut tree = self.tree();
        if !is_file(&tree, src) {
            return Err(not_found(src));
        }
        if tree.contains_key(dest) {
            return Err(already_exists(dest));
        }
        require_parent_dir(&tree, dest)?;
        if let Some(node) = tree.remove(src) {
            tree.insert(dest.clone(), node);
        }
        Ok(())
    }

    fn copy_file(&self, src: &UPath, dest: &UPath, overwrite: bool) -> io::Result<()> {
        let mut tree = self.tree();
        let content = match tree.get(src) {
            Some(Node::File(content)) => content.clone(),
            _ => return Err(not_found(src)),
        };
        require_parent_dir(&tree, dest)?;
        match tree.get(dest) {
            Some(Node::Directory) => {
                return Err(io::Error::new(
                    ErrorKind::IsADirectory,
                    format!("'{dest}' is a directory"),
                ));
            }
            Some(Node::File(_)) if !overwrite => return Err(already_exists(dest)),
            _ => {}
        }
        tree.insert(dest.clone(), Node::File(content));
        Ok(())
    }

    fn read_file(&self, path: &UPath) -> io::Result<Vec<u8>> {
        match self.tree().get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            _ => Err(not_found(path)),
        }
    }

    fn write_file(&self, path: &UPath, content: &[u8]) -> io::Result<()> {
        let mut tree = self.tree();
        require_parent_dir(&tree, path)?;
        if is_dir(&tree, path) {
            return Err(io::Error::new(
                ErrorKind::IsADirectory,
                format!("'{path}' is a directory"),
            ));
        }
        tree.insert(path.clone(), Node::File(content.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> UPath {
        UPath::parse(s).unwrap()
    }

    #[test]
    fn create_directory_creates_parents() {
        let fs = MemoryFs::new();
        fs.create_directory(&p("/a/b/c")).unwrap();
        assert!(fs.directory_exists(&p("/a")));
        assert!(fs.directory_exists(&p("/a/b")));
        assert!(fs.directory_exists(&p("/a/b/c")));
        // idempotent
        fs.create_directory(&p("/a/b")).unwrap();
    }

    #[test]
    fn enumerate_lists_direct_children_only() {
        let fs = MemoryFs::new();
        fs.create_directory(&p("/a/b/deep")).unwrap();
        fs.create_directory(&p("/a0")).unwrap();
        fs.write_file(&p("/a/f.txt"), b"x").unwrap();
        fs.write_file(&p("/a/b/g.txt"), b"y").unwrap();
        assert_eq!(fs.enumerate_directories(&p("/a")).unwrap(), vec![p("/a/b")]);
        assert_eq!(fs.enumerate_files(&p("/a")).unwrap(), vec![p("/a/f.txt")]);
        assert!(fs.enumerate_files(&p("/missing")).is_err());
    }

    #[test]
    fn delete_directory_refuses_non_empty() {
        let fs = MemoryFs::new();
        fs.create_directory(&p("/a/b")).unwrap();
        let err = fs.delete_directory(&p("/a")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryNotEmpty);
        fs.delete_directory(&p("/a/b")).unwrap();
        fs.delete_directory(&p("/a")).unwrap();
        assert!(!fs.directory_exists(&p("/a")));
    }

    #[test]
    fn move_directory_rekeys_subtree() {
        let fs = MemoryFs::new();
        fs.create_directory(&p("/src/sub")).unwrap();
        fs.write_file(&p("/src/sub/f.txt"), b"data").unwrap();
        fs.move_directory(&p("/src"), &p("/dst")).unwrap();
        assert!(!fs.directory_exists(&p("/src")));
        assert_eq!(fs.read_file(&p("/dst/sub/f.txt")).unwrap(), b"data");
    }

    #[test]
    fn move_directory_rejects_existing_or_nested_target() {
        let fs = MemoryFs::new();
        fs.create_directory(&p("/src")).unwrap();
        fs.create_directory(&p("/dst")).unwrap();
        let err = fs.move_directory(&p("/src"), &p("/dst")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        let err = fs.move_directory(&p("/src"), &p("/src/inner")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn copy_file_honors_overwrite() {
        let fs = MemoryFs::new();
        fs.write_file(&p("/a.txt"), b"new").unwrap();
        fs.write_file(&p("/b.txt"), b"old").unwrap();
        let err = fs.copy_file(&p("/a.txt"), &p("/b.txt"), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        fs.copy_file(&p("/a.txt"), &p("/b.txt"), true).unwrap();
        assert_eq!(fs.read_file(&p("/b.txt")).unwrap(), b"new");
        assert_eq!(fs.file_length(&p("/b.txt")).unwrap(), 3);
    }
}
