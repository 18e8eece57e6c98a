//! Recursive delete and emptiness checks through directory handles.

use vfs_move::{DirectoryEntry, Entry, MemoryFs, VfsError};

fn populated_root() -> DirectoryEntry {
    let root = DirectoryEntry::root(MemoryFs::shared());
    let tree = root.child_dir("tree");
    tree.child("top.txt").write_str("top").unwrap();
    tree.child_dir("a").child("a1.txt").write_str("a1").unwrap();
    tree.child_dir("a").child_dir("deep").child("d.bin").write_bytes(&[1, 2, 3]).unwrap();
    tree.child_dir("b").create().unwrap();
    root
}

#[test]
fn delete_removes_every_descendant() {
    let root = populated_root();
    let tree = root.child_dir("tree");
    assert!(!tree.is_empty());

    assert!(tree.delete().unwrap());
    assert!(!tree.exists());
    assert!(!tree.child_dir("a").child_dir("deep").exists());
    assert!(!tree.child("top.txt").exists());
    assert!(root.directories().unwrap().is_empty());
}

#[test]
fn deleting_missing_entries_is_false_and_idempotent() {
    let root = DirectoryEntry::root(MemoryFs::shared());
    let dir = root.child_dir("nope");
    assert!(!dir.delete().unwrap());
    assert!(!dir.delete().unwrap());
    let file = root.child("nope.txt");
    assert!(!file.delete());
    assert!(!file.delete());
}

#[test]
fn non_recursive_delete_refuses_populated_dir() {
    let root = populated_root();
    let tree = root.child_dir("tree");
    let err = vfs_move::ops::delete_dir(&tree, false).unwrap_err();
    assert!(matches!(err, VfsError::NonEmptyDirectory(_)));
    assert!(tree.child("top.txt").exists());

    let empty = tree.child_dir("b");
    assert!(empty.is_empty());
    assert!(vfs_move::ops::delete_dir(&empty, false).unwrap());
}

#[test]
fn file_delete_leaves_siblings() {
    let root = populated_root();
    let tree = root.child_dir("tree");
    assert!(tree.child("top.txt").delete());
    assert!(tree.child_dir("a").child("a1.txt").exists());
}

#[test]
fn missing_directory_counts_as_empty() {
    let root = DirectoryEntry::root(MemoryFs::shared());
    assert!(root.child_dir("ghost").is_empty());
}
