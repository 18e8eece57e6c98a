//! Core library for `vfs_move`.
//!
//! A small virtual filesystem layer: backend-neutral paths (`UPath`), file and
//! directory handles bound to a backend (`FileEntry`, `DirectoryEntry`), and the
//! operations built on them (recursive delete, tree copy, rename, and directory moves
//! that survive backends whose native move drops the destination).
//!
//! ```no_run
//! use vfs_move::{DirectoryEntry, Entry, Environment, MemoryFs};
//!
//! # fn main() -> vfs_move::Result<()> {
//! let env = Environment::in_memory();
//! let root = DirectoryEntry::root(MemoryFs::shared());
//! root.child_dir("docs").child("a.txt").write_str("hello")?;
//! let mut docs = root.child_dir("docs");
//! docs.move_to(&root.child_dir("archive"), &env)?;
//! assert_eq!(docs.full_name(), "/archive");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod entry;
pub mod env;
pub mod errors;
pub mod logging;
pub mod ops;
pub mod path;
pub mod platform;

pub use backend::{same_fs, FileSystem, FsRef, MemoryFs, PhysicalFs, UnreliableMoveFs};
pub use config::{
    default_app_data_root, default_config_path, default_log_path, default_temp_root,
    load_config, load_config_from_xml_path, path_has_symlink_ancestor, Config, LogLevel,
};
pub use entry::{exists, DirectoryEntry, Entry, FileEntry};
pub use env::Environment;
pub use errors::{Result, VfsError};
pub use logging::{init_tracing, init_tracing_from_config};
pub use path::UPath;
