//! Normalized virtual paths.
//!
//! A `UPath` is an ordered list of segments plus an absolute/relative flag.
//! - Absolute paths start at the root (`/`); the root is the absolute path with no segments.
//! - The relative path with no segments is the *empty* path.
//! - Both `/` and `\` are accepted as separators on input; `/` is always used on output.
//!
//! Everything here is pure: no function in this module touches a backing filesystem.

use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, VfsError};

pub const DIRECTORY_SEPARATOR: char = '/';

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UPath {
    absolute: bool,
    segments: Vec<String>,
}

impl UPath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self {
            absolute: true,
            segments: Vec::new(),
        }
    }

    /// The empty relative path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and normalize a path string.
    /// `.` segments are dropped and `..` removes the previous segment; a `..` with
    /// nothing left to remove is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let absolute = raw.starts_with(is_separator);
        let mut segments: Vec<String> = Vec::new();
        for part in raw.split(is_separator) {
            match part {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(VfsError::invalid_path(raw, "'..' escapes the first segment"));
                    }
                }
                name => segments.push(name.to_string()),
            }
        }
        Ok(Self { absolute, segments })
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_relative(&self) -> bool {
        !self.absolute
    }

    pub fn is_root(&self) -> bool {
        self.absolute && self.segments.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.absolute && self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Append `child` (one or more segments) to this path.
    /// Leading separators in `child` are ignored; `..` never climbs above this path's root.
    pub fn join(&self, child: impl AsRef<str>) -> UPath {
        let mut joined = self.clone();
        for part in child.as_ref().split(is_separator) {
            match part {
                "" | "." => {}
                ".." => {
                    joined.segments.pop();
                }
                name => joined.segments.push(name.to_string()),
            }
        }
        joined
    }

    /// Append all segments of `other`, treating it as relative.
    pub fn join_path(&self, other: &UPath) -> UPath {
        let mut joined = self.clone();
        joined.segments.extend(other.segments.iter().cloned());
        joined
    }

    /// Parent directory; `None` for the root and the empty path.
    pub fn parent(&self) -> Option<UPath> {
        if self.segments.is_empty() {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }

    /// Last segment; `None` for the root and the empty path.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Last segment without its extension (`notes.tar.gz` -> `notes.tar`).
    /// A leading dot does not start an extension (`.profile` stays `.profile`).
    pub fn name_without_extension(&self) -> Option<&str> {
        let name = self.name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[idx + 1..]),
            _ => None,
        }
    }

    /// True if this path lies strictly below `dir`.
    /// With `recursive == false` only direct children match.
    pub fn is_in_directory(&self, dir: &UPath, recursive: bool) -> bool {
        if self.absolute != dir.absolute || self.segments.len() <= dir.segments.len() {
            return false;
        }
        if !self.segments.starts_with(&dir.segments) {
            return false;
        }
        recursive || self.segments.len() == dir.segments.len() + 1
    }

    pub fn to_relative(&self) -> UPath {
        Self {
            absolute: false,
            segments: self.segments.clone(),
        }
    }

    pub fn to_absolute(&self) -> UPath {
        Self {
            absolute: true,
            segments: self.segments.clone(),
        }
    }

    /// First segment of the path: `/a/b/c` -> `/a`, `a/b` -> `a`, `/` -> `/`.
    pub fn first_segment(&self) -> Result<UPath> {
        if self.is_empty() {
            return Err(VfsError::invalid_path(self, "path is empty"));
        }
        Ok(Self {
            absolute: self.absolute,
            segments: self.segments.iter().take(1).cloned().collect(),
        })
    }

    /// Remaining path after `prefix`, always absolute (`/a/b/c` minus `/a` is `/b/c`).
    /// Removing a path from itself yields the root.
    pub fn remove_prefix(&self, prefix: &UPath) -> Result<UPath> {
        if prefix.is_empty() {
            return Err(VfsError::invalid_path(
                prefix,
                "prefix can't be empty, it must be at least the root",
            ));
        }
        if self != prefix && !self.is_in_directory(prefix, true) {
            return Err(VfsError::invalid_path(
                self,
                format!("path is not in '{prefix}'"),
            ));
        }
        Ok(Self {
            absolute: true,
            segments: self.segments[prefix.segments.len()..].to_vec(),
        })
    }

    /// `prefix / self` (with `self` treated as relative); unchanged when no prefix is set.
    pub fn add_prefix(&self, prefix: Option<&UPath>) -> UPath {
        match prefix {
            Some(prefix) => prefix.join_path(self),
            None => self.clone(),
        }
    }
}

impl fmt::Display for UPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute && self.segments.is_empty() {
            return f.write_str("/");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 || self.absolute {
                write!(f, "{DIRECTORY_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for UPath {
    type Err = VfsError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
