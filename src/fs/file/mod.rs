//! ## File
//!
//! entries returned by directory listings

// -- ext
use std::fmt;
use std::path::{Path, PathBuf};

// -- mod
mod file_type;
mod metadata;
mod permissions;

// -- export
pub use file_type::FileType;
pub use metadata::Metadata;
pub use permissions::{UnixPex, UnixPexClass};

use crate::utils::fmt as fmt_utils;

/// An entry of the working directory, as returned by `ls`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirEntry {
    /// Entry name
    pub name: String,
    /// Working directory followed by the entry name
    pub full_path: String,
}

impl DirEntry {
    /// Instantiates a new `DirEntry` for `name` listed in `wrkdir`
    pub fn new<S: AsRef<str>>(wrkdir: &str, name: S) -> Self {
        let name = name.as_ref();
        let full_path = match wrkdir.ends_with('/') {
            true => format!("{}{}", wrkdir, name),
            false => format!("{}/{}", wrkdir, name),
        };
        Self {
            name: name.to_string(),
            full_path,
        }
    }
}

/// An entry of a detailed listing, as returned by `rawls`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawEntry {
    /// Entry absolute path
    pub path: PathBuf,
    pub metadata: Metadata,
}

impl RawEntry {
    /// Get absolute path
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Get file name
    pub fn name(&self) -> String {
        self.path()
            .file_name()
            .map(|x| x.to_string_lossy().to_string())
            .unwrap_or_else(|| "/".to_string())
    }

    /// Get metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns whether the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.metadata().is_dir()
    }

    /// Returns whether the entry is a regular file
    pub fn is_file(&self) -> bool {
        self.metadata().is_file()
    }

    /// Returns whether entry is hidden
    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }
}

/// Formats the entry as a line of `ls -l`
impl fmt::Display for RawEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:>5} {:>5} {:>10} {} {}",
            self.metadata.file_type.flag(),
            self.metadata
                .mode
                .map(|x| x.to_string())
                .unwrap_or_else(|| "?????????".to_string()),
            fmt_utils::fmt_id(self.metadata.uid),
            fmt_utils::fmt_id(self.metadata.gid),
            self.metadata.size,
            fmt_utils::fmt_ls_time(self.metadata.modified),
            self.name()
        )
    }
}
