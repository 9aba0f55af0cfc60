//! ## File type
//!
//! represents the file type

use std::fs::FileType as StdFileType;

/// Describes the file type (directory, regular file or symlink)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileType {
    Directory,
    File,
    /// Symbolic link; a symlink pointing to a directory is still a Symlink.
    Symlink,
}

impl Default for FileType {
    fn default() -> Self {
        Self::File
    }
}

impl FileType {
    /// Returns whether file is a directory
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns whether file is a regular file
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns whether file is symlink
    pub fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }

    /// Type flag used in the first column of `ls -l`
    pub fn flag(&self) -> char {
        match self {
            Self::Directory => 'd',
            Self::File => '-',
            Self::Symlink => 'l',
        }
    }
}

impl From<StdFileType> for FileType {
    fn from(t: StdFileType) -> Self {
        if t.is_symlink() {
            Self::Symlink
        } else if t.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }
}
