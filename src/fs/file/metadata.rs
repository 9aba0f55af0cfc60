//! ## Metadata
//!
//! attributes of an entry of a detailed listing

#[cfg(feature = "ssh")]
use ssh2::FileStat;
use std::fs::Metadata as StdMetadata;
#[cfg(target_family = "unix")]
use std::os::unix::fs::MetadataExt;
#[cfg(feature = "ssh")]
use std::time::{Duration, UNIX_EPOCH};
use std::time::SystemTime;

use super::{FileType, UnixPex};

/// Attributes of a listed entry.
/// Every attribute but the size and the type may be missing, depending on what the backend reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Metadata {
    pub accessed: Option<SystemTime>,
    pub gid: Option<u32>,
    /// Permission bits, without the file type
    pub mode: Option<UnixPex>,
    pub modified: Option<SystemTime>,
    /// Size in bytes
    pub size: u64,
    pub file_type: FileType,
    pub uid: Option<u32>,
}

impl Metadata {
    pub fn accessed(mut self, accessed: SystemTime) -> Self {
        self.accessed = Some(accessed);
        self
    }

    pub fn gid(mut self, gid: u32) -> Self {
        self.gid = Some(gid);
        self
    }

    pub fn mode(mut self, mode: UnixPex) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn file_type(mut self, t: FileType) -> Self {
        self.file_type = t;
        self
    }

    pub fn uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.file_type.is_file()
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type.is_symlink()
    }
}

/// Local entries; symlinks are reported as such only if `metadata` comes from `symlink_metadata`
impl From<StdMetadata> for Metadata {
    fn from(metadata: StdMetadata) -> Self {
        let base = Self {
            accessed: metadata.accessed().ok(),
            file_type: FileType::from(metadata.file_type()),
            modified: metadata.modified().ok(),
            size: metadata.len(),
            ..Self::default()
        };
        #[cfg(target_family = "unix")]
        let base = base
            .uid(metadata.uid())
            .gid(metadata.gid())
            .mode(UnixPex::from(metadata.mode()));
        base
    }
}

/// Sftp attributes; times are seconds since the epoch
#[cfg(feature = "ssh")]
impl From<FileStat> for Metadata {
    fn from(stat: FileStat) -> Self {
        let file_type = if stat.file_type().is_symlink() {
            FileType::Symlink
        } else if stat.is_dir() {
            FileType::Directory
        } else {
            FileType::File
        };
        let from_epoch = |secs: u64| UNIX_EPOCH + Duration::from_secs(secs);
        Self {
            accessed: stat.atime.map(from_epoch),
            gid: stat.gid,
            mode: stat.perm.map(UnixPex::from),
            modified: stat.mtime.map(from_epoch),
            size: stat.size.unwrap_or(0),
            file_type,
            uid: stat.uid,
        }
    }
}
