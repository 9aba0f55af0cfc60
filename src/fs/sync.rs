//! ## Sync
//!
//! the file I/O interface implemented by every backend

use super::{DirEntry, Destination, FileIoResult, IoParams, RawEntry, ReadOutcome, Source};

/// Mode used for new directories when the caller has no preference
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Defines the methods which must be implemented by a file I/O backend.
///
/// Every operation but `open` works on the current working directory of the backend;
/// relative paths are resolved against it.
///
/// Errors are raised only by `open`, by recursive `rmdir` on something which can't be entered
/// and by queries (`pwd`, `ls`, `rawls`) performed while not connected.
/// Any other failure is returned as `false` (or `ReadOutcome::Failed`) and logged:
/// callers must check the return values.
///
/// The trait is object safe, so backends can be swapped at runtime behind a `Box<dyn FileIo>`.
pub trait FileIo {
    /// Connect to the backend with the provided parameters.
    /// If the backend is already connected, `AlreadyConnected` error is returned.
    fn open(&mut self, params: &IoParams) -> FileIoResult<()>;

    /// Close the connection. Does nothing if not connected.
    fn close(&mut self);

    /// Gets whether the backend is connected
    fn is_open(&self) -> bool;

    /// Get working directory
    fn pwd(&mut self) -> FileIoResult<String>;

    /// Change working directory.
    fn cd(&mut self, dir: &str) -> bool;

    /// Create a directory.
    ///
    /// With `recursive` all the missing directories along `dir` are created (like `mkdir -p`).
    /// If an error occurs in the middle of a recursive creation, `false` is returned and the
    /// part of the hierarchy already created is left in place: no rollback is performed.
    fn mkdir(&mut self, dir: &str, mode: u32, recursive: bool) -> bool;

    /// Remove a directory.
    ///
    /// Without `recursive` the directory must be empty.
    /// With `recursive` all of its content is removed first; removal goes on after a failure
    /// and the result is `false` if anything in the tree couldn't be removed.
    /// Fails with `NotADirectory` if `recursive` is set and `dir` can't be entered.
    fn rmdir(&mut self, dir: &str, recursive: bool) -> FileIoResult<bool>;

    /// Read a file. Without a destination the content is returned in memory.
    fn read(&mut self, filename: &str, dest: Option<Destination<'_>>) -> ReadOutcome;

    /// Write a file, overwriting it if it already exists
    fn write(&mut self, filename: &str, src: Source<'_>) -> bool;

    /// Remove a file
    fn rm(&mut self, filename: &str) -> bool;

    /// Rename or move a file or a directory
    fn mv(&mut self, src: &str, dest: &str) -> bool;

    /// Change the permissions of a file or a directory (e.g. `0o755`)
    fn chmod(&mut self, filename: &str, mode: u32) -> bool;

    /// List the names in the working directory
    fn ls(&mut self) -> FileIoResult<Vec<DirEntry>>;

    /// Detailed list of the working directory
    fn rawls(&mut self) -> FileIoResult<Vec<RawEntry>>;

    /// Create `dir` and all of its missing parents with the default mode
    fn mkdir_all(&mut self, dir: &str) -> bool {
        self.mkdir(dir, DEFAULT_DIR_MODE, true)
    }
}
