//! ## Fs
//!
//! `fs` is the module which provides the file I/O interface and its entities

mod errors;
mod file;
mod params;
mod sync;
pub mod transfer;

pub use self::errors::{FileIoError, FileIoErrorType, FileIoResult};
pub use self::file::{DirEntry, FileType, Metadata, RawEntry, UnixPex, UnixPexClass};
pub use self::params::{GenericParams, IoParams, LocalParams, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use self::sync::{FileIo, DEFAULT_DIR_MODE};
pub use self::transfer::{Destination, ReadOutcome, Source};
