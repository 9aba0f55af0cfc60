//! ## Errors
//!
//! errors types

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Result type returned by a `FileIo` implementation
pub type FileIoResult<T> = Result<T, FileIoError>;

/// FileIoError defines the errors raised by a file I/O backend.
///
/// Only a few operations raise errors: opening the connection, recursive directory removal
/// on something which is not a directory and queries performed while not connected.
/// Any other failure is reported by the operations as `false`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FileIoError {
    pub kind: FileIoErrorType,
    pub msg: Option<String>,
}

/// FileIoErrorType defines the possible errors available for a file I/O backend
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileIoErrorType {
    #[error("already connected")]
    AlreadyConnected,
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("bad address syntax")]
    BadAddress,
    #[error("bad connection parameters")]
    BadParams,
    #[error("connection error")]
    ConnectionError,
    #[error("could not stat file")]
    StatFailed,
    #[error("directory already exists")]
    DirectoryAlreadyExists,
    #[error("failed to create file")]
    FileCreateDenied,
    #[error("failed to open file")]
    CouldNotOpenFile,
    #[error("failed to remove file")]
    CouldNotRemoveFile,
    #[error("IO error")]
    IoError,
    #[error("no such file or directory")]
    NoSuchFileOrDirectory,
    #[error("not a directory")]
    NotADirectory,
    #[error("not enough permissions")]
    PexError,
    #[error("protocol error")]
    ProtocolError,
    #[error("not connected yet")]
    NotConnected,
}

impl FileIoError {
    /// Instantiates a new FileIoError
    pub fn new(kind: FileIoErrorType) -> FileIoError {
        FileIoError { kind, msg: None }
    }

    /// Instantiates a new FileIoError with message
    pub fn new_ex<S: ToString>(kind: FileIoErrorType, msg: S) -> FileIoError {
        let mut err: FileIoError = FileIoError::new(kind);
        err.msg = Some(msg.to_string());
        err
    }
}

impl fmt::Display for FileIoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.msg {
            Some(msg) => write!(f, "{} ({})", self.kind, msg),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for FileIoError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.kind)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_format_errors() {
        let err: FileIoError = FileIoError::new_ex(
            FileIoErrorType::ConnectionError,
            String::from("unable to open SFTP connection as sftp@example.com"),
        );
        assert_eq!(
            err.msg.as_deref().unwrap(),
            "unable to open SFTP connection as sftp@example.com"
        );
        assert_eq!(
            format!("{}", err),
            String::from("connection error (unable to open SFTP connection as sftp@example.com)")
        );
        assert_eq!(
            format!("{}", FileIoError::new(FileIoErrorType::AlreadyConnected)),
            String::from("already connected")
        );
        assert_eq!(
            format!("{}", FileIoError::new(FileIoErrorType::BadParams)),
            String::from("bad connection parameters")
        );
        assert_eq!(
            format!(
                "{}",
                FileIoError::new_ex(FileIoErrorType::NotADirectory, "/tmp/a.txt")
            ),
            String::from("not a directory (/tmp/a.txt)")
        );
        assert_eq!(
            format!("{}", FileIoError::new(FileIoErrorType::NotConnected)),
            String::from("not connected yet")
        );
        let err = FileIoError::new(FileIoErrorType::ProtocolError);
        assert_eq!(err.kind, FileIoErrorType::ProtocolError);
    }

    #[test]
    fn should_report_error_cause() {
        let error = FileIoError::new(FileIoErrorType::IoError);
        assert!(error.source().is_some());
    }
}
