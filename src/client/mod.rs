//! ## Client
//!
//! `client` is the module which exposes all the file I/O backends

use crate::fs::{FileIo, IoParams};

pub mod local;
#[cfg(feature = "ssh")]
pub mod ssh;

/// Build the backend selected by `params`.
/// The returned backend is not connected yet: call `open` with the same params.
pub fn io_for(params: &IoParams) -> Box<dyn FileIo> {
    match params {
        #[cfg(feature = "ssh")]
        IoParams::Sftp(_) => {
            debug!("Selected SFTP backend");
            Box::new(ssh::SftpIo::default())
        }
        IoParams::Local(_) => {
            debug!("Selected local file system backend");
            Box::new(local::LocalIo::default())
        }
    }
}
