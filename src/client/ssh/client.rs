//! ## Client
//!
//! the ssh2 implementation of `SftpClient`

/**
 * MIT License
 *
 * remoteio - Copyright (c) 2021 Christian Visintin
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use super::{commons, config::Config, SftpClient};
use crate::fs::{Metadata, RawEntry};
use crate::utils::path as path_utils;
use crate::{FileIoError, FileIoErrorType, FileIoResult};

use ssh2::{FileStat, Session, Sftp};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sftp client built on libssh2.
///
/// The sftp protocol has no working directory, so the client keeps one on its own:
/// relative paths are resolved against it before being sent to the server.
pub struct Ssh2Client {
    session: Option<Session>,
    sftp: Option<Sftp>,
    wrkdir: PathBuf,
    config_file: Option<PathBuf>,
}

impl Default for Ssh2Client {
    fn default() -> Self {
        Self {
            session: None,
            sftp: None,
            wrkdir: PathBuf::from("/"),
            config_file: None,
        }
    }
}

impl Ssh2Client {
    /// Resolve the host parameters from the ssh configuration file at `p`
    pub fn config_file<P: AsRef<Path>>(mut self, p: P) -> Self {
        self.config_file = Some(p.as_ref().to_path_buf());
        self
    }

    /// Get a reference to current `session` value.
    pub fn session(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    // -- private

    /// Get the sftp channel; fails if not authenticated yet
    fn sftp(&self) -> FileIoResult<&Sftp> {
        self.sftp
            .as_ref()
            .ok_or_else(|| FileIoError::new(FileIoErrorType::NotConnected))
    }

    /// Resolve `p` against the working directory
    fn path(&self, p: &str) -> PathBuf {
        path_utils::resolve(self.wrkdir.as_path(), Path::new(p))
    }

    fn readdir(&self) -> FileIoResult<Vec<(PathBuf, FileStat)>> {
        let sftp = self.sftp()?;
        debug!("Reading directory {}", self.wrkdir.display());
        sftp.readdir(self.wrkdir.as_path()).map_err(|err| {
            error!("Could not read directory {}: {}", self.wrkdir.display(), err);
            FileIoError::new_ex(
                FileIoErrorType::ProtocolError,
                format!("could not read directory: {}", err),
            )
        })
    }
}

impl SftpClient for Ssh2Client {
    fn connect(&mut self, host: &str, port: u16, timeout: Duration) -> FileIoResult<()> {
        debug!("Initializing SFTP connection...");
        let config = Config::resolve(self.config_file.as_deref(), host, port, timeout)?;
        let session = commons::connect(&config)?;
        debug!(
            "Connection established: {}",
            session.banner().unwrap_or("")
        );
        self.session = Some(session);
        Ok(())
    }

    fn authenticate(&mut self, username: &str, password: &str) -> FileIoResult<()> {
        let session = match self.session.as_mut() {
            Some(s) => s,
            None => return Err(FileIoError::new(FileIoErrorType::NotConnected)),
        };
        commons::auth_with_password(session, username, password)?;
        debug!("Starting SFTP subsystem...");
        let sftp = match session.sftp() {
            Ok(s) => s,
            Err(err) => {
                error!("Could not start SFTP subsystem: {}", err);
                return Err(FileIoError::new_ex(FileIoErrorType::ProtocolError, err));
            }
        };
        // the server tells where the session begins, usually the home directory
        self.wrkdir = match sftp.realpath(Path::new(".")) {
            Ok(p) => p,
            Err(err) => {
                warn!("Could not get working directory ({}); using /", err);
                PathBuf::from("/")
            }
        };
        self.sftp = Some(sftp);
        info!(
            "Connection established; working directory: {}",
            self.wrkdir.display()
        );
        Ok(())
    }

    fn disconnect(&mut self) -> FileIoResult<()> {
        debug!("Disconnecting from remote...");
        self.sftp = None;
        match self.session.take() {
            Some(session) => session
                .disconnect(None, "Mandi!", None)
                .map_err(|err| FileIoError::new_ex(FileIoErrorType::ConnectionError, err)),
            None => Err(FileIoError::new(FileIoErrorType::NotConnected)),
        }
    }

    fn pwd(&mut self) -> FileIoResult<String> {
        self.sftp()?;
        Ok(self.wrkdir.to_string_lossy().to_string())
    }

    fn chdir(&mut self, path: &str) -> FileIoResult<()> {
        let dir = self.path(path);
        let stat = self.sftp()?.stat(dir.as_path()).map_err(|err| {
            FileIoError::new_ex(
                FileIoErrorType::NoSuchFileOrDirectory,
                format!("\"{}\": {}", dir.display(), err),
            )
        })?;
        if !stat.is_dir() {
            return Err(FileIoError::new_ex(
                FileIoErrorType::NotADirectory,
                dir.display(),
            ));
        }
        debug!("Changed working directory to {}", dir.display());
        self.wrkdir = dir;
        Ok(())
    }

    fn mkdir(&mut self, path: &str) -> FileIoResult<()> {
        let dir = self.path(path);
        debug!("Creating directory {}", dir.display());
        // permissions are decided by the server umask
        self.sftp()?
            .mkdir(dir.as_path(), 0o777)
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::FileCreateDenied, err))
    }

    fn rmdir(&mut self, path: &str) -> FileIoResult<()> {
        let dir = self.path(path);
        debug!("Removing directory {}", dir.display());
        self.sftp()?
            .rmdir(dir.as_path())
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::CouldNotRemoveFile, err))
    }

    fn nlist(&mut self) -> FileIoResult<Vec<String>> {
        Ok(self
            .readdir()?
            .into_iter()
            .filter_map(|(p, _)| p.file_name().map(|x| x.to_string_lossy().to_string()))
            .filter(|name| name != "." && name != "..")
            .collect())
    }

    fn rawlist(&mut self) -> FileIoResult<Vec<RawEntry>> {
        Ok(self
            .readdir()?
            .into_iter()
            .map(|(path, stat)| RawEntry {
                path,
                metadata: Metadata::from(stat),
            })
            .filter(|entry| {
                let name = entry.name();
                name != "." && name != ".."
            })
            .collect())
    }

    fn get(&mut self, filename: &str, dest: &mut dyn Write) -> FileIoResult<u64> {
        let p = self.path(filename);
        debug!("Downloading {}", p.display());
        let mut file = self
            .sftp()?
            .open(p.as_path())
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::CouldNotOpenFile, err))?;
        let bytes = io::copy(&mut file, dest)
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::IoError, err))?;
        trace!("Downloaded {} bytes from {}", bytes, p.display());
        Ok(bytes)
    }

    fn put(&mut self, filename: &str, src: &mut dyn Read) -> FileIoResult<u64> {
        let p = self.path(filename);
        debug!("Uploading {}", p.display());
        let mut file = self
            .sftp()?
            .create(p.as_path())
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::FileCreateDenied, err))?;
        let bytes = io::copy(src, &mut file)
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::IoError, err))?;
        trace!("Uploaded {} bytes to {}", bytes, p.display());
        Ok(bytes)
    }

    fn delete(&mut self, filename: &str) -> FileIoResult<()> {
        let p = self.path(filename);
        debug!("Removing file {}", p.display());
        self.sftp()?
            .unlink(p.as_path())
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::CouldNotRemoveFile, err))
    }

    fn rename(&mut self, src: &str, dest: &str) -> FileIoResult<()> {
        let src = self.path(src);
        let dest = self.path(dest);
        debug!("Moving {} to {}", src.display(), dest.display());
        self.sftp()?
            .rename(src.as_path(), dest.as_path(), None)
            .map_err(|err| {
                FileIoError::new_ex(
                    FileIoErrorType::FileCreateDenied,
                    format!("\"{}\": {}", dest.display(), err),
                )
            })
    }

    fn chmod(&mut self, mode: u32, filename: &str) -> FileIoResult<()> {
        let p = self.path(filename);
        debug!("Setting mode {:o} on {}", mode, p.display());
        let stat = FileStat {
            size: None,
            uid: None,
            gid: None,
            perm: Some(mode),
            atime: None,
            mtime: None,
        };
        self.sftp()?
            .setstat(p.as_path(), stat)
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::PexError, err))
    }
}
