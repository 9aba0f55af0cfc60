//! ## SFTP
//!
//! the file I/O backend over SFTP

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

use super::{Ssh2Client, SftpClient};
use crate::fs::{
    DirEntry, Destination, FileIo, FileIoError, FileIoErrorType, FileIoResult, IoParams, RawEntry,
    ReadOutcome, Source,
};

use std::fs::File as StdFile;

/// SFTP file I/O backend.
///
/// Implements `FileIo` on top of the single-level primitives of an [`SftpClient`];
/// recursive `mkdir` and `rmdir` walk the remote tree moving the client working directory,
/// which is restored before returning.
pub struct SftpIo<C: SftpClient = Ssh2Client> {
    client: C,
    connected: bool,
    skip_leading_segment: bool,
}

impl SftpIo<Ssh2Client> {
    /// Creates a new `SftpIo` using libssh2
    pub fn new() -> Self {
        Self::with_client(Ssh2Client::default())
    }
}

impl Default for SftpIo<Ssh2Client> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SftpClient> SftpIo<C> {
    /// Creates a new `SftpIo` on top of `client`
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            connected: false,
            skip_leading_segment: false,
        }
    }

    /// Recursive `mkdir` ignores the first segment of the path, stops at the first empty or `0`
    /// segment and fails on any segment which already exists.
    /// This is the legacy walk, kept for compatibility: `a/b/c` creates `b` and `b/c` in the
    /// working directory.
    pub fn skip_leading_segment(mut self, skip: bool) -> Self {
        self.skip_leading_segment = skip;
        self
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    // -- private

    /// Check connection status
    fn check_connection(&self) -> FileIoResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(FileIoError::new(FileIoErrorType::NotConnected))
        }
    }

    /// Split `host:port`; if the port is not embedded, `port` is used
    fn parse_host(host: &str, port: u16) -> FileIoResult<(String, u16)> {
        match host.split_once(':') {
            Some((address, p)) => match p.parse::<u16>() {
                Ok(p) => Ok((address.to_string(), p)),
                Err(_) => Err(FileIoError::new_ex(
                    FileIoErrorType::BadAddress,
                    format!("invalid port in \"{}\"", host),
                )),
            },
            None => Ok((host.to_string(), port)),
        }
    }

    /// Get the working directory of the client, logging failures
    fn wrkdir(&mut self) -> Option<String> {
        match self.client.pwd() {
            Ok(wrkdir) => Some(wrkdir),
            Err(err) => {
                error!("Could not get working directory: {}", err);
                None
            }
        }
    }

    /// Go back to `wrkdir` after a walk
    fn restore_wrkdir(&mut self, wrkdir: &str) -> bool {
        trace!("Restoring working directory {}", wrkdir);
        ok_or_log(self.client.chdir(wrkdir), "restore working directory", wrkdir)
    }

    /// Create every missing directory along `dir`, like `mkdir -p`
    fn mkdir_walk(&mut self, dir: &str) -> bool {
        if dir.is_empty() {
            error!("Could not create directory: empty path");
            return false;
        }
        let wrkdir = match self.wrkdir() {
            Some(wrkdir) => wrkdir,
            None => return false,
        };
        let mut result = true;
        if dir.starts_with('/') {
            result = ok_or_log(self.client.chdir("/"), "enter directory", "/");
        }
        if result {
            for segment in dir.split('/').filter(|x| !x.is_empty()) {
                let created = self.client.mkdir(segment);
                // existing directories are entered as they are
                if let Err(err) = self.client.chdir(segment) {
                    match created {
                        Err(mkdir_err) => {
                            error!("Could not create directory {}: {}", segment, mkdir_err)
                        }
                        Ok(()) => error!("Could not enter directory {}: {}", segment, err),
                    }
                    result = false;
                    break;
                }
                match created {
                    Ok(()) => debug!("Created directory {}", segment),
                    Err(err) => {
                        trace!("Directory {} not created ({}); already exists", segment, err)
                    }
                }
            }
        }
        self.restore_wrkdir(wrkdir.as_str()) && result
    }

    /// Legacy walk; see `skip_leading_segment`
    fn mkdir_walk_skipping_leading_segment(&mut self, dir: &str) -> bool {
        let wrkdir = match self.wrkdir() {
            Some(wrkdir) => wrkdir,
            None => return false,
        };
        let mut result = true;
        for segment in dir
            .split('/')
            .skip(1)
            .take_while(|x| !x.is_empty() && *x != "0")
        {
            if let Err(err) = self
                .client
                .mkdir(segment)
                .and_then(|()| self.client.chdir(segment))
            {
                error!("Could not create directory {}: {}", segment, err);
                result = false;
                break;
            }
            debug!("Created directory {}", segment);
        }
        self.restore_wrkdir(wrkdir.as_str()) && result
    }

    /// Remove `dir` with all of its content.
    /// Sibling entries are removed even after a failure.
    fn rmdir_all(&mut self, dir: &str) -> FileIoResult<bool> {
        let wrkdir = match self.wrkdir() {
            Some(wrkdir) => wrkdir,
            None => return Ok(false),
        };
        if let Err(err) = self.client.chdir(dir) {
            error!("Could not enter directory {}: {}", dir, err);
            return Err(FileIoError::new_ex(FileIoErrorType::NotADirectory, dir));
        }
        let entries = match self.client.nlist() {
            Ok(entries) => entries,
            Err(err) => {
                error!("Could not list directory {}: {}", dir, err);
                self.restore_wrkdir(wrkdir.as_str());
                return Ok(false);
            }
        };
        if entries.is_empty() {
            return Ok(self.restore_wrkdir(wrkdir.as_str()) && self.remove_dir(dir));
        }
        let mut result = true;
        for entry in entries.iter().filter(|x| *x != "." && *x != "..") {
            let removed = if self.client.chdir(entry).is_ok() {
                ok_or_log(self.client.chdir(".."), "leave directory", entry)
                    && match self.rmdir_all(entry) {
                        Ok(removed) => removed,
                        Err(err) => {
                            error!("Could not remove directory {}: {}", entry, err);
                            false
                        }
                    }
            } else {
                self.remove_file(entry)
            };
            result = removed && result;
        }
        let restored = self.restore_wrkdir(wrkdir.as_str());
        Ok(restored && self.remove_dir(dir) && result)
    }

    fn remove_dir(&mut self, dir: &str) -> bool {
        debug!("Removing directory {}", dir);
        ok_or_log(self.client.rmdir(dir), "remove directory", dir)
    }

    fn remove_file(&mut self, filename: &str) -> bool {
        debug!("Removing file {}", filename);
        ok_or_log(self.client.delete(filename), "remove file", filename)
    }
}

/// Collapse `result` into a boolean, logging the failure
fn ok_or_log<T>(result: FileIoResult<T>, action: &str, target: &str) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            error!("Could not {} {}: {}", action, target, err);
            false
        }
    }
}

impl<C: SftpClient> FileIo for SftpIo<C> {
    fn open(&mut self, params: &IoParams) -> FileIoResult<()> {
        if self.connected {
            return Err(FileIoError::new(FileIoErrorType::AlreadyConnected));
        }
        let params = match params.generic_params() {
            Some(params) => params,
            None => {
                return Err(FileIoError::new_ex(
                    FileIoErrorType::BadParams,
                    "expected SFTP parameters",
                ))
            }
        };
        let (host, port) = Self::parse_host(params.host.as_str(), params.port)?;
        let context = format!(
            "unable to open SFTP connection as {}@{}",
            params.username, params.host
        );
        debug!(
            "Connecting to {}:{} (timeout: {}s)",
            host,
            port,
            params.timeout.as_secs()
        );
        if let Err(err) = self.client.connect(host.as_str(), port, params.timeout) {
            error!("{}: {}", context, err);
            return Err(FileIoError::new_ex(
                FileIoErrorType::ConnectionError,
                format!("{}: {}", context, err),
            ));
        }
        if let Err(err) = self
            .client
            .authenticate(params.username.as_str(), params.password.as_str())
        {
            error!("{}: {}", context, err);
            if let Err(err) = self.client.disconnect() {
                warn!("Could not terminate session: {}", err);
            }
            return Err(FileIoError::new_ex(
                FileIoErrorType::ConnectionError,
                context,
            ));
        }
        self.connected = true;
        info!("Connected to {}:{} as {}", host, port, params.username);
        Ok(())
    }

    fn close(&mut self) {
        if !self.connected {
            debug!("Not connected; nothing to close");
            return;
        }
        debug!("Disconnecting from remote...");
        if let Err(err) = self.client.disconnect() {
            error!("Could not terminate session: {}", err);
        }
        self.connected = false;
        info!("Disconnected");
    }

    fn is_open(&self) -> bool {
        self.connected
    }

    fn pwd(&mut self) -> FileIoResult<String> {
        self.check_connection()?;
        self.client.pwd()
    }

    fn cd(&mut self, dir: &str) -> bool {
        debug!("Changing working directory to {}", dir);
        ok_or_log(
            self.check_connection().and_then(|()| self.client.chdir(dir)),
            "change working directory to",
            dir,
        )
    }

    fn mkdir(&mut self, dir: &str, mode: u32, recursive: bool) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not create directory {}: {}", dir, err);
            return false;
        }
        trace!("Ignoring mode {:o} for {}: the server umask applies", mode, dir);
        match (recursive, self.skip_leading_segment) {
            (false, _) => {
                debug!("Creating directory {}", dir);
                ok_or_log(self.client.mkdir(dir), "create directory", dir)
            }
            (true, false) => {
                debug!("Creating directory {} recursively", dir);
                self.mkdir_walk(dir)
            }
            (true, true) => {
                debug!(
                    "Creating directory {} recursively, skipping the leading segment",
                    dir
                );
                self.mkdir_walk_skipping_leading_segment(dir)
            }
        }
    }

    fn rmdir(&mut self, dir: &str, recursive: bool) -> FileIoResult<bool> {
        if let Err(err) = self.check_connection() {
            error!("Could not remove directory {}: {}", dir, err);
            return Ok(false);
        }
        match recursive {
            false => Ok(self.remove_dir(dir)),
            true => {
                debug!("Removing directory {} recursively", dir);
                self.rmdir_all(dir)
            }
        }
    }

    fn read(&mut self, filename: &str, dest: Option<Destination<'_>>) -> ReadOutcome {
        if let Err(err) = self.check_connection() {
            error!("Could not read {}: {}", filename, err);
            return ReadOutcome::Failed;
        }
        debug!("Reading {}", filename);
        let result = match dest {
            None => {
                let mut buffer: Vec<u8> = Vec::new();
                self.client
                    .get(filename, &mut buffer)
                    .map(|_| ReadOutcome::Data(buffer))
            }
            Some(Destination::Stream(writer)) => self
                .client
                .get(filename, writer)
                .map(ReadOutcome::Written),
            Some(Destination::Path(p)) => match StdFile::create(p) {
                Ok(mut file) => self
                    .client
                    .get(filename, &mut file)
                    .map(ReadOutcome::Written),
                Err(err) => Err(FileIoError::new_ex(
                    FileIoErrorType::FileCreateDenied,
                    format!("{}: {}", p.display(), err),
                )),
            },
        };
        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Could not read {}: {}", filename, err);
                ReadOutcome::Failed
            }
        }
    }

    fn write(&mut self, filename: &str, src: Source<'_>) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not write {}: {}", filename, err);
            return false;
        }
        debug!("Writing {}", filename);
        let mut reader = match src.into_reader() {
            Ok(reader) => reader,
            Err(err) => {
                error!("Could not open source for {}: {}", filename, err);
                return false;
            }
        };
        match self.client.put(filename, &mut reader) {
            Ok(bytes) => {
                trace!("Written {} bytes to {}", bytes, filename);
                true
            }
            Err(err) => {
                error!("Could not write {}: {}", filename, err);
                false
            }
        }
    }

    fn rm(&mut self, filename: &str) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not remove file {}: {}", filename, err);
            return false;
        }
        self.remove_file(filename)
    }

    fn mv(&mut self, src: &str, dest: &str) -> bool {
        debug!("Moving {} to {}", src, dest);
        ok_or_log(
            self.check_connection()
                .and_then(|()| self.client.rename(src, dest)),
            "move",
            src,
        )
    }

    fn chmod(&mut self, filename: &str, mode: u32) -> bool {
        debug!("Setting mode {:o} on {}", mode, filename);
        ok_or_log(
            self.check_connection()
                .and_then(|()| self.client.chmod(mode, filename)),
            "change mode of",
            filename,
        )
    }

    fn ls(&mut self) -> FileIoResult<Vec<DirEntry>> {
        self.check_connection()?;
        let wrkdir = self.client.pwd()?;
        debug!("Listing {}", wrkdir);
        Ok(self
            .client
            .nlist()?
            .into_iter()
            .filter(|x| x != "." && x != "..")
            .map(|name| DirEntry::new(wrkdir.as_str(), name))
            .collect())
    }

    fn rawls(&mut self) -> FileIoResult<Vec<RawEntry>> {
        self.check_connection()?;
        debug!("Listing working directory with attributes");
        self.client.rawlist()
    }
}
