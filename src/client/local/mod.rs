//! ## Local
//!
//! the file I/O backend over the local file system

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

use crate::fs::{
    DirEntry, Destination, FileIo, FileIoError, FileIoErrorType, FileIoResult, IoParams, Metadata,
    RawEntry, ReadOutcome, Source,
};
use crate::utils::path as path_utils;

use std::fs::{self, File as StdFile};
use std::io;
#[cfg(target_family = "unix")]
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::{Path, PathBuf};

/// Local file system backend.
/// The working directory is kept by the backend, the process working directory is never changed.
#[derive(Default)]
pub struct LocalIo {
    wrkdir: PathBuf,
    connected: bool,
}

impl LocalIo {
    /// Check connection status
    fn check_connection(&self) -> FileIoResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(FileIoError::new(FileIoErrorType::NotConnected))
        }
    }

    /// Resolve `p` against the working directory
    fn path(&self, p: &str) -> PathBuf {
        path_utils::resolve(self.wrkdir.as_path(), Path::new(p))
    }

    fn wrkdir_str(&self) -> String {
        self.wrkdir.to_string_lossy().to_string()
    }

    fn create_dir(&self, dir: &Path, mode: u32, recursive: bool) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(recursive);
        #[cfg(target_family = "unix")]
        builder.mode(mode);
        #[cfg(not(target_family = "unix"))]
        trace!("Ignoring mode {:o} for {}", mode, dir.display());
        builder.create(dir)
    }

    fn get(&self, p: &Path, dest: &mut dyn io::Write) -> io::Result<u64> {
        let mut file = StdFile::open(p)?;
        io::copy(&mut file, dest)
    }

    #[cfg(target_family = "unix")]
    fn set_mode(&self, p: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(p, fs::Permissions::from_mode(mode))
    }

    #[cfg(not(target_family = "unix"))]
    fn set_mode(&self, _p: &Path, _mode: u32) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            "unix permissions are not supported on this platform",
        ))
    }

    fn entries(&self) -> FileIoResult<Vec<PathBuf>> {
        let mut entries = fs::read_dir(self.wrkdir.as_path())
            .and_then(|dir| {
                dir.map(|entry| entry.map(|x| x.path()))
                    .collect::<io::Result<Vec<PathBuf>>>()
            })
            .map_err(|err: io::Error| {
                error!("Could not read directory {}: {}", self.wrkdir.display(), err);
                FileIoError::new_ex(FileIoErrorType::IoError, err)
            })?;
        entries.sort();
        Ok(entries)
    }
}

/// Remove `dir` and everything below it. A failing entry doesn't stop the walk:
/// siblings are still removed and the result is `false`.
/// Symlinks are removed as files and never followed.
fn remove_tree(dir: &Path, remove_file: &dyn Fn(&Path) -> io::Result<()>) -> bool {
    let mut entries = match fs::read_dir(dir).and_then(|entries| {
        entries
            .map(|entry| entry.map(|x| x.path()))
            .collect::<io::Result<Vec<PathBuf>>>()
    }) {
        Ok(entries) => entries,
        Err(err) => {
            error!("Could not list directory {}: {}", dir.display(), err);
            return false;
        }
    };
    entries.sort();
    let mut result = true;
    for entry in entries.iter() {
        let is_dir = fs::symlink_metadata(entry.as_path())
            .map(|x| x.is_dir())
            .unwrap_or(false);
        let removed = if is_dir {
            remove_tree(entry.as_path(), remove_file)
        } else {
            trace!("Removing file {}", entry.display());
            ok_or_log(remove_file(entry.as_path()), "remove file", entry.as_path())
        };
        result = removed && result;
    }
    result && ok_or_log(fs::remove_dir(dir), "remove directory", dir)
}

/// Collapse `result` into a boolean, logging the failure
fn ok_or_log<T>(result: io::Result<T>, action: &str, target: &Path) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            error!("Could not {} {}: {}", action, target.display(), err);
            false
        }
    }
}

impl FileIo for LocalIo {
    fn open(&mut self, params: &IoParams) -> FileIoResult<()> {
        if self.connected {
            return Err(FileIoError::new(FileIoErrorType::AlreadyConnected));
        }
        let params = match params.local_params() {
            Some(params) => params,
            None => {
                return Err(FileIoError::new_ex(
                    FileIoErrorType::BadParams,
                    "expected local parameters",
                ))
            }
        };
        let cwd = std::env::current_dir()
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::IoError, err))?;
        let wrkdir = path_utils::resolve(cwd.as_path(), params.path.as_path());
        if !wrkdir.is_dir() {
            error!("{} is not a directory", wrkdir.display());
            return Err(FileIoError::new_ex(
                FileIoErrorType::NoSuchFileOrDirectory,
                wrkdir.display(),
            ));
        }
        info!("Opened local file system at {}", wrkdir.display());
        self.wrkdir = wrkdir;
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) {
        if !self.connected {
            debug!("Not connected; nothing to close");
            return;
        }
        self.connected = false;
        info!("Closed local file system");
    }

    fn is_open(&self) -> bool {
        self.connected
    }

    fn pwd(&mut self) -> FileIoResult<String> {
        self.check_connection()?;
        Ok(self.wrkdir_str())
    }

    fn cd(&mut self, dir: &str) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not change working directory to {}: {}", dir, err);
            return false;
        }
        let p = self.path(dir);
        if !p.is_dir() {
            error!("Could not change working directory to {}: not a directory", p.display());
            return false;
        }
        debug!("Changed working directory to {}", p.display());
        self.wrkdir = p;
        true
    }

    fn mkdir(&mut self, dir: &str, mode: u32, recursive: bool) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not create directory {}: {}", dir, err);
            return false;
        }
        let p = self.path(dir);
        debug!("Creating directory {} (mode: {:o})", p.display(), mode);
        ok_or_log(
            self.create_dir(p.as_path(), mode, recursive),
            "create directory",
            p.as_path(),
        )
    }

    fn rmdir(&mut self, dir: &str, recursive: bool) -> FileIoResult<bool> {
        if let Err(err) = self.check_connection() {
            error!("Could not remove directory {}: {}", dir, err);
            return Ok(false);
        }
        let p = self.path(dir);
        match recursive {
            false => {
                debug!("Removing directory {}", p.display());
                Ok(ok_or_log(fs::remove_dir(p.as_path()), "remove directory", p.as_path()))
            }
            true if p.is_dir() => {
                debug!("Removing directory {} recursively", p.display());
                Ok(remove_tree(p.as_path(), &|x| fs::remove_file(x)))
            }
            true => {
                error!("Could not enter directory {}", p.display());
                Err(FileIoError::new_ex(FileIoErrorType::NotADirectory, dir))
            }
        }
    }

    fn read(&mut self, filename: &str, dest: Option<Destination<'_>>) -> ReadOutcome {
        if let Err(err) = self.check_connection() {
            error!("Could not read {}: {}", filename, err);
            return ReadOutcome::Failed;
        }
        let p = self.path(filename);
        debug!("Reading {}", p.display());
        let result = match dest {
            None => fs::read(p.as_path()).map(ReadOutcome::Data),
            Some(Destination::Stream(writer)) => {
                self.get(p.as_path(), writer).map(ReadOutcome::Written)
            }
            Some(Destination::Path(local)) => StdFile::create(local)
                .and_then(|mut file| self.get(p.as_path(), &mut file))
                .map(ReadOutcome::Written),
        };
        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Could not read {}: {}", p.display(), err);
                ReadOutcome::Failed
            }
        }
    }

    fn write(&mut self, filename: &str, src: Source<'_>) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not write {}: {}", filename, err);
            return false;
        }
        let p = self.path(filename);
        debug!("Writing {}", p.display());
        // open the source first, so a missing source doesn't truncate the target
        let mut reader = match src.into_reader() {
            Ok(reader) => reader,
            Err(err) => {
                error!("Could not open source for {}: {}", p.display(), err);
                return false;
            }
        };
        ok_or_log(
            StdFile::create(p.as_path()).and_then(|mut file| io::copy(&mut reader, &mut file)),
            "write",
            p.as_path(),
        )
    }

    fn rm(&mut self, filename: &str) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not remove file {}: {}", filename, err);
            return false;
        }
        let p = self.path(filename);
        debug!("Removing file {}", p.display());
        ok_or_log(fs::remove_file(p.as_path()), "remove file", p.as_path())
    }

    fn mv(&mut self, src: &str, dest: &str) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not move {}: {}", src, err);
            return false;
        }
        let src = self.path(src);
        let dest = self.path(dest);
        debug!("Moving {} to {}", src.display(), dest.display());
        ok_or_log(fs::rename(src.as_path(), dest.as_path()), "move", src.as_path())
    }

    fn chmod(&mut self, filename: &str, mode: u32) -> bool {
        if let Err(err) = self.check_connection() {
            error!("Could not change mode of {}: {}", filename, err);
            return false;
        }
        let p = self.path(filename);
        debug!("Setting mode {:o} on {}", mode, p.display());
        ok_or_log(self.set_mode(p.as_path(), mode), "change mode of", p.as_path())
    }

    fn ls(&mut self) -> FileIoResult<Vec<DirEntry>> {
        self.check_connection()?;
        let wrkdir = self.wrkdir_str();
        Ok(self
            .entries()?
            .iter()
            .filter_map(|p| p.file_name().map(|x| x.to_string_lossy().to_string()))
            .map(|name| DirEntry::new(wrkdir.as_str(), name))
            .collect())
    }

    fn rawls(&mut self) -> FileIoResult<Vec<RawEntry>> {
        self.check_connection()?;
        let mut entries = Vec::new();
        for path in self.entries()? {
            match fs::symlink_metadata(path.as_path()) {
                Ok(metadata) => entries.push(RawEntry {
                    metadata: Metadata::from(metadata),
                    path,
                }),
                Err(err) => warn!("Could not stat {}: {}", path.display(), err),
            }
        }
        Ok(entries)
    }
}
