//! ## Sftp
//!
//! in-memory sftp client

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

use crate::client::ssh::SftpClient;
use crate::fs::{FileType, Metadata, RawEntry, UnixPex};
use crate::utils::path as path_utils;
use crate::{FileIoError, FileIoErrorType, FileIoResult};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

enum Node {
    Dir,
    File(Vec<u8>),
}

/// Sftp client working on an in-memory tree.
/// Accepts the credentials `sftp:password`; starts in `/home/sftp`.
pub struct MockSftpClient {
    tree: BTreeMap<PathBuf, Node>,
    modes: HashMap<PathBuf, u32>,
    wrkdir: PathBuf,
    transport: bool,
    authenticated: bool,
    /// Host, port and timeout of the last `connect`
    pub connected_to: Option<(String, u16, Duration)>,
    refuse_connection: bool,
    failing_removals: HashSet<PathBuf>,
    failing_mkdirs: HashSet<PathBuf>,
}

impl Default for MockSftpClient {
    fn default() -> Self {
        let mut tree = BTreeMap::new();
        tree.insert(PathBuf::from("/"), Node::Dir);
        tree.insert(PathBuf::from("/home"), Node::Dir);
        tree.insert(PathBuf::from("/home/sftp"), Node::Dir);
        Self {
            tree,
            modes: HashMap::new(),
            wrkdir: PathBuf::from("/home/sftp"),
            transport: false,
            authenticated: false,
            connected_to: None,
            refuse_connection: false,
            failing_removals: HashSet::new(),
            failing_mkdirs: HashSet::new(),
        }
    }
}

impl MockSftpClient {
    /// Add a directory, creating its parents
    pub fn with_dir<P: AsRef<Path>>(mut self, p: P) -> Self {
        let p = self.resolve(p.as_ref());
        for ancestor in p.ancestors() {
            self.tree
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
        self
    }

    /// Add a file, creating its parents
    pub fn with_file<P: AsRef<Path>>(mut self, p: P, data: &[u8]) -> Self {
        let p = self.resolve(p.as_ref());
        if let Some(parent) = p.parent() {
            self = self.with_dir(parent);
        }
        self.tree.insert(p, Node::File(data.to_vec()));
        self
    }

    /// Make `connect` fail
    pub fn refuse_connection(mut self) -> Self {
        self.refuse_connection = true;
        self
    }

    /// Make `delete` and `rmdir` fail on `p`
    pub fn fail_removal<P: AsRef<Path>>(mut self, p: P) -> Self {
        let p = self.resolve(p.as_ref());
        self.failing_removals.insert(p);
        self
    }

    /// Make `mkdir` fail on `p`
    pub fn fail_mkdir<P: AsRef<Path>>(mut self, p: P) -> Self {
        let p = self.resolve(p.as_ref());
        self.failing_mkdirs.insert(p);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn exists<P: AsRef<Path>>(&self, p: P) -> bool {
        self.tree.contains_key(&self.resolve(p.as_ref()))
    }

    pub fn is_dir<P: AsRef<Path>>(&self, p: P) -> bool {
        matches!(self.tree.get(&self.resolve(p.as_ref())), Some(Node::Dir))
    }

    /// Content of the file at `p`
    pub fn file<P: AsRef<Path>>(&self, p: P) -> Option<&[u8]> {
        match self.tree.get(&self.resolve(p.as_ref())) {
            Some(Node::File(data)) => Some(data.as_slice()),
            _ => None,
        }
    }

    pub fn mode<P: AsRef<Path>>(&self, p: P) -> Option<u32> {
        self.modes.get(&self.resolve(p.as_ref())).copied()
    }

    // -- private

    fn resolve(&self, p: &Path) -> PathBuf {
        path_utils::resolve(self.wrkdir.as_path(), p)
    }

    fn check_auth(&self) -> FileIoResult<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(FileIoError::new(FileIoErrorType::NotConnected))
        }
    }

    fn children(&self, dir: &Path) -> Vec<PathBuf> {
        self.tree
            .keys()
            .filter(|k| k.parent() == Some(dir))
            .cloned()
            .collect()
    }

    fn parent_is_dir(&self, p: &Path) -> bool {
        match p.parent() {
            Some(parent) => matches!(self.tree.get(parent), Some(Node::Dir)),
            None => false,
        }
    }
}

impl SftpClient for MockSftpClient {
    fn connect(&mut self, host: &str, port: u16, timeout: Duration) -> FileIoResult<()> {
        self.connected_to = Some((host.to_string(), port, timeout));
        if self.refuse_connection {
            return Err(FileIoError::new_ex(
                FileIoErrorType::ConnectionError,
                "connection refused",
            ));
        }
        self.transport = true;
        Ok(())
    }

    fn authenticate(&mut self, username: &str, password: &str) -> FileIoResult<()> {
        if !self.transport {
            return Err(FileIoError::new(FileIoErrorType::NotConnected));
        }
        match (username, password) {
            ("sftp", "password") => {
                self.authenticated = true;
                Ok(())
            }
            _ => Err(FileIoError::new(FileIoErrorType::AuthenticationFailed)),
        }
    }

    fn disconnect(&mut self) -> FileIoResult<()> {
        if !self.transport {
            return Err(FileIoError::new(FileIoErrorType::NotConnected));
        }
        self.transport = false;
        self.authenticated = false;
        Ok(())
    }

    fn pwd(&mut self) -> FileIoResult<String> {
        self.check_auth()?;
        Ok(self.wrkdir.to_string_lossy().to_string())
    }

    fn chdir(&mut self, path: &str) -> FileIoResult<()> {
        self.check_auth()?;
        let p = self.resolve(Path::new(path));
        match self.tree.get(&p) {
            Some(Node::Dir) => {
                self.wrkdir = p;
                Ok(())
            }
            Some(Node::File(_)) => Err(FileIoError::new_ex(FileIoErrorType::NotADirectory, path)),
            None => Err(FileIoError::new_ex(
                FileIoErrorType::NoSuchFileOrDirectory,
                path,
            )),
        }
    }

    fn mkdir(&mut self, path: &str) -> FileIoResult<()> {
        self.check_auth()?;
        let p = self.resolve(Path::new(path));
        if self.failing_mkdirs.contains(&p) {
            return Err(FileIoError::new(FileIoErrorType::PexError));
        }
        if self.tree.contains_key(&p) {
            return Err(FileIoError::new(FileIoErrorType::DirectoryAlreadyExists));
        }
        if !self.parent_is_dir(p.as_path()) {
            return Err(FileIoError::new(FileIoErrorType::NoSuchFileOrDirectory));
        }
        self.tree.insert(p, Node::Dir);
        Ok(())
    }

    fn rmdir(&mut self, path: &str) -> FileIoResult<()> {
        self.check_auth()?;
        let p = self.resolve(Path::new(path));
        if self.failing_removals.contains(&p) {
            return Err(FileIoError::new(FileIoErrorType::PexError));
        }
        match self.tree.get(&p) {
            Some(Node::Dir) if self.children(p.as_path()).is_empty() => {
                self.tree.remove(&p);
                Ok(())
            }
            Some(Node::Dir) => Err(FileIoError::new_ex(
                FileIoErrorType::CouldNotRemoveFile,
                "directory not empty",
            )),
            Some(Node::File(_)) => Err(FileIoError::new(FileIoErrorType::NotADirectory)),
            None => Err(FileIoError::new(FileIoErrorType::NoSuchFileOrDirectory)),
        }
    }

    fn nlist(&mut self) -> FileIoResult<Vec<String>> {
        self.check_auth()?;
        Ok(self
            .children(self.wrkdir.as_path())
            .iter()
            .filter_map(|p| p.file_name().map(|x| x.to_string_lossy().to_string()))
            .collect())
    }

    fn rawlist(&mut self) -> FileIoResult<Vec<RawEntry>> {
        self.check_auth()?;
        Ok(self
            .children(self.wrkdir.as_path())
            .into_iter()
            .map(|p| {
                let metadata = match self.tree.get(&p) {
                    Some(Node::File(data)) => Metadata::default()
                        .file_type(FileType::File)
                        .size(data.len() as u64),
                    _ => Metadata::default().file_type(FileType::Directory),
                };
                let metadata = match self.modes.get(&p) {
                    Some(mode) => metadata.mode(UnixPex::from(*mode)),
                    None => metadata,
                };
                RawEntry { path: p, metadata }
            })
            .collect())
    }

    fn get(&mut self, filename: &str, dest: &mut dyn Write) -> FileIoResult<u64> {
        self.check_auth()?;
        match self.tree.get(&self.resolve(Path::new(filename))) {
            Some(Node::File(data)) => {
                dest.write_all(data.as_slice())
                    .map_err(|err| FileIoError::new_ex(FileIoErrorType::IoError, err))?;
                Ok(data.len() as u64)
            }
            _ => Err(FileIoError::new_ex(
                FileIoErrorType::CouldNotOpenFile,
                filename,
            )),
        }
    }

    fn put(&mut self, filename: &str, src: &mut dyn Read) -> FileIoResult<u64> {
        self.check_auth()?;
        let p = self.resolve(Path::new(filename));
        if !self.parent_is_dir(p.as_path()) || matches!(self.tree.get(&p), Some(Node::Dir)) {
            return Err(FileIoError::new_ex(
                FileIoErrorType::FileCreateDenied,
                filename,
            ));
        }
        let mut data = Vec::new();
        src.read_to_end(&mut data)
            .map_err(|err| FileIoError::new_ex(FileIoErrorType::IoError, err))?;
        let size = data.len() as u64;
        self.tree.insert(p, Node::File(data));
        Ok(size)
    }

    fn delete(&mut self, filename: &str) -> FileIoResult<()> {
        self.check_auth()?;
        let p = self.resolve(Path::new(filename));
        if self.failing_removals.contains(&p) {
            return Err(FileIoError::new(FileIoErrorType::PexError));
        }
        match self.tree.get(&p) {
            Some(Node::File(_)) => {
                self.tree.remove(&p);
                Ok(())
            }
            _ => Err(FileIoError::new_ex(
                FileIoErrorType::CouldNotRemoveFile,
                filename,
            )),
        }
    }

    fn rename(&mut self, src: &str, dest: &str) -> FileIoResult<()> {
        self.check_auth()?;
        let src = self.resolve(Path::new(src));
        let dest = self.resolve(Path::new(dest));
        if !self.tree.contains_key(&src) {
            return Err(FileIoError::new(FileIoErrorType::NoSuchFileOrDirectory));
        }
        if !self.parent_is_dir(dest.as_path()) || dest.starts_with(src.as_path()) {
            return Err(FileIoError::new(FileIoErrorType::FileCreateDenied));
        }
        let moved: Vec<PathBuf> = self
            .tree
            .keys()
            .filter(|k| k.starts_with(src.as_path()))
            .cloned()
            .collect();
        for p in moved {
            if let (Some(node), Ok(rel)) = (self.tree.remove(&p), p.strip_prefix(src.as_path())) {
                let target = match rel.as_os_str().is_empty() {
                    true => dest.clone(),
                    false => dest.join(rel),
                };
                self.tree.insert(target, node);
            }
        }
        Ok(())
    }

    fn chmod(&mut self, mode: u32, filename: &str) -> FileIoResult<()> {
        self.check_auth()?;
        let p = self.resolve(Path::new(filename));
        if !self.tree.contains_key(&p) {
            return Err(FileIoError::new(FileIoErrorType::NoSuchFileOrDirectory));
        }
        self.modes.insert(p, mode);
        Ok(())
    }
}
