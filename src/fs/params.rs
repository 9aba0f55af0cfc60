//! ## Params
//!
//! backend connection parameters

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
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default SSH port, used when the host doesn't carry one
pub const DEFAULT_PORT: u16 = 22;
/// Default connection timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// ### IoParams
///
/// Holds the parameters used to open a backend.
/// The variant also selects which backend is built by `client::io_for`.
#[derive(Debug, Clone)]
pub enum IoParams {
    #[cfg(feature = "ssh")]
    Sftp(GenericParams),
    Local(LocalParams),
}

/// Protocol params used by network backends
#[derive(Debug, Clone)]
pub struct GenericParams {
    /// Remote host; may embed the port as `host:port`
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// Parameters for the local file system backend
#[derive(Debug, Clone)]
pub struct LocalParams {
    /// Directory the backend starts in
    pub path: PathBuf,
}

#[cfg(feature = "ssh")]
impl Default for IoParams {
    fn default() -> Self {
        Self::Sftp(GenericParams::default())
    }
}

impl IoParams {
    /// Retrieve generic parameters from params if any
    #[allow(unreachable_patterns)]
    pub fn generic_params(&self) -> Option<&GenericParams> {
        match self {
            #[cfg(feature = "ssh")]
            IoParams::Sftp(params) => Some(params),
            _ => None,
        }
    }

    /// Retrieve mutable generic parameters from params if any
    #[allow(unreachable_patterns)]
    pub fn mut_generic_params(&mut self) -> Option<&mut GenericParams> {
        match self {
            #[cfg(feature = "ssh")]
            IoParams::Sftp(params) => Some(params),
            _ => None,
        }
    }

    /// Retrieve local file system parameters if any
    #[allow(unreachable_patterns)]
    pub fn local_params(&self) -> Option<&LocalParams> {
        match self {
            IoParams::Local(params) => Some(params),
            _ => None,
        }
    }
}

// -- Generic protocol params

impl Default for GenericParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            username: String::default(),
            password: String::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GenericParams {
    /// Set host to params. The port may be embedded as `host:port`
    pub fn host<S: AsRef<str>>(mut self, host: S) -> Self {
        self.host = host.as_ref().to_string();
        self
    }

    /// Set port to params; used only when the host doesn't embed one
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set username for params
    pub fn username<S: AsRef<str>>(mut self, username: S) -> Self {
        self.username = username.as_ref().to_string();
        self
    }

    /// Set password for params
    pub fn password<S: AsRef<str>>(mut self, password: S) -> Self {
        self.password = password.as_ref().to_string();
        self
    }

    /// Set connection timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// -- local params

impl LocalParams {
    /// Instantiates a new `LocalParams`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}
