//! ## Config
//!
//! resolves the ssh session configuration from the connection parameters and,
//! optionally, from an OpenSSH client configuration file

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
use crate::{FileIoError, FileIoErrorType, FileIoResult};

use ssh2_config::{HostParams, SshConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Ssh session configuration
pub struct Config {
    pub params: HostParams,
    /// Host the tcp stream is opened with
    pub host: String,
    /// Address is host:port
    pub address: String,
    pub connection_timeout: Duration,
    pub connection_attempts: usize,
}

impl Config {
    /// Resolve the configuration for `host` and `port`.
    /// If `config_file` is provided, `host` is looked up in it; the port and the timeout
    /// passed to this function always take priority over the file.
    pub fn resolve(
        config_file: Option<&Path>,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> FileIoResult<Self> {
        let params = match config_file {
            Some(p) => Self::parse(p, host)?,
            None => HostParams::default(),
        };
        Ok(Self::from_params(params, host, port, timeout))
    }

    // -- private

    /// Create `Config` from `HostParams` and connection parameters
    fn from_params(params: HostParams, host: &str, port: u16, timeout: Duration) -> Self {
        let host = Self::resolve_host(&params, host);
        Config {
            address: format!("{}:{}", host, port),
            host,
            connection_timeout: timeout,
            connection_attempts: Self::resolve_connection_attempts(&params),
            params,
        }
    }

    /// Parse config at `p` and get params for `host`
    fn parse(p: &Path, host: &str) -> FileIoResult<HostParams> {
        trace!("Parsing configuration at {}", p.display());
        let mut reader = BufReader::new(File::open(p).map_err(|e| {
            FileIoError::new_ex(
                FileIoErrorType::IoError,
                format!("Could not open configuration file: {}", e),
            )
        })?);
        SshConfig::default()
            .parse(&mut reader)
            .map_err(|e| {
                FileIoError::new_ex(
                    FileIoErrorType::IoError,
                    format!("Could not parse configuration file: {}", e),
                )
            })
            .map(|x| x.query(host))
    }

    /// `HostName` in the configuration replaces the host alias
    fn resolve_host(params: &HostParams, host: &str) -> String {
        match params.host_name.as_deref() {
            Some(h) => h.to_string(),
            None => host.to_string(),
        }
    }

    /// Given host params, resolve connection attempts.
    /// If `none`, gets 1
    fn resolve_connection_attempts(params: &HostParams) -> usize {
        params.connection_attempts.unwrap_or(1)
    }
}
