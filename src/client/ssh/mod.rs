//! ## SSH
//!
//! implements the file I/O backend for the SFTP protocol

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
// -- ext
use std::io::{Read, Write};
use std::time::Duration;

use crate::fs::{FileIoResult, RawEntry};

// -- modules
mod client;
mod commons;
mod config;
mod sftp;
// -- export
pub use client::Ssh2Client;
pub use sftp::SftpIo;

// -- sftp client

/// The single-level primitives `SftpIo` builds the file I/O interface upon.
///
/// Implementors keep a working directory: every `path` and `filename` may be relative to it.
/// None of these methods recurses: `mkdir` creates exactly one directory and `rmdir`
/// removes exactly one empty directory.
pub trait SftpClient {
    /// Establish the transport with `host:port`
    fn connect(&mut self, host: &str, port: u16, timeout: Duration) -> FileIoResult<()>;

    /// Authenticate on the established transport and start the sftp subsystem
    fn authenticate(&mut self, username: &str, password: &str) -> FileIoResult<()>;

    /// Terminate the session
    fn disconnect(&mut self) -> FileIoResult<()>;

    /// Get the working directory
    fn pwd(&mut self) -> FileIoResult<String>;

    /// Change the working directory; fails if `path` is not a directory
    fn chdir(&mut self, path: &str) -> FileIoResult<()>;

    fn mkdir(&mut self, path: &str) -> FileIoResult<()>;

    fn rmdir(&mut self, path: &str) -> FileIoResult<()>;

    /// Names in the working directory, without `.` and `..`
    fn nlist(&mut self) -> FileIoResult<Vec<String>>;

    /// Entries in the working directory, with their attributes
    fn rawlist(&mut self) -> FileIoResult<Vec<RawEntry>>;

    /// Download `filename` into `dest`; returns the amount of bytes transferred
    fn get(&mut self, filename: &str, dest: &mut dyn Write) -> FileIoResult<u64>;

    /// Upload `src` to `filename`, replacing it; returns the amount of bytes transferred
    fn put(&mut self, filename: &str, src: &mut dyn Read) -> FileIoResult<u64>;

    fn delete(&mut self, filename: &str) -> FileIoResult<()>;

    fn rename(&mut self, src: &str, dest: &str) -> FileIoResult<()>;

    fn chmod(&mut self, mode: u32, filename: &str) -> FileIoResult<()>;
}
