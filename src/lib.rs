#![crate_name = "remoteio"]
#![crate_type = "lib"]

//! # remoteio
//!
//! remoteio is a library that provides a single file I/O interface to work with a remote **Sftp** server and
//! with the local file system in the very same way.
//! This is achieved through a trait called `FileIo` which exposes methods to operate on the current working directory
//! of the backend: list it, read and write files, remove and rename them, create and remove directories.
//!
//! ## Why remoteio
//!
//! Applications which export or import files often have to deal with different storage locations:
//! sometimes the files live on the same host, sometimes they must be uploaded to a remote server via SFTP.
//! With remoteio the backend is just a matter of configuration: build the `IoParams`, get a backend with
//! `client::io_for` and operate on it through the `FileIo` trait.
//!
//! ## Get started
//!
//! First of all you need to add **remoteio** to your project dependencies:
//!
//! ```toml
//! remoteio = "^0.1.0"
//! ```
//!
//! by default, these features are enabled: `ssh`
//!
//! these features are supported:
//!
//! - `ssh`: enable Sftp backend
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!
//! ## Usage
//!
//! ### Sftp backend
//!
//! ```rust,ignore
//! use remoteio::client::ssh::SftpIo;
//! use remoteio::fs::{GenericParams, IoParams};
//! use remoteio::FileIo;
//!
//! let mut client = SftpIo::default();
//! let params = IoParams::Sftp(
//!     GenericParams::default()
//!         .host("127.0.0.1:10022")
//!         .username("sftp")
//!         .password("password"),
//! );
//! // connect
//! assert!(client.open(&params).is_ok());
//! // create a directory tree, mkdir -p style
//! assert!(client.mkdir("exports/2021/11", 0o755, true));
//! assert!(client.cd("exports/2021/11"));
//! // upload a file
//! assert!(client.write("report.csv", b"id,total\n1,42\n".as_slice().into()));
//! for entry in client.ls().unwrap() {
//!     println!("{} => {}", entry.name, entry.full_path);
//! }
//! // disconnect
//! client.close();
//! ```
//!
//! ### Backend selected by configuration
//!
//! ```rust,ignore
//! use remoteio::client;
//! use remoteio::fs::{IoParams, LocalParams};
//!
//! let params = IoParams::Local(LocalParams::new("/var/exports"));
//! let mut io = client::io_for(&params);
//! assert!(io.open(&params).is_ok());
//! println!("Wrkdir: {}", io.pwd().unwrap());
//! io.close();
//! ```
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

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
// -- crates
#[macro_use]
extern crate log;

// -- export
pub use fs::{DirEntry, FileIo, FileIoError, FileIoErrorType, FileIoResult, RawEntry};
// -- modules
pub mod client;
pub mod fs;

// -- utils
pub(crate) mod utils;
// -- mock
#[cfg(test)]
pub(crate) mod mock;
