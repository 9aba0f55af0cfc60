//! ## Transfer
//!
//! this module exposes the sources and destinations accepted by `write` and `read`

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
use std::fs::File as StdFile;
use std::io::{self, Read, Write};
use std::path::Path;

// -- write source

/// The content uploaded by `write`
pub enum Source<'a> {
    /// In-memory data
    Data(&'a [u8]),
    /// Any reader; read until EOF
    Stream(&'a mut dyn Read),
    /// A file on the local file system
    Path(&'a Path),
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::Data(data)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(data: &'a str) -> Self {
        Self::Data(data.as_bytes())
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(p: &'a Path) -> Self {
        Self::Path(p)
    }
}

impl<'a> Source<'a> {
    /// Get a reader over the source. Fails only if the local file can't be opened
    pub fn into_reader(self) -> io::Result<Box<dyn Read + 'a>> {
        match self {
            Self::Data(data) => Ok(Box::new(data)),
            Self::Stream(reader) => Ok(Box::new(reader)),
            Self::Path(p) => {
                let file = StdFile::open(p)?;
                Ok(Box::new(file))
            }
        }
    }

    /// Copy the whole source into `writer`; returns the amount of bytes copied
    pub fn copy_to(self, writer: &mut dyn Write) -> io::Result<u64> {
        let mut reader = self.into_reader()?;
        io::copy(&mut reader, writer)
    }
}

// -- read destination

/// Where `read` stores the fetched content.
/// When no destination is given, the content is returned in memory.
pub enum Destination<'a> {
    /// Any writer
    Stream(&'a mut dyn Write),
    /// A file on the local file system; created or truncated
    Path(&'a Path),
}

impl<'a> From<&'a Path> for Destination<'a> {
    fn from(p: &'a Path) -> Self {
        Self::Path(p)
    }
}

/// The outcome of `read`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Content fetched in memory
    Data(Vec<u8>),
    /// Content written to the destination; holds the amount of bytes written
    Written(u64),
    Failed,
}

impl ReadOutcome {
    /// Returns whether the file has been fetched
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Get the fetched content, if read in memory
    pub fn into_data(self) -> Option<Vec<u8>> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }
}
