//! ## Fs mock
//!
//! local fixtures

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
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Sample csv export, as uploaded by the backends tests
pub const SAMPLE_CSV: &str = "id,customer,total\n1,acme,42.00\n2,initech,13.37\n";

/// Create a local temporary file holding `SAMPLE_CSV`
pub fn create_sample_file() -> NamedTempFile {
    let mut tmpfile = NamedTempFile::new().unwrap();
    tmpfile.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    tmpfile
}

/// Make a file named `filename` in `dir`; returns its size
pub fn make_file_at(dir: &Path, filename: &str, content: &[u8]) -> usize {
    let mut file = StdFile::create(dir.join(filename)).expect("Failed to create file");
    file.write_all(content).expect("Failed to write file");
    content.len()
}

/// Make a directory named `dirname` in `dir`
pub fn make_dir_at(dir: &Path, dirname: &str) {
    std::fs::create_dir(dir.join(dirname)).expect("Failed to create directory")
}
