//! ## Ssh mock
//!
//! ssh configuration fixtures

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
use std::io::Write;
use tempfile::NamedTempFile;

/// Create an ssh config file, where `sftp` is an alias of the test server
pub fn create_ssh_config() -> NamedTempFile {
    let mut temp = NamedTempFile::new().expect("Failed to create tempfile");
    let config = r##"
# remoteio test configuration

ConnectionAttempts  3
ConnectTimeout      60

Host sftp
    HostName            127.0.0.1
    Port                10022
    Compression         yes
    Ciphers             aes128-ctr,aes256-ctr
    KexAlgorithms       diffie-hellman-group-exchange-sha256,ecdh-sha2-nistp256
    MACs                hmac-sha2-256,hmac-sha2-512

Host backup
    HostName            backup.example.com
"##;
    temp.write_all(config.as_bytes()).unwrap();
    temp
}
