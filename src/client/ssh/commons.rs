//! ## Commons
//!
//! SSH2 session setup: transport, algorithm preferences and authentication

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
use super::config::Config;
use crate::{FileIoError, FileIoErrorType, FileIoResult};

use ssh2::{MethodType as SshMethodType, Session};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

// -- connect

/// Establish connection with remote server and in case of success, return the generated `Session`.
/// The returned session is not authenticated yet.
pub fn connect(config: &Config) -> FileIoResult<Session> {
    debug!("Connecting to '{}' ({})", config.host, config.address);
    // setup tcp stream
    let socket_addresses: Vec<SocketAddr> = match config.address.to_socket_addrs() {
        Ok(s) => s.collect(),
        Err(err) => {
            return Err(FileIoError::new_ex(
                FileIoErrorType::BadAddress,
                err.to_string(),
            ))
        }
    };
    let mut stream = None;
    for _ in 0..config.connection_attempts {
        for socket_addr in socket_addresses.iter() {
            trace!(
                "Trying to connect to socket address '{}' (timeout: {}s)",
                socket_addr,
                config.connection_timeout.as_secs()
            );
            if let Ok(tcp_stream) = TcpStream::connect_timeout(socket_addr, config.connection_timeout)
            {
                debug!("Connection established with address {}", socket_addr);
                stream = Some(tcp_stream);
                break;
            }
        }
        if stream.is_some() {
            break;
        }
    }
    let stream = match stream {
        Some(s) => s,
        None => {
            error!(
                "No suitable socket address found for {}; connection timeout",
                config.host
            );
            return Err(FileIoError::new_ex(
                FileIoErrorType::ConnectionError,
                format!("connection timeout on {}", config.host),
            ));
        }
    };
    let mut session = match Session::new() {
        Ok(s) => s,
        Err(err) => {
            error!("Could not create session: {}", err);
            return Err(FileIoError::new_ex(FileIoErrorType::ConnectionError, err));
        }
    };
    session.set_tcp_stream(stream);
    // blocking calls on the session are bound to the connection timeout
    session.set_timeout(session_timeout(config.connection_timeout));
    set_algo_prefs(&mut session, config)?;
    if let Err(err) = session.handshake() {
        error!("SSH handshake failed: {}", err);
        return Err(FileIoError::new_ex(FileIoErrorType::ProtocolError, err));
    }
    Ok(session)
}

/// Session timeout in milliseconds; saturates at `u32::MAX`
fn session_timeout(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

/// Configure algorithm preferences into session
fn set_algo_prefs(session: &mut Session, config: &Config) -> FileIoResult<()> {
    let params = &config.params;
    trace!("Configuring algorithm preferences...");
    if let Some(compress) = params.compression {
        trace!("compression: {}", compress);
        session.set_compress(compress);
    }
    if let Some(algos) = params.kex_algorithms.as_deref() {
        set_method_pref(session, &[(SshMethodType::Kex, "KEX")], algos)?;
    }
    if let Some(algos) = params.host_key_algorithms.as_deref() {
        set_method_pref(session, &[(SshMethodType::HostKey, "host key")], algos)?;
    }
    if let Some(algos) = params.ciphers.as_deref() {
        set_method_pref(
            session,
            &[
                (SshMethodType::CryptCs, "crypt (client-server)"),
                (SshMethodType::CryptSc, "crypt (server-client)"),
            ],
            algos,
        )?;
    }
    if let Some(algos) = params.mac.as_deref() {
        set_method_pref(
            session,
            &[
                (SshMethodType::MacCs, "MAC (client-server)"),
                (SshMethodType::MacSc, "MAC (server-client)"),
            ],
            algos,
        )?;
    }
    Ok(())
}

fn set_method_pref(
    session: &mut Session,
    methods: &[(SshMethodType, &str)],
    algos: &[String],
) -> FileIoResult<()> {
    let algos = algos.join(",");
    for (method, name) in methods {
        trace!("Configuring {} algorithms: {}", name, algos);
        if let Err(err) = session.method_pref(*method, algos.as_str()) {
            error!("Could not set {} algorithms: {}", name, err);
            return Err(FileIoError::new_ex(FileIoErrorType::ProtocolError, err));
        }
    }
    Ok(())
}

/// Authenticate on session with username and password
pub fn auth_with_password(session: &mut Session, username: &str, password: &str) -> FileIoResult<()> {
    debug!("Authenticating with username '{}' and password", username);
    if let Err(err) = session.userauth_password(username, password) {
        error!("Authentication failed: {}", err);
        Err(FileIoError::new_ex(
            FileIoErrorType::AuthenticationFailed,
            err,
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {

    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn should_saturate_session_timeout() {
        assert_eq!(session_timeout(Duration::from_secs(10)), 10_000);
        assert_eq!(session_timeout(Duration::from_millis(u32::MAX as u64)), u32::MAX);
        assert_eq!(session_timeout(Duration::from_secs(60 * 60 * 24 * 50)), u32::MAX);
        assert_eq!(session_timeout(Duration::MAX), u32::MAX);
    }

    #[test]
    fn should_fail_connecting_to_bad_address() {
        let config = Config::resolve(None, "this is not a host", 22, Duration::from_secs(1)).unwrap();
        assert_eq!(
            connect(&config).err().unwrap().kind,
            FileIoErrorType::BadAddress
        );
    }

    #[test]
    #[cfg(feature = "with-containers")]
    fn should_connect_to_ssh_server_auth_user_password() {
        crate::mock::logger();
        let config = Config::resolve(None, "127.0.0.1", 10022, Duration::from_secs(10)).unwrap();
        let mut session = connect(&config).ok().unwrap();
        assert!(!session.authenticated());
        assert!(auth_with_password(&mut session, "sftp", "password").is_ok());
        assert!(session.authenticated());
    }

    #[test]
    #[cfg(feature = "with-containers")]
    fn should_fail_auth_with_bad_password() {
        crate::mock::logger();
        let config = Config::resolve(None, "127.0.0.1", 10022, Duration::from_secs(10)).unwrap();
        let mut session = connect(&config).ok().unwrap();
        assert_eq!(
            auth_with_password(&mut session, "sftp", "wrong")
                .err()
                .unwrap()
                .kind,
            FileIoErrorType::AuthenticationFailed
        );
    }
}
