//! Minimal protocol client used by socket-level tests.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use serde_json::Value;

const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one request, half-closes, and reads the reply until the server
/// closes the connection.
pub fn exchange(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect to service");
    stream
        .set_read_timeout(Some(CLIENT_TIMEOUT))
        .expect("set read timeout");
    stream.write_all(request).expect("write request");
    stream.shutdown(Shutdown::Write).expect("half-close request");

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).expect("read reply");
    reply
}

/// Like [`exchange`], decoding the reply as JSON.
pub fn exchange_json(addr: SocketAddr, request: &[u8]) -> Value {
    let reply = exchange(addr, request);
    serde_json::from_slice(&reply).unwrap_or_else(|error| {
        panic!(
            "reply was not JSON ({error}): {}",
            String::from_utf8_lossy(&reply)
        )
    })
}

/// Unix socket counterpart of [`exchange_json`].
#[cfg(unix)]
pub fn exchange_unix_json(path: &std::path::Path, request: &[u8]) -> Value {
    use std::os::unix::net::UnixStream;

    let mut stream = UnixStream::connect(path).expect("connect to service socket");
    stream
        .set_read_timeout(Some(CLIENT_TIMEOUT))
        .expect("set read timeout");
    stream.write_all(request).expect("write request");
    stream.shutdown(Shutdown::Write).expect("half-close request");

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).expect("read reply");
    serde_json::from_slice(&reply).expect("reply was not JSON")
}
