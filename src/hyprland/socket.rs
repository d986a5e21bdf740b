//! [`Transport`] implementation over Hyprland's command socket.
//!
//! Each request opens a fresh connection to
//! `<root>/hypr/<instance>/.socket.sock`, writes the command, reads until
//! Hyprland closes its end, and drops the connection.  Several socket
//! paths may be configured; they are tried in order and the first one that
//! accepts a connection wins.

use crate::traits::{Transport, TransportError};
use log::debug;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

/// Default upper bound on a single reply.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Short-lived Unix socket connections to Hyprland.
#[derive(Debug, Clone)]
pub struct UnixSocketTransport {
    candidates: Vec<PathBuf>,
    max_response_bytes: usize,
}

impl UnixSocketTransport {
    /// Create a transport that tries `candidates` in order.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    /// Replace the reply size limit.
    pub fn with_max_response_bytes(mut self, limit: usize) -> Self {
        self.max_response_bytes = limit;
        self
    }

    /// Open a connection to the first reachable candidate.
    fn connect(&self) -> Result<UnixStream, TransportError> {
        let mut last_err = None;
        for path in &self.candidates {
            match UnixStream::connect(path) {
                Ok(stream) => {
                    debug!("connected to {}", path.display());
                    return Ok(stream);
                }
                Err(e) => {
                    debug!("connect to {} failed: {}", path.display(), e);
                    last_err = Some((path.clone(), e));
                }
            }
        }
        match last_err {
            Some((path, source)) => Err(TransportError::Connect { path, source }),
            None => Err(TransportError::NoSocketPath),
        }
    }

    fn send(&self, command: &str) -> Result<UnixStream, TransportError> {
        if command.is_empty() {
            return Err(TransportError::EmptyCommand);
        }
        let mut stream = self.connect()?;
        stream
            .write_all(command.as_bytes())
            .map_err(TransportError::Write)?;
        Ok(stream)
    }
}

/// Read `stream` to EOF, failing once more than `limit` bytes arrive.
fn read_bounded(stream: impl Read, limit: usize) -> Result<Vec<u8>, TransportError> {
    let mut buf = Vec::new();
    // One extra byte tells an exact fit apart from an overflow.
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    stream
        .take(cap)
        .read_to_end(&mut buf)
        .map_err(TransportError::Read)?;
    if buf.len() > limit {
        return Err(TransportError::ResponseTooLarge { limit });
    }
    Ok(buf)
}

impl Transport for UnixSocketTransport {
    fn request(&self, command: &str) -> Result<String, TransportError> {
        let stream = self.send(command)?;
        let bytes = read_bounded(&stream, self.max_response_bytes)?;
        debug!("{:?}: {} byte reply", command, bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn dispatch(&self, command: &str) -> Result<(), TransportError> {
        let _stream = self.send(command)?;
        debug!("{:?}: dispatched", command);
        Ok(())
    }
}

/// `<root>/hypr/<instance_signature>/.socket.sock`
pub fn socket_path(root: &Path, instance_signature: &str) -> PathBuf {
    root.join("hypr").join(instance_signature).join(".socket.sock")
}

//  Tests
