//! Core traits that decouple wmt from the concrete socket, text format and
//! user interface.
//!
//! * [`Transport`] moves one command and one reply over some channel.
//! * [`BlockDecoder`] turns one shape of the manager's text output into
//!   records.
//! * [`WorkspaceBackend`] is everything the presentation layer needs: a
//!   listing, a way to switch, and a way to move a window.

use crate::workspace::Workspace;
use std::path::PathBuf;

/// Separator between records in the manager's text output.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Errors produced while moving a command or a reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("refusing to send an empty command")]
    EmptyCommand,
    #[error("no socket path configured")]
    NoSocketPath,
    #[error("connect to {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write: {0}")]
    Write(#[source] std::io::Error),
    #[error("read: {0}")]
    Read(#[source] std::io::Error),
    #[error("reply exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },
}

/// A request/response channel to the window manager.
///
/// # Contract
///
/// * Every call is independent: nothing is retained between requests.
/// * The command is opaque; implementations only reject an empty one.
pub trait Transport {
    /// Send `command` and return the full reply.
    fn request(&self, command: &str) -> Result<String, TransportError>;

    /// Send `command` without waiting for a reply.
    ///
    /// The default implementation performs a full [`request`](Transport::request)
    /// and drops the reply.
    fn dispatch(&self, command: &str) -> Result<(), TransportError> {
        self.request(command).map(|_| ())
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn request(&self, command: &str) -> Result<String, TransportError> {
        (**self).request(command)
    }

    fn dispatch(&self, command: &str) -> Result<(), TransportError> {
        (**self).dispatch(command)
    }
}

/// Output of [`BlockDecoder::decode_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Records decoded, in response order.
    pub items: Vec<T>,
    /// Non-blank blocks that did not have the expected shape.
    pub skipped: usize,
}

/// Decoder for one fixed-shape block format.
///
/// A block is a run of lines terminated by [`BLOCK_SEPARATOR`].  The only
/// reliable anchors in the format are the line count and the field labels,
/// so implementations describe their shape with
/// [`EXPECTED_LINES`](BlockDecoder::EXPECTED_LINES) and read fields by line
/// index.
pub trait BlockDecoder {
    /// The record produced from one block.
    type Output;

    /// Number of lines a well-formed block has.
    const EXPECTED_LINES: usize;

    /// Extract a record from a block already known to have
    /// [`EXPECTED_LINES`](BlockDecoder::EXPECTED_LINES) lines.
    ///
    /// Returning `None` skips the block.
    fn decode_lines(&self, lines: &[&str]) -> Option<Self::Output>;

    /// Decode one block, or `None` if its line count is wrong.
    fn decode_block(&self, block: &str) -> Option<Self::Output> {
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() != Self::EXPECTED_LINES {
            return None;
        }
        self.decode_lines(&lines)
    }

    /// Decode every block of a response body.
    ///
    /// Malformed blocks are skipped and counted; decoding always continues
    /// with the next block.
    fn decode_all(&self, body: &str) -> Decoded<Self::Output> {
        let mut items = Vec::new();
        let mut skipped = 0;
        for block in body.split(BLOCK_SEPARATOR) {
            if block.trim().is_empty() {
                continue;
            }
            match self.decode_block(block) {
                Some(item) => items.push(item),
                None => {
                    log::debug!(
                        "skipping block with {} line(s), expected {}",
                        block.lines().count(),
                        Self::EXPECTED_LINES
                    );
                    skipped += 1;
                }
            }
        }
        Decoded { items, skipped }
    }
}

/// Abstraction over a window manager that can list and switch workspaces
/// and move windows between them.
///
/// The picker only depends on this trait, so it can be driven by a test
/// double as easily as by a live [`Session`](crate::hyprland::session::Session).
pub trait WorkspaceBackend {
    /// The error type produced when a listing fails.
    type Error: std::error::Error + Send + 'static;

    /// Return a fresh, id-ordered snapshot of all workspaces.
    fn list_workspaces(&self) -> Result<Vec<Workspace>, Self::Error>;

    /// Ask the manager to show workspace `id`.
    ///
    /// Best effort: the manager may ignore the request and there is no
    /// feedback channel.
    fn switch_to(&self, id: i32);

    /// Move the window at `address` (hex, no `0x`) to workspace `id`
    /// without following it.  Best effort, like
    /// [`switch_to`](WorkspaceBackend::switch_to).
    fn move_window(&self, address: &str, id: i32);
}
