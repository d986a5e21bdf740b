//! High-level Hyprland operations built on a [`Transport`].
//!
//! [`Session`] owns the transport and turns the two plain-text replies
//! (`workspaces`, `clients`) into one id-ordered, correlated listing.

use crate::config::Config;
use crate::correlate::correlate;
use crate::hyprland::decode::{ClientDecoder, WorkspaceDecoder};
use crate::hyprland::socket::{socket_path, UnixSocketTransport};
use crate::traits::{BlockDecoder, Transport, TransportError, WorkspaceBackend};
use crate::workspace::{sort_by_id, Workspace};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const INSTANCE_SIGNATURE_VAR: &str = "HYPRLAND_INSTANCE_SIGNATURE";
pub const RUNTIME_DIR_VAR: &str = "XDG_RUNTIME_DIR";

const WORKSPACES_COMMAND: &str = "workspaces";
const CLIENTS_COMMAND: &str = "clients";

/// Errors surfaced by a [`Session`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A required environment variable is unset or empty.  Hyprland is
    /// most likely not running in this session.
    #[error("${0} is not set, is Hyprland running?")]
    MissingEnvironment(&'static str),
    #[error("hyprland IPC error: {0}")]
    Transport(#[from] TransportError),
}

/// What to do when a socket request fails during a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportErrorPolicy {
    /// Log the failure and return whatever could be gathered.
    #[default]
    Degrade,
    /// Return the failure to the caller.
    Propagate,
}

/// The two values needed to locate Hyprland's sockets.
///
/// Resolved once at startup and never re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    instance_signature: String,
    runtime_dir: PathBuf,
}

impl Environment {
    pub fn new(instance_signature: impl Into<String>, runtime_dir: impl Into<PathBuf>) -> Self {
        Self {
            instance_signature: instance_signature.into(),
            runtime_dir: runtime_dir.into(),
        }
    }

    /// Read `$HYPRLAND_INSTANCE_SIGNATURE` and `$XDG_RUNTIME_DIR`.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve both values through `lookup`.  Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SessionError> {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(SessionError::MissingEnvironment(name))
        };
        let instance_signature = require(INSTANCE_SIGNATURE_VAR)?;
        let runtime_dir = require(RUNTIME_DIR_VAR)?;
        Ok(Self::new(instance_signature, runtime_dir))
    }

    pub fn instance_signature(&self) -> &str {
        &self.instance_signature
    }

    pub fn runtime_dir(&self) -> &std::path::Path {
        &self.runtime_dir
    }

    /// Command socket paths to try: the runtime directory first, then each
    /// of `fallback_roots`, without duplicates.
    pub fn socket_candidates(&self, fallback_roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = Vec::with_capacity(fallback_roots.len() + 1);
        let roots = std::iter::once(&self.runtime_dir).chain(fallback_roots);
        for root in roots {
            let path = socket_path(root, &self.instance_signature);
            if !candidates.contains(&path) {
                candidates.push(path);
            }
        }
        candidates
    }
}

/// How complete a listing is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReport {
    /// Workspace blocks dropped for having the wrong shape.
    pub skipped_workspaces: usize,
    /// Client blocks dropped for having the wrong shape.
    pub skipped_clients: usize,
    /// The `workspaces` request failed; the listing is empty.
    pub workspaces_unavailable: bool,
    /// The `clients` request failed; class and initial title are empty.
    pub clients_unavailable: bool,
}

impl ListReport {
    /// `true` when nothing was dropped and both requests succeeded.
    pub fn is_complete(&self) -> bool {
        *self == Self::default()
    }
}

/// A listing together with its [`ListReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub workspaces: Vec<Workspace>,
    pub report: ListReport,
}

/// A handle on one Hyprland instance.
///
/// No connection is held; every operation performs its own short-lived
/// requests through the transport.
///
/// # Typical usage
///
/// ```ignore
/// let session = Session::connect(&Config::default())?;
/// for ws in session.list()? {
///     println!("{} {}", ws.id, ws.label());
/// }
/// session.switch_to(3);
/// ```
#[derive(Debug)]
pub struct Session<T: Transport = UnixSocketTransport> {
    transport: T,
    policy: TransportErrorPolicy,
}

impl Session<UnixSocketTransport> {
    /// Resolve the environment and build a socket-backed session.
    ///
    /// Fails only when the environment is incomplete; the socket itself is
    /// not touched until the first request.
    pub fn connect(config: &Config) -> Result<Self, SessionError> {
        let env = Environment::from_env()?;
        Ok(Self::from_environment(&env, config))
    }

    /// Build a socket-backed session for an already resolved environment.
    pub fn from_environment(env: &Environment, config: &Config) -> Self {
        let candidates = env.socket_candidates(&config.socket.fallback_roots);
        info!(
            "hyprland instance {} ({} socket candidate(s))",
            env.instance_signature(),
            candidates.len()
        );
        let transport = UnixSocketTransport::new(candidates)
            .with_max_response_bytes(config.socket.max_response_bytes);
        Self::with_transport(transport, config.transport_errors)
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(transport: T, policy: TransportErrorPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetch workspaces and clients, correlate them, and sort by id.
    pub fn list_report(&self) -> Result<Listing, SessionError> {
        let mut report = ListReport::default();

        let body = match self.transport.request(WORKSPACES_COMMAND) {
            Ok(body) => body,
            Err(e) => {
                self.absorb(WORKSPACES_COMMAND, e)?;
                report.workspaces_unavailable = true;
                return Ok(Listing {
                    workspaces: Vec::new(),
                    report,
                });
            }
        };
        let decoded = WorkspaceDecoder.decode_all(&body);
        let mut workspaces = decoded.items;
        report.skipped_workspaces = decoded.skipped;

        match self.transport.request(CLIENTS_COMMAND) {
            Ok(body) => {
                let (clients, skipped) = ClientDecoder.decode_map(&body);
                report.skipped_clients = skipped;
                correlate(&mut workspaces, &clients);
            }
            Err(e) => {
                self.absorb(CLIENTS_COMMAND, e)?;
                report.clients_unavailable = true;
            }
        }

        sort_by_id(&mut workspaces);
        debug!("{} workspace(s), {:?}", workspaces.len(), report);
        Ok(Listing { workspaces, report })
    }

    /// Id-ordered, correlated workspaces.
    pub fn list(&self) -> Result<Vec<Workspace>, SessionError> {
        self.list_report().map(|listing| listing.workspaces)
    }

    /// Ask Hyprland to show workspace `id`.  Failures are logged, not
    /// returned.
    pub fn switch_to(&self, id: i32) {
        let command = format!("dispatch workspace {}", id);
        if let Err(e) = self.transport.dispatch(&command) {
            warn!("{:?} failed: {}", command, e);
        }
    }

    /// Move the window at `address` to workspace `id` without switching to
    /// it.  Failures are logged, not returned.
    pub fn move_window(&self, address: &str, id: i32) {
        let command = format!("dispatch movetoworkspacesilent {},address:0x{}", id, address);
        if let Err(e) = self.transport.dispatch(&command) {
            warn!("{:?} failed: {}", command, e);
        }
    }

    /// Apply the error policy to a failed request.
    fn absorb(&self, command: &str, err: TransportError) -> Result<(), SessionError> {
        match self.policy {
            TransportErrorPolicy::Degrade => {
                warn!("{:?} request failed, continuing without it: {}", command, err);
                Ok(())
            }
            TransportErrorPolicy::Propagate => Err(err.into()),
        }
    }
}

impl<T: Transport> WorkspaceBackend for Session<T> {
    type Error = SessionError;

    fn list_workspaces(&self) -> Result<Vec<Workspace>, SessionError> {
        self.list()
    }

    fn switch_to(&self, id: i32) {
        Session::switch_to(self, id)
    }

    fn move_window(&self, address: &str, id: i32) {
        Session::move_window(self, address, id)
    }
}
