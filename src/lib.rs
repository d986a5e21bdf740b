//! **wmt** — a workspace table for Hyprland.
//!
//! wmt asks Hyprland for its workspaces and windows over the command
//! socket, decodes the plain-text replies, joins each workspace to the
//! window that owns it, and lets the user pick one to switch to.
//!
//! # Architecture
//!
//! The crate is organised around three traits in [`traits`]:
//!
//! * [`traits::Transport`] — one command, one reply, failing with a
//!   [`traits::TransportError`].  The concrete implementation is
//!   [`hyprland::socket::UnixSocketTransport`].
//! * [`traits::BlockDecoder`] — one fixed-shape text format.  See
//!   [`hyprland::decode`].
//! * [`traits::WorkspaceBackend`] — listing, switching and moving windows,
//!   implemented by [`hyprland::session::Session`] and consumed by
//!   [`picker::Picker`].
//!
//! Nothing outside [`hyprland`] knows about Hyprland's socket layout or
//! text format.

pub mod config;
pub mod correlate;
pub mod hyprland;
pub mod picker;
pub mod traits;
pub mod tui;
pub mod workspace;
