//! Hyprland-specific implementations.
//!
//! This module provides the concrete [`Transport`](crate::traits::Transport),
//! [`BlockDecoder`](crate::traits::BlockDecoder)s and
//! [`WorkspaceBackend`](crate::traits::WorkspaceBackend) that talk to
//! Hyprland's command socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod decode;
pub mod session;
pub mod socket;
