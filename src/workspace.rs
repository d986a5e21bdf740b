//! Records shared by every layer of wmt.
//!
//! [`Workspace`] is what the presentation layer consumes.  [`Client`] only
//! lives for the duration of a single listing, as the lookup side of the
//! join performed by [`correlate`](crate::correlate::correlate).

use serde::Serialize;
use std::collections::HashMap;

/// Value used for integer fields the manager reported in a form we could
/// not parse.
pub const UNPARSED: i32 = -1;

/// One workspace as reported by the window manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Workspace {
    /// Manager-assigned id.  Unique within one snapshot.
    pub id: i32,
    /// Index of the monitor the workspace lives on.
    pub monitor: i32,
    /// Number of windows on the workspace.
    pub windows: i32,
    /// Hex address of the last focused window, without `0x`.  Empty when the
    /// workspace has no window.
    pub window: String,
    /// Title of the last focused window as reported with the workspace.
    pub window_title: String,
    /// Class of the owning window.  Filled in by correlation.
    pub class: String,
    /// Initial title of the owning window.  Filled in by correlation.
    pub initial_title: String,
}

impl Workspace {
    /// Best label to show for this workspace.
    ///
    /// Prefers the live window title and falls back to the initial title.
    pub fn label(&self) -> &str {
        if self.window_title.is_empty() {
            &self.initial_title
        } else {
            &self.window_title
        }
    }
}

/// Attributes of a window, keyed by address in a [`ClientMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Client {
    pub class: String,
    pub initial_title: String,
}

/// Window address (hex, no `0x`) → client attributes.
pub type ClientMap = HashMap<String, Client>;

/// Sort workspaces by id, keeping the response order for equal ids.
pub fn sort_by_id(workspaces: &mut [Workspace]) {
    workspaces.sort_by_key(|ws| ws.id);
}
