//! Join workspaces to the windows that own them.

use crate::workspace::{ClientMap, Workspace};

/// Copy class and initial title from `clients` into every workspace whose
/// owning window is present in the map.
///
/// A workspace whose window is absent (or empty) is left untouched; that
/// simply means no window is focused there.
pub fn correlate(workspaces: &mut [Workspace], clients: &ClientMap) {
    for ws in workspaces.iter_mut().filter(|ws| !ws.window.is_empty()) {
        if let Some(client) = clients.get(&ws.window) {
            ws.class.clone_from(&client.class);
            ws.initial_title.clone_from(&client.initial_title);
        }
    }
}
