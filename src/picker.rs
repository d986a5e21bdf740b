//! Selection state for the interactive workspace table.
//!
//! [`Picker`] knows nothing about terminals.  It owns the listing and a
//! cursor, consumes [`PickerKey`]s, and answers with a [`PickerAction`].
//! Renderers (see [`tui`](crate::tui)) translate real key events into
//! [`PickerKey`]s and draw the state; [`Picker::finish`] carries out the
//! selected action on a [`WorkspaceBackend`].
//!
//! The picker has two modes.  Normally a decision switches to a workspace.
//! After [`PickerKey::Send`] it instead moves the selected row's window to
//! the workspace chosen next, until [`PickerKey::Back`] leaves the mode.

use crate::traits::WorkspaceBackend;
use crate::workspace::{Workspace, UNPARSED};
use log::{debug, info, warn};

/// Every input the picker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    Up,
    Down,
    Top,
    Bottom,
    /// Select the workspace under the cursor.
    Confirm,
    /// Select the workspace with this id directly.
    Jump(i32),
    /// Start moving the window of the row under the cursor.
    Send,
    /// Leave send mode, or quit when not in it.
    Back,
    ToggleHelp,
    Quit,
}

/// What the caller should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// Keep running.
    None,
    /// Switch to this workspace id and stop.
    Switch(i32),
    /// Move the window at `address` to workspace `id` and stop.
    Move { address: String, id: i32 },
    /// Stop without switching.
    Quit,
}

/// Cursor over an id-ordered list of workspaces.
#[derive(Debug, Clone)]
pub struct Picker {
    workspaces: Vec<Workspace>,
    cursor: usize,
    show_help: bool,
    /// Window being sent, while in send mode.
    sending: Option<String>,
}

impl Picker {
    /// Create a picker with the cursor on the first row.
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self {
            workspaces,
            cursor: 0,
            show_help: false,
            sending: None,
        }
    }

    /// Load a fresh listing from `backend`.
    pub fn load<B: WorkspaceBackend>(backend: &B) -> Result<Self, B::Error> {
        let workspaces = backend.list_workspaces()?;
        info!("{} workspace(s) listed", workspaces.len());
        Ok(Self::new(workspaces))
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// Row index under the cursor, or `None` for an empty list.
    pub fn cursor(&self) -> Option<usize> {
        (!self.workspaces.is_empty()).then_some(self.cursor)
    }

    /// Workspace under the cursor.
    pub fn selected(&self) -> Option<&Workspace> {
        self.workspaces.get(self.cursor)
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Address of the window being sent, if in send mode.
    pub fn sending(&self) -> Option<&str> {
        self.sending.as_deref()
    }

    /// Apply one key.
    pub fn handle(&mut self, key: PickerKey) -> PickerAction {
        debug!("key {:?}", key);
        match key {
            PickerKey::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                PickerAction::None
            }
            PickerKey::Down => {
                if self.cursor + 1 < self.workspaces.len() {
                    self.cursor += 1;
                }
                PickerAction::None
            }
            PickerKey::Top => {
                self.cursor = 0;
                PickerAction::None
            }
            PickerKey::Bottom => {
                self.cursor = self.workspaces.len().saturating_sub(1);
                PickerAction::None
            }
            PickerKey::Confirm => match self.selected() {
                // Hyprland reads `workspace -1` as "previous workspace".
                Some(ws) if ws.id == UNPARSED => {
                    warn!("workspace {:?} has no numeric id, ignoring", ws.label());
                    PickerAction::None
                }
                Some(ws) => {
                    let id = ws.id;
                    self.decide(id)
                }
                None => PickerAction::Quit,
            },
            PickerKey::Jump(id) => self.decide(id),
            PickerKey::Send => {
                if self.sending.is_none() {
                    let window = self
                        .selected()
                        .map(|ws| ws.window.clone())
                        .filter(|w| !w.is_empty());
                    if window.is_none() {
                        debug!("no window to send on this row");
                    }
                    self.sending = window;
                }
                PickerAction::None
            }
            PickerKey::Back => match self.sending.take() {
                Some(_) => PickerAction::None,
                None => PickerAction::Quit,
            },
            PickerKey::ToggleHelp => {
                self.show_help = !self.show_help;
                PickerAction::None
            }
            PickerKey::Quit => PickerAction::Quit,
        }
    }

    /// Target workspace `id` chosen: switch to it, or move the window
    /// there in send mode.
    fn decide(&mut self, id: i32) -> PickerAction {
        match self.sending.take() {
            Some(address) => PickerAction::Move { address, id },
            None => PickerAction::Switch(id),
        }
    }

    /// Feed `keys` until one of them ends the session.
    ///
    /// Returns [`PickerAction::Quit`] if the keys run out first.
    pub fn run(&mut self, keys: impl IntoIterator<Item = PickerKey>) -> PickerAction {
        keys.into_iter()
            .map(|key| self.handle(key))
            .find(|action| *action != PickerAction::None)
            .unwrap_or(PickerAction::Quit)
    }

    /// Carry out a terminal `action` against `backend`.
    pub fn finish<B: WorkspaceBackend>(backend: &B, action: &PickerAction) {
        match action {
            PickerAction::Switch(id) => {
                info!("switching to workspace {}", id);
                backend.switch_to(*id);
            }
            PickerAction::Move { address, id } => {
                info!("moving window {} to workspace {}", address, id);
                backend.move_window(address, *id);
            }
            PickerAction::Quit | PickerAction::None => {}
        }
    }
}
