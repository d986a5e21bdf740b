//! ratatui + crossterm renderer for the workspace picker.
//!
//! # Keys
//!
//! | Key               | Action                          |
//! |-------------------|---------------------------------|
//! | `↑` / `k`         | Cursor up                       |
//! | `↓` / `j`         | Cursor down                     |
//! | `g` / `Home`      | First row                       |
//! | `G` / `End`       | Last row                        |
//! | `Enter` / `Space` | Switch to the selected row      |
//! | `0`–`9`           | Switch to that workspace id     |
//! | `s`               | Send the row's window elsewhere |
//! | `?`               | Toggle help                     |
//! | `Esc`             | Leave send mode, else quit      |
//! | `q`               | Quit                            |
//!
//! In send mode `Enter` and the digits pick the target workspace instead.

use crate::picker::{Picker, PickerAction, PickerKey};
use crate::traits::WorkspaceBackend;
use crate::workspace::UNPARSED;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Paragraph, Row, Table, TableState},
    DefaultTerminal, Frame,
};
use std::io;

const HEADER: [&str; 5] = ["ID", "Monitor", "Windows", "Class", "Title"];

const WIDTHS: [Constraint; 5] = [
    Constraint::Max(6),
    Constraint::Max(8),
    Constraint::Max(8),
    Constraint::Max(20),
    Constraint::Min(20),
];

const HELP: [&str; 8] = [
    "↑/k ↓/j   move",
    "g/G       first / last",
    "Enter     switch to selection",
    "0-9       switch to workspace id",
    "s         send window to a workspace",
    "?         toggle help",
    "Esc       back",
    "q         quit",
];

/// Restores the terminal when dropped, including on early return.
struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: ratatui::try_init()?,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Translate a terminal key event into a [`PickerKey`].
pub fn map_key(key: KeyEvent) -> Option<PickerKey> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(PickerKey::Quit);
    }
    let mapped = match key.code {
        KeyCode::Up | KeyCode::Char('k') => PickerKey::Up,
        KeyCode::Down | KeyCode::Char('j') => PickerKey::Down,
        KeyCode::Home | KeyCode::Char('g') => PickerKey::Top,
        KeyCode::End | KeyCode::Char('G') => PickerKey::Bottom,
        KeyCode::Enter | KeyCode::Char(' ') => PickerKey::Confirm,
        KeyCode::Char(c @ '0'..='9') => PickerKey::Jump(c as i32 - '0' as i32),
        KeyCode::Char('s') => PickerKey::Send,
        KeyCode::Char('?') => PickerKey::ToggleHelp,
        KeyCode::Esc => PickerKey::Back,
        KeyCode::Char('q') => PickerKey::Quit,
        _ => return None,
    };
    Some(mapped)
}

/// Run the picker in the terminal until the user decides, then carry out
/// the decision on `backend` after the terminal has been restored.
pub fn run<B: WorkspaceBackend>(backend: &B, mut picker: Picker) -> io::Result<PickerAction> {
    let mut guard = TerminalGuard::new()?;
    let action = loop {
        guard.terminal.draw(|frame| draw(frame, &picker))?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(key) = map_key(key) else {
            continue;
        };
        match picker.handle(key) {
            PickerAction::None => {}
            action => break action,
        }
    };
    drop(guard);

    debug!("picker finished with {:?}", action);
    Picker::finish(backend, &action);
    Ok(action)
}

/// Draw the table, and the help panel when it is toggled on.
pub fn draw(frame: &mut Frame, picker: &Picker) {
    let help_height = if picker.show_help() {
        HELP.len() as u16 + 2
    } else {
        0
    };
    let [table_area, help_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(help_height)]).areas(frame.area());

    let (title, instructions) = match picker.sending() {
        Some(_) => (
            " Send to Workspace ",
            Line::from(vec![
                " Send ".into(),
                "<Enter>".blue().bold(),
                " Back ".into(),
                "<Esc>".blue().bold(),
                " Quit ".into(),
                "<Q> ".blue().bold(),
            ]),
        ),
        None => (
            " Workspaces ",
            Line::from(vec![
                " Switch ".into(),
                "<Enter>".blue().bold(),
                " Send ".into(),
                "<S>".blue().bold(),
                " Help ".into(),
                "<?>".blue().bold(),
                " Quit ".into(),
                "<Q> ".blue().bold(),
            ]),
        ),
    };
    let block = Block::bordered()
        .title_top(Line::from(title).bold().centered())
        .title_bottom(instructions.centered())
        .border_set(border::THICK);

    let rows = picker.workspaces().iter().map(|ws| {
        let id = match ws.id {
            UNPARSED => "?".to_string(),
            id => id.to_string(),
        };
        Row::new(vec![
            id,
            ws.monitor.to_string(),
            ws.windows.to_string(),
            ws.class.clone(),
            ws.label().to_string(),
        ])
    });
    let table = Table::new(rows, WIDTHS)
        .header(Row::new(HEADER).bold())
        .row_highlight_style(Style::new().reversed())
        .block(block);

    let mut state = TableState::default().with_selected(picker.cursor());
    frame.render_stateful_widget(table, table_area, &mut state);

    if picker.show_help() {
        let help = Paragraph::new(HELP.iter().map(|l| Line::from(*l)).collect::<Vec<_>>())
            .block(Block::bordered().title(" Help "));
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Workspace;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rendered(picker: &Picker) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, picker)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Char('j'))), Some(PickerKey::Down));
        assert_eq!(map_key(key(KeyCode::Up)), Some(PickerKey::Up));
        assert_eq!(map_key(key(KeyCode::Char('G'))), Some(PickerKey::Bottom));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(PickerKey::Confirm));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(PickerKey::Back));
        assert_eq!(map_key(key(KeyCode::Char('q'))), Some(PickerKey::Quit));
        assert_eq!(map_key(key(KeyCode::Char('s'))), Some(PickerKey::Send));
    }

    #[test]
    fn maps_digits_to_jumps() {
        assert_eq!(map_key(key(KeyCode::Char('1'))), Some(PickerKey::Jump(1)));
        assert_eq!(map_key(key(KeyCode::Char('9'))), Some(PickerKey::Jump(9)));
        assert_eq!(map_key(key(KeyCode::Char('0'))), Some(PickerKey::Jump(0)));
        assert_eq!(map_key(key(KeyCode::Char('a'))), None);
    }

    #[test]
    fn ctrl_c_quits_and_other_chords_are_ignored() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl('c')), Some(PickerKey::Quit));
        assert_eq!(map_key(ctrl('j')), None);
    }

    #[test]
    fn draws_correlated_rows() {
        let picker = Picker::new(vec![Workspace {
            id: 3,
            windows: 2,
            window: "deadbeef".into(),
            window_title: "nvim".into(),
            class: "kitty".into(),
            ..Workspace::default()
        }]);
        let screen = rendered(&picker);
        assert!(screen.contains("Workspaces"));
        assert!(screen.contains("kitty"));
        assert!(screen.contains("nvim"));
        assert!(!screen.contains("toggle help"));
    }

    #[test]
    fn unparsed_id_is_drawn_as_unknown() {
        let picker = Picker::new(vec![Workspace {
            id: UNPARSED,
            window_title: "irc".into(),
            ..Workspace::default()
        }]);
        let screen = rendered(&picker);
        assert!(screen.contains("irc"));
        assert!(!screen.contains("-1"));
    }

    #[test]
    fn send_mode_changes_the_title() {
        let mut picker = Picker::new(vec![Workspace {
            id: 1,
            window: "aa".into(),
            ..Workspace::default()
        }]);
        picker.handle(PickerKey::Send);
        let screen = rendered(&picker);
        assert!(screen.contains("Send to Workspace"));
        assert!(screen.contains("Back"));
    }

    #[test]
    fn draws_help_when_toggled() {
        let mut picker = Picker::new(Vec::new());
        picker.handle(PickerKey::ToggleHelp);
        assert!(rendered(&picker).contains("toggle help"));
    }
}
