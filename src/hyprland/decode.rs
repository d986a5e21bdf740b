//! Decoders for Hyprland's plain-text `workspaces` and `clients` replies.
//!
//! Neither format escapes or length-prefixes anything, so the decoders
//! anchor on fixed line positions and literal field labels.  A block with
//! the wrong number of lines is skipped; a field that does not parse gets
//! [`UNPARSED`] (integers) or an empty string.
//!
//! # `workspaces` block (6 lines)
//!
//! ```text
//! workspace ID 3 (3) on monitor DP-1:
//!         monitorID: 0
//!         windows: 2
//!         hasfullscreen: 0
//!         lastwindow: 0xdeadbeef
//!         lastwindowtitle: Terminal
//! ```
//!
//! # `clients` block (21 lines)
//!
//! Line 0 is `Window <address> -> <title>:`, line 8 carries `class: `, and
//! line 11 carries `initialTitle: `.  The other lines are ignored.

use crate::traits::BlockDecoder;
use crate::workspace::{Client, ClientMap, Workspace, UNPARSED};

/// Decoder for one `workspaces` block.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceDecoder;

/// Decoder for one `clients` block, yielding `(address, client)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientDecoder;

const WORKSPACE_MONITOR: usize = 1;
const WORKSPACE_WINDOWS: usize = 2;
const WORKSPACE_LAST_WINDOW: usize = 4;
const WORKSPACE_LAST_TITLE: usize = 5;

const CLIENT_CLASS: usize = 8;
const CLIENT_INITIAL_TITLE: usize = 11;

impl BlockDecoder for WorkspaceDecoder {
    type Output = Workspace;
    const EXPECTED_LINES: usize = 6;

    fn decode_lines(&self, lines: &[&str]) -> Option<Workspace> {
        let window = field_str(lines[WORKSPACE_LAST_WINDOW], "lastwindow");
        let window = window.strip_prefix("0x").unwrap_or(window);
        // Hyprland prints `0x0` when the workspace has no last window.
        let window = if window == "0" { "" } else { window };

        Some(Workspace {
            id: parse_int(between(lines[0], '(', ')')),
            monitor: field_int(lines[WORKSPACE_MONITOR], "monitorID"),
            windows: field_int(lines[WORKSPACE_WINDOWS], "windows"),
            window: window.to_string(),
            window_title: field_str(lines[WORKSPACE_LAST_TITLE], "lastwindowtitle").to_string(),
            class: String::new(),
            initial_title: String::new(),
        })
    }
}

impl BlockDecoder for ClientDecoder {
    type Output = (String, Client);
    const EXPECTED_LINES: usize = 21;

    fn decode_lines(&self, lines: &[&str]) -> Option<(String, Client)> {
        let address = lines[0].split_whitespace().nth(1)?;
        let client = Client {
            class: field_str(lines[CLIENT_CLASS], "class").to_string(),
            initial_title: field_str(lines[CLIENT_INITIAL_TITLE], "initialTitle").to_string(),
        };
        Some((address.to_string(), client))
    }
}

impl ClientDecoder {
    /// Decode a whole `clients` reply into a lookup map.
    ///
    /// When an address appears more than once, the last block wins.
    /// Returns the map and the number of skipped blocks.
    pub fn decode_map(&self, body: &str) -> (ClientMap, usize) {
        let decoded = self.decode_all(body);
        (decoded.items.into_iter().collect(), decoded.skipped)
    }
}

//  Field helpers

/// Value after `<label>: ` on a whitespace-trimmed line, or `""`.
fn field_str<'a>(line: &'a str, label: &str) -> &'a str {
    line.trim()
        .strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(": "))
        .unwrap_or("")
}

/// Integer after `<label>: `, or [`UNPARSED`].
fn field_int(line: &str, label: &str) -> i32 {
    parse_int(field_str(line, label))
}

fn parse_int(value: &str) -> i32 {
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            log::debug!("not an integer: {:?}", value);
            UNPARSED
        }
    }
}

/// Text strictly between the first `open` and the next `close` after it.
fn between(s: &str, open: char, close: char) -> &str {
    s.split_once(open)
        .and_then(|(_, rest)| rest.split_once(close))
        .map(|(inner, _)| inner)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMINAL_WS: &str = "workspace ID 3 (3) on monitor DP-1:\n\tmonitorID: 0\n\twindows: 2\n\thasfullscreenwindow: 0\n\tlastwindow: 0xdeadbeef\n\tlastwindowtitle: Terminal\n";

    fn workspace_block(id: &str, window: &str, title: &str) -> String {
        format!(
            "workspace ID {id} ({id}) on monitor DP-1:\n\tmonitorID: 1\n\twindows: 1\n\thasfullscreen: 0\n\tlastwindow: {window}\n\tlastwindowtitle: {title}"
        )
    }

    /// A 21-line client block in the layout Hyprland prints.
    fn client_block(address: &str, class: &str, initial_title: &str) -> String {
        [
            format!("Window {address} -> some title:"),
            "\tmapped: 1".into(),
            "\thidden: 0".into(),
            "\tat: 0,0".into(),
            "\tsize: 100,100".into(),
            "\tworkspace: 1 (1)".into(),
            "\tfloating: 0".into(),
            "\tmonitor: 0".into(),
            format!("\tclass: {class}"),
            "\ttitle: some title".into(),
            format!("\tinitialClass: {class}"),
            format!("\tinitialTitle: {initial_title}"),
            "\tpid: 1234".into(),
            "\txwayland: 0".into(),
            "\tpinned: 0".into(),
            "\tfullscreen: 0".into(),
            "\tfullscreenmode: 0".into(),
            "\tfakefullscreen: 0".into(),
            "\tgrouped: 0".into(),
            "\tswallowing: 0".into(),
            "\tfocusHistoryID: 0".into(),
        ]
        .join("\n")
    }

    //  Workspaces

    #[test]
    fn decodes_well_formed_workspace() {
        let ws = WorkspaceDecoder.decode_block(TERMINAL_WS).unwrap();
        assert_eq!(ws.id, 3);
        assert_eq!(ws.monitor, 0);
        assert_eq!(ws.windows, 2);
        assert_eq!(ws.window, "deadbeef");
        assert_eq!(ws.window_title, "Terminal");
        assert!(ws.class.is_empty());
        assert!(ws.initial_title.is_empty());
    }

    #[test]
    fn malformed_id_is_sentinel() {
        let block = TERMINAL_WS.replace("workspace ID 3 (3)", "workspace ID x ()");
        let ws = WorkspaceDecoder.decode_block(&block).unwrap();
        assert_eq!(ws.id, UNPARSED);
        assert_eq!(ws.window_title, "Terminal");
    }

    #[test]
    fn missing_parentheses_is_sentinel() {
        let block = TERMINAL_WS.replace("(3)", "3");
        assert_eq!(WorkspaceDecoder.decode_block(&block).unwrap().id, UNPARSED);
    }

    #[test]
    fn unparsable_counts_are_sentinel() {
        let block = TERMINAL_WS
            .replace("monitorID: 0", "monitorID: DP-1")
            .replace("windows: 2", "windowz: 2");
        let ws = WorkspaceDecoder.decode_block(&block).unwrap();
        assert_eq!(ws.monitor, UNPARSED);
        assert_eq!(ws.windows, UNPARSED);
    }

    #[test]
    fn unlabeled_string_fields_are_empty() {
        let block = TERMINAL_WS.replace("lastwindowtitle: Terminal", "title: Terminal");
        let ws = WorkspaceDecoder.decode_block(&block).unwrap();
        assert_eq!(ws.window_title, "");
        assert_eq!(ws.window, "deadbeef");
    }

    #[test]
    fn window_without_prefix_is_kept() {
        let block = TERMINAL_WS.replace("0xdeadbeef", "cafe");
        assert_eq!(WorkspaceDecoder.decode_block(&block).unwrap().window, "cafe");
    }

    #[test]
    fn null_window_address_is_empty() {
        let block = workspace_block("4", "0x0", "");
        let ws = WorkspaceDecoder.decode_block(&block).unwrap();
        assert_eq!(ws.id, 4);
        assert_eq!(ws.window, "");
        assert_eq!(ws.window_title, "");
    }

    #[test]
    fn title_keeps_inner_colons() {
        let block = TERMINAL_WS.replace("Terminal", "nvim: main.rs");
        let ws = WorkspaceDecoder.decode_block(&block).unwrap();
        assert_eq!(ws.window_title, "nvim: main.rs");
    }

    #[test]
    fn wrong_line_count_does_not_disturb_neighbours() {
        let body = format!(
            "{}\n\nworkspace ID 9 (9) on monitor DP-1:\n\tmonitorID: 0\n\n{}\n\n",
            workspace_block("1", "0xa", "one"),
            workspace_block("2", "0xb", "two"),
        );
        let decoded = WorkspaceDecoder.decode_all(&body);
        let ids: Vec<i32> = decoded.items.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(decoded.skipped, 1);
    }

    #[test]
    fn keeps_response_order() {
        let body = format!(
            "{}\n\n{}\n\n",
            workspace_block("7", "0xa", "a"),
            workspace_block("2", "0xb", "b"),
        );
        let ids: Vec<i32> = WorkspaceDecoder
            .decode_all(&body)
            .items
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![7, 2]);
    }

    //  Clients

    #[test]
    fn decodes_client_block() {
        let block = client_block("deadbeef", "kitty", "Terminal");
        let (address, client) = ClientDecoder.decode_block(&block).unwrap();
        assert_eq!(address, "deadbeef");
        assert_eq!(client.class, "kitty");
        assert_eq!(client.initial_title, "Terminal");
    }

    #[test]
    fn short_client_block_is_dropped() {
        let good = client_block("aa", "kitty", "a");
        let body = format!("{good}\n\nWindow bb -> x:\n\tmapped: 1\n\n");
        let (map, skipped) = ClientDecoder.decode_map(&body);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("aa"));
        assert_eq!(skipped, 1);
    }

    #[test]
    fn client_header_without_address_is_dropped() {
        let block =
            client_block("aa", "kitty", "a").replacen("Window aa -> some title:", "Window", 1);
        assert!(ClientDecoder.decode_block(&block).is_none());
    }

    #[test]
    fn duplicate_address_last_wins() {
        let body = format!(
            "{}\n\n{}\n\n",
            client_block("aa", "first", "one"),
            client_block("aa", "second", "two"),
        );
        let (map, _) = ClientDecoder.decode_map(&body);
        assert_eq!(map.len(), 1);
        assert_eq!(map["aa"].class, "second");
        assert_eq!(map["aa"].initial_title, "two");
    }

    //  Helpers

    #[test]
    fn between_takes_first_pair() {
        assert_eq!(between("a (12) b (34)", '(', ')'), "12");
        assert_eq!(between("a (12 b", '(', ')'), "");
        assert_eq!(between("a ) (5)", '(', ')'), "5");
    }

    #[test]
    fn field_str_requires_exact_label() {
        assert_eq!(field_str("\tclass: kitty", "class"), "kitty");
        assert_eq!(field_str("\tinitialClass: kitty", "class"), "");
        assert_eq!(field_str("\tclass:kitty", "class"), "");
    }
}
