//! Entry point for **wmt**.
//!
//! Resolves the Hyprland session once, then either opens the interactive
//! table (default), prints the listing, or dispatches a single switch or
//! window move.
//!
//! When the `picker-tui` feature is disabled the interactive table is not
//! available and `wmt list` / `wmt switch` / `wmt move` are the only modes.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use wmt::config::{Config, ConfigError};
use wmt::hyprland::session::{Session, SessionError};
use wmt::workspace::Workspace;

#[derive(Debug, Parser)]
#[command(name = "wmt", version, about = "Pick a Hyprland workspace from a table")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/wmt/config.json).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Choose a workspace interactively (default).
    Pick,
    /// Print all workspaces, ordered by id.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Switch to a workspace by id.
    Switch {
        #[arg(allow_negative_numbers = true)]
        id: i32,
    },
    /// Move a window to a workspace without following it.
    Move {
        /// Window address, with or without `0x`.
        address: String,
        id: i32,
    },
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(not(feature = "picker-tui"))]
    #[error("the interactive table requires the `picker-tui` feature")]
    PickerUnavailable,
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/wmt`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("wmt")
}

/// Load the config from `explicit`, or from the default location with a
/// fallback to compiled-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return Config::load(path);
    }
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            Ok(cfg)
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Ok(Config::default())
        }
    }
}

//  Main

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let session = match Session::connect(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("could not reach hyprland: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Mode::Pick) {
        Mode::Pick => run_picker(&session),
        Mode::List { json } => print_list(&session, json),
        Mode::Switch { id } => {
            session.switch_to(id);
            Ok(())
        }
        Mode::Move { address, id } => {
            session.move_window(address.trim_start_matches("0x"), id);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

//  Modes

#[cfg(feature = "picker-tui")]
fn run_picker(session: &Session) -> Result<(), AppError> {
    let picker = wmt::picker::Picker::load(session)?;
    wmt::tui::term::run(session, picker)?;
    Ok(())
}

#[cfg(not(feature = "picker-tui"))]
fn run_picker(_session: &Session) -> Result<(), AppError> {
    Err(AppError::PickerUnavailable)
}

fn print_list(session: &Session, json: bool) -> Result<(), AppError> {
    let listing = session.list_report()?;
    if !listing.report.is_complete() {
        info!("partial listing: {:?}", listing.report);
    }

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &listing.workspaces)?;
        writeln!(out)?;
    } else {
        for ws in &listing.workspaces {
            writeln!(out, "{}", table_row(ws))?;
        }
    }
    Ok(())
}

fn table_row(ws: &Workspace) -> String {
    format!(
        "{:>4}  mon {:<2} win {:<3} {:<20} {}",
        ws.id,
        ws.monitor,
        ws.windows,
        ws.class,
        ws.label()
    )
}
