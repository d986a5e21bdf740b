//! Terminal front-ends for the [`Picker`](crate::picker::Picker).
//!
//! When the `picker-tui` feature is enabled, [`term::run`] takes over the
//! terminal, draws the workspace table, and returns once a workspace has
//! been chosen or the user quits.

#[cfg(feature = "picker-tui")]
pub mod term;
