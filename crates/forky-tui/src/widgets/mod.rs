//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`StatusBar`] - Top status bar with the current panel sizes
//! - [`FooterHints`] - Bottom keybinding hints and drag affordances
//! - [`Pane`] - Bordered panel with a title

mod footer_hints;
mod pane;
mod status_bar;

pub use footer_hints::{FooterHints, KeyHint};
pub use pane::Pane;
pub use status_bar::{StatusBar, StatusBarContent};
