//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (dark, light, high contrast)
//! - [`IconSet`] - Glyphs with Unicode/ASCII modes
//! - [`BorderSet`] - Border characters with Unicode/ASCII fallback

mod borders;
mod colors;
mod icons;

pub use borders::BorderSet;
pub use colors::{Theme, ThemeKind};
pub use icons::{IconMode, IconSet};
