//! Layout components for the TUI.
//!
//! This module provides:
//! - [`compute_regions`] - Panel rectangles from the live sizes
//! - [`render_shell`] - Main shell renderer
//! - [`CellMetrics`] - Cell to pixel conversion

mod metrics;
mod regions;
mod shell;

pub use metrics::CellMetrics;
pub use regions::{compute_regions, ShellRegions, MIN_HEIGHT, MIN_WIDTH};
pub use shell::{render_shell, ShellView};
