//! Pointer-to-size geometry for each resize handle.
//!
//! These are pure functions of the pointer sample and the *live* layout
//! inputs at the moment of application.

use serde::{Deserialize, Serialize};

use crate::sizes::{COMMIT_PANEL_HEIGHT, DIFF_SIDEBAR_WIDTH, SIDEBAR_WIDTH};

/// Absolute pointer position in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Sidebar width for a pointer at `pointer_x`, measured from the window's
/// left edge.
pub fn sidebar_width(pointer_x: f64) -> f64 {
    SIDEBAR_WIDTH.clamp(pointer_x)
}

/// Commit panel height (percent) for a pointer at `pointer_y` inside
/// `container`.
///
/// Returns `None` for a collapsed container or non-finite input, in which
/// case the caller skips the update.
pub fn commit_panel_height(pointer_y: f64, container: Rect) -> Option<f64> {
    if container.height.is_nan()
        || container.height <= 0.0
        || !pointer_y.is_finite()
        || !container.top.is_finite()
    {
        return None;
    }
    let percent = (pointer_y - container.top) / container.height * 100.0;
    Some(COMMIT_PANEL_HEIGHT.clamp(percent))
}

/// Diff sidebar width for a pointer at `pointer_x`.
///
/// The diff sidebar starts where the sidebar ends, so its width depends on
/// the sidebar width at the time of application.
pub fn diff_sidebar_width(pointer_x: f64, current_sidebar_width: f64) -> f64 {
    DIFF_SIDEBAR_WIDTH.clamp(pointer_x - current_sidebar_width)
}
