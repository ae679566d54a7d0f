//! Screen regions derived from the live panel sizes.
//!
//! ```text
//! ┌ status ───────────────────────────────────────┐
//! │ sidebar ┃ commit panel                        │
//! │         ┃━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━│
//! │         ┃ diff sidebar ┃ diff view            │
//! └ footer ───────────────────────────────────────┘
//! ```
//!
//! Each resize handle is the trailing border of the panel it resizes, so the
//! diff sidebar starts exactly where the sidebar ends.

use forky_layout::{Panel, PanelSizes};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::metrics::{to_cells, CellMetrics};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

/// Smallest pane that still shows its borders and one line of content.
const MIN_PANE: u16 = 3;
/// Columns always left to the main area.
const MIN_MAIN_WIDTH: u16 = 20;

/// Every region of the shell for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellRegions {
    pub status: Rect,
    pub sidebar: Rect,
    /// Container of the commit panel: everything right of the sidebar.
    pub main: Rect,
    pub commit_panel: Rect,
    pub diff_sidebar: Rect,
    pub diff_view: Rect,
    pub footer: Rect,
}

impl ShellRegions {
    /// Hit zone of the handle that resizes `panel`.
    pub fn handle(&self, panel: Panel) -> Rect {
        match panel {
            Panel::Sidebar => trailing_column(self.sidebar),
            Panel::CommitPanel => trailing_row(self.commit_panel),
            Panel::DiffSidebar => trailing_column(self.diff_sidebar),
        }
    }

    /// The panel whose handle covers the given cell, if any.
    pub fn handle_at(&self, column: u16, row: u16) -> Option<Panel> {
        Panel::ALL.into_iter().find(|panel| {
            let handle = self.handle(*panel);
            column >= handle.x
                && column < handle.right()
                && row >= handle.y
                && row < handle.bottom()
        })
    }
}

fn trailing_column(area: Rect) -> Rect {
    let x = area.right().saturating_sub(1);
    Rect::new(x, area.y, area.width.min(1), area.height)
}

fn trailing_row(area: Rect) -> Rect {
    let y = area.bottom().saturating_sub(1);
    Rect::new(area.x, y, area.width, area.height.min(1))
}

/// Keep `value` in `[min, max]`, preferring `max` when the range is empty.
fn fit(value: u16, min: u16, max: u16) -> u16 {
    value.max(min).min(max)
}

/// Split `area` according to `sizes`. `None` when the terminal is too small.
pub fn compute_regions(
    area: Rect,
    sizes: PanelSizes,
    metrics: CellMetrics,
) -> Option<ShellRegions> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return None;
    }

    // Status | Body | Footer
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let body = rows[1];

    // Sidebar | Main
    let sidebar_width = fit(
        metrics.columns_for(sizes.sidebar_width),
        MIN_PANE,
        body.width.saturating_sub(MIN_MAIN_WIDTH),
    );
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(body);
    let main = columns[1];

    // Commit panel over the diff area
    let commit_height = fit(
        to_cells(f64::from(main.height) * sizes.commit_panel_height / 100.0),
        MIN_PANE,
        main.height.saturating_sub(MIN_PANE),
    );
    let stacked = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(commit_height), Constraint::Min(0)])
        .split(main);

    // Diff sidebar | Diff view
    let lower = stacked[1];
    let diff_width = fit(
        metrics.columns_for(sizes.diff_sidebar_width),
        MIN_PANE,
        lower.width.saturating_sub(MIN_PANE),
    );
    let diff = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(diff_width), Constraint::Min(0)])
        .split(lower);

    Some(ShellRegions {
        status: rows[0],
        sidebar: columns[0],
        main,
        commit_panel: stacked[0],
        diff_sidebar: diff[0],
        diff_view: diff[1],
        footer: rows[2],
    })
}
