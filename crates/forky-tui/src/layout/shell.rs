//! Main shell renderer.
//!
//! Regions:
//! 1. Status bar (top, 1 line)
//! 2. Sidebar (left, `sidebarWidth`)
//! 3. Commit panel (right, top `commitPanelHeight` percent)
//! 4. Diff sidebar and diff view (right, below the commit panel)
//! 5. Footer hints (bottom, 1 line)

use forky_layout::{Affordances, DragState, Panel, PanelSizes};
use ratatui::{layout::Rect, style::Style, Frame};

use super::metrics::CellMetrics;
use super::regions::{compute_regions, ShellRegions};
use crate::theme::{BorderSet, IconSet, Theme};
use crate::widgets::{FooterHints, Pane, StatusBar, StatusBarContent};

/// Everything the shell needs to draw one frame.
pub struct ShellView<'a> {
    pub sizes: PanelSizes,
    pub drag: DragState,
    pub affordances: Affordances,
    pub metrics: CellMetrics,
    pub theme: &'a Theme,
    pub borders: &'a BorderSet,
    pub icons: &'a IconSet,
}

impl ShellView<'_> {
    fn dragging(&self) -> Option<Panel> {
        match self.drag {
            DragState::Dragging(panel) => Some(panel),
            DragState::Idle => None,
        }
    }
}

/// Render the shell and return the regions it was laid out in.
///
/// Returns `None` when the terminal is too small to show the panels.
pub fn render_shell(frame: &mut Frame<'_>, view: &ShellView<'_>) -> Option<ShellRegions> {
    let area = frame.area();
    let Some(regions) = compute_regions(area, view.sizes, view.metrics) else {
        render_too_small(frame, area, view);
        return None;
    };
    let dragging = view.dragging();

    let status = StatusBarContent::new(view.sizes, dragging);
    let status_bar = StatusBar::new(&status, view.theme, view.icons);
    frame.render_widget(status_bar, regions.status);

    let sizes = view.sizes;
    let panes = [
        (
            Panel::Sidebar,
            regions.sidebar,
            " Branches ",
            format!("{:.0} px", sizes.sidebar_width),
        ),
        (
            Panel::CommitPanel,
            regions.commit_panel,
            " Commits ",
            format!("{:.0}%", sizes.commit_panel_height),
        ),
        (
            Panel::DiffSidebar,
            regions.diff_sidebar,
            " Changes ",
            format!("{:.0} px", sizes.diff_sidebar_width),
        ),
    ];
    for (panel, area, title, detail) in panes {
        let pane = Pane::new(view.theme, view.borders)
            .title(title)
            .active(dragging == Some(panel))
            .line(detail);
        frame.render_widget(pane, area);
    }

    let diff = Pane::new(view.theme, view.borders)
        .title(" Diff ")
        .line("Drag a panel border to resize it.");
    frame.render_widget(diff, regions.diff_view);

    if let Some(panel) = dragging {
        render_grip(frame, regions.handle(panel), panel, view);
    }

    let hints = if dragging.is_some() {
        FooterHints::drag_hints()
    } else {
        FooterHints::idle_hints()
    };
    let footer = FooterHints::new(&hints, view.theme, view.icons).affordances(view.affordances);
    frame.render_widget(footer, regions.footer);

    Some(regions)
}

/// Draw the grip glyph over the handle being dragged.
fn render_grip(frame: &mut Frame<'_>, handle: Rect, panel: Panel, view: &ShellView<'_>) {
    let glyph = view.icons.grip(panel.axis());
    let style = Style::default().fg(view.theme.handle_active);
    let buf = frame.buffer_mut();
    for y in handle.top()..handle.bottom() {
        for x in handle.left()..handle.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(glyph).set_style(style);
            }
        }
    }
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, view: &ShellView<'_>) {
    let content = StatusBarContent::too_small();
    frame.render_widget(StatusBar::new(&content, view.theme, view.icons), area);
}
