//! Panel shell: application state and input handling.
//!
//! [`ShellApp`] is the rendering layer of the layout engine. It owns a
//! [`ResizeController`] over the shared sizes, maps mouse press/drag/release
//! on a panel border onto start/move/stop, and applies deferred updates on
//! every frame tick.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use forky_layout::{
    Affordances, DragState, MoveOutcome, PanelSizes, Rect as PxRect, ResizeController,
    SharedSizes,
};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::event::{key_to_action, Action};
use crate::layout::{render_shell, CellMetrics, ShellRegions, ShellView, MIN_HEIGHT, MIN_WIDTH};
use crate::theme::{BorderSet, IconMode, IconSet, Theme, ThemeKind};

/// UI configuration from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Glyph mode (Unicode, or ASCII with `NO_COLOR`).
    pub icons: IconMode,
    /// Palette from `FORKY_THEME`.
    pub theme: ThemeKind,
    /// Cell size from `FORKY_CELL_PX`.
    pub metrics: CellMetrics,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl UiConfig {
    /// Create config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let icons = if lookup("NO_COLOR").is_some() {
            IconMode::Ascii
        } else {
            IconMode::Unicode
        };

        let theme = lookup("FORKY_THEME")
            .map_or(Some(ThemeKind::default()), |name| ThemeKind::parse(&name))
            .unwrap_or_else(|| {
                warn!("Unknown FORKY_THEME, using dark");
                ThemeKind::default()
            });

        let metrics = lookup("FORKY_CELL_PX")
            .map_or(Some(CellMetrics::default()), |cell| {
                CellMetrics::parse(&cell)
            })
            .unwrap_or_else(|| {
                warn!("Invalid FORKY_CELL_PX, expected WxH such as 8x16");
                CellMetrics::default()
            });

        Self {
            icons,
            theme,
            metrics,
        }
    }
}

/// Main application state for the panel shell.
#[derive(Debug)]
pub struct ShellApp {
    /// UI configuration.
    pub ui_config: UiConfig,
    /// Theme colors.
    pub theme: Theme,
    /// Glyph set based on config.
    pub icons: IconSet,
    /// Border set based on icon mode.
    pub borders: BorderSet,
    /// Current terminal size.
    pub terminal_size: (u16, u16),
    /// Should the app quit?
    pub should_quit: bool,
    sizes: SharedSizes,
    controller: ResizeController,
    /// Regions of the last drawn frame; `None` before the first draw or
    /// while the terminal is too small.
    regions: Option<ShellRegions>,
}

impl ShellApp {
    pub fn new(sizes: SharedSizes, throttle: Duration, ui_config: UiConfig) -> Self {
        let controller = ResizeController::new(sizes.clone(), throttle);
        Self {
            theme: Theme::for_kind(ui_config.theme),
            icons: IconSet::new(ui_config.icons),
            borders: BorderSet::new(ui_config.icons),
            ui_config,
            terminal_size: (80, 24), // Default, updated on first render
            should_quit: false,
            sizes,
            controller,
            regions: None,
        }
    }

    /// Live panel sizes.
    pub fn sizes(&self) -> PanelSizes {
        self.sizes.get()
    }

    pub fn drag_state(&self) -> DragState {
        self.controller.state()
    }

    pub fn affordances(&self) -> Affordances {
        self.controller.affordances()
    }

    pub fn regions(&self) -> Option<&ShellRegions> {
        self.regions.as_ref()
    }

    /// Check if terminal is too small.
    pub fn is_too_small(&self) -> bool {
        self.terminal_size.0 < MIN_WIDTH || self.terminal_size.1 < MIN_HEIGHT
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key_to_action(key) {
            Action::Quit => {
                self.controller.stop();
                self.should_quit = true;
            }
            Action::Cancel => {
                if self.controller.is_dragging() {
                    self.controller.stop();
                } else {
                    self.should_quit = true;
                }
            }
            Action::Reset => {
                self.controller.stop();
                let sizes = self.sizes.reset();
                debug!(?sizes, "Panel sizes reset");
            }
            Action::None => {}
        }
    }

    /// Handle mouse input at `now`. Returns true when the screen must be
    /// redrawn.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(panel) = self
                    .regions
                    .and_then(|regions| regions.handle_at(mouse.column, mouse.row))
                else {
                    return false;
                };
                match self.controller.start(panel, now) {
                    Ok(()) => true,
                    Err(e) => {
                        debug!(error = %e, "Ignoring press on resize handle");
                        false
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let point = self.ui_config.metrics.point(mouse.column, mouse.row);
                let container = self.commit_container();
                matches!(
                    self.controller.pointer_move(point, now, &container),
                    MoveOutcome::Applied(_)
                )
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let was_dragging = self.controller.is_dragging();
                self.controller.stop();
                was_dragging
            }
            _ => false,
        }
    }

    /// Frame tick. Returns true when a deferred update was applied.
    pub fn handle_frame(&mut self, now: Instant) -> bool {
        let container = self.commit_container();
        self.controller.on_frame(now, &container).is_some()
    }

    /// Handle terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Draw the shell and remember where everything landed.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let view = ShellView {
            sizes: self.sizes.get(),
            drag: self.controller.state(),
            affordances: self.controller.affordances(),
            metrics: self.ui_config.metrics,
            theme: &self.theme,
            borders: &self.borders,
            icons: &self.icons,
        };
        self.regions = render_shell(frame, &view);
    }

    /// Pixel rectangle of the commit panel's container in the last frame.
    fn commit_container(&self) -> Option<PxRect> {
        self.regions
            .map(|regions| self.ui_config.metrics.rect(regions.main))
    }
}
