//! Drag state machine for the panel resize handles.
//!
//! [`ResizeController`] owns which panel (if any) is being resized, feeds raw
//! pointer samples through the [`UpdateScheduler`], and applies the panel
//! geometry against live layout state when the scheduler releases a sample.
//!
//! ```text
//!            start(panel)
//!   Idle ─────────────────────▶ Dragging(panel)
//!    ▲                               │
//!    └──────────── stop() ───────────┘
//! ```

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

use crate::geometry::{self, Point, Rect};
use crate::model::SharedSizes;
use crate::scheduler::{FrameTicket, Submission, UpdateScheduler};
use crate::sizes::{Panel, PanelSizes, PanelSizesPatch, ResizeAxis};

/// Error type for controller operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeError {
    #[error("A {active} drag is already in progress")]
    AlreadyDragging { active: Panel },
}

/// Which panel, if any, is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Panel),
}

/// Pointer cursor the rendering layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    RowResize,
    ColResize,
}

impl From<ResizeAxis> for CursorHint {
    fn from(axis: ResizeAxis) -> Self {
        match axis {
            ResizeAxis::Rows => Self::RowResize,
            ResizeAxis::Columns => Self::ColResize,
        }
    }
}

/// Global UI affordances scoped to the active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub cursor: CursorHint,
    pub text_selection: bool,
}

impl Default for Affordances {
    fn default() -> Self {
        Self {
            cursor: CursorHint::Default,
            text_selection: true,
        }
    }
}

/// Live measurement of the commit panel's container.
///
/// Queried on every application, never cached across samples.
pub trait ContainerProbe {
    /// Current container rectangle, `None` while it is not laid out.
    fn commit_container(&self) -> Option<Rect>;
}

impl ContainerProbe for Option<Rect> {
    fn commit_container(&self) -> Option<Rect> {
        *self
    }
}

impl ContainerProbe for Rect {
    fn commit_container(&self) -> Option<Rect> {
        Some(*self)
    }
}

/// What happened to a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No drag is active.
    Ignored,
    /// The sample was applied and these are the new sizes.
    Applied(PanelSizes),
    /// The sample was due but could not be applied (container unavailable).
    Skipped,
    /// A frame-deferred update was requested.
    Scheduled(FrameTicket),
    /// Folded into the already pending frame update.
    Coalesced,
}

/// Drag state machine driving the scheduler and the size model.
#[derive(Debug)]
pub struct ResizeController {
    sizes: SharedSizes,
    scheduler: UpdateScheduler<Point>,
    state: DragState,
    affordances: Affordances,
}

impl ResizeController {
    pub fn new(sizes: SharedSizes, throttle: Duration) -> Self {
        Self {
            sizes,
            scheduler: UpdateScheduler::new(throttle),
            state: DragState::Idle,
            affordances: Affordances::default(),
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Shared handle to the sizes this controller mutates.
    pub fn sizes(&self) -> &SharedSizes {
        &self.sizes
    }

    /// True while a frame-deferred update is waiting.
    pub fn has_pending_update(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Begin resizing `panel`.
    ///
    /// A second `start` while a drag is active is rejected and leaves the
    /// active session untouched.
    pub fn start(&mut self, panel: Panel, now: Instant) -> Result<(), ResizeError> {
        if let DragState::Dragging(active) = self.state {
            debug!(%active, requested = %panel, "Rejecting concurrent drag");
            return Err(ResizeError::AlreadyDragging { active });
        }

        let session = self.scheduler.begin(now);
        self.state = DragState::Dragging(panel);
        self.affordances = Affordances {
            cursor: panel.axis().into(),
            text_selection: false,
        };
        debug!(%panel, session, "Drag started");
        Ok(())
    }

    /// Feed a pointer sample taken at `now`.
    pub fn pointer_move(
        &mut self,
        point: Point,
        now: Instant,
        probe: &dyn ContainerProbe,
    ) -> MoveOutcome {
        let DragState::Dragging(panel) = self.state else {
            trace!(?point, "Pointer move while idle");
            return MoveOutcome::Ignored;
        };

        match self.scheduler.submit(point, now) {
            Submission::Apply(point) => match self.apply(panel, point, probe) {
                Some(sizes) => MoveOutcome::Applied(sizes),
                None => MoveOutcome::Skipped,
            },
            Submission::Scheduled(ticket) => MoveOutcome::Scheduled(ticket),
            Submission::Coalesced => MoveOutcome::Coalesced,
        }
    }

    /// Fire a deferred update requested through [`MoveOutcome::Scheduled`].
    pub fn fire(
        &mut self,
        ticket: FrameTicket,
        now: Instant,
        probe: &dyn ContainerProbe,
    ) -> Option<PanelSizes> {
        let DragState::Dragging(panel) = self.state else {
            return None;
        };
        let point = self.scheduler.fire(ticket, now)?;
        self.apply(panel, point, probe)
    }

    /// Frame boundary: apply the pending update, if any.
    pub fn on_frame(&mut self, now: Instant, probe: &dyn ContainerProbe) -> Option<PanelSizes> {
        let DragState::Dragging(panel) = self.state else {
            return None;
        };
        let point = self.scheduler.on_frame(now)?;
        self.apply(panel, point, probe)
    }

    /// End the drag. Pending updates are dropped. Idempotent.
    pub fn stop(&mut self) {
        self.scheduler.cancel();
        if let DragState::Dragging(panel) = self.state {
            debug!(%panel, "Drag stopped");
        }
        self.state = DragState::Idle;
        self.affordances = Affordances::default();
    }

    fn apply(&self, panel: Panel, point: Point, probe: &dyn ContainerProbe) -> Option<PanelSizes> {
        let value = match panel {
            Panel::Sidebar => geometry::sidebar_width(point.x),
            Panel::CommitPanel => {
                let Some(container) = probe.commit_container() else {
                    debug!("Commit panel container not mounted, skipping update");
                    return None;
                };
                let Some(height) = geometry::commit_panel_height(point.y, container) else {
                    debug!(
                        ?container,
                        "Commit panel container has no height, skipping update"
                    );
                    return None;
                };
                height
            }
            Panel::DiffSidebar => {
                geometry::diff_sidebar_width(point.x, self.sizes.get().sidebar_width)
            }
        };

        Some(self.sizes.set(PanelSizesPatch::for_panel(panel, value)))
    }
}
