//! Headless replay of recorded pointer traces.
//!
//! A trace is a JSON document of timestamped pointer events. Replaying it
//! drives a [`ResizeController`] backed by an in-memory store, with the frame
//! clock ticking only on explicit `frame` events, and reports every applied
//! mutation.
//!
//! ```json
//! {
//!   "container": { "left": 0, "top": 100, "width": 800, "height": 400 },
//!   "events": [
//!     { "at_ms": 0, "kind": "down", "panel": "sidebar" },
//!     { "at_ms": 4, "kind": "move", "x": 320, "y": 10 },
//!     { "at_ms": 16, "kind": "frame" },
//!     { "at_ms": 20, "kind": "up" }
//!   ]
//! }
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::LayoutConfig;
use crate::controller::{DragState, MoveOutcome, ResizeController, ResizeError};
use crate::geometry::{Point, Rect};
use crate::model::{PanelSizeModel, SharedSizes};
use crate::sizes::{Panel, PanelSizes};
use crate::store::MemoryStore;

/// Error type for trace replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Event at {at_ms} ms comes before the previous event at {previous_ms} ms")]
    OutOfOrder { at_ms: u64, previous_ms: u64 },

    #[error("Event at {at_ms} ms: {source}")]
    Resize {
        at_ms: u64,
        #[source]
        source: ResizeError,
    },
}

/// A recorded pointer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerTrace {
    /// Commit panel container; `null` when it is not laid out.
    #[serde(default)]
    pub container: Option<Rect>,

    /// Sizes stored before the trace starts; defaults when omitted.
    #[serde(default)]
    pub initial: Option<PanelSizes>,

    pub events: Vec<TraceEvent>,
}

/// One timestamped pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TraceEvent {
    Down { at_ms: u64, panel: Panel },
    Move { at_ms: u64, x: f64, y: f64 },
    Frame { at_ms: u64 },
    Up { at_ms: u64 },
}

impl TraceEvent {
    pub fn at_ms(&self) -> u64 {
        match *self {
            Self::Down { at_ms, .. }
            | Self::Move { at_ms, .. }
            | Self::Frame { at_ms }
            | Self::Up { at_ms } => at_ms,
        }
    }
}

impl PointerTrace {
    /// Load a trace from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(json).map_err(ReplayError::Parse)
    }
}

/// A mutation applied during replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedUpdate {
    pub at_ms: u64,
    pub panel: Panel,
    pub sizes: PanelSizes,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub applied: Vec<AppliedUpdate>,
    /// Samples that were due immediately but could not be applied.
    pub skipped: usize,
    /// Samples received while no drag was active.
    pub ignored: usize,
    pub final_sizes: PanelSizes,
}

/// Replay `trace` against a fresh in-memory model.
pub fn replay(trace: &PointerTrace, config: &LayoutConfig) -> Result<ReplayReport, ReplayError> {
    let store = match trace.initial {
        Some(initial) => {
            let value = serde_json::to_value(initial).map_err(ReplayError::Serialize)?;
            MemoryStore::with_entry(&config.storage_key, value)
        }
        None => MemoryStore::new(),
    };
    let sizes = SharedSizes::new(PanelSizeModel::load(
        Box::new(store),
        config.storage_key.clone(),
    ));
    let mut controller = ResizeController::new(sizes.clone(), config.throttle_interval());

    let base = Instant::now();
    let mut previous_ms = 0;
    let mut report = ReplayReport {
        applied: Vec::new(),
        skipped: 0,
        ignored: 0,
        final_sizes: sizes.get(),
    };

    for event in &trace.events {
        let at_ms = event.at_ms();
        if at_ms < previous_ms {
            return Err(ReplayError::OutOfOrder { at_ms, previous_ms });
        }
        previous_ms = at_ms;

        let now = base + Duration::from_millis(at_ms);
        let active = match controller.state() {
            DragState::Dragging(panel) => Some(panel),
            DragState::Idle => None,
        };
        trace!(?event, "Replaying event");

        let applied = match *event {
            TraceEvent::Down { panel, .. } => {
                controller
                    .start(panel, now)
                    .map_err(|source| ReplayError::Resize { at_ms, source })?;
                None
            }
            TraceEvent::Move { x, y, .. } => {
                match controller.pointer_move(Point::new(x, y), now, &trace.container) {
                    MoveOutcome::Applied(sizes) => Some(sizes),
                    MoveOutcome::Skipped => {
                        report.skipped += 1;
                        None
                    }
                    MoveOutcome::Ignored => {
                        report.ignored += 1;
                        None
                    }
                    MoveOutcome::Scheduled(_) | MoveOutcome::Coalesced => None,
                }
            }
            TraceEvent::Frame { .. } => controller.on_frame(now, &trace.container),
            TraceEvent::Up { .. } => {
                controller.stop();
                None
            }
        };

        if let (Some(sizes), Some(panel)) = (applied, active) {
            report.applied.push(AppliedUpdate {
                at_ms,
                panel,
                sizes,
            });
        }
    }

    controller.stop();
    report.final_sizes = sizes.get();
    debug!(
        events = trace.events.len(),
        applied = report.applied.len(),
        "Replay finished"
    );
    Ok(report)
}
