//! forky-layout: Headless resizable panel layout engine
//!
//! This crate owns the sizes of forky's three resizable panels, including:
//! - The bounded, persisted panel size model
//! - The key-value store contract and its memory/file implementations
//! - A frame-aligned coalescing update scheduler
//! - The drag state machine and per-panel geometry
//! - Engine configuration and pointer trace replay

pub mod config;
pub mod controller;
pub mod geometry;
pub mod model;
pub mod replay;
pub mod scheduler;
pub mod sizes;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, LayoutConfig};
pub use controller::{
    Affordances, ContainerProbe, CursorHint, DragState, MoveOutcome, ResizeController,
    ResizeError,
};
pub use geometry::{Point, Rect};
pub use model::{PanelSizeModel, SharedSizes, DEFAULT_STORAGE_KEY};
pub use replay::{replay, AppliedUpdate, PointerTrace, ReplayError, ReplayReport, TraceEvent};
pub use scheduler::{FrameTicket, Submission, UpdateScheduler, DEFAULT_THROTTLE_INTERVAL};
pub use sizes::{Bounds, Panel, PanelSizes, PanelSizesPatch, ResizeAxis};
pub use store::{JsonFileStore, MemoryStore, SizeStore, StoreError};

/// Returns the layout engine version.
pub fn layout_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
