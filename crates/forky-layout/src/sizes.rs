//! Panel size types and their bounds.
//!
//! [`PanelSizes`] is the record the rest of the workspace reads and persists.
//! Every constructor and merge path clamps into the per-field [`Bounds`], so a
//! value of this type is always displayable as-is.

use serde::{Deserialize, Serialize};

/// Closed range plus default for one panel dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Bounds {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Constrain `value` to `[min, max]`.
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Check whether `value` lies inside the range.
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Sidebar width in pixels.
pub const SIDEBAR_WIDTH: Bounds = Bounds::new(180.0, 500.0, 260.0);
/// Commit panel height as a percentage of its container.
pub const COMMIT_PANEL_HEIGHT: Bounds = Bounds::new(20.0, 80.0, 50.0);
/// Diff sidebar width in pixels.
pub const DIFF_SIDEBAR_WIDTH: Bounds = Bounds::new(200.0, 600.0, 300.0);

/// One of the three independently resizable regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Panel {
    Sidebar,
    CommitPanel,
    DiffSidebar,
}

/// Direction a resize handle moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAxis {
    /// Handle moves left/right (column resize).
    Columns,
    /// Handle moves up/down (row resize).
    Rows,
}

impl Panel {
    /// All panels, in on-screen order.
    pub const ALL: [Self; 3] = [Self::Sidebar, Self::CommitPanel, Self::DiffSidebar];

    /// The axis this panel's handle drags along.
    pub fn axis(self) -> ResizeAxis {
        match self {
            Self::CommitPanel => ResizeAxis::Rows,
            Self::Sidebar | Self::DiffSidebar => ResizeAxis::Columns,
        }
    }

    /// Bounds for the dimension this panel controls.
    pub fn bounds(self) -> Bounds {
        match self {
            Self::Sidebar => SIDEBAR_WIDTH,
            Self::CommitPanel => COMMIT_PANEL_HEIGHT,
            Self::DiffSidebar => DIFF_SIDEBAR_WIDTH,
        }
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sidebar => write!(f, "sidebar"),
            Self::CommitPanel => write!(f, "commit panel"),
            Self::DiffSidebar => write!(f, "diff sidebar"),
        }
    }
}

/// Current size of every panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSizes {
    /// Sidebar width (px).
    pub sidebar_width: f64,
    /// Commit panel height (percent of container).
    pub commit_panel_height: f64,
    /// Diff sidebar width (px).
    pub diff_sidebar_width: f64,
}

impl Default for PanelSizes {
    fn default() -> Self {
        Self {
            sidebar_width: SIDEBAR_WIDTH.default,
            commit_panel_height: COMMIT_PANEL_HEIGHT.default,
            diff_sidebar_width: DIFF_SIDEBAR_WIDTH.default,
        }
    }
}

impl PanelSizes {
    /// Merge `patch` into a copy of `self` and clamp the result.
    ///
    /// Non-finite patch values are dropped, keeping the current value.
    #[must_use]
    pub fn merge(self, patch: PanelSizesPatch) -> Self {
        let pick = |value: Option<f64>, current: f64| {
            value.filter(|v| v.is_finite()).unwrap_or(current)
        };
        Self {
            sidebar_width: pick(patch.sidebar_width, self.sidebar_width),
            commit_panel_height: pick(patch.commit_panel_height, self.commit_panel_height),
            diff_sidebar_width: pick(patch.diff_sidebar_width, self.diff_sidebar_width),
        }
        .clamped()
    }

    /// Clamp every field into its bounds.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            sidebar_width: SIDEBAR_WIDTH.clamp(self.sidebar_width),
            commit_panel_height: COMMIT_PANEL_HEIGHT.clamp(self.commit_panel_height),
            diff_sidebar_width: DIFF_SIDEBAR_WIDTH.clamp(self.diff_sidebar_width),
        }
    }

    /// The dimension controlled by `panel`.
    pub fn get(&self, panel: Panel) -> f64 {
        match panel {
            Panel::Sidebar => self.sidebar_width,
            Panel::CommitPanel => self.commit_panel_height,
            Panel::DiffSidebar => self.diff_sidebar_width,
        }
    }

    /// True when every field is inside its bounds.
    pub fn is_within_bounds(&self) -> bool {
        Panel::ALL
            .iter()
            .all(|panel| panel.bounds().contains(self.get(*panel)))
    }
}

/// Partial update for [`PanelSizes`]; absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSizesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_panel_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_sidebar_width: Option<f64>,
}

impl PanelSizesPatch {
    /// Patch touching only the dimension `panel` controls.
    pub fn for_panel(panel: Panel, value: f64) -> Self {
        let mut patch = Self::default();
        match panel {
            Panel::Sidebar => patch.sidebar_width = Some(value),
            Panel::CommitPanel => patch.commit_panel_height = Some(value),
            Panel::DiffSidebar => patch.diff_sidebar_width = Some(value),
        }
        patch
    }

    /// Patch that sets every field.
    pub fn full(sizes: PanelSizes) -> Self {
        Self {
            sidebar_width: Some(sizes.sidebar_width),
            commit_panel_height: Some(sizes.commit_panel_height),
            diff_sidebar_width: Some(sizes.diff_sidebar_width),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.sidebar_width.is_none()
            && self.commit_panel_height.is_none()
            && self.diff_sidebar_width.is_none()
    }

    /// True when at least one field would survive a merge.
    pub fn has_finite_value(&self) -> bool {
        [
            self.sidebar_width,
            self.commit_panel_height,
            self.diff_sidebar_width,
        ]
        .into_iter()
        .flatten()
        .any(f64::is_finite)
    }
}
