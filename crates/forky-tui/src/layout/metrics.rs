//! Conversion between terminal cells and the pixel space the layout engine
//! works in.

use forky_layout::{Point, Rect as PxRect};
use ratatui::layout::Rect;

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width_px: f64,
    pub height_px: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: 8.0,
            height_px: 16.0,
        }
    }
}

impl CellMetrics {
    /// Parse `WxH`, e.g. `8x16`. Both sides must be positive.
    pub fn parse(spec: &str) -> Option<Self> {
        let (w, h) = spec.trim().split_once(['x', 'X'])?;
        let width_px: f64 = w.trim().parse().ok()?;
        let height_px: f64 = h.trim().parse().ok()?;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(width_px) && valid(height_px)).then_some(Self {
            width_px,
            height_px,
        })
    }

    /// Pointer position of the top-left corner of a cell.
    pub fn point(&self, column: u16, row: u16) -> Point {
        Point::new(
            f64::from(column) * self.width_px,
            f64::from(row) * self.height_px,
        )
    }

    /// Pixel rectangle covered by `area`.
    pub fn rect(&self, area: Rect) -> PxRect {
        PxRect::new(
            f64::from(area.x) * self.width_px,
            f64::from(area.y) * self.height_px,
            f64::from(area.width) * self.width_px,
            f64::from(area.height) * self.height_px,
        )
    }

    /// Number of columns closest to `px` pixels.
    pub fn columns_for(&self, px: f64) -> u16 {
        to_cells(px / self.width_px)
    }
}

/// Round a non-negative cell count into `u16`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_cells(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            CellMetrics::parse("10x20"),
            Some(CellMetrics {
                width_px: 10.0,
                height_px: 20.0
            })
        );
        let padded = CellMetrics::parse(" 7.5X15 ");
        assert_eq!(padded.map(|m| m.width_px), Some(7.5));
        assert_eq!(CellMetrics::parse("8"), None);
        assert_eq!(CellMetrics::parse("0x16"), None);
        assert_eq!(CellMetrics::parse("axb"), None);
    }

    #[test]
    fn test_point_and_rect() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.point(40, 2), Point::new(320.0, 32.0));
        assert_eq!(
            metrics.rect(Rect::new(10, 1, 20, 5)),
            PxRect::new(80.0, 16.0, 160.0, 80.0)
        );
    }

    #[test]
    fn test_columns_for_rounds() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.columns_for(260.0), 33);
        assert_eq!(metrics.columns_for(300.0), 38);
        assert_eq!(metrics.columns_for(180.0), 23);
        assert_eq!(to_cells(-4.0), 0);
        assert_eq!(to_cells(f64::NAN), 0);
    }
}
