//! Value types describing where indicator dots go.

use pager_dots_render::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::mode::IndicatorMode;

/// Horizontal placement of the dot row inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Row starts at the left edge.
    #[serde(alias = "left")]
    Start,
    /// Row is centered.
    #[default]
    Center,
    /// Row ends at the right edge.
    #[serde(alias = "right")]
    End,
}

/// Layout parameters for one indicator row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Dot radius in pixels. Must be positive.
    pub radius: f32,
    /// Gap between neighbouring dots in pixels. Must be non-negative.
    pub margin: f32,
    /// Row alignment.
    pub alignment: Alignment,
    /// Compositing mode of the moving dot.
    pub mode: IndicatorMode,
}

impl LayoutParams {
    /// Dot diameter.
    #[inline]
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }

    /// Distance between the left edges of two neighbouring dots.
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.diameter() + self.margin
    }

    /// Total width of a row of `count` dots; no margin after the last one.
    #[inline]
    pub fn span_width(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        count as f32 * self.pitch() - self.margin
    }
}

/// Bounding box of one static dot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Marker {
    /// Create a marker from its bounding box.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The marker as a render rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Center of the dot.
    #[inline]
    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

impl From<Marker> for Rect {
    fn from(marker: Marker) -> Self {
        marker.rect()
    }
}

/// The dot that tracks the active page.
///
/// Always the size of the static marker at [`page`](Self::page); its `x` is
/// interpolated toward the next marker by [`offset`](Self::offset).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovingMarker {
    /// Interpolated bounding box.
    pub marker: Marker,
    /// Page the marker is anchored to.
    pub page: usize,
    /// Fractional progress toward `page + 1`, in `[0, 1)`.
    pub offset: f32,
}

impl MovingMarker {
    /// The moving marker as a render rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.marker.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: f32, margin: f32) -> LayoutParams {
        LayoutParams {
            radius,
            margin,
            alignment: Alignment::Center,
            mode: IndicatorMode::Inside,
        }
    }

    #[test]
    fn test_pitch_and_span() {
        let p = params(10.0, 40.0);
        assert_eq!(p.diameter(), 20.0);
        assert_eq!(p.pitch(), 60.0);
        assert_eq!(p.span_width(3), 140.0);
        assert_eq!(p.span_width(1), 20.0);
        assert_eq!(p.span_width(0), 0.0);
    }

    #[test]
    fn test_marker_rect() {
        let m = Marker::new(80.0, 15.0, 20.0, 20.0);
        assert_eq!(Rect::from(m), Rect::new(80.0, 15.0, 20.0, 20.0));
        assert_eq!(m.center(), Point::new(90.0, 25.0));
    }
}
