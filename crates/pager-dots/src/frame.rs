//! Render-ready description of one indicator layout pass.

use pager_dots_core::logging::{span_names, targets};
use pager_dots_core::PerfSpan;
use pager_dots_render::{BlendMode, Color, DotPainter, Rect, Size};

use crate::geometry::{Marker, MovingMarker};

/// A static dot and the color to fill it with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPaint {
    pub marker: Marker,
    pub color: Color,
}

/// The moving dot, its color and how it is composited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingPaint {
    pub marker: MovingMarker,
    pub color: Color,
    pub blend: BlendMode,
}

/// Everything a renderer needs to draw the indicator once.
///
/// A frame is a snapshot: later events produce new frames and never mutate
/// one already handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Viewport the frame was laid out for.
    pub viewport: Size,
    /// Static dots, left to right.
    pub markers: Vec<MarkerPaint>,
    /// The moving dot, if there is one to show.
    pub moving: Option<MovingPaint>,
}

impl Frame {
    /// A frame that draws nothing.
    pub fn empty(viewport: Size) -> Self {
        Self {
            viewport,
            markers: Vec::new(),
            moving: None,
        }
    }

    /// Whether the frame draws nothing.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.moving.is_none()
    }

    /// Replay the frame through a painter.
    ///
    /// Everything is drawn into one isolated layer covering the viewport:
    /// static dots first with normal blending, then the moving dot with its
    /// own blend rule. Restoring the layer composites the result normally.
    pub fn paint<P: DotPainter + ?Sized>(&self, painter: &mut P) {
        let _span = PerfSpan::new(span_names::PAINT_FRAME);
        let bounds = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);

        painter.save_layer(bounds);
        painter.set_blend_mode(BlendMode::Normal);
        for dot in &self.markers {
            painter.fill_oval(dot.marker.rect(), dot.color);
        }
        if let Some(moving) = &self.moving {
            painter.set_blend_mode(moving.blend);
            painter.fill_oval(moving.marker.rect(), moving.color);
        }
        painter.restore();

        tracing::trace!(
            target: targets::PAINT,
            markers = self.markers.len(),
            moving = self.moving.is_some(),
            "frame painted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pager_dots_render::Point;

    #[derive(Debug, PartialEq)]
    enum Op {
        SaveLayer(Rect),
        Restore,
        Fill(Rect, Color, BlendMode),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
        blend: BlendMode,
        saved: Vec<BlendMode>,
    }

    impl DotPainter for Recorder {
        fn save_layer(&mut self, bounds: Rect) {
            self.saved.push(self.blend);
            self.ops.push(Op::SaveLayer(bounds));
        }

        fn restore(&mut self) {
            self.blend = self.saved.pop().unwrap_or_default();
            self.ops.push(Op::Restore);
        }

        fn set_blend_mode(&mut self, mode: BlendMode) {
            self.blend = mode;
        }

        fn blend_mode(&self) -> BlendMode {
            self.blend
        }

        fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color) {
            let rect = Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                radius_x * 2.0,
                radius_y * 2.0,
            );
            self.ops.push(Op::Fill(rect, color, self.blend));
        }
    }

    #[test]
    fn test_paint_order() {
        let dot = Marker::new(0.0, 0.0, 10.0, 10.0);
        let frame = Frame {
            viewport: Size::new(40.0, 10.0),
            markers: vec![
                MarkerPaint {
                    marker: dot,
                    color: Color::WHITE,
                },
                MarkerPaint {
                    marker: Marker { x: 20.0, ..dot },
                    color: Color::WHITE,
                },
            ],
            moving: Some(MovingPaint {
                marker: MovingMarker {
                    marker: Marker { x: 10.0, ..dot },
                    page: 0,
                    offset: 0.5,
                },
                color: Color::BLACK,
                blend: BlendMode::SourceAtop,
            }),
        };

        let mut recorder = Recorder::default();
        frame.paint(&mut recorder);

        assert_eq!(
            recorder.ops,
            vec![
                Op::SaveLayer(Rect::new(0.0, 0.0, 40.0, 10.0)),
                Op::Fill(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, BlendMode::Normal),
                Op::Fill(Rect::new(20.0, 0.0, 10.0, 10.0), Color::WHITE, BlendMode::Normal),
                Op::Fill(
                    Rect::new(10.0, 0.0, 10.0, 10.0),
                    Color::BLACK,
                    BlendMode::SourceAtop
                ),
                Op::Restore,
            ]
        );
        assert_eq!(recorder.blend_mode(), BlendMode::Normal);
    }

    #[test]
    fn test_empty_frame_paints_only_layer() {
        let frame = Frame::empty(Size::new(10.0, 10.0));
        assert!(frame.is_empty());

        let mut recorder = Recorder::default();
        frame.paint(&mut recorder);
        assert_eq!(
            recorder.ops,
            vec![Op::SaveLayer(Rect::new(0.0, 0.0, 10.0, 10.0)), Op::Restore]
        );
    }
}
