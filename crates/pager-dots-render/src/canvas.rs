//! CPU reference painter.
//!
//! [`PixelCanvas`] rasterizes filled ellipses into an in-memory buffer of
//! premultiplied colors, sampling each pixel at its center. It is small and
//! exact rather than fast, which makes it the reference for how the blend
//! modes are meant to look and a convenient painter for headless hosts.
//!
//! # Example
//!
//! ```
//! use pager_dots_render::{BlendMode, Color, DotPainter, PixelCanvas, Point, Rect};
//!
//! let mut canvas = PixelCanvas::new(20, 20).unwrap();
//! canvas.save_layer(Rect::new(0.0, 0.0, 20.0, 20.0));
//! canvas.fill_ellipse(Point::new(10.0, 10.0), 5.0, 5.0, Color::WHITE);
//! canvas.set_blend_mode(BlendMode::SourceAtop);
//! canvas.fill_ellipse(Point::new(14.0, 10.0), 5.0, 5.0, Color::BLACK);
//! canvas.restore();
//!
//! // Outside the white dot nothing was painted.
//! assert_eq!(canvas.pixel(18, 10), Some(Color::TRANSPARENT));
//! ```

use crate::error::{RenderError, RenderResult};
use crate::paint::BlendMode;
use crate::painter::{DotPainter, PainterStateStack};
use crate::types::{Color, Point, Rect};

const PAINT_TARGET: &str = "pager_dots_render::paint";

/// Number of pixels in a `width` x `height` buffer, computed in `usize`.
#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major offset of pixel `(x, y)`, computed in `usize`.
#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// An in-memory RGBA canvas with layer support.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    /// Pixel layers; index 0 is the base layer.
    layers: Vec<Vec<Color>>,
    state: PainterStateStack,
}

impl PixelCanvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            layers: vec![vec![Color::TRANSPARENT; pixel_count(width, height)]],
            state: PainterStateStack::new(),
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the base layer with a color.
    pub fn clear(&mut self, color: Color) {
        self.layers[0].fill(color);
    }

    /// Read a pixel from the base layer.
    ///
    /// Layers still open via [`save_layer`](DotPainter::save_layer) are not
    /// visible until restored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.layers[0][self.index(x, y)])
    }

    /// Raw bytes of the base layer (premultiplied `f32` RGBA).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.layers[0])
    }

    /// Number of open layers above the base.
    pub fn layer_depth(&self) -> usize {
        self.layers.len() - 1
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        pixel_index(self.width, x, y)
    }

    /// Pixel range `[min, max)` covered by `rect`, clamped to the canvas.
    fn pixel_span(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let clamp_x = |v: f32| v.clamp(0.0, self.width as f32) as u32;
        let clamp_y = |v: f32| v.clamp(0.0, self.height as f32) as u32;
        (
            clamp_x(rect.left().floor()),
            clamp_y(rect.top().floor()),
            clamp_x(rect.right().ceil()),
            clamp_y(rect.bottom().ceil()),
        )
    }
}

impl DotPainter for PixelCanvas {
    fn save_layer(&mut self, bounds: Rect) {
        self.state.save_clipped(bounds);
        self.layers
            .push(vec![Color::TRANSPARENT; pixel_count(self.width, self.height)]);
    }

    fn restore(&mut self) {
        if self.layers.len() < 2 {
            tracing::warn!(target: PAINT_TARGET, "restore without matching save_layer");
            return;
        }
        let clip = self.state.current().clip;
        let Some(layer) = self.layers.pop() else {
            return;
        };
        self.state.restore();
        let Some(below) = self.layers.last_mut() else {
            return;
        };
        for (dst, src) in below.iter_mut().zip(layer) {
            *dst = BlendMode::Normal.composite(src, *dst);
        }
        tracing::trace!(target: PAINT_TARGET, ?clip, "layer restored");
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.state.current_mut().blend_mode = mode;
    }

    fn blend_mode(&self) -> BlendMode {
        self.state.current().blend_mode
    }

    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color) {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return;
        }
        let bounds = Rect::new(
            center.x - radius_x,
            center.y - radius_y,
            radius_x * 2.0,
            radius_y * 2.0,
        );
        let clip = self.state.current().clip;
        let area = match clip {
            Some(clip) => match bounds.intersect(&clip) {
                Some(area) => area,
                None => return,
            },
            None => bounds,
        };

        let (x0, y0, x1, y1) = self.pixel_span(area);
        let blend = self.state.current().blend_mode;
        let c = center.to_vec2();
        let r = glam::Vec2::new(radius_x, radius_y);
        let width = self.width;
        let Some(layer) = self.layers.last_mut() else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let sample = glam::Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if clip.is_some_and(|clip| !clip.contains(Point::from(sample))) {
                    continue;
                }
                if ((sample - c) / r).length_squared() > 1.0 {
                    continue;
                }
                let dst = &mut layer[pixel_index(width, x, y)];
                *dst = blend.composite(color, *dst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_math_does_not_overflow_u32() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(
            pixel_index(u32::MAX, 1, 2),
            2 * u32::MAX as usize + 1
        );
        assert_eq!(pixel_index(300, 180, 25), 25 * 300 + 180);
    }

    #[test]
    fn test_zero_sized_canvas_is_rejected() {
        assert_eq!(
            PixelCanvas::new(0, 10).unwrap_err(),
            RenderError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_fill_circle_on_base_layer() {
        let mut canvas = PixelCanvas::new(10, 10).unwrap();
        canvas.fill_ellipse(Point::new(5.0, 5.0), 3.0, 3.0, Color::RED);
        assert_eq!(canvas.pixel(5, 5), Some(Color::RED));
        assert_eq!(canvas.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(10, 0), None);
    }

    #[test]
    fn test_layer_is_invisible_until_restored() {
        let mut canvas = PixelCanvas::new(10, 10).unwrap();
        canvas.save_layer(Rect::new(0.0, 0.0, 10.0, 10.0));
        canvas.fill_oval(Rect::new(2.0, 2.0, 6.0, 6.0), Color::BLUE);
        assert_eq!(canvas.layer_depth(), 1);
        assert_eq!(canvas.pixel(5, 5), Some(Color::TRANSPARENT));

        canvas.restore();
        assert_eq!(canvas.layer_depth(), 0);
        assert_eq!(canvas.pixel(5, 5), Some(Color::BLUE));
    }

    #[test]
    fn test_layer_clips_to_bounds() {
        let mut canvas = PixelCanvas::new(10, 10).unwrap();
        canvas.save_layer(Rect::new(0.0, 0.0, 5.0, 10.0));
        canvas.fill_oval(Rect::new(0.0, 0.0, 10.0, 10.0), Color::GREEN);
        canvas.restore();
        assert_eq!(canvas.pixel(3, 5), Some(Color::GREEN));
        assert_eq!(canvas.pixel(7, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_blend_mode_restored_with_layer() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.save_layer(Rect::new(0.0, 0.0, 4.0, 4.0));
        canvas.set_blend_mode(BlendMode::Source);
        canvas.restore();
        assert_eq!(canvas.blend_mode(), BlendMode::Normal);
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut canvas = PixelCanvas::new(4, 4).unwrap();
        canvas.clear(Color::WHITE);
        canvas.restore();
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.as_bytes().len(), 4 * 4 * 16);
    }
}
