//! Rendering primitives for pager-dots.
//!
//! This crate holds everything an indicator frame needs to be drawn, and
//! nothing about pagination:
//!
//! - Geometry and color value types ([`Point`], [`Size`], [`Rect`], [`Color`])
//! - Porter–Duff compositing ([`BlendMode`])
//! - The [`DotPainter`] seam a backend implements to replay frames
//! - [`PixelCanvas`], a CPU reference painter
//!
//! # Using the Canvas
//!
//! ```
//! use pager_dots_render::{Color, DotPainter, PixelCanvas, Rect};
//!
//! let mut canvas = PixelCanvas::new(40, 20)?;
//! canvas.fill_oval(Rect::new(0.0, 0.0, 20.0, 20.0), Color::WHITE);
//! assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
//! # Ok::<(), pager_dots_render::RenderError>(())
//! ```

mod canvas;
mod error;
mod paint;
mod painter;
mod types;

pub use canvas::PixelCanvas;
pub use error::{RenderError, RenderResult};
pub use paint::{BlendFactor, BlendMode};
pub use painter::{DotPainter, PainterState, PainterStateStack};
pub use types::{Color, Point, Rect, Size};
