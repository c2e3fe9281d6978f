//! pager-dots - a page indicator for paginated views.
//!
//! The indicator draws one dot per page plus a *moving* dot that follows the
//! current page. It is split into layers that can be used on their own:
//!
//! - [`layout`]: pure functions placing the static dots and the moving dot
//! - [`IndicatorState`]: the state machine turning page events into [`Frame`]s
//! - [`DotIndicator`]: binds a state machine to a [`PageSource`]
//! - [`Frame::paint`]: replays a frame through any [`render::DotPainter`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pager_dots::render::{Color, PixelCanvas};
//! use pager_dots::{DotIndicator, IndicatorConfig, IndicatorMode, Pager};
//!
//! let pager = Arc::new(Pager::new(3));
//! let mut indicator =
//!     DotIndicator::new(IndicatorConfig::default().with_mode(IndicatorMode::Outside))?;
//! indicator.bind(pager.clone());
//! indicator.resize(300.0, 50.0);
//! pager.scroll(1, 0.5);
//!
//! let mut canvas = PixelCanvas::new(300, 50)?;
//! indicator.frame().unwrap().paint(&mut canvas);
//!
//! // The moving dot sits halfway between the second and third dots.
//! assert_eq!(canvas.pixel(180, 25), Some(Color::BLACK));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use pager_dots_core::*;

/// Drawing primitives.
pub mod render {
    pub use pager_dots_render::*;
}

mod config;
mod controller;
mod error;
mod frame;
mod geometry;
pub mod layout;
mod mode;
mod page_source;
mod pager;
pub mod prelude;
mod state;

pub use config::{defaults, IndicatorConfig};
pub use controller::DotIndicator;
pub use error::{IndicatorError, Result};
pub use frame::{Frame, MarkerPaint, MovingPaint};
pub use geometry::{Alignment, LayoutParams, Marker, MovingMarker};
pub use mode::IndicatorMode;
pub use page_source::{PageEvent, PageSource, ScrollState, Subscription};
pub use pager::Pager;
pub use state::{IndicatorEvent, IndicatorState, Phase};
