//! Prelude module for pager-dots.
//!
//! ```
//! use pager_dots::prelude::*;
//! ```

// ============================================================================
// Indicator
// ============================================================================

pub use crate::{DotIndicator, Frame, IndicatorConfig, IndicatorMode};

// ============================================================================
// Page Sources
// ============================================================================

pub use crate::{PageEvent, PageSource, Pager, ScrollState};

// ============================================================================
// Geometry and Painting
// ============================================================================

pub use crate::render::{Color, DotPainter, PixelCanvas, Rect, Size};
pub use crate::Alignment;
