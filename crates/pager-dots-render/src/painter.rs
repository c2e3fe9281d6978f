//! The drawing seam between indicator frames and a concrete backend.
//!
//! Indicator frames only ever need three things from a backend: an isolated
//! compositing layer, a current blend mode, and filled ellipses. Any renderer
//! that can do those implements [`DotPainter`] and can replay a frame.

use crate::paint::BlendMode;
use crate::types::{Color, Point, Rect};

/// Minimal painting interface used to replay indicator frames.
///
/// # State Stack
///
/// [`save_layer`](Self::save_layer) pushes both a fresh transparent layer and
/// the current painter state; [`restore`](Self::restore) composites the layer
/// back with [`BlendMode::Normal`] and pops the state.
pub trait DotPainter {
    /// Begin an isolated, transparent layer clipped to `bounds`.
    fn save_layer(&mut self, bounds: Rect);

    /// Composite the current layer onto the one beneath and restore state.
    fn restore(&mut self);

    /// Set the blend mode used by subsequent fills.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Get the current blend mode.
    fn blend_mode(&self) -> BlendMode;

    /// Fill an ellipse.
    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color);

    /// Fill the ellipse inscribed in `bounds`.
    #[inline]
    fn fill_oval(&mut self, bounds: Rect, color: Color) {
        self.fill_ellipse(
            bounds.center(),
            bounds.width() / 2.0,
            bounds.height() / 2.0,
            color,
        );
    }
}

/// Saved painter state for save/restore operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PainterState {
    /// Blend mode at this state.
    pub blend_mode: BlendMode,
    /// Clip bounds at this state (`None` for unclipped).
    pub clip: Option<Rect>,
}

impl Default for PainterState {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Normal,
            clip: None,
        }
    }
}

/// Common state management for painters.
///
/// Reusable save/restore bookkeeping that painter implementations can embed.
#[derive(Debug, Clone, Default)]
pub struct PainterStateStack {
    /// Stack of saved states.
    stack: Vec<PainterState>,
    /// Current state.
    current: PainterState,
}

impl PainterStateStack {
    /// Create a new state stack with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn current(&self) -> &PainterState {
        &self.current
    }

    /// Get mutable access to the current state.
    #[inline]
    pub fn current_mut(&mut self) -> &mut PainterState {
        &mut self.current
    }

    /// Save the current state, then narrow the clip to `clip`.
    pub fn save_clipped(&mut self, clip: Rect) {
        self.stack.push(self.current);
        self.current.clip = Some(match self.current.clip {
            Some(existing) => existing.intersect(&clip).unwrap_or(Rect::ZERO),
            None => clip,
        });
    }

    /// Restore the previously saved state.
    ///
    /// Returns `false` if there was nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.stack.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_stack_default() {
        let stack = PainterStateStack::new();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current().blend_mode, BlendMode::Normal);
        assert!(stack.current().clip.is_none());
    }

    #[test]
    fn test_state_stack_save_restore() {
        let mut stack = PainterStateStack::new();
        stack.save_clipped(Rect::new(0.0, 0.0, 50.0, 50.0));
        stack.current_mut().blend_mode = BlendMode::SourceAtop;
        assert_eq!(stack.depth(), 1);

        assert!(stack.restore());
        assert_eq!(stack.current().blend_mode, BlendMode::Normal);
        assert!(stack.current().clip.is_none());
        assert!(!stack.restore());
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut stack = PainterStateStack::new();
        stack.save_clipped(Rect::new(0.0, 0.0, 100.0, 100.0));
        stack.save_clipped(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(
            stack.current().clip,
            Some(Rect::new(50.0, 50.0, 50.0, 50.0))
        );
    }
}
