//! Compositing rules for indicator painting.
//!
//! Every blend mode here is a Porter–Duff operator on premultiplied colors:
//!
//! ```text
//! result = src * src_factor + dst * dst_factor
//! ```
//!
//! The factors mirror the hardware blend states a GPU backend would program,
//! so a CPU painter and a GPU painter agree pixel for pixel.

use crate::types::Color;

/// Blend mode for compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Normal (source-over) blending.
    #[default]
    Normal,
    /// Source (replace destination completely).
    Source,
    /// Source atop: source over destination, only where destination exists.
    SourceAtop,
}

/// A multiplier applied to one side of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// `0`
    Zero,
    /// `1`
    One,
    /// Destination alpha.
    DstAlpha,
    /// `1 - source alpha`
    OneMinusSrcAlpha,
}

impl BlendFactor {
    /// Evaluate the factor for a given pair of alphas.
    #[inline]
    pub fn resolve(self, src_alpha: f32, dst_alpha: f32) -> f32 {
        match self {
            BlendFactor::Zero => 0.0,
            BlendFactor::One => 1.0,
            BlendFactor::DstAlpha => dst_alpha,
            BlendFactor::OneMinusSrcAlpha => 1.0 - src_alpha,
        }
    }
}

impl BlendMode {
    /// The `(src_factor, dst_factor)` pair of this operator.
    pub fn factors(self) -> (BlendFactor, BlendFactor) {
        match self {
            // Normal: src + dst * (1 - src_alpha)
            BlendMode::Normal => (BlendFactor::One, BlendFactor::OneMinusSrcAlpha),
            // Source: replace destination
            BlendMode::Source => (BlendFactor::One, BlendFactor::Zero),
            // Source Atop: src * dst_alpha + dst * (1 - src_alpha)
            BlendMode::SourceAtop => (BlendFactor::DstAlpha, BlendFactor::OneMinusSrcAlpha),
        }
    }

    /// Composite a premultiplied source color onto a premultiplied destination.
    #[inline]
    pub fn composite(self, src: Color, dst: Color) -> Color {
        let (src_factor, dst_factor) = self.factors();
        let fs = src_factor.resolve(src.a, dst.a);
        let fd = dst_factor.resolve(src.a, dst.a);
        src * fs + dst * fd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_covers_destination() {
        assert_eq!(
            BlendMode::Normal.composite(Color::BLACK, Color::WHITE),
            Color::BLACK
        );
        assert_eq!(
            BlendMode::Normal.composite(Color::TRANSPARENT, Color::WHITE),
            Color::WHITE
        );
    }

    #[test]
    fn test_source_atop_needs_destination() {
        // Nothing underneath: source is discarded
        assert_eq!(
            BlendMode::SourceAtop.composite(Color::BLACK, Color::TRANSPARENT),
            Color::TRANSPARENT
        );
        // Opaque destination: source shows through
        assert_eq!(
            BlendMode::SourceAtop.composite(Color::BLACK, Color::WHITE),
            Color::BLACK
        );
    }

    #[test]
    fn test_source_replaces_destination() {
        let half = Color::from_rgba(0.0, 0.0, 1.0, 0.5);
        assert_eq!(BlendMode::Source.composite(half, Color::WHITE), half);
        assert_eq!(
            BlendMode::Source.composite(Color::BLACK, Color::TRANSPARENT),
            Color::BLACK
        );
    }
}
