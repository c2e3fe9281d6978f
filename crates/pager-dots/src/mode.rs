//! Compositing policy of the moving dot.

use pager_dots_render::BlendMode;
use serde::{Deserialize, Serialize};

/// How the moving dot relates to the static dots it passes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorMode {
    /// Visible only inside static dots: it fills them from within.
    Inside,
    /// Painted over everything beneath it.
    Outside,
    /// The only selected dot; jumps between pages on selection.
    #[default]
    Solo,
}

impl IndicatorMode {
    /// The blend rule the renderer applies to the moving dot.
    pub fn blend_mode(self) -> BlendMode {
        match self {
            IndicatorMode::Inside => BlendMode::SourceAtop,
            IndicatorMode::Outside => BlendMode::Normal,
            IndicatorMode::Solo => BlendMode::Source,
        }
    }

    /// Whether continuous scroll events drive the moving dot.
    #[inline]
    pub fn follows_scroll(self) -> bool {
        !matches!(self, IndicatorMode::Solo)
    }

    /// Whether discrete page selections drive the moving dot.
    #[inline]
    pub fn follows_selection(self) -> bool {
        matches!(self, IndicatorMode::Solo)
    }

    /// The offset used for layout; Solo never interpolates.
    #[inline]
    pub fn effective_offset(self, offset: f32) -> f32 {
        match self {
            IndicatorMode::Solo => 0.0,
            IndicatorMode::Inside | IndicatorMode::Outside => offset,
        }
    }
}
