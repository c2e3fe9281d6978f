//! Logging facilities for pager-dots.
//!
//! pager-dots uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("pager_dots=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "pager_dots_core::signal";
    /// Indicator controller (bind, unbind, page events).
    pub const CONTROLLER: &str = "pager_dots::controller";
    /// Static and moving marker layout passes.
    pub const LAYOUT: &str = "pager_dots::layout";
    /// Configuration loading and setters.
    pub const CONFIG: &str = "pager_dots::config";
    /// Frame painting.
    pub const PAINT: &str = "pager_dots_render::paint";
}

/// Span names used throughout pager-dots for tracing.
pub mod span_names {
    /// One full layout pass (static + moving marker).
    pub const LAYOUT_PASS: &str = "pager_dots::layout_pass";
    /// Replaying a frame through a painter.
    pub const PAINT_FRAME: &str = "pager_dots::paint_frame";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "pager_dots::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();

        let _span = PerfSpan::new(span_names::LAYOUT_PASS);
        tracing::debug!(target: targets::LAYOUT, "inside span");
    }
}
