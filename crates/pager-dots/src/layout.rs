//! Layout engine: static dot positions and the interpolated moving dot.
//!
//! All functions here are pure. Clamping of host input happens in
//! [`clamp_page`] and [`clamp_offset`], which the controller applies before
//! calling [`layout_moving`].

use pager_dots_core::logging::targets;
use pager_dots_render::Size;

use crate::geometry::{Alignment, LayoutParams, Marker, MovingMarker};

/// Largest offset below `1.0`.
pub const MAX_OFFSET: f32 = 1.0 - f32::EPSILON / 2.0;

/// X coordinate of the first dot.
///
/// Rows wider than the viewport start at `0` for every alignment, so the
/// leading dots are never pushed off the left edge.
pub fn start_x(viewport_width: f32, count: usize, params: &LayoutParams) -> f32 {
    let span = params.span_width(count);
    match params.alignment {
        Alignment::Start => 0.0,
        _ if span > viewport_width => 0.0,
        Alignment::Center => (viewport_width - span) / 2.0,
        Alignment::End => viewport_width - span,
    }
}

/// Lay out `count` static dots in a single, vertically centered row.
pub fn layout_static(viewport: Size, count: usize, params: &LayoutParams) -> Vec<Marker> {
    let diameter = params.diameter();
    let pitch = params.pitch();
    let x0 = start_x(viewport.width, count, params);
    let y = viewport.height / 2.0 - params.radius;

    (0..count)
        .map(|i| Marker::new(x0 + i as f32 * pitch, y, diameter, diameter))
        .collect()
}

/// Position the moving dot for `page` and `offset`.
///
/// The result has the size of `markers[page]` and slides linearly toward the
/// next dot as `offset` goes from `0` to `1`; at `offset == 0` it overlaps
/// `markers[page]` exactly. Returns `None` when there are no markers.
///
/// `page` must already be a valid index (see [`clamp_page`]).
pub fn layout_moving(
    markers: &[Marker],
    page: usize,
    offset: f32,
    params: &LayoutParams,
) -> Option<MovingMarker> {
    if markers.is_empty() {
        return None;
    }
    debug_assert!(
        page < markers.len(),
        "page {page} out of range for {} markers",
        markers.len()
    );
    let base = markers.get(page)?;
    let marker = Marker {
        x: base.x + params.pitch() * offset,
        ..*base
    };
    Some(MovingMarker {
        marker,
        page,
        offset,
    })
}

/// Clamp a host page position into `[0, count - 1]`.
///
/// Returns `None` when there are no pages.
pub fn clamp_page(position: i32, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    let clamped = usize::try_from(position.max(0)).unwrap_or(0).min(last);
    if position < 0 || clamped as i64 != i64::from(position) {
        tracing::warn!(
            target: targets::CONTROLLER,
            position,
            count,
            clamped,
            "page position out of range, clamped"
        );
    }
    Some(clamped)
}

/// Clamp a host scroll offset into `[0, 1)`. NaN becomes `0`.
pub fn clamp_offset(offset: f32) -> f32 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, MAX_OFFSET)
}
