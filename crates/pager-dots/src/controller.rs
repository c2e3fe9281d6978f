//! The dot indicator controller.
//!
//! [`DotIndicator`] owns an [`IndicatorState`], subscribes it to a
//! [`PageSource`] and publishes a [`Frame`] on `frame_ready` after every
//! event that changes the drawing.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use pager_dots_core::logging::targets;
use pager_dots_core::Signal;
use pager_dots_render::Color;

use crate::config::IndicatorConfig;
use crate::error::{IndicatorError, Result};
use crate::frame::Frame;
use crate::geometry::Alignment;
use crate::mode::IndicatorMode;
use crate::page_source::{PageEvent, PageSource, ScrollState, Subscription};
use crate::state::{IndicatorEvent, IndicatorState};

struct Inner {
    state: IndicatorState,
    /// Bumped on every bind and unbind; events tagged with an older value
    /// are dropped.
    generation: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    frame_ready: Signal<Frame>,
}

impl Shared {
    /// Apply an event and publish the resulting frame.
    ///
    /// The lock is released before emitting so slots may call back into the
    /// indicator.
    fn dispatch(&self, generation: Option<u64>, event: IndicatorEvent) {
        let frame = {
            let mut inner = self.inner.lock();
            if let Some(generation) = generation {
                if generation != inner.generation {
                    tracing::trace!(
                        target: targets::CONTROLLER,
                        ?event,
                        generation,
                        current = inner.generation,
                        "stale page event dropped"
                    );
                    return;
                }
            }
            inner.state.apply(event)
        };
        if let Some(frame) = frame {
            self.frame_ready.emit(frame);
        }
    }

    fn publish(&self, frame: Option<Frame>) {
        if let Some(frame) = frame {
            self.frame_ready.emit(frame);
        }
    }
}

/// A page indicator that follows a paginated view.
///
/// The indicator draws one static dot per page and a moving dot that tracks
/// the current page. In [`IndicatorMode::Inside`] and
/// [`IndicatorMode::Outside`] the moving dot slides continuously with scroll
/// events; in [`IndicatorMode::Solo`] it jumps on page selection.
///
/// Configuration setters change how the next layout pass looks but never
/// trigger one themselves. Call [`request_layout`](Self::request_layout) to
/// apply them immediately.
///
/// # Signals
///
/// - `frame_ready(Frame)`: Emitted after every event that changes the drawing
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pager_dots::{DotIndicator, IndicatorConfig, IndicatorMode, Pager};
///
/// let pager = Arc::new(Pager::new(3));
/// let mut indicator =
///     DotIndicator::new(IndicatorConfig::default().with_mode(IndicatorMode::Inside))?;
///
/// indicator.frame_ready().connect(|frame| {
///     println!("{} dots", frame.markers.len());
/// });
///
/// indicator.resize(300.0, 50.0);
/// indicator.bind(pager.clone());
///
/// let frame = indicator.frame().unwrap();
/// let xs: Vec<f32> = frame.markers.iter().map(|m| m.marker.x).collect();
/// assert_eq!(xs, [80.0, 140.0, 200.0]);
/// # Ok::<(), pager_dots::IndicatorError>(())
/// ```
pub struct DotIndicator {
    shared: Arc<Shared>,
    subscription: Option<Subscription>,
}

impl DotIndicator {
    /// Create an unbound indicator.
    ///
    /// Fails if `config` does not pass [`IndicatorConfig::validate`].
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        let state = IndicatorState::new(config)?;
        Ok(Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    generation: 0,
                }),
                frame_ready: Signal::new(),
            }),
            subscription: None,
        })
    }

    /// Signal emitted with every new frame.
    pub fn frame_ready(&self) -> &Signal<Frame> {
        &self.shared.frame_ready
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Attach to `source`, replacing any previous binding.
    ///
    /// The previous subscription is disconnected before the new one is made,
    /// so binding the same source twice leaves exactly one connection and
    /// the same state as binding it once.
    pub fn bind(&mut self, source: Arc<dyn PageSource>) {
        self.disconnect();

        let count = source.page_count();
        let (generation, frame) = {
            let mut inner = self.shared.inner.lock();
            inner.generation += 1;
            let frame = inner.state.apply(IndicatorEvent::Bind { count });
            (inner.generation, frame)
        };

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        self.subscription = Some(Subscription::new(source, move |event: &PageEvent| {
            if let Some(shared) = weak.upgrade() {
                shared.dispatch(Some(generation), IndicatorEvent::Page(*event));
            }
        }));
        tracing::debug!(target: targets::CONTROLLER, count, generation, "bound to page source");

        self.shared.publish(frame);
    }

    /// Detach from the current page source and clear all state.
    ///
    /// Does nothing when unbound.
    pub fn unbind(&mut self) {
        if !self.disconnect() {
            return;
        }
        let frame = {
            let mut inner = self.shared.inner.lock();
            inner.generation += 1;
            inner.state.apply(IndicatorEvent::Unbind)
        };
        tracing::debug!(target: targets::CONTROLLER, "unbound from page source");
        self.shared.publish(frame);
    }

    /// Drop the current subscription. Returns `true` if there was one.
    fn disconnect(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                subscription.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether a page source is attached.
    pub fn is_bound(&self) -> bool {
        self.subscription.is_some()
    }

    /// Whether `source` is the attached page source.
    pub fn is_bound_to(&self, source: &Arc<dyn PageSource>) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|subscription| subscription.is_for(source))
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Report a new viewport size and lay out again.
    ///
    /// While unbound the size is remembered for the next bind.
    pub fn resize(&self, width: f32, height: f32) {
        self.shared
            .dispatch(None, IndicatorEvent::Resize { width, height });
    }

    /// Feed a scroll notification directly, bypassing the subscription.
    pub fn on_page_scrolled(&self, position: i32, offset: f32, offset_pixels: i32) {
        self.shared.dispatch(
            None,
            IndicatorEvent::Page(PageEvent::Scrolled {
                position,
                offset,
                offset_pixels,
            }),
        );
    }

    /// Feed a selection notification directly.
    pub fn on_page_selected(&self, position: i32) {
        self.shared
            .dispatch(None, IndicatorEvent::Page(PageEvent::Selected { position }));
    }

    /// Feed a scroll phase notification directly.
    pub fn on_page_scroll_state_changed(&self, scroll_state: ScrollState) {
        self.shared.dispatch(
            None,
            IndicatorEvent::Page(PageEvent::ScrollStateChanged(scroll_state)),
        );
    }

    /// Run a layout pass now, picking up any configuration changes.
    pub fn request_layout(&self) {
        let frame = self.shared.inner.lock().state.relayout();
        self.shared.publish(frame);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Current configuration.
    pub fn config(&self) -> IndicatorConfig {
        *self.shared.inner.lock().state.config()
    }

    /// Set the dot radius. Must be a positive, finite number.
    pub fn set_radius(&self, radius: f32) -> Result<()> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(IndicatorError::invalid_value(
                "radius",
                format!("must be a positive number, got {radius}"),
            ));
        }
        self.update_config("radius", |config| config.radius = radius);
        Ok(())
    }

    /// Set the gap between dots. Must be a non-negative, finite number.
    pub fn set_margin(&self, margin: f32) -> Result<()> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(IndicatorError::invalid_value(
                "margin",
                format!("must be a non-negative number, got {margin}"),
            ));
        }
        self.update_config("margin", |config| config.margin = margin);
        Ok(())
    }

    /// Set the static dot color (the indicator background).
    pub fn set_unselected_color(&self, color: Color) {
        self.update_config("unselected_color", |config| {
            config.unselected_color = color;
        });
    }

    /// Set the moving dot color (the indicator selection background).
    pub fn set_selected_color(&self, color: Color) {
        self.update_config("selected_color", |config| config.selected_color = color);
    }

    /// Set the row alignment.
    pub fn set_alignment(&self, alignment: Alignment) {
        self.update_config("alignment", |config| config.alignment = alignment);
    }

    /// Set the compositing mode.
    ///
    /// Switching to Solo makes the stored scroll offset irrelevant; switching
    /// away from it resumes following scroll events.
    pub fn set_mode(&self, mode: IndicatorMode) {
        self.update_config("mode", |config| config.mode = mode);
    }

    fn update_config(&self, field: &'static str, update: impl FnOnce(&mut IndicatorConfig)) {
        let mut inner = self.shared.inner.lock();
        update(inner.state.config_mut());
        tracing::debug!(target: targets::CONFIG, field, "indicator setting changed");
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The frame for the current layout, if one exists.
    pub fn frame(&self) -> Option<Frame> {
        self.shared.inner.lock().state.frame()
    }

    /// A copy of the full indicator state.
    pub fn state(&self) -> IndicatorState {
        self.shared.inner.lock().state.clone()
    }

    pub fn current_page(&self) -> usize {
        self.shared.inner.lock().state.current_page()
    }

    pub fn offset(&self) -> f32 {
        self.shared.inner.lock().state.offset()
    }

    pub fn item_count(&self) -> usize {
        self.shared.inner.lock().state.item_count()
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.shared.inner.lock().state.scroll_state()
    }
}

impl fmt::Debug for DotIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("DotIndicator")
            .field("state", &inner.state)
            .field("generation", &inner.generation)
            .field("subscription", &self.subscription)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::Pager;

    fn indicator(mode: IndicatorMode) -> DotIndicator {
        DotIndicator::new(IndicatorConfig::default().with_mode(mode)).unwrap()
    }

    #[test]
    fn test_new_validates() {
        let err = DotIndicator::new(IndicatorConfig::default().with_margin(f32::NAN)).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidValue { field: "margin", .. }));
    }

    #[test]
    fn test_bind_publishes_frame() {
        let pager = Arc::new(Pager::new(3));
        let mut indicator = indicator(IndicatorMode::Outside);
        let frames = Arc::new(Mutex::new(Vec::new()));
        let frames_clone = frames.clone();
        indicator
            .frame_ready()
            .connect(move |frame: &Frame| frames_clone.lock().push(frame.clone()));

        indicator.bind(pager.clone());
        assert!(frames.lock().is_empty());

        indicator.resize(300.0, 50.0);
        pager.scroll(1, 0.5);

        let frames = frames.lock();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].moving.unwrap().marker.marker.x, 170.0);
    }

    #[test]
    fn test_rebind_same_source_keeps_one_connection() {
        let pager = Arc::new(Pager::new(3));
        let mut indicator = indicator(IndicatorMode::Inside);
        indicator.resize(300.0, 50.0);

        indicator.bind(pager.clone());
        let once = indicator.state();
        indicator.bind(pager.clone());

        assert_eq!(pager.page_events().connection_count(), 1);
        assert_eq!(indicator.state(), once);
    }

    #[test]
    fn test_event_from_previous_binding_is_dropped() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();

        let first = Arc::new(Pager::new(3));
        let second = Arc::new(Pager::new(3));
        let mut indicator = indicator(IndicatorMode::Outside);
        indicator.resize(300.0, 50.0);

        indicator.bind(first);
        let first_generation = indicator.shared.inner.lock().generation;
        indicator.bind(second.clone());
        let before = indicator.state();

        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        indicator
            .frame_ready()
            .connect(move |_: &Frame| *count_clone.lock() += 1);

        // An event already queued for the first binding arrives late.
        let late = PageEvent::Scrolled {
            position: 2,
            offset: 0.5,
            offset_pixels: 0,
        };
        indicator
            .shared
            .dispatch(Some(first_generation), IndicatorEvent::Page(late));
        assert_eq!(indicator.state(), before);
        assert_eq!(*count.lock(), 0);

        // The live binding still gets through.
        second.scroll(1, 0.5);
        assert_eq!(indicator.current_page(), 1);
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_unbind_disconnects() {
        let pager = Arc::new(Pager::new(3));
        let mut indicator = indicator(IndicatorMode::Inside);
        indicator.bind(pager.clone());
        assert!(indicator.is_bound());

        indicator.unbind();
        assert!(!indicator.is_bound());
        assert_eq!(pager.page_events().connection_count(), 0);

        pager.scroll(1, 0.5);
        assert_eq!(indicator.current_page(), 0);
        assert_eq!(indicator.item_count(), 0);

        // Unbinding twice is harmless.
        indicator.unbind();
    }

    #[test]
    fn test_setters_are_lazy() {
        let pager = Arc::new(Pager::new(3));
        let mut indicator = indicator(IndicatorMode::Outside);
        indicator.resize(300.0, 50.0);
        indicator.bind(pager);

        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        indicator
            .frame_ready()
            .connect(move |_: &Frame| *count_clone.lock() += 1);

        indicator.set_selected_color(Color::RED);
        indicator.set_radius(5.0).unwrap();
        assert_eq!(*count.lock(), 0);
        assert_eq!(indicator.frame().unwrap().markers[0].marker.width, 20.0);

        indicator.request_layout();
        assert_eq!(*count.lock(), 1);
        let frame = indicator.frame().unwrap();
        assert_eq!(frame.markers[0].marker.width, 10.0);
        assert_eq!(frame.moving.unwrap().color, Color::RED);
    }

    #[test]
    fn test_setter_validation() {
        let indicator = indicator(IndicatorMode::Solo);
        assert!(indicator.set_radius(0.0).is_err());
        assert!(indicator.set_margin(-3.0).is_err());
        assert!(indicator.set_margin(0.0).is_ok());
        assert_eq!(indicator.config().radius, 10.0);
        assert_eq!(indicator.config().margin, 0.0);
    }

    #[test]
    fn test_direct_events() {
        let indicator = indicator(IndicatorMode::Solo);
        indicator.on_page_selected(1);
        assert_eq!(indicator.current_page(), 0);

        let pager: Arc<dyn PageSource> = Arc::new(Pager::new(3));
        let mut indicator = indicator;
        indicator.bind(pager.clone());
        assert!(indicator.is_bound_to(&pager));

        indicator.on_page_selected(2);
        indicator.on_page_scrolled(1, 0.5, 0);
        indicator.on_page_scroll_state_changed(ScrollState::Settling);
        assert_eq!(indicator.current_page(), 2);
        assert_eq!(indicator.offset(), 0.0);
        assert_eq!(indicator.scroll_state(), ScrollState::Settling);
    }
}
