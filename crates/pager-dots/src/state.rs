//! The indicator state machine.
//!
//! [`IndicatorState`] is a pure transition function: every
//! [`IndicatorEvent`] mutates the state and, when the result is drawable,
//! returns the [`Frame`] to render. It performs no I/O and holds no
//! subscriptions; [`DotIndicator`](crate::DotIndicator) wires it to a page
//! source.

use pager_dots_core::logging::{span_names, targets};
use pager_dots_core::PerfSpan;
use pager_dots_render::Size;

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::frame::{Frame, MarkerPaint, MovingPaint};
use crate::geometry::{Marker, MovingMarker};
use crate::layout::{self, clamp_offset, clamp_page};
use crate::page_source::{PageEvent, ScrollState};

/// Lifecycle phase of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No page source attached.
    #[default]
    Unbound,
    /// Attached, but no viewport has been laid out yet.
    Bound,
    /// Attached and laid out at least once.
    LaidOut,
}

/// Input to [`IndicatorState::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorEvent {
    /// Attach to a page source with `count` pages.
    Bind { count: usize },
    /// Detach from the page source.
    Unbind,
    /// A notification from the page source.
    Page(PageEvent),
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

impl From<PageEvent> for IndicatorEvent {
    fn from(event: PageEvent) -> Self {
        Self::Page(event)
    }
}

/// Everything the indicator knows between events.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorState {
    config: IndicatorConfig,
    phase: Phase,
    item_count: usize,
    current_page: usize,
    offset: f32,
    scroll_state: ScrollState,
    viewport: Option<Size>,
    markers: Vec<Marker>,
    moving: Option<MovingMarker>,
}

impl IndicatorState {
    /// Create an unbound state with a validated configuration.
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Phase::Unbound,
            item_count: 0,
            current_page: 0,
            offset: 0.0,
            scroll_state: ScrollState::Idle,
            viewport: None,
            markers: Vec::new(),
            moving: None,
        })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    ///
    /// Changes are picked up by the next layout pass; nothing is recomputed
    /// here.
    pub(crate) fn config_mut(&mut self) -> &mut IndicatorConfig {
        &mut self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_bound(&self) -> bool {
        self.phase != Phase::Unbound
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Scroll offset toward the next page, in `[0, 1)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    /// Last viewport size reported, if any.
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn moving(&self) -> Option<&MovingMarker> {
        self.moving.as_ref()
    }

    /// Apply one event. Returns the frame to render, if the event changed
    /// anything drawable.
    #[tracing::instrument(skip_all, target = "pager_dots::controller", level = "trace")]
    pub fn apply(&mut self, event: IndicatorEvent) -> Option<Frame> {
        match event {
            IndicatorEvent::Bind { count } => self.bind(count),
            IndicatorEvent::Unbind => self.unbind(),
            IndicatorEvent::Resize { width, height } => self.resize(Size::new(width, height)),
            IndicatorEvent::Page(event) => self.page_event(event),
        }
    }

    fn bind(&mut self, count: usize) -> Option<Frame> {
        if self.is_bound() {
            self.reset();
        }
        self.phase = Phase::Bound;
        self.item_count = count;
        // Placeholders until the first layout pass positions them.
        self.markers = vec![Marker::default(); count];
        tracing::debug!(target: targets::CONTROLLER, count, "indicator bound");
        self.relayout()
    }

    fn unbind(&mut self) -> Option<Frame> {
        if !self.is_bound() {
            return None;
        }
        self.reset();
        tracing::debug!(target: targets::CONTROLLER, "indicator unbound");
        self.viewport.map(Frame::empty)
    }

    fn reset(&mut self) {
        self.phase = Phase::Unbound;
        self.item_count = 0;
        self.current_page = 0;
        self.offset = 0.0;
        self.scroll_state = ScrollState::Idle;
        self.markers.clear();
        self.moving = None;
    }

    fn resize(&mut self, viewport: Size) -> Option<Frame> {
        self.viewport = Some(viewport);
        if !self.is_bound() {
            tracing::trace!(target: targets::CONTROLLER, ?viewport, "resize while unbound");
            return None;
        }
        self.relayout()
    }

    fn page_event(&mut self, event: PageEvent) -> Option<Frame> {
        if !self.is_bound() {
            tracing::trace!(target: targets::CONTROLLER, ?event, "page event while unbound");
            return None;
        }
        match event {
            PageEvent::Scrolled {
                position, offset, ..
            } => self.scrolled(position, offset),
            PageEvent::Selected { position } => self.selected(position),
            PageEvent::ScrollStateChanged(scroll_state) => {
                self.scroll_state = scroll_state;
                None
            }
            PageEvent::CountChanged { count } => self.count_changed(count),
        }
    }

    fn scrolled(&mut self, position: i32, offset: f32) -> Option<Frame> {
        if !self.config.mode.follows_scroll() {
            tracing::trace!(target: targets::CONTROLLER, position, "scroll ignored in solo mode");
            return None;
        }
        let page = clamp_page(position, self.item_count)?;
        self.current_page = page;
        self.offset = clamp_offset(offset);
        self.relayout()
    }

    fn selected(&mut self, position: i32) -> Option<Frame> {
        if !self.config.mode.follows_selection() {
            tracing::trace!(
                target: targets::CONTROLLER,
                position,
                mode = ?self.config.mode,
                "selection ignored"
            );
            return None;
        }
        let page = clamp_page(position, self.item_count)?;
        self.current_page = page;
        self.offset = 0.0;
        self.relayout()
    }

    fn count_changed(&mut self, count: usize) -> Option<Frame> {
        if count == self.item_count {
            return None;
        }
        let last = count.saturating_sub(1);
        if self.current_page > last {
            self.current_page = last;
            self.offset = 0.0;
        }
        if count == 0 {
            self.offset = 0.0;
        }
        self.item_count = count;
        self.markers = vec![Marker::default(); count];
        self.moving = None;
        tracing::debug!(target: targets::CONTROLLER, count, "page count changed");
        self.relayout()
    }

    /// Run a full layout pass with the current configuration and return the
    /// resulting frame. Does nothing until a viewport is known.
    pub fn relayout(&mut self) -> Option<Frame> {
        if !self.is_bound() {
            return None;
        }
        let viewport = self.viewport?;
        let _span = PerfSpan::new(span_names::LAYOUT_PASS);
        self.layout_static(viewport);
        self.layout_moving();
        self.frame()
    }

    /// Lay out the static dots for `viewport`.
    pub fn layout_static(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        self.markers = layout::layout_static(
            viewport,
            self.item_count,
            &self.config.layout_params(),
        );
        if self.is_bound() {
            self.phase = Phase::LaidOut;
        }
        tracing::trace!(
            target: targets::LAYOUT,
            count = self.markers.len(),
            ?viewport,
            "static layout"
        );
    }

    /// Position the moving dot from the current page and offset.
    ///
    /// Must follow [`layout_static`](Self::layout_static). Calling it first
    /// panics in debug builds and is logged and ignored otherwise.
    pub fn layout_moving(&mut self) {
        debug_assert!(
            self.phase == Phase::LaidOut,
            "layout_moving called before layout_static (phase {:?})",
            self.phase
        );
        if self.phase != Phase::LaidOut {
            tracing::error!(
                target: targets::LAYOUT,
                phase = ?self.phase,
                "moving layout requested before static layout, ignored"
            );
            return;
        }
        let params = self.config.layout_params();
        let offset = params.mode.effective_offset(self.offset);
        self.moving = layout::layout_moving(&self.markers, self.current_page, offset, &params);
        tracing::trace!(target: targets::LAYOUT, moving = ?self.moving, "moving layout");
    }

    /// The frame for the current layout, once one exists.
    pub fn frame(&self) -> Option<Frame> {
        if self.phase != Phase::LaidOut {
            return None;
        }
        let viewport = self.viewport?;
        let markers = self
            .markers
            .iter()
            .map(|&marker| MarkerPaint {
                marker,
                color: self.config.unselected_color,
            })
            .collect();
        let moving = self.moving.map(|marker| MovingPaint {
            marker,
            color: self.config.selected_color,
            blend: self.config.mode.blend_mode(),
        });
        Some(Frame {
            viewport,
            markers,
            moving,
        })
    }
}
