//! In-memory page source.
//!
//! [`Pager`] is a plain [`PageSource`] for hosts that do not have a native
//! paginated view to bind to, and a faithful stand-in for one in tests. It
//! publishes the same event sequence a touch-driven pager does.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pager_dots::{DotIndicator, IndicatorConfig, IndicatorMode, Pager};
//!
//! let pager = Arc::new(Pager::new(3));
//! let mut indicator = DotIndicator::new(
//!     IndicatorConfig::default().with_mode(IndicatorMode::Outside),
//! )?;
//! indicator.bind(pager.clone());
//! indicator.resize(300.0, 50.0);
//!
//! pager.scroll(1, 0.5);
//! assert_eq!(indicator.frame().unwrap().moving.unwrap().marker.rect().left(), 170.0);
//! # Ok::<(), pager_dots::IndicatorError>(())
//! ```

use parking_lot::Mutex;
use pager_dots_core::logging::targets;
use pager_dots_core::Signal;

use crate::page_source::{PageEvent, PageSource, ScrollState};

#[derive(Debug)]
struct PagerState {
    count: usize,
    current: usize,
    scroll_state: ScrollState,
    page_width: f32,
}

/// A page source driven directly by the host.
///
/// # Signals
///
/// - `page_events(PageEvent)`: Emitted for every scroll, selection, scroll
///   state and count change
#[derive(Debug)]
pub struct Pager {
    state: Mutex<PagerState>,
    events: Signal<PageEvent>,
}

impl Pager {
    /// Create a pager with `count` pages, positioned on the first.
    pub fn new(count: usize) -> Self {
        Self {
            state: Mutex::new(PagerState {
                count,
                current: 0,
                scroll_state: ScrollState::Idle,
                page_width: 0.0,
            }),
            events: Signal::new(),
        }
    }

    /// Set the page width used to report pixel offsets.
    pub fn with_page_width(self, page_width: f32) -> Self {
        self.state.lock().page_width = page_width;
        self
    }

    /// Currently selected page.
    pub fn current_page(&self) -> usize {
        self.state.lock().current
    }

    /// Current scroll phase.
    pub fn scroll_state(&self) -> ScrollState {
        self.state.lock().scroll_state
    }

    /// Change the number of pages.
    ///
    /// The selected page is clamped into the new range.
    pub fn set_page_count(&self, count: usize) {
        {
            let mut state = self.state.lock();
            if state.count == count {
                return;
            }
            state.count = count;
            state.current = state.current.min(count.saturating_sub(1));
        }
        tracing::debug!(target: targets::CONTROLLER, count, "pager count changed");
        self.events.emit(PageEvent::CountChanged { count });
    }

    /// Report a scroll position.
    pub fn scroll(&self, position: i32, offset: f32) {
        let page_width = self.state.lock().page_width;
        let offset_pixels = (offset * page_width).round() as i32;
        self.events.emit(PageEvent::Scrolled {
            position,
            offset,
            offset_pixels,
        });
    }

    /// Select a page. Returns `true` if a selection event was published.
    ///
    /// Selecting the current page publishes nothing. Out-of-range positions
    /// are forwarded unchanged (subscribers clamp) but do not move the pager.
    pub fn select(&self, position: i32) -> bool {
        {
            let mut state = self.state.lock();
            match usize::try_from(position) {
                Ok(page) if page == state.current => return false,
                Ok(page) if page < state.count => state.current = page,
                _ => {}
            }
        }
        self.events.emit(PageEvent::Selected { position });
        true
    }

    /// Change the scroll phase.
    pub fn set_scroll_state(&self, scroll_state: ScrollState) {
        {
            let mut state = self.state.lock();
            if state.scroll_state == scroll_state {
                return;
            }
            state.scroll_state = scroll_state;
        }
        self.events.emit(PageEvent::ScrollStateChanged(scroll_state));
    }

    /// Simulate a swipe from the current page to `target`, reporting
    /// `steps` intermediate scroll positions per page crossed.
    pub fn swipe_to(&self, target: usize, steps: u32) {
        let (from, count) = {
            let state = self.state.lock();
            (state.current, state.count)
        };
        if count == 0 {
            return;
        }
        let target = target.min(count - 1);
        let steps = steps.max(1);

        self.set_scroll_state(ScrollState::Dragging);
        let forward = target >= from;
        let mut page = from;
        while page != target {
            // Scroll events always name the page on the left of the viewport.
            let left = if forward { page } else { page - 1 };
            for step in 1..steps {
                let t = step as f32 / steps as f32;
                let offset = if forward { t } else { 1.0 - t };
                self.scroll(left as i32, offset);
            }
            page = if forward { page + 1 } else { page - 1 };
            if page == target {
                self.set_scroll_state(ScrollState::Settling);
                self.select(target as i32);
            }
        }
        self.scroll(target as i32, 0.0);
        self.set_scroll_state(ScrollState::Idle);
    }
}

impl PageSource for Pager {
    fn page_count(&self) -> usize {
        self.state.lock().count
    }

    fn page_events(&self) -> &Signal<PageEvent> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(pager: &Pager) -> Arc<Mutex<Vec<PageEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        pager.page_events().connect(move |event| seen_clone.lock().push(*event));
        seen
    }

    #[test]
    fn test_select_only_emits_on_change() {
        let pager = Pager::new(3);
        let seen = record(&pager);

        assert!(!pager.select(0));
        assert!(pager.select(2));
        assert_eq!(pager.current_page(), 2);
        assert_eq!(*seen.lock(), vec![PageEvent::Selected { position: 2 }]);
    }

    #[test]
    fn test_scroll_reports_pixels() {
        let pager = Pager::new(3).with_page_width(200.0);
        let seen = record(&pager);

        pager.scroll(1, 0.25);
        assert_eq!(
            *seen.lock(),
            vec![PageEvent::Scrolled {
                position: 1,
                offset: 0.25,
                offset_pixels: 50
            }]
        );
    }

    #[test]
    fn test_count_change_clamps_selection() {
        let pager = Pager::new(5);
        pager.select(4);
        let seen = record(&pager);

        pager.set_page_count(2);
        assert_eq!(pager.page_count(), 2);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(*seen.lock(), vec![PageEvent::CountChanged { count: 2 }]);

        pager.set_page_count(2);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_swipe_event_sequence() {
        let pager = Pager::new(3);
        let seen = record(&pager);

        pager.swipe_to(1, 2);
        assert_eq!(
            *seen.lock(),
            vec![
                PageEvent::ScrollStateChanged(ScrollState::Dragging),
                PageEvent::Scrolled {
                    position: 0,
                    offset: 0.5,
                    offset_pixels: 0
                },
                PageEvent::ScrollStateChanged(ScrollState::Settling),
                PageEvent::Selected { position: 1 },
                PageEvent::Scrolled {
                    position: 1,
                    offset: 0.0,
                    offset_pixels: 0
                },
                PageEvent::ScrollStateChanged(ScrollState::Idle),
            ]
        );
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.scroll_state(), ScrollState::Idle);
    }

    #[test]
    fn test_swipe_backwards_names_left_page() {
        let pager = Pager::new(3);
        pager.select(2);
        let seen = record(&pager);

        pager.swipe_to(1, 4);
        let scrolls: Vec<(i32, f32)> = seen
            .lock()
            .iter()
            .filter_map(|e| match *e {
                PageEvent::Scrolled {
                    position, offset, ..
                } => Some((position, offset)),
                _ => None,
            })
            .collect();
        assert_eq!(scrolls, vec![(1, 0.75), (1, 0.5), (1, 0.25), (1, 0.0)]);
    }
}
