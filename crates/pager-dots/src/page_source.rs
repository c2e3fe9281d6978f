//! The contract between a paginated host and the indicator.
//!
//! A page source reports how many pages it has and publishes [`PageEvent`]s on
//! a [`Signal`]. Subscribers hold a [`Subscription`], an explicit handle that
//! disconnects the slot when cancelled or dropped.

use std::fmt;
use std::sync::Arc;

use pager_dots_core::logging::targets;
use pager_dots_core::{ConnectionId, Signal};

/// Scroll phase reported by a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollState {
    /// Settled on a page.
    #[default]
    Idle,
    /// Being dragged by the user.
    Dragging,
    /// Animating toward a final page after release.
    Settling,
}

/// A notification published by a page source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// The pager moved. `position` is the page on the left of the viewport
    /// and `offset` the fraction of the way to `position + 1`.
    Scrolled {
        position: i32,
        offset: f32,
        offset_pixels: i32,
    },
    /// A page became the selected one.
    Selected { position: i32 },
    /// The scroll phase changed.
    ScrollStateChanged(ScrollState),
    /// The number of pages changed.
    CountChanged { count: usize },
}

/// A paginated component the indicator can follow.
pub trait PageSource: Send + Sync {
    /// Current number of pages.
    fn page_count(&self) -> usize;

    /// Signal on which page notifications are published.
    fn page_events(&self) -> &Signal<PageEvent>;
}

/// An active connection to a page source.
///
/// Cancelling (or dropping) the subscription disconnects its slot; no event
/// emitted afterwards reaches it.
pub struct Subscription {
    source: Arc<dyn PageSource>,
    id: Option<ConnectionId>,
}

impl Subscription {
    /// Connect `slot` to the page events of `source`.
    pub fn new<F>(source: Arc<dyn PageSource>, slot: F) -> Self
    where
        F: Fn(&PageEvent) + Send + Sync + 'static,
    {
        let id = source.page_events().connect(slot);
        Self {
            source,
            id: Some(id),
        }
    }

    /// The page source this subscription listens to.
    pub fn source(&self) -> &Arc<dyn PageSource> {
        &self.source
    }

    /// Whether the slot is still connected.
    pub fn is_active(&self) -> bool {
        self.id
            .is_some_and(|id| self.source.page_events().is_connected(id))
    }

    /// Whether this subscription listens to `source`.
    pub fn is_for(&self, source: &Arc<dyn PageSource>) -> bool {
        Arc::ptr_eq(&self.source, source)
    }

    /// Disconnect the slot.
    pub fn cancel(mut self) {
        self.disconnect();
    }

    fn disconnect(&mut self) {
        if let Some(id) = self.id.take() {
            if let Err(err) = self.source.page_events().try_disconnect(id) {
                tracing::debug!(target: targets::CONTROLLER, %err, "subscription already gone");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("page_count", &self.source.page_count())
            .finish()
    }
}
