//! Tracks whether any filter is active, for a "filters on" indicator icon.

use crossplot_filter::{FilterCoordinator, FilterEvent, FilterListener};
use std::cell::Cell;
use std::rc::Rc;

/// A listener mirroring [`FilterCoordinator::has_active_filters`].
///
/// Clones share state: subscribe one clone and query another.
#[derive(Debug, Clone, Default)]
pub struct FilterIndicator {
    active: Rc<Cell<bool>>,
    transitions: Rc<Cell<u64>>,
}

impl FilterIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any filter was active after the last transition.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Number of filter transitions seen.
    pub fn transitions(&self) -> u64 {
        self.transitions.get()
    }
}

impl FilterListener for FilterIndicator {
    fn on_filtered(&mut self, event: &FilterEvent, coordinator: &FilterCoordinator) {
        let active = coordinator.has_active_filters();
        if active != self.active.replace(active) {
            tracing::debug!(active, dimension = %event.dimension, "filter indicator changed");
        }
        self.transitions.set(self.transitions.get() + 1);
    }
}
