//! Filter events and listeners.

use crate::coordinator::FilterCoordinator;
use crate::dimension::DimensionId;
use crate::filter::FilterSpec;

/// One filter transition on one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEvent {
    pub dimension: DimensionId,
    pub previous: FilterSpec,
    pub current: FilterSpec,
    /// Records that started passing this dimension's filter.
    pub entered: usize,
    /// Records that stopped passing this dimension's filter.
    pub exited: usize,
}

impl FilterEvent {
    /// Check if the transition cleared the dimension's filter.
    pub fn is_cleared(&self) -> bool {
        self.current.is_all()
    }
}

/// Receives a [`FilterEvent`] after every filter transition.
///
/// Listeners run after all groups are up to date, in registration order,
/// and only get shared access to the coordinator: they can read any group
/// but cannot start another transition while one is being delivered.
pub trait FilterListener {
    fn on_filtered(&mut self, event: &FilterEvent, coordinator: &FilterCoordinator);
}

impl<F> FilterListener for F
where
    F: FnMut(&FilterEvent, &FilterCoordinator),
{
    fn on_filtered(&mut self, event: &FilterEvent, coordinator: &FilterCoordinator) {
        self(event, coordinator)
    }
}

/// Outcome of a `filter` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The spec equals the active filter; nothing changed, nobody was
    /// notified.
    Unchanged,
    /// The filter was replaced and listeners were notified.
    Applied { entered: usize, exited: usize },
}

impl FilterOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FilterOutcome::Applied { .. })
    }
}
