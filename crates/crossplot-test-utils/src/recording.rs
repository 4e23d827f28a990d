//! A listener that records filter events for later assertions.

use crossplot_filter::{DimensionId, FilterCoordinator, FilterEvent, FilterListener};
use parking_lot::Mutex;
use std::sync::Arc;

/// What a [`RecordingListener`] saw for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub dimension: DimensionId,
    pub entered: usize,
    pub exited: usize,
    pub cleared: bool,
    /// Visible record count at delivery time.
    pub visible: usize,
    /// Debug rendering of the new filter.
    pub filter: String,
}

/// Records every event it receives.
///
/// Clones share the same log, so a test keeps one clone and subscribes the
/// other.
///
/// # Example
///
/// ```rust
/// use crossplot_filter::{FilterCoordinator, Projection};
/// use crossplot_test_utils::{fixtures, RecordingListener};
///
/// let mut xf = FilterCoordinator::new(fixtures::tiny());
/// let day = xf.dimension("day", Projection::field("day"));
///
/// let recorder = RecordingListener::new();
/// xf.subscribe(recorder.clone());
/// xf.filter(day, 1.0..2.0).unwrap();
///
/// let events = recorder.events();
/// assert_eq!(events[0].exited, 1);
/// assert_eq!(events[0].visible, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl FilterListener for RecordingListener {
    fn on_filtered(&mut self, event: &FilterEvent, coordinator: &FilterCoordinator) {
        self.events.lock().push(RecordedEvent {
            dimension: event.dimension,
            entered: event.entered,
            exited: event.exited,
            cleared: event.is_cleared(),
            visible: coordinator.visible_count(),
            filter: format!("{:?}", event.current),
        });
    }
}
