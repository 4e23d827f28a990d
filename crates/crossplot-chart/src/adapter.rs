//! The seam between linked charts and whatever draws them.

use crate::chart::LinkedChart;
use crate::dirty::ViewVersions;
use crate::view::ChartView;
use crossplot_filter::{FilterCoordinator, FilterEvent, FilterListener};
use std::cell::RefCell;
use std::rc::Rc;

/// Receives chart snapshots after filter transitions.
///
/// Only charts with at least one dirty part are reported, in chart order.
pub trait ViewAdapter {
    fn update(&mut self, view: &ChartView);
}

impl<F> ViewAdapter for F
where
    F: FnMut(&ChartView),
{
    fn update(&mut self, view: &ChartView) {
        self(view)
    }
}

pub(crate) type SharedCharts = Rc<RefCell<Vec<Rc<LinkedChart>>>>;

/// Drives a [`ViewAdapter`] from filter events.
pub(crate) struct AdapterListener<A> {
    adapter: A,
    charts: SharedCharts,
    seen: Vec<ViewVersions>,
}

impl<A: ViewAdapter> AdapterListener<A> {
    pub(crate) fn new(adapter: A, charts: SharedCharts) -> Self {
        Self {
            adapter,
            charts,
            seen: Vec::new(),
        }
    }

    /// Report every chart that changed since its last report.
    pub(crate) fn flush(&mut self, xf: &FilterCoordinator) {
        let charts: Vec<Rc<LinkedChart>> = self.charts.borrow().clone();
        self.seen.resize_with(charts.len(), ViewVersions::default);

        for (chart, seen) in charts.iter().zip(self.seen.iter_mut()) {
            let versions = match chart.versions(xf) {
                Ok(versions) => versions,
                Err(err) => {
                    tracing::warn!(chart = %chart.id(), %err, "skipping chart view");
                    continue;
                }
            };
            let dirty = seen.update(versions);
            if dirty.is_empty() {
                continue;
            }

            match chart.view(xf) {
                Ok(mut view) => {
                    view.dirty = dirty;
                    tracing::trace!(chart = %chart.id(), ?dirty, "updating view adapter");
                    self.adapter.update(&view);
                }
                Err(err) => tracing::warn!(chart = %chart.id(), %err, "skipping chart view"),
            }
        }
    }
}

impl<A: ViewAdapter> FilterListener for AdapterListener<A> {
    fn on_filtered(&mut self, _event: &FilterEvent, coordinator: &FilterCoordinator) {
        self.flush(coordinator);
    }
}
