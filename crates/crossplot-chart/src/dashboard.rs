//! A set of linked charts over one record store.

use crate::adapter::{AdapterListener, SharedCharts, ViewAdapter};
use crate::builder::LinkedChartBuilder;
use crate::chart::LinkedChart;
use crate::error::{ChartError, ChartResult};
use crate::indicator::FilterIndicator;
use crate::types::ChartId;
use crate::view::ChartView;
use chrono::{DateTime, Utc};
use crossplot_filter::{FilterCoordinator, FilterOutcome, RecordStore};
use std::ops::Range;
use std::rc::Rc;

/// Owns the filter coordinator and any number of linked charts.
///
/// Every chart brushes its own dimensions and every other chart follows.
///
/// # Example
///
/// ```
/// use crossplot_chart::{Dashboard, LinkedChartBuilder};
/// use crossplot_filter::{Record, RecordStore};
///
/// let day = 86_400_000.0;
/// let store: RecordStore = (0..6)
///     .map(|i| {
///         Record::new()
///             .with("dd", (i / 2) as f64 * day)
///             .with("injured", i as f64)
///             .with("killed", (i % 2) as f64)
///     })
///     .collect();
///
/// let mut dashboard = Dashboard::new(store);
/// let injured = dashboard.add_chart(LinkedChartBuilder::new("injured")).unwrap();
/// let killed = dashboard.add_chart(LinkedChartBuilder::new("killed")).unwrap();
///
/// dashboard.brush_value(killed, 1.0..2.0).unwrap();
/// assert!(dashboard.is_filtered());
///
/// let view = dashboard.view(injured).unwrap();
/// assert_eq!(view.readout.value, 1.0 + 3.0 + 5.0);
/// ```
pub struct Dashboard {
    coordinator: FilterCoordinator,
    charts: SharedCharts,
    indicator: FilterIndicator,
}

impl Dashboard {
    pub fn new(store: RecordStore) -> Self {
        Self::with_coordinator(FilterCoordinator::new(store))
    }

    /// Wrap an existing coordinator, keeping its dimensions and listeners.
    pub fn with_coordinator(mut coordinator: FilterCoordinator) -> Self {
        let indicator = FilterIndicator::new();
        coordinator.subscribe(indicator.clone());
        Self {
            coordinator,
            charts: SharedCharts::default(),
            indicator,
        }
    }

    pub fn coordinator(&self) -> &FilterCoordinator {
        &self.coordinator
    }

    /// Mutable access for dimensions and groups outside the charts.
    pub fn coordinator_mut(&mut self) -> &mut FilterCoordinator {
        &mut self.coordinator
    }

    /// Build a chart and add it. The chart's id is its position.
    pub fn add_chart(&mut self, builder: LinkedChartBuilder) -> ChartResult<ChartId> {
        let id = ChartId::from_index(self.charts.borrow().len());
        let chart = builder.id(id).build(&mut self.coordinator)?;
        self.charts.borrow_mut().push(Rc::new(chart));
        tracing::info!(chart = %id, "added chart to dashboard");
        Ok(id)
    }

    pub fn chart(&self, id: ChartId) -> ChartResult<Rc<LinkedChart>> {
        self.charts
            .borrow()
            .get(id.index())
            .cloned()
            .ok_or(ChartError::UnknownChart(id))
    }

    /// All charts in creation order.
    pub fn charts(&self) -> Vec<Rc<LinkedChart>> {
        self.charts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.charts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.borrow().is_empty()
    }

    /// Brush a chart's time axis.
    pub fn brush_time(
        &mut self,
        id: ChartId,
        range: Range<DateTime<Utc>>,
    ) -> ChartResult<FilterOutcome> {
        let chart = self.chart(id)?;
        chart.brush_time(&mut self.coordinator, range)
    }

    /// Brush a chart's value slider.
    pub fn brush_value(&mut self, id: ChartId, range: Range<f64>) -> ChartResult<FilterOutcome> {
        let chart = self.chart(id)?;
        chart.brush_value(&mut self.coordinator, range)
    }

    /// Clear both brushes of a chart.
    pub fn clear_brushes(&mut self, id: ChartId) -> ChartResult<usize> {
        let chart = self.chart(id)?;
        chart.clear_brushes(&mut self.coordinator)
    }

    /// Clear every active filter, including ones set outside the charts.
    pub fn clear_all(&mut self) -> ChartResult<usize> {
        Ok(self.coordinator.clear_filters()?)
    }

    /// Check if any filter is active.
    pub fn is_filtered(&self) -> bool {
        self.indicator.is_active()
    }

    pub fn indicator(&self) -> &FilterIndicator {
        &self.indicator
    }

    pub fn view(&self, id: ChartId) -> ChartResult<ChartView> {
        self.chart(id)?.view(&self.coordinator)
    }

    pub fn views(&self) -> ChartResult<Vec<ChartView>> {
        self.charts
            .borrow()
            .iter()
            .map(|chart| chart.view(&self.coordinator))
            .collect()
    }

    /// Send the current views to `adapter`, then keep it updated after
    /// every filter transition.
    pub fn attach(&mut self, adapter: impl ViewAdapter + 'static) {
        let mut listener = AdapterListener::new(adapter, Rc::clone(&self.charts));
        listener.flush(&self.coordinator);
        self.coordinator.subscribe(listener);
        tracing::debug!(charts = self.len(), "attached view adapter");
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("coordinator", &self.coordinator)
            .field("charts", &self.len())
            .field("filtered", &self.is_filtered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossplot_filter::Record;

    fn store() -> RecordStore {
        (0..4)
            .map(|i| Record::new().with("dd", 0.0).with("v", i as f64))
            .collect()
    }

    #[test]
    fn test_unknown_chart() {
        let mut dashboard = Dashboard::new(store());
        assert_eq!(
            dashboard.brush_value(ChartId(3), 0.0..1.0),
            Err(ChartError::UnknownChart(ChartId(3)))
        );
        assert!(dashboard.is_empty());
    }

    #[test]
    fn test_ids_follow_insertion() {
        let mut dashboard = Dashboard::new(store());
        let a = dashboard.add_chart(LinkedChartBuilder::new("v")).unwrap();
        let b = dashboard.add_chart(LinkedChartBuilder::new("v")).unwrap();
        assert_eq!((a, b), (ChartId(0), ChartId(1)));
        assert_eq!(dashboard.chart(b).unwrap().id(), b);
        assert_eq!(dashboard.views().unwrap().len(), 2);
    }

    #[test]
    fn test_indicator_follows_filters() {
        let mut dashboard = Dashboard::new(store());
        let id = dashboard.add_chart(LinkedChartBuilder::new("v")).unwrap();

        dashboard.brush_value(id, 1.0..3.0).unwrap();
        assert!(dashboard.is_filtered());
        assert_eq!(dashboard.clear_brushes(id).unwrap(), 1);
        assert!(!dashboard.is_filtered());
        assert_eq!(dashboard.indicator().transitions(), 2);
    }
}
