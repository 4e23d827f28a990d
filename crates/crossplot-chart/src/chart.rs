//! A linked chart: three views of one field sharing a filter coordinator.

use crate::dirty::{ViewDirty, ViewVersions};
use crate::error::ChartResult;
use crate::layout::{LineLayout, ReadoutLayout, SliderLayout};
use crate::types::{Brush, ChartId, DataPoint};
use crate::view::{ChartView, LineView, ReadoutView, SliderView};
use chrono::{DateTime, Utc};
use crossplot_filter::reducer::{Count, CountAndSum, Sum};
use crossplot_filter::{
    DimensionId, FilterCoordinator, FilterOutcome, FilterSpec, GroupAllId, GroupId,
};
use std::ops::Range;

/// Dimensions, groups and layouts of one linked chart.
///
/// The chart holds handles only; every view is read from the coordinator it
/// was built on.
#[derive(Debug, Clone)]
pub struct LinkedChart {
    pub(crate) id: ChartId,
    pub(crate) field_name: String,
    pub(crate) time: DimensionId,
    pub(crate) value: DimensionId,
    pub(crate) readout: DimensionId,
    pub(crate) line_group: GroupId<Sum>,
    pub(crate) readout_group: GroupAllId<CountAndSum>,
    pub(crate) slider_group: GroupId<Count>,
    pub(crate) line: LineLayout,
    pub(crate) readout_layout: ReadoutLayout,
    pub(crate) slider: SliderLayout,
    pub(crate) x_domain: Option<(f64, f64)>,
    /// y domain at build time, used when `elastic_y` is off.
    pub(crate) fixed_y_domain: (f64, f64),
}

impl LinkedChart {
    pub fn id(&self) -> ChartId {
        self.id
    }

    /// The aggregated field.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Day dimension brushed by the line chart.
    pub fn time_dimension(&self) -> DimensionId {
        self.time
    }

    /// Value dimension brushed by the slider.
    pub fn value_dimension(&self) -> DimensionId {
        self.value
    }

    /// Value dimension feeding the readout. Never filtered by this chart.
    pub fn readout_dimension(&self) -> DimensionId {
        self.readout
    }

    pub fn line_layout(&self) -> &LineLayout {
        &self.line
    }

    pub fn readout_layout(&self) -> &ReadoutLayout {
        &self.readout_layout
    }

    pub fn slider_layout(&self) -> &SliderLayout {
        &self.slider
    }

    /// Filter the line chart's days to `[start, end)`.
    ///
    /// Records are matched by the start of their day, so a brush covers
    /// whole days.
    pub fn brush_time(
        &self,
        xf: &mut FilterCoordinator,
        range: Range<DateTime<Utc>>,
    ) -> ChartResult<FilterOutcome> {
        let spec = FilterSpec::Range(
            range.start.timestamp_millis() as f64,
            range.end.timestamp_millis() as f64,
        );
        Ok(xf.filter(self.time, spec)?)
    }

    /// Filter the slider's values to `[start, end)`.
    pub fn brush_value(
        &self,
        xf: &mut FilterCoordinator,
        range: Range<f64>,
    ) -> ChartResult<FilterOutcome> {
        Ok(xf.filter(self.value, range)?)
    }

    /// Clear both brushes. Returns how many were active.
    pub fn clear_brushes(&self, xf: &mut FilterCoordinator) -> ChartResult<usize> {
        let mut cleared = 0;
        for dimension in [self.time, self.value] {
            if xf.filter_all(dimension)?.is_applied() {
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    pub fn line_view(&self, xf: &FilterCoordinator) -> ChartResult<LineView> {
        let points: Vec<DataPoint> = xf
            .get_group(self.line_group)?
            .all()
            .map(|(day, sum)| DataPoint::new(day.value(), *sum))
            .collect();

        let y_domain = if self.line.elastic_y {
            elastic_domain(&points)
        } else {
            self.fixed_y_domain
        };

        Ok(LineView {
            points,
            x_domain: self.x_domain,
            y_domain,
            brush: brush_of(xf.get_dimension(self.time)?.filter()),
        })
    }

    pub fn readout_view(&self, xf: &FilterCoordinator) -> ChartResult<ReadoutView> {
        let acc = xf.value_all(self.readout_group)?;
        let value = acc.total();
        Ok(ReadoutView {
            count: acc.count,
            total: acc.sum,
            average: acc.average(),
            value,
            text: self.readout_layout.format.format(value),
        })
    }

    pub fn slider_view(&self, xf: &FilterCoordinator) -> ChartResult<SliderView> {
        let points = xf
            .get_group(self.slider_group)?
            .all()
            .map(|(value, count)| DataPoint::new(value.value(), *count as f64))
            .collect();

        Ok(SliderView {
            points,
            x_domain: self.slider.x_domain,
            brush: brush_of(xf.get_dimension(self.value)?.filter()),
        })
    }

    /// Full snapshot, every part marked dirty.
    pub fn view(&self, xf: &FilterCoordinator) -> ChartResult<ChartView> {
        Ok(ChartView {
            chart: self.id,
            dirty: ViewDirty::all(),
            line: self.line_view(xf)?,
            readout: self.readout_view(xf)?,
            slider: self.slider_view(xf)?,
        })
    }

    /// Current group versions and brushes, for change tracking.
    pub fn versions(&self, xf: &FilterCoordinator) -> ChartResult<ViewVersions> {
        Ok(ViewVersions {
            line: Some(xf.get_group(self.line_group)?.version()),
            readout: Some(xf.get_group_all(self.readout_group)?.version()),
            slider: Some(xf.get_group(self.slider_group)?.version()),
            time_filter: Some(xf.get_dimension(self.time)?.filter().clone()),
            value_filter: Some(xf.get_dimension(self.value)?.filter().clone()),
        })
    }
}

/// `[min(0, lowest), highest]` over the points, `(0, 0)` when empty.
pub(crate) fn elastic_domain(points: &[DataPoint]) -> (f64, f64) {
    points.iter().fold((0.0, 0.0), |(lo, hi), p| (f64::min(lo, p.y), f64::max(hi, p.y)))
}

fn brush_of(spec: &FilterSpec) -> Option<Brush> {
    match *spec {
        FilterSpec::Range(start, end) | FilterSpec::RangeInclusive(start, end) => {
            Some(Brush::new(start, end))
        }
        FilterSpec::Exact(value) => Some(Brush::new(value, value)),
        FilterSpec::All | FilterSpec::Predicate(_) => None,
    }
}
