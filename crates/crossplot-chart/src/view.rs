//! Renderer-ready snapshots of a linked chart.

use crate::dirty::ViewDirty;
use crate::format::{format_time, point_tooltip};
use crate::types::{Brush, ChartId, DataPoint};

/// Data of the time line chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineView {
    /// One point per day: x is the day start (epoch ms), y the field sum.
    pub points: Vec<DataPoint>,
    /// Extent of the raw timestamps.
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: (f64, f64),
    pub brush: Option<Brush>,
}

impl LineView {
    /// Tooltip of the point at `index`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.points.get(index).map(|p| point_tooltip(p.y))
    }

    /// Labels of the given x ticks.
    pub fn tick_labels(&self, ticks: &[f64], pattern: &str) -> Vec<String> {
        ticks
            .iter()
            .map(|&t| format_time(t, pattern).unwrap_or_default())
            .collect()
    }
}

/// The aggregate readout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadoutView {
    pub count: u64,
    pub total: f64,
    pub average: f64,
    /// The value shown: the total while any record is counted, else 0.
    pub value: f64,
    pub text: String,
}

/// Data of the value slider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliderView {
    /// One point per distinct value: x is the value, y its record count.
    pub points: Vec<DataPoint>,
    pub x_domain: (f64, f64),
    pub brush: Option<Brush>,
}

/// Snapshot of one linked chart after a filter transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub chart: ChartId,
    /// Parts that changed since the previous snapshot handed to the same
    /// adapter. Every flag is set on a freshly built view.
    pub dirty: ViewDirty,
    pub line: LineView,
    pub readout: ReadoutView,
    pub slider: SliderView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltips_and_ticks() {
        let view = LineView {
            points: vec![DataPoint::new(0.0, 4.0)],
            ..Default::default()
        };
        assert_eq!(view.tooltip(0).as_deref(), Some("Total number of events: 4"));
        assert_eq!(view.tooltip(1), None);
        assert_eq!(view.tick_labels(&[0.0], "%d-%m-%y"), vec!["01-01-70"]);
    }
}
