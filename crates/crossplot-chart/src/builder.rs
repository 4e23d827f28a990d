//! Fluent builder for linked charts.
//!
//! One set of options produces three views over the same numeric field:
//! a line chart of the field's daily sum, an aggregate readout, and a
//! slider over the field's values.
//!
//! # Example
//!
//! ```
//! use crossplot_chart::LinkedChartBuilder;
//! use crossplot_filter::{FilterCoordinator, Record, RecordStore};
//!
//! let store = RecordStore::new(vec![
//!     Record::new().with("dd", 1_640_995_200_000.0).with("deaths", 3.0),
//!     Record::new().with("dd", 1_641_081_600_000.0).with("deaths", 5.0),
//! ]);
//! let mut xf = FilterCoordinator::new(store);
//!
//! let chart = LinkedChartBuilder::new("deaths")
//!     .title("Deaths")
//!     .layer("Incidents")
//!     .controls(true)
//!     .build(&mut xf)
//!     .unwrap();
//!
//! assert_eq!(chart.line_layout().chart_title, "Deaths over time (Incidents)");
//! assert_eq!(chart.slider_layout().x_domain, (0.0, 6.0));
//! ```

use crate::chart::{LinkedChart, elastic_domain};
use crate::color::ColorScale;
use crate::error::{ChartError, ChartResult};
use crate::layout::{LineLayout, ReadoutLayout, SliderLayout};
use crate::types::ChartId;
use crossplot_filter::reducer::{Count, CountAndSum, Sum};
use crossplot_filter::{FilterCoordinator, GroupScope, Projection};
use std::time::Duration;

/// Default name of the timestamp field.
pub const DEFAULT_DATE_FIELD: &str = "dd";

/// Settings of one linked chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartOptions {
    /// Numeric field aggregated by every view.
    pub field_name: String,
    /// Human readable name of the field. Defaults to `field_name`.
    pub field_title: Option<String>,
    /// Timestamp field bucketed by day on the line chart.
    pub date_field: String,
    /// Name of the data layer, shown in the chart title.
    pub layer_name: String,
    pub width: u32,
    pub height: u32,
    pub transition: Duration,
    pub controls: bool,
    pub elastic_y: bool,
    /// Colors of the slider.
    pub color_scale: ColorScale,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            field_name: String::new(),
            field_title: None,
            date_field: DEFAULT_DATE_FIELD.to_string(),
            layer_name: String::new(),
            width: 300,
            height: 200,
            transition: Duration::from_millis(750),
            controls: false,
            elastic_y: true,
            color_scale: ColorScale::default(),
        }
    }
}

impl LineChartOptions {
    fn validate(&self) -> ChartResult<()> {
        if self.field_name.trim().is_empty() {
            return Err(ChartError::MissingField("field_name"));
        }
        if self.date_field.trim().is_empty() {
            return Err(ChartError::MissingField("date_field"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    fn title(&self) -> &str {
        self.field_title.as_deref().unwrap_or(&self.field_name)
    }
}

/// Builder for [`LinkedChart`]s.
#[derive(Debug, Clone, Default)]
pub struct LinkedChartBuilder {
    options: LineChartOptions,
    id: ChartId,
}

impl LinkedChartBuilder {
    /// Start a chart over a numeric field.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self::from_options(LineChartOptions {
            field_name: field_name.into(),
            ..Default::default()
        })
    }

    pub fn from_options(options: LineChartOptions) -> Self {
        Self {
            options,
            id: ChartId::default(),
        }
    }

    pub fn options(&self) -> &LineChartOptions {
        &self.options
    }

    /// Set the human readable field name.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.field_title = Some(title.into());
        self
    }

    pub fn layer(mut self, name: impl Into<String>) -> Self {
        self.options.layer_name = name.into();
        self
    }

    /// Set the timestamp field.
    pub fn date_field(mut self, field: impl Into<String>) -> Self {
        self.options.date_field = field.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options.width = width;
        self.options.height = height;
        self
    }

    /// Set the line chart transition.
    pub fn transition(mut self, duration: Duration) -> Self {
        self.options.transition = duration;
        self
    }

    pub fn controls(mut self, on: bool) -> Self {
        self.options.controls = on;
        self
    }

    pub fn elastic_y(mut self, on: bool) -> Self {
        self.options.elastic_y = on;
        self
    }

    pub fn color_scale(mut self, scale: ColorScale) -> Self {
        self.options.color_scale = scale;
        self
    }

    /// Set the id the chart is known by.
    pub fn id(mut self, id: ChartId) -> Self {
        self.id = id;
        self
    }

    /// Register the chart's dimensions and groups and build it.
    pub fn build(self, xf: &mut FilterCoordinator) -> ChartResult<LinkedChart> {
        let options = self.options;
        options.validate()?;

        let field = options.field_name.as_str();

        let time = xf.dimension(
            format!("{}:{}", options.date_field, field),
            Projection::day(options.date_field.as_str()),
        );
        let line_group = xf.group_with_scope(time, Sum::of(field), GroupScope::ExceptOwn)?;

        let readout = xf.dimension(format!("{}:readout", field), Projection::field(field));
        let readout_group = xf.group_all(readout, CountAndSum::of(field))?;

        let value = xf.dimension(format!("{}:slider", field), Projection::field(field));
        let slider_group = xf.group_with_scope(value, Count, GroupScope::ExceptOwn)?;

        let mut line = LineLayout::new(
            options.title(),
            &options.layer_name,
            options.width,
            options.height,
        );
        line.transition = options.transition;
        line.controls = options.controls;
        line.elastic_y = options.elastic_y;

        let slider = SliderLayout::new(
            options.width,
            options.height,
            xf.store().max(field),
            options.color_scale.clone(),
        );

        let x_domain = xf
            .store()
            .time_extent(&options.date_field)
            .map(|(lo, hi)| (lo.timestamp_millis() as f64, hi.timestamp_millis() as f64));

        tracing::debug!(
            chart = %self.id,
            field,
            days = xf.get_dimension(time)?.keys().len(),
            values = xf.get_dimension(value)?.keys().len(),
            "built linked chart"
        );

        let mut chart = LinkedChart {
            id: self.id,
            field_name: options.field_name.clone(),
            time,
            value,
            readout,
            line_group,
            readout_group,
            slider_group,
            line,
            readout_layout: ReadoutLayout::new(field),
            slider,
            x_domain,
            fixed_y_domain: (0.0, 0.0),
        };
        chart.fixed_y_domain = elastic_domain(&chart.line_view(xf)?.points);
        Ok(chart)
    }
}
