//! Static presentation settings of the three linked views.
//!
//! These never change after a chart is built; the per-filter data lives in
//! [`crate::view`].

use crate::color::{Color, ColorScale, SLIDER_BACKGROUND};
use crate::format::{NumberFormat, X_TICK_FORMAT};
use crate::types::{GridLines, Margins};
use std::time::Duration;

/// The time line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Heading shown above the chart, e.g. "Casualties over time".
    pub title: String,
    /// Heading including the layer name.
    pub chart_title: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    pub transition: Duration,
    pub grid: GridLines,
    /// Rescale the y axis to the visible data on every update.
    pub elastic_y: bool,
    pub brush_on: bool,
    pub y_ticks: usize,
    pub x_tick_format: String,
    /// Show the reset/filter controls.
    pub controls: bool,
}

impl LineLayout {
    pub(crate) fn new(title: &str, layer: &str, width: u32, height: u32) -> Self {
        let title = format!("{} over time", title);
        Self {
            chart_title: format!("{} ({})", title, layer),
            y_label: format!("no. of {}", title),
            title,
            width,
            height,
            margins: Margins::LINE,
            transition: Duration::from_millis(750),
            grid: GridLines::all(),
            elastic_y: true,
            brush_on: true,
            y_ticks: 3,
            x_tick_format: X_TICK_FORMAT.to_string(),
            controls: false,
        }
    }
}

/// The aggregate number readout.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadoutLayout {
    pub title: String,
    pub format: NumberFormat,
}

impl ReadoutLayout {
    pub(crate) fn new(field: &str) -> Self {
        Self {
            title: format!("Aggregate count in: '{}'", field),
            format: NumberFormat::Integer,
        }
    }
}

/// Rectangle painted behind the slider body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub fill: Color,
    pub width: u32,
    pub height: u32,
}

/// The value slider chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderLayout {
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    pub transition: Duration,
    pub x_ticks: usize,
    /// `[0, max + 1]` over the field's finite values.
    pub x_domain: (f64, f64),
    pub colors: ColorScale,
    pub background: Background,
}

impl SliderLayout {
    pub const WIDTH: u32 = 125;

    pub(crate) fn new(
        line_width: u32,
        line_height: u32,
        max: Option<f64>,
        colors: ColorScale,
    ) -> Self {
        Self {
            width: Self::WIDTH,
            height: line_height / 3,
            margins: Margins::SLIDER,
            transition: Duration::from_millis(500),
            x_ticks: 3,
            x_domain: (0.0, max.unwrap_or(0.0) + 1.0),
            colors,
            background: Background {
                fill: Color::from_hex(SLIDER_BACKGROUND),
                width: line_width,
                height: line_height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_texts() {
        let layout = LineLayout::new("Casualties", "Incidents", 300, 200);
        assert_eq!(layout.title, "Casualties over time");
        assert_eq!(layout.chart_title, "Casualties over time (Incidents)");
        assert_eq!(layout.y_label, "no. of Casualties over time");
        assert_eq!(layout.grid, GridLines::HORIZONTAL | GridLines::VERTICAL);
        assert_eq!(layout.transition, Duration::from_millis(750));
    }

    #[test]
    fn test_slider_geometry() {
        let layout = SliderLayout::new(300, 200, Some(41.0), ColorScale::default());
        assert_eq!((layout.width, layout.height), (125, 66));
        assert_eq!(layout.x_domain, (0.0, 42.0));
        assert_eq!(layout.background.fill.to_hex(), 0x3e4651);
        assert_eq!((layout.background.width, layout.background.height), (300, 200));

        let empty = SliderLayout::new(300, 200, None, ColorScale::default());
        assert_eq!(empty.x_domain, (0.0, 1.0));
    }

    #[test]
    fn test_readout_title() {
        assert_eq!(ReadoutLayout::new("deaths").title, "Aggregate count in: 'deaths'");
    }
}
