//! Tick, label and tooltip formatting.

use chrono::DateTime;
use std::fmt::Write;

/// Tick format of the time axis (day-month-two digit year).
pub const X_TICK_FORMAT: &str = "%d-%m-%y";

/// How a readout renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Rounded to the nearest integer.
    #[default]
    Integer,
    /// Fixed number of decimals.
    Fixed(usize),
}

impl NumberFormat {
    /// Render a value. Non-finite values render as an empty string.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        match *self {
            NumberFormat::Integer => format!("{}", value.round() as i64),
            NumberFormat::Fixed(decimals) => format!("{:.*}", decimals, value),
        }
    }
}

/// Format epoch milliseconds with a strftime pattern, `None` when the time
/// is out of range or the pattern is invalid.
pub fn format_time(millis: f64, pattern: &str) -> Option<String> {
    if !millis.is_finite() {
        return None;
    }
    let time = DateTime::from_timestamp_millis(millis as i64)?;
    let mut out = String::new();
    write!(out, "{}", time.format(pattern)).ok()?;
    Some(out)
}

/// Tooltip of one point of the time line chart.
pub fn point_tooltip(value: f64) -> String {
    format!("Total number of events: {}", value)
}
