//! Core chart types.

/// Identifies a linked chart within its dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChartId(pub u32);

impl ChartId {
    /// Create a chart ID from an index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the chart in its dashboard.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chart#{}", self.0)
    }
}

/// A data point in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl DataPoint {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Space between the chart bounds and its plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    /// Margins of the time line chart.
    pub const LINE: Margins = Margins::new(0, 50, 50, 50);
    /// Margins of the value slider.
    pub const SLIDER: Margins = Margins::new(0, 10, 30, 4);

    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Plot area left inside a `width` x `height` chart.
    pub fn inner(&self, width: u32, height: u32) -> (u32, u32) {
        (
            width.saturating_sub(self.left + self.right),
            height.saturating_sub(self.top + self.bottom),
        )
    }
}

bitflags::bitflags! {
    /// Grid lines drawn behind a chart.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GridLines: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}

/// A closed interval highlighted by a brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub start: f64,
    pub end: f64,
}

impl Brush {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_size() {
        assert_eq!(Margins::LINE.inner(300, 200), (200, 150));
        assert_eq!(Margins::SLIDER.inner(125, 66), (111, 36));
        assert_eq!(Margins::LINE.inner(60, 10), (0, 0));
    }

    #[test]
    fn test_chart_id_display() {
        assert_eq!(ChartId::from_index(3).to_string(), "chart#3");
        assert_eq!(ChartId(2).index(), 2);
    }
}
