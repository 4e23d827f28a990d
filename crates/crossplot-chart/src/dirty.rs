//! Change tracking between successive views of a chart.

use crossplot_filter::FilterSpec;

bitflags::bitflags! {
    /// Which parts of a linked chart changed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewDirty: u8 {
        /// Line chart points changed.
        const LINE = 0b0000_0001;
        /// Readout value changed.
        const READOUT = 0b0000_0010;
        /// Slider points changed.
        const SLIDER = 0b0000_0100;
        /// One of the chart's own brushes moved.
        const BRUSH = 0b0000_1000;
    }
}

impl ViewDirty {
    /// Check if any chart data needs to be redrawn.
    pub fn needs_data_redraw(&self) -> bool {
        self.intersects(Self::LINE | Self::READOUT | Self::SLIDER)
    }

    /// Check if only a brush moved.
    pub fn is_brush_only(&self) -> bool {
        *self == Self::BRUSH
    }
}

/// Versions observed when a chart was last reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewVersions {
    pub line: Option<u64>,
    pub readout: Option<u64>,
    pub slider: Option<u64>,
    pub time_filter: Option<FilterSpec>,
    pub value_filter: Option<FilterSpec>,
}

impl ViewVersions {
    /// Record the current state and return what differs from the previous.
    pub fn update(&mut self, current: ViewVersions) -> ViewDirty {
        let mut dirty = ViewDirty::empty();
        if self.line != current.line {
            dirty |= ViewDirty::LINE;
        }
        if self.readout != current.readout {
            dirty |= ViewDirty::READOUT;
        }
        if self.slider != current.slider {
            dirty |= ViewDirty::SLIDER;
        }
        if self.time_filter != current.time_filter || self.value_filter != current.value_filter {
            dirty |= ViewDirty::BRUSH;
        }
        *self = current;
        dirty
    }
}
