//! Crossplot - incremental crossfilter-style aggregation for linked charts
//!
//! Crossplot keeps aggregates over a fixed record set in sync with a set of
//! composable filters:
//!
//! - **Dimensions**: records indexed by a projected numeric key (a field, or
//!   a timestamp bucketed by day), each with at most one active filter
//! - **Groups**: per-key or scalar accumulators updated incrementally as
//!   records enter and leave the visible set
//! - **Listeners**: notified once per filter change, after every group has
//!   settled
//! - **Linked charts** (`chart` feature): a daily line chart, an aggregate
//!   readout and a value slider per numeric field, brushing each other
//!
//! # Quick Start
//!
//! ```
//! use crossplot::prelude::*;
//!
//! let store: RecordStore = (0..20)
//!     .map(|i| Record::new().with("day", (i % 4) as f64).with("val", i as f64))
//!     .collect();
//!
//! let mut xf = FilterCoordinator::new(store);
//! let day = xf.dimension("day", Projection::field("day"));
//! let val = xf.dimension("val", Projection::field("val"));
//! let per_day = xf.group(day, CountAndSum::of("val")).unwrap();
//!
//! xf.filter(val, 10.0..20.0).unwrap();
//!
//! let acc = xf.value(per_day, 0.0).unwrap().unwrap();
//! assert_eq!(acc.count, 2);
//! assert_eq!(acc.sum, 12.0 + 16.0);
//! ```

// Re-export core types
pub use crossplot_core as core;
pub use crossplot_core::config::{Config, ProfilingMode};

// Re-export sub-crates
pub use crossplot_filter as filter;

#[cfg(feature = "chart")]
pub use crossplot_chart as chart;

/// Install logging and profiling as configured.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init(config: &Config) {
    config.apply();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "crossplot initialized");
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Config, ProfilingMode, init};

    pub use crossplot_filter::reducer::{Count, CountAndSum, CountSum, ReduceFns, Reducer, Sum};
    pub use crossplot_filter::{
        Dimension, DimensionId, FilterCoordinator, FilterError, FilterEvent, FilterListener,
        FilterOutcome, FilterResult, FilterSpec, Group, GroupAll, GroupAllId, GroupId, GroupScope,
        Key, Projection, Record, RecordStore, Value,
    };

    #[cfg(feature = "chart")]
    pub use crossplot_chart::{
        ChartError, ChartId, ChartResult, ChartView, Dashboard, DataPoint, FilterIndicator,
        LineChartOptions, LinkedChart, LinkedChartBuilder, ViewAdapter, ViewDirty,
    };
}
