//! Crossplot Chart - linked chart views
//!
//! This crate provides:
//! - A linked chart factory: a daily line chart, an aggregate readout and a
//!   value slider over one numeric field, all sharing one filter coordinator
//! - Renderer-ready view snapshots with change tracking
//! - A dashboard holding any number of linked charts, with brushing
//! - A view adapter seam for whatever draws the charts
//!
//! Nothing here draws pixels. Layouts carry sizes, margins, ticks and colors
//! for a renderer to honor.
//!
//! # Example
//!
//! ```
//! use crossplot_chart::*;
//! use crossplot_filter::{Record, RecordStore};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let store: RecordStore = (0..10)
//!     .map(|i| Record::new().with("dd", (i * 3_600_000) as f64).with("count", i as f64))
//!     .collect();
//!
//! let mut dashboard = Dashboard::new(store);
//! let chart = dashboard
//!     .add_chart(LinkedChartBuilder::new("count").title("Events"))
//!     .unwrap();
//!
//! let frames = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&frames);
//! dashboard.attach(move |view: &ChartView| sink.borrow_mut().push(view.readout.text.clone()));
//!
//! dashboard.brush_value(chart, 5.0..10.0).unwrap();
//!
//! assert_eq!(*frames.borrow(), vec!["45".to_string(), "35".to_string()]);
//! ```

mod adapter;
mod builder;
mod chart;
mod color;
mod dashboard;
mod dirty;
mod error;
pub mod format;
mod indicator;
mod layout;
mod types;
mod view;

pub use adapter::ViewAdapter;
pub use builder::*;
pub use chart::LinkedChart;
pub use color::*;
pub use dashboard::Dashboard;
pub use dirty::*;
pub use error::{ChartError, ChartResult};
pub use indicator::FilterIndicator;
pub use layout::*;
pub use types::*;
pub use view::*;
