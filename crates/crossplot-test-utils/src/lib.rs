//! Test utilities for crossplot crates.
//!
//! This crate provides:
//!
//! - [`fixtures`] - Deterministic record sets, including the small store used
//!   throughout the filter docs
//! - [`reference`] - Groups recomputed from scratch, to check incremental
//!   results against
//! - [`RecordingListener`] - A filter listener that records every event it
//!   receives
//!
//! # Example
//!
//! ```rust
//! use crossplot_filter::{FilterCoordinator, FilterSpec, Projection};
//! use crossplot_filter::reducer::Sum;
//! use crossplot_test_utils::{fixtures, reference, RecordingListener};
//!
//! let mut xf = FilterCoordinator::new(fixtures::events(64, 4));
//! let day = xf.dimension("day", Projection::field("day"));
//! let sum = xf.group(day, Sum::of("value")).unwrap();
//!
//! let recorder = RecordingListener::new();
//! xf.subscribe(recorder.clone());
//!
//! xf.filter(day, FilterSpec::Exact(2.0)).unwrap();
//!
//! assert_eq!(recorder.count(), 1);
//! assert_eq!(reference::group_values(&xf, sum), reference::current_values(&xf, sum));
//! ```

pub mod fixtures;
pub mod recording;
pub mod reference;

pub use recording::{RecordedEvent, RecordingListener};
