//! Crossplot Filter - incremental multi-dimensional filtering
//!
//! This crate provides:
//! - An immutable record store shared by every dimension
//! - Dimensions: records indexed by a projected numeric key, each with at
//!   most one active filter (exact value, range or predicate)
//! - Groups: per-key or scalar accumulators driven by invertible reducers
//! - A coordinator that applies filter changes incrementally and notifies
//!   listeners once per change
//!
//! # Example
//!
//! ```
//! use crossplot_filter::*;
//! use crossplot_filter::reducer::{Count, Sum};
//!
//! let store: RecordStore = (0..10)
//!     .map(|i| Record::new().with("day", (i % 3) as f64).with("val", i as f64))
//!     .collect();
//!
//! let mut xf = FilterCoordinator::new(store);
//! let day = xf.dimension("day", Projection::field("day"));
//! let val = xf.dimension("val", Projection::field("val"));
//!
//! let per_day = xf.group(day, Sum::of("val")).unwrap();
//! let visible = xf.group_all(val, Count).unwrap();
//!
//! xf.filter(val, 5.0..10.0).unwrap();
//!
//! assert_eq!(*xf.value_all(visible).unwrap(), 5);
//! assert_eq!(xf.value(per_day, 0.0).unwrap(), Some(&(6.0 + 9.0)));
//! ```

// Data
mod key;
mod record;
mod store;

// Indexing and filtering
mod dimension;
mod filter;

// Aggregation
mod group;
pub mod reducer;

// Coordination
mod coordinator;
mod error;
mod event;

pub use key::*;
pub use record::*;
pub use store::*;

pub use dimension::{Dimension, DimensionId};
pub use filter::FilterSpec;

pub use group::{Group, GroupAll, GroupAllId, GroupId, GroupScope};
pub use reducer::{Count, CountAndSum, CountSum, Reducer, Sum};

pub use coordinator::FilterCoordinator;
pub use error::{FilterError, FilterResult};
pub use event::{FilterEvent, FilterListener, FilterOutcome};
