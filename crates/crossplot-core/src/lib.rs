//! Crossplot Core
//!
//! Shared plumbing for the crossplot crates: logging, profiling,
//! configuration and hash collections.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod profiling;
