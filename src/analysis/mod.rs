//! Analysis modules.
//!
//! `metrics` holds the primitive operations (pivot lookup, percentage
//! improvement, extrema, mean); `observations` combines them into the
//! values the report and console statistics quote.

pub mod metrics;
pub mod observations;

pub use metrics::*;
pub use observations::*;
