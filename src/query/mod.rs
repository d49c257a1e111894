//! Query modules
//!
//! Pure, read-only projections over the event store: facet filtering and
//! summary statistics. Nothing in this module mutates events.

pub mod filter;
pub mod stats;

pub use filter::{filter_events, DateRange, EventFilter};
pub use stats::compute_statistics;
