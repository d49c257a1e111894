//! Event store module
//!
//! Canonical in-memory event collection and the fixed baseline seed set.

pub mod event_store;
pub mod seed;

pub use event_store::EventStore;
pub use seed::baseline_events;
