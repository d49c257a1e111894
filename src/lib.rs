//! Shepherd event engine
//!
//! Event lifecycle and data-reconciliation core for a church administration
//! application. This library maintains a consistent in-memory view of
//! scheduled events under an unreliable remote data source, derives filtered
//! views and budget/statistics summaries from it, and runs capacity-bounded
//! attendee registration.

#![allow(non_snake_case)]

pub mod config;
pub mod models;
pub mod query;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::cancel::CancellationToken;
pub use utils::errors::{RemoteError, Result, ShepherdError};

// Re-export main components for easy access
pub use services::{ServiceFactory, StaffContext};
pub use store::EventStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
