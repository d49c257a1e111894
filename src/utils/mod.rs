//! Utility modules
//!
//! Shared error types, cancellation primitives, and logging helpers.

pub mod cancel;
pub mod errors;
pub mod logging;

pub use cancel::CancellationToken;
pub use errors::{RemoteError, RemoteResult, Result, ShepherdError};
