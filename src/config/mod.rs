//! Configuration module
//!
//! Settings loading and validation.

pub mod settings;
pub mod validation;

pub use settings::{EventServiceConfig, FeaturesConfig, LoggingConfig, Settings};
