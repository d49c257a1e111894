//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub service: EventServiceConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Remote event service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// New registrations are committed as Confirmed rather than Pending
    pub auto_confirm_registrations: bool,
    /// Seed the baseline event set on first run
    pub seed_baseline_events: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SHEPHERD"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ShepherdError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service: EventServiceConfig {
                base_url: "http://localhost:8080/api".to_string(),
                timeout_seconds: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/shepherd".to_string(),
            },
            features: FeaturesConfig {
                auto_confirm_registrations: true,
                seed_baseline_events: true,
            },
        }
    }
}
