//! Registration model
//!
//! A registration is a person's signup record against exactly one event. The
//! owning event cascades deletion to its registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A committed signup against one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requirements: Option<String>,
    pub status: RegistrationStatus,
    /// System-assigned submission time
    pub registered_at: DateTime<Utc>,
}

/// Registrant details supplied at signup time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrantDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requirements: Option<String>,
}

impl RegistrantDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            special_requirements: None,
        }
    }
}
