//! Error handling for Shepherd
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Shepherd application
#[derive(Error, Debug)]
pub enum ShepherdError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Registration capacity exceeded for event {event_id}")]
    CapacityExceeded { event_id: i64 },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Event service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Remote event service specific errors
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Event service credential missing or rejected")]
    Unauthorized,

    #[error("Event service unreachable")]
    Unreachable,

    #[error("Event service timeout")]
    Timeout,

    #[error("Event service failure: {0}")]
    ServerError(String),

    #[error("Resource not found on event service")]
    NotFound,

    #[error("Event service rejected the request: {0}")]
    Validation(String),

    #[error("Invalid event service response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for Shepherd operations
pub type Result<T> = std::result::Result<T, ShepherdError>;

/// Result type alias for remote event service calls
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

impl RemoteError {
    /// Whether this failure should be absorbed by falling back to the local
    /// event set. Authorization and transport failures degrade gracefully;
    /// the remote actively rejecting the request data does not.
    pub fn triggers_fallback(&self) -> bool {
        match self {
            RemoteError::Unauthorized => true,
            RemoteError::Unreachable => true,
            RemoteError::Timeout => true,
            RemoteError::ServerError(_) => true,
            RemoteError::InvalidResponse(_) => true,
            RemoteError::NotFound => false,
            RemoteError::Validation(_) => false,
        }
    }
}

impl ShepherdError {
    /// Check if the error is recoverable by degrading to local data
    pub fn is_recoverable(&self) -> bool {
        match self {
            ShepherdError::Validation(_) => false,
            ShepherdError::EventNotFound { .. } => false,
            ShepherdError::PreconditionFailed(_) => false,
            ShepherdError::CapacityExceeded { .. } => false,
            ShepherdError::InvalidStateTransition { .. } => false,
            ShepherdError::Remote(e) => e.triggers_fallback(),
            ShepherdError::Http(_) => true,
            ShepherdError::Serialization(_) => false,
            ShepherdError::Config(_) => false,
            ShepherdError::UrlParse(_) => false,
            ShepherdError::Cancelled => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ShepherdError::Config(_) => ErrorSeverity::Critical,
            ShepherdError::Remote(_) | ShepherdError::Http(_) => ErrorSeverity::Warning,
            ShepherdError::Cancelled => ErrorSeverity::Info,
            ShepherdError::Validation(_) | ShepherdError::PreconditionFailed(_) => {
                ErrorSeverity::Info
            }
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_predicate() {
        assert!(RemoteError::Unauthorized.triggers_fallback());
        assert!(RemoteError::Unreachable.triggers_fallback());
        assert!(RemoteError::Timeout.triggers_fallback());
        assert!(RemoteError::ServerError("500".to_string()).triggers_fallback());

        assert!(!RemoteError::NotFound.triggers_fallback());
        assert!(!RemoteError::Validation("bad title".to_string()).triggers_fallback());
    }

    #[test]
    fn test_blocking_errors_are_not_recoverable() {
        assert!(!ShepherdError::Validation("title required".to_string()).is_recoverable());
        assert!(!ShepherdError::EventNotFound { event_id: 7 }.is_recoverable());
        assert!(!ShepherdError::PreconditionFailed("deadline passed".to_string()).is_recoverable());
        assert!(!ShepherdError::CapacityExceeded { event_id: 7 }.is_recoverable());

        assert!(ShepherdError::Remote(RemoteError::Unreachable).is_recoverable());
        assert!(ShepherdError::Cancelled.is_recoverable());
    }
}
