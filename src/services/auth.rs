//! Staff capability context
//!
//! Core operations never read ambient session state. Every operation receives
//! an explicit [`StaffContext`] describing who is acting and which remote
//! credential, if any, they carry. An absent or expired credential is treated
//! exactly like an unreachable remote for fallback purposes.

use chrono::{DateTime, Utc};
use tracing::debug;

/// Capability object passed into every core operation
#[derive(Debug, Clone)]
pub struct StaffContext {
    pub staff_id: i64,
    credential: Option<Credential>,
    /// Permission to move completed/cancelled events back to Planned
    can_reopen_events: bool,
}

#[derive(Debug, Clone)]
struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl StaffContext {
    /// Context with no remote credential; all operations stay local
    pub fn local(staff_id: i64) -> Self {
        Self {
            staff_id,
            credential: None,
            can_reopen_events: false,
        }
    }

    /// Context carrying a bearer credential for the remote event service
    pub fn authorized(staff_id: i64, token: impl Into<String>) -> Self {
        Self {
            staff_id,
            credential: Some(Credential {
                token: token.into(),
                expires_at: None,
            }),
            can_reopen_events: false,
        }
    }

    /// Set an expiry on the carried credential
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        if let Some(credential) = &mut self.credential {
            credential.expires_at = Some(expires_at);
        }
        self
    }

    /// Grant the reopen-events capability
    pub fn with_reopen_capability(mut self) -> Self {
        self.can_reopen_events = true;
        self
    }

    /// Whether a valid, unexpired credential is present
    pub fn is_authorized(&self) -> bool {
        match &self.credential {
            Some(credential) => match credential.expires_at {
                Some(expires_at) => expires_at > Utc::now(),
                None => true,
            },
            None => {
                debug!(staff_id = self.staff_id, "No remote credential present");
                false
            }
        }
    }

    /// Bearer token for remote calls, when still valid
    pub fn bearer_token(&self) -> Option<&str> {
        if self.is_authorized() {
            self.credential.as_ref().map(|c| c.token.as_str())
        } else {
            None
        }
    }

    pub fn can_reopen_events(&self) -> bool {
        self.can_reopen_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_local_context_is_unauthorized() {
        let ctx = StaffContext::local(1);
        assert!(!ctx.is_authorized());
        assert!(ctx.bearer_token().is_none());
    }

    #[test]
    fn test_expired_credential_is_unauthorized() {
        let ctx = StaffContext::authorized(1, "token")
            .with_expiry(Utc::now() - Duration::minutes(5));
        assert!(!ctx.is_authorized());
        assert!(ctx.bearer_token().is_none());
    }

    #[test]
    fn test_live_credential_is_authorized() {
        let ctx = StaffContext::authorized(1, "token")
            .with_expiry(Utc::now() + Duration::hours(1));
        assert!(ctx.is_authorized());
        assert_eq!(ctx.bearer_token(), Some("token"));
    }

    #[test]
    fn test_reopen_capability_defaults_off() {
        assert!(!StaffContext::authorized(1, "token").can_reopen_events());
        assert!(StaffContext::authorized(1, "token")
            .with_reopen_capability()
            .can_reopen_events());
    }
}
