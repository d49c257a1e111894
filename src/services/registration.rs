//! Registration manager
//!
//! Capacity-aware registration against a single event. Preconditions
//! (registration open, deadline not passed, seat available, no duplicate
//! signup) fail the operation outright; remote-path failures degrade to the
//! local registration list.

use chrono::Local;
use tracing::{debug, info};

use crate::config::Settings;
use crate::models::{RegistrantDetails, Registration, RegistrationStatus};
use crate::services::auth::StaffContext;
use crate::services::events::EventCoordinator;
use crate::services::remote::RemoteEventService;
use crate::store::EventStore;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::logging::log_fallback;

/// Registration operations for a single event
#[derive(Clone)]
pub struct RegistrationService {
    remote: RemoteEventService,
    store: EventStore,
    coordinator: EventCoordinator,
    default_status: RegistrationStatus,
}

impl RegistrationService {
    pub fn new(
        remote: RemoteEventService,
        store: EventStore,
        coordinator: EventCoordinator,
        settings: &Settings,
    ) -> Self {
        let default_status = if settings.features.auto_confirm_registrations {
            RegistrationStatus::Confirmed
        } else {
            RegistrationStatus::Pending
        };
        Self {
            remote,
            store,
            coordinator,
            default_status,
        }
    }

    /// Register an attendee for an event.
    ///
    /// Precondition failures leave the registration collection unchanged.
    /// The local commit re-checks every precondition under the store's write
    /// lock, so two concurrent signups cannot both take the last seat.
    pub async fn register(
        &self,
        ctx: &StaffContext,
        event_id: i64,
        details: RegistrantDetails,
    ) -> Result<Registration> {
        let gate = self.coordinator.write_gate();
        let _gate = gate.lock().await;

        // Fail fast against the current snapshot before any remote call
        self.check_preconditions(event_id, &details).await?;

        if ctx.is_authorized() {
            match self.remote.register(ctx, event_id, &details).await {
                Ok(registration) => {
                    debug!(event_id = event_id, "Registration accepted by remote");
                    // Mirror the remote-accepted signup into the local set
                    let mirrored = self
                        .store
                        .add_registration(
                            event_id,
                            details,
                            registration.status,
                            Local::now().date_naive(),
                        )
                        .await?;
                    return Ok(mirrored);
                }
                Err(e) if e.triggers_fallback() => {
                    log_fallback("register", &e.to_string());
                }
                Err(e) => return Err(ShepherdError::Remote(e)),
            }
        }

        let registration = self
            .store
            .add_registration(event_id, details, self.default_status, Local::now().date_naive())
            .await?;
        info!(
            event_id = event_id,
            registration_id = %registration.id,
            staff_id = ctx.staff_id,
            "Registration committed locally"
        );
        Ok(registration)
    }

    async fn check_preconditions(&self, event_id: i64, details: &RegistrantDetails) -> Result<()> {
        let event = self.store.get(event_id).await?;

        if !event.registration_required {
            return Err(ShepherdError::PreconditionFailed(
                "Event does not take registrations".to_string(),
            ));
        }
        if let Some(deadline) = event.registration_deadline {
            if deadline < Local::now().date_naive() {
                return Err(ShepherdError::PreconditionFailed(
                    "Registration deadline has passed".to_string(),
                ));
            }
        }
        if let Some(limit) = event.capacity_limit() {
            if event.confirmed_registrations() >= limit as usize {
                return Err(ShepherdError::CapacityExceeded { event_id });
            }
        }
        let email = details.email.trim().to_lowercase();
        if event
            .registrations
            .iter()
            .any(|r| r.status != RegistrationStatus::Cancelled && r.email.to_lowercase() == email)
        {
            return Err(ShepherdError::PreconditionFailed(
                "Registrant is already signed up for this event".to_string(),
            ));
        }

        Ok(())
    }
}
