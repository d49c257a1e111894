//! Event coordinator
//!
//! Dual-path create/update/delete: the remote event service is tried first
//! when a credential is present, and any fallback-triggering failure degrades
//! to the equivalent local mutation. The local write is the designed behavior
//! under degradation, not an error state, so it is logged as informational.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::{Event, EventDraft, EventPatch};
use crate::services::auth::StaffContext;
use crate::services::remote::RemoteEventService;
use crate::store::EventStore;
use crate::utils::errors::{Result, ShepherdError};
use crate::utils::logging::log_fallback;

/// Coordinates event mutations across the remote and local paths
#[derive(Clone)]
pub struct EventCoordinator {
    remote: RemoteEventService,
    store: EventStore,
    /// FIFO gate: mutations commit in invocation order even when their
    /// remote counterparts resolve out of order
    write_gate: Arc<Mutex<()>>,
}

impl EventCoordinator {
    pub fn new(remote: RemoteEventService, store: EventStore) -> Self {
        Self {
            remote,
            store,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub(crate) fn write_gate(&self) -> Arc<Mutex<()>> {
        self.write_gate.clone()
    }

    /// Create an event, remote-first with local fallback
    pub async fn create_event(&self, ctx: &StaffContext, draft: EventDraft) -> Result<Event> {
        crate::store::event_store::validate_draft(&draft)?;
        let _gate = self.write_gate.lock().await;

        if ctx.is_authorized() {
            match self.remote.create_event(ctx, &draft).await {
                Ok(event) => {
                    debug!(event_id = event.id, "Event created on remote");
                    self.store.upsert(event.clone()).await;
                    return Ok(event);
                }
                Err(e) if e.triggers_fallback() => {
                    log_fallback("create_event", &e.to_string());
                }
                Err(e) => return Err(ShepherdError::Remote(e)),
            }
        }

        let event = self.store.create(draft).await?;
        info!(event_id = event.id, staff_id = ctx.staff_id, "Event created locally");
        Ok(event)
    }

    /// Update an event, remote-first with local fallback.
    ///
    /// The status transition guard is applied before either path so the two
    /// paths cannot diverge on what they accept.
    pub async fn update_event(
        &self,
        ctx: &StaffContext,
        id: i64,
        patch: EventPatch,
    ) -> Result<Event> {
        let _gate = self.write_gate.lock().await;

        if let Some(next_status) = patch.status {
            let current = self.store.get(id).await?;
            if !current.status.can_transition_to(next_status) && !ctx.can_reopen_events() {
                return Err(ShepherdError::InvalidStateTransition {
                    from: current.status.to_string(),
                    to: next_status.to_string(),
                });
            }
        }

        if ctx.is_authorized() {
            match self.remote.update_event(ctx, id, &patch).await {
                Ok(event) => {
                    debug!(event_id = id, "Event updated on remote");
                    self.store.upsert(event.clone()).await;
                    return Ok(event);
                }
                Err(e) if e.triggers_fallback() => {
                    log_fallback("update_event", &e.to_string());
                }
                Err(e) => return Err(ShepherdError::Remote(e)),
            }
        }

        let event = self
            .store
            .update(id, patch, ctx.can_reopen_events())
            .await?;
        info!(event_id = id, staff_id = ctx.staff_id, "Event updated locally");
        Ok(event)
    }

    /// Delete an event, remote-first with local fallback; cascades to the
    /// event's registrations and expenses on both paths.
    pub async fn delete_event(&self, ctx: &StaffContext, id: i64) -> Result<()> {
        let _gate = self.write_gate.lock().await;

        // Fail fast with NotFound before touching the remote
        self.store.get(id).await?;

        if ctx.is_authorized() {
            match self.remote.delete_event(ctx, id).await {
                Ok(_) => {
                    debug!(event_id = id, "Event deleted on remote");
                }
                Err(e) if e.triggers_fallback() => {
                    log_fallback("delete_event", &e.to_string());
                }
                Err(e) => return Err(ShepherdError::Remote(e)),
            }
        }

        self.store.delete(id).await?;
        info!(event_id = id, staff_id = ctx.staff_id, "Event deleted");
        Ok(())
    }
}
