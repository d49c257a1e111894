//! Data sync controller
//!
//! Produces an up-to-date event collection by preferring the remote event
//! service when reachable and authorized, and transparently retaining the
//! local set otherwise. A sync cycle never surfaces a remote failure to the
//! caller and never leaves the store empty or torn.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::services::auth::StaffContext;
use crate::services::remote::RemoteEventService;
use crate::store::EventStore;
use crate::utils::cancel::CancellationToken;
use crate::utils::errors::Result;

/// Orchestrates cancellable fetch-or-fallback cycles against the remote
/// event service.
#[derive(Clone)]
pub struct SyncController {
    remote: RemoteEventService,
    store: EventStore,
    /// Token of the most recently issued sync; superseded by each refresh
    active: Arc<Mutex<Option<CancellationToken>>>,
}

impl SyncController {
    pub fn new(remote: RemoteEventService, store: EventStore) -> Self {
        Self {
            remote,
            store,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Issue a new sync cycle, superseding any still-running one.
    ///
    /// The previously issued token is cancelled first, so an older in-flight
    /// cycle that loses the race commits nothing.
    pub async fn refresh(&self, ctx: &StaffContext) -> Result<CancellationToken> {
        let token = CancellationToken::new();
        {
            let mut active = self.active.lock().await;
            if let Some(previous) = active.replace(token.clone()) {
                previous.cancel();
            }
        }
        self.sync(ctx, &token).await?;
        Ok(token)
    }

    /// Run one fetch-or-fallback cycle.
    ///
    /// The token is checked before the remote calls are issued and again
    /// before the store commit; a cancelled cycle performs no mutation.
    /// Remote failures degrade to the current local set with locally
    /// recomputed statistics, they are never raised to the caller.
    pub async fn sync(&self, ctx: &StaffContext, token: &CancellationToken) -> Result<()> {
        if token.is_cancelled() {
            debug!("Sync cancelled before remote fetch");
            return Ok(());
        }

        if !ctx.is_authorized() {
            debug!(staff_id = ctx.staff_id, "No valid credential, keeping local event set");
            self.recompute_local().await;
            return Ok(());
        }

        let (events, statistics) = tokio::join!(
            self.remote.list_events(ctx),
            self.remote.fetch_statistics(ctx)
        );

        if token.is_cancelled() {
            debug!("Sync cancelled before store commit, discarding remote result");
            return Ok(());
        }

        match (events, statistics) {
            (Ok(events), Ok(statistics)) => {
                info!(event_count = events.len(), "Sync committed remote event set");
                self.store.replace_all(events, statistics).await;
            }
            (events, statistics) => {
                if let Err(e) = &events {
                    warn!(error = %e, "Event list fetch failed, retaining local set");
                }
                if let Err(e) = &statistics {
                    warn!(error = %e, "Statistics fetch failed, recomputing locally");
                }
                // Keep list and summary describing the same world even when
                // they fell back for different reasons
                self.recompute_local().await;
            }
        }

        Ok(())
    }

    async fn recompute_local(&self) {
        let stats = self
            .store
            .recompute_statistics(Local::now().naive_local())
            .await;
        debug!(total_events = stats.total_events, "Statistics recomputed from local set");
    }
}
