//! Services module
//!
//! This module contains the business logic services built around the event
//! store: remote client, sync controller, mutation coordinator, registration
//! manager, and budget tracker.

pub mod auth;
pub mod budget;
pub mod events;
pub mod registration;
pub mod remote;
pub mod sync;

// Re-export commonly used services
pub use auth::StaffContext;
pub use budget::BudgetService;
pub use events::EventCoordinator;
pub use registration::RegistrationService;
pub use remote::RemoteEventService;
pub use sync::SyncController;

use chrono::Local;
use tracing::info;

use crate::config::Settings;
use crate::models::{Event, EventStatistics};
use crate::query::{filter_events, EventFilter};
use crate::store::{baseline_events, EventStore};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub store: EventStore,
    pub remote: RemoteEventService,
    pub sync: SyncController,
    pub coordinator: EventCoordinator,
    pub registrations: RegistrationService,
    pub budget: BudgetService,
    seed_enabled: bool,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let store = EventStore::new();
        let remote = RemoteEventService::new(&settings)?;
        let sync = SyncController::new(remote.clone(), store.clone());
        let coordinator = EventCoordinator::new(remote.clone(), store.clone());
        let registrations = RegistrationService::new(
            remote.clone(),
            store.clone(),
            coordinator.clone(),
            &settings,
        );
        let budget = BudgetService::new(remote.clone(), store.clone(), coordinator.clone());

        Ok(Self {
            store,
            remote,
            sync,
            coordinator,
            registrations,
            budget,
            seed_enabled: settings.features.seed_baseline_events,
        })
    }

    /// Seed the baseline event set into an empty store (first run)
    pub async fn seed_baseline(&self) -> Result<usize> {
        if !self.seed_enabled || !self.store.is_empty().await {
            return Ok(0);
        }

        let drafts = baseline_events(Local::now().date_naive());
        let count = drafts.len();
        for draft in drafts {
            self.store.create(draft).await?;
        }
        info!(event_count = count, "Baseline event set seeded");
        Ok(count)
    }

    /// Read-only snapshot of the current event list
    pub async fn events(&self) -> Vec<Event> {
        self.store.list().await
    }

    /// Read-only filtered projection of the current event list
    pub async fn filtered_events(&self, filter: &EventFilter) -> Vec<Event> {
        let events = self.store.list().await;
        filter_events(&events, filter, Local::now().naive_local())
    }

    /// Read-only statistics summary
    pub async fn statistics(&self) -> EventStatistics {
        self.store.statistics(Local::now().naive_local()).await
    }

    /// Health snapshot for the presentation layer
    pub async fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            event_count: self.store.len().await,
            store_seeded: !self.store.is_empty().await,
        }
    }
}

/// Health status snapshot
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub event_count: usize,
    pub store_seeded: bool,
}
