//! Shepherd event engine
//!
//! Main application entry point: loads configuration, seeds the baseline
//! event set, runs one sync cycle against the remote event service, and logs
//! the resulting summary.

use tracing::info;

use Shepherd::{config::Settings, utils::logging, ServiceFactory, StaffContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new().unwrap_or_default();
    settings.validate()?;

    // Initialize logging; the guard must outlive the run
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting Shepherd event engine...");

    let services = ServiceFactory::new(settings)?;

    let seeded = services.seed_baseline().await?;
    if seeded > 0 {
        info!(seeded = seeded, "First run, baseline events seeded");
    }

    // Without a credential the sync keeps the local set; with one it prefers
    // the remote event service
    let ctx = match std::env::var("SHEPHERD_API_TOKEN") {
        Ok(token) => StaffContext::authorized(0, token),
        Err(_) => StaffContext::local(0),
    };
    services.sync.refresh(&ctx).await?;

    let stats = services.statistics().await;
    info!(
        total_events = stats.total_events,
        upcoming = stats.upcoming_events,
        this_week = stats.events_this_week,
        registrations = stats.total_registrations,
        total_budget = stats.total_budget,
        total_spent = stats.total_spent,
        "Event summary"
    );

    info!("Shepherd event engine finished.");
    Ok(())
}
