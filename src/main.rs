//! # Forum Sim
//!
//! Runs a synthetic forum workload against the in-memory engine.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - The shared engine and the simulation workers

use anyhow::Result;
use tracing::info;

use forum_sim::config::Settings;
use forum_sim::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    forum_sim::telemetry::init_tracing();

    info!("Starting Forum Sim...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        users = settings.simulation.users,
        communities = settings.simulation.communities,
        workers = settings.simulation.workers,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings)?;
    let report = application.run().await?;

    println!("{}", report);

    Ok(())
}
