//! Application Startup
//!
//! Application building and simulation run.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::services::{collect_report, render_report, SimulationDriver};
use crate::config::Settings;
use crate::engine::Engine;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Application instance
pub struct Application {
    engine: Arc<Engine>,
    settings: Settings,
}

impl Application {
    /// Build the application from settings
    pub fn build(settings: Settings) -> Result<Self, AppError> {
        settings.validate()?;

        let engine = Arc::new(Engine::new());
        tracing::info!(started_at = %engine.started_at(), "Engine created");

        Ok(Self { engine, settings })
    }

    /// Shared engine handle
    pub fn engine(&self) -> Arc<Engine> {
        self.engine.clone()
    }

    /// Run the simulation and return the rendered report
    pub async fn run(self) -> Result<String, AppError> {
        let driver = SimulationDriver::new(self.engine.clone(), self.settings.simulation.clone());
        let outcome = driver.run().await?;

        // Same seed as the run, so the featured feed is reproducible
        let mut rng = StdRng::seed_from_u64(outcome.seed);
        let report = collect_report(&self.engine, &self.settings.report, &mut rng)?;

        let mut rendered = render_report(&report, self.settings.report.format)?;

        if self.settings.report.include_metrics {
            metrics::record_counters(&report.counters, report.users, report.communities);
            rendered.push('\n');
            rendered.push_str(&metrics::gather_metrics());
        }

        Ok(rendered)
    }
}
