//! Simulation settings and configuration structures.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Activity generator configuration
    pub simulation: SimulationSettings,

    /// End-of-run report configuration
    pub report: ReportSettings,

    /// Current environment (development, test, production)
    pub environment: String,
}

/// Activity generator configuration.
///
/// Probabilities are applied per simulated user (or per post/comment where
/// noted) and must lie in `[0, 1]`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SimulationSettings {
    /// Number of users to register
    #[validate(range(min = 1, message = "must simulate at least one user"))]
    pub users: usize,

    /// Number of communities to create up front
    #[validate(range(min = 1, message = "must create at least one community"))]
    pub communities: usize,

    /// Concurrent workers sharing the engine
    #[validate(range(min = 1, max = 256, message = "must be between 1 and 256"))]
    pub workers: usize,

    /// RNG seed; a random seed is drawn when absent
    pub seed: Option<u64>,

    /// Chance a single vote is an upvote
    #[validate(range(min = 0.0, max = 1.0, message = "must be a probability"))]
    pub upvote_probability: f64,

    /// Chance a post gets reposted
    #[validate(range(min = 0.0, max = 1.0, message = "must be a probability"))]
    pub repost_probability: f64,

    /// Chance a user sends a direct message
    #[validate(range(min = 0.0, max = 1.0, message = "must be a probability"))]
    pub message_probability: f64,

    /// Chance a user answers the latest message in their inbox
    #[validate(range(min = 0.0, max = 1.0, message = "must be a probability"))]
    pub reply_probability: f64,

    /// Chance a user ends the run disconnected
    #[validate(range(min = 0.0, max = 1.0, message = "must be a probability"))]
    pub disconnect_probability: f64,

    /// Chance a user leaves one of their communities again
    #[validate(range(min = 0.0, max = 1.0, message = "must be a probability"))]
    pub leave_probability: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            users: 100,
            communities: 10,
            workers: 4,
            seed: None,
            upvote_probability: 0.7,
            repost_probability: 0.1,
            message_probability: 0.2,
            reply_probability: 0.1,
            disconnect_probability: 0.2,
            leave_probability: 0.05,
        }
    }
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// End-of-run report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Number of users in the karma leaderboard
    pub leaderboard_size: usize,

    /// Text or JSON output
    pub format: ReportFormat,

    /// Append the Prometheus exposition of the counters
    pub include_metrics: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            leaderboard_size: 10,
            format: ReportFormat::Text,
            include_metrics: false,
        }
    }
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if configuration cannot be loaded or parsed,
    /// or `AppError::Validation` if a simulation parameter is out of range.
    pub fn load() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());
        let defaults = SimulationSettings::default();
        let report = ReportSettings::default();

        let settings: Settings = Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("simulation.users", defaults.users as u64)?
            .set_default("simulation.communities", defaults.communities as u64)?
            .set_default("simulation.workers", defaults.workers as u64)?
            .set_default("simulation.upvote_probability", defaults.upvote_probability)?
            .set_default("simulation.repost_probability", defaults.repost_probability)?
            .set_default("simulation.message_probability", defaults.message_probability)?
            .set_default("simulation.reply_probability", defaults.reply_probability)?
            .set_default(
                "simulation.disconnect_probability",
                defaults.disconnect_probability,
            )?
            .set_default("simulation.leave_probability", defaults.leave_probability)?
            .set_default("report.leaderboard_size", report.leaderboard_size as u64)?
            .set_default("report.format", "text")?
            .set_default("report.include_metrics", report.include_metrics)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SIMULATION__USERS=500 -> simulation.users = 500
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("simulation.users", std::env::var("SIM_USERS").ok())?
            .set_override_option(
                "simulation.communities",
                std::env::var("SIM_COMMUNITIES").ok(),
            )?
            .set_override_option("simulation.seed", std::env::var("SIM_SEED").ok())?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check every bounded parameter.
    pub fn validate(&self) -> Result<(), AppError> {
        self.simulation.validate().map_err(validation_error)
    }
}
