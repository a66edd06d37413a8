//! # Configuration Module
//!
//! This module handles simulation configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus SIM_USERS, SIM_COMMUNITIES, SIM_SEED)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_sim::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Simulating {} users", settings.simulation.users);
//! ```

mod settings;

pub use settings::*;
