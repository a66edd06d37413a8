//! # Forum Sim Library
//!
//! This crate provides an in-memory social forum engine with:
//! - Users, communities, posts, threaded comments, votes and direct messages
//! - Aggregate activity counters kept consistent under concurrent access
//! - A seeded, multi-worker activity simulator and an end-of-run report
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities and value objects
//! - **Engine**: The single shared store behind one lock, with its operations
//! - **Application Layer**: Simulation driver and report services
//! - **Infrastructure Layer**: Prometheus export of the counters
//!
//! ## Module Structure
//!
//! ```text
//! forum_sim/
//! +-- config/         Configuration management
//! +-- domain/         Entities and value objects
//! +-- engine/         Store, id allocation, counters and operations
//! +-- application/    Simulation and report services, report DTOs
//! +-- infrastructure/ Metrics export
//! +-- shared/         Errors and validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Data model
pub mod domain;

// Engine - Shared store and operations
pub mod engine;

// Application layer - Simulation harness
pub mod application;

// Infrastructure layer - External integrations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Application startup
pub mod startup;

// Telemetry and observability
pub mod telemetry;

pub use engine::Engine;
pub use shared::error::{AppError, EngineError};
