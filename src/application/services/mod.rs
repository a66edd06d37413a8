//! Application Services
//!
//! Harness services that drive the engine and summarise its state.
//!
//! ## Available Services
//!
//! - **SimulationService**: Concurrent synthetic activity generator
//! - **ReportService**: End-of-run report assembly and rendering

pub mod report_service;
pub mod simulation_service;

// Re-export simulation service types
pub use simulation_service::{SimulationDriver, SimulationOutcome};

// Re-export report service types
pub use report_service::{collect_report, community_stats, leaderboard, render_report};
