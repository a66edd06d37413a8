//! # Infrastructure Layer
//!
//! Integrations that sit beside the engine rather than inside it.
//!
//! ## Components
//!
//! - **metrics**: Prometheus export of the aggregate counters

pub mod metrics;
