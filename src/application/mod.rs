//! Application Layer
//!
//! Contains the simulation harness services and the report DTOs.
//! This layer only talks to the engine through its public operations.

pub mod dto;
pub mod services;
