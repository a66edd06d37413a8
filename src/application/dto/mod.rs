//! Data Transfer Objects
//!
//! DTOs for report rendering.

pub mod report;

pub use report::{
    CommunityStats, FeedPost, FeedView, KarmaEntry, MessageLine, SimulationReport, ThreadLine,
};
