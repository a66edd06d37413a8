//! # Domain Layer
//!
//! The domain layer contains the data model of the forum.
//! It is independent of locking, configuration and the simulation harness.
//!
//! ## Structure
//!
//! - **entities**: Users, communities, posts, comments and messages
//! - **value_objects**: Identifiers, action kinds and vote direction

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
