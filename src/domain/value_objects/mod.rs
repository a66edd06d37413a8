//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Identifiers**: `UserId`, `PostId`, `CommentId` sequential handles
//! - **Activity**: action breakdown kinds and vote direction

mod activity;
mod identifiers;

pub use activity::*;
pub use identifiers::*;
