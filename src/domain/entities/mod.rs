//! # Domain Entities
//!
//! Core domain entities representing the objects of the forum.
//! All entities are owned by the engine's store; callers receive clones.
//!
//! ## Entities
//!
//! - **User**: Registered account with karma and action counters
//! - **Community**: Named group with a post list and a membership set
//! - **Post**: Content posted into one community, optionally a repost
//! - **Comment**: Node of the comment tree below a post
//! - **Message**: Direct message between two users

mod comment;
mod community;
mod message;
mod post;
mod user;

pub use comment::{Comment, ThreadEntry};
pub use community::{Community, CommunitySummary};
pub use message::Message;
pub use post::Post;
pub use user::User;
