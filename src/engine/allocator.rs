//! Sequential ID allocation.
//!
//! Every id type has its own counter starting at 1. The allocator is only
//! touched while the engine lock is held, and each allocation is followed by
//! a successful insert in the same critical section, so ids are strictly
//! increasing and gap-free.

use crate::domain::{CommentId, PostId, UserId};

/// Per-type id sequences.
#[derive(Debug)]
pub struct IdAllocator {
    next_user: u64,
    next_post: u64,
    next_comment: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next_user: 1,
            next_post: 1,
            next_comment: 1,
        }
    }

    pub fn next_user_id(&mut self) -> UserId {
        UserId::new(Self::bump(&mut self.next_user))
    }

    pub fn next_post_id(&mut self) -> PostId {
        PostId::new(Self::bump(&mut self.next_post))
    }

    pub fn next_comment_id(&mut self) -> CommentId {
        CommentId::new(Self::bump(&mut self.next_comment))
    }

    fn bump(counter: &mut u64) -> u64 {
        let id = *counter;
        *counter += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
