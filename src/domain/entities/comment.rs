//! Comment entity.
//!
//! Comments form a tree below a post. The tree is stored flat: every comment
//! keeps the ids of its replies, and the engine resolves ids through its
//! comment arena.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CommentId, PostId, UserId};

/// A comment on a post, or a reply to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,

    pub author: UserId,

    /// Post at the root of the thread
    pub post_id: PostId,

    /// Parent comment, `None` for top-level comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,

    pub content: String,

    /// Net votes, no floor or ceiling
    pub votes: i64,

    /// Replies in insertion order
    pub replies: Vec<CommentId>,

    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        author: UserId,
        post_id: PostId,
        parent_id: Option<CommentId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author,
            post_id,
            parent_id,
            content: content.into(),
            votes: 0,
            replies: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// One comment of a flattened thread, with its depth below the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    /// 0 for top-level comments
    pub depth: usize,
    pub comment: Comment,
}
