//! Post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CommentId, PostId, UserId};

/// A post inside exactly one community.
///
/// A repost is a separate post with copied content, its own id, zero votes
/// and no comments; `repost_of` points at the post it was copied from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,

    pub author: UserId,

    /// Name of the owning community
    pub community: String,

    pub content: String,

    /// Net votes, no floor or ceiling
    pub votes: i64,

    /// Top-level comments in insertion order
    pub comments: Vec<CommentId>,

    /// Source post when this is a repost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repost_of: Option<PostId>,

    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: PostId,
        author: UserId,
        community: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author,
            community: community.into(),
            content: content.into(),
            votes: 0,
            comments: Vec::new(),
            repost_of: None,
            created_at: Utc::now(),
        }
    }

    /// Check whether this post was created by reposting another.
    pub fn is_repost(&self) -> bool {
        self.repost_of.is_some()
    }
}
