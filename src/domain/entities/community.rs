//! Community entity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PostId, UserId};

/// A named group owning an ordered list of posts and a membership set.
///
/// The name is the unique key and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub name: String,

    /// Posts in insertion (display) order
    pub posts: Vec<PostId>,

    /// Current members
    pub members: BTreeSet<UserId>,
}

impl Community {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            posts: Vec::new(),
            members: BTreeSet::new(),
        }
    }

    /// Check if a user is currently a member.
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    pub fn summary(&self) -> CommunitySummary {
        CommunitySummary {
            name: self.name.clone(),
            members: self.members.len(),
            posts: self.posts.len(),
        }
    }
}

/// Membership and post counts of a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySummary {
    pub name: String,
    pub members: usize,
    pub posts: usize,
}
