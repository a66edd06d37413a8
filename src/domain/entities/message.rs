//! Direct message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserId;

/// A direct message between two users.
///
/// Messages form an append-only log: they carry no id and are never edited
/// or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: UserId,
    pub to: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn new(from: UserId, to: UserId, content: impl Into<String>) -> Self {
        Self {
            from,
            to,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    /// Check if the message is addressed to the given user.
    pub fn is_for(&self, user_id: UserId) -> bool {
        self.to == user_id
    }
}
