//! User entity.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::UserId;

/// A registered forum user.
///
/// Users are never deleted. `karma` is maintained incrementally by votes on
/// the user's posts and comments; `actions` counts every billed operation
/// the user performed (votes are not billed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sequential id allocated at registration
    pub id: UserId,

    /// Display name (not required to be unique)
    pub username: String,

    /// Net votes received, may be negative
    pub karma: i64,

    /// Number of billed actions
    pub actions: u64,

    /// Connectivity flag, `true` at registration
    pub connected: bool,
}

impl User {
    /// Create a freshly registered user.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            karma: 0,
            actions: 0,
            connected: true,
        }
    }
}
