//! Activity kinds and vote direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of activity tracked in the per-kind breakdown.
///
/// Membership changes are actions but have no breakdown bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Posts,
    Comments,
    Votes,
    Messages,
}

impl ActionKind {
    /// Every kind, in breakdown display order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Posts,
        ActionKind::Comments,
        ActionKind::Votes,
        ActionKind::Messages,
    ];

    /// Breakdown key of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "Posts",
            Self::Comments => "Comments",
            Self::Votes => "Votes",
            Self::Messages => "Messages",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Signed effect on vote counts and karma.
    pub fn delta(&self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}
