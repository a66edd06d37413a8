//! Sequential entity identifiers.
//!
//! Users, posts and comments are addressed by 1-based sequential ids. Each
//! type has its own namespace: `PostId(1)` and `CommentId(1)` coexist.
//! Callers hold ids, never references into the store.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw id value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw u64 value.
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user.
    UserId
);

entity_id!(
    /// Identifier of a post. Originals and reposts share the sequence.
    PostId
);

entity_id!(
    /// Identifier of a comment. Top-level comments and replies share the sequence.
    CommentId
);
