//! Error Types
//!
//! `EngineError` is the failure signal of every engine operation. `AppError`
//! wraps it together with the configuration and runtime failures of the
//! simulation harness.

use crate::domain::{CommentId, PostId, UserId};

/// Engine operation error.
///
/// A failed operation never leaves a partial mutation behind and never
/// touches the aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Community not found: {0}")]
    CommunityNotFound(String),

    #[error("Community already exists: {0}")]
    CommunityExists(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),
}

impl EngineError {
    /// Whether the error refers to a missing entity (as opposed to a collision).
    pub fn is_not_found(&self) -> bool {
        !matches!(self, EngineError::CommunityExists(_))
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Simulation task failed: {0}")]
    Task(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Simulation worker failed: {}", err);
        AppError::Task(err.to_string())
    }
}
