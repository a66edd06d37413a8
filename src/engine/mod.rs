//! # Forum Engine
//!
//! The single shared data store of the forum and the operations that mutate
//! and query it.
//!
//! ## Concurrency
//!
//! The whole state (store, id sequences and counters) sits behind one
//! `parking_lot::Mutex`. Every public operation takes the lock for its full
//! duration and releases it when the guard drops, on success and failure
//! alike. Operations are therefore linearizable in lock acquisition order and
//! no caller ever observes a half-applied mutation.
//!
//! ## Handles
//!
//! Callers address entities by id (`UserId`, `PostId`, `CommentId`) or, for
//! communities, by name. Lookups return owned snapshots. An id the engine
//! never issued yields a `NotFound` error instead of touching any state.
//!
//! ```rust,ignore
//! use forum_sim::engine::Engine;
//!
//! let engine = Engine::new();
//! engine.create_community("rust")?;
//! let alice = engine.register_user("alice");
//! engine.join_community(alice.id, "rust")?;
//! let post = engine.create_post(alice.id, "rust", "hello")?;
//! engine.upvote_post(post.id)?;
//! ```

mod allocator;
mod counters;
mod state;
mod store;

pub use allocator::IdAllocator;
pub use counters::{AggregateCounters, CounterSnapshot};
pub use store::EntityStore;

use std::time::Instant;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};

use crate::domain::{
    Comment, CommentId, CommunitySummary, Message, Post, PostId, ThreadEntry, User, UserId,
    VoteDirection,
};
use crate::shared::error::EngineError;

use state::EngineState;

/// Thread-safe in-memory forum engine.
///
/// Share it between threads or tasks with `Arc<Engine>`.
pub struct Engine {
    state: Mutex<EngineState>,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl Engine {
    /// Create an empty engine and capture the start time.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState::new()),
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock()
    }

    // ==========================================================================
    // Mutation Operations
    // ==========================================================================

    /// Register a user. Always succeeds; ids are sequential from 1.
    pub fn register_user(&self, username: &str) -> User {
        let user = self.lock().register_user(username);
        tracing::debug!(user_id = %user.id, username = %user.username, "User registered");
        user
    }

    /// Create a community. Fails with `CommunityExists` if the name is taken.
    pub fn create_community(&self, name: &str) -> Result<(), EngineError> {
        self.lock().create_community(name)?;
        tracing::debug!(community = %name, "Community created");
        Ok(())
    }

    /// Add the user to a community. Joining again is harmless but still billed.
    pub fn join_community(&self, user_id: UserId, name: &str) -> Result<(), EngineError> {
        self.lock().join_community(user_id, name)
    }

    /// Remove the user from a community. Leaving as a non-member is harmless
    /// but still billed.
    pub fn leave_community(&self, user_id: UserId, name: &str) -> Result<(), EngineError> {
        self.lock().leave_community(user_id, name)
    }

    pub fn create_post(
        &self,
        user_id: UserId,
        community: &str,
        content: &str,
    ) -> Result<Post, EngineError> {
        let post = self.lock().create_post(user_id, community, content)?;
        tracing::debug!(post_id = %post.id, author = %user_id, community = %community, "Post created");
        Ok(post)
    }

    /// Post a copy of `original`'s content into `community` under a fresh id.
    pub fn create_repost(
        &self,
        user_id: UserId,
        original: PostId,
        community: &str,
    ) -> Result<Post, EngineError> {
        let post = self.lock().create_repost(user_id, original, community)?;
        tracing::debug!(
            post_id = %post.id,
            original = %original,
            community = %community,
            "Repost created"
        );
        Ok(post)
    }

    pub fn comment_on_post(
        &self,
        user_id: UserId,
        post_id: PostId,
        content: &str,
    ) -> Result<Comment, EngineError> {
        self.lock().comment_on_post(user_id, post_id, content)
    }

    pub fn reply_to_comment(
        &self,
        user_id: UserId,
        parent: CommentId,
        content: &str,
    ) -> Result<Comment, EngineError> {
        self.lock().reply_to_comment(user_id, parent, content)
    }

    /// Upvote a post, crediting its author's karma. Returns the new vote count.
    pub fn upvote_post(&self, post_id: PostId) -> Result<i64, EngineError> {
        self.vote_post(post_id, VoteDirection::Up)
    }

    /// Downvote a post, debiting its author's karma. Returns the new vote count.
    pub fn downvote_post(&self, post_id: PostId) -> Result<i64, EngineError> {
        self.vote_post(post_id, VoteDirection::Down)
    }

    pub fn vote_post(&self, post_id: PostId, direction: VoteDirection) -> Result<i64, EngineError> {
        self.lock().vote_post(post_id, direction)
    }

    pub fn upvote_comment(&self, comment_id: CommentId) -> Result<i64, EngineError> {
        self.vote_comment(comment_id, VoteDirection::Up)
    }

    pub fn downvote_comment(&self, comment_id: CommentId) -> Result<i64, EngineError> {
        self.vote_comment(comment_id, VoteDirection::Down)
    }

    pub fn vote_comment(
        &self,
        comment_id: CommentId,
        direction: VoteDirection,
    ) -> Result<i64, EngineError> {
        self.lock().vote_comment(comment_id, direction)
    }

    /// Flag a user as connected or disconnected. Not billed as an action.
    pub fn set_user_connection(&self, user_id: UserId, connected: bool) -> Result<(), EngineError> {
        self.lock().set_user_connection(user_id, connected)?;
        tracing::debug!(user_id = %user_id, connected, "User connection changed");
        Ok(())
    }

    pub fn send_direct_message(
        &self,
        from: UserId,
        to: UserId,
        content: &str,
    ) -> Result<Message, EngineError> {
        let message = self.lock().send_direct_message(from, to, content)?;
        tracing::debug!(from = %from, to = %to, "Direct message sent");
        Ok(message)
    }

    /// Answer a message by sending a new one back to its sender.
    pub fn reply_to_message(
        &self,
        user_id: UserId,
        original: &Message,
        content: &str,
    ) -> Result<Message, EngineError> {
        self.send_direct_message(user_id, original.from, content)
    }

    // ==========================================================================
    // Query Operations
    // ==========================================================================

    /// Messages addressed to the user, in send order.
    pub fn retrieve_messages(&self, user_id: UserId) -> Vec<Message> {
        self.lock().store.inbox(user_id)
    }

    /// Posts of every community the user belongs to, communities in name
    /// order and posts in insertion order within each.
    pub fn get_user_feed(&self, user_id: UserId) -> Vec<Post> {
        self.lock().store.feed(user_id)
    }

    pub fn user(&self, user_id: UserId) -> Result<User, EngineError> {
        self.lock().store.user(user_id).cloned()
    }

    pub fn post(&self, post_id: PostId) -> Result<Post, EngineError> {
        self.lock().store.post(post_id).cloned()
    }

    pub fn comment(&self, comment_id: CommentId) -> Result<Comment, EngineError> {
        self.lock().store.comment(comment_id).cloned()
    }

    /// The post's comment tree, flattened in pre-order.
    pub fn post_thread(&self, post_id: PostId) -> Result<Vec<ThreadEntry>, EngineError> {
        self.lock().store.thread(post_id)
    }

    /// All users ordered by id.
    pub fn users(&self) -> Vec<User> {
        self.lock().store.users()
    }

    /// Summary of every community, in name order.
    pub fn communities(&self) -> Vec<CommunitySummary> {
        self.lock().store.communities().map(|c| c.summary()).collect()
    }

    /// The full message log in send order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().store.messages().to_vec()
    }

    pub fn user_count(&self) -> usize {
        self.lock().store.user_count()
    }

    pub fn community_count(&self) -> usize {
        self.lock().store.community_count()
    }

    /// Consistent snapshot of every aggregate counter.
    pub fn counters(&self) -> CounterSnapshot {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.lock().counters.snapshot(self.started_at, elapsed)
    }

    /// Billed actions plus votes per second since construction.
    pub fn throughput(&self) -> f64 {
        self.counters().throughput()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
