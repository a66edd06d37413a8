//! Engine state transitions.
//!
//! `EngineState` bundles the store, the id allocator and the counters that
//! live behind the engine lock. Every method here is one complete state
//! transition: all lookups that can fail run before the first write, so an
//! `Err` leaves the state exactly as it was.

use crate::domain::{
    Comment, CommentId, Community, Message, Post, PostId, User, UserId, VoteDirection,
};
use crate::shared::error::EngineError;

use super::allocator::IdAllocator;
use super::counters::AggregateCounters;
use super::store::EntityStore;

#[derive(Debug, Default)]
pub struct EngineState {
    pub ids: IdAllocator,
    pub store: EntityStore,
    pub counters: AggregateCounters,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bill one action to a user and to the global total.
    fn bill(&mut self, user_id: UserId) -> Result<(), EngineError> {
        self.store.user_mut(user_id)?.actions += 1;
        self.counters.record_action();
        Ok(())
    }

    pub fn register_user(&mut self, username: &str) -> User {
        let user = User::new(self.ids.next_user_id(), username);
        self.store.insert_user(user.clone());
        user
    }

    pub fn create_community(&mut self, name: &str) -> Result<(), EngineError> {
        self.store.insert_community(Community::new(name))
    }

    pub fn join_community(&mut self, user_id: UserId, name: &str) -> Result<(), EngineError> {
        self.store.user(user_id)?;
        self.store.community_mut(name)?.members.insert(user_id);
        self.bill(user_id)
    }

    /// Billed even when the user was not a member.
    pub fn leave_community(&mut self, user_id: UserId, name: &str) -> Result<(), EngineError> {
        self.store.user(user_id)?;
        self.store.community_mut(name)?.members.remove(&user_id);
        self.bill(user_id)
    }

    pub fn create_post(
        &mut self,
        user_id: UserId,
        name: &str,
        content: &str,
    ) -> Result<Post, EngineError> {
        self.store.user(user_id)?;
        self.store.community(name)?;

        let post = Post::new(self.ids.next_post_id(), user_id, name, content);
        self.commit_post(post)
    }

    /// Copies content only; votes and comments start fresh.
    pub fn create_repost(
        &mut self,
        user_id: UserId,
        original_id: PostId,
        name: &str,
    ) -> Result<Post, EngineError> {
        self.store.user(user_id)?;
        let content = self.store.post(original_id)?.content.clone();
        self.store.community(name)?;

        let mut repost = Post::new(self.ids.next_post_id(), user_id, name, content);
        repost.repost_of = Some(original_id);
        self.commit_post(repost)
    }

    fn commit_post(&mut self, post: Post) -> Result<Post, EngineError> {
        self.store.insert_post(post.clone())?;
        self.store.user_mut(post.author)?.actions += 1;
        self.counters.record_post();
        Ok(post)
    }

    pub fn comment_on_post(
        &mut self,
        user_id: UserId,
        post_id: PostId,
        content: &str,
    ) -> Result<Comment, EngineError> {
        self.store.user(user_id)?;
        self.store.post(post_id)?;

        let comment = Comment::new(self.ids.next_comment_id(), user_id, post_id, None, content);
        self.commit_comment(comment)
    }

    pub fn reply_to_comment(
        &mut self,
        user_id: UserId,
        parent_id: CommentId,
        content: &str,
    ) -> Result<Comment, EngineError> {
        self.store.user(user_id)?;
        let post_id = self.store.comment(parent_id)?.post_id;

        let reply = Comment::new(
            self.ids.next_comment_id(),
            user_id,
            post_id,
            Some(parent_id),
            content,
        );
        self.commit_comment(reply)
    }

    fn commit_comment(&mut self, comment: Comment) -> Result<Comment, EngineError> {
        self.store.insert_comment(comment.clone())?;
        self.store.user_mut(comment.author)?.actions += 1;
        self.counters.record_comment();
        Ok(comment)
    }

    /// Returns the post's new vote count.
    pub fn vote_post(
        &mut self,
        post_id: PostId,
        direction: VoteDirection,
    ) -> Result<i64, EngineError> {
        let author = self.store.post(post_id)?.author;
        self.store.user_mut(author)?.karma += direction.delta();

        let post = self.store.post_mut(post_id)?;
        post.votes += direction.delta();
        let votes = post.votes;

        self.counters.record_vote(direction);
        Ok(votes)
    }

    /// Returns the comment's new vote count.
    pub fn vote_comment(
        &mut self,
        comment_id: CommentId,
        direction: VoteDirection,
    ) -> Result<i64, EngineError> {
        let author = self.store.comment(comment_id)?.author;
        self.store.user_mut(author)?.karma += direction.delta();

        let comment = self.store.comment_mut(comment_id)?;
        comment.votes += direction.delta();
        let votes = comment.votes;

        self.counters.record_vote(direction);
        Ok(votes)
    }

    /// Keeps `disconnected_users` equal to the number of users currently
    /// flagged as disconnected.
    pub fn set_user_connection(
        &mut self,
        user_id: UserId,
        connected: bool,
    ) -> Result<(), EngineError> {
        let user = self.store.user_mut(user_id)?;
        if user.connected == connected {
            return Ok(());
        }
        user.connected = connected;

        if connected {
            self.counters.disconnected_users -= 1;
        } else {
            self.counters.disconnected_users += 1;
        }
        Ok(())
    }

    pub fn send_direct_message(
        &mut self,
        from: UserId,
        to: UserId,
        content: &str,
    ) -> Result<Message, EngineError> {
        self.store.user(to)?;
        self.store.user_mut(from)?.actions += 1;

        let message = Message::new(from, to, content);
        self.store.push_message(message.clone());
        self.counters.record_message();
        Ok(message)
    }
}
