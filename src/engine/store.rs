//! Entity Store
//!
//! Canonical collections of the forum. Posts and comments live in id-indexed
//! arenas; communities, posts and comments refer to their children by id.
//! The store only offers lookups and inserts; the engine state decides when
//! they happen and keeps the counters in step.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    Comment, CommentId, Community, Message, Post, PostId, ThreadEntry, User, UserId,
};
use crate::shared::error::EngineError;

/// Owner of every user, community, post, comment and message.
#[derive(Debug, Default)]
pub struct EntityStore {
    users: HashMap<UserId, User>,
    /// Ordered by name, which is the feed iteration order
    communities: BTreeMap<String, Community>,
    posts: HashMap<PostId, Post>,
    comments: HashMap<CommentId, Comment>,
    messages: Vec<Message>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn user(&self, id: UserId) -> Result<&User, EngineError> {
        self.users.get(&id).ok_or(EngineError::UserNotFound(id))
    }

    pub fn user_mut(&mut self, id: UserId) -> Result<&mut User, EngineError> {
        self.users.get_mut(&id).ok_or(EngineError::UserNotFound(id))
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// All users ordered by id.
    pub fn users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // ------------------------------------------------------------------
    // Communities
    // ------------------------------------------------------------------

    /// Insert a community unless the name is taken.
    pub fn insert_community(&mut self, community: Community) -> Result<(), EngineError> {
        if self.communities.contains_key(&community.name) {
            return Err(EngineError::CommunityExists(community.name));
        }
        self.communities.insert(community.name.clone(), community);
        Ok(())
    }

    pub fn community(&self, name: &str) -> Result<&Community, EngineError> {
        self.communities
            .get(name)
            .ok_or_else(|| EngineError::CommunityNotFound(name.to_string()))
    }

    pub fn community_mut(&mut self, name: &str) -> Result<&mut Community, EngineError> {
        self.communities
            .get_mut(name)
            .ok_or_else(|| EngineError::CommunityNotFound(name.to_string()))
    }

    pub fn communities(&self) -> impl Iterator<Item = &Community> {
        self.communities.values()
    }

    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    /// Append a post to its community. The community must exist.
    pub fn insert_post(&mut self, post: Post) -> Result<(), EngineError> {
        self.community_mut(&post.community)?.posts.push(post.id);
        self.posts.insert(post.id, post);
        Ok(())
    }

    pub fn post(&self, id: PostId) -> Result<&Post, EngineError> {
        self.posts.get(&id).ok_or(EngineError::PostNotFound(id))
    }

    pub fn post_mut(&mut self, id: PostId) -> Result<&mut Post, EngineError> {
        self.posts.get_mut(&id).ok_or(EngineError::PostNotFound(id))
    }

    /// Posts of every community the user belongs to, community by community.
    pub fn feed(&self, user_id: UserId) -> Vec<Post> {
        self.communities
            .values()
            .filter(|c| c.is_member(user_id))
            .flat_map(|c| c.posts.iter())
            .filter_map(|id| self.posts.get(id))
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Attach a comment to its parent comment, or to its post when it has none.
    pub fn insert_comment(&mut self, comment: Comment) -> Result<(), EngineError> {
        match comment.parent_id {
            Some(parent_id) => self.comment_mut(parent_id)?.replies.push(comment.id),
            None => self.post_mut(comment.post_id)?.comments.push(comment.id),
        }
        self.comments.insert(comment.id, comment);
        Ok(())
    }

    pub fn comment(&self, id: CommentId) -> Result<&Comment, EngineError> {
        self.comments.get(&id).ok_or(EngineError::CommentNotFound(id))
    }

    pub fn comment_mut(&mut self, id: CommentId) -> Result<&mut Comment, EngineError> {
        self.comments
            .get_mut(&id)
            .ok_or(EngineError::CommentNotFound(id))
    }

    /// Pre-order walk of a post's comment tree.
    ///
    /// Uses an explicit stack so arbitrarily deep reply chains are safe.
    pub fn thread(&self, post_id: PostId) -> Result<Vec<ThreadEntry>, EngineError> {
        let post = self.post(post_id)?;
        let mut entries = Vec::new();
        let mut stack: Vec<(usize, CommentId)> =
            post.comments.iter().rev().map(|id| (0, *id)).collect();

        while let Some((depth, id)) = stack.pop() {
            if let Some(comment) = self.comments.get(&id) {
                stack.extend(comment.replies.iter().rev().map(|r| (depth + 1, *r)));
                entries.push(ThreadEntry {
                    depth,
                    comment: comment.clone(),
                });
            }
        }

        Ok(entries)
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages addressed to the user, in send order.
    pub fn inbox(&self, user_id: UserId) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.is_for(user_id))
            .cloned()
            .collect()
    }
}
