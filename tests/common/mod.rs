//! Common Test Utilities
//!
//! Shared fixtures and invariant checks.

use std::collections::HashMap;

use forum_sim::domain::{CommentId, PostId, UserId};
use forum_sim::Engine;

/// Engine with `communities` communities named `c1..` and `users` users
/// named `u1..`, every user a member of every community.
pub fn populated_engine(users: usize, communities: usize) -> (Engine, Vec<UserId>, Vec<String>) {
    let engine = Engine::new();

    let names: Vec<String> = (1..=communities).map(|i| format!("c{}", i)).collect();
    for name in &names {
        engine.create_community(name).unwrap();
    }

    let ids: Vec<UserId> = (1..=users)
        .map(|i| engine.register_user(&format!("u{}", i)).id)
        .collect();
    for id in &ids {
        for name in &names {
            engine.join_community(*id, name).unwrap();
        }
    }

    (engine, ids, names)
}

/// Check every cross-entity invariant through the public API.
///
/// Post and comment ids are sequential and gap-free, so every entity can be
/// reached by walking `1..=total`.
pub fn assert_invariants(engine: &Engine) {
    let counters = engine.counters();
    let users = engine.users();

    assert_eq!(
        counters.total_votes,
        counters.total_upvotes + counters.total_downvotes,
        "vote split"
    );

    let billed: u64 = users.iter().map(|u| u.actions).sum();
    assert_eq!(counters.total_actions, billed, "actions vs per-user actions");

    let disconnected = users.iter().filter(|u| !u.connected).count() as u64;
    assert_eq!(counters.disconnected_users, disconnected, "disconnected users");

    let mut received: HashMap<UserId, i64> = HashMap::new();
    for id in 1..=counters.total_posts {
        let post = engine.post(PostId::new(id)).expect("post ids are gap-free");
        *received.entry(post.author).or_default() += post.votes;
    }
    for id in 1..=counters.total_comments {
        let comment = engine
            .comment(CommentId::new(id))
            .expect("comment ids are gap-free");
        *received.entry(comment.author).or_default() += comment.votes;
    }
    assert!(engine.post(PostId::new(counters.total_posts + 1)).is_err());
    assert!(engine
        .comment(CommentId::new(counters.total_comments + 1))
        .is_err());

    for user in &users {
        let expected = received.get(&user.id).copied().unwrap_or(0);
        assert_eq!(user.karma, expected, "karma of {}", user.username);
    }

    assert_eq!(counters.total_messages as usize, engine.messages().len());
}
