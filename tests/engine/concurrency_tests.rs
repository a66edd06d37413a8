//! Engine Concurrency Tests
//!
//! Many threads hammering one shared engine must never lose an update.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use forum_sim::domain::{PostId, VoteDirection};
use forum_sim::Engine;

use crate::common::{assert_invariants, populated_engine};

#[test]
fn test_concurrent_posts_get_distinct_ids() {
    const THREADS: usize = 32;
    let (engine, users, names) = populated_engine(THREADS, 1);
    let engine = Arc::new(engine);

    let handles: Vec<_> = users
        .iter()
        .map(|user| {
            let engine = engine.clone();
            let user = *user;
            let community = names[0].clone();
            thread::spawn(move || engine.create_post(user, &community, "concurrent").unwrap().id)
        })
        .collect();

    let ids: HashSet<PostId> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(ids.len(), THREADS);
    assert_eq!(engine.counters().total_posts, THREADS as u64);
    assert_eq!(engine.communities()[0].posts, THREADS);
    assert_invariants(&engine);
}

#[test]
fn test_concurrent_votes_are_all_counted() {
    const THREADS: u64 = 8;
    const VOTES_PER_THREAD: u64 = 250;

    let (engine, users, names) = populated_engine(1, 1);
    let post = engine.create_post(users[0], &names[0], "hot take").unwrap().id;

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let engine = &engine;
            scope.spawn(move || {
                let direction = if worker % 2 == 0 {
                    VoteDirection::Up
                } else {
                    VoteDirection::Down
                };
                for _ in 0..VOTES_PER_THREAD {
                    engine.vote_post(post, direction).unwrap();
                }
            });
        }
    });

    let counters = engine.counters();
    assert_eq!(counters.total_votes, THREADS * VOTES_PER_THREAD);
    assert_eq!(counters.total_upvotes, counters.total_downvotes);
    assert_eq!(engine.post(post).unwrap().votes, 0);
    assert_eq!(engine.user(users[0]).unwrap().karma, 0);
}

#[test]
fn test_mixed_concurrent_workload_keeps_invariants() {
    let (engine, users, names) = populated_engine(8, 3);

    thread::scope(|scope| {
        for (index, user) in users.iter().enumerate() {
            let engine = &engine;
            let names = &names;
            let peer = users[(index + 1) % users.len()];
            let user = *user;
            scope.spawn(move || {
                for round in 0..50 {
                    let name = &names[round % names.len()];
                    let post = engine.create_post(user, name, "post").unwrap();
                    let comment = engine.comment_on_post(peer, post.id, "comment").unwrap();
                    engine.reply_to_comment(user, comment.id, "reply").unwrap();
                    engine.upvote_post(post.id).unwrap();
                    engine.downvote_comment(comment.id).unwrap();
                    engine.send_direct_message(user, peer, "ping").unwrap();
                    if round % 10 == 0 {
                        engine.leave_community(user, name).unwrap();
                        engine.join_community(user, name).unwrap();
                        engine.set_user_connection(user, round % 20 != 0).unwrap();
                    }
                }
            });
        }
    });

    let counters = engine.counters();
    assert_eq!(counters.total_posts, 8 * 50);
    assert_eq!(counters.total_comments, 8 * 50 * 2);
    assert_eq!(counters.total_messages, 8 * 50);
    assert_invariants(&engine);
}
