//! Engine Invariant Tests
//!
//! Scenario tests for single operations and seeded random operation
//! sequences checked against the counter and karma invariants.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_case::test_case;

use forum_sim::domain::{ActionKind, CommentId, PostId, UserId, VoteDirection};
use forum_sim::{Engine, EngineError};

use crate::common::{assert_invariants, populated_engine};

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_register_user_assigns_sequential_ids() {
    let engine = Engine::new();
    assert_eq!(engine.register_user("alice").id, UserId::new(1));
    assert_eq!(engine.register_user("bob").id, UserId::new(2));
    assert_eq!(engine.user_count(), 2);
}

#[test]
fn test_duplicate_community_fails_without_side_effects() {
    let engine = Engine::new();
    engine.create_community("x").unwrap();

    assert_eq!(
        engine.create_community("x"),
        Err(EngineError::CommunityExists("x".into()))
    );
    assert_eq!(engine.community_count(), 1);
}

#[test]
fn test_post_then_upvote() {
    let engine = Engine::new();
    engine.create_community("r1").unwrap();
    let u = engine.register_user("a").id;
    engine.join_community(u, "r1").unwrap();
    let p = engine.create_post(u, "r1", "hi").unwrap();
    engine.upvote_post(p.id).unwrap();

    let counters = engine.counters();
    assert_eq!(engine.post(p.id).unwrap().votes, 1);
    assert_eq!(engine.user(u).unwrap().karma, 1);
    assert_eq!(counters.total_posts, 1);
    assert_eq!(counters.total_votes, 1);
    assert_eq!(counters.total_upvotes, 1);
    assert_invariants(&engine);
}

#[test]
fn test_votes_are_not_billed_to_anyone() {
    let (engine, users, names) = populated_engine(2, 1);
    let post = engine.create_post(users[0], &names[0], "post").unwrap();
    let before = engine.counters().total_actions;

    engine.upvote_post(post.id).unwrap();
    engine.downvote_post(post.id).unwrap();

    let counters = engine.counters();
    assert_eq!(counters.total_actions, before);
    assert_eq!(counters.count(ActionKind::Votes), 2);
    assert_eq!(engine.user(users[0]).unwrap().actions, 2);
}

#[test]
fn test_karma_can_go_negative() {
    let (engine, users, names) = populated_engine(1, 1);
    let post = engine.create_post(users[0], &names[0], "unpopular").unwrap();
    let comment = engine.comment_on_post(users[0], post.id, "also").unwrap();

    for _ in 0..3 {
        engine.downvote_post(post.id).unwrap();
    }
    assert_eq!(engine.downvote_comment(comment.id), Ok(-1));

    assert_eq!(engine.post(post.id).unwrap().votes, -3);
    assert_eq!(engine.user(users[0]).unwrap().karma, -4);
    assert_invariants(&engine);
}

#[test]
fn test_comment_votes_credit_comment_author() {
    let (engine, users, names) = populated_engine(2, 1);
    let post = engine.create_post(users[0], &names[0], "post").unwrap();
    let comment = engine.comment_on_post(users[1], post.id, "comment").unwrap();

    engine.upvote_comment(comment.id).unwrap();
    engine.upvote_comment(comment.id).unwrap();

    assert_eq!(engine.user(users[0]).unwrap().karma, 0);
    assert_eq!(engine.user(users[1]).unwrap().karma, 2);
    assert_eq!(engine.comment(comment.id).unwrap().votes, 2);
}

#[test]
fn test_join_is_idempotent_and_leave_of_non_member_is_harmless() {
    let (engine, users, _) = populated_engine(1, 0);
    engine.create_community("solo").unwrap();

    engine.join_community(users[0], "solo").unwrap();
    engine.join_community(users[0], "solo").unwrap();
    assert_eq!(engine.communities()[0].members, 1);

    engine.leave_community(users[0], "solo").unwrap();
    engine.leave_community(users[0], "solo").unwrap();
    assert_eq!(engine.communities()[0].members, 0);

    assert_eq!(engine.user(users[0]).unwrap().actions, 4);
    assert_invariants(&engine);
}

#[test_case("join" ; "join")]
#[test_case("leave" ; "leave")]
#[test_case("post" ; "post")]
#[test_case("repost" ; "repost")]
fn test_unknown_community_changes_nothing(operation: &str) {
    let (engine, users, names) = populated_engine(1, 1);
    let original = engine.create_post(users[0], &names[0], "original").unwrap();
    let before = engine.counters();

    let result = match operation {
        "join" => engine.join_community(users[0], "missing"),
        "leave" => engine.leave_community(users[0], "missing"),
        "post" => engine.create_post(users[0], "missing", "x").map(|_| ()),
        _ => engine.create_repost(users[0], original.id, "missing").map(|_| ()),
    };

    assert_eq!(result, Err(EngineError::CommunityNotFound("missing".into())));
    let after = engine.counters();
    assert_eq!(after.total_actions, before.total_actions);
    assert_eq!(after.total_posts, before.total_posts);

    // No post id was consumed
    let next = engine.create_post(users[0], &names[0], "next").unwrap();
    assert_eq!(next.id, PostId::new(2));
}

#[test]
fn test_unknown_handles_are_rejected() {
    let (engine, users, _) = populated_engine(1, 1);

    assert_eq!(
        engine.comment_on_post(users[0], PostId::new(5), "x"),
        Err(EngineError::PostNotFound(PostId::new(5)))
    );
    assert_eq!(
        engine.upvote_comment(CommentId::new(5)),
        Err(EngineError::CommentNotFound(CommentId::new(5)))
    );
    assert_eq!(
        engine.send_direct_message(UserId::new(9), users[0], "x"),
        Err(EngineError::UserNotFound(UserId::new(9)))
    );
    assert_eq!(engine.counters().total_comments, 0);
    assert_invariants(&engine);
}

#[test]
fn test_repost_gets_fresh_id_and_copied_content() {
    let (engine, users, names) = populated_engine(2, 2);
    let original = engine.create_post(users[0], &names[0], "share me").unwrap();
    engine.upvote_post(original.id).unwrap();

    let repost = engine.create_repost(users[1], original.id, &names[1]).unwrap();

    assert_eq!(repost.id, PostId::new(2));
    assert_eq!(repost.content, "share me");
    assert_eq!(repost.votes, 0);
    assert_eq!(repost.community, names[1]);
    assert_eq!(engine.counters().count(ActionKind::Posts), 2);
}

// =============================================================================
// Random sequences
// =============================================================================

fn random_step(engine: &Engine, rng: &mut StdRng, users: &[UserId], names: &[String]) {
    let user = users[rng.random_range(0..users.len())];
    let to = users[rng.random_range(0..users.len())];
    let name = &names[rng.random_range(0..names.len())];

    // One past the last issued id, so some operations hit unknown handles
    let counters = engine.counters();
    let post = PostId::new(rng.random_range(1..=counters.total_posts + 1));
    let comment = CommentId::new(rng.random_range(1..=counters.total_comments + 1));
    let direction = if rng.random_bool(0.6) {
        VoteDirection::Up
    } else {
        VoteDirection::Down
    };

    let _ = match rng.random_range(0..9) {
        0 => engine.join_community(user, name),
        1 => engine.leave_community(user, name),
        2 => engine.create_post(user, name, "post").map(|_| ()),
        3 => engine.create_repost(user, post, name).map(|_| ()),
        4 => engine.comment_on_post(user, post, "comment").map(|_| ()),
        5 => engine.reply_to_comment(user, comment, "reply").map(|_| ()),
        6 => engine.vote_post(post, direction).map(|_| ()),
        7 => engine.vote_comment(comment, direction).map(|_| ()),
        _ => engine.send_direct_message(user, to, "dm").map(|_| ()),
    };
}

#[test_case(1 ; "seed 1")]
#[test_case(7 ; "seed 7")]
#[test_case(1234 ; "seed 1234")]
fn test_invariants_hold_after_every_step(seed: u64) {
    let (engine, users, names) = populated_engine(5, 3);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut last_post = 0;
    let mut last_comment = 0;
    for _ in 0..300 {
        random_step(&engine, &mut rng, &users, &names);
        assert_invariants(&engine);

        let counters = engine.counters();
        assert!(counters.total_posts >= last_post);
        assert!(counters.total_comments >= last_comment);
        last_post = counters.total_posts;
        last_comment = counters.total_comments;
    }
}
