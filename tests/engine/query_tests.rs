//! Engine Query Tests

use pretty_assertions::assert_eq;

use forum_sim::domain::PostId;
use forum_sim::Engine;

#[test]
fn test_feed_contains_posts_of_joined_communities_in_order() {
    let engine = Engine::new();
    for name in ["beta", "alpha", "gamma"] {
        engine.create_community(name).unwrap();
    }
    let reader = engine.register_user("reader").id;
    let writer = engine.register_user("writer").id;
    engine.join_community(reader, "beta").unwrap();
    engine.join_community(reader, "alpha").unwrap();

    let b1 = engine.create_post(writer, "beta", "b1").unwrap().id;
    let a1 = engine.create_post(writer, "alpha", "a1").unwrap().id;
    engine.create_post(writer, "gamma", "g1").unwrap();
    let b2 = engine.create_post(writer, "beta", "b2").unwrap().id;

    let feed: Vec<PostId> = engine.get_user_feed(reader).iter().map(|p| p.id).collect();
    assert_eq!(feed, vec![a1, b1, b2]);

    assert!(engine.get_user_feed(writer).is_empty());
}

#[test]
fn test_feed_after_joining_two_communities_and_posting_in_each() {
    let engine = Engine::new();
    engine.create_community("one").unwrap();
    engine.create_community("two").unwrap();
    let u = engine.register_user("u").id;
    engine.join_community(u, "one").unwrap();
    engine.join_community(u, "two").unwrap();
    let p1 = engine.create_post(u, "one", "first").unwrap();
    let p2 = engine.create_post(u, "two", "second").unwrap();

    assert_eq!(engine.get_user_feed(u), vec![p1, p2]);
}

#[test]
fn test_leaving_removes_community_from_feed() {
    let engine = Engine::new();
    engine.create_community("news").unwrap();
    let u = engine.register_user("u").id;
    engine.join_community(u, "news").unwrap();
    engine.create_post(u, "news", "headline").unwrap();

    engine.leave_community(u, "news").unwrap();
    assert!(engine.get_user_feed(u).is_empty());
}

#[test]
fn test_inbox_only_holds_messages_to_the_user() {
    let engine = Engine::new();
    let alice = engine.register_user("alice").id;
    let bob = engine.register_user("bob").id;
    let carol = engine.register_user("carol").id;

    engine.send_direct_message(alice, bob, "1").unwrap();
    engine.send_direct_message(carol, alice, "2").unwrap();
    engine.send_direct_message(carol, bob, "3").unwrap();
    engine.send_direct_message(bob, bob, "4").unwrap();

    let inbox: Vec<String> = engine
        .retrieve_messages(bob)
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(inbox, vec!["1", "3", "4"]);
    assert!(engine.retrieve_messages(carol).is_empty());
    assert_eq!(engine.messages().len(), 4);
}

#[test]
fn test_post_thread_is_flattened_in_reply_order() {
    let engine = Engine::new();
    engine.create_community("c").unwrap();
    let u = engine.register_user("u").id;
    let post = engine.create_post(u, "c", "root").unwrap().id;

    let first = engine.comment_on_post(u, post, "first").unwrap().id;
    let second = engine.comment_on_post(u, post, "second").unwrap().id;
    engine.reply_to_comment(u, first, "first.1").unwrap();
    let nested = engine.reply_to_comment(u, first, "first.2").unwrap().id;
    engine.reply_to_comment(u, nested, "first.2.1").unwrap();
    engine.reply_to_comment(u, second, "second.1").unwrap();

    let thread: Vec<(usize, String)> = engine
        .post_thread(post)
        .unwrap()
        .into_iter()
        .map(|e| (e.depth, e.comment.content))
        .collect();

    assert_eq!(
        thread,
        vec![
            (0, "first".to_string()),
            (1, "first.1".to_string()),
            (1, "first.2".to_string()),
            (2, "first.2.1".to_string()),
            (0, "second".to_string()),
            (1, "second.1".to_string()),
        ]
    );
}
