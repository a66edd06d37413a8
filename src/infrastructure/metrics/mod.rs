//! Prometheus Metrics Module
//!
//! Mirrors the engine's aggregate counters into a Prometheus registry so a
//! run can be exported in the text exposition format.
//!
//! # Metrics Collected
//! - Entity totals (users, communities, posts, comments, messages)
//! - Billed actions and disconnected users
//! - Votes by direction

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::domain::{ActionKind, VoteDirection};
use crate::engine::CounterSnapshot;

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

fn gauge(name: &str, help: &str) -> IntGauge {
    IntGauge::with_opts(Opts::new(name, help).namespace("forum_sim"))
        .unwrap_or_else(|e| panic!("Failed to create {} metric: {}", name, e))
}

pub static USERS_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| gauge("users_total", "Number of registered users"));

pub static COMMUNITIES_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| gauge("communities_total", "Number of communities"));

pub static POSTS_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| gauge("posts_total", "Number of posts, reposts included"));

pub static COMMENTS_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| gauge("comments_total", "Number of comments, replies included"));

pub static MESSAGES_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| gauge("messages_total", "Number of direct messages"));

pub static ACTIONS_TOTAL: Lazy<IntGauge> =
    Lazy::new(|| gauge("actions_total", "Number of billed user actions"));

pub static DISCONNECTED_USERS: Lazy<IntGauge> =
    Lazy::new(|| gauge("disconnected_users", "Users currently flagged as disconnected"));

/// Votes by direction
pub static VOTES_TOTAL: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("votes_total", "Number of votes cast").namespace("forum_sim"),
        &["direction"], // "up", "down"
    )
    .expect("Failed to create VOTES_TOTAL metric")
});

/// Breakdown of activity by kind
pub static ACTIVITY_TOTAL: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("activity_total", "Activity breakdown by kind").namespace("forum_sim"),
        &["kind"],
    )
    .expect("Failed to create ACTIVITY_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    let gauges: [&Lazy<IntGauge>; 7] = [
        &USERS_TOTAL,
        &COMMUNITIES_TOTAL,
        &POSTS_TOTAL,
        &COMMENTS_TOTAL,
        &MESSAGES_TOTAL,
        &ACTIONS_TOTAL,
        &DISCONNECTED_USERS,
    ];
    for gauge in gauges {
        registry
            .register(Box::new(IntGauge::clone(gauge)))
            .expect("Failed to register gauge");
    }
    registry
        .register(Box::new(VOTES_TOTAL.clone()))
        .expect("Failed to register VOTES_TOTAL");
    registry
        .register(Box::new(ACTIVITY_TOTAL.clone()))
        .expect("Failed to register ACTIVITY_TOTAL");
}

/// Copy a counter snapshot into the gauges.
pub fn record_counters(snapshot: &CounterSnapshot, users: usize, communities: usize) {
    USERS_TOTAL.set(users as i64);
    COMMUNITIES_TOTAL.set(communities as i64);
    POSTS_TOTAL.set(snapshot.total_posts as i64);
    COMMENTS_TOTAL.set(snapshot.total_comments as i64);
    MESSAGES_TOTAL.set(snapshot.total_messages as i64);
    ACTIONS_TOTAL.set(snapshot.total_actions as i64);
    DISCONNECTED_USERS.set(snapshot.disconnected_users as i64);

    VOTES_TOTAL
        .with_label_values(&[VoteDirection::Up.as_str()])
        .set(snapshot.total_upvotes as i64);
    VOTES_TOTAL
        .with_label_values(&[VoteDirection::Down.as_str()])
        .set(snapshot.total_downvotes as i64);

    for kind in ActionKind::ALL {
        ACTIVITY_TOTAL
            .with_label_values(&[kind.as_str()])
            .set(snapshot.count(kind) as i64);
    }
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
