//! Report Service
//!
//! Builds the end-of-run report from the engine's public queries.
//! Each query takes the engine lock on its own, so the report is only
//! consistent once the simulation has finished.

use std::collections::HashMap;

use rand::Rng;

use crate::application::dto::{
    CommunityStats, FeedPost, FeedView, KarmaEntry, MessageLine, SimulationReport, ThreadLine,
};
use crate::config::{ReportFormat, ReportSettings};
use crate::domain::{User, UserId};
use crate::engine::Engine;
use crate::shared::error::AppError;

/// Assemble the report. `rng` picks the user whose feed is shown.
pub fn collect_report<R: Rng>(
    engine: &Engine,
    settings: &ReportSettings,
    rng: &mut R,
) -> Result<SimulationReport, AppError> {
    let users = engine.users();
    let names: HashMap<UserId, String> =
        users.iter().map(|u| (u.id, u.username.clone())).collect();
    let name_of = |id: UserId| names.get(&id).cloned().unwrap_or_else(|| format!("#{}", id));

    let counters = engine.counters();
    let throughput = counters.throughput();

    let feed = if users.is_empty() {
        None
    } else {
        let user = &users[rng.random_range(0..users.len())];
        Some(feed_view(engine, user, &name_of)?)
    };

    let messages = engine
        .messages()
        .into_iter()
        .map(|m| MessageLine {
            from: name_of(m.from),
            to: name_of(m.to),
            content: m.content,
        })
        .collect();

    Ok(SimulationReport {
        users: users.len(),
        communities: engine.community_count(),
        counters,
        throughput,
        community_stats: community_stats(engine),
        leaderboard: leaderboard(&users, settings.leaderboard_size),
        feed,
        messages,
    })
}

/// Communities by membership, largest first; ties broken by name.
pub fn community_stats(engine: &Engine) -> Vec<CommunityStats> {
    let mut stats: Vec<CommunityStats> = engine
        .communities()
        .into_iter()
        .map(|c| CommunityStats {
            name: c.name,
            members: c.members,
            posts: c.posts,
        })
        .collect();
    stats.sort_by(|a, b| b.members.cmp(&a.members).then_with(|| a.name.cmp(&b.name)));
    stats
}

/// Top `limit` users by karma; ties broken by registration order.
pub fn leaderboard(users: &[User], limit: usize) -> Vec<KarmaEntry> {
    let mut ranked: Vec<&User> = users.iter().collect();
    ranked.sort_by(|a, b| b.karma.cmp(&a.karma).then_with(|| a.id.cmp(&b.id)));
    ranked
        .into_iter()
        .take(limit)
        .map(|u| KarmaEntry {
            username: u.username.clone(),
            karma: u.karma,
        })
        .collect()
}

fn feed_view(
    engine: &Engine,
    user: &User,
    name_of: &impl Fn(UserId) -> String,
) -> Result<FeedView, AppError> {
    let mut posts = Vec::new();
    for post in engine.get_user_feed(user.id) {
        let comments = engine
            .post_thread(post.id)?
            .into_iter()
            .map(|entry| ThreadLine {
                depth: entry.depth,
                id: entry.comment.id,
                author: name_of(entry.comment.author),
                content: entry.comment.content,
                votes: entry.comment.votes,
            })
            .collect();

        posts.push(FeedPost {
            id: post.id,
            author: name_of(post.author),
            content: post.content,
            votes: post.votes,
            comments,
        });
    }

    Ok(FeedView {
        username: user.username.clone(),
        posts,
    })
}

/// Render a report in the configured format.
pub fn render_report(report: &SimulationReport, format: ReportFormat) -> Result<String, AppError> {
    match format {
        ReportFormat::Text => Ok(report.to_string()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
