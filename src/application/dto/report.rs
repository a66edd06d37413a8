//! Report DTOs
//!
//! Data structures for the end-of-run report, rendered as text through
//! `Display` or as JSON through `serde`.

use std::fmt;

use serde::Serialize;

use crate::domain::{ActionKind, CommentId, PostId};
use crate::engine::CounterSnapshot;

/// Full end-of-run report
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub users: usize,
    pub communities: usize,
    pub counters: CounterSnapshot,
    pub throughput: f64,
    pub community_stats: Vec<CommunityStats>,
    pub leaderboard: Vec<KarmaEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedView>,
    pub messages: Vec<MessageLine>,
}

/// Membership and post counts of one community
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityStats {
    pub name: String,
    pub members: usize,
    pub posts: usize,
}

/// Leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KarmaEntry {
    pub username: String,
    pub karma: i64,
}

/// Feed of one user
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub username: String,
    pub posts: Vec<FeedPost>,
}

/// Post in a feed, with its flattened comment thread
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    pub id: PostId,
    pub author: String,
    pub content: String,
    pub votes: i64,
    pub comments: Vec<ThreadLine>,
}

/// Comment in a flattened thread
#[derive(Debug, Clone, Serialize)]
pub struct ThreadLine {
    pub depth: usize,
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub votes: i64,
}

/// Direct message with resolved usernames
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageLine {
    pub from: String,
    pub to: String,
    pub content: String,
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counters;

        writeln!(f, "Simulation Complete. Metrics:")?;
        writeln!(f, "Users: {}", self.users)?;
        writeln!(f, "Communities: {}", self.communities)?;
        writeln!(f, "Total Posts: {}", c.total_posts)?;
        writeln!(
            f,
            "Total Votes: {} (Upvotes: {}, Downvotes: {})",
            c.total_votes, c.total_upvotes, c.total_downvotes
        )?;
        writeln!(f, "Total Comments: {}", c.total_comments)?;
        writeln!(f, "Total Messages: {}", c.total_messages)?;
        writeln!(f, "Total Actions: {}", c.total_actions)?;
        writeln!(f, "Throughput (operations/sec): {:.2}", self.throughput)?;
        writeln!(f, "Disconnected Users: {}", c.disconnected_users)?;

        writeln!(f, "\nAction Breakdown:")?;
        for kind in ActionKind::ALL {
            writeln!(f, "{}: {}", kind, c.count(kind))?;
        }

        writeln!(f, "\nCommunity Metrics:")?;
        for (rank, stats) in self.community_stats.iter().enumerate() {
            writeln!(
                f,
                "{}. {} - Members: {}, Posts: {}",
                rank + 1,
                stats.name,
                stats.members,
                stats.posts
            )?;
        }

        writeln!(f, "\nTop Users by Karma:")?;
        for (rank, entry) in self.leaderboard.iter().enumerate() {
            writeln!(f, "{}. {} - Karma: {}", rank + 1, entry.username, entry.karma)?;
        }

        if let Some(feed) = &self.feed {
            writeln!(f, "\nFeed for {}:", feed.username)?;
            for post in &feed.posts {
                writeln!(
                    f,
                    "Post ID {} by {}: {} (Votes: {})",
                    post.id, post.author, post.content, post.votes
                )?;
                if !post.comments.is_empty() {
                    writeln!(f, "  Comments:")?;
                }
                for line in &post.comments {
                    writeln!(
                        f,
                        "{}Comment ID {} by {}: {} (Votes: {})",
                        "  ".repeat(line.depth + 1),
                        line.id,
                        line.author,
                        line.content,
                        line.votes
                    )?;
                }
            }
        }

        writeln!(f, "\nDirect Messages:")?;
        for message in &self.messages {
            writeln!(f, "From {} to {}: {}", message.from, message.to, message.content)?;
        }

        Ok(())
    }
}
