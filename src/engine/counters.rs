//! Aggregate Counters
//!
//! Process-wide running totals, updated as a side effect of every successful
//! mutation while the engine lock is held.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ActionKind, VoteDirection};

/// Running totals of engine activity.
///
/// Invariant: `total_votes == total_upvotes + total_downvotes`.
#[derive(Debug, Clone)]
pub struct AggregateCounters {
    pub total_posts: u64,
    pub total_votes: u64,
    pub total_upvotes: u64,
    pub total_downvotes: u64,
    pub total_comments: u64,
    pub total_messages: u64,
    pub total_actions: u64,
    pub disconnected_users: u64,
    pub breakdown: BTreeMap<ActionKind, u64>,
}

impl AggregateCounters {
    pub fn new() -> Self {
        Self {
            total_posts: 0,
            total_votes: 0,
            total_upvotes: 0,
            total_downvotes: 0,
            total_comments: 0,
            total_messages: 0,
            total_actions: 0,
            disconnected_users: 0,
            breakdown: ActionKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
        }
    }

    /// Bill one action to the global total.
    pub fn record_action(&mut self) {
        self.total_actions += 1;
    }

    pub fn record_post(&mut self) {
        self.total_posts += 1;
        self.bump(ActionKind::Posts);
        self.record_action();
    }

    pub fn record_comment(&mut self) {
        self.total_comments += 1;
        self.bump(ActionKind::Comments);
        self.record_action();
    }

    pub fn record_message(&mut self) {
        self.total_messages += 1;
        self.bump(ActionKind::Messages);
        self.record_action();
    }

    /// Votes are counted but not billed as actions.
    pub fn record_vote(&mut self, direction: VoteDirection) {
        self.total_votes += 1;
        match direction {
            VoteDirection::Up => self.total_upvotes += 1,
            VoteDirection::Down => self.total_downvotes += 1,
        }
        self.bump(ActionKind::Votes);
    }

    fn bump(&mut self, kind: ActionKind) {
        *self.breakdown.entry(kind).or_insert(0) += 1;
    }

    pub fn snapshot(&self, started_at: DateTime<Utc>, elapsed_secs: f64) -> CounterSnapshot {
        CounterSnapshot {
            total_posts: self.total_posts,
            total_votes: self.total_votes,
            total_upvotes: self.total_upvotes,
            total_downvotes: self.total_downvotes,
            total_comments: self.total_comments,
            total_messages: self.total_messages,
            total_actions: self.total_actions,
            disconnected_users: self.disconnected_users,
            breakdown: self.breakdown.clone(),
            started_at,
            elapsed_secs,
        }
    }
}

impl Default for AggregateCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Consistent copy of the counters taken under the engine lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterSnapshot {
    pub total_posts: u64,
    pub total_votes: u64,
    pub total_upvotes: u64,
    pub total_downvotes: u64,
    pub total_comments: u64,
    pub total_messages: u64,
    pub total_actions: u64,
    pub disconnected_users: u64,
    pub breakdown: BTreeMap<ActionKind, u64>,
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}

impl CounterSnapshot {
    /// Operations (billed actions plus votes) per second since engine start.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        (self.total_actions + self.total_votes) as f64 / self.elapsed_secs
    }

    /// Breakdown count for one kind.
    pub fn count(&self, kind: ActionKind) -> u64 {
        self.breakdown.get(&kind).copied().unwrap_or(0)
    }
}
