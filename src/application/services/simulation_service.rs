//! Simulation Service
//!
//! Generates synthetic forum activity against a shared engine. The driver
//! only calls the engine's public operations; it never reaches into the
//! store.

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationSettings;
use crate::domain::{PostId, UserId, VoteDirection};
use crate::engine::Engine;
use crate::shared::error::{AppError, EngineError};

/// Exponent skewing community membership towards the first communities.
const MEMBERSHIP_SKEW: f64 = 1.2;

/// Result of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationOutcome {
    pub users_simulated: usize,
    pub seed: u64,
    pub elapsed: Duration,
}

/// Drives a full simulation run across concurrent workers.
pub struct SimulationDriver {
    engine: Arc<Engine>,
    settings: SimulationSettings,
}

impl SimulationDriver {
    pub fn new(engine: Arc<Engine>, settings: SimulationSettings) -> Self {
        Self { engine, settings }
    }

    /// Name of the community at `index` (0-based).
    pub fn community_name(index: usize) -> String {
        format!("community{}", index + 1)
    }

    /// Create the configured communities. Names that already exist are kept.
    pub fn setup_communities(&self) -> Result<(), AppError> {
        for index in 0..self.settings.communities {
            match self.engine.create_community(&Self::community_name(index)) {
                Ok(()) | Err(EngineError::CommunityExists(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Run the simulation to completion.
    ///
    /// Users are split into contiguous ranges, one per worker. Each worker
    /// runs on the blocking pool with its own RNG seeded from `seed + index`.
    pub async fn run(&self) -> Result<SimulationOutcome, AppError> {
        let started = Instant::now();
        let seed = self.settings.seed.unwrap_or_else(rand::random);

        self.setup_communities()?;

        tracing::info!(
            users = self.settings.users,
            communities = self.settings.communities,
            workers = self.settings.workers,
            seed,
            "Simulation started"
        );

        let handles = partition(self.settings.users, self.settings.workers)
            .into_iter()
            .enumerate()
            .map(|(worker, range)| {
                let mut simulator = UserSimulator::new(
                    self.engine.clone(),
                    self.settings.clone(),
                    seed.wrapping_add(worker as u64),
                );
                tokio::task::spawn_blocking(move || simulator.simulate_users(range))
            });

        let mut users_simulated = 0;
        for result in try_join_all(handles).await? {
            users_simulated += result?;
        }

        let outcome = SimulationOutcome {
            users_simulated,
            seed,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            users = outcome.users_simulated,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Simulation complete"
        );

        Ok(outcome)
    }
}

/// Split `total` items into at most `workers` contiguous, non-empty ranges.
fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1).min(total.max(1));
    let chunk = total / workers;
    let extra = total % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = chunk + usize::from(worker < extra);
        if len > 0 {
            ranges.push(start..start + len);
        }
        start += len;
    }
    ranges
}

/// Behaviour of a single worker.
struct UserSimulator {
    engine: Arc<Engine>,
    settings: SimulationSettings,
    rng: StdRng,
}

impl UserSimulator {
    fn new(engine: Arc<Engine>, settings: SimulationSettings, seed: u64) -> Self {
        Self {
            engine,
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn simulate_users(&mut self, range: Range<usize>) -> Result<usize, AppError> {
        let count = range.len();
        for index in range {
            self.simulate_user(index)?;
        }
        Ok(count)
    }

    fn simulate_user(&mut self, index: usize) -> Result<(), EngineError> {
        let username = format!("user{}", index + 1);
        let user = self.engine.register_user(&username).id;

        let joined = self.join_communities(user)?;
        if !joined.is_empty() && self.rng.random_bool(self.settings.leave_probability) {
            let name = &joined[self.rng.random_range(0..joined.len())];
            self.engine.leave_community(user, name)?;
        }

        if self.rng.random_bool(self.settings.disconnect_probability) {
            self.engine.set_user_connection(user, false)?;
        }

        for n in 0..self.rng.random_range(1..=3) {
            let community = self.random_community();
            let content = format!("Post content {} from {}", n + 1, username);
            let post = self.engine.create_post(user, &community, &content)?;
            self.engage_with_post(user, post.id)?;
        }

        if self.rng.random_bool(self.settings.message_probability) {
            self.send_random_message(user, &username)?;
        }

        if self.rng.random_bool(self.settings.reply_probability) {
            if let Some(latest) = self.engine.retrieve_messages(user).pop() {
                let content = format!("Thanks for the message, from {}", username);
                self.engine.reply_to_message(user, &latest, &content)?;
            }
        }

        Ok(())
    }

    /// Join the first `k` communities, `k` skewed towards small values.
    fn join_communities(&mut self, user: UserId) -> Result<Vec<String>, EngineError> {
        let total = self.settings.communities;
        let skew: f64 = self.rng.random::<f64>().powf(MEMBERSHIP_SKEW);
        let count = ((total as f64 * skew) as usize + 1).min(total);

        let names: Vec<String> = (0..count).map(SimulationDriver::community_name).collect();
        for name in &names {
            self.engine.join_community(user, name)?;
        }
        Ok(names)
    }

    fn engage_with_post(&mut self, user: UserId, post: PostId) -> Result<(), EngineError> {
        for _ in 0..self.rng.random_range(1..=5) {
            let direction = self.random_vote();
            self.engine.vote_post(post, direction)?;
        }

        for n in 0..self.rng.random_range(1..=2) {
            let content = format!("Comment {} on post {}", n + 1, post);
            let comment = self.engine.comment_on_post(user, post, &content)?;

            for _ in 0..self.rng.random_range(1..=5) {
                let direction = self.random_vote();
                self.engine.vote_comment(comment.id, direction)?;
            }

            for m in 0..self.rng.random_range(1..=2) {
                let content = format!("Reply {} to comment {}", m + 1, comment.id);
                self.engine.reply_to_comment(user, comment.id, &content)?;
            }
        }

        if self.rng.random_bool(self.settings.repost_probability) {
            let community = self.random_community();
            self.engine.create_repost(user, post, &community)?;
        }

        Ok(())
    }

    fn send_random_message(&mut self, user: UserId, username: &str) -> Result<(), EngineError> {
        let registered = self.engine.user_count() as u64;
        if registered < 2 {
            return Ok(());
        }

        let target = UserId::new(self.rng.random_range(1..=registered));
        if target == user {
            return Ok(());
        }

        let recipient = self.engine.user(target)?;
        let content = format!("Hello from {} to {}!", username, recipient.username);
        self.engine.send_direct_message(user, target, &content)?;
        Ok(())
    }

    fn random_community(&mut self) -> String {
        SimulationDriver::community_name(self.rng.random_range(0..self.settings.communities))
    }

    fn random_vote(&mut self) -> VoteDirection {
        if self.rng.random_bool(self.settings.upvote_probability) {
            VoteDirection::Up
        } else {
            VoteDirection::Down
        }
    }
}
