//! Single-owner handle around one player's state.
//!
//! Every accepted transition swaps in a freshly built `PlayerState`; the old
//! snapshot stays valid for anyone still holding it, so `Arc::ptr_eq` or
//! `meta.version` tell a caller whether anything changed.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::Clock;
use crate::engine::{self, Transition};
use crate::rewards::RandomSource;
use crate::{AchievementId, Constants, EventEnvelope, PlayerState, TaskId, Upgrade, UpgradeId};

/// One lock around the whole session: every transition touches several
/// fields that must change together.
pub type SharedSession<C, R> = Arc<Mutex<Session<C, R>>>;

pub struct Session<C, R> {
    state: Arc<PlayerState>,
    constants: Constants,
    clock: C,
    random: R,
}

impl<C: Clock, R: RandomSource> Session<C, R> {
    pub fn new(state: PlayerState, constants: Constants, clock: C, random: R) -> Self {
        Self {
            state: Arc::new(state),
            constants,
            clock,
            random,
        }
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> Arc<PlayerState> {
        Arc::clone(&self.state)
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn apply(
        &mut self,
        transition: &'static str,
        outcome: Option<Transition>,
    ) -> Vec<EventEnvelope> {
        let Some(Transition { state, events }) = outcome else {
            tracing::trace!(transition, version = self.state.meta.version, "no-op");
            return Vec::new();
        };
        tracing::debug!(
            transition,
            version = state.meta.version,
            events = events.len(),
            "accepted"
        );
        self.state = Arc::new(state);
        events
    }

    pub fn perform_action(&mut self) -> Vec<EventEnvelope> {
        let now_ms = self.clock.now_ms();
        let outcome =
            engine::perform_action(&self.state, &self.constants, now_ms, &mut self.random);
        self.apply("perform_action", outcome)
    }

    pub fn purchase_upgrade(&mut self, upgrade_id: &UpgradeId) -> Vec<EventEnvelope> {
        let now_ms = self.clock.now_ms();
        let outcome = engine::purchase_upgrade(&self.state, upgrade_id, now_ms);
        self.apply("purchase_upgrade", outcome)
    }

    pub fn collect_task_reward(&mut self, task_id: &TaskId) -> Vec<EventEnvelope> {
        let now_ms = self.clock.now_ms();
        let outcome = engine::collect_task_reward(&self.state, task_id, now_ms);
        self.apply("collect_task_reward", outcome)
    }

    pub fn collect_achievement_reward(
        &mut self,
        achievement_id: &AchievementId,
    ) -> Vec<EventEnvelope> {
        let now_ms = self.clock.now_ms();
        let outcome = engine::collect_achievement_reward(&self.state, achievement_id, now_ms);
        self.apply("collect_achievement_reward", outcome)
    }

    /// Milliseconds until the next action is accepted, per the session clock.
    pub fn cooldown_remaining(&self) -> u64 {
        self.cooldown_remaining_at(self.clock.now_ms())
    }

    pub fn cooldown_remaining_at(&self, now_ms: u64) -> u64 {
        self.state.cooldown.remaining(now_ms)
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining() == 0
    }

    /// Price of the next level, or `None` for unknown or maxed upgrades.
    pub fn next_upgrade_cost(&self, upgrade_id: &UpgradeId) -> Option<u64> {
        self.state
            .upgrade(upgrade_id)
            .filter(|u| !u.is_maxed())
            .map(Upgrade::next_cost)
    }

    pub fn into_shared(self) -> SharedSession<C, R> {
        Arc::new(Mutex::new(self))
    }
}
