//! `tap_core`: deterministic progression engine for a tap-to-gather game.
//!
//! No IO. All randomness via an injected `RandomSource`, all time via an
//! injected `Clock` or an explicit `now_ms`.

mod achievements;
pub mod clock;
pub mod cooldown;
mod cost;
mod engine;
mod id;
pub mod invariants;
mod progression;
pub mod rewards;
pub mod session;
mod setup;
mod tasks;
#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cost::upgrade_cost;
pub use engine::{
    collect_achievement_reward, collect_task_reward, newly_unlocked, perform_action,
    purchase_upgrade, Transition,
};
pub use id::{generate_player_id, generate_uuid};
pub use progression::level_for_experience;
pub use rewards::{compute_yields, CategoryLevels, FixedFactor, RandomSource, RngSource, Yields};
pub use session::{Session, SharedSession};
pub use setup::initial_state;
pub use types::*;

pub(crate) fn emit(counters: &mut Counters, at_ms: u64, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, at_ms, event }
}

#[cfg(test)]
mod tests;
