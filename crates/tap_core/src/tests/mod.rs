use super::*;
use crate::test_fixtures::{base_content, base_state, cooldown_free_state};


// --- Shared test helpers ------------------------------------------------

const START_MS: u64 = 1_000_000;

fn test_content() -> GameContent {
    base_content()
}

fn axe() -> UpgradeId {
    UpgradeId("upgrade_axe".to_string())
}

fn quality() -> UpgradeId {
    UpgradeId("upgrade_tree_quality".to_string())
}

fn multiplier() -> UpgradeId {
    UpgradeId("upgrade_resource_multiplier".to_string())
}

fn task(id: &str) -> TaskId {
    TaskId(id.to_string())
}

fn achievement(id: &str) -> AchievementId {
    AchievementId(id.to_string())
}

/// Run one action at `now_ms` with the random factor pinned to 1.0.
fn act(state: &PlayerState, content: &GameContent, now_ms: u64) -> Transition {
    perform_action(state, &content.constants, now_ms, &mut FixedFactor(1.0))
        .expect("action should be accepted")
}

/// Run `count` cooldown-free actions, one millisecond apart.
fn act_times(mut state: PlayerState, content: &GameContent, count: u64) -> PlayerState {
    for i in 0..count {
        state = act(&state, content, START_MS + i).state;
    }
    state
}

fn with_primary(mut state: PlayerState, amount: u64) -> PlayerState {
    state.credit(ResourceKind::Primary, amount);
    state
}
