//! Shared test fixtures for tap_core and downstream crates.
//!
//! `base_content()` mirrors the shipped balance (three upgrades, three daily
//! tasks, four achievements) so scenario tests read like real play.

use crate::{
    initial_state, AchievementCriterion, AchievementDef, AchievementId, Constants, GameContent,
    PlayerId, PlayerProfile, PlayerState, ResourceKind, Reward, TaskCriterion, TaskDef, TaskId,
    UpgradeCategory, UpgradeDef, UpgradeId,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Start of 2100-01-01 UTC; far enough that fixture tasks never expire.
pub const TASKS_EXPIRE_AT_MS: u64 = 4_102_444_800_000;

pub fn base_constants() -> Constants {
    Constants {
        base_yield_primary: 1.0,
        base_yield_secondary: 0.5,
        base_yield_tertiary: 0.2,
        tool_step: 0.2,
        quality_step: 0.5,
        multiplier_step: 0.1,
        random_factor_min: 0.9,
        random_factor_max: 1.1,
        min_primary_yield: 1,
        action_cooldown_ms: 3_000,
        experience_per_action: 1,
        xp_per_level: 100,
    }
}

fn reward(kind: ResourceKind, amount: u64) -> Reward {
    Reward { kind, amount }
}

pub fn base_content() -> GameContent {
    GameContent {
        content_version: "test".to_string(),
        constants: base_constants(),
        upgrades: vec![
            UpgradeDef {
                id: UpgradeId("upgrade_axe".to_string()),
                name: "Better Axe".to_string(),
                description: "Increases wood gain per tap".to_string(),
                max_level: Some(5),
                base_cost: 10.0,
                cost_multiplier: 1.5,
                base_effect: 1.0,
                effect_growth: 1.2,
                category: UpgradeCategory::Tool,
            },
            UpgradeDef {
                id: UpgradeId("upgrade_tree_quality".to_string()),
                name: "Tree Quality".to_string(),
                description: "Improves the quality of your trees".to_string(),
                max_level: Some(3),
                base_cost: 25.0,
                cost_multiplier: 2.0,
                base_effect: 1.0,
                effect_growth: 1.5,
                category: UpgradeCategory::Quality,
            },
            UpgradeDef {
                id: UpgradeId("upgrade_resource_multiplier".to_string()),
                name: "Resource Multiplier".to_string(),
                description: "Multiplies all resources gained".to_string(),
                max_level: None,
                base_cost: 50.0,
                cost_multiplier: 2.5,
                base_effect: 0.1,
                effect_growth: 1.1,
                category: UpgradeCategory::Multiplier,
            },
        ],
        tasks: vec![
            TaskDef {
                id: TaskId("task_eager_tapper".to_string()),
                name: "Eager Tapper".to_string(),
                description: "Tap the tree 50 times".to_string(),
                criterion: TaskCriterion::Actions,
                goal: 50,
                reward: reward(ResourceKind::Primary, 25),
            },
            TaskDef {
                id: TaskId("task_resource_collector".to_string()),
                name: "Resource Collector".to_string(),
                description: "Collect 100 wood".to_string(),
                criterion: TaskCriterion::Gathered {
                    kind: ResourceKind::Primary,
                },
                goal: 100,
                reward: reward(ResourceKind::Secondary, 15),
            },
            TaskDef {
                id: TaskId("task_upgrade_enthusiast".to_string()),
                name: "Upgrade Enthusiast".to_string(),
                description: "Purchase any upgrade".to_string(),
                criterion: TaskCriterion::UpgradesPurchased,
                goal: 1,
                reward: reward(ResourceKind::Tertiary, 10),
            },
        ],
        achievements: vec![
            AchievementDef {
                id: AchievementId("ach_first_tap".to_string()),
                name: "First Tap".to_string(),
                description: "Tap your first tree".to_string(),
                criterion: AchievementCriterion::TotalActions { at_least: 1 },
                reward: reward(ResourceKind::Primary, 5),
            },
            AchievementDef {
                id: AchievementId("ach_ten_taps".to_string()),
                name: "Ten Taps".to_string(),
                description: "Tap trees 10 times".to_string(),
                criterion: AchievementCriterion::TotalActions { at_least: 10 },
                reward: reward(ResourceKind::Secondary, 10),
            },
            AchievementDef {
                id: AchievementId("ach_first_upgrade".to_string()),
                name: "First Upgrade".to_string(),
                description: "Purchase your first upgrade".to_string(),
                criterion: AchievementCriterion::UpgradesPurchased { at_least: 1 },
                reward: reward(ResourceKind::Tertiary, 5),
            },
            AchievementDef {
                id: AchievementId("ach_sap_master".to_string()),
                name: "Sap Master".to_string(),
                description: "Collect 50 sap".to_string(),
                criterion: AchievementCriterion::ResourceHeld {
                    kind: ResourceKind::Tertiary,
                    at_least: 50,
                },
                reward: reward(ResourceKind::Tertiary, 25),
            },
        ],
    }
}

pub fn base_profile() -> PlayerProfile {
    PlayerProfile {
        id: PlayerId("player_test".to_string()),
        username: "TreeTapper".to_string(),
        joined_at_ms: 0,
    }
}

/// Fresh player built from `content`, tasks expiring at `TASKS_EXPIRE_AT_MS`.
pub fn base_state(content: &GameContent) -> PlayerState {
    initial_state(content, base_profile(), TASKS_EXPIRE_AT_MS)
}

/// Fresh player whose action is never gated.
pub fn cooldown_free_state(content: &GameContent) -> PlayerState {
    let mut state = base_state(content);
    state.cooldown.cooldown_ms = 0;
    state
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
