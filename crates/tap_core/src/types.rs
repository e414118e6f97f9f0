//! Type definitions for `tap_core`.
//!
//! All public types, structs, enums, and ID newtypes used by the engine.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PlayerId);
string_id!(UpgradeId);
string_id!(TaskId);
string_id!(AchievementId);
string_id!(EventId);

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Primary,
    Secondary,
    Tertiary,
}

impl ResourceKind {
    /// All kinds in display order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Primary,
        ResourceKind::Secondary,
        ResourceKind::Tertiary,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeCategory {
    /// Boosts the primary resource only.
    Tool,
    /// Boosts every resource.
    Quality,
    /// Boosts every resource; usually uncapped.
    Multiplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskCriterion {
    /// One step per accepted action.
    Actions,
    /// Steps equal to the yield of `kind` on each accepted action.
    Gathered { kind: ResourceKind },
    /// One step per accepted upgrade purchase.
    UpgradesPurchased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementCriterion {
    TotalActions { at_least: u64 },
    ResourceHeld { kind: ResourceKind, at_least: u64 },
    UpgradesPurchased { at_least: u64 },
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub meta: MetaState,
    pub profile: PlayerProfile,
    pub progression: Progression,
    pub resources: Vec<Resource>,
    pub upgrades: Vec<Upgrade>,
    pub tasks: Vec<TaskState>,
    pub achievements: Vec<AchievementState>,
    pub cooldown: CooldownGate,
    pub stats: Stats,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaState {
    /// Bumped once per accepted transition.
    pub version: u64,
    pub content_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub username: String,
    pub joined_at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub experience: u64,
    /// Experience required to leave the current level, counted from its start.
    pub next_level_xp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub kind: ResourceKind,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: String,
    pub description: String,
    pub level: u32,
    /// `None` means unlimited.
    pub max_level: Option<u32>,
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub base_effect: f64,
    pub effect_growth: f64,
    pub category: UpgradeCategory,
}

impl Upgrade {
    pub fn is_maxed(&self) -> bool {
        self.max_level.is_some_and(|max| self.level >= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub criterion: TaskCriterion,
    pub goal: u64,
    pub progress: u64,
    pub reward: Reward,
    pub completed: bool,
    /// Guards against crediting the reward twice; `completed` stays set.
    pub collected: bool,
    pub expires_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementState {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub criterion: AchievementCriterion,
    pub reward: Reward,
    pub unlocked: bool,
    pub collected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownGate {
    /// `None` until the first accepted action.
    pub last_action_ms: Option<u64>,
    pub cooldown_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_actions: u64,
    pub upgrades_purchased: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
}

impl PlayerState {
    pub fn resource(&self, kind: ResourceKind) -> u64 {
        self.resources
            .iter()
            .find(|r| r.kind == kind)
            .map_or(0, |r| r.amount)
    }

    pub fn upgrade(&self, id: &UpgradeId) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == *id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&TaskState> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    pub fn achievement(&self, id: &AchievementId) -> Option<&AchievementState> {
        self.achievements.iter().find(|a| a.id == *id)
    }

    /// Adds `amount` to `kind`, creating the entry if the state lacks one.
    pub(crate) fn credit(&mut self, kind: ResourceKind, amount: u64) {
        if let Some(resource) = self.resources.iter_mut().find(|r| r.kind == kind) {
            resource.amount = resource.amount.saturating_add(amount);
        } else {
            self.resources.push(Resource { kind, amount });
            self.resources.sort_by_key(|r| r.kind);
        }
    }

    /// Removes `amount` from `kind`. Returns `false` (and changes nothing)
    /// when the balance is too small.
    pub(crate) fn debit(&mut self, kind: ResourceKind, amount: u64) -> bool {
        let Some(resource) = self.resources.iter_mut().find(|r| r.kind == kind) else {
            return amount == 0;
        };
        match resource.amount.checked_sub(amount) {
            Some(remaining) => {
                resource.amount = remaining;
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub constants: Constants,
    pub upgrades: Vec<UpgradeDef>,
    pub tasks: Vec<TaskDef>,
    pub achievements: Vec<AchievementDef>,
}

/// Balance constants shared by every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    pub base_yield_primary: f64,
    pub base_yield_secondary: f64,
    pub base_yield_tertiary: f64,
    pub tool_step: f64,
    pub quality_step: f64,
    pub multiplier_step: f64,
    pub random_factor_min: f64,
    pub random_factor_max: f64,
    pub min_primary_yield: u64,
    pub action_cooldown_ms: u64,
    pub experience_per_action: u64,
    pub xp_per_level: u64,
}

impl Constants {
    pub fn base_yield(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Primary => self.base_yield_primary,
            ResourceKind::Secondary => self.base_yield_secondary,
            ResourceKind::Tertiary => self.base_yield_tertiary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub max_level: Option<u32>,
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub base_effect: f64,
    pub effect_growth: f64,
    pub category: UpgradeCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub criterion: TaskCriterion,
    pub goal: u64,
    pub reward: Reward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub criterion: AchievementCriterion,
    pub reward: Reward,
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub at_ms: u64,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ActionPerformed {
        yields: crate::Yields,
        total_actions: u64,
    },
    UpgradePurchased {
        upgrade_id: UpgradeId,
        cost: u64,
        new_level: u32,
    },
    TaskCompleted {
        task_id: TaskId,
    },
    TaskRewardCollected {
        task_id: TaskId,
        reward: Reward,
    },
    AchievementUnlocked {
        achievement_id: AchievementId,
    },
    AchievementRewardCollected {
        achievement_id: AchievementId,
        reward: Reward,
    },
    LevelUp {
        level: u32,
    },
}
