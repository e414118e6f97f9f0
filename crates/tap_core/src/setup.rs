use crate::{
    AchievementState, CooldownGate, Counters, GameContent, MetaState, PlayerProfile, PlayerState,
    Progression, Resource, ResourceKind, Stats, TaskState, Upgrade,
};

/// Session-start state: empty balances, level-0 upgrades, the content's task
/// and achievement sets, and no previous action.
pub fn initial_state(
    content: &GameContent,
    profile: PlayerProfile,
    tasks_expire_at_ms: u64,
) -> PlayerState {
    let upgrades = content
        .upgrades
        .iter()
        .map(|def| Upgrade {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            level: 0,
            max_level: def.max_level,
            base_cost: def.base_cost,
            cost_multiplier: def.cost_multiplier,
            base_effect: def.base_effect,
            effect_growth: def.effect_growth,
            category: def.category,
        })
        .collect();

    let tasks = content
        .tasks
        .iter()
        .map(|def| TaskState {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            criterion: def.criterion,
            goal: def.goal,
            progress: 0,
            reward: def.reward,
            completed: false,
            collected: false,
            expires_at_ms: tasks_expire_at_ms,
        })
        .collect();

    let achievements = content
        .achievements
        .iter()
        .map(|def| AchievementState {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            criterion: def.criterion,
            reward: def.reward,
            unlocked: false,
            collected: false,
        })
        .collect();

    PlayerState {
        meta: MetaState {
            version: 0,
            content_version: content.content_version.clone(),
        },
        profile,
        progression: Progression::from_experience(0, content.constants.xp_per_level),
        resources: ResourceKind::ALL
            .iter()
            .map(|&kind| Resource { kind, amount: 0 })
            .collect(),
        upgrades,
        tasks,
        achievements,
        cooldown: CooldownGate::new(content.constants.action_cooldown_ms),
        stats: Stats::default(),
        counters: Counters::default(),
    }
}
