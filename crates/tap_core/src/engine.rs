use crate::achievements::unlock_achievements;
use crate::invariants::assert_invariants;
use crate::rewards::{compute_yields, CategoryLevels, RandomSource};
use crate::tasks::{advance_tasks, TaskStep};
use crate::{
    AchievementId, Constants, Event, EventEnvelope, PlayerState, Progression, ResourceKind,
    TaskId, UpgradeId,
};

/// The complete next state produced by an accepted transition, plus the
/// events it emitted. Rejected transitions produce no `Transition` at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PlayerState,
    pub events: Vec<EventEnvelope>,
}

impl Transition {
    pub fn newly_unlocked(&self) -> Vec<AchievementId> {
        newly_unlocked(&self.events)
    }
}

/// Achievement ids unlocked by the given events, in unlock order.
pub fn newly_unlocked(events: &[EventEnvelope]) -> Vec<AchievementId> {
    events
        .iter()
        .filter_map(|e| match &e.event {
            Event::AchievementUnlocked { achievement_id } => Some(achievement_id.clone()),
            _ => None,
        })
        .collect()
}

fn commit(mut next: PlayerState, events: Vec<EventEnvelope>) -> Transition {
    next.meta.version += 1;
    if cfg!(debug_assertions) {
        assert_invariants(&next);
    }
    Transition {
        state: next,
        events,
    }
}

fn grant_experience(
    state: &mut PlayerState,
    constants: &Constants,
    now_ms: u64,
    events: &mut Vec<EventEnvelope>,
) {
    let previous_level = state.progression.level;
    let experience = state
        .progression
        .experience
        .saturating_add(constants.experience_per_action);
    state.progression = Progression::from_experience(experience, constants.xp_per_level);
    if state.progression.level > previous_level {
        events.push(crate::emit(
            &mut state.counters,
            now_ms,
            Event::LevelUp {
                level: state.progression.level,
            },
        ));
    }
}

/// Perform the cooldown-gated action.
///
/// Order of operations:
/// 1. Reject if the cooldown has not elapsed.
/// 2. Draw one random factor and compute yields from current upgrade levels.
/// 3. Credit yields, count the action, restart the cooldown, grant experience.
/// 4. Advance action and gathering tasks.
/// 5. Unlock achievements against the post-action state.
pub fn perform_action(
    state: &PlayerState,
    constants: &Constants,
    now_ms: u64,
    random: &mut impl RandomSource,
) -> Option<Transition> {
    if !state.cooldown.is_ready(now_ms) {
        return None;
    }

    let factor = random.random_factor(constants.random_factor_min, constants.random_factor_max);
    let yields = compute_yields(
        CategoryLevels::from_upgrades(&state.upgrades),
        constants,
        factor,
    );

    let mut next = state.clone();
    let mut events = Vec::new();

    for kind in ResourceKind::ALL {
        next.credit(kind, yields.get(kind));
    }
    next.stats.total_actions = next.stats.total_actions.saturating_add(1);
    next.cooldown.last_action_ms = Some(now_ms);

    events.push(crate::emit(
        &mut next.counters,
        now_ms,
        Event::ActionPerformed {
            yields,
            total_actions: next.stats.total_actions,
        },
    ));

    grant_experience(&mut next, constants, now_ms, &mut events);
    advance_tasks(&mut next, TaskStep::Action { yields }, now_ms, &mut events);
    unlock_achievements(&mut next, now_ms, &mut events);

    Some(commit(next, events))
}

/// Buy the next level of `upgrade_id` with the primary resource.
///
/// Rejected for an unknown id, a maxed upgrade, or an unaffordable price;
/// a rejected purchase debits nothing.
pub fn purchase_upgrade(
    state: &PlayerState,
    upgrade_id: &UpgradeId,
    now_ms: u64,
) -> Option<Transition> {
    let index = state.upgrades.iter().position(|u| u.id == *upgrade_id)?;
    let upgrade = &state.upgrades[index];
    if upgrade.is_maxed() {
        return None;
    }
    let new_level = upgrade.level.checked_add(1)?;
    let cost = upgrade.next_cost();

    let mut next = state.clone();
    if !next.debit(ResourceKind::Primary, cost) {
        return None;
    }
    next.upgrades[index].level = new_level;
    next.stats.upgrades_purchased = next.stats.upgrades_purchased.saturating_add(1);

    let mut events = vec![crate::emit(
        &mut next.counters,
        now_ms,
        Event::UpgradePurchased {
            upgrade_id: upgrade_id.clone(),
            cost,
            new_level,
        },
    )];

    advance_tasks(&mut next, TaskStep::Purchase, now_ms, &mut events);
    unlock_achievements(&mut next, now_ms, &mut events);

    Some(commit(next, events))
}

/// Credit a completed task's reward once.
pub fn collect_task_reward(
    state: &PlayerState,
    task_id: &TaskId,
    now_ms: u64,
) -> Option<Transition> {
    let index = state.tasks.iter().position(|t| t.id == *task_id)?;
    let task = &state.tasks[index];
    if !task.completed || task.collected {
        return None;
    }
    let reward = task.reward;

    let mut next = state.clone();
    next.tasks[index].collected = true;
    next.credit(reward.kind, reward.amount);

    let mut events = vec![crate::emit(
        &mut next.counters,
        now_ms,
        Event::TaskRewardCollected {
            task_id: task_id.clone(),
            reward,
        },
    )];
    unlock_achievements(&mut next, now_ms, &mut events);

    Some(commit(next, events))
}

/// Credit an unlocked achievement's reward once.
pub fn collect_achievement_reward(
    state: &PlayerState,
    achievement_id: &AchievementId,
    now_ms: u64,
) -> Option<Transition> {
    let index = state
        .achievements
        .iter()
        .position(|a| a.id == *achievement_id)?;
    let achievement = &state.achievements[index];
    if !achievement.unlocked || achievement.collected {
        return None;
    }
    let reward = achievement.reward;

    let mut next = state.clone();
    next.achievements[index].collected = true;
    next.credit(reward.kind, reward.amount);

    let mut events = vec![crate::emit(
        &mut next.counters,
        now_ms,
        Event::AchievementRewardCollected {
            achievement_id: achievement_id.clone(),
            reward,
        },
    )];
    unlock_achievements(&mut next, now_ms, &mut events);

    Some(commit(next, events))
}
