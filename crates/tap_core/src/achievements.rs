use crate::{AchievementCriterion, Event, EventEnvelope, PlayerState};

pub(crate) fn criterion_met(criterion: AchievementCriterion, state: &PlayerState) -> bool {
    match criterion {
        AchievementCriterion::TotalActions { at_least } => state.stats.total_actions >= at_least,
        AchievementCriterion::ResourceHeld { kind, at_least } => state.resource(kind) >= at_least,
        AchievementCriterion::UpgradesPurchased { at_least } => {
            state.stats.upgrades_purchased >= at_least
        }
    }
}

/// Unlock every locked achievement whose criterion holds for `state`.
///
/// Unlocking is one-way: nothing here ever clears `unlocked`.
pub(crate) fn unlock_achievements(
    state: &mut PlayerState,
    now_ms: u64,
    events: &mut Vec<EventEnvelope>,
) {
    let newly: Vec<usize> = state
        .achievements
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.unlocked && criterion_met(a.criterion, state))
        .map(|(index, _)| index)
        .collect();

    for index in newly {
        let achievement = &mut state.achievements[index];
        achievement.unlocked = true;
        let achievement_id = achievement.id.clone();
        events.push(crate::emit(
            &mut state.counters,
            now_ms,
            Event::AchievementUnlocked { achievement_id },
        ));
    }
}
