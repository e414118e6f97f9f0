//! Structural invariants of `PlayerState`.
//!
//! A violation means a transition is wrong, not that the caller misbehaved,
//! so these checks panic. Transitions run them in debug builds only.

use std::collections::HashSet;

use crate::PlayerState;

pub fn assert_invariants(state: &PlayerState) {
    let kinds: HashSet<_> = state.resources.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds.len(),
        state.resources.len(),
        "duplicate resource kinds in {:?}",
        state.resources
    );

    for upgrade in &state.upgrades {
        if let Some(max) = upgrade.max_level {
            assert!(
                upgrade.level <= max,
                "upgrade '{}' level {} exceeds max {}",
                upgrade.id,
                upgrade.level,
                max,
            );
        }
    }

    for task in &state.tasks {
        assert!(
            task.progress <= task.goal,
            "task '{}' progress {} exceeds goal {}",
            task.id,
            task.progress,
            task.goal,
        );
        assert_eq!(
            task.completed,
            task.progress >= task.goal,
            "task '{}' completed flag disagrees with progress {}/{}",
            task.id,
            task.progress,
            task.goal,
        );
        assert!(
            !task.collected || task.completed,
            "task '{}' collected before completion",
            task.id,
        );
    }

    for achievement in &state.achievements {
        assert!(
            !achievement.collected || achievement.unlocked,
            "achievement '{}' collected while locked",
            achievement.id,
        );
    }

    if let Some(last) = state.cooldown.last_action_ms {
        assert!(
            state.stats.total_actions > 0,
            "last action at {last} recorded with zero total actions",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{base_content, base_state};

    #[test]
    fn fresh_state_is_valid() {
        let content = base_content();
        assert_invariants(&base_state(&content));
    }

    #[test]
    #[should_panic(expected = "exceeds max")]
    fn level_above_max_panics() {
        let content = base_content();
        let mut state = base_state(&content);
        state.upgrades[0].level = 99;
        assert_invariants(&state);
    }

    #[test]
    #[should_panic(expected = "collected while locked")]
    fn collected_locked_achievement_panics() {
        let content = base_content();
        let mut state = base_state(&content);
        state.achievements[0].collected = true;
        assert_invariants(&state);
    }

    #[test]
    #[should_panic(expected = "completed flag disagrees")]
    fn completed_without_progress_panics() {
        let content = base_content();
        let mut state = base_state(&content);
        state.tasks[0].completed = true;
        assert_invariants(&state);
    }
}
