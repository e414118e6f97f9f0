//! Content loading and session setup for front ends driving `tap_core`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tap_core::{
    generate_player_id, initial_state, AchievementDef, Clock, Constants, GameContent,
    PlayerProfile, PlayerState, RngSource, Session, SystemClock, TaskDef, UpgradeDef,
};

/// A session on the wall clock with a seeded RNG.
pub type LiveSession = Session<SystemClock, RngSource<ChaCha8Rng>>;

#[derive(Deserialize)]
struct ConstantsFile {
    content_version: String,
    constants: Constants,
}

#[derive(Deserialize)]
struct UpgradesFile {
    upgrades: Vec<UpgradeDef>,
}

#[derive(Deserialize)]
struct TasksFile {
    tasks: Vec<TaskDef>,
}

#[derive(Deserialize)]
struct AchievementsFile {
    achievements: Vec<AchievementDef>,
}

fn assert_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for id in ids {
        assert!(!id.is_empty(), "{kind} has empty id");
        assert!(seen.insert(id), "duplicate {kind} id '{id}'");
    }
}

/// Validates loaded content, panicking on any authoring error.
///
/// Catches mistakes like: two upgrades sharing an id, a cost curve that
/// never grows, a task nobody can finish, or inverted random bounds.
pub fn validate_content(content: &GameContent) {
    assert!(
        !content.content_version.is_empty(),
        "content_version must not be empty"
    );

    let c = &content.constants;
    assert!(
        c.random_factor_min > 0.0 && c.random_factor_min <= c.random_factor_max,
        "random factor bounds [{}, {}] are invalid",
        c.random_factor_min,
        c.random_factor_max,
    );
    assert!(
        c.min_primary_yield >= 1,
        "min_primary_yield must be at least 1, got {}",
        c.min_primary_yield,
    );
    for (name, value) in [
        ("base_yield_primary", c.base_yield_primary),
        ("base_yield_secondary", c.base_yield_secondary),
        ("base_yield_tertiary", c.base_yield_tertiary),
        ("tool_step", c.tool_step),
        ("quality_step", c.quality_step),
        ("multiplier_step", c.multiplier_step),
    ] {
        assert!(value >= 0.0, "constant '{name}' is negative: {value}");
    }

    assert_unique_ids("upgrade", content.upgrades.iter().map(|u| u.id.0.as_str()));
    for upgrade in &content.upgrades {
        assert!(
            upgrade.base_cost > 0.0,
            "upgrade '{}' has non-positive base cost {}",
            upgrade.id,
            upgrade.base_cost,
        );
        assert!(
            upgrade.cost_multiplier > 1.0,
            "upgrade '{}' cost multiplier {} must exceed 1",
            upgrade.id,
            upgrade.cost_multiplier,
        );
    }

    assert_unique_ids("task", content.tasks.iter().map(|t| t.id.0.as_str()));
    for task in &content.tasks {
        assert!(task.goal > 0, "task '{}' has zero goal", task.id);
    }

    assert_unique_ids(
        "achievement",
        content.achievements.iter().map(|a| a.id.0.as_str()),
    );
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let text =
        std::fs::read_to_string(dir.join(file)).with_context(|| format!("reading {file}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {file}"))
}

pub fn load_content(content_dir: &str) -> Result<GameContent> {
    let dir = Path::new(content_dir);
    let constants_file: ConstantsFile = read_json(dir, "constants.json")?;
    let upgrades_file: UpgradesFile = read_json(dir, "upgrades.json")?;
    let tasks_file: TasksFile = read_json(dir, "tasks.json")?;
    let achievements_file: AchievementsFile = read_json(dir, "achievements.json")?;
    let content = GameContent {
        content_version: constants_file.content_version,
        constants: constants_file.constants,
        upgrades: upgrades_file.upgrades,
        tasks: tasks_file.tasks,
        achievements: achievements_file.achievements,
    };
    validate_content(&content);
    tracing::info!(
        content_version = %content.content_version,
        upgrades = content.upgrades.len(),
        tasks = content.tasks.len(),
        achievements = content.achievements.len(),
        "content loaded"
    );
    Ok(content)
}

/// Start of the next UTC day after `now_ms`, when daily tasks lapse.
///
/// Always UTC, never the host's local zone: expiry must not depend on where
/// the process runs.
pub fn next_utc_midnight_ms(now_ms: u64) -> u64 {
    let millis = i64::try_from(now_ms).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(millis)
        .and_then(|now| now.date_naive().succ_opt())
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .and_then(|midnight| u64::try_from(midnight.and_utc().timestamp_millis()).ok())
        .unwrap_or(u64::MAX)
}

pub fn build_initial_state(
    content: &GameContent,
    username: &str,
    now_ms: u64,
    rng: &mut impl Rng,
) -> PlayerState {
    let profile = PlayerProfile {
        id: generate_player_id(rng),
        username: username.to_string(),
        joined_at_ms: now_ms,
    };
    initial_state(content, profile, next_utc_midnight_ms(now_ms))
}

/// Production wiring: wall clock, and a `ChaCha8Rng` seeded from `seed` or
/// from OS entropy when none is given.
pub fn start_session(content: &GameContent, username: &str, seed: Option<u64>) -> LiveSession {
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let clock = SystemClock;
    let state = build_initial_state(content, username, clock.now_ms(), &mut rng);
    tracing::info!(player = %state.profile.id, seed, "session started");
    Session::new(state, content.constants.clone(), clock, RngSource(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tap_core::test_fixtures::base_content;

    // 2024-03-15T13:45:00Z
    const MID_AFTERNOON_MS: u64 = 1_710_510_300_000;
    // 2024-03-16T00:00:00Z
    const NEXT_MIDNIGHT_MS: u64 = 1_710_547_200_000;

    #[test]
    fn midnight_is_start_of_next_utc_day() {
        assert_eq!(next_utc_midnight_ms(MID_AFTERNOON_MS), NEXT_MIDNIGHT_MS);
    }

    #[test]
    fn exactly_midnight_rolls_to_following_day() {
        assert_eq!(
            next_utc_midnight_ms(NEXT_MIDNIGHT_MS),
            NEXT_MIDNIGHT_MS + 86_400_000
        );
    }

    #[test]
    fn initial_state_tasks_expire_at_midnight() {
        let content = base_content();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let state = build_initial_state(&content, "TreeTapper", MID_AFTERNOON_MS, &mut rng);

        assert!(state.tasks.iter().all(|t| t.expires_at_ms == NEXT_MIDNIGHT_MS));
        assert_eq!(state.profile.joined_at_ms, MID_AFTERNOON_MS);
        assert_eq!(state.profile.username, "TreeTapper");
    }

    #[test]
    fn same_seed_same_player_id() {
        let content = base_content();
        let a = build_initial_state(&content, "a", 0, &mut ChaCha8Rng::seed_from_u64(7));
        let b = build_initial_state(&content, "b", 0, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a.profile.id, b.profile.id);
    }

    #[test]
    fn live_session_accepts_first_tap() {
        let content = base_content();
        let mut session = start_session(&content, "TreeTapper", Some(42));
        assert!(session.is_ready());
        assert!(!session.perform_action().is_empty());
        assert_eq!(session.state().stats.total_actions, 1);
        assert!(session.cooldown_remaining() > 0);
    }

    #[test]
    fn fixture_content_is_valid() {
        validate_content(&base_content());
    }

    #[test]
    #[should_panic(expected = "duplicate upgrade id")]
    fn duplicate_upgrade_ids_rejected() {
        let mut content = base_content();
        let copy = content.upgrades[0].clone();
        content.upgrades.push(copy);
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "must exceed 1")]
    fn flat_cost_curve_rejected() {
        let mut content = base_content();
        content.upgrades[0].cost_multiplier = 1.0;
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "min_primary_yield must be at least 1")]
    fn zero_primary_floor_rejected() {
        let mut content = base_content();
        content.constants.min_primary_yield = 0;
        content.constants.random_factor_min = 0.5;
        validate_content(&content);
    }

    #[test]
    fn primary_floor_holds_at_lowest_factor() {
        let content = base_content();
        validate_content(&content);
        let state = tap_core::test_fixtures::cooldown_free_state(&content);
        let next = tap_core::perform_action(
            &state,
            &content.constants,
            0,
            &mut tap_core::FixedFactor(content.constants.random_factor_min),
        )
        .unwrap()
        .state;
        assert!(
            next.resource(tap_core::ResourceKind::Primary)
                > state.resource(tap_core::ResourceKind::Primary)
        );
    }

    #[test]
    #[should_panic(expected = "zero goal")]
    fn zero_goal_task_rejected() {
        let mut content = base_content();
        content.tasks[0].goal = 0;
        validate_content(&content);
    }
}
