//! Content/schema validation tests for the shipped JSON balance data.
//!
//! These tests load the actual `content/*.json` files and validate:
//! 1. Schema validity: all files deserialize without error
//! 2. Balance agreement: shipped numbers match the reference balance
//! 3. Playability: every task and achievement can be reached from a fresh start
//! 4. Loader errors: broken files fail with the offending file named

use std::sync::OnceLock;

use tap_core::test_fixtures::base_content;
use tap_core::{
    AchievementCriterion, GameContent, ResourceKind, TaskCriterion, UpgradeCategory,
};
use tap_world::load_content;

/// Helper: resolve the content directory relative to the workspace root.
/// Integration tests run from the crate directory, so we go up two levels.
fn content_dir() -> String {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    format!("{manifest}/../../content")
}

/// Shared content loaded once across all tests in this module.
fn load_test_content() -> &'static GameContent {
    static CONTENT: OnceLock<GameContent> = OnceLock::new();
    CONTENT.get_or_init(|| {
        load_content(&content_dir()).expect("load_content should succeed for production content")
    })
}

// =========================================================================
// 1. Schema validation
// =========================================================================

#[test]
fn content_loads_successfully() {
    let _content = load_test_content();
}

// =========================================================================
// 2. Balance agreement
// =========================================================================

#[test]
fn shipped_balance_matches_reference_fixture() {
    let shipped = load_test_content();
    let reference = base_content();

    assert_eq!(shipped.constants, reference.constants);
    assert_eq!(shipped.upgrades, reference.upgrades);
    assert_eq!(shipped.tasks, reference.tasks);
    assert_eq!(shipped.achievements, reference.achievements);
}

#[test]
fn every_upgrade_category_is_purchasable() {
    let content = load_test_content();
    for category in [
        UpgradeCategory::Tool,
        UpgradeCategory::Quality,
        UpgradeCategory::Multiplier,
    ] {
        assert!(
            content.upgrades.iter().any(|u| u.category == category),
            "no upgrade in category {category:?}"
        );
    }
}

#[test]
fn multiplier_upgrade_is_uncapped() {
    let content = load_test_content();
    assert!(content
        .upgrades
        .iter()
        .filter(|u| u.category == UpgradeCategory::Multiplier)
        .all(|u| u.max_level.is_none()));
}

// =========================================================================
// 3. Playability
// =========================================================================

#[test]
fn first_upgrade_reachable_by_tapping() {
    let content = load_test_content();
    let cheapest = content
        .upgrades
        .iter()
        .map(|u| u.base_cost)
        .fold(f64::INFINITY, f64::min);
    // A fresh player gathers at least one primary per tap.
    assert!(cheapest <= 100.0, "cheapest upgrade costs {cheapest}");
}

#[test]
fn gathering_tasks_target_primary_resource() {
    let content = load_test_content();
    for task in &content.tasks {
        if let TaskCriterion::Gathered { kind } = task.criterion {
            // Only the primary resource is guaranteed to grow from level 0.
            assert_eq!(kind, ResourceKind::Primary, "task '{}'", task.id);
        }
    }
}

#[test]
fn achievement_thresholds_are_positive() {
    let content = load_test_content();
    for achievement in &content.achievements {
        let at_least = match achievement.criterion {
            AchievementCriterion::TotalActions { at_least }
            | AchievementCriterion::ResourceHeld { at_least, .. }
            | AchievementCriterion::UpgradesPurchased { at_least } => at_least,
        };
        assert!(at_least > 0, "achievement '{}' unlocks for free", achievement.id);
    }
}

// =========================================================================
// 4. Loader errors
// =========================================================================

fn copy_content_to(dir: &std::path::Path) {
    for file in [
        "constants.json",
        "upgrades.json",
        "tasks.json",
        "achievements.json",
    ] {
        std::fs::copy(format!("{}/{file}", content_dir()), dir.join(file)).unwrap();
    }
}

#[test]
fn missing_file_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    copy_content_to(dir.path());
    std::fs::remove_file(dir.path().join("tasks.json")).unwrap();

    let err = load_content(dir.path().to_str().unwrap()).unwrap_err();

    assert!(format!("{err:#}").contains("reading tasks.json"), "got: {err:#}");
}

#[test]
fn malformed_file_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    copy_content_to(dir.path());
    std::fs::write(dir.path().join("upgrades.json"), "{ \"upgrades\": [ { \"id\": 3 } ] }")
        .unwrap();

    let err = load_content(dir.path().to_str().unwrap()).unwrap_err();

    assert!(format!("{err:#}").contains("parsing upgrades.json"), "got: {err:#}");
}

#[test]
#[should_panic(expected = "duplicate achievement id")]
fn duplicate_ids_panic_on_load() {
    let dir = tempfile::tempdir().unwrap();
    copy_content_to(dir.path());
    let doubled = r#"{ "achievements": [
        { "id": "ach_x", "name": "X", "description": "",
          "criterion": { "type": "total_actions", "at_least": 1 },
          "reward": { "kind": "primary", "amount": 1 } },
        { "id": "ach_x", "name": "X", "description": "",
          "criterion": { "type": "total_actions", "at_least": 2 },
          "reward": { "kind": "primary", "amount": 1 } }
    ] }"#;
    std::fs::write(dir.path().join("achievements.json"), doubled).unwrap();

    let _ = load_content(dir.path().to_str().unwrap());
}
