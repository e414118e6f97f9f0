//! Per-action yield formula.
//!
//! `compute_yields` is pure: the single random draw per action happens in the
//! caller through a [`RandomSource`] and is passed in as a plain factor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Constants, ResourceKind, Upgrade, UpgradeCategory};

/// Summed upgrade levels per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryLevels {
    pub tool: u32,
    pub quality: u32,
    pub multiplier: u32,
}

impl CategoryLevels {
    pub fn from_upgrades(upgrades: &[Upgrade]) -> Self {
        upgrades.iter().fold(Self::default(), |mut levels, upgrade| {
            let slot = match upgrade.category {
                UpgradeCategory::Tool => &mut levels.tool,
                UpgradeCategory::Quality => &mut levels.quality,
                UpgradeCategory::Multiplier => &mut levels.multiplier,
            };
            *slot = slot.saturating_add(upgrade.level);
            levels
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yields {
    pub primary: u64,
    pub secondary: u64,
    pub tertiary: u64,
}

impl Yields {
    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Primary => self.primary,
            ResourceKind::Secondary => self.secondary,
            ResourceKind::Tertiary => self.tertiary,
        }
    }
}

/// Source of the per-action random factor.
pub trait RandomSource {
    /// Uniform draw in `[min, max]`.
    fn random_factor(&mut self, min: f64, max: f64) -> f64;
}

/// Production source backed by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn random_factor(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}

/// Always returns the same factor, ignoring the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedFactor(pub f64);

impl RandomSource for FixedFactor {
    fn random_factor(&mut self, _min: f64, _max: f64) -> f64 {
        self.0
    }
}

fn level_effect(level: u32, step: f64) -> f64 {
    1.0 + f64::from(level) * step
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_amount(value: f64) -> u64 {
    // Saturating cast: negatives and NaN land on 0.
    value.floor() as u64
}

/// Yield of one action for the given upgrade levels and random factor.
///
/// `floor(base × tool (primary only) × quality × multiplier × factor)`, with
/// the primary resource floored to `min_primary_yield`.
pub fn compute_yields(levels: CategoryLevels, constants: &Constants, random_factor: f64) -> Yields {
    let tool = level_effect(levels.tool, constants.tool_step);
    let combined = level_effect(levels.quality, constants.quality_step)
        * level_effect(levels.multiplier, constants.multiplier_step);

    let amount = |kind: ResourceKind| {
        let kind_effect = if kind == ResourceKind::Primary { tool } else { 1.0 };
        floor_amount(constants.base_yield(kind) * kind_effect * combined * random_factor)
    };

    Yields {
        primary: amount(ResourceKind::Primary).max(constants.min_primary_yield),
        secondary: amount(ResourceKind::Secondary),
        tertiary: amount(ResourceKind::Tertiary),
    }
}
