use crate::Upgrade;

/// Price of the next purchase: `floor(base_cost × multiplier^level)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn upgrade_cost(base_cost: f64, multiplier: f64, level: u32) -> u64 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    // Saturating cast: overflow lands on u64::MAX, which is never affordable.
    (base_cost * multiplier.powi(exponent)).floor() as u64
}

impl Upgrade {
    /// Cost of buying the next level from the current one.
    pub fn next_cost(&self) -> u64 {
        upgrade_cost(self.base_cost, self.cost_multiplier, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_purchase_costs_base() {
        assert_eq!(upgrade_cost(10.0, 1.5, 0), 10);
        assert_eq!(upgrade_cost(25.0, 2.0, 0), 25);
    }

    #[test]
    fn second_purchase_scales_by_multiplier() {
        assert_eq!(upgrade_cost(10.0, 1.5, 1), 15);
        assert_eq!(upgrade_cost(10.0, 1.5, 2), 22);
        assert_eq!(upgrade_cost(50.0, 2.5, 3), 781);
    }

    #[test]
    fn huge_levels_saturate() {
        assert_eq!(upgrade_cost(50.0, 2.5, 10_000), u64::MAX);
    }

    #[test]
    fn next_cost_uses_current_level() {
        let content = crate::test_fixtures::base_content();
        let mut state = crate::test_fixtures::base_state(&content);
        let axe = &mut state.upgrades[0];
        assert_eq!(axe.next_cost(), 10);
        axe.level = 1;
        assert_eq!(axe.next_cost(), 15);
    }
}
