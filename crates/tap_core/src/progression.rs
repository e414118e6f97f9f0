use crate::Progression;

/// Level reached with `experience`, and the size of that level's bar.
///
/// Level 1 needs `xp_per_level`; each later level `n` needs `xp_per_level × n`.
pub fn level_for_experience(experience: u64, xp_per_level: u64) -> (u32, u64) {
    if xp_per_level == 0 {
        return (1, 0);
    }
    let mut level: u32 = 1;
    let mut required = xp_per_level;
    let mut remaining = experience;
    while remaining >= required {
        remaining -= required;
        level = level.saturating_add(1);
        required = xp_per_level.saturating_mul(u64::from(level));
    }
    (level, required)
}

impl Progression {
    pub fn from_experience(experience: u64, xp_per_level: u64) -> Self {
        let (level, next_level_xp) = level_for_experience(experience, xp_per_level);
        Self {
            level,
            experience,
            next_level_xp,
        }
    }
}
