use crate::CooldownGate;

/// Milliseconds left before the next action is allowed.
///
/// A clock that reads earlier than `last_ms` counts as zero elapsed time, so
/// the result never exceeds `cooldown_ms`.
pub fn remaining(last_ms: u64, cooldown_ms: u64, now_ms: u64) -> u64 {
    let elapsed = now_ms.saturating_sub(last_ms);
    cooldown_ms.saturating_sub(elapsed)
}

pub fn is_ready(last_ms: u64, cooldown_ms: u64, now_ms: u64) -> bool {
    remaining(last_ms, cooldown_ms, now_ms) == 0
}

impl CooldownGate {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            last_action_ms: None,
            cooldown_ms,
        }
    }

    pub fn remaining(&self, now_ms: u64) -> u64 {
        self.last_action_ms
            .map_or(0, |last| remaining(last, self.cooldown_ms, now_ms))
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.remaining(now_ms) == 0
    }
}
