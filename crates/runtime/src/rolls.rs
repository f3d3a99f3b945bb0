//! Percentile stat checks.
//!
//! Rolls are a command-layer concern: randomness stays out of the engine, and
//! the RNG is injected so outcomes are reproducible under a seeded generator.
//!
//! A check is d100 roll-under: the difficulty is the resolved stat plus a
//! GM-provided modifier, clamped into `[1, 99]` so no check is impossible or
//! automatic. The success level grows by one per full 10 points of margin and
//! is negated on failure.

use character_core::Stat;
use rand::Rng;

/// Result of one stat check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    pub stat: Stat,
    /// Resolved stat value the difficulty was built from.
    pub stat_value: i64,
    pub modifier: i64,
    pub difficulty: i64,
    pub roll: i64,
    pub success: bool,
    /// ≥ 1 on success, ≤ -1 on failure.
    pub success_level: i64,
}

/// Rolls a d100 check against `stat_value + modifier`.
pub fn stat_check(
    stat: Stat,
    stat_value: i64,
    modifier: i64,
    rng: &mut impl Rng,
) -> RollOutcome {
    let difficulty = (stat_value + modifier).clamp(1, 99);
    let roll = rng.random_range(1..=100);
    let success = roll <= difficulty;

    let margin = (roll - difficulty).abs();
    let mut success_level = (margin as u64).div_ceil(10).max(1) as i64;
    if !success {
        success_level = -success_level;
    }

    RollOutcome {
        stat,
        stat_value,
        modifier,
        difficulty,
        roll,
        success,
        success_level,
    }
}
