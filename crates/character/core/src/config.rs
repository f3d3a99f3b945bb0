/// Engine configuration constants and tunable parameters.
///
/// A [`Character`](crate::state::Character) is created from a config so a
/// table can vary the house rules (point budget, stat floor) without touching
/// any formula.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Lowest value `point_buy` accepts for a base attribute.
    pub stat_floor: i64,

    /// Free stat points granted to a freshly created character.
    pub starting_free_points: i64,
}

impl EngineConfig {
    // ===== compile-time constants =====
    /// Maximum character name length accepted at the command boundary.
    pub const MAX_NAME_LENGTH: usize = 25;
    /// A stat bonus is one point per this many stat points.
    pub const BONUS_DIVISOR: i64 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STAT: i64 = 10;
    pub const DEFAULT_STAT_FLOOR: i64 = 10;
    pub const DEFAULT_FREE_POINTS: i64 = 15;
    pub const DEFAULT_LEVEL: u32 = 1;

    pub fn new() -> Self {
        Self {
            stat_floor: Self::DEFAULT_STAT_FLOOR,
            starting_free_points: Self::DEFAULT_FREE_POINTS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
