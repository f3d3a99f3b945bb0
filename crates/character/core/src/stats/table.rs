//! Base attributes - Layer 1 of the stat system.
//!
//! The eight base attributes are the only permanently stored stat values and
//! the single source of truth for every derivation. The table itself enforces
//! nothing: the free-point budget is the caller's rule
//! (see [`Character::point_buy`](crate::state::Character::point_buy)).

use crate::config::EngineConfig;

/// The eight base attributes a player allocates points into.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    Strength,
    Agility,
    Perception,
    Intelligence,
    Will,
    Build,
    Charisma,
    Luck,
}

impl Stat {
    /// Total number of base attributes.
    pub const COUNT: usize = 8;

    /// Returns all base attributes in canonical order.
    pub const fn all() -> [Stat; Self::COUNT] {
        [
            Stat::Strength,
            Stat::Agility,
            Stat::Perception,
            Stat::Intelligence,
            Stat::Will,
            Stat::Build,
            Stat::Charisma,
            Stat::Luck,
        ]
    }

    /// Returns the stat as an array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

/// Stored values of the eight base attributes.
///
/// `set` never evaluates invariants itself; the caller owns the free-point
/// check and any floor rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTable {
    values: [i64; Stat::COUNT],
}

impl StatTable {
    /// Create a table with every attribute at `value`.
    pub const fn uniform(value: i64) -> Self {
        Self {
            values: [value; Stat::COUNT],
        }
    }

    /// Raw stored value for an attribute (no overrides applied).
    #[inline]
    pub fn get(&self, stat: Stat) -> i64 {
        self.values[stat.as_index()]
    }

    /// Store a new value. No side effects beyond the stored value.
    #[inline]
    pub fn set(&mut self, stat: Stat, value: i64) {
        self.values[stat.as_index()] = value;
    }
}

impl Default for StatTable {
    /// Default table: all attributes at the nominal starting value.
    fn default() -> Self {
        Self::uniform(EngineConfig::DEFAULT_STAT)
    }
}
