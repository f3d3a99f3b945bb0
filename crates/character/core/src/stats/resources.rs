//! Current resource pools.
//!
//! Resource values are partially stored:
//! - Current values: character state (MUST be stored)
//! - Maximum values: computed from the derived catalog (NOT stored)
//!
//! Clamping into `[0, max]` happens in the mutation operations on
//! [`Character`](crate::state::Character); the pool itself is dumb storage.

use super::attribute::DerivedKind;

/// Enum representing individual resource types.
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
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Mana points.
    Mp,
    /// Accumulated stress.
    Stress,
    /// Carried weight.
    Weight,
}

impl ResourceKind {
    /// Total number of resources.
    pub const COUNT: usize = 4;

    /// Returns all resource kinds in canonical order.
    pub const fn all() -> [ResourceKind; Self::COUNT] {
        [
            ResourceKind::Hp,
            ResourceKind::Mp,
            ResourceKind::Stress,
            ResourceKind::Weight,
        ]
    }

    /// The catalog entry that bounds this resource.
    pub const fn max_kind(self) -> DerivedKind {
        match self {
            ResourceKind::Hp => DerivedKind::MaxHp,
            ResourceKind::Mp => DerivedKind::MaxMp,
            ResourceKind::Stress => DerivedKind::MaxStress,
            ResourceKind::Weight => DerivedKind::MaxWeight,
        }
    }
}

/// Current resource values (character state, must be stored).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub hp: i64,
    pub mp: i64,
    pub stress: i64,
    pub weight: i64,
}

impl ResourcePool {
    /// Create a pool with explicit current values.
    pub const fn new(hp: i64, mp: i64, stress: i64, weight: i64) -> Self {
        Self {
            hp,
            mp,
            stress,
            weight,
        }
    }

    /// Current value for a specific resource.
    #[inline]
    pub fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Hp => self.hp,
            ResourceKind::Mp => self.mp,
            ResourceKind::Stress => self.stress,
            ResourceKind::Weight => self.weight,
        }
    }

    /// Store a new current value.
    #[inline]
    pub fn set(&mut self, kind: ResourceKind, value: i64) {
        match kind {
            ResourceKind::Hp => self.hp = value,
            ResourceKind::Mp => self.mp = value,
            ResourceKind::Stress => self.stress = value,
            ResourceKind::Weight => self.weight = value,
        }
    }
}
