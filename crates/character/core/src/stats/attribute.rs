//! Attribute identity and values.
//!
//! Anything a caller can query, diff, or target with an override is addressed
//! by an [`AttributeId`]: a base attribute, a catalog entry, or a current
//! resource. The string names used by the command layer are parsed once into
//! this tagged identifier; nothing in the engine looks attributes up by string
//! at computation time.

use std::fmt;
use std::str::FromStr;

use super::resources::ResourceKind;
use super::table::Stat;
use crate::error::EngineError;

/// The catalog of derived attributes.
///
/// `DerivedKind::all()` is the closed, statically known descriptor list that
/// snapshots iterate; there is no runtime introspection.
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
pub enum DerivedKind {
    StrengthBonus,
    AgilityBonus,
    PerceptionBonus,
    IntelligenceBonus,
    WillBonus,
    BuildBonus,
    CharismaBonus,
    LuckBonus,
    HpRegenRate,
    MpRegenRate,
    MaxHp,
    MaxMp,
    MaxStress,
    MaxActionPoints,
    CarryWeight,
    OverweightWeight,
    MaxWeight,
    WalkSpeed,
    RunSpeed,
    DashSpeed,
    WeightStatus,
}

impl DerivedKind {
    /// Total number of catalog entries.
    pub const COUNT: usize = 21;

    /// Returns every catalog entry in snapshot order.
    pub const fn all() -> [DerivedKind; Self::COUNT] {
        [
            DerivedKind::StrengthBonus,
            DerivedKind::AgilityBonus,
            DerivedKind::PerceptionBonus,
            DerivedKind::IntelligenceBonus,
            DerivedKind::WillBonus,
            DerivedKind::BuildBonus,
            DerivedKind::CharismaBonus,
            DerivedKind::LuckBonus,
            DerivedKind::HpRegenRate,
            DerivedKind::MpRegenRate,
            DerivedKind::MaxHp,
            DerivedKind::MaxMp,
            DerivedKind::MaxStress,
            DerivedKind::MaxActionPoints,
            DerivedKind::CarryWeight,
            DerivedKind::OverweightWeight,
            DerivedKind::MaxWeight,
            DerivedKind::WalkSpeed,
            DerivedKind::RunSpeed,
            DerivedKind::DashSpeed,
            DerivedKind::WeightStatus,
        ]
    }

    /// The bonus entry belonging to a base attribute.
    pub const fn bonus_of(stat: Stat) -> DerivedKind {
        match stat {
            Stat::Strength => DerivedKind::StrengthBonus,
            Stat::Agility => DerivedKind::AgilityBonus,
            Stat::Perception => DerivedKind::PerceptionBonus,
            Stat::Intelligence => DerivedKind::IntelligenceBonus,
            Stat::Will => DerivedKind::WillBonus,
            Stat::Build => DerivedKind::BuildBonus,
            Stat::Charisma => DerivedKind::CharismaBonus,
            Stat::Luck => DerivedKind::LuckBonus,
        }
    }
}

/// Weight bracket derived from current weight against the strength thresholds.
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
pub enum WeightStatus {
    Normal,
    Overweight,
    OverLimit,
}

/// A computed attribute value.
///
/// `weight_status` is the one non-numeric catalog entry; everything else is an
/// integer after ceiling resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Int(i64),
    Status(WeightStatus),
}

impl AttributeValue {
    /// Numeric view; `None` for the status entry.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Status(_) => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<WeightStatus> for AttributeValue {
    fn from(status: WeightStatus) -> Self {
        Self::Status(status)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Status(status) => write!(f, "{status}"),
        }
    }
}

/// Identifier for anything the engine can compute or an override can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeId {
    /// A raw base attribute.
    Stat(Stat),
    /// A catalog entry.
    Derived(DerivedKind),
    /// A current resource value (`current_hp`, `current_weight`, ...).
    Resource(ResourceKind),
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stat(stat) => write!(f, "{stat}"),
            Self::Derived(kind) => write!(f, "{kind}"),
            Self::Resource(kind) => write!(f, "current_{kind}"),
        }
    }
}

impl FromStr for AttributeId {
    type Err = EngineError;

    /// Single dispatch over every addressable name: base attributes first,
    /// then the derived catalog, then `current_*` resources.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Ok(stat) = name.parse::<Stat>() {
            return Ok(Self::Stat(stat));
        }
        if let Ok(kind) = name.parse::<DerivedKind>() {
            return Ok(Self::Derived(kind));
        }
        if let Some(rest) = name.strip_prefix("current_") {
            if let Ok(kind) = rest.parse::<ResourceKind>() {
                return Ok(Self::Resource(kind));
            }
        }
        Err(EngineError::UnknownAttribute {
            name: name.to_string(),
        })
    }
}

impl From<Stat> for AttributeId {
    fn from(stat: Stat) -> Self {
        Self::Stat(stat)
    }
}

impl From<DerivedKind> for AttributeId {
    fn from(kind: DerivedKind) -> Self {
        Self::Derived(kind)
    }
}
