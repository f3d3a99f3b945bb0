//! The character aggregate - query surface, mutation surface, diff protocol.
//!
//! Every mutation runs to completion on the calling thread and either returns
//! a typed outcome or a typed failure with no partial state change. The
//! engine assumes a single writer per character; serializing access per
//! character identity is the caller's discipline.

use super::player::PlayerId;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::stats::{
    AttributeDiff, AttributeId, AttributeValue, DerivedKind, Effect, EffectId, EffectRegistry,
    PropertySnapshot, ResourceKind, ResourcePool, Stat, StatContext, StatTable, resolve,
};

/// Unique identifier for a character document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u64);

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A free-form named stat with no formula semantics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraStat {
    pub name: String,
    pub value: f64,
    pub hidden: bool,
}

/// How a point-buy or resource change interprets its amount.
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
pub enum ChangeMode {
    Add,
    Subtract,
    Set,
}

/// Result of a successful point-buy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointBuyOutcome {
    pub stat: Stat,
    pub previous: i64,
    pub value: i64,
    /// Positive when points were consumed, negative when refunded.
    pub points_spent: i64,
    /// Free points remaining after the change.
    pub free_points: i64,
    pub diff: AttributeDiff,
}

/// The two resources with a regeneration rate.
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
pub enum RegenPool {
    Health,
    Mana,
}

impl RegenPool {
    pub const fn resource(self) -> ResourceKind {
        match self {
            Self::Health => ResourceKind::Hp,
            Self::Mana => ResourceKind::Mp,
        }
    }

    pub const fn rate_kind(self) -> DerivedKind {
        match self {
            Self::Health => DerivedKind::HpRegenRate,
            Self::Mana => DerivedKind::MpRegenRate,
        }
    }

    pub const fn max_kind(self) -> DerivedKind {
        match self {
            Self::Health => DerivedKind::MaxHp,
            Self::Mana => DerivedKind::MaxMp,
        }
    }
}

/// How far a regeneration runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegenSpan {
    /// Add `rate × rounds`, clamped to the maximum.
    Rounds(u32),
    /// Jump straight to the maximum.
    Full,
    /// Full recovery when the rate is positive, otherwise nothing.
    Natural,
}

/// Result of a regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenOutcome {
    pub pool: RegenPool,
    pub rate: i64,
    pub before: i64,
    pub after: i64,
}

impl RegenOutcome {
    /// Amount actually recovered.
    pub fn regained(&self) -> i64 {
        self.after - self.before
    }
}

/// Result of a direct resource change, after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceChange {
    pub resource: ResourceKind,
    pub before: i64,
    pub after: i64,
    pub max: i64,
}

/// Aggregate root: one playable character and everything attached to it.
///
/// Owns its stat table, effects, and resources exclusively; nothing is shared
/// across characters. The engine operates on the in-memory value and leaves
/// persistence to the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    /// Owning player (many characters to one player).
    pub player: PlayerId,
    pub name: String,
    level: u32,
    stats: StatTable,
    effects: EffectRegistry,
    resources: ResourcePool,
    /// Budget consumed and refunded by `point_buy`; never negative.
    pub free_points: i64,
    pub action_points: i64,
    pub luck_points: i64,
    pub extra_stats: Vec<ExtraStat>,
    config: EngineConfig,
}

impl Character {
    pub fn new(id: CharacterId, player: PlayerId, name: impl Into<String>) -> Self {
        Self::with_config(id, player, name, EngineConfig::default())
    }

    pub fn with_config(
        id: CharacterId,
        player: PlayerId,
        name: impl Into<String>,
        config: EngineConfig,
    ) -> Self {
        Self {
            id,
            player,
            name: name.into(),
            level: EngineConfig::DEFAULT_LEVEL,
            stats: StatTable::default(),
            effects: EffectRegistry::new(),
            resources: ResourcePool::default(),
            free_points: config.starting_free_points,
            action_points: 0,
            luck_points: 0,
            extra_stats: Vec::new(),
            config,
        }
    }

    fn context(&self) -> StatContext<'_> {
        StatContext::new(&self.stats, &self.effects, self.level, &self.resources)
    }

    // ========================================================================
    // Query surface
    // ========================================================================

    /// Raw (non-overridden) base value.
    pub fn get_stat(&self, stat: Stat) -> i64 {
        self.stats.get(stat)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolved value for a base attribute, catalog entry, or current
    /// resource.
    pub fn get_attribute(&self, id: AttributeId) -> Result<AttributeValue, EngineError> {
        match id {
            AttributeId::Stat(stat) => {
                resolve(&self.effects, id, self.stats.get(stat)).map(AttributeValue::Int)
            }
            AttributeId::Derived(kind) => kind.compute(&self.context()),
            AttributeId::Resource(kind) => {
                resolve(&self.effects, id, self.resources.get(kind)).map(AttributeValue::Int)
            }
        }
    }

    /// Name-based variant of [`Character::get_attribute`] for the command
    /// boundary; unknown names fail with
    /// [`EngineError::UnknownAttribute`].
    pub fn attribute(&self, name: &str) -> Result<AttributeValue, EngineError> {
        self.get_attribute(name.parse()?)
    }

    /// Resolved value of a base attribute, as an integer.
    pub fn resolved_stat(&self, stat: Stat) -> Result<i64, EngineError> {
        resolve(
            &self.effects,
            AttributeId::Stat(stat),
            self.stats.get(stat),
        )
    }

    /// Snapshot of every derived attribute.
    pub fn properties(&self) -> Result<PropertySnapshot, EngineError> {
        PropertySnapshot::capture(&self.context())
    }

    // ========================================================================
    // Mutation surface
    // ========================================================================

    /// Writes a new base value and reports the derived consequences.
    ///
    /// Performs the pure transformation only: the free-point budget belongs
    /// to [`Character::point_buy`] (or to the caller when it owns the
    /// budget). If either snapshot fails, the previous value is restored and
    /// nothing is reported.
    pub fn set_stat(&mut self, stat: Stat, value: i64) -> Result<AttributeDiff, EngineError> {
        let before = self.properties()?;
        let previous = self.stats.get(stat);
        self.stats.set(stat, value);
        match self.properties() {
            Ok(after) => Ok(AttributeDiff::between(&before, &after)),
            Err(err) => {
                self.stats.set(stat, previous);
                Err(err)
            }
        }
    }

    /// Changes the level and reports the derived consequences, with the same
    /// transactional contract as [`Character::set_stat`].
    pub fn set_level(&mut self, level: u32) -> Result<AttributeDiff, EngineError> {
        let before = self.properties()?;
        let previous = self.level;
        self.level = level;
        match self.properties() {
            Ok(after) => Ok(AttributeDiff::between(&before, &after)),
            Err(err) => {
                self.level = previous;
                Err(err)
            }
        }
    }

    /// Reallocates base attribute points against the free-point budget.
    ///
    /// Rejects values below the configured floor and changes that would drive
    /// the budget negative; on rejection nothing is touched.
    pub fn point_buy(
        &mut self,
        stat: Stat,
        mode: ChangeMode,
        amount: i64,
    ) -> Result<PointBuyOutcome, EngineError> {
        let previous = self.stats.get(stat);
        let value = match mode {
            ChangeMode::Add => previous + amount,
            ChangeMode::Subtract => previous - amount,
            ChangeMode::Set => amount,
        };

        if value < self.config.stat_floor {
            return Err(EngineError::InvalidRange {
                stat,
                value,
                floor: self.config.stat_floor,
            });
        }

        let points_spent = value - previous;
        let balance = self.free_points - points_spent;
        if balance < 0 {
            return Err(EngineError::InsufficientFreePoints { missing: -balance });
        }

        let diff = self.set_stat(stat, value)?;
        self.free_points = balance;

        Ok(PointBuyOutcome {
            stat,
            previous,
            value,
            points_spent,
            free_points: balance,
            diff,
        })
    }

    /// Regenerates health or mana, clamped into `[0, max]`.
    pub fn regen(&mut self, pool: RegenPool, span: RegenSpan) -> Result<RegenOutcome, EngineError> {
        let (rate, max) = {
            let ctx = self.context();
            (
                pool.rate_kind().numeric(&ctx)?,
                pool.max_kind().numeric(&ctx)?.max(0),
            )
        };

        let resource = pool.resource();
        let before = self.resources.get(resource);
        let after = match span {
            RegenSpan::Rounds(rounds) => before + rate * rounds as i64,
            RegenSpan::Full => max,
            RegenSpan::Natural => {
                if rate > 0 {
                    max
                } else {
                    before
                }
            }
        }
        .clamp(0, max);
        self.resources.set(resource, after);

        Ok(RegenOutcome {
            pool,
            rate,
            before,
            after,
        })
    }

    /// Changes a current resource directly, clamped into `[0, max]`.
    pub fn adjust_resource(
        &mut self,
        resource: ResourceKind,
        mode: ChangeMode,
        amount: i64,
    ) -> Result<ResourceChange, EngineError> {
        let max = {
            let ctx = self.context();
            resource.max_kind().numeric(&ctx)?.max(0)
        };

        let before = self.resources.get(resource);
        let target = match mode {
            ChangeMode::Add => before + amount,
            ChangeMode::Subtract => before - amount,
            ChangeMode::Set => amount,
        };
        let after = target.clamp(0, max);
        self.resources.set(resource, after);

        Ok(ResourceChange {
            resource,
            before,
            after,
            max,
        })
    }

    /// Attaches an effect. Attachment itself cannot fail; a broken override
    /// (Divide by zero) surfaces later from the queries that hit it.
    pub fn apply_effect(&mut self, effect: Effect) -> EffectId {
        self.effects.attach(effect)
    }

    /// Removes an effect by identity; `false` if it was already gone.
    pub fn remove_effect(&mut self, id: EffectId) -> bool {
        self.effects.detach(id)
    }

    /// Advances effect lifetimes by `ticks`.
    pub fn expire_tick(&mut self, ticks: u32) {
        self.effects.tick(ticks);
    }

    // ========================================================================
    // Extra stats
    // ========================================================================

    /// Creates or updates a free-form stat.
    pub fn set_extra_stat(&mut self, name: impl Into<String>, value: f64, hidden: bool) {
        let name = name.into();
        if let Some(existing) = self.extra_stats.iter_mut().find(|s| s.name == name) {
            existing.value = value;
            existing.hidden = hidden;
        } else {
            self.extra_stats.push(ExtraStat {
                name,
                value,
                hidden,
            });
        }
    }

    pub fn extra_stat(&self, name: &str) -> Option<&ExtraStat> {
        self.extra_stats.iter().find(|s| s.name == name)
    }

    pub fn remove_extra_stat(&mut self, name: &str) -> bool {
        let before = self.extra_stats.len();
        self.extra_stats.retain(|s| s.name != name);
        self.extra_stats.len() != before
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (lvl {})", self.name, self.level)
    }
}
