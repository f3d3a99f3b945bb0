//! The derived-attribute catalog - Layer 2 of the stat system.
//!
//! Each [`DerivedKind`] is a pure function of resolved base attributes, the
//! level, and current resources. Derived values are never stored; they are
//! recomputed on every query and snapshot.
//!
//! Two resolution passes apply to every numeric entry:
//! 1. base-attribute inputs are resolved first, so an override on `strength`
//!    cascades into `carry_weight`;
//! 2. the computed value is then resolved under its own name, so an override
//!    may pin `build_bonus` or `max_hp` directly.

use super::attribute::{AttributeId, AttributeValue, DerivedKind, WeightStatus};
use super::effect::EffectRegistry;
use super::resolve::resolve;
use super::resources::{ResourceKind, ResourcePool};
use super::table::{Stat, StatTable};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Borrowed view of everything a formula may read.
///
/// The context is assembled per query by
/// [`Character`](crate::state::Character); formulas never see the aggregate
/// itself, which keeps the catalog independent of storage concerns.
#[derive(Clone, Copy)]
pub struct StatContext<'a> {
    table: &'a StatTable,
    effects: &'a EffectRegistry,
    level: u32,
    resources: &'a ResourcePool,
}

impl<'a> StatContext<'a> {
    pub fn new(
        table: &'a StatTable,
        effects: &'a EffectRegistry,
        level: u32,
        resources: &'a ResourcePool,
    ) -> Self {
        Self {
            table,
            effects,
            level,
            resources,
        }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn effects(&self) -> &'a EffectRegistry {
        self.effects
    }

    /// Resolved value of a base attribute.
    pub fn stat(&self, stat: Stat) -> Result<i64, EngineError> {
        resolve(self.effects, AttributeId::Stat(stat), self.table.get(stat))
    }

    /// Resolved bonus of a base attribute.
    pub fn bonus(&self, stat: Stat) -> Result<i64, EngineError> {
        DerivedKind::bonus_of(stat).numeric(self)
    }

    /// Raw current value of a resource. Formula inputs read currents raw;
    /// `current_*` resolution happens only on direct queries.
    #[inline]
    pub fn current(&self, kind: ResourceKind) -> i64 {
        self.resources.get(kind)
    }

    /// Weight bracket against the strength-derived thresholds.
    ///
    /// The overweight test runs first; `over_limit` only applies when the
    /// maximum threshold has been pulled below the overweight one.
    pub fn weight_status(&self) -> Result<WeightStatus, EngineError> {
        let current = self.current(ResourceKind::Weight);
        if current >= DerivedKind::OverweightWeight.numeric(self)? {
            Ok(WeightStatus::Overweight)
        } else if current >= DerivedKind::MaxWeight.numeric(self)? {
            Ok(WeightStatus::OverLimit)
        } else {
            Ok(WeightStatus::Normal)
        }
    }

    /// True once current weight reaches the overweight threshold; this is the
    /// condition that halves walking and zeroes dashing.
    fn exceeds_overweight(&self) -> Result<bool, EngineError> {
        Ok(self.current(ResourceKind::Weight) >= DerivedKind::OverweightWeight.numeric(self)?)
    }
}

impl DerivedKind {
    /// Computes this catalog entry under the given context.
    pub fn compute(self, ctx: &StatContext<'_>) -> Result<AttributeValue, EngineError> {
        if self == DerivedKind::WeightStatus {
            return ctx.weight_status().map(AttributeValue::Status);
        }
        self.numeric(ctx).map(AttributeValue::Int)
    }

    /// Resolved numeric value; every entry except `weight_status`.
    pub(crate) fn numeric(self, ctx: &StatContext<'_>) -> Result<i64, EngineError> {
        debug_assert_ne!(self, DerivedKind::WeightStatus);
        let base = self.base_value(ctx)?;
        resolve(ctx.effects, AttributeId::Derived(self), base)
    }

    /// Formula output before the entry's own overrides are folded in.
    fn base_value(self, ctx: &StatContext<'_>) -> Result<i64, EngineError> {
        let level = ctx.level() as i64;
        let steps_of = |n: i64| level.div_euclid(n);
        let bonus_of = |stat: Stat| -> Result<i64, EngineError> {
            Ok(ctx.stat(stat)?.div_euclid(EngineConfig::BONUS_DIVISOR))
        };

        match self {
            Self::StrengthBonus => bonus_of(Stat::Strength),
            Self::AgilityBonus => bonus_of(Stat::Agility),
            Self::PerceptionBonus => bonus_of(Stat::Perception),
            Self::IntelligenceBonus => bonus_of(Stat::Intelligence),
            Self::WillBonus => bonus_of(Stat::Will),
            Self::BuildBonus => bonus_of(Stat::Build),
            Self::CharismaBonus => bonus_of(Stat::Charisma),
            Self::LuckBonus => bonus_of(Stat::Luck),

            Self::HpRegenRate => Ok(ctx.bonus(Stat::Build)? * steps_of(5)),

            Self::MpRegenRate => {
                let mental = (ctx.bonus(Stat::Intelligence)? + ctx.bonus(Stat::Perception)?) as f64;
                let build = ctx.bonus(Stat::Build)? as f64;
                let scale = (steps_of(5) + 1) as f64;
                Ok((mental / 2.0 * (build / 2.0) * scale).ceil() as i64)
            }

            Self::MaxHp => {
                Ok(ctx.stat(Stat::Build)? * (steps_of(5) + 1) + ctx.bonus(Stat::Build)? * level)
            }

            Self::MaxMp => {
                let mental = (ctx.stat(Stat::Perception)? + ctx.stat(Stat::Intelligence)?)
                    .div_euclid(2);
                Ok(mental * ctx.bonus(Stat::Build)? * (steps_of(5) + 1))
            }

            Self::MaxStress => {
                let will = ctx.stat(Stat::Will)?;
                Ok(20 * will * (steps_of(5) + 1) + 20 * will * steps_of(10))
            }

            Self::MaxActionPoints => Ok(ctx.bonus(Stat::Agility)? * (steps_of(2) + 1)),

            Self::CarryWeight => ctx.stat(Stat::Strength),
            Self::OverweightWeight => Ok(2 * ctx.stat(Stat::Strength)?),
            Self::MaxWeight => Ok(3 * ctx.stat(Stat::Strength)?),

            Self::WalkSpeed => {
                let mut speed = ctx.stat(Stat::Agility)?;
                if ctx.exceeds_overweight()? {
                    speed = speed.div_euclid(2);
                }
                Ok(speed)
            }

            Self::RunSpeed => Ok(2 * Self::WalkSpeed.numeric(ctx)?),

            Self::DashSpeed => {
                if ctx.exceeds_overweight()? {
                    Ok(0)
                } else {
                    Ok(3 * ctx.stat(Stat::Agility)?)
                }
            }

            // Enum-valued; `compute` routes this variant before the numeric path.
            Self::WeightStatus => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Effect, OverrideOp, StatOverride};

    struct Fixture {
        table: StatTable,
        effects: EffectRegistry,
        level: u32,
        resources: ResourcePool,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                table: StatTable::default(),
                effects: EffectRegistry::new(),
                level: EngineConfig::DEFAULT_LEVEL,
                resources: ResourcePool::default(),
            }
        }

        fn ctx(&self) -> StatContext<'_> {
            StatContext::new(&self.table, &self.effects, self.level, &self.resources)
        }

        fn value(&self, kind: DerivedKind) -> i64 {
            kind.compute(&self.ctx()).unwrap().as_int().unwrap()
        }
    }

    #[test]
    fn defaults_at_level_one() {
        let fixture = Fixture::new();
        assert_eq!(fixture.value(DerivedKind::BuildBonus), 1);
        assert_eq!(fixture.value(DerivedKind::MaxHp), 11); // 10*1 + 1*1
        assert_eq!(fixture.value(DerivedKind::MaxMp), 10); // (10+10)//2 * 1 * 1
        assert_eq!(fixture.value(DerivedKind::MaxStress), 200);
        assert_eq!(fixture.value(DerivedKind::MaxActionPoints), 1);
        assert_eq!(fixture.value(DerivedKind::HpRegenRate), 0); // level < 5
    }

    #[test]
    fn hp_regen_at_level_ten_build_twenty() {
        let mut fixture = Fixture::new();
        fixture.level = 10;
        fixture.table.set(Stat::Build, 20);

        assert_eq!(fixture.value(DerivedKind::BuildBonus), 2);
        assert_eq!(fixture.value(DerivedKind::HpRegenRate), 4); // ceil(2 * (10//5))
    }

    #[test]
    fn mp_regen_ceils_the_fraction() {
        let mut fixture = Fixture::new();
        fixture.level = 10;
        fixture.table.set(Stat::Intelligence, 20);
        fixture.table.set(Stat::Perception, 10);
        fixture.table.set(Stat::Build, 20);

        // (2+1)/2 * (2/2) * (10//5 + 1) = 4.5 -> 5
        assert_eq!(fixture.value(DerivedKind::MpRegenRate), 5);
    }

    #[test]
    fn weight_thresholds_follow_strength() {
        let fixture = Fixture::new();
        assert_eq!(fixture.value(DerivedKind::CarryWeight), 10);
        assert_eq!(fixture.value(DerivedKind::OverweightWeight), 20);
        assert_eq!(fixture.value(DerivedKind::MaxWeight), 30);
    }

    #[test]
    fn weight_boundary_scenario() {
        // strength 10: thresholds 10/20/30. At 25 the overweight test wins,
        // so the status is overweight and walking is halved.
        let mut fixture = Fixture::new();
        fixture.resources.weight = 25;

        let ctx = fixture.ctx();
        assert_eq!(ctx.weight_status().unwrap(), WeightStatus::Overweight);
        assert_eq!(fixture.value(DerivedKind::WalkSpeed), 5);
        assert_eq!(fixture.value(DerivedKind::RunSpeed), 10);
        assert_eq!(fixture.value(DerivedKind::DashSpeed), 0);
    }

    #[test]
    fn weight_below_threshold_keeps_full_speed() {
        let mut fixture = Fixture::new();
        fixture.resources.weight = 19;

        let ctx = fixture.ctx();
        assert_eq!(ctx.weight_status().unwrap(), WeightStatus::Normal);
        assert_eq!(fixture.value(DerivedKind::WalkSpeed), 10);
        assert_eq!(fixture.value(DerivedKind::RunSpeed), 20);
        assert_eq!(fixture.value(DerivedKind::DashSpeed), 30);

        // The threshold itself is inclusive.
        fixture.resources.weight = 20;
        assert_eq!(fixture.ctx().weight_status().unwrap(), WeightStatus::Overweight);
        assert_eq!(fixture.value(DerivedKind::WalkSpeed), 5);
    }

    #[test]
    fn stat_overrides_cascade_into_formulas() {
        let mut fixture = Fixture::new();
        fixture.effects.attach(Effect::new(
            "giant strength",
            vec![StatOverride::permanent(
                Stat::Strength,
                OverrideOp::Replace,
                30.0,
            )],
        ));

        assert_eq!(fixture.value(DerivedKind::CarryWeight), 30);
        assert_eq!(fixture.value(DerivedKind::OverweightWeight), 60);
        assert_eq!(fixture.value(DerivedKind::StrengthBonus), 3);
    }

    #[test]
    fn pinned_bonus_cascades_into_regen() {
        // The potion from the original demo: build_bonus locked to 3
        // regardless of the stat behind it.
        let mut fixture = Fixture::new();
        fixture.level = 10;
        fixture.effects.attach(Effect::new(
            "potion",
            vec![StatOverride::permanent(
                DerivedKind::BuildBonus,
                OverrideOp::Replace,
                3.0,
            )],
        ));

        assert_eq!(fixture.value(DerivedKind::BuildBonus), 3);
        assert_eq!(fixture.value(DerivedKind::HpRegenRate), 6); // 3 * (10//5)
    }
}
