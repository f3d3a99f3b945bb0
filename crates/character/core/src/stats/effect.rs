//! Timed overrides and the per-character effect registry.
//!
//! An [`Effect`] bundles overrides under a shared name and lifetime; the
//! [`EffectRegistry`] keeps them in attachment order. That order is part of
//! the contract: it is the fold order of
//! [`resolve`](crate::stats::resolve::resolve), and a `Replace` placed before
//! or after an `Add` is a player-visible difference.

use super::attribute::AttributeId;
use crate::error::EngineError;

/// Arithmetic applied by a single override.
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
pub enum OverrideOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Discards the folded value and continues from the operand.
    Replace,
}

impl OverrideOp {
    /// Applies the operation to the folded value.
    ///
    /// `Divide` is the only fallible case: a zero operand fails with
    /// [`EngineError::DivisionByZero`] naming the attribute being resolved.
    pub fn apply(
        self,
        target: AttributeId,
        value: f64,
        operand: f64,
    ) -> Result<f64, EngineError> {
        match self {
            Self::Add => Ok(value + operand),
            Self::Subtract => Ok(value - operand),
            Self::Multiply => Ok(value * operand),
            Self::Divide => {
                if operand == 0.0 {
                    Err(EngineError::DivisionByZero { target })
                } else {
                    Ok(value / operand)
                }
            }
            Self::Replace => Ok(operand),
        }
    }
}

/// A single arithmetic adjustment with an optional tick lifetime.
///
/// Owned by-value by exactly one effect; nothing is shared.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatOverride {
    pub target: AttributeId,
    pub op: OverrideOp,
    pub operand: f64,
    /// Remaining ticks; `None` means permanent.
    pub expires_in: Option<u32>,
}

impl StatOverride {
    /// A permanent override.
    pub fn permanent(target: impl Into<AttributeId>, op: OverrideOp, operand: f64) -> Self {
        Self {
            target: target.into(),
            op,
            operand,
            expires_in: None,
        }
    }

    /// An override that expires after `ticks`.
    pub fn expiring(
        target: impl Into<AttributeId>,
        op: OverrideOp,
        operand: f64,
        ticks: u32,
    ) -> Self {
        Self {
            target: target.into(),
            op,
            operand,
            expires_in: Some(ticks),
        }
    }
}

/// A named bundle of overrides with a shared lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub name: String,
    pub description: Option<String>,
    pub overrides: Vec<StatOverride>,
}

impl Effect {
    pub fn new(name: impl Into<String>, overrides: Vec<StatOverride>) -> Self {
        Self {
            name: name.into(),
            description: None,
            overrides,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Registry-assigned identity of an attached effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u32);

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An effect as held by the registry, together with its identity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub id: EffectId,
    pub effect: Effect,
}

/// Ordered collection of the effects attached to one character.
///
/// Attachment order is preserved; identifiers are never reused within one
/// character, so a stale [`EffectId`] can only miss, not alias.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRegistry {
    entries: Vec<AppliedEffect>,
    next_id: u32,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an effect. No dedup by name: two potions of the same name are
    /// legal and independent.
    pub fn attach(&mut self, effect: Effect) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.entries.push(AppliedEffect { id, effect });
        id
    }

    /// Removes an effect by identity. Returns `false` (not an error) if the
    /// id is absent.
    pub fn detach(&mut self, id: EffectId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Advances time by `ticks`.
    ///
    /// Every finite expiry counter is decremented; an override whose counter
    /// reaches ≤ 0 is removed, and an effect left with no overrides is removed
    /// entirely. Permanent overrides are unaffected.
    pub fn tick(&mut self, ticks: u32) {
        for entry in &mut self.entries {
            entry.effect.overrides.retain_mut(|o| match o.expires_in.as_mut() {
                Some(remaining) => {
                    *remaining = remaining.saturating_sub(ticks);
                    *remaining > 0
                }
                None => true,
            });
        }
        self.entries.retain(|entry| !entry.effect.overrides.is_empty());
    }

    /// Every override targeting `target`, across every effect, in attachment
    /// order (insertion order within an effect, effects in attachment order).
    ///
    /// This ordering is load-bearing: it is the fold order of `resolve`.
    pub fn overrides_for(
        &self,
        target: AttributeId,
    ) -> impl Iterator<Item = &StatOverride> + '_ {
        self.entries
            .iter()
            .flat_map(|entry| entry.effect.overrides.iter())
            .filter(move |o| o.target == target)
    }

    /// Attached effects in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &AppliedEffect> {
        self.entries.iter()
    }

    /// Looks up an attached effect by identity.
    pub fn get(&self, id: EffectId) -> Option<&AppliedEffect> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
