//! Override resolution - the ordered fold.
//!
//! `resolve` starts from a base value and applies every override targeting
//! the attribute as a left fold in attachment order. `Replace` mid-chain pins
//! the accumulator while letting later overrides keep adjusting it; this is a
//! deliberate, player-visible mechanic, not an implementation accident.
//!
//! The final value is rounded **up** to the nearest integer so partial
//! bonuses never round away a benefit.

use super::attribute::AttributeId;
use super::effect::EffectRegistry;
use crate::error::EngineError;

/// Folds all applicable overrides over `base` and ceils the result.
///
/// Pure over its inputs and the registry's current contents; fails with
/// [`EngineError::DivisionByZero`] when a `Divide` override carries a zero
/// operand, touching no state.
pub fn resolve(
    effects: &EffectRegistry,
    target: AttributeId,
    base: i64,
) -> Result<i64, EngineError> {
    let mut value = base as f64;
    for o in effects.overrides_for(target) {
        value = o.op.apply(target, value, o.operand)?;
    }
    Ok(value.ceil() as i64)
}
