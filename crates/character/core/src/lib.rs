//! Deterministic character rules shared across front ends.
//!
//! `character-core` defines the attribute derivation and override engine: the
//! eight base attributes, timed effects whose overrides fold in attachment
//! order, the derived-attribute catalog, and the before/after diff protocol
//! that reports the consequences of a mutation. All state mutation flows
//! through [`state::Character`]; the crate performs no I/O, takes no ambient
//! state, and leaves persistence and presentation to its caller.
pub mod config;
pub mod error;
pub mod state;
pub mod stats;

pub use config::EngineConfig;
pub use error::{EngineError, ErrorSeverity};
pub use state::{
    Character, CharacterId, ChangeMode, ExtraStat, Player, PlayerId, PointBuyOutcome,
    RegenOutcome, RegenPool, RegenSpan, ResourceChange,
};
pub use stats::{
    AppliedEffect, AttributeDelta, AttributeDiff, AttributeId, AttributeValue, DerivedKind,
    Effect, EffectId, EffectRegistry, OverrideOp, PropertySnapshot, ResourceKind, ResourcePool,
    Stat, StatContext, StatOverride, StatTable, WeightStatus, resolve,
};
