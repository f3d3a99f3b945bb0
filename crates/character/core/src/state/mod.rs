//! Character and player state - the stored aggregates.

pub mod character;
pub mod player;

pub use character::{
    Character, CharacterId, ChangeMode, ExtraStat, PointBuyOutcome, RegenOutcome, RegenPool,
    RegenSpan, ResourceChange,
};
pub use player::{Player, PlayerId};
