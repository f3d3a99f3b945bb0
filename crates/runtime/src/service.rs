//! Command-layer service over the character engine.
//!
//! One service method is one command: it loads the acting player's current
//! character, runs the engine mutation, and persists the result. Permission
//! checks (owner vs GM) and argument validation live here, never in the
//! engine.

use character_core::{
    AttributeDiff, ChangeMode, Character, CharacterId, Effect, EffectId, EngineConfig,
    PlayerId, Player, PointBuyOutcome, RegenOutcome, RegenPool, RegenSpan, ResourceChange,
    ResourceKind, Stat,
};
use rand::Rng;

use crate::error::{Result, RuntimeError};
use crate::repository::{CharacterRepository, PlayerRepository};
use crate::rolls::{RollOutcome, stat_check};

/// Which pools a regen command touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegenTarget {
    All,
    Health,
    Mana,
}

impl RegenTarget {
    pub const fn pools(self) -> &'static [RegenPool] {
        match self {
            Self::All => &[RegenPool::Health, RegenPool::Mana],
            Self::Health => &[RegenPool::Health],
            Self::Mana => &[RegenPool::Mana],
        }
    }
}

/// The command layer: player bookkeeping plus engine mutations, persisted
/// through the repository boundary.
pub struct GameService<P, C> {
    players: P,
    characters: C,
}

impl<P: PlayerRepository, C: CharacterRepository> GameService<P, C> {
    pub fn new(players: P, characters: C) -> Self {
        Self {
            players,
            characters,
        }
    }

    pub fn players(&self) -> &P {
        &self.players
    }

    pub fn characters(&self) -> &C {
        &self.characters
    }

    fn player_or_new(&self, id: PlayerId) -> Result<Player> {
        Ok(self.players.find(id)?.unwrap_or_else(|| Player::new(id)))
    }

    /// Creates a character for the player and makes it their current one.
    pub fn create_character(&self, player_id: PlayerId, name: &str) -> Result<Character> {
        if name.chars().count() > EngineConfig::MAX_NAME_LENGTH {
            return Err(RuntimeError::NameTooLong);
        }

        let mut player = self.player_or_new(player_id)?;
        let id = self.characters.next_id()?;
        let character = Character::new(id, player_id, name);
        self.characters.save(&character)?;

        player.select(id);
        self.players.save(&player)?;

        tracing::info!("player {player_id} created character {character}");
        Ok(character)
    }

    /// Characters the player may select: their own, or everything for a GM.
    pub fn characters_for(&self, player_id: PlayerId) -> Result<Vec<Character>> {
        let player = self.player_or_new(player_id)?;
        if player.is_gm {
            Ok(self.characters.list()?)
        } else {
            Ok(self.characters.list_for(player_id)?)
        }
    }

    /// Makes `character_id` the player's current character.
    pub fn select_character(
        &self,
        player_id: PlayerId,
        character_id: CharacterId,
    ) -> Result<Character> {
        let mut player = self.player_or_new(player_id)?;
        let character = self
            .characters
            .load(character_id)?
            .ok_or(RuntimeError::CharacterNotFound(character_id))?;
        if !player.can_act_on(&character) {
            return Err(RuntimeError::NotPermitted(character_id));
        }

        player.select(character_id);
        self.players.save(&player)?;

        tracing::debug!("player {player_id} selected character {character}");
        Ok(character)
    }

    /// The player's current character, with the command-layer diagnostics the
    /// original flow reports: no characters at all, nothing selected, or a
    /// stale selection (which is cleared and persisted before erroring).
    pub fn current_character(&self, player_id: PlayerId) -> Result<(Player, Character)> {
        let mut player = self
            .players
            .find(player_id)?
            .ok_or(RuntimeError::NoCharacters(player_id))?;
        if self.characters.list_for(player_id)?.is_empty() && !player.is_gm {
            return Err(RuntimeError::NoCharacters(player_id));
        }

        let selected = player
            .current_character
            .ok_or(RuntimeError::NoCharacterSelected(player_id))?;

        match self.characters.load(selected)? {
            Some(character) => Ok((player, character)),
            None => {
                player.deselect();
                self.players.save(&player)?;
                Err(RuntimeError::CharacterNotFound(selected))
            }
        }
    }

    /// Loads the current character, applies `mutate`, saves, returns.
    fn with_current<T>(
        &self,
        player_id: PlayerId,
        mutate: impl FnOnce(&mut Character) -> Result<T>,
    ) -> Result<T> {
        let (_, mut character) = self.current_character(player_id)?;
        let outcome = mutate(&mut character)?;
        self.characters.save(&character)?;
        Ok(outcome)
    }

    /// Point-buy on the current character.
    pub fn point_buy(
        &self,
        player_id: PlayerId,
        stat: Stat,
        mode: ChangeMode,
        amount: i64,
    ) -> Result<PointBuyOutcome> {
        self.with_current(player_id, |character| {
            let outcome = character.point_buy(stat, mode, amount)?;
            tracing::info!(
                "{character} {stat}: {} -> {} ({} free points left)",
                outcome.previous,
                outcome.value,
                outcome.free_points,
            );
            Ok(outcome)
        })
    }

    /// Regenerates the selected pools.
    ///
    /// `rounds` and `full` are mutually exclusive; with neither given a
    /// single round is applied.
    pub fn regen(
        &self,
        player_id: PlayerId,
        target: RegenTarget,
        rounds: Option<u32>,
        full: bool,
    ) -> Result<Vec<RegenOutcome>> {
        if rounds.is_some() && full {
            return Err(RuntimeError::ConflictingRegenArguments);
        }
        let span = if full {
            RegenSpan::Full
        } else {
            RegenSpan::Rounds(rounds.unwrap_or(1))
        };

        self.with_current(player_id, |character| {
            let mut outcomes = Vec::with_capacity(target.pools().len());
            for &pool in target.pools() {
                let outcome = character.regen(pool, span)?;
                tracing::debug!(
                    "{character} regenerated {} {pool}: {} -> {}",
                    outcome.regained(),
                    outcome.before,
                    outcome.after,
                );
                outcomes.push(outcome);
            }
            Ok(outcomes)
        })
    }

    /// Directly changes a current resource on the current character.
    pub fn adjust_resource(
        &self,
        player_id: PlayerId,
        resource: ResourceKind,
        mode: ChangeMode,
        amount: i64,
    ) -> Result<ResourceChange> {
        self.with_current(player_id, |character| {
            let change = character.adjust_resource(resource, mode, amount)?;
            tracing::debug!(
                "{character} current_{resource}: {} -> {} (max {})",
                change.before,
                change.after,
                change.max,
            );
            Ok(change)
        })
    }

    /// Attaches an effect to the current character.
    ///
    /// The before/after diff is best-effort presentation data: it is omitted
    /// when either side fails to resolve (e.g. the new effect divides by
    /// zero), while the attachment itself always goes through.
    pub fn apply_effect(
        &self,
        player_id: PlayerId,
        effect: Effect,
    ) -> Result<(EffectId, Option<AttributeDiff>)> {
        self.with_current(player_id, |character| {
            let before = character.properties().ok();
            let id = character.apply_effect(effect);
            let diff = before.and_then(|before| {
                character
                    .properties()
                    .ok()
                    .map(|after| AttributeDiff::between(&before, &after))
            });
            tracing::info!("{character} gained effect {id}");
            Ok((id, diff))
        })
    }

    /// Removes an effect from the current character by identity.
    pub fn remove_effect(&self, player_id: PlayerId, id: EffectId) -> Result<bool> {
        self.with_current(player_id, |character| Ok(character.remove_effect(id)))
    }

    /// Advances effect lifetimes on the current character.
    pub fn expire_tick(&self, player_id: PlayerId, ticks: u32) -> Result<()> {
        self.with_current(player_id, |character| {
            character.expire_tick(ticks);
            Ok(())
        })
    }

    /// Rolls a d100 check against a resolved stat of the current character.
    pub fn roll_stat(
        &self,
        player_id: PlayerId,
        stat: Stat,
        modifier: i64,
        rng: &mut impl Rng,
    ) -> Result<RollOutcome> {
        let (_, character) = self.current_character(player_id)?;
        let value = character.resolved_stat(stat)?;
        let outcome = stat_check(stat, value, modifier, rng);
        tracing::debug!(
            "{character} rolled {stat}: {} vs {} (level {})",
            outcome.roll,
            outcome.difficulty,
            outcome.success_level,
        );
        Ok(outcome)
    }
}
