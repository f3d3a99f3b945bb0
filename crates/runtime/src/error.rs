use character_core::{CharacterId, EngineConfig, EngineError, PlayerId};

use crate::repository::RepositoryError;

/// Errors surfaced by the command-layer service.
///
/// Engine failures pass through unchanged so callers can report the domain
/// condition; everything else is a command-layer concern (selection,
/// permissions, argument validation, storage).
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("player {0} has no characters")]
    NoCharacters(PlayerId),

    #[error("player {0} has no character selected")]
    NoCharacterSelected(PlayerId),

    #[error("character {0} does not exist anymore")]
    CharacterNotFound(CharacterId),

    #[error("character {0} is not available to this player")]
    NotPermitted(CharacterId),

    #[error("character names are limited to {} characters", EngineConfig::MAX_NAME_LENGTH)]
    NameTooLong,

    #[error("'rounds' and 'full' cannot be combined")]
    ConflictingRegenArguments,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
