use character_core::{Character, CharacterId, Player, PlayerId};

use super::RepositoryError;

/// Storage for player rows.
///
/// Players are created lazily on first interaction; a missing row is not an
/// error at this layer.
pub trait PlayerRepository: Send + Sync {
    fn find(&self, id: PlayerId) -> Result<Option<Player>, RepositoryError>;

    /// Inserts or replaces the row for `player.id`.
    fn save(&self, player: &Player) -> Result<(), RepositoryError>;
}

/// Storage for character documents.
///
/// The engine mutates in-memory values; callers persist the result through
/// this boundary. Implementations are internally synchronized, which together
/// with load→mutate→save per operation gives the single-writer discipline the
/// engine assumes (last writer wins across concurrent edits).
pub trait CharacterRepository: Send + Sync {
    /// Allocates the next unused character id.
    fn next_id(&self) -> Result<CharacterId, RepositoryError>;

    fn load(&self, id: CharacterId) -> Result<Option<Character>, RepositoryError>;

    /// Inserts or replaces the document for `character.id`.
    fn save(&self, character: &Character) -> Result<(), RepositoryError>;

    fn delete(&self, id: CharacterId) -> Result<(), RepositoryError>;

    /// Every stored character (the GM view).
    fn list(&self) -> Result<Vec<Character>, RepositoryError>;

    /// Characters owned by one player.
    fn list_for(&self, player: PlayerId) -> Result<Vec<Character>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.player == player)
            .collect())
    }
}
