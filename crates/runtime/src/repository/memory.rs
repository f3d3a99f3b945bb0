//! In-memory repository implementations.

use std::collections::HashMap;
use std::sync::RwLock;

use character_core::{Character, CharacterId, Player, PlayerId};

use super::{CharacterRepository, PlayerRepository, RepositoryError};

/// In-memory implementation of [`PlayerRepository`].
#[derive(Default)]
pub struct InMemoryPlayerRepo {
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerRepository for InMemoryPlayerRepo {
    fn find(&self, id: PlayerId) -> Result<Option<Player>, RepositoryError> {
        let players = self.players.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(players.get(&id).cloned())
    }

    fn save(&self, player: &Player) -> Result<(), RepositoryError> {
        let mut players = self.players.write().map_err(|_| RepositoryError::Poisoned)?;
        players.insert(player.id, player.clone());
        Ok(())
    }
}

#[derive(Default)]
struct CharacterStore {
    characters: HashMap<CharacterId, Character>,
    next_id: u64,
}

/// In-memory implementation of [`CharacterRepository`].
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    store: RwLock<CharacterStore>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryCharacterRepo {
    fn next_id(&self) -> Result<CharacterId, RepositoryError> {
        let mut store = self.store.write().map_err(|_| RepositoryError::Poisoned)?;
        let id = CharacterId(store.next_id);
        store.next_id += 1;
        Ok(id)
    }

    fn load(&self, id: CharacterId) -> Result<Option<Character>, RepositoryError> {
        let store = self.store.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(store.characters.get(&id).cloned())
    }

    fn save(&self, character: &Character) -> Result<(), RepositoryError> {
        let mut store = self.store.write().map_err(|_| RepositoryError::Poisoned)?;
        store.characters.insert(character.id, character.clone());
        Ok(())
    }

    fn delete(&self, id: CharacterId) -> Result<(), RepositoryError> {
        let mut store = self.store.write().map_err(|_| RepositoryError::Poisoned)?;
        store.characters.remove(&id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Character>, RepositoryError> {
        let store = self.store.read().map_err(|_| RepositoryError::Poisoned)?;
        let mut characters: Vec<Character> = store.characters.values().cloned().collect();
        characters.sort_by_key(|c| c.id);
        Ok(characters)
    }
}
