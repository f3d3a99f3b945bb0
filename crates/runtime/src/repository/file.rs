//! File-based repository implementations.
//!
//! Documents are stored as individual JSON files per id. Writes go to a
//! temporary file followed by an atomic rename, so a crash mid-save never
//! leaves a truncated document behind.

use std::fs;
use std::path::{Path, PathBuf};

use character_core::{Character, CharacterId, Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CharacterRepository, PlayerRepository, RepositoryError};

/// Default data directory for file repositories.
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "character-engine")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

#[derive(Serialize, Deserialize)]
struct CharacterDocument {
    updated_at: DateTime<Utc>,
    character: Character,
}

#[derive(Serialize, Deserialize)]
struct PlayerDocument {
    updated_at: DateTime<Utc>,
    player: Player,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    let temp_path = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, RepositoryError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let value =
        serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(Some(value))
}

/// File-based implementation of [`CharacterRepository`].
///
/// Stores characters as `char_{id}.json` under the base directory.
pub struct FileCharacterRepository {
    base_dir: PathBuf,
}

impl FileCharacterRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn character_path(&self, id: CharacterId) -> PathBuf {
        self.base_dir.join(format!("char_{}.json", id.0))
    }

    fn stored_ids(&self) -> Result<Vec<CharacterId>, RepositoryError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(id) = name
                .strip_prefix("char_")
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|digits| digits.parse::<u64>().ok())
            {
                ids.push(CharacterId(id));
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl CharacterRepository for FileCharacterRepository {
    fn next_id(&self) -> Result<CharacterId, RepositoryError> {
        let next = self
            .stored_ids()?
            .last()
            .map(|id| id.0 + 1)
            .unwrap_or_default();
        Ok(CharacterId(next))
    }

    fn load(&self, id: CharacterId) -> Result<Option<Character>, RepositoryError> {
        let doc: Option<CharacterDocument> = read_json(&self.character_path(id))?;
        Ok(doc.map(|doc| doc.character))
    }

    fn save(&self, character: &Character) -> Result<(), RepositoryError> {
        let path = self.character_path(character.id);
        write_json(
            &path,
            &CharacterDocument {
                updated_at: Utc::now(),
                character: character.clone(),
            },
        )?;
        tracing::debug!("saved character {} to {}", character.id, path.display());
        Ok(())
    }

    fn delete(&self, id: CharacterId) -> Result<(), RepositoryError> {
        let path = self.character_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("deleted character {}", id);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Character>, RepositoryError> {
        let mut characters = Vec::new();
        for id in self.stored_ids()? {
            if let Some(character) = self.load(id)? {
                characters.push(character);
            }
        }
        Ok(characters)
    }
}

/// File-based implementation of [`PlayerRepository`].
///
/// Stores players as `player_{id}.json` under the base directory.
pub struct FilePlayerRepository {
    base_dir: PathBuf,
}

impl FilePlayerRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn player_path(&self, id: PlayerId) -> PathBuf {
        self.base_dir.join(format!("player_{}.json", id.0))
    }
}

impl PlayerRepository for FilePlayerRepository {
    fn find(&self, id: PlayerId) -> Result<Option<Player>, RepositoryError> {
        let doc: Option<PlayerDocument> = read_json(&self.player_path(id))?;
        Ok(doc.map(|doc| doc.player))
    }

    fn save(&self, player: &Player) -> Result<(), RepositoryError> {
        write_json(
            &self.player_path(player.id),
            &PlayerDocument {
                updated_at: Utc::now(),
                player: player.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_documents_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCharacterRepository::new(dir.path()).unwrap();

        assert_eq!(repo.next_id().unwrap(), CharacterId(0));

        let character = Character::new(CharacterId(0), PlayerId(7), "Pot");
        repo.save(&character).unwrap();

        let loaded = repo.load(CharacterId(0)).unwrap().unwrap();
        assert_eq!(loaded, character);
        assert_eq!(repo.next_id().unwrap(), CharacterId(1));

        repo.delete(CharacterId(0)).unwrap();
        assert!(repo.load(CharacterId(0)).unwrap().is_none());
    }

    #[test]
    fn list_filters_by_owner() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCharacterRepository::new(dir.path()).unwrap();

        repo.save(&Character::new(CharacterId(0), PlayerId(1), "A"))
            .unwrap();
        repo.save(&Character::new(CharacterId(1), PlayerId(2), "B"))
            .unwrap();
        repo.save(&Character::new(CharacterId(2), PlayerId(1), "C"))
            .unwrap();

        assert_eq!(repo.list().unwrap().len(), 3);
        let mine = repo.list_for(PlayerId(1)).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c.player == PlayerId(1)));
    }

    #[test]
    fn player_documents_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();

        assert!(repo.find(PlayerId(7)).unwrap().is_none());

        let mut player = Player::new(PlayerId(7));
        player.select(CharacterId(3));
        repo.save(&player).unwrap();

        assert_eq!(repo.find(PlayerId(7)).unwrap().unwrap(), player);
    }
}
