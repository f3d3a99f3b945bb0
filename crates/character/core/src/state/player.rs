//! Player identity and character selection.

use super::character::{Character, CharacterId};

/// External chat-platform user identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player: identity, current selection, GM flag.
///
/// A player may own many characters but plays at most one at a time; GMs may
/// act on any character, not just their own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub current_character: Option<CharacterId>,
    pub is_gm: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            current_character: None,
            is_gm: false,
        }
    }

    pub fn gm(id: PlayerId) -> Self {
        Self {
            id,
            current_character: None,
            is_gm: true,
        }
    }

    /// Makes `character` the one this player currently plays.
    pub fn select(&mut self, character: CharacterId) {
        self.current_character = Some(character);
    }

    /// Clears a selection (e.g. when the character no longer exists).
    pub fn deselect(&mut self) {
        self.current_character = None;
    }

    /// Whether this player may act on the given character.
    pub fn can_act_on(&self, character: &Character) -> bool {
        self.is_gm || character.player == self.id
    }
}
