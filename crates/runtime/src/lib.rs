//! Caller-side collaborators around `character-core`.
//!
//! The engine is pure and synchronous; this crate supplies everything it
//! deliberately leaves to its caller: document repositories (in-memory and
//! file-backed), the command-layer [`GameService`] that enforces selection
//! and GM permissions, and dice rolls. Presentation stays with the front end;
//! everything here returns plain values and typed errors.

pub mod error;
pub mod repository;
pub mod rolls;
pub mod service;

pub use error::{Result, RuntimeError};
pub use repository::{
    CharacterRepository, FileCharacterRepository, FilePlayerRepository, InMemoryCharacterRepo,
    InMemoryPlayerRepo, PlayerRepository, RepositoryError, default_data_dir,
};
pub use rolls::{RollOutcome, stat_check};
pub use service::{GameService, RegenTarget};
