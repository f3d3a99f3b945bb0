use std::io;

/// Errors surfaced by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A reader or writer panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,
}
