//! Error taxonomy for the character engine.
//!
//! Every variant of [`EngineError`] is a *domain* condition the caller is
//! expected to report to the end user and recover from; none of them leaves a
//! character in a partially mutated state. Programming errors are not
//! representable here and propagate as panics to the surrounding
//! application's top-level handler.

use crate::stats::{AttributeId, Stat};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same request may succeed after the player
    /// changes something (frees points, removes a broken effect).
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors surfaced by engine queries and mutations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// The name matches neither a base attribute nor a catalog entry.
    #[error("unknown attribute: {name}")]
    UnknownAttribute { name: String },

    /// A Divide override with a zero operand was hit while resolving.
    #[error("division by zero while resolving {target}")]
    DivisionByZero { target: AttributeId },

    /// A point-buy would drive the free-point balance negative.
    #[error("not enough free stat points: {missing} more needed")]
    InsufficientFreePoints { missing: i64 },

    /// A stat change below the allowed floor.
    #[error("{stat} must be at least {floor}, got {value}")]
    InvalidRange { stat: Stat, value: i64, floor: i64 },
}

impl EngineError {
    /// Classifies this error for the caller's recovery strategy.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAttribute { .. } | Self::InvalidRange { .. } => ErrorSeverity::Validation,
            Self::DivisionByZero { .. } | Self::InsufficientFreePoints { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }
}
