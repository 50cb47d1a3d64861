//! Error types for the game core
//!
//! Domain errors are returned synchronously to the immediate caller.
//! Persistence errors come only from score repositories.

use crate::merge::ItemId;
use crate::session::GamePhase;

/// Errors raised by merge, registry and session operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// A tier number below zero was passed in
    #[error("invalid item tier {0}: tiers start at 0")]
    InvalidTier(i32),

    /// The item roster size must be positive
    #[error("invalid roster size {0}: must be greater than 0")]
    InvalidRosterSize(i32),

    /// The ceiling contact limit must be positive
    #[error("invalid contact time limit {0}: must be greater than 0")]
    InvalidContactTimeLimit(f32),

    /// The item is not (or no longer) in the registry
    #[error("item {0} not found")]
    NotFound(ItemId),

    /// The two items cannot be merged with each other
    #[error("items {a} and {b} cannot be merged")]
    NotMergeable { a: ItemId, b: ItemId },

    /// Operation not allowed in the current session phase
    #[error("operation requires phase {expected:?}, session is {actual:?}")]
    InvalidPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
}

/// Errors raised while loading or saving the score record
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Browser storage unavailable or rejected the write
    #[error("score storage unavailable: {0}")]
    Storage(String),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
