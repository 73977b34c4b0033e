use thiserror::Error;

use crate::types::{Player, Position};

/// Errors raised by a [`Session`](crate::game::Session).
///
/// Every variant is recoverable: front-ends report it and ask again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// Input that does not parse as a coordinate pair.
    #[error("malformed move: {0:?}")]
    Malformed(String),

    /// Coordinates as supplied by the caller.
    #[error("row/col out of range: ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    #[error("illegal move at ({}, {})", .0.row, .0.col)]
    NotLegal(Position),

    #[error("game is already over")]
    GameOver,

    #[error("{0} has no legal moves")]
    NoLegalMoves(Player),
}

impl GameError {
    /// True for the errors a player's bad input can cause.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            GameError::Malformed(_) | GameError::OutOfBounds { .. } | GameError::NotLegal(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("invalid config object: {0}")]
    Deserialize(String),
}

/// Failures surfaced by the front-end driver and its adapters.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
