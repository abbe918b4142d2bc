//! Error types for game adaptation and report building.

use thiserror::Error;

/// A single game that cannot take part in aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Player {0} is neither White nor Black in this game")]
    PlayerNotInGame(String),

    #[error("Game has no final result: {0}")]
    Unfinished(String),

    #[error("Game has no readable moves")]
    EmptyMoves,
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No games supplied")]
    NoGames,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
