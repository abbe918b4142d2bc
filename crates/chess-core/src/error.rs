//! Error types for PGN parsing and position replay.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("PGN contains no moves")]
    NoMoves,

    #[error("Game starts from a non-standard position: {0}")]
    NonStandardStart(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Unparseable SAN at ply {ply}: {san}")]
    InvalidSan { ply: usize, san: String },

    #[error("Illegal move at ply {ply}: {san}")]
    IllegalMove { ply: usize, san: String },
}
