//! Position replay: move-sequence text to FEN.

use shakmaty::{fen::Fen, san::SanPlus, Chess, EnPassantMode, Position};

use crate::error::PositionError;
use crate::notation::sequence_plies;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Resolves the board position reached by a move sequence.
pub trait PositionLookup {
    fn fen_for_sequence(&self, sequence: &str) -> Result<String, PositionError>;
}

/// Replays SAN plies from the standard starting position with shakmaty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyPositions;

impl PositionLookup for ShakmatyPositions {
    fn fen_for_sequence(&self, sequence: &str) -> Result<String, PositionError> {
        moves_to_fen(sequence)
    }
}

/// FEN of the position after every ply of `sequence` has been played.
pub fn moves_to_fen(sequence: &str) -> Result<String, PositionError> {
    let pos = replay(&sequence_plies(sequence))?;
    Ok(Fen::from_position(&pos, EnPassantMode::Legal).to_string())
}

fn replay(plies: &[&str]) -> Result<Chess, PositionError> {
    let mut pos = Chess::default();

    for (i, ply) in plies.iter().enumerate() {
        let san_plus: SanPlus = ply.parse().map_err(|_| PositionError::InvalidSan {
            ply: i + 1,
            san: ply.to_string(),
        })?;

        let illegal = || PositionError::IllegalMove {
            ply: i + 1,
            san: ply.to_string(),
        };

        let mv = san_plus.san.to_move(&pos).map_err(|_| illegal())?;
        pos = pos.play(mv).map_err(|_| illegal())?;
    }

    Ok(pos)
}
