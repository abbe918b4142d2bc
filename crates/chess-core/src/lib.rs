//! Chess-level building blocks shared by the opening statistics pipeline:
//! PGN parsing, canonical move-sequence text, position replay and opening names.

pub mod error;
pub mod game_data;
pub mod notation;
pub mod openings;
pub mod pgn;
pub mod position;
