//! Opening names for move sequences.
//!
//! The built-in book maps well-known move orders to display names. Lookup picks
//! the longest book line that is a ply-wise prefix of the queried sequence, so
//! `1.e4 c5 2.Nf3 d6 3.d4` still resolves to the Sicilian entry it extends.

use crate::notation::sequence_plies;

pub const UNKNOWN_OPENING: &str = "Unknown Opening";

/// Resolves a display name for a move sequence.
pub trait OpeningNamer {
    fn name_for_sequence(&self, sequence: &str) -> String;
}

// (space-separated SAN plies, name)
static BOOK_LINES: &[(&str, &str)] = &[
    // 1.e4
    ("e4", "King's Pawn Opening"),
    ("e4 e5", "King's Pawn Game"),
    ("e4 e5 Nf3", "King's Knight Opening"),
    ("e4 e5 Nf3 Nc6", "King's Knight Opening: Normal Variation"),
    ("e4 e5 Nf3 Nc6 Bb5", "Ruy Lopez"),
    ("e4 e5 Nf3 Nc6 Bb5 a6", "Ruy Lopez: Morphy Defense"),
    ("e4 e5 Nf3 Nc6 Bb5 Nf6", "Ruy Lopez: Berlin Defense"),
    ("e4 e5 Nf3 Nc6 Bc4", "Italian Game"),
    ("e4 e5 Nf3 Nc6 Bc4 Bc5", "Italian Game: Giuoco Piano"),
    ("e4 e5 Nf3 Nc6 Bc4 Nf6", "Italian Game: Two Knights Defense"),
    ("e4 e5 Nf3 Nc6 d4", "Scotch Game"),
    ("e4 e5 Nf3 Nc6 Nc3", "Three Knights Opening"),
    ("e4 e5 Nf3 Nc6 Nc3 Nf6", "Four Knights Game"),
    ("e4 e5 Nf3 Nf6", "Petrov's Defense"),
    ("e4 e5 Nf3 d6", "Philidor Defense"),
    ("e4 e5 f4", "King's Gambit"),
    ("e4 e5 Nc3", "Vienna Game"),
    ("e4 e5 Bc4", "Bishop's Opening"),
    ("e4 e5 Qh5", "Wayward Queen Attack"),
    ("e4 c5", "Sicilian Defense"),
    ("e4 c5 Nf3 d6", "Sicilian Defense: Modern Variations"),
    ("e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6", "Sicilian Defense: Najdorf Variation"),
    ("e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 g6", "Sicilian Defense: Dragon Variation"),
    ("e4 c5 Nf3 Nc6", "Sicilian Defense: Old Sicilian"),
    ("e4 c5 Nf3 e6", "Sicilian Defense: French Variation"),
    ("e4 c5 Nc3", "Sicilian Defense: Closed"),
    ("e4 c5 c3", "Sicilian Defense: Alapin Variation"),
    ("e4 e6", "French Defense"),
    ("e4 e6 d4 d5 e5", "French Defense: Advance Variation"),
    ("e4 e6 d4 d5 exd5", "French Defense: Exchange Variation"),
    ("e4 c6", "Caro-Kann Defense"),
    ("e4 c6 d4 d5 e5", "Caro-Kann Defense: Advance Variation"),
    ("e4 d5", "Scandinavian Defense"),
    ("e4 d5 exd5 Qxd5", "Scandinavian Defense: Main Line"),
    ("e4 Nf6", "Alekhine Defense"),
    ("e4 d6", "Pirc Defense"),
    ("e4 g6", "Modern Defense"),
    // 1.d4
    ("d4", "Queen's Pawn Opening"),
    ("d4 d5", "Queen's Pawn Game"),
    ("d4 d5 c4", "Queen's Gambit"),
    ("d4 d5 c4 dxc4", "Queen's Gambit Accepted"),
    ("d4 d5 c4 e6", "Queen's Gambit Declined"),
    ("d4 d5 c4 c6", "Slav Defense"),
    ("d4 d5 Bf4", "London System"),
    ("d4 d5 Nf3 Nf6 Bf4", "London System"),
    ("d4 Nf6", "Indian Defense"),
    ("d4 Nf6 Bf4", "London System"),
    ("d4 Nf6 c4 g6", "King's Indian Defense"),
    ("d4 Nf6 c4 g6 Nc3 d5", "Grünfeld Defense"),
    ("d4 Nf6 c4 e6", "Indian Defense: East Indian"),
    ("d4 Nf6 c4 e6 Nc3 Bb4", "Nimzo-Indian Defense"),
    ("d4 Nf6 c4 e6 Nf3 b6", "Queen's Indian Defense"),
    ("d4 Nf6 c4 c5", "Benoni Defense"),
    ("d4 f5", "Dutch Defense"),
    // Flank openings
    ("c4", "English Opening"),
    ("c4 e5", "English Opening: Reversed Sicilian"),
    ("Nf3", "Zukertort Opening"),
    ("Nf3 d5 g3", "King's Indian Attack"),
    ("f4", "Bird Opening"),
    ("b3", "Nimzo-Larsen Attack"),
    ("g3", "Hungarian Opening"),
];

/// Static opening book with longest-prefix lookup.
#[derive(Debug, Clone)]
pub struct EcoBook {
    // Longest lines first so the first hit is the most specific one.
    lines: Vec<(Vec<String>, String)>,
}

impl EcoBook {
    pub fn builtin() -> Self {
        Self::from_lines(BOOK_LINES.iter().map(|(moves, name)| (*moves, *name)))
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut lines: Vec<(Vec<String>, String)> = lines
            .into_iter()
            .map(|(moves, name)| {
                (
                    moves.split_whitespace().map(String::from).collect::<Vec<String>>(),
                    name.to_string(),
                )
            })
            .filter(|(plies, _)| !plies.is_empty())
            .collect();

        // Stable: equal-length duplicates keep table order
        lines.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for EcoBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OpeningNamer for EcoBook {
    fn name_for_sequence(&self, sequence: &str) -> String {
        let plies = sequence_plies(sequence);
        self.lines
            .iter()
            .find(|(book, _)| {
                book.len() <= plies.len() && book.iter().zip(&plies).all(|(a, b)| a.as_str() == *b)
            })
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| UNKNOWN_OPENING.to_string())
    }
}
