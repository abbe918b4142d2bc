//! Conversion of count-bearing prefix stats into report lines.

use std::collections::HashMap;

use chess_core::position::{PositionLookup, STARTING_FEN};
use tracing::warn;

use crate::model::{OpeningLine, PrefixStat};

/// One-decimal percentage of `count` over `total`; 0.0 when `total` is 0.
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((count as f64 / total as f64) * 1000.0).round() / 10.0
}

/// `games × max(win%, loss%) / 100`, rounded to two decimals.
pub fn impact_score(games: u32, wins_percentage: f64, losses_percentage: f64) -> f64 {
    let raw = games as f64 * wins_percentage.max(losses_percentage) / 100.0;
    (raw * 100.0).round() / 100.0
}

/// Formats lines, resolving each distinct sequence's FEN at most once.
pub struct StatsFormatter<'a> {
    positions: &'a dyn PositionLookup,
    fen_cache: HashMap<String, String>,
}

impl<'a> StatsFormatter<'a> {
    pub fn new(positions: &'a dyn PositionLookup) -> Self {
        Self {
            positions,
            fen_cache: HashMap::new(),
        }
    }

    /// FEN after `sequence`, or the starting position if it cannot be replayed.
    pub fn fen_for(&mut self, sequence: &str) -> String {
        if let Some(fen) = self.fen_cache.get(sequence) {
            return fen.clone();
        }

        let fen = match self.positions.fen_for_sequence(sequence) {
            Ok(fen) => fen,
            Err(e) => {
                warn!(sequence, "Falling back to starting position: {e}");
                STARTING_FEN.to_string()
            }
        };
        self.fen_cache.insert(sequence.to_string(), fen.clone());
        fen
    }

    /// Number of distinct sequences resolved so far.
    pub fn resolved_positions(&self) -> usize {
        self.fen_cache.len()
    }

    /// Report line for `stat`; `color_total` is the games denominator.
    pub fn line(&mut self, stat: &PrefixStat, color_total: u32) -> OpeningLine {
        OpeningLine {
            name: stat.name.clone(),
            sequence: stat.sequence.clone(),
            games: stat.games,
            games_percentage: percentage(stat.games, color_total),
            wins: stat.wins,
            wins_percentage: percentage(stat.wins, stat.games),
            draws: stat.draws,
            draws_percentage: percentage(stat.draws, stat.games),
            losses: stat.losses,
            losses_percentage: percentage(stat.losses, stat.games),
            fen: self.fen_for(&stat.sequence),
            color: stat.color,
            score: None,
            impact: None,
        }
    }

    /// Like [`line`](Self::line), with the impact score filled in.
    pub fn scored_line(&mut self, stat: &PrefixStat, color_total: u32) -> OpeningLine {
        let mut line = self.line(stat, color_total);
        line.score = Some(impact_score(line.games, line.wins_percentage, line.losses_percentage));
        line
    }
}
