//! Value types flowing through the opening statistics pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Report order: white lines precede black lines wherever colours are merged.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game outcome from the analysed player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}

/// Running counts for one move prefix within a (colour, depth) bucket.
///
/// `wins + draws + losses == games` holds after every update, and a stat only
/// exists once at least one game has been recorded into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixStat {
    pub sequence: String,
    pub depth: usize,
    pub color: Color,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Most frequent entry of `name_votes`, lexicographically first on a tie.
    pub name: String,
    /// Games per proposed name. Always sums to `games`.
    pub name_votes: BTreeMap<String, u32>,
}

impl PrefixStat {
    pub fn new(sequence: String, depth: usize, color: Color, name: String, result: GameResult) -> Self {
        let mut stat = Self {
            sequence,
            depth,
            color,
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            name: String::new(),
            name_votes: BTreeMap::new(),
        };
        stat.record(result, &name);
        stat
    }

    /// Count one game and the name it proposes for this prefix.
    pub fn record(&mut self, result: GameResult, name: &str) {
        self.games += 1;
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }
        *self.name_votes.entry(name.to_string()).or_default() += 1;
        self.elect_name();
    }

    /// Fold in counts for the same prefix. Commutative.
    pub fn absorb(&mut self, other: &PrefixStat) {
        self.games += other.games;
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        for (name, votes) in &other.name_votes {
            *self.name_votes.entry(name.clone()).or_default() += votes;
        }
        self.elect_name();
    }

    pub fn share(&self, total: u32) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.games as f64 / total as f64
        }
    }

    fn elect_name(&mut self) {
        // BTreeMap order: first maximum is the lexicographically smallest name
        let mut best: Option<(&String, u32)> = None;
        for (name, &votes) in &self.name_votes {
            if best.map_or(true, |(_, top)| votes > top) {
                best = Some((name, votes));
            }
        }
        if let Some((name, _)) = best {
            self.name = name.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningLine {
    pub name: String,
    pub sequence: String,
    pub games: u32,
    pub games_percentage: f64,
    pub wins: u32,
    pub wins_percentage: f64,
    pub draws: u32,
    pub draws_percentage: f64,
    pub losses: u32,
    pub losses_percentage: f64,
    pub fen: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<usize>,
}

/// A root line with its deeper continuations, all percentages against `total_games`
/// (the root colour's game count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTable {
    pub root_line: OpeningLine,
    pub child_lines: Vec<OpeningLine>,
    pub total_games: u32,
}
