#![allow(dead_code)]

use chess_core::openings::EcoBook;
use chess_core::position::ShakmatyPositions;
use opening_stats::{build_report, Color, Game, GameResult, OpeningReport, ReportConfig};

/// Legal ten-ply lines sharing early prefixes.
pub const LINES: &[&str] = &[
    "e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6",
    "e4 c5 Nf3 Nc6 d4 cxd4 Nxd4 Nf6 Nc3 e5",
    "e4 c5 Nc3 Nc6 g3 g6 Bg2 Bg7 d3 d6",
    "e4 e5 Nf3 Nc6 Bb5 a6 Ba4 Nf6 O-O Be7",
    "e4 e5 Nf3 Nc6 Bc4 Bc5 c3 Nf6 d3 d6",
    "d4 d5 c4 e6 Nc3 Nf6 Bg5 Be7 e3 O-O",
    "d4 Nf6 c4 g6 Nc3 Bg7 e4 d6 Nf3 O-O",
    "e4 e6 d4 d5 e5 c5 c3 Nc6 Nf3 Qb6",
    "c4 e5 Nc3 Nf6 g3 d5 cxd5 Nxd5 Bg2 Nb6",
];

/// Deterministic pseudo-random source for generated game sets.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

pub fn game(plies: &str, color: Color, result: GameResult) -> Game {
    let plies: Vec<&str> = plies.split_whitespace().collect();
    Game::from_plies(&plies, color, result)
}

/// `count` games drawn from [`LINES`], truncated to 2..=10 plies.
pub fn generated_games(seed: u64, count: usize) -> Vec<Game> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let line: Vec<&str> = LINES[rng.below(LINES.len() as u64) as usize]
                .split_whitespace()
                .collect();
            let len = 2 + rng.below(9) as usize;
            let color = if rng.below(10) < 6 { Color::White } else { Color::Black };
            let result = match rng.below(3) {
                0 => GameResult::Win,
                1 => GameResult::Draw,
                _ => GameResult::Loss,
            };
            Game::from_plies(&line[..len.min(line.len())], color, result)
        })
        .collect()
}

pub fn report(games: &[Game]) -> OpeningReport {
    report_with(games, &ReportConfig::default())
}

pub fn report_with(games: &[Game], config: &ReportConfig) -> OpeningReport {
    build_report(games, config, &ShakmatyPositions, &EcoBook::builtin())
        .expect("report should build")
}
