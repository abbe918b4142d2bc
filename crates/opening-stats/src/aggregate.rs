//! Flattening of per-depth prefix tables into one filtered map per colour.

use std::collections::BTreeMap;

use tracing::debug;

use crate::extract::DepthTables;
use crate::model::{Color, PrefixStat};

/// Every prefix of one colour that cleared the minimum-games floor.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedOpenings {
    pub color: Color,
    /// Denominator for every share and games percentage of this colour
    pub total_games: u32,
    pub stats: BTreeMap<String, PrefixStat>,
}

impl AggregatedOpenings {
    pub fn empty(color: Color) -> Self {
        Self {
            color,
            total_games: 0,
            stats: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, sequence: &str) -> Option<&PrefixStat> {
        self.stats.get(sequence)
    }

    /// Prefixes sampled at exactly `depth` plies.
    pub fn at_depth(&self, depth: usize) -> impl Iterator<Item = &PrefixStat> {
        self.stats.values().filter(move |s| s.depth == depth)
    }
}

/// Union of all depth tables, keeping prefixes with at least `min_games` games.
///
/// Sequences of different depths never collide (their ply counts differ), so
/// no depth takes priority over another here.
pub fn aggregate(tables: &DepthTables, min_games: u32) -> AggregatedOpenings {
    let stats: BTreeMap<String, PrefixStat> = tables
        .tables
        .values()
        .flat_map(|table| table.values())
        .filter(|stat| stat.games >= min_games)
        .map(|stat| (stat.sequence.clone(), stat.clone()))
        .collect();

    debug!(
        color = %tables.color,
        kept = stats.len(),
        sampled = tables.prefix_count(),
        min_games,
        "Aggregated opening prefixes"
    );

    AggregatedOpenings {
        color: tables.color,
        total_games: tables.total_games,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::SequenceExtractor;
    use crate::game::Game;
    use crate::model::GameResult;
    use chess_core::openings::EcoBook;

    #[test]
    fn test_filters_below_floor() {
        let book = EcoBook::builtin();
        let extractor = SequenceExtractor::new(&[2, 3, 4], &book);
        let games = vec![
            Game::new("1. e4 e5 2. Nf3 Nc6", Color::Black, GameResult::Win),
            Game::new("1. e4 e5 2. Nf3 Nf6", Color::Black, GameResult::Loss),
            Game::new("1. e4 e5 2. Bc4 Nf6", Color::Black, GameResult::Draw),
        ];
        let tables = extractor.extract(Color::Black, &games);

        let agg = aggregate(&tables, 2);
        assert_eq!(agg.total_games, 3);
        let keys: Vec<&str> = agg.stats.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1.e4 e5", "1.e4 e5 2.Nf3"]);
        assert_eq!(agg.at_depth(2).count(), 1);

        let strict = aggregate(&tables, 3);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict.get("1.e4 e5").map(|s| s.games), Some(3));
    }

    #[test]
    fn test_empty_tables() {
        let agg = aggregate(&DepthTables::new(Color::White, &[2, 3]), 3);
        assert!(agg.is_empty());
        assert_eq!(agg.total_games, 0);
    }
}
