//! Root/child summary tables: the at-a-glance opening report.

use std::cmp::Ordering;

use chess_core::notation::is_strict_prefix;
use tracing::debug;

use crate::aggregate::AggregatedOpenings;
use crate::config::ReportConfig;
use crate::format::StatsFormatter;
use crate::model::{PrefixStat, SummaryTable};

/// A root prefix with its selected children, before formatting.
#[derive(Debug, Clone)]
pub struct RootCandidate<'s> {
    pub root: &'s PrefixStat,
    pub children: Vec<&'s PrefixStat>,
    pub color_total: u32,
}

impl RootCandidate<'_> {
    pub fn share(&self) -> f64 {
        self.root.share(self.color_total)
    }
}

pub struct SummaryTableBuilder<'a> {
    config: &'a ReportConfig,
}

impl<'a> SummaryTableBuilder<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Root-depth prefixes holding at least the root share of the colour's
    /// games, most played first.
    pub fn roots<'s>(&self, openings: &'s AggregatedOpenings) -> Vec<&'s PrefixStat> {
        let total = openings.total_games;
        let mut roots: Vec<&PrefixStat> = openings
            .at_depth(self.config.root_depth)
            .filter(|s| s.share(total) >= self.config.root_share)
            .collect();

        sort_by_games(&mut roots);
        roots.truncate(self.config.max_roots_per_color);
        roots
    }

    /// Strict continuations of `root` holding at least the child share,
    /// most played first.
    pub fn children<'s>(&self, root: &PrefixStat, openings: &'s AggregatedOpenings) -> Vec<&'s PrefixStat> {
        let total = openings.total_games;
        let mut children: Vec<&PrefixStat> = openings
            .stats
            .values()
            .filter(|s| is_strict_prefix(&root.sequence, &s.sequence))
            .filter(|s| s.share(total) >= self.config.child_share)
            .collect();

        sort_by_games(&mut children);
        children.truncate(self.config.max_children);
        children
    }

    /// Roots of both colours ranked together by share of their own colour's games.
    pub fn candidates<'s>(&self, per_color: &[&'s AggregatedOpenings]) -> Vec<RootCandidate<'s>> {
        let mut candidates: Vec<RootCandidate<'s>> = per_color
            .iter()
            .copied()
            .flat_map(|openings| {
                self.roots(openings).into_iter().map(move |root| RootCandidate {
                    root,
                    children: self.children(root, openings),
                    color_total: openings.total_games,
                })
            })
            .collect();

        // Stable: equal shares keep colour order
        candidates.sort_by(|a, b| b.share().partial_cmp(&a.share()).unwrap_or(Ordering::Equal));
        candidates.truncate(self.config.max_tables);
        candidates
    }

    pub fn build(
        &self,
        white: &AggregatedOpenings,
        black: &AggregatedOpenings,
        formatter: &mut StatsFormatter<'_>,
    ) -> Vec<SummaryTable> {
        let tables: Vec<SummaryTable> = self
            .candidates(&[white, black])
            .into_iter()
            .map(|candidate| SummaryTable {
                root_line: formatter.line(candidate.root, candidate.color_total),
                child_lines: candidate
                    .children
                    .iter()
                    .map(|child| formatter.line(child, candidate.color_total))
                    .collect(),
                total_games: candidate.color_total,
            })
            .collect();

        debug!(tables = tables.len(), "Built summary tables");
        tables
    }
}

fn sort_by_games(stats: &mut [&PrefixStat]) {
    stats.sort_by(|a, b| {
        b.games
            .cmp(&a.games)
            .then_with(|| a.depth.cmp(&b.depth))
            .then_with(|| a.sequence.cmp(&b.sequence))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;
    use chess_core::error::PositionError;
    use chess_core::notation::sequence_plies;
    use chess_core::position::PositionLookup;

    struct NoPositions;

    impl PositionLookup for NoPositions {
        fn fen_for_sequence(&self, _sequence: &str) -> Result<String, PositionError> {
            Ok(String::new())
        }
    }

    fn stat(sequence: &str, color: Color, games: u32) -> PrefixStat {
        PrefixStat {
            sequence: sequence.to_string(),
            depth: sequence_plies(sequence).len(),
            color,
            games,
            wins: games,
            draws: 0,
            losses: 0,
            name: String::new(),
            name_votes: Default::default(),
        }
    }

    fn openings(color: Color, total: u32, stats: Vec<PrefixStat>) -> AggregatedOpenings {
        AggregatedOpenings {
            color,
            total_games: total,
            stats: stats.into_iter().map(|s| (s.sequence.clone(), s)).collect(),
        }
    }

    #[test]
    fn test_root_share_floor() {
        let config = ReportConfig::default();
        let builder = SummaryTableBuilder::new(&config);
        let white = openings(
            Color::White,
            100,
            vec![
                stat("1.e4 e5", Color::White, 40),
                stat("1.d4 d5", Color::White, 5),
                stat("1.c4 c5", Color::White, 4),
                stat("1.e4 e5 2.Nf3", Color::White, 30),
            ],
        );
        let roots: Vec<&str> = builder.roots(&white).iter().map(|s| s.sequence.as_str()).collect();
        assert_eq!(roots, vec!["1.e4 e5", "1.d4 d5"]);
    }

    #[test]
    fn test_children_are_strict_extensions_above_floor() {
        let config = ReportConfig::default();
        let builder = SummaryTableBuilder::new(&config);
        let white = openings(
            Color::White,
            100,
            vec![
                stat("1.e4 e5", Color::White, 40),
                stat("1.e4 e5 2.Nf3", Color::White, 30),
                stat("1.e4 e5 2.Nf3 Nc6", Color::White, 25),
                stat("1.e4 e5 2.Bc4", Color::White, 2),
                stat("1.e4 e5 2.f4", Color::White, 1),
                stat("1.e4 c5 2.Nf3", Color::White, 20),
            ],
        );
        let root = white.get("1.e4 e5").unwrap();
        let children: Vec<&str> = builder
            .children(root, &white)
            .iter()
            .map(|s| s.sequence.as_str())
            .collect();
        assert_eq!(children, vec!["1.e4 e5 2.Nf3", "1.e4 e5 2.Nf3 Nc6", "1.e4 e5 2.Bc4"]);
    }

    #[test]
    fn test_children_capped() {
        let config = ReportConfig {
            max_children: 1,
            ..ReportConfig::default()
        };
        let builder = SummaryTableBuilder::new(&config);
        let black = openings(
            Color::Black,
            10,
            vec![
                stat("1.d4 Nf6", Color::Black, 8),
                stat("1.d4 Nf6 2.c4", Color::Black, 5),
                stat("1.d4 Nf6 2.Nf3", Color::Black, 3),
            ],
        );
        let root = black.get("1.d4 Nf6").unwrap();
        assert_eq!(builder.children(root, &black).len(), 1);
    }

    #[test]
    fn test_cross_color_ranking_by_share() {
        let config = ReportConfig::default();
        let builder = SummaryTableBuilder::new(&config);
        // White: 30 of 100 games; black: 20 of 40 games
        let white = openings(Color::White, 100, vec![stat("1.e4 e5", Color::White, 30)]);
        let black = openings(Color::Black, 40, vec![stat("1.d4 d5", Color::Black, 20)]);

        let mut formatter = StatsFormatter::new(&NoPositions);
        let tables = builder.build(&white, &black, &mut formatter);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].root_line.sequence, "1.d4 d5");
        assert_eq!(tables[0].total_games, 40);
        assert_eq!(tables[0].root_line.games_percentage, 50.0);
        assert_eq!(tables[1].root_line.color, Color::White);
        assert_eq!(tables[1].total_games, 100);
        assert!(tables[1].child_lines.is_empty());
        assert!(tables[1].root_line.score.is_none());
    }

    #[test]
    fn test_equal_share_keeps_white_first() {
        let config = ReportConfig::default();
        let builder = SummaryTableBuilder::new(&config);
        let white = openings(Color::White, 10, vec![stat("1.e4 e5", Color::White, 5)]);
        let black = openings(Color::Black, 20, vec![stat("1.e4 c5", Color::Black, 10)]);
        let candidates = builder.candidates(&[&white, &black]);
        assert_eq!(candidates[0].root.color, Color::White);
        assert_eq!(candidates[1].root.color, Color::Black);
    }

    #[test]
    fn test_table_limit_and_no_padding() {
        let config = ReportConfig {
            max_tables: 1,
            ..ReportConfig::default()
        };
        let builder = SummaryTableBuilder::new(&config);
        let white = openings(
            Color::White,
            10,
            vec![stat("1.e4 e5", Color::White, 5), stat("1.d4 d5", Color::White, 4)],
        );
        let black = AggregatedOpenings::empty(Color::Black);
        let mut formatter = StatsFormatter::new(&NoPositions);
        assert_eq!(builder.build(&white, &black, &mut formatter).len(), 1);

        let none = builder.build(
            &AggregatedOpenings::empty(Color::White),
            &black,
            &mut formatter,
        );
        assert!(none.is_empty());
    }
}
