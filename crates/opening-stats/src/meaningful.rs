//! Selection of deduplicated, impact-ranked opening lines.
//!
//! Candidates are walked deepest first, so once a specific line is accepted its
//! shallower ancestors (whose games it is a subset of) are no longer reported.

use std::cmp::Ordering;

use chess_core::notation::sequence_plies;
use tracing::debug;

use crate::aggregate::AggregatedOpenings;
use crate::config::ReportConfig;
use crate::format::StatsFormatter;
use crate::model::{OpeningLine, PrefixStat};
use crate::trie::PrefixTrie;

/// Meaningful lines per colour and the cross-colour ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeaningfulLines {
    pub white: Vec<OpeningLine>,
    pub black: Vec<OpeningLine>,
    pub combined: Vec<OpeningLine>,
}

pub struct MeaningfulLineSelector<'a> {
    config: &'a ReportConfig,
}

impl<'a> MeaningfulLineSelector<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Accepted prefixes in acceptance order: depth descending, then games
    /// descending, then sequence text. No accepted prefix is a ply-wise prefix
    /// of another.
    pub fn select_prefixes<'s>(&self, openings: &'s AggregatedOpenings) -> Vec<&'s PrefixStat> {
        let mut candidates: Vec<&PrefixStat> = openings.stats.values().collect();
        candidates.sort_by(|a, b| {
            b.depth
                .cmp(&a.depth)
                .then_with(|| b.games.cmp(&a.games))
                .then_with(|| a.sequence.cmp(&b.sequence))
        });

        let mut trie = PrefixTrie::new();
        let mut accepted = Vec::new();

        for stat in candidates {
            if accepted.len() >= self.config.max_meaningful_lines {
                break;
            }
            if trie.try_accept(&sequence_plies(&stat.sequence)) {
                accepted.push(stat);
            }
        }

        accepted
    }

    /// Per-colour meaningful list, ranked by score.
    pub fn lines_for_color(
        &self,
        openings: &AggregatedOpenings,
        formatter: &mut StatsFormatter<'_>,
    ) -> Vec<OpeningLine> {
        let mut lines: Vec<OpeningLine> = self
            .select_prefixes(openings)
            .into_iter()
            .map(|stat| formatter.scored_line(stat, openings.total_games))
            .collect();

        sort_by_score(&mut lines);
        lines.truncate(self.config.max_meaningful_lines);

        debug!(color = %openings.color, lines = lines.len(), "Selected meaningful lines");
        lines
    }

    /// White then black, ranked by score with `impact` = 1-based rank.
    /// Equal scores keep white ahead of black.
    pub fn combine(&self, white: &[OpeningLine], black: &[OpeningLine]) -> Vec<OpeningLine> {
        let mut combined: Vec<OpeningLine> = white.iter().chain(black).cloned().collect();
        sort_by_score(&mut combined);
        combined.truncate(self.config.max_meaningful_lines);

        for (rank, line) in combined.iter_mut().enumerate() {
            line.impact = Some(rank + 1);
        }
        combined
    }

    pub fn select(
        &self,
        white: &AggregatedOpenings,
        black: &AggregatedOpenings,
        formatter: &mut StatsFormatter<'_>,
    ) -> MeaningfulLines {
        let white = self.lines_for_color(white, formatter);
        let black = self.lines_for_color(black, formatter);
        let combined = self.combine(&white, &black);
        MeaningfulLines {
            white,
            black,
            combined,
        }
    }
}

// Stable: ties keep their incoming order.
fn sort_by_score(lines: &mut [OpeningLine]) {
    lines.sort_by(|a, b| {
        let (a, b) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
}
