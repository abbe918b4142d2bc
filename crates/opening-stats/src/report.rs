//! End-to-end opening report: games in, ranked lines and summary tables out.

use chess_core::openings::OpeningNamer;
use chess_core::position::PositionLookup;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{aggregate, AggregatedOpenings};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::extract::SequenceExtractor;
use crate::format::StatsFormatter;
use crate::game::Game;
use crate::meaningful::MeaningfulLineSelector;
use crate::model::{Color, OpeningLine, SummaryTable};
use crate::summary::SummaryTableBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningReport {
    pub total_games: u32,
    pub white_games: u32,
    pub black_games: u32,
    /// Games dropped because their moves could not be read
    pub skipped_games: u32,
    pub meaningful_white: Vec<OpeningLine>,
    pub meaningful_black: Vec<OpeningLine>,
    pub meaningful_combined: Vec<OpeningLine>,
    pub summary_tables: Vec<SummaryTable>,
}

impl OpeningReport {
    /// True when no line cleared any threshold; callers render a
    /// "not enough data" state.
    pub fn is_empty(&self) -> bool {
        self.summary_tables.is_empty() && self.meaningful_combined.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the whole pipeline over `games`.
///
/// Only an empty slice is an error; malformed games are skipped and thin data
/// yields empty lists.
pub fn build_report(
    games: &[Game],
    config: &ReportConfig,
    positions: &dyn PositionLookup,
    namer: &dyn OpeningNamer,
) -> Result<OpeningReport, ReportError> {
    if games.is_empty() {
        return Err(ReportError::NoGames);
    }
    config.validate()?;

    let extractor = SequenceExtractor::new(&config.depths, namer);
    let mut skipped_games = 0;

    let [white, black]: [AggregatedOpenings; 2] = Color::ALL.map(|color| {
        let tables = extractor.extract(color, games.iter().filter(|g| g.player_color == color));
        skipped_games += tables.skipped_games;
        aggregate(&tables, config.min_sequence_games)
    });

    let mut formatter = StatsFormatter::new(positions);
    let meaningful = MeaningfulLineSelector::new(config).select(&white, &black, &mut formatter);
    let summary_tables = SummaryTableBuilder::new(config).build(&white, &black, &mut formatter);

    let report = OpeningReport {
        total_games: white.total_games + black.total_games,
        white_games: white.total_games,
        black_games: black.total_games,
        skipped_games,
        meaningful_white: meaningful.white,
        meaningful_black: meaningful.black,
        meaningful_combined: meaningful.combined,
        summary_tables,
    };

    info!(
        games = report.total_games,
        skipped = report.skipped_games,
        lines = report.meaningful_combined.len(),
        tables = report.summary_tables.len(),
        positions = formatter.resolved_positions(),
        "Built opening report"
    );
    Ok(report)
}
