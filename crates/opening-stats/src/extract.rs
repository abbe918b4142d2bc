//! Move-prefix extraction: every game contributes its first `d` plies at each
//! sampled depth `d` to a per-depth table of running counts.

use std::collections::BTreeMap;

use chess_core::notation::format_sequence;
use chess_core::openings::OpeningNamer;
use chess_core::pgn::clean_move_sequence;
use tracing::{debug, warn};

use crate::error::GameError;
use crate::game::Game;
use crate::model::{Color, PrefixStat};

/// Canonical sequence -> stats, for one depth and colour.
pub type PrefixTable = BTreeMap<String, PrefixStat>;

/// Per-depth prefix tables for one colour.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthTables {
    pub color: Color,
    /// Games that contributed (malformed games excluded)
    pub total_games: u32,
    pub skipped_games: u32,
    pub tables: BTreeMap<usize, PrefixTable>,
}

impl DepthTables {
    pub fn new(color: Color, depths: &[usize]) -> Self {
        Self {
            color,
            total_games: 0,
            skipped_games: 0,
            tables: depths.iter().map(|&d| (d, PrefixTable::new())).collect(),
        }
    }

    pub fn table(&self, depth: usize) -> Option<&PrefixTable> {
        self.tables.get(&depth)
    }

    pub fn prefix_count(&self) -> usize {
        self.tables.values().map(|t| t.len()).sum()
    }

    /// Fold another shard of the same colour into this one.
    ///
    /// Counts and name votes add, so shards can be merged in any grouping.
    pub fn merge(&mut self, other: DepthTables) {
        debug_assert_eq!(self.color, other.color);
        self.total_games += other.total_games;
        self.skipped_games += other.skipped_games;

        for (depth, table) in other.tables {
            let ours = self.tables.entry(depth).or_default();
            for (sequence, stat) in table {
                match ours.get_mut(&sequence) {
                    Some(existing) => existing.absorb(&stat),
                    None => {
                        ours.insert(sequence, stat);
                    }
                }
            }
        }
    }
}

/// Builds [`DepthTables`] from games of a single colour.
pub struct SequenceExtractor<'a> {
    depths: Vec<usize>,
    namer: &'a dyn OpeningNamer,
}

impl<'a> SequenceExtractor<'a> {
    pub fn new(depths: &[usize], namer: &'a dyn OpeningNamer) -> Self {
        let mut depths = depths.to_vec();
        depths.sort_unstable();
        depths.dedup();
        Self { depths, namer }
    }

    /// Scan `games`, all of which must belong to `color`.
    pub fn extract<'g>(&self, color: Color, games: impl IntoIterator<Item = &'g Game>) -> DepthTables {
        let mut tables = DepthTables::new(color, &self.depths);

        for game in games {
            debug_assert_eq!(game.player_color, color);
            match self.record_game(&mut tables, game) {
                Ok(()) => tables.total_games += 1,
                Err(e) => {
                    tables.skipped_games += 1;
                    warn!(color = %color, "Skipping game during extraction: {e}");
                }
            }
        }

        debug!(
            color = %color,
            games = tables.total_games,
            skipped = tables.skipped_games,
            prefixes = tables.prefix_count(),
            "Extracted opening prefixes"
        );
        tables
    }

    fn record_game(&self, tables: &mut DepthTables, game: &Game) -> Result<(), GameError> {
        let cleaned = clean_move_sequence(&game.move_text);
        let plies: Vec<&str> = cleaned.split_whitespace().collect();
        if plies.is_empty() {
            return Err(GameError::EmptyMoves);
        }

        // Descriptive only: never part of the key
        let header_name = game.header_opening();
        let color = tables.color;

        for &depth in &self.depths {
            if plies.len() < depth {
                break;
            }

            let sequence = format_sequence(&plies[..depth]);
            let name = header_name
                .clone()
                .unwrap_or_else(|| self.namer.name_for_sequence(&sequence));
            let table = tables.tables.entry(depth).or_default();
            match table.get_mut(&sequence) {
                Some(stat) => stat.record(game.result, &name),
                None => {
                    table.insert(
                        sequence.clone(),
                        PrefixStat::new(sequence, depth, color, name, game.result),
                    );
                }
            }
        }

        Ok(())
    }
}
