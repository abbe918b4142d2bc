//! Opening statistics for a player's game history.
//!
//! Games are sampled into move prefixes at fixed ply depths, aggregated per
//! colour, and reported two ways: a deduplicated list of the most impactful
//! lines, and root/child summary tables of the most played openings.
//! The main entry point is [`report::build_report`].

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod game;
pub mod meaningful;
pub mod model;
pub mod report;
pub mod summary;
pub mod trie;

pub use config::ReportConfig;
pub use error::{GameError, ReportError};
pub use game::Game;
pub use model::{Color, GameResult, OpeningLine, PrefixStat, SummaryTable};
pub use report::{build_report, OpeningReport};
