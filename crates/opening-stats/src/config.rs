//! Thresholds and limits for opening aggregation, with environment overrides.

use std::env;
use std::str::FromStr;

use tracing::debug;

use crate::error::ReportError;

/// Ply depths at which game prefixes are sampled.
pub const DEFAULT_DEPTHS: [usize; 8] = [2, 3, 4, 5, 6, 7, 8, 10];

/// Prefixes seen in fewer games than this are dropped before ranking.
pub const MIN_SEQUENCE_GAMES: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// Prefix depths in plies
    pub depths: Vec<usize>,

    /// Depth whose prefixes become summary-table roots
    pub root_depth: usize,

    /// Minimum games for a prefix to survive aggregation
    pub min_sequence_games: u32,

    /// Meaningful lines kept per colour and in the combined list
    pub max_meaningful_lines: usize,

    /// Minimum share of the colour's games for a root line
    pub root_share: f64,

    /// Minimum share of the colour's games for a child line
    pub child_share: f64,

    /// Roots considered per colour before the cross-colour ranking
    pub max_roots_per_color: usize,

    /// Children kept under each root
    pub max_children: usize,

    /// Summary tables in the final report
    pub max_tables: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            depths: DEFAULT_DEPTHS.to_vec(),
            root_depth: 2,
            min_sequence_games: MIN_SEQUENCE_GAMES,
            max_meaningful_lines: 20,
            root_share: 0.05,
            child_share: 0.02,
            max_roots_per_color: 10,
            max_children: 5,
            max_tables: 10,
        }
    }
}

impl ReportConfig {
    /// Load configuration from environment variables, defaulting anything
    /// absent or unparsable.
    pub fn from_env() -> Result<Self, ReportError> {
        let defaults = Self::default();

        let depths = env::var("OPENING_DEPTHS")
            .ok()
            .and_then(|v| {
                v.split(',')
                    .map(|d| d.trim().parse::<usize>())
                    .collect::<Result<Vec<_>, _>>()
                    .ok()
            })
            .filter(|d| !d.is_empty())
            .unwrap_or(defaults.depths);

        let config = Self {
            depths,
            root_depth: env_or("OPENING_ROOT_DEPTH", defaults.root_depth),
            min_sequence_games: env_or("OPENING_MIN_SEQUENCE_GAMES", defaults.min_sequence_games),
            max_meaningful_lines: env_or("OPENING_MAX_LINES", defaults.max_meaningful_lines),
            root_share: env_or("OPENING_ROOT_SHARE", defaults.root_share),
            child_share: env_or("OPENING_CHILD_SHARE", defaults.child_share),
            max_roots_per_color: env_or("OPENING_MAX_ROOTS", defaults.max_roots_per_color),
            max_children: env_or("OPENING_MAX_CHILDREN", defaults.max_children),
            max_tables: env_or("OPENING_MAX_TABLES", defaults.max_tables),
        };

        config.validate()?;
        debug!(?config, "Loaded report config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.depths.iter().any(|&d| d == 0) {
            return Err(ReportError::Config("depths must be positive".into()));
        }
        if !self.depths.contains(&self.root_depth) {
            return Err(ReportError::Config(format!(
                "root depth {} is not one of the sampled depths {:?}",
                self.root_depth, self.depths
            )));
        }
        for (name, share) in [("root share", self.root_share), ("child share", self.child_share)] {
            if !(0.0..=1.0).contains(&share) {
                return Err(ReportError::Config(format!("{name} {share} outside 0..=1")));
            }
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
