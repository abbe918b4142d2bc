//! Build an opening report from PGN exports.
//!
//! Usage: opening-report <username> <pgn_file>... [--pretty]
//!
//! Thresholds come from OPENING_* environment variables (see `ReportConfig`).

use std::env;
use std::fs;

use anyhow::{bail, Context};
use chess_core::openings::EcoBook;
use chess_core::pgn::{parse_pgn, split_games};
use chess_core::position::ShakmatyPositions;
use opening_stats::game::games_for_player;
use opening_stats::{build_report, ReportConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let pretty = args.iter().any(|a| a == "--pretty");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    if positional.len() < 2 {
        eprintln!("Usage: {} <username> <pgn_file>... [--pretty]", args[0]);
        std::process::exit(1);
    }

    let username = positional[0];
    let config = ReportConfig::from_env()?;

    let mut parsed = Vec::new();
    let mut unreadable = 0usize;

    for path in &positional[1..] {
        let text = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
        let chunks = split_games(&text);
        tracing::info!("Read {} games from {}", chunks.len(), path);

        for chunk in chunks {
            match parse_pgn(chunk) {
                Ok(game) => parsed.push(game),
                Err(e) => {
                    unreadable += 1;
                    tracing::warn!("Skipping unreadable game in {path}: {e}");
                }
            }
        }
    }

    let (games, foreign) = games_for_player(&parsed, username);
    tracing::info!(
        "{} games for {} ({} unreadable, {} skipped)",
        games.len(),
        username,
        unreadable,
        foreign
    );

    if games.is_empty() {
        bail!("No games found for {username}");
    }

    let report = build_report(&games, &config, &ShakmatyPositions, &EcoBook::builtin())?;
    if report.is_empty() {
        tracing::info!("Not enough data for opening statistics");
    }

    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{json}");

    Ok(())
}
