//! Lightweight regex-based PGN parsing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PgnError;
use crate::game_data::{GameData, GameMetadata};

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).expect("header regex"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}|;[^\n]*").expect("comment regex"));
// Innermost variation only; nested ones are peeled by repeated passes.
static VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("variation regex"));
static NAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\d+").expect("nag regex"));
static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|(?:O-O-O|0-0-0)[+#]?|(?:O-O|0-0)[+#]?")
        .expect("move regex")
});

/// Parse a single-game PGN string into a GameData struct.
pub fn parse_pgn(pgn: &str) -> Result<GameData, PgnError> {
    let mut headers = BTreeMap::new();
    for cap in HEADER_RE.captures_iter(pgn) {
        headers.insert(cap[1].to_string(), cap[2].to_string());
    }

    let header = |key: &str| headers.get(key).cloned();

    // Filter non-standard positions
    if header("SetUp").as_deref() == Some("1") {
        if let Some(fen) = header("FEN") {
            if fen != STANDARD_START_FEN {
                return Err(PgnError::NonStandardStart(fen));
            }
        }
    }

    let metadata = GameMetadata {
        white: header("White").unwrap_or_else(|| "Unknown".to_string()),
        black: header("Black").unwrap_or_else(|| "Unknown".to_string()),
        result: header("Result").unwrap_or_else(|| "*".to_string()),
        link: header("Link").or_else(|| header("Site")),
    };

    let moves = extract_moves(pgn);
    if moves.is_empty() {
        return Err(PgnError::NoMoves);
    }

    Ok(GameData {
        metadata,
        headers,
        moves,
    })
}

/// Split a multi-game PGN export into single-game chunks.
/// A new game starts at the first header tag following movetext.
pub fn split_games(text: &str) -> Vec<&str> {
    let mut games = Vec::new();
    let mut start: Option<usize> = None;
    let mut seen_movetext = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            if seen_movetext {
                if let Some(s) = start {
                    games.push(text[s..offset].trim());
                }
                start = None;
                seen_movetext = false;
            }
            start.get_or_insert(offset);
        } else if !trimmed.is_empty() {
            start.get_or_insert(offset);
            seen_movetext = true;
        }
        offset += line.len();
    }

    if let Some(s) = start {
        let last = text[s..].trim();
        if !last.is_empty() {
            games.push(last);
        }
    }
    games
}

/// Strip headers, comments (clock annotations included), variations, NAGs,
/// glyphs, move numbers and result tokens, leaving the SAN plies separated by
/// single spaces.
pub fn clean_move_sequence(raw: &str) -> String {
    extract_moves(raw).join(" ")
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
fn extract_moves(pgn: &str) -> Vec<String> {
    // Remove headers
    let no_headers = HEADER_RE.replace_all(pgn, " ");

    // Remove comments ([%clk ...] annotations live inside them)
    let no_comments = COMMENT_RE.replace_all(&no_headers, " ");

    // Remove variations
    let mut text = no_comments.into_owned();
    while VARIATION_RE.is_match(&text) {
        text = VARIATION_RE.replace_all(&text, " ").into_owned();
    }
    let text = NAG_RE.replace_all(&text, " ");

    MOVE_RE
        .find_iter(&text)
        .map(|m| match m.as_str() {
            // Zero-digit castling from some exporters
            san if san.starts_with('0') => san.replace('0', "O"),
            san => san.to_string(),
        })
        .collect()
}
