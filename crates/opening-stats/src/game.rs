//! The canonical game shape consumed by the pipeline, and the adapter that
//! orients parsed PGN games to the analysed player.

use std::collections::BTreeMap;

use chess_core::game_data::GameData;
use chess_core::notation::format_sequence;
use tracing::{debug, warn};

use crate::error::GameError;
use crate::model::{Color, GameResult};

/// One played game, already oriented to the analysed player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Game {
    /// Raw movetext; cleaned by the extractor before prefixes are formed
    pub move_text: String,
    pub player_color: Color,
    pub result: GameResult,
    pub headers: BTreeMap<String, String>,
}

impl Game {
    pub fn new(move_text: impl Into<String>, player_color: Color, result: GameResult) -> Self {
        Self {
            move_text: move_text.into(),
            player_color,
            result,
            headers: BTreeMap::new(),
        }
    }

    /// Build a game from bare SAN plies.
    pub fn from_plies<S: AsRef<str>>(plies: &[S], player_color: Color, result: GameResult) -> Self {
        Self::new(format_sequence(plies), player_color, result)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Orient a parsed game to `username` (case-insensitive).
    pub fn from_game_data(game: &GameData, username: &str) -> Result<Self, GameError> {
        let username_lower = username.to_lowercase();
        let player_color = if game.metadata.white.to_lowercase() == username_lower {
            Color::White
        } else if game.metadata.black.to_lowercase() == username_lower {
            Color::Black
        } else {
            return Err(GameError::PlayerNotInGame(username.to_string()));
        };

        let result = match (game.metadata.result.as_str(), player_color) {
            ("1-0", Color::White) | ("0-1", Color::Black) => GameResult::Win,
            ("0-1", Color::White) | ("1-0", Color::Black) => GameResult::Loss,
            ("1/2-1/2", _) => GameResult::Draw,
            (other, _) => return Err(GameError::Unfinished(other.to_string())),
        };

        if game.moves.is_empty() {
            return Err(GameError::EmptyMoves);
        }

        Ok(Self {
            move_text: format_sequence(&game.moves),
            player_color,
            result,
            headers: game.headers.clone(),
        })
    }

    /// Opening name supplied by the source platform, if any.
    ///
    /// Lichess exports carry an `Opening` tag; Chess.com exports carry an
    /// `ECOUrl` whose last path segment is the hyphenated name, sometimes
    /// followed by the moves that reach it.
    pub fn header_opening(&self) -> Option<String> {
        if let Some(name) = self.headers.get("Opening").filter(|n| !n.trim().is_empty()) {
            return Some(name.trim().to_string());
        }

        self.headers
            .get("ECOUrl")
            .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
            .filter(|slug| !slug.contains(':'))
            .map(|slug| {
                // Drop trailing move fragments: "-6.Be3", "-3...c5-4.dxc5", "...4.d3"
                let name = slug.split("...").next().unwrap_or(slug);
                name.split('-')
                    .take_while(|part| !part.starts_with(|c: char| c.is_ascii_digit()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|name| !name.is_empty())
    }
}

/// Adapt a batch of parsed games, skipping the ones that cannot be oriented.
/// Returns the accepted games and the number skipped.
pub fn games_for_player(games: &[GameData], username: &str) -> (Vec<Game>, usize) {
    let mut accepted = Vec::with_capacity(games.len());
    let mut skipped = 0;

    for data in games {
        match Game::from_game_data(data, username) {
            Ok(game) => accepted.push(game),
            Err(e) => {
                skipped += 1;
                match e {
                    GameError::PlayerNotInGame(_) => {
                        debug!(link = ?data.metadata.link, "Skipping game: {e}")
                    }
                    _ => warn!(link = ?data.metadata.link, "Skipping game: {e}"),
                }
            }
        }
    }

    (accepted, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::pgn::parse_pgn;

    fn parsed(white: &str, black: &str, result: &str) -> GameData {
        let pgn = format!(
            "[White \"{white}\"]\n[Black \"{black}\"]\n[Result \"{result}\"]\n\n1. e4 c5 2. Nf3 {result}"
        );
        parse_pgn(&pgn).unwrap()
    }

    #[test]
    fn test_orientation_as_white() {
        let game = Game::from_game_data(&parsed("Alice", "bob", "1-0"), "alice").unwrap();
        assert_eq!(game.player_color, Color::White);
        assert_eq!(game.result, GameResult::Win);
        assert_eq!(game.move_text, "1.e4 c5 2.Nf3");
    }

    #[test]
    fn test_orientation_as_black() {
        let game = Game::from_game_data(&parsed("alice", "Bob", "1-0"), "BOB").unwrap();
        assert_eq!(game.player_color, Color::Black);
        assert_eq!(game.result, GameResult::Loss);

        let draw = Game::from_game_data(&parsed("alice", "bob", "1/2-1/2"), "bob").unwrap();
        assert_eq!(draw.result, GameResult::Draw);
    }

    #[test]
    fn test_rejects_unfinished_and_foreign_games() {
        assert_eq!(
            Game::from_game_data(&parsed("alice", "bob", "*"), "alice"),
            Err(GameError::Unfinished("*".into()))
        );
        assert!(matches!(
            Game::from_game_data(&parsed("alice", "bob", "1-0"), "carol"),
            Err(GameError::PlayerNotInGame(_))
        ));
    }

    #[test]
    fn test_games_for_player_counts_skips() {
        let games = vec![
            parsed("alice", "bob", "1-0"),
            parsed("carol", "bob", "0-1"),
            parsed("bob", "alice", "*"),
        ];
        let (accepted, skipped) = games_for_player(&games, "alice");
        assert_eq!(accepted.len(), 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_header_opening_sources() {
        let lichess = Game::new("1.e4", Color::White, GameResult::Win)
            .with_header("Opening", "Sicilian Defense: Najdorf Variation");
        assert_eq!(
            lichess.header_opening().as_deref(),
            Some("Sicilian Defense: Najdorf Variation")
        );

        let chess_com = Game::new("1.e4", Color::White, GameResult::Win).with_header(
            "ECOUrl",
            "https://www.chess.com/openings/Caro-Kann-Defense-Advance-Variation",
        );
        assert_eq!(
            chess_com.header_opening().as_deref(),
            Some("Caro Kann Defense Advance Variation")
        );

        assert_eq!(Game::new("1.e4", Color::White, GameResult::Win).header_opening(), None);
    }

    #[test]
    fn test_eco_url_move_suffix_trimmed() {
        let named = |url: &str| {
            Game::new("1.e4", Color::White, GameResult::Win)
                .with_header("ECOUrl", url)
                .header_opening()
        };
        assert_eq!(
            named("https://www.chess.com/openings/Caro-Kann-Defense-Advance-Variation-3...c5-4.dxc5")
                .as_deref(),
            Some("Caro Kann Defense Advance Variation")
        );
        assert_eq!(
            named("https://www.chess.com/openings/Sicilian-Defense-Najdorf-Variation-6.Be3").as_deref(),
            Some("Sicilian Defense Najdorf Variation")
        );
        assert_eq!(
            named("https://www.chess.com/openings/Bishops-Opening...4.d3").as_deref(),
            Some("Bishops Opening")
        );
        assert_eq!(named("https://www.chess.com/openings/1.e4"), None);
    }
}
