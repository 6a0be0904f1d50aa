//! PGN file parsing functionality

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::ops::ControlFlow;
use std::path::Path;

use crate::error::{Error, Result};

/// Header metadata plus the main-line moves of one parsed game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRecord {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub moves: Vec<String>,
}

impl GameRecord {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn summary(&self) -> String {
        let white = self.white.as_deref().unwrap_or("Unknown");
        let black = self.black.as_deref().unwrap_or("Unknown");
        let result = self.result.as_deref().unwrap_or("*");
        format!("{} vs {} - {}", white, black, result)
    }
}

#[derive(Default)]
struct GameTags {
    event: Option<String>,
    site: Option<String>,
    date: Option<String>,
    white: Option<String>,
    black: Option<String>,
    result: Option<String>,
}

struct GameMoves {
    tags: GameTags,
    moves: Vec<String>,
}

struct GameParser;

impl Visitor for GameParser {
    type Tags = GameTags;
    type Movetext = GameMoves;
    type Output = GameRecord;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let name_str = String::from_utf8_lossy(name);
        let value_str = value.decode_utf8_lossy().to_string();

        match name_str.as_ref() {
            "Event" => tags.event = Some(value_str),
            "Site" => tags.site = Some(value_str),
            "Date" => tags.date = Some(value_str),
            "White" => tags.white = Some(value_str),
            "Black" => tags.black = Some(value_str),
            "Result" => tags.result = Some(value_str),
            _ => {}
        }

        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(GameMoves {
            tags,
            moves: Vec::new(),
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        movetext.moves.push(san.san.to_string());
        ControlFlow::Continue(())
    }

    fn begin_variation(
        &mut self,
        _movetext: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        // Only the main line is replayed.
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        let tags = movetext.tags;
        GameRecord {
            event: tags.event,
            site: tags.site,
            date: tags.date,
            white: tags.white,
            black: tags.black,
            result: tags.result,
            moves: movetext.moves,
        }
    }
}

pub fn parse_pgn_file<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let contents = fs::read_to_string(path)?;
    parse_pgn_string(&contents)
}

pub fn parse_pgn_string(pgn: &str) -> Result<Vec<GameRecord>> {
    let mut parser = GameParser;
    let mut games: Vec<GameRecord> = Vec::new();

    let cursor = Cursor::new(pgn.as_bytes());
    let mut reader = pgn_reader::Reader::new(cursor);

    loop {
        match reader.read_game(&mut parser) {
            Ok(Some(game)) => games.push(game),
            Ok(None) => break,
            Err(e) => return Err(Error::Pgn(e.to_string())),
        }
    }

    if games.is_empty() {
        Err(Error::NoGamesFound)
    } else {
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PGN: &str = r#"[Event "Test"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0
"#;

    #[test]
    fn test_parse_pgn_string() {
        let games = parse_pgn_string(SAMPLE_PGN).unwrap();
        assert_eq!(games.len(), 1);

        let game = &games[0];
        assert_eq!(game.event.as_deref(), Some("Test"));
        assert_eq!(game.white.as_deref(), Some("Alice"));
        assert_eq!(game.black.as_deref(), Some("Bob"));
        assert_eq!(game.result.as_deref(), Some("1-0"));
        assert_eq!(game.move_count(), 5);
        assert_eq!(game.moves[0], "e4");
        assert_eq!(game.moves[4], "Bb5");
    }

    #[test]
    fn test_game_summary() {
        let games = parse_pgn_string(SAMPLE_PGN).unwrap();
        assert_eq!(games[0].summary(), "Alice vs Bob - 1-0");
    }

    #[test]
    fn test_variations_are_skipped() {
        let pgn = r#"[Event "Variation Test"]

1. e4 (1. d4 d5) e5 2. Nf3 *
"#;
        let games = parse_pgn_string(pgn).unwrap();
        assert_eq!(games[0].moves, vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_multiple_games() {
        let pgn = r#"[Event "First"]

1. e4 *

[Event "Second"]

1. d4 d5 *
"#;
        let games = parse_pgn_string(pgn).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].event.as_deref(), Some("First"));
        assert_eq!(games[1].move_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_pgn_string(""), Err(Error::NoGamesFound)));
    }
}
