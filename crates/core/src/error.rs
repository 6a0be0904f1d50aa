//! Error types for chess-reel-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PGN parsing error: {0}")]
    Pgn(String),

    #[error("no games found in PGN input")]
    NoGamesFound,

    #[error("rank '{rank}' expands to {width} squares, expected 8")]
    MalformedRank { rank: String, width: usize },

    #[error("board description has {0} ranks, expected 8")]
    MalformedBoard(usize),

    #[error("unknown piece symbol '{0}'")]
    UnknownSymbol(char),

    #[error("invalid cell value '{0}'")]
    InvalidCell(String),

    #[error("cannot replay move '{san}' at ply {ply}")]
    IllegalMove { san: String, ply: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
