//! Board snapshots and the compact rank-string decoder

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shakmaty::{fen::Fen, Chess, EnPassantMode};

use crate::error::{Error, Result};

/// Ranks per board (rows of a snapshot, rank 8 first).
pub const RANKS: usize = 8;
/// Files per board (cells of a rank).
pub const FILES: usize = 8;

/// Symbol written for an empty square.
pub const EMPTY_SYMBOL: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase FEN letter for this kind.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// FEN letter, uppercase for White.
    pub fn symbol(&self) -> char {
        match self.side {
            Side::White => self.kind.letter().to_ascii_uppercase(),
            Side::Black => self.kind.letter(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let kind = PieceKind::from_letter(symbol.to_ascii_lowercase())?;
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Piece { side, kind })
    }
}

/// One square of a snapshot. The single-character form used in frame files
/// exists only at the serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Piece(Piece),
}

impl Cell {
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Piece(piece) => piece.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        if symbol == EMPTY_SYMBOL {
            Some(Cell::Empty)
        } else {
            Piece::from_symbol(symbol).map(Cell::Piece)
        }
    }

    pub fn is_piece(&self) -> bool {
        matches!(self, Cell::Piece(_))
    }
}

/// Expands one rank of a board description into exactly 8 cells.
///
/// Digits stand for runs of empty squares, letters for individual pieces.
/// A rank that expands to anything other than 8 squares is malformed.
pub fn decode_rank(rank: &str) -> Result<Vec<Cell>> {
    let mut cells = Vec::with_capacity(FILES);

    for c in rank.chars() {
        match c.to_digit(10) {
            Some(run) => {
                for _ in 0..run {
                    cells.push(Cell::Empty);
                }
            }
            None => {
                let piece = Piece::from_symbol(c).ok_or(Error::UnknownSymbol(c))?;
                cells.push(Cell::Piece(piece));
            }
        }
    }

    if cells.len() != FILES {
        return Err(Error::MalformedRank {
            rank: rank.to_string(),
            width: cells.len(),
        });
    }

    Ok(cells)
}

/// Inverse of [`decode_rank`]: collapses empty runs back into digits.
pub fn encode_rank(cells: &[Cell]) -> String {
    let mut encoded = String::new();
    let mut empty_run = 0usize;

    for cell in cells {
        match cell {
            Cell::Empty => empty_run += 1,
            Cell::Piece(piece) => {
                if empty_run > 0 {
                    encoded.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                encoded.push(piece.symbol());
            }
        }
    }
    if empty_run > 0 {
        encoded.push_str(&empty_run.to_string());
    }

    encoded
}

/// The full state of all 64 squares at one point in a game, rank 8 first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cells: [[Cell; FILES]; RANKS],
}

impl Snapshot {
    /// Decodes a board description in FEN piece-placement form.
    ///
    /// Accepts a full FEN as well; only the first field is read.
    pub fn from_board_fen(fen: &str) -> Result<Self> {
        let board_field = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = board_field.split('/').collect();
        if ranks.len() != RANKS {
            return Err(Error::MalformedBoard(ranks.len()));
        }

        let mut cells = [[Cell::Empty; FILES]; RANKS];
        for (i, rank) in ranks.iter().enumerate() {
            for (j, cell) in decode_rank(rank)?.into_iter().enumerate() {
                cells[i][j] = cell;
            }
        }

        Ok(Snapshot { cells })
    }

    /// Captures a shakmaty position.
    pub fn from_position(position: &Chess) -> Result<Self> {
        let fen = Fen::from_position(position, EnPassantMode::Legal).to_string();
        Self::from_board_fen(&fen)
    }

    /// Rebuilds a snapshot from already-expanded rows of one-character
    /// strings, as stored in frame files.
    pub fn try_from_rows(rows: &[Vec<String>]) -> Result<Self> {
        if rows.len() != RANKS {
            return Err(Error::MalformedBoard(rows.len()));
        }

        let mut cells = [[Cell::Empty; FILES]; RANKS];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != FILES {
                return Err(Error::MalformedRank {
                    rank: row.concat(),
                    width: row.len(),
                });
            }
            for (j, value) in row.iter().enumerate() {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => {
                        cells[i][j] =
                            Cell::from_symbol(symbol).ok_or(Error::UnknownSymbol(symbol))?;
                    }
                    _ => return Err(Error::InvalidCell(value.clone())),
                }
            }
        }

        Ok(Snapshot { cells })
    }

    /// The standard starting position.
    pub fn starting() -> Self {
        use PieceKind::*;

        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut cells = [[Cell::Empty; FILES]; RANKS];
        for (file, kind) in back.into_iter().enumerate() {
            cells[0][file] = Cell::Piece(Piece { side: Side::Black, kind });
            cells[1][file] = Cell::Piece(Piece { side: Side::Black, kind: Pawn });
            cells[6][file] = Cell::Piece(Piece { side: Side::White, kind: Pawn });
            cells[7][file] = Cell::Piece(Piece { side: Side::White, kind });
        }

        Snapshot { cells }
    }

    pub fn rows(&self) -> &[[Cell; FILES]; RANKS] {
        &self.cells
    }

    /// Cell at `rank` (0 = rank 8) and `file` (0 = a-file).
    pub fn get(&self, rank: usize, file: usize) -> Cell {
        self.cells[rank][file]
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_piece()).count()
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut rows = serializer.serialize_seq(Some(RANKS))?;
        for rank in &self.cells {
            let symbols: Vec<String> = rank.iter().map(|c| c.symbol().to_string()).collect();
            rows.serialize_element(&symbols)?;
        }
        rows.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        Snapshot::try_from_rows(&rows).map_err(D::Error::custom)
    }
}
