//! Frame-sequence construction by replaying a game's main line

use shakmaty::{san::San, Chess, Position};

use crate::board::Snapshot;
use crate::error::{Error, Result};
use crate::parser::GameRecord;

/// Replays `game`'s moves from the standard starting position and captures
/// a snapshot after every ply.
///
/// The sequence holds exactly one snapshot per move, in play order. Any move
/// that fails to parse or is illegal in its position aborts the whole
/// sequence.
pub fn frame_sequence(game: &GameRecord) -> Result<Vec<Snapshot>> {
    let mut position = Chess::default();
    let mut frames = Vec::with_capacity(game.moves.len());

    for (index, san_str) in game.moves.iter().enumerate() {
        let ply = index + 1;
        let illegal = || Error::IllegalMove {
            san: san_str.clone(),
            ply,
        };

        let san: San = san_str.parse().map_err(|_| illegal())?;
        let mv = san.to_move(&position).map_err(|_| illegal())?;
        position = position.play(mv).map_err(|_| illegal())?;

        frames.push(Snapshot::from_position(&position)?);
    }

    Ok(frames)
}
