// End-to-end checks: a converted game reloads as the boards it described.

use std::fs;
use std::path::PathBuf;

use chess_reel_core::board::Cell;
use chess_reel_core::{frame_sequence, naming, parser, read_frames, write_frames, Snapshot};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chess-reel-e2e-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn single_move_game_reloads_as_starting_position_with_one_piece_displaced() {
    let pgn = r#"[Event "Round Trip"]

1. e4 *
"#;
    let game = parser::parse_pgn_string(pgn)
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
    let frames = frame_sequence(&game).unwrap();
    assert_eq!(frames.len(), 1);

    let dir = temp_dir("single");
    let file_name = naming::frames_file_name(game.event.as_deref().unwrap(), "input", 1);
    assert_eq!(file_name, "Round_Trip_input_Match1_moves.json");

    let path = dir.join(file_name);
    write_frames(&path, &frames).unwrap();
    let reloaded = read_frames(&path).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(reloaded.len(), 1);
    let board = &reloaded[0];
    let start = Snapshot::starting();

    // Same piece counts, exactly two squares changed: the vacated source
    // and the occupied destination.
    assert_eq!(board.piece_count(), start.piece_count());

    let mut changed = Vec::new();
    for rank in 0..8 {
        for file in 0..8 {
            if board.get(rank, file) != start.get(rank, file) {
                changed.push((rank, file));
            }
        }
    }
    assert_eq!(changed, vec![(4, 4), (6, 4)]);
    assert_eq!(board.get(6, 4), Cell::Empty);
    assert_eq!(board.get(4, 4), start.get(6, 4));
}

#[test]
fn full_game_round_trips_through_the_frame_file() {
    let pgn = r#"[Event "Scholars Mate"]

1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0
"#;
    let game = parser::parse_pgn_string(pgn)
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
    let frames = frame_sequence(&game).unwrap();
    assert_eq!(frames.len(), 7);

    let dir = temp_dir("full");
    let path = dir.join(naming::frames_file_name("Scholars Mate", "mate", 1));
    write_frames(&path, &frames).unwrap();
    let reloaded = read_frames(&path).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(reloaded, frames);
    // The mating capture removes one pawn.
    assert_eq!(reloaded.last().unwrap().piece_count(), 31);
}
