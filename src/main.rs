use chess_reel_core::{frame_sequence, naming, parser, write_frames, Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    println!("Chess Reel");
    println!("==========");
    println!();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    match args[1].as_str() {
        "extract" => {
            if args.len() < 3 {
                println!("Error: Please provide a PGN directory");
                println!("Usage: {} extract <pgn_dir> [out_dir]", args[0]);
                process::exit(1);
            }
            let out_dir = args.get(3).map(String::as_str).unwrap_or("output_moves");
            extract_games(Path::new(&args[2]), Path::new(out_dir));
        }
        _ => {
            print_usage(&args[0]);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [arguments]", program);
    println!();
    println!("Commands:");
    println!("  extract <pgn_dir> [out_dir]   Convert the first game of each .pgn file into");
    println!("                                a frame file (out_dir defaults to output_moves)");
    println!();
    println!("Examples:");
    println!("  {} extract pgn_games", program);
    println!("  {} extract pgn_games output_moves", program);
}

fn extract_games(pgn_dir: &Path, out_dir: &Path) {
    println!("Reading: {}", pgn_dir.display());
    println!();

    if let Err(e) = fs::create_dir_all(out_dir) {
        println!("[ERROR] Cannot create {}: {}", out_dir.display(), e);
        process::exit(1);
    }

    let pgn_paths = match list_pgn_files(pgn_dir) {
        Ok(paths) => paths,
        Err(e) => {
            println!("[ERROR] {}", e);
            process::exit(1);
        }
    };

    if pgn_paths.is_empty() {
        println!("[WARN] No .pgn files found in {}", pgn_dir.display());
        return;
    }

    println!("[OK] Found {} PGN file(s)", pgn_paths.len());
    println!();

    for path in &pgn_paths {
        match convert_file(path, out_dir) {
            Ok(output) => println!("Saved: {}", output.display()),
            Err(e) => {
                println!("[ERROR] {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    println!();
    println!("[OK] Converted {} game(s)", pgn_paths.len());
}

fn list_pgn_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "pgn"))
        .collect();

    paths.sort();
    Ok(paths)
}

/// Converts the first game of one PGN file into a frame file in `out_dir`.
fn convert_file(path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let game = parser::parse_pgn_file(path)?
        .into_iter()
        .next()
        .ok_or(Error::NoGamesFound)?;
    let frames = frame_sequence(&game)?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("game");
    let event = game.event.as_deref().unwrap_or("UnknownEvent");
    let output = out_dir.join(naming::frames_file_name(event, stem, 1));

    write_frames(&output, &frames)?;
    Ok(output)
}
