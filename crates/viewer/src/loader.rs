//! Loads previously extracted frame files from a directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use chess_reel_core::naming::FRAMES_SUFFIX;
use chess_reel_core::{read_frames, Snapshot};

/// One animatable game: a display name and its per-ply snapshots.
pub struct LoadedGame {
    pub name: String,
    pub frames: Vec<Snapshot>,
}

/// Loads every `*_moves.json` file in `dir`, in name order.
///
/// A file that fails to parse is logged and skipped; the remaining files
/// still load.
pub fn load_all_games(dir: &Path) -> Result<Vec<LoadedGame>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(FRAMES_SUFFIX))
        })
        .collect();
    paths.sort();

    let mut games = Vec::with_capacity(paths.len());
    for path in paths {
        match read_frames(&path) {
            Ok(frames) => {
                let name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default()
                    .trim_end_matches(FRAMES_SUFFIX)
                    .to_string();
                games.push(LoadedGame { name, frames });
            }
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }

    Ok(games)
}
