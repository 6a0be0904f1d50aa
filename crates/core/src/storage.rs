//! Frame-file storage: writing and loading per-game snapshot sequences

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::board::Snapshot;
use crate::error::Result;

/// One entry of a frame file: a board snapshot, or the empty-array spacer
/// the file format interleaves between snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Board(Snapshot),
    Spacer,
}

impl Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Frame::Board(snapshot) => snapshot.serialize(serializer),
            Frame::Spacer => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        if rows.is_empty() {
            return Ok(Frame::Spacer);
        }
        Snapshot::try_from_rows(&rows)
            .map(Frame::Board)
            .map_err(D::Error::custom)
    }
}

/// Writes a game's frame sequence as a JSON array alternating each snapshot
/// with an empty-array spacer.
pub fn write_frames(path: &Path, frames: &[Snapshot]) -> Result<()> {
    let mut spaced = Vec::with_capacity(frames.len() * 2);
    for frame in frames {
        spaced.push(Frame::Board(frame.clone()));
        spaced.push(Frame::Spacer);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &spaced)?;
    writer.flush()?;
    Ok(())
}

/// Loads a frame file and returns its board snapshots in play order.
///
/// Spacer entries are dropped here, so indexing into the result always
/// yields a real position.
pub fn read_frames(path: &Path) -> Result<Vec<Snapshot>> {
    let file = File::open(path)?;
    let frames: Vec<Frame> = serde_json::from_reader(BufReader::new(file))?;

    Ok(frames
        .into_iter()
        .filter_map(|frame| match frame {
            Frame::Board(snapshot) => Some(snapshot),
            Frame::Spacer => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chess-reel-storage-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let path = temp_path("round-trip.json");
        let frames = vec![Snapshot::starting()];

        write_frames(&path, &frames).unwrap();
        let loaded = read_frames(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, frames);
    }

    #[test]
    fn test_written_file_alternates_spacers() {
        let path = temp_path("spacers.json");
        let frames = vec![Snapshot::starting(); 3];

        write_frames(&path, &frames).unwrap();
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(raw.len(), 6);
        assert_eq!(raw[1], serde_json::json!([]));
        assert_eq!(raw[0].as_array().map(Vec::len), Some(8));
    }

    // Pins the load-time decision: spacers never reach the caller, so a move
    // index always resolves to a board rather than an empty frame.
    #[test]
    fn test_read_filters_spacer_entries() {
        let path = temp_path("filter.json");
        let frames = vec![Snapshot::starting(); 3];

        write_frames(&path, &frames).unwrap();
        let loaded = read_frames(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.len(), 3);
        assert!(loaded.iter().all(|s| s.piece_count() == 32));
    }

    #[test]
    fn test_read_rejects_corrupt_file() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "{ not json ]").unwrap();

        let result = read_frames(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn test_read_rejects_malformed_snapshot() {
        let path = temp_path("malformed.json");
        // A 3-row board is not a snapshot.
        fs::write(&path, r#"[[["r"],["n"],["b"]]]"#).unwrap();

        let result = read_frames(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
