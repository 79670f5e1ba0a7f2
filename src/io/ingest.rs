//! Landmark JSON ingest and normalization.
//!
//! A landmark file is an array of `{id, x, y}` entries in normalized image
//! space; a flat `{id: {x, y}}` object is accepted as well. Front and side
//! profiles live in separate files; side ids carry the `side_` prefix.
//!
//! Design goals:
//! - **Strict schema** for the file shape (clear errors + exit code 2)
//! - **Entry-level validation** (skip bad entries, but report what happened)
//! - **Separation of concerns**: no scoring logic here

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::landmarks::{LandmarkPoint, LandmarkSet};

/// One row of a landmark file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkEntry {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// An entry-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct EntryError {
    pub id: String,
    pub message: String,
}

/// Ingest output: accepted landmarks plus counts and per-entry errors.
#[derive(Debug, Clone)]
pub struct IngestedLandmarks {
    pub landmarks: LandmarkSet,
    pub entries_read: usize,
    pub entries_used: usize,
    pub entry_errors: Vec<EntryError>,
}

/// Read one landmark file.
pub fn read_landmark_json(path: &Path) -> Result<IngestedLandmarks, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open landmark file '{}': {e}", path.display())))?;

    let value: Value = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid landmark JSON '{}': {e}", path.display())))?;

    let mut entries_read = 0;
    let mut entries = Vec::new();
    let mut entry_errors = Vec::new();

    match value {
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                entries_read += 1;
                match serde_json::from_value::<LandmarkEntry>(item) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => entry_errors.push(EntryError {
                        id: format!("entry {index}"),
                        message: e.to_string(),
                    }),
                }
            }
        }
        Value::Object(map) => {
            for (id, item) in map {
                entries_read += 1;
                match serde_json::from_value::<LandmarkPoint>(item) {
                    Ok(point) => entries.push(LandmarkEntry {
                        id,
                        x: point.x,
                        y: point.y,
                    }),
                    Err(e) => entry_errors.push(EntryError {
                        id,
                        message: e.to_string(),
                    }),
                }
            }
        }
        _ => {
            return Err(AppError::new(
                2,
                format!(
                    "Invalid landmark JSON '{}': expected an array of {{id, x, y}} entries or an id map",
                    path.display()
                ),
            ));
        }
    }

    let mut landmarks = LandmarkSet::new();
    for entry in entries {
        if entry.id.trim().is_empty() {
            entry_errors.push(EntryError {
                id: entry.id,
                message: "empty landmark id".to_string(),
            });
            continue;
        }
        if !(entry.x.is_finite() && entry.y.is_finite()) {
            entry_errors.push(EntryError {
                id: entry.id,
                message: "non-finite coordinate".to_string(),
            });
            continue;
        }
        if landmarks.contains(&entry.id) {
            entry_errors.push(EntryError {
                id: entry.id,
                message: "duplicate landmark id".to_string(),
            });
            continue;
        }
        landmarks.insert(entry.id, entry.x, entry.y);
    }

    let entries_used = landmarks.len();
    for err in &entry_errors {
        tracing::warn!(id = %err.id, "dropped landmark entry: {}", err.message);
    }

    Ok(IngestedLandmarks {
        landmarks,
        entries_read,
        entries_used,
        entry_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("harmony-ingest-{}-{name}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_entry_array_file() {
        let path = write_temp(
            "array",
            r#"[{"id": "menton", "x": 0.5, "y": 0.7}, {"id": "trichion", "x": 0.5, "y": 0.3}]"#,
        );
        let ingested = read_landmark_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ingested.entries_read, 2);
        assert_eq!(ingested.entries_used, 2);
        assert!(ingested.entry_errors.is_empty());
        assert!(ingested.landmarks.contains("menton"));
    }

    #[test]
    fn reads_id_map_file() {
        let path = write_temp(
            "map",
            r#"{"menton": {"x": 0.5, "y": 0.7}, "trichion": {"x": 0.5, "y": 0.3}}"#,
        );
        let ingested = read_landmark_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ingested.entries_used, 2);
        assert!(ingested.landmarks.contains("trichion"));
    }

    #[test]
    fn bad_entries_are_collected_not_fatal() {
        let path = write_temp(
            "partial",
            r#"[
                {"id": "menton", "x": 0.5, "y": 0.7},
                {"id": "nasion", "x": "oops", "y": 0.3},
                {"id": "menton", "x": 0.6, "y": 0.8},
                {"id": "", "x": 0.1, "y": 0.1}
            ]"#,
        );
        let ingested = read_landmark_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ingested.entries_read, 4);
        assert_eq!(ingested.entries_used, 1);
        assert_eq!(ingested.entry_errors.len(), 3);
        // first occurrence wins on duplicate ids
        let menton = ingested.landmarks.get("menton").unwrap();
        assert!((menton.y - 0.7).abs() < 1e-12);
    }

    #[test]
    fn rejects_malformed_json() {
        let path = write_temp("malformed", "not json");
        let err = read_landmark_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_scalar_top_level() {
        let path = write_temp("scalar", "42");
        let err = read_landmark_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_exit_code_2() {
        let err = read_landmark_json(Path::new("/nonexistent/landmarks.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
