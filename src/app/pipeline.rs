//! Shared "analysis pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> merge -> analyze
//!
//! Command handlers can then focus on presentation.

use std::path::{Path, PathBuf};

use crate::analysis::analyze;
use crate::domain::{DemographicOptions, HarmonyAnalysis, RunConfig};
use crate::error::AppError;
use crate::landmarks::LandmarkSet;
use crate::registry::MetricRegistry;

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub landmarks: LandmarkSet,
    pub opts: DemographicOptions,
    pub analysis: HarmonyAnalysis,
}

/// Load landmark files per the run config and analyze them.
pub fn run_analysis(config: &RunConfig) -> Result<RunOutput, AppError> {
    let mut landmarks = LandmarkSet::new();

    for path in [&config.front_path, &config.side_path].into_iter().flatten() {
        let ingested = crate::io::ingest::read_landmark_json(path)?;
        tracing::info!(
            path = %path.display(),
            used = ingested.entries_used,
            read = ingested.entries_read,
            "loaded landmark file"
        );
        landmarks.merge(ingested.landmarks);
    }

    Ok(run_analysis_with_landmarks(config, landmarks))
}

/// Analyze an in-memory landmark set.
///
/// This is the join point for `analyze` and `sample`; the registry is the
/// shared global instance.
pub fn run_analysis_with_landmarks(config: &RunConfig, landmarks: LandmarkSet) -> RunOutput {
    let opts = DemographicOptions {
        gender: config.gender,
        ethnicity: config.ethnicity,
    };
    let analysis = analyze(MetricRegistry::global(), &landmarks, &opts);
    RunOutput {
        landmarks,
        opts,
        analysis,
    }
}

/// Write generated sample landmarks as `<prefix>.front.json` /
/// `<prefix>.side.json`, the same schema `analyze` ingests.
pub fn write_landmark_files(prefix: &Path, seed: u64, front_only: bool) -> Result<(), AppError> {
    write_one(
        &suffixed(prefix, "front"),
        &crate::data::sample_front_landmarks(seed),
    )?;
    if !front_only {
        write_one(
            &suffixed(prefix, "side"),
            &crate::data::sample_side_landmarks(seed),
        )?;
    }
    Ok(())
}

fn suffixed(prefix: &Path, profile: &str) -> PathBuf {
    let mut name = prefix.file_name().map(|n| n.to_owned()).unwrap_or_default();
    name.push(format!(".{profile}.json"));
    prefix.with_file_name(name)
}

fn write_one(path: &Path, landmarks: &LandmarkSet) -> Result<(), AppError> {
    let mut entries: Vec<crate::io::ingest::LandmarkEntry> = landmarks
        .iter()
        .map(|(id, point)| crate::io::ingest::LandmarkEntry {
            id: id.to_string(),
            x: point.x,
            y: point.y,
        })
        .collect();
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create landmark JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &entries)
        .map_err(|e| AppError::new(2, format!("Failed to write landmark JSON: {e}")))?;
    println!("Wrote landmarks: {}", path.display());
    Ok(())
}
