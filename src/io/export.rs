//! Write a completed analysis to JSON.
//!
//! The export envelope is the "portable" representation of one run:
//! - tool name and version
//! - generation timestamp and demographic options
//! - the full `HarmonyAnalysis` record

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DemographicOptions, HarmonyAnalysis};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisFile {
    pub tool: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub demographics: DemographicOptions,
    pub analysis: HarmonyAnalysis,
}

/// Write an analysis JSON file.
pub fn write_analysis_json(
    path: &Path,
    analysis: &HarmonyAnalysis,
    opts: &DemographicOptions,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create analysis JSON '{}': {e}", path.display())))?;

    let envelope = AnalysisFile {
        tool: "harmony".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: Utc::now(),
        demographics: *opts,
        analysis: analysis.clone(),
    };

    serde_json::to_writer_pretty(file, &envelope)
        .map_err(|e| AppError::new(2, format!("Failed to write analysis JSON: {e}")))?;

    Ok(())
}

/// Read an analysis JSON file back.
pub fn read_analysis_json(path: &Path) -> Result<AnalysisFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open analysis JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid analysis JSON '{}': {e}", path.display())))
}
