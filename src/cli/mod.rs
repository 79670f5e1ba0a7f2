//! Command-line parsing for the facial harmony analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{Ethnicity, Gender};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "harmony", version, about = "Facial Harmony Scoring Engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze landmark JSON files and print the harmony report.
    Analyze(AnalyzeArgs),
    /// Generate seeded synthetic landmarks and analyze them.
    Sample(SampleArgs),
    /// Print the ASCII scoring curve for one metric.
    Curve(CurveArgs),
    /// List every registered metric.
    Metrics,
}

/// Demographic options shared by the scoring commands.
#[derive(Debug, Parser, Clone)]
pub struct DemographicArgs {
    /// Gender for demographic range overrides.
    #[arg(long, value_enum)]
    pub gender: Option<Gender>,

    /// Ethnicity for demographic range overrides.
    #[arg(long, value_enum)]
    pub ethnicity: Option<Ethnicity>,
}

/// Report options shared by the scoring commands.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Show top-N flaws and strengths.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Plot the scoring curve for this metric id after the report.
    #[arg(long = "plot")]
    pub plot_metric: Option<String>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the full analysis to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for `harmony analyze`.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Front-profile landmark JSON file.
    #[arg(long)]
    pub front: Option<PathBuf>,

    /// Side-profile landmark JSON file.
    #[arg(long)]
    pub side: Option<PathBuf>,

    #[command(flatten)]
    pub demographics: DemographicArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options for `harmony sample`.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Random seed for landmark generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Generate only the front profile.
    #[arg(long)]
    pub front_only: bool,

    /// Write the generated landmarks to JSON files with this path prefix.
    #[arg(long = "write-landmarks")]
    pub write_landmarks: Option<PathBuf>,

    #[command(flatten)]
    pub demographics: DemographicArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Options for `harmony curve`.
#[derive(Debug, Parser, Clone)]
pub struct CurveArgs {
    /// Metric id to plot.
    pub metric: String,

    /// Mark this measured value on the curve.
    #[arg(long)]
    pub value: Option<f64>,

    #[command(flatten)]
    pub demographics: DemographicArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
