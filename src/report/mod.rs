//! Terminal reporting for a completed analysis.

pub mod format;

pub use format::{format_assessments, format_measurements, format_run_summary};
