//! Per-metric scoring: demographics → curve → polarity → classification.
//!
//! `score_metric` is the single entry point that runs one measured value
//! through the full chain and produces an immutable `MetricScoreResult`.
//! It is referentially transparent: same inputs, same output.

pub mod classify;
pub mod curve;
pub mod demographics;
pub mod error;
pub mod polarity;

pub use error::ScoreError;

use crate::domain::{DemographicOptions, MetricConfig, MetricScoreResult};

/// Score one metric's measured value under the given demographics.
pub fn score_metric(
    config: &MetricConfig,
    value: f64,
    opts: &DemographicOptions,
) -> MetricScoreResult {
    let range = demographics::resolve(config, opts);
    let raw_score = curve::evaluate(value, config, range);
    let outcome = polarity::resolve(value, raw_score, config, range);
    let class = classify::classify(
        outcome.adjusted_score,
        outcome.deviation,
        outcome.direction,
        config,
        range,
    );

    MetricScoreResult {
        metric_id: config.id.to_string(),
        name: config.name.to_string(),
        value,
        score: raw_score,
        standardized_score: outcome.adjusted_score,
        quality_tier: class.quality_tier,
        severity: class.severity,
        confidence: class.confidence,
        ideal_min: range.min,
        ideal_max: range.max,
        deviation: outcome.deviation,
        deviation_direction: outcome.direction,
        unit: config.unit,
        category: config.category.to_string(),
        profile: config.profile,
        weight: config.weight,
        percentile: None,
    }
}
