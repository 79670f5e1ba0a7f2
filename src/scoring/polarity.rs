//! Polarity and deviation resolution.
//!
//! Applies the metric's directional policy on top of the raw curve score.
//! The soft-zone clamp for each asymmetric polarity lives here and nowhere
//! else, so the two mirror cases cannot drift apart.
//!
//! Soft-zone values report direction `within`, which structurally guarantees
//! they can never produce a flaw downstream; their `deviation` still carries
//! the true distance to the ideal bound for explanation text.

use crate::domain::{DeviationDirection, IdealRange, MetricConfig, MetricPolarity};

/// Outcome of polarity resolution for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityOutcome {
    /// Score fed to classification and aggregation, in `[0, 10]`.
    pub adjusted_score: f64,
    /// Unsigned distance from the effective ideal bound (0 when within).
    pub deviation: f64,
    pub direction: DeviationDirection,
}

/// Resolve the metric's polarity policy.
pub fn resolve(
    value: f64,
    raw_score: f64,
    config: &MetricConfig,
    range: IdealRange,
) -> PolarityOutcome {
    let raw_score = raw_score.clamp(0.0, 10.0);
    match config.polarity {
        MetricPolarity::Balanced => balanced(value, raw_score, range),
        MetricPolarity::HigherIsBetter => match config.safe_floor {
            Some(floor) => higher_is_better(value, raw_score, config, range, floor),
            // No floor configured: nothing to soften, behave as balanced.
            None => balanced(value, raw_score, range),
        },
        MetricPolarity::LowerIsBetter => match config.safe_ceiling {
            Some(ceiling) => lower_is_better(value, raw_score, config, range, ceiling),
            None => balanced(value, raw_score, range),
        },
    }
}

fn balanced(value: f64, raw_score: f64, range: IdealRange) -> PolarityOutcome {
    let direction = if value < range.min {
        DeviationDirection::Below
    } else if value > range.max {
        DeviationDirection::Above
    } else {
        DeviationDirection::Within
    };
    PolarityOutcome {
        adjusted_score: raw_score,
        deviation: range.distance_outside(value),
        direction,
    }
}

fn higher_is_better(
    value: f64,
    raw_score: f64,
    config: &MetricConfig,
    range: IdealRange,
    floor: f64,
) -> PolarityOutcome {
    if value < floor {
        // True weakness: the raw curve score stands.
        return PolarityOutcome {
            adjusted_score: raw_score,
            deviation: range.min - value,
            direction: DeviationDirection::Below,
        };
    }
    if value < range.min {
        // Soft zone: acceptable but not ideal; clamp to the passing floor.
        return PolarityOutcome {
            adjusted_score: raw_score.max(config.soft_zone_score),
            deviation: range.min - value,
            direction: DeviationDirection::Within,
        };
    }
    // At or above the ideal minimum the curve dictates; values past the
    // upper bound still count as deviation in the `above` direction.
    let direction = if value > range.max {
        DeviationDirection::Above
    } else {
        DeviationDirection::Within
    };
    PolarityOutcome {
        adjusted_score: raw_score,
        deviation: (value - range.max).max(0.0),
        direction,
    }
}

fn lower_is_better(
    value: f64,
    raw_score: f64,
    config: &MetricConfig,
    range: IdealRange,
    ceiling: f64,
) -> PolarityOutcome {
    if value > ceiling {
        return PolarityOutcome {
            adjusted_score: raw_score,
            deviation: value - range.max,
            direction: DeviationDirection::Above,
        };
    }
    if value > range.max {
        return PolarityOutcome {
            adjusted_score: raw_score.max(config.soft_zone_score),
            deviation: value - range.max,
            direction: DeviationDirection::Within,
        };
    }
    let direction = if value < range.min {
        DeviationDirection::Below
    } else {
        DeviationDirection::Within
    };
    PolarityOutcome {
        adjusted_score: raw_score,
        deviation: (range.min - value).max(0.0),
        direction,
    }
}
