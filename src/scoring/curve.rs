//! Raw score evaluation against a metric's curve definition.
//!
//! A metric either scores through its custom piecewise-Bezier curve or the
//! analytic exponential model. A malformed custom curve is a configuration
//! error for that metric only: we log it and fall back to the exponential
//! model rather than dropping the metric.

use tracing::warn;

use crate::domain::{CurveMode, IdealRange, MetricConfig};
use crate::math::{eval_piecewise, exponential_score, validate_curve_points};
use crate::scoring::ScoreError;

/// Evaluate `value` to a raw score in `[0, 10]`.
///
/// `range` is the post-override ideal range; the custom curve, when present
/// and valid, is authoritative over its own domain. Display-only curves are
/// never consulted here.
pub fn evaluate(value: f64, config: &MetricConfig, range: IdealRange) -> f64 {
    if let Some(curve) = &config.custom_curve {
        if curve.mode == CurveMode::Custom {
            match validate_curve_points(&curve.points) {
                Ok(()) => {
                    return eval_piecewise(&curve.points, value).min(config.max_score);
                }
                Err(reason) => {
                    warn!(
                        metric = config.id,
                        %reason,
                        "invalid custom curve, falling back to exponential model"
                    );
                }
            }
        }
    }

    exponential_score(value, range, config.decay_rate, config.max_score)
}

/// Pre-flight validation of a metric's curve configuration.
///
/// Exercised by registry validation so that malformed compiled-in curves are
/// caught by tests rather than discovered as runtime fallbacks.
pub fn validate_config(config: &MetricConfig) -> Result<(), ScoreError> {
    let Some(curve) = &config.custom_curve else {
        return Ok(());
    };
    if curve.mode != CurveMode::Custom {
        return Ok(());
    }
    validate_curve_points(&curve.points).map_err(|reason| ScoreError::InvalidCurve {
        metric: config.id.to_string(),
        reason: reason.clone(),
    })?;
    if let Some(display) = &curve.display_points {
        validate_curve_points(display).map_err(|reason| ScoreError::InvalidCurve {
            metric: config.id.to_string(),
            reason: format!("display curve: {reason}"),
        })?;
    }
    Ok(())
}
