//! Boundary mapping from internal records to caller-facing display shapes.
//!
//! Everything here is derived; nothing feeds back into scoring. UI and
//! persistence layers consume these views instead of reaching into
//! [`MetricConfig`] directly.

use serde::Serialize;

use crate::domain::{CurveMode, MetricConfig, MetricScoreResult};
use crate::math::bezier::sample_curve;

/// How finely display curves are sampled for plotting clients.
const DISPLAY_SAMPLES: usize = 64;

/// Display-ready projection of one metric result.
#[derive(Debug, Clone, Serialize)]
pub struct MetricView {
    pub metric_id: String,
    pub name: String,
    /// Value with its unit suffix attached, e.g. "1.62x" or "121.4\u{b0}".
    pub formatted_value: String,
    pub score: f64,
    pub quality_tier: &'static str,
    pub severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<&'static str>,
    pub ideal_label: String,
    /// Axis bounds for rendering, from the config's display range.
    pub range_min: f64,
    pub range_max: f64,
    /// Sampled `(value, score)` pairs of the curve to draw. Uses the
    /// display-only override when the config carries one.
    pub curve: Vec<(f64, f64)>,
}

/// Format a value in a metric's native unit for display.
pub fn format_value(value: f64, config: &MetricConfig) -> String {
    format!("{:.2}{}", value, config.unit.symbol())
}

/// Project one scored metric into its display shape.
pub fn metric_view(result: &MetricScoreResult, config: &MetricConfig) -> MetricView {
    MetricView {
        metric_id: result.metric_id.clone(),
        name: result.name.clone(),
        formatted_value: format_value(result.value, config),
        score: result.standardized_score,
        quality_tier: result.quality_tier.display_name(),
        severity: result.severity.display_name(),
        confidence: result.confidence.map(|c| c.display_name()),
        ideal_label: format!(
            "{:.2}-{:.2}{}",
            result.ideal_min,
            result.ideal_max,
            config.unit.symbol()
        ),
        range_min: config.range_min,
        range_max: config.range_max,
        curve: display_curve(config),
    }
}

/// Sampled points of the curve a client should draw for this metric.
///
/// Preference order: explicit display points, then the scoring control
/// points, then the exponential model sampled over the display range.
pub fn display_curve(config: &MetricConfig) -> Vec<(f64, f64)> {
    if let Some(curve) = &config.custom_curve {
        if curve.mode == CurveMode::Custom {
            let points = curve.display_points.as_ref().unwrap_or(&curve.points);
            if crate::math::validate_curve_points(points).is_ok() {
                return sample_curve(points, DISPLAY_SAMPLES);
            }
        }
    }
    let span = config.range_max - config.range_min;
    (0..DISPLAY_SAMPLES)
        .map(|i| {
            let x = config.range_min + span * i as f64 / (DISPLAY_SAMPLES - 1) as f64;
            let y = crate::math::exponential_score(x, config.ideal, config.decay_rate, config.max_score);
            (x, y)
        })
        .collect()
}
