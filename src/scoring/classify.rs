//! Quality tier, severity, and confidence classification.
//!
//! Severity and confidence both derive from a z-score-like statistic:
//! the deviation magnitude divided by an expected spread. The spread is the
//! metric's `spread_scale` when configured, else half the effective
//! ideal-range width, floored at 2% of the display range so degenerate
//! (zero-width) ideal ranges still classify sensibly.

use crate::domain::{
    ConfidenceLevel, DeviationDirection, IdealRange, MetricConfig, QualityTier, SeverityLevel,
};

/// Fraction of the display range used as the minimum spread.
const SPREAD_FLOOR_FRACTION: f64 = 0.02;

/// Classification output for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub quality_tier: QualityTier,
    pub severity: SeverityLevel,
    /// `None` when |z| < 0.5; such metrics generate no flaw/strength
    /// attribution at all.
    pub confidence: Option<ConfidenceLevel>,
}

/// Classify an adjusted score and deviation.
pub fn classify(
    adjusted_score: f64,
    deviation: f64,
    direction: DeviationDirection,
    config: &MetricConfig,
    range: IdealRange,
) -> Classification {
    let quality_tier = QualityTier::from_score(adjusted_score);

    if deviation <= 0.0 && direction == DeviationDirection::Within {
        return Classification {
            quality_tier,
            severity: SeverityLevel::Optimal,
            confidence: None,
        };
    }

    let z = deviation / expected_spread(config, range);
    Classification {
        quality_tier,
        severity: severity_from_z(z),
        confidence: confidence_from_z(z),
    }
}

/// The normalization scale for deviation magnitudes.
pub fn expected_spread(config: &MetricConfig, range: IdealRange) -> f64 {
    let floor = (SPREAD_FLOOR_FRACTION * (config.range_max - config.range_min)).max(f64::EPSILON);
    config
        .spread_scale
        .unwrap_or(range.width() / 2.0)
        .max(floor)
}

fn severity_from_z(z: f64) -> SeverityLevel {
    let z = z.abs();
    if z >= 3.0 {
        SeverityLevel::ExtremelySevere
    } else if z >= 2.0 {
        SeverityLevel::Severe
    } else if z >= 1.0 {
        SeverityLevel::Major
    } else if z >= 0.5 {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Minor
    }
}

fn confidence_from_z(z: f64) -> Option<ConfidenceLevel> {
    let z = z.abs();
    if z >= 2.0 {
        Some(ConfidenceLevel::Confirmed)
    } else if z >= 1.0 {
        Some(ConfidenceLevel::Likely)
    } else if z >= 0.5 {
        Some(ConfidenceLevel::Possible)
    } else {
        None
    }
}
