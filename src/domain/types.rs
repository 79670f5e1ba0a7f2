//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during scoring
//! - exported to JSON for downstream consumers (UI, leaderboards)
//! - reloaded later for comparisons

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::measure::Measure;

/// Coarse classification of a standardized 0–10 score.
///
/// Boundaries are inclusive on the lower end of each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Ideal,
    Excellent,
    Good,
    BelowAverage,
}

impl QualityTier {
    /// Classify a 0–10 score into a tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            QualityTier::Ideal
        } else if score >= 7.5 {
            QualityTier::Excellent
        } else if score >= 6.0 {
            QualityTier::Good
        } else {
            QualityTier::BelowAverage
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            QualityTier::Ideal => "Ideal",
            QualityTier::Excellent => "Excellent",
            QualityTier::Good => "Good",
            QualityTier::BelowAverage => "Below average",
        }
    }
}

/// How far a measured value deviates from its ideal range, expressed in
/// normalized deviation units (see `scoring::classify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Optimal,
    Minor,
    Moderate,
    Major,
    Severe,
    ExtremelySevere,
}

impl SeverityLevel {
    pub fn display_name(self) -> &'static str {
        match self {
            SeverityLevel::Optimal => "optimal",
            SeverityLevel::Minor => "minor",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Major => "major",
            SeverityLevel::Severe => "severe",
            SeverityLevel::ExtremelySevere => "extremely severe",
        }
    }
}

/// Confidence level for flaw/strength attribution, derived from the same
/// z-like statistic as severity:
///
/// - `confirmed`: |z| >= 2
/// - `likely`:   1 <= |z| < 2
/// - `possible`: 0.5 <= |z| < 1
///
/// Below 0.5 no assessment is generated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Possible,
    Likely,
    Confirmed,
}

impl ConfidenceLevel {
    pub fn display_name(self) -> &'static str {
        match self {
            ConfidenceLevel::Possible => "possible",
            ConfidenceLevel::Likely => "likely",
            ConfidenceLevel::Confirmed => "confirmed",
        }
    }
}

/// Native unit of a metric's measured value.
///
/// The engine emits the unit as configured; display conversion (e.g.
/// `degrees` → `°`) is the presentation adapter's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    Ratio,
    Percent,
    Degrees,
    Mm,
    None,
}

impl MeasurementUnit {
    /// Suffix appended directly after a formatted value ("1.62x", "31.5%").
    pub fn symbol(self) -> &'static str {
        match self {
            MeasurementUnit::Ratio => "x",
            MeasurementUnit::Percent => "%",
            MeasurementUnit::Degrees => "\u{b0}",
            MeasurementUnit::Mm => "mm",
            MeasurementUnit::None => "",
        }
    }
}

/// Directional policy for deviation from the ideal range:
///
/// - `balanced`: deviation on either side is equally penalized (default)
/// - `higher_is_better`: only values below `safe_floor` are true weaknesses;
///   values between `safe_floor` and `ideal_min` land in a soft zone
/// - `lower_is_better`: mirror image, using `safe_ceiling` above `ideal_max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricPolarity {
    Balanced,
    HigherIsBetter,
    LowerIsBetter,
}

impl MetricPolarity {
    pub fn display_name(self) -> &'static str {
        match self {
            MetricPolarity::Balanced => "balanced",
            MetricPolarity::HigherIsBetter => "higher_is_better",
            MetricPolarity::LowerIsBetter => "lower_is_better",
        }
    }
}

/// Which photographed profile a metric is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    Front,
    Side,
}

impl ProfileType {
    pub fn display_name(self) -> &'static str {
        match self {
            ProfileType::Front => "front",
            ProfileType::Side => "side",
        }
    }
}

/// Where a measured value sits relative to its (post-override) ideal range.
///
/// Soft-zone values report `within` so they can never produce a flaw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationDirection {
    Above,
    Below,
    Within,
}

/// Gender option for demographic range overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn display_name(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Ethnicity option for demographic range overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    EastAsian,
    SouthAsian,
    Black,
    Hispanic,
    MiddleEastern,
    NativeAmerican,
    PacificIslander,
    White,
    Other,
}

impl Ethnicity {
    pub fn display_name(self) -> &'static str {
        match self {
            Ethnicity::EastAsian => "east_asian",
            Ethnicity::SouthAsian => "south_asian",
            Ethnicity::Black => "black",
            Ethnicity::Hispanic => "hispanic",
            Ethnicity::MiddleEastern => "middle_eastern",
            Ethnicity::NativeAmerican => "native_american",
            Ethnicity::PacificIslander => "pacific_islander",
            Ethnicity::White => "white",
            Ethnicity::Other => "other",
        }
    }
}

/// Optional demographic context for one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicOptions {
    pub gender: Option<Gender>,
    pub ethnicity: Option<Ethnicity>,
}

/// An inclusive target range for a metric's measured value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(self) -> f64 {
        self.max - self.min
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance from `value` to the nearest bound, zero when inside.
    pub fn distance_outside(self, value: f64) -> f64 {
        (self.min - value).max(value - self.max).max(0.0)
    }
}

/// A demographic override of the ideal range, matched against the run's
/// `DemographicOptions` with specificity precedence:
/// gender+ethnicity > ethnicity-only > gender-only > metric default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemographicOverride {
    pub gender: Option<Gender>,
    pub ethnicity: Option<Ethnicity>,
    pub range: IdealRange,
}

impl DemographicOverride {
    /// Higher is more specific. Keys are disjoint by construction, so ties
    /// can only occur between overrides that match different options.
    pub fn specificity(&self) -> u8 {
        match (self.gender, self.ethnicity) {
            (Some(_), Some(_)) => 3,
            (None, Some(_)) => 2,
            (Some(_), None) => 1,
            (None, None) => 0,
        }
    }
}

/// One control point of a scoring curve.
///
/// Handles are optional; a missing handle degrades the adjacent segment
/// toward a straight line at that end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_handle_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_handle_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_handle_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_handle_y: Option<f64>,
}

impl CurvePoint {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }
}

/// Whether a metric scores through its control points or the analytic
/// exponential model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveMode {
    Custom,
    Exponential,
}

/// Dual-curve configuration.
///
/// `points` is the scoring curve. `display_points`, when present, is used
/// only by presentation adapters for visualization and must never influence
/// the computed score; the two evaluator entry points in `math::bezier` keep
/// that separation structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierCurveConfig {
    pub mode: CurveMode,
    pub points: Vec<CurvePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_points: Option<Vec<CurvePoint>>,
}

/// Optional flaw/strength labels surfaced in generated reasoning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicationLabels {
    /// Label when the value sits below the ideal range (e.g. "Narrow face").
    pub low: &'static str,
    /// Label when the value sits above the ideal range (e.g. "Wide face").
    pub high: &'static str,
    /// Label when the metric is a strength (e.g. "Balanced proportions").
    pub ideal: &'static str,
}

/// Static configuration of one measurable facial quantity.
///
/// Instances are compiled into the registry, loaded once, and never mutated.
#[derive(Debug, Clone)]
pub struct MetricConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub unit: MeasurementUnit,
    pub profile: ProfileType,

    /// Inclusive target range (pre-override).
    pub ideal: IdealRange,
    /// Display bounds; must enclose the ideal range.
    pub range_min: f64,
    pub range_max: f64,

    /// Exponential-decay steepness outside the ideal range.
    pub decay_rate: f64,
    /// Achievable score ceiling (normally 10).
    pub max_score: f64,
    /// Contribution to category/profile aggregates.
    pub weight: f64,

    pub polarity: MetricPolarity,
    /// `higher_is_better` only: lowest still-acceptable value.
    pub safe_floor: Option<f64>,
    /// `lower_is_better` only: highest still-acceptable value.
    pub safe_ceiling: Option<f64>,
    /// Score floor applied inside a soft zone.
    pub soft_zone_score: f64,

    /// Optional per-metric severity normalization scale; defaults to half
    /// the effective ideal-range width when absent.
    pub spread_scale: Option<f64>,

    pub custom_curve: Option<BezierCurveConfig>,
    pub overrides: Vec<DemographicOverride>,

    /// How the raw value is computed from landmarks.
    pub measure: Measure,

    pub labels: Option<IndicationLabels>,
}

impl MetricConfig {
    /// Check the structural invariants of a registry entry.
    ///
    /// Returns a human-readable reason on the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.ideal.min > self.ideal.max {
            return Err(format!("{}: ideal_min > ideal_max", self.id));
        }
        if self.range_min > self.ideal.min || self.ideal.max > self.range_max {
            return Err(format!("{}: display range does not enclose ideal range", self.id));
        }
        if self.weight <= 0.0 {
            return Err(format!("{}: weight must be > 0", self.id));
        }
        if self.decay_rate < 0.0 || !self.decay_rate.is_finite() {
            return Err(format!("{}: invalid decay_rate", self.id));
        }
        if !(self.max_score > 0.0 && self.max_score <= 10.0) {
            return Err(format!("{}: max_score must be in (0, 10]", self.id));
        }
        if let Some(floor) = self.safe_floor {
            if self.polarity != MetricPolarity::HigherIsBetter {
                return Err(format!("{}: safe_floor requires higher_is_better", self.id));
            }
            if floor >= self.ideal.min {
                return Err(format!("{}: safe_floor must be < ideal_min", self.id));
            }
        }
        if let Some(ceiling) = self.safe_ceiling {
            if self.polarity != MetricPolarity::LowerIsBetter {
                return Err(format!("{}: safe_ceiling requires lower_is_better", self.id));
            }
            if ceiling <= self.ideal.max {
                return Err(format!("{}: safe_ceiling must be > ideal_max", self.id));
            }
        }
        if !(6.0..=9.0).contains(&self.soft_zone_score) {
            return Err(format!("{}: soft_zone_score must be in [6, 9]", self.id));
        }
        Ok(())
    }
}

/// Computed result for one metric in one analysis run.
///
/// Created by the aggregation engine; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricScoreResult {
    pub metric_id: String,
    pub name: String,
    /// Measured quantity in the metric's native unit.
    pub value: f64,
    /// Raw 0–10 curve score before polarity adjustment.
    pub score: f64,
    /// Final 0–10 score after polarity adjustment; used for aggregation.
    pub standardized_score: f64,
    pub quality_tier: QualityTier,
    pub severity: SeverityLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceLevel>,
    /// Post-override ideal bounds used for this run.
    pub ideal_min: f64,
    pub ideal_max: f64,
    /// Unsigned distance outside the effective assessment band.
    pub deviation: f64,
    pub deviation_direction: DeviationDirection,
    pub unit: MeasurementUnit,
    pub category: String,
    pub profile: ProfileType,
    /// Aggregation weight, copied from the config for the reduction step.
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
}

/// A detected weakness: a metric that crossed the flaw threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlawAssessment {
    pub category: String,
    pub metric_id: String,
    pub metric_name: String,
    pub severity: SeverityLevel,
    /// Formatted deviation, e.g. "0.50x above ideal".
    pub deviation: String,
    pub reasoning: String,
    pub confidence: ConfidenceLevel,
}

/// A detected strength: a metric scoring in the ideal/excellent tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthAssessment {
    pub category: String,
    pub metric_id: String,
    pub metric_name: String,
    pub quality_tier: QualityTier,
    pub value: f64,
    pub reasoning: String,
}

/// The single output record of one full analysis run.
///
/// Immutable once returned; the caller owns it. All scores are 0–10,
/// `percentile` is 0–100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonyAnalysis {
    pub overall_score: f64,
    pub standardized_score: f64,
    pub quality_tier: QualityTier,
    pub percentile: f64,
    pub front_score: f64,
    pub side_score: f64,
    /// Category → weighted mean standardized score. BTreeMap keeps output
    /// ordering deterministic across runs.
    pub category_scores: BTreeMap<String, f64>,
    pub measurements: Vec<MetricScoreResult>,
    pub flaws: Vec<FlawAssessment>,
    pub strengths: Vec<StrengthAssessment>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub front_path: Option<PathBuf>,
    pub side_path: Option<PathBuf>,

    pub gender: Option<Gender>,
    pub ethnicity: Option<Ethnicity>,

    /// How many flaws/strengths to print in the report.
    pub top_n: usize,

    pub plot_metric: Option<String>,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Measure;

    fn base_config() -> MetricConfig {
        MetricConfig {
            id: "testMetric",
            name: "Test Metric",
            category: "test",
            unit: MeasurementUnit::Ratio,
            profile: ProfileType::Front,
            ideal: IdealRange::new(1.5, 1.8),
            range_min: 1.0,
            range_max: 2.5,
            decay_rate: 2.0,
            max_score: 10.0,
            weight: 1.0,
            polarity: MetricPolarity::Balanced,
            safe_floor: None,
            safe_ceiling: None,
            soft_zone_score: 8.0,
            spread_scale: None,
            custom_curve: None,
            overrides: Vec::new(),
            measure: Measure::Ratio {
                num: ("a", "b"),
                den: ("c", "d"),
            },
            labels: None,
        }
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(QualityTier::from_score(9.0), QualityTier::Ideal);
        assert_eq!(QualityTier::from_score(8.99), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(7.5), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(6.0), QualityTier::Good);
        assert_eq!(QualityTier::from_score(5.99), QualityTier::BelowAverage);
    }

    #[test]
    fn ideal_range_distance() {
        let r = IdealRange::new(1.5, 1.8);
        assert_eq!(r.distance_outside(1.65), 0.0);
        assert!((r.distance_outside(2.3) - 0.5).abs() < 1e-12);
        assert!((r.distance_outside(1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn validate_accepts_well_formed_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_ideal_range() {
        let mut cfg = base_config();
        cfg.ideal = IdealRange::new(2.0, 1.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_safe_floor_without_polarity() {
        let mut cfg = base_config();
        cfg.safe_floor = Some(1.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn override_specificity_ordering() {
        let range = IdealRange::new(0.0, 1.0);
        let both = DemographicOverride {
            gender: Some(Gender::Male),
            ethnicity: Some(Ethnicity::White),
            range,
        };
        let eth = DemographicOverride {
            gender: None,
            ethnicity: Some(Ethnicity::White),
            range,
        };
        let gender_only = DemographicOverride {
            gender: Some(Gender::Male),
            ethnicity: None,
            range,
        };
        assert!(both.specificity() > eth.specificity());
        assert!(eth.specificity() > gender_only.specificity());
    }
}
