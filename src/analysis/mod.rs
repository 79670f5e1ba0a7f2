//! Full-face analysis: measure every applicable metric, score it, and fold
//! the results into a single [`HarmonyAnalysis`].
//!
//! Per-metric evaluation is independent and runs in parallel; the reduction
//! over completed results is single-threaded. A failure confined to one
//! metric (missing landmarks, degenerate geometry) never aborts the run.

pub mod percentile;

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::domain::{
    DemographicOptions, DeviationDirection, FlawAssessment, HarmonyAnalysis, MetricConfig,
    MetricScoreResult, ProfileType, QualityTier, StrengthAssessment,
};
use crate::landmarks::LandmarkSet;
use crate::registry::MetricRegistry;
use crate::scoring::score_metric;

use percentile::{AnchorTable, PercentileLookup};

/// Final scores at or above this stay out of the flaw list regardless of
/// deviation classification.
const FLAW_SCORE_CUTOFF: f64 = 6.0;

/// Analyze a landmark set against the registry using the builtin population
/// reference for percentiles.
pub fn analyze(
    registry: &MetricRegistry,
    landmarks: &LandmarkSet,
    opts: &DemographicOptions,
) -> HarmonyAnalysis {
    analyze_with(registry, landmarks, opts, &AnchorTable::builtin())
}

/// Analyze with a caller-supplied percentile reference.
pub fn analyze_with(
    registry: &MetricRegistry,
    landmarks: &LandmarkSet,
    opts: &DemographicOptions,
    population: &dyn PercentileLookup,
) -> HarmonyAnalysis {
    let configs: Vec<&MetricConfig> = registry.iter().collect();

    let mut results: Vec<MetricScoreResult> = configs
        .par_iter()
        .filter_map(|&config| {
            let value = match config.measure.evaluate(landmarks) {
                Some(v) => v,
                None => {
                    tracing::debug!(metric = config.id, "skipped: landmarks unavailable");
                    return None;
                }
            };
            let mut result = score_metric(config, value, opts);
            result.percentile = Some(population.percentile(result.standardized_score));
            Some(result)
        })
        .collect();

    // par_iter preserves input order for indexed collects, but keep the
    // output contract explicit: registry declaration order.
    results.sort_by_key(|r| registry.position(&r.metric_id).unwrap_or(usize::MAX));

    let front_score = profile_mean(&results, ProfileType::Front);
    let side_score = profile_mean(&results, ProfileType::Side);
    let overall_score = match (front_score, side_score) {
        (Some(f), Some(s)) => (f + s) / 2.0,
        (Some(f), None) => f,
        (None, Some(s)) => s,
        (None, None) => 0.0,
    };

    let mut category_scores = BTreeMap::new();
    let mut categories: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();
    for category in categories {
        let (sum, weight) = results
            .iter()
            .filter(|r| r.category == category)
            .fold((0.0, 0.0), |(s, w), r| {
                (s + r.standardized_score * r.weight, w + r.weight)
            });
        if weight > 0.0 {
            category_scores.insert(category.to_string(), sum / weight);
        }
    }

    let (flaws, strengths) = synthesize(registry, &results);

    HarmonyAnalysis {
        overall_score,
        standardized_score: overall_score,
        quality_tier: QualityTier::from_score(overall_score),
        percentile: if results.is_empty() {
            0.0
        } else {
            population.percentile(overall_score)
        },
        front_score: front_score.unwrap_or(0.0),
        side_score: side_score.unwrap_or(0.0),
        category_scores,
        measurements: results,
        flaws,
        strengths,
    }
}

/// Weighted mean over one profile; `None` when no metric of that profile
/// produced a result, so the overall score can renormalize.
fn profile_mean(results: &[MetricScoreResult], profile: ProfileType) -> Option<f64> {
    let (sum, weight) = results
        .iter()
        .filter(|r| r.profile == profile)
        .fold((0.0, 0.0), |(s, w), r| {
            (s + r.standardized_score * r.weight, w + r.weight)
        });
    if weight > 0.0 { Some(sum / weight) } else { None }
}

/// At most one assessment per metric: a flaw when the deviation is real,
/// classified, and the final score is poor; otherwise a strength when the
/// metric landed in the top tiers.
fn synthesize(
    registry: &MetricRegistry,
    results: &[MetricScoreResult],
) -> (Vec<FlawAssessment>, Vec<StrengthAssessment>) {
    let mut flaws = Vec::new();
    let mut strengths = Vec::new();

    for result in results {
        let labels = registry
            .get(&result.metric_id)
            .ok()
            .and_then(|c| c.labels.as_ref());

        let flaw_confidence = result.confidence.filter(|_| {
            matches!(
                result.deviation_direction,
                DeviationDirection::Above | DeviationDirection::Below
            ) && result.standardized_score < FLAW_SCORE_CUTOFF
        });

        if let Some(confidence) = flaw_confidence {
            let reasoning = match (labels, result.deviation_direction) {
                (Some(l), DeviationDirection::Below) => l.low.to_string(),
                (Some(l), _) => l.high.to_string(),
                (None, _) => format!(
                    "Measured {:.2}{}, outside the ideal range {:.2}-{:.2}{}.",
                    result.value,
                    result.unit.symbol(),
                    result.ideal_min,
                    result.ideal_max,
                    result.unit.symbol(),
                ),
            };
            flaws.push(FlawAssessment {
                category: result.category.clone(),
                metric_id: result.metric_id.clone(),
                metric_name: result.name.clone(),
                severity: result.severity,
                deviation: format_deviation(result),
                reasoning,
                confidence,
            });
        } else if matches!(
            result.quality_tier,
            QualityTier::Ideal | QualityTier::Excellent
        ) {
            let reasoning = match labels {
                Some(l) => l.ideal.to_string(),
                None => format!(
                    "Measured {:.2}{}, within the ideal range {:.2}-{:.2}{}.",
                    result.value,
                    result.unit.symbol(),
                    result.ideal_min,
                    result.ideal_max,
                    result.unit.symbol(),
                ),
            };
            strengths.push(StrengthAssessment {
                category: result.category.clone(),
                metric_id: result.metric_id.clone(),
                metric_name: result.name.clone(),
                quality_tier: result.quality_tier,
                value: result.value,
                reasoning,
            });
        }
    }

    // Worst first / best first.
    flaws.sort_by(|a, b| b.severity.cmp(&a.severity));
    strengths.sort_by(|a, b| a.quality_tier.cmp(&b.quality_tier));
    (flaws, strengths)
}

fn format_deviation(result: &MetricScoreResult) -> String {
    let direction = match result.deviation_direction {
        DeviationDirection::Above => "above",
        DeviationDirection::Below => "below",
        DeviationDirection::Within => "within",
    };
    format!(
        "{:.2}{} {} ideal",
        result.deviation,
        result.unit.symbol(),
        direction
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MetricRegistry {
        MetricRegistry::builtin()
    }

    #[test]
    fn empty_landmarks_yield_empty_analysis() {
        let analysis = analyze(&registry(), &LandmarkSet::new(), &DemographicOptions::default());
        assert!(analysis.measurements.is_empty());
        assert_eq!(analysis.overall_score, 0.0);
        assert_eq!(analysis.front_score, 0.0);
        assert_eq!(analysis.side_score, 0.0);
        assert!(analysis.flaws.is_empty());
        assert!(analysis.strengths.is_empty());
        assert!(analysis.category_scores.is_empty());
    }

    #[test]
    fn front_only_input_drives_overall_from_front() {
        let landmarks = crate::data::sample_front_landmarks(7);
        let analysis = analyze(&registry(), &landmarks, &DemographicOptions::default());
        assert!(!analysis.measurements.is_empty());
        assert!(
            analysis
                .measurements
                .iter()
                .all(|m| m.profile == ProfileType::Front)
        );
        assert_eq!(analysis.side_score, 0.0);
        assert!((analysis.overall_score - analysis.front_score).abs() < 1e-12);
    }

    #[test]
    fn both_profiles_average_equally() {
        let mut landmarks = crate::data::sample_front_landmarks(7);
        landmarks.merge(crate::data::sample_side_landmarks(7));
        let analysis = analyze(&registry(), &landmarks, &DemographicOptions::default());
        assert!(analysis.front_score > 0.0);
        assert!(analysis.side_score > 0.0);
        let expected = (analysis.front_score + analysis.side_score) / 2.0;
        assert!((analysis.overall_score - expected).abs() < 1e-12);
    }

    #[test]
    fn at_most_one_assessment_per_metric() {
        let mut landmarks = crate::data::sample_front_landmarks(11);
        landmarks.merge(crate::data::sample_side_landmarks(11));
        let analysis = analyze(&registry(), &landmarks, &DemographicOptions::default());
        for m in &analysis.measurements {
            let flawed = analysis.flaws.iter().filter(|f| f.metric_id == m.metric_id).count();
            let strong = analysis
                .strengths
                .iter()
                .filter(|s| s.metric_id == m.metric_id)
                .count();
            assert!(flawed + strong <= 1, "{}", m.metric_id);
        }
    }

    #[test]
    fn soft_zone_metric_never_flaws() {
        // A canthal tilt in the safe zone below ideal must not appear as a
        // flaw even though it sits outside the ideal range.
        let registry = registry();
        let config = registry.get("lateralCanthalTilt").unwrap();
        let result = score_metric(config, 2.0, &DemographicOptions::default());
        assert_eq!(result.deviation_direction, DeviationDirection::Within);
        assert!(result.standardized_score >= config.soft_zone_score);
    }

    #[test]
    fn category_scores_cover_result_categories() {
        let landmarks = crate::data::sample_front_landmarks(3);
        let analysis = analyze(&registry(), &landmarks, &DemographicOptions::default());
        for m in &analysis.measurements {
            assert!(analysis.category_scores.contains_key(&m.category));
        }
    }

    #[test]
    fn missing_single_landmark_skips_only_dependent_metrics() {
        let mut landmarks = crate::data::sample_front_landmarks(7);
        let full = analyze(&registry(), &landmarks, &DemographicOptions::default());
        landmarks.remove("menton");
        let partial = analyze(&registry(), &landmarks, &DemographicOptions::default());
        assert!(partial.measurements.len() < full.measurements.len());
        assert!(!partial.measurements.is_empty());
        assert!(
            partial
                .measurements
                .iter()
                .all(|m| m.metric_id != "faceWidthToHeight")
        );
    }

    #[test]
    fn demographics_shift_scores_for_overridden_metrics() {
        let registry = registry();
        let config = registry.get("nasalIndex").unwrap();
        let default = score_metric(config, 80.0, &DemographicOptions::default());
        let adjusted = score_metric(
            config,
            80.0,
            &DemographicOptions {
                gender: None,
                ethnicity: Some(crate::domain::Ethnicity::Black),
            },
        );
        assert!(adjusted.standardized_score > default.standardized_score);
    }

    #[test]
    fn percentile_tracks_overall_score() {
        let mut landmarks = crate::data::sample_front_landmarks(5);
        landmarks.merge(crate::data::sample_side_landmarks(5));
        let analysis = analyze(&registry(), &landmarks, &DemographicOptions::default());
        assert!(analysis.percentile >= 0.0 && analysis.percentile <= 100.0);
        let table = AnchorTable::builtin();
        assert!((analysis.percentile - table.percentile(analysis.overall_score)).abs() < 1e-12);
    }

    #[test]
    fn analyze_is_bit_identical_across_calls() {
        let mut landmarks = crate::data::sample_front_landmarks(13);
        landmarks.merge(crate::data::sample_side_landmarks(13));
        let registry = registry();
        let a = analyze(&registry, &landmarks, &DemographicOptions::default());
        let b = analyze(&registry, &landmarks, &DemographicOptions::default());
        assert_eq!(a.overall_score.to_bits(), b.overall_score.to_bits());
        assert_eq!(a.percentile.to_bits(), b.percentile.to_bits());
        assert_eq!(a.measurements.len(), b.measurements.len());
        for (x, y) in a.measurements.iter().zip(&b.measurements) {
            assert_eq!(x.metric_id, y.metric_id);
            assert_eq!(x.standardized_score.to_bits(), y.standardized_score.to_bits());
            assert_eq!(x.deviation.to_bits(), y.deviation.to_bits());
        }
    }

    #[test]
    fn unused_landmark_noise_is_ignored() {
        let mut landmarks = crate::data::sample_front_landmarks(7);
        let baseline = analyze(&registry(), &landmarks, &DemographicOptions::default());
        landmarks.insert("ear_tag", 0.1, 0.1);
        let with_noise = analyze(&registry(), &landmarks, &DemographicOptions::default());
        assert_eq!(baseline.measurements.len(), with_noise.measurements.len());
        assert_eq!(baseline.overall_score, with_noise.overall_score);
    }
}
