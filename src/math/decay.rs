//! Analytic exponential-decay scoring model.
//!
//! Inside the ideal range the score is `max_score`; outside it decays toward
//! zero as `max_score * exp(-decay_rate * d)`, where `d` is the distance from
//! the nearest bound in the metric's native unit.
//!
//! A degenerate range (`min == max`) is handled by the same formula: an exact
//! match scores `max_score` and the decay is symmetric around the single
//! point.

use crate::domain::IdealRange;

/// Hard ceiling for any score on the 0–10 scale.
const SCORE_CAP: f64 = 10.0;

/// Score `value` against `ideal` with the exponential model.
///
/// The result is clamped to `[0, min(max_score, 10)]` and is monotonically
/// non-increasing in the distance from the range.
pub fn exponential_score(value: f64, ideal: IdealRange, decay_rate: f64, max_score: f64) -> f64 {
    let cap = max_score.min(SCORE_CAP).max(0.0);
    if !value.is_finite() {
        return 0.0;
    }

    let d = ideal.distance_outside(value);
    if d <= 0.0 {
        return cap;
    }

    (cap * (-decay_rate * d).exp()).clamp(0.0, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_scores_max() {
        let ideal = IdealRange::new(1.5, 1.8);
        assert_eq!(exponential_score(1.65, ideal, 2.0, 10.0), 10.0);
        // Bounds are inclusive.
        assert_eq!(exponential_score(1.5, ideal, 2.0, 10.0), 10.0);
        assert_eq!(exponential_score(1.8, ideal, 2.0, 10.0), 10.0);
    }

    #[test]
    fn decays_outside_range() {
        let ideal = IdealRange::new(1.5, 1.8);
        // d = 0.5, score = 10 * exp(-1) ≈ 3.679
        let s = exponential_score(2.3, ideal, 2.0, 10.0);
        assert!((s - 10.0 * (-1.0f64).exp()).abs() < 1e-12);
        assert!(s < 6.0);
    }

    #[test]
    fn monotone_in_distance() {
        let ideal = IdealRange::new(1.5, 1.8);
        let mut prev = exponential_score(1.8, ideal, 2.0, 10.0);
        for i in 1..50 {
            let s = exponential_score(1.8 + 0.05 * i as f64, ideal, 2.0, 10.0);
            assert!(s <= prev);
            prev = s;
        }
    }

    #[test]
    fn degenerate_range_decays_symmetrically() {
        let ideal = IdealRange::new(2.0, 2.0);
        assert_eq!(exponential_score(2.0, ideal, 1.5, 10.0), 10.0);
        let above = exponential_score(2.3, ideal, 1.5, 10.0);
        let below = exponential_score(1.7, ideal, 1.5, 10.0);
        assert!((above - below).abs() < 1e-12);
        assert!(above < 10.0);
    }

    #[test]
    fn max_score_is_capped() {
        let ideal = IdealRange::new(0.0, 1.0);
        assert_eq!(exponential_score(0.5, ideal, 1.0, 25.0), 10.0);
    }

    #[test]
    fn non_finite_value_scores_zero() {
        let ideal = IdealRange::new(0.0, 1.0);
        assert_eq!(exponential_score(f64::NAN, ideal, 1.0, 10.0), 0.0);
    }
}
