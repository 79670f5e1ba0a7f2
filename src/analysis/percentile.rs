//! Percentile estimation from a population reference curve.
//!
//! The reference distribution is supplied as a monotonic anchor table mapping
//! overall score to population percentile; between anchors we interpolate
//! linearly. Callers with their own population data can pass any
//! [`PercentileLookup`] instead.

/// Maps a 0-10 overall score to a 0-100 population percentile.
pub trait PercentileLookup: Sync {
    fn percentile(&self, score: f64) -> f64;
}

/// Piecewise-linear lookup over `(score, percentile)` anchors.
///
/// Anchors must be sorted by score with non-decreasing percentiles; the
/// builtin table satisfies this by construction.
#[derive(Debug, Clone)]
pub struct AnchorTable {
    anchors: Vec<(f64, f64)>,
}

impl AnchorTable {
    pub fn new(anchors: Vec<(f64, f64)>) -> Self {
        debug_assert!(anchors.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 <= w[1].1));
        Self { anchors }
    }

    /// Reference distribution for the general population.
    pub fn builtin() -> Self {
        Self::new(vec![
            (0.0, 0.0),
            (3.0, 2.0),
            (4.0, 8.0),
            (5.0, 20.0),
            (6.0, 40.0),
            (7.0, 65.0),
            (7.5, 78.0),
            (8.0, 88.0),
            (8.5, 95.0),
            (9.0, 98.5),
            (9.5, 99.7),
            (10.0, 100.0),
        ])
    }
}

impl PercentileLookup for AnchorTable {
    fn percentile(&self, score: f64) -> f64 {
        let anchors = &self.anchors;
        if anchors.is_empty() || !score.is_finite() {
            return 0.0;
        }
        if score <= anchors[0].0 {
            return anchors[0].1;
        }
        if score >= anchors[anchors.len() - 1].0 {
            return anchors[anchors.len() - 1].1;
        }
        for w in anchors.windows(2) {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            if score <= x1 {
                let t = (score - x0) / (x1 - x0);
                return y0 + t * (y1 - y0);
            }
        }
        anchors[anchors.len() - 1].1
    }
}
