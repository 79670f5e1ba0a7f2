//! Data-driven measurement functions.
//!
//! Each metric's raw value is computed from landmark coordinates by one of a
//! small set of geometric primitives. Describing the computation as data
//! (rather than a closure per metric) keeps the registry table declarative,
//! makes required landmarks derivable, and keeps geometry in one place.
//!
//! Coordinates are normalized image-relative with y growing downward; `Tilt`
//! accounts for that so a positive tilt means the segment rises on screen.

use nalgebra::Vector2;

use crate::landmarks::LandmarkSet;

/// Minimum segment length treated as non-degenerate. Normalized coordinates
/// live in [0, 1], so anything shorter is landmark-detection noise.
const MIN_SEGMENT_LEN: f64 = 1e-9;

/// How a metric's raw value is derived from landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Distance(num) / Distance(den).
    Ratio {
        num: (&'static str, &'static str),
        den: (&'static str, &'static str),
    },
    /// Distance(num) / Distance(den) × 100.
    Percent {
        num: (&'static str, &'static str),
        den: (&'static str, &'static str),
    },
    /// Interior angle at `vertex` between rays toward `a` and `b`, degrees.
    Angle {
        a: &'static str,
        vertex: &'static str,
        b: &'static str,
    },
    /// Unsigned angle between segments `a` and `b`, degrees in [0, 90].
    SegmentsAngle {
        a: (&'static str, &'static str),
        b: (&'static str, &'static str),
    },
    /// Signed inclination of the segment `from → to` against the horizontal,
    /// degrees; positive when `to` sits above `from` on screen.
    Tilt {
        from: &'static str,
        to: &'static str,
    },
}

impl Measure {
    /// Landmark ids this measurement reads. A metric is skipped silently
    /// when any of these are absent from the input set.
    pub fn required_landmarks(&self) -> Vec<&'static str> {
        match *self {
            Measure::Ratio { num, den } | Measure::Percent { num, den } => {
                vec![num.0, num.1, den.0, den.1]
            }
            Measure::Angle { a, vertex, b } => vec![a, vertex, b],
            Measure::SegmentsAngle { a, b } => vec![a.0, a.1, b.0, b.1],
            Measure::Tilt { from, to } => vec![from, to],
        }
    }

    /// Compute the raw value, or `None` when landmarks are missing or the
    /// geometry degenerates (coincident points).
    pub fn evaluate(&self, landmarks: &LandmarkSet) -> Option<f64> {
        match *self {
            Measure::Ratio { num, den } => {
                let n = segment_length(landmarks, num)?;
                let d = segment_length(landmarks, den)?;
                if d < MIN_SEGMENT_LEN {
                    return None;
                }
                Some(n / d)
            }
            Measure::Percent { num, den } => {
                let n = segment_length(landmarks, num)?;
                let d = segment_length(landmarks, den)?;
                if d < MIN_SEGMENT_LEN {
                    return None;
                }
                Some(100.0 * n / d)
            }
            Measure::Angle { a, vertex, b } => {
                let v = landmarks.get(vertex)?;
                let va = landmarks.get(a)? - v;
                let vb = landmarks.get(b)? - v;
                angle_between(va, vb)
            }
            Measure::SegmentsAngle { a, b } => {
                let va = segment_vector(landmarks, a)?;
                let vb = segment_vector(landmarks, b)?;
                // Segments are undirected; fold into [0, 90].
                let deg = angle_between(va, vb)?;
                Some(if deg > 90.0 { 180.0 - deg } else { deg })
            }
            Measure::Tilt { from, to } => {
                let p0 = landmarks.get(from)?;
                let p1 = landmarks.get(to)?;
                let dx = p1.x - p0.x;
                let dy = p0.y - p1.y; // flip: image y grows downward
                if dx.abs() < MIN_SEGMENT_LEN && dy.abs() < MIN_SEGMENT_LEN {
                    return None;
                }
                Some(dy.atan2(dx.abs()).to_degrees())
            }
        }
    }
}

fn segment_vector(
    landmarks: &LandmarkSet,
    (a, b): (&'static str, &'static str),
) -> Option<Vector2<f64>> {
    let pa = landmarks.get(a)?;
    let pb = landmarks.get(b)?;
    Some(pb - pa)
}

fn segment_length(landmarks: &LandmarkSet, seg: (&'static str, &'static str)) -> Option<f64> {
    segment_vector(landmarks, seg).map(|v| v.norm())
}

/// Unsigned angle between two vectors in degrees, `None` when either is
/// degenerate.
fn angle_between(a: Vector2<f64>, b: Vector2<f64>) -> Option<f64> {
    let (na, nb) = (a.norm(), b.norm());
    if na < MIN_SEGMENT_LEN || nb < MIN_SEGMENT_LEN {
        return None;
    }
    let cos = (a.dot(&b) / (na * nb)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_set() -> LandmarkSet {
        let mut set = LandmarkSet::new();
        set.insert("tl", 0.0, 0.0);
        set.insert("tr", 1.0, 0.0);
        set.insert("bl", 0.0, 1.0);
        set.insert("br", 1.0, 1.0);
        set.insert("mid", 0.5, 0.5);
        set
    }

    #[test]
    fn ratio_of_square_sides_is_one() {
        let m = Measure::Ratio {
            num: ("tl", "tr"),
            den: ("tl", "bl"),
        };
        let v = m.evaluate(&square_set()).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn percent_scales_by_hundred() {
        let m = Measure::Percent {
            num: ("tl", "mid"),
            den: ("tl", "br"),
        };
        let v = m.evaluate(&square_set()).unwrap();
        assert!((v - 50.0).abs() < 1e-9);
    }

    #[test]
    fn right_angle_at_corner() {
        let m = Measure::Angle {
            a: "tr",
            vertex: "tl",
            b: "bl",
        };
        let v = m.evaluate(&square_set()).unwrap();
        assert!((v - 90.0).abs() < 1e-9);
    }

    #[test]
    fn segments_angle_folds_to_acute() {
        let m = Measure::SegmentsAngle {
            a: ("tl", "tr"),
            b: ("br", "tl"), // diagonal, pointing "backwards"
        };
        let v = m.evaluate(&square_set()).unwrap();
        assert!((v - 45.0).abs() < 1e-9);
    }

    #[test]
    fn tilt_is_positive_when_rising_on_screen() {
        let mut set = LandmarkSet::new();
        set.insert("inner", 0.3, 0.5);
        set.insert("outer", 0.4, 0.4); // higher on screen (smaller y)
        let m = Measure::Tilt {
            from: "inner",
            to: "outer",
        };
        let v = m.evaluate(&set).unwrap();
        assert!((v - 45.0).abs() < 1e-9);
    }

    #[test]
    fn missing_landmark_yields_none() {
        let m = Measure::Ratio {
            num: ("tl", "tr"),
            den: ("tl", "nope"),
        };
        assert!(m.evaluate(&square_set()).is_none());
    }

    #[test]
    fn degenerate_denominator_yields_none() {
        let mut set = square_set();
        set.insert("dup", 0.0, 0.0);
        let m = Measure::Ratio {
            num: ("tl", "tr"),
            den: ("tl", "dup"),
        };
        assert!(m.evaluate(&set).is_none());
    }

    #[test]
    fn required_landmarks_match_variant() {
        let m = Measure::Angle {
            a: "tr",
            vertex: "tl",
            b: "bl",
        };
        assert_eq!(m.required_landmarks(), vec!["tr", "tl", "bl"]);
    }
}
