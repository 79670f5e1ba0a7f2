//! Piecewise cubic-Bezier curve evaluation.
//!
//! A custom scoring curve is an ordered sequence of control points mapping the
//! measured-value domain (x) to the score range [0, 10] (y). Adjacent points
//! define one cubic segment; optional tangent handles shape it, and a missing
//! handle degrades that end of the segment toward a straight line.
//!
//! Numerical notes:
//! - Handle x-coordinates are clamped into the segment's `[x0, x1]` span so
//!   `x(t)` stays (weakly) monotonic and invertible by bisection.
//! - Out-of-domain inputs clamp to the curve's edge values (no extrapolation).

use crate::domain::CurvePoint;

/// Bisection iteration budget; 48 halvings put the parameter error far below
/// f64 noise for any realistic domain width.
const SOLVE_ITERS: usize = 48;

/// Validate control points for use as a scoring curve.
///
/// Requirements: at least two points, strictly increasing x, finite
/// coordinates and handles, y within [0, 10].
pub fn validate_curve_points(points: &[CurvePoint]) -> Result<(), String> {
    if points.len() < 2 {
        return Err("curve needs at least two control points".to_string());
    }
    for (i, p) in points.iter().enumerate() {
        let handles = [
            p.left_handle_x,
            p.left_handle_y,
            p.right_handle_x,
            p.right_handle_y,
        ];
        if !(p.x.is_finite() && p.y.is_finite())
            || handles.iter().flatten().any(|h| !h.is_finite())
        {
            return Err(format!("control point {i} has non-finite coordinates"));
        }
        if !(0.0..=10.0).contains(&p.y) {
            return Err(format!("control point {i} has score outside [0, 10]"));
        }
        if i > 0 && p.x <= points[i - 1].x {
            return Err(format!("control point {i} breaks strictly increasing x order"));
        }
    }
    Ok(())
}

/// Evaluate the piecewise curve at `x`.
///
/// Callers must have validated `points` first; evaluation itself never fails.
/// Inputs outside `[first.x, last.x]` return the edge point's score.
pub fn eval_piecewise(points: &[CurvePoint], x: f64) -> f64 {
    let first = &points[0];
    let last = &points[points.len() - 1];
    if x <= first.x {
        return first.y.clamp(0.0, 10.0);
    }
    if x >= last.x {
        return last.y.clamp(0.0, 10.0);
    }

    // Find the segment containing x. Control point counts are tiny (< 10),
    // so a linear scan beats anything cleverer.
    let mut seg = 0;
    for i in 0..points.len() - 1 {
        if x >= points[i].x && x <= points[i + 1].x {
            seg = i;
            break;
        }
    }

    let (p0, p3) = (&points[seg], &points[seg + 1]);
    let third = (p3.x - p0.x) / 3.0;

    // Default handles produce a straight segment; explicit handles are
    // clamped into the segment span to keep x(t) invertible.
    let c1x = p0
        .right_handle_x
        .unwrap_or(p0.x + third)
        .clamp(p0.x, p3.x);
    let c1y = p0.right_handle_y.unwrap_or(p0.y + (p3.y - p0.y) / 3.0);
    let c2x = p3.left_handle_x.unwrap_or(p3.x - third).clamp(p0.x, p3.x);
    let c2y = p3.left_handle_y.unwrap_or(p3.y - (p3.y - p0.y) / 3.0);

    let t = solve_t(p0.x, c1x, c2x, p3.x, x);
    cubic(p0.y, c1y, c2y, p3.y, t).clamp(0.0, 10.0)
}

/// Evaluate the cubic Bernstein form at parameter `t`.
fn cubic(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * a + 3.0 * u * u * t * b + 3.0 * u * t * t * c + t * t * t * d
}

/// Solve `x(t) = target` for `t ∈ [0, 1]` by bisection.
fn solve_t(x0: f64, c1x: f64, c2x: f64, x3: f64, target: f64) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..SOLVE_ITERS {
        let mid = 0.5 * (lo + hi);
        if cubic(x0, c1x, c2x, x3, mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Sample a validated curve into `n` evenly spaced `(x, y)` pairs.
///
/// Used by presentation adapters and the ASCII plot; never by scoring.
pub fn sample_curve(points: &[CurvePoint], n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let x0 = points[0].x;
    let x1 = points[points.len() - 1].x;
    (0..n)
        .map(|i| {
            let x = x0 + (x1 - x0) * (i as f64) / ((n - 1) as f64);
            (x, eval_piecewise(points, x))
        })
        .collect()
}
