//! ASCII plotting of scoring curves for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - scoring curve: `-` line
//! - ideal range band: `|` columns at the band edges
//! - measured value: `X` marker on the curve

use crate::adapter::display_curve;
use crate::domain::{IdealRange, MetricConfig};

/// Render a metric's scoring curve with its ideal band, optionally marking a
/// measured value.
pub fn render_metric_curve(
    config: &MetricConfig,
    range: IdealRange,
    value: Option<f64>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let x_min = config.range_min;
    let x_max = config.range_max;
    let curve = display_curve(config);

    // Score axis is always 0..10.
    let (y_min, y_max) = (0.0, 10.0);

    let mut grid = vec![vec![' '; width]; height];

    for xb in [range.min, range.max] {
        if xb >= x_min && xb <= x_max {
            let col = map_x(xb, x_min, x_max, width);
            for row in grid.iter_mut() {
                if row[col] == ' ' {
                    row[col] = '|';
                }
            }
        }
    }

    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    if let Some(v) = value {
        if v.is_finite() {
            let score = crate::scoring::curve::evaluate(v, config, range);
            let x = map_x(v, x_min, x_max, width);
            let y = map_y(score, y_min, y_max, height);
            grid[y][x] = 'X';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}: value=[{x_min:.2}, {x_max:.2}]{} | score=[0, 10] | ideal=[{:.2}, {:.2}]\n",
        config.name,
        config.unit.symbol(),
        range.min,
        range.max,
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // score=max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = '-';

        // Fill vertical gaps between consecutive samples.
        if let Some((_, prev_row)) = prev {
            let (lo, hi) = if prev_row < row {
                (prev_row, row)
            } else {
                (row, prev_row)
            };
            for r in lo + 1..hi {
                if grid[r][col] == ' ' || grid[r][col] == '|' {
                    grid[r][col] = '-';
                }
            }
        }
        prev = Some((col, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetricRegistry;

    #[test]
    fn plot_has_requested_dimensions() {
        let registry = MetricRegistry::builtin();
        let config = registry.get("faceWidthToHeight").unwrap();
        let text = render_metric_curve(config, config.ideal, Some(1.65), 60, 15);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[1..].iter().all(|l| l.chars().count() <= 60));
    }

    #[test]
    fn marker_appears_for_in_range_value() {
        let registry = MetricRegistry::builtin();
        let config = registry.get("faceWidthToHeight").unwrap();
        let text = render_metric_curve(config, config.ideal, Some(1.65), 60, 15);
        assert!(text.contains('X'));
    }

    #[test]
    fn ideal_band_edges_are_drawn() {
        let registry = MetricRegistry::builtin();
        let config = registry.get("gonialAngle").unwrap();
        let text = render_metric_curve(config, config.ideal, None, 60, 15);
        assert!(text.contains('|'));
        assert!(!text.contains('X'));
    }

    #[test]
    fn identical_inputs_render_identically() {
        let registry = MetricRegistry::builtin();
        let config = registry.get("lowerUpperLipRatio").unwrap();
        let a = render_metric_curve(config, config.ideal, Some(1.6), 70, 18);
        let b = render_metric_curve(config, config.ideal, Some(1.6), 70, 18);
        assert_eq!(a, b);
    }
}
