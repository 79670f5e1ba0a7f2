//! Formatted terminal output for a completed analysis.
//!
//! We keep formatting code in one place so:
//! - scoring stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DemographicOptions, HarmonyAnalysis, MetricScoreResult};

/// Format the run header: overall scores, tier, percentile, categories.
pub fn format_run_summary(analysis: &HarmonyAnalysis, opts: &DemographicOptions) -> String {
    let mut out = String::new();

    out.push_str("=== harmony - Facial Harmony Analysis ===\n");
    out.push_str(&format!(
        "Demographics: gender={} ethnicity={}\n",
        opts.gender.map_or("unspecified", |g| g.display_name()),
        opts.ethnicity.map_or("unspecified", |e| e.display_name()),
    ));
    out.push_str(&format!(
        "Metrics scored: {} | flaws: {} | strengths: {}\n",
        analysis.measurements.len(),
        analysis.flaws.len(),
        analysis.strengths.len(),
    ));

    out.push_str(&format!(
        "\nOverall: {:.2}/10 ({}) | percentile {:.1}\n",
        analysis.overall_score,
        analysis.quality_tier.display_name(),
        analysis.percentile,
    ));
    out.push_str(&format!(
        "Front: {:.2} | Side: {:.2}\n",
        analysis.front_score, analysis.side_score,
    ));

    if !analysis.category_scores.is_empty() {
        out.push_str("\nCategory scores:\n");
        for (category, score) in &analysis.category_scores {
            out.push_str(&format!("  {:<14} {:.2}\n", category, score));
        }
    }

    out
}

/// Format the per-metric measurement table.
pub fn format_measurements(measurements: &[MetricScoreResult]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<28} {:>10} {:>14} {:>7} {:<14} {:<10}",
            "metric", "value", "ideal", "score", "tier", "severity"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<28} {:-<10} {:-<14} {:-<7} {:-<14} {:-<10}",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for m in measurements {
        let symbol = m.unit.symbol();
        out.push_str(
            format!(
                "{:<28} {:>10} {:>14} {:>7.2} {:<14} {:<10}",
                truncate(&m.name, 28),
                format!("{:.2}{symbol}", m.value),
                format!("{:.2}-{:.2}{symbol}", m.ideal_min, m.ideal_max),
                m.standardized_score,
                m.quality_tier.display_name(),
                m.severity.display_name(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the flaw and strength tables (top-N each).
pub fn format_assessments(analysis: &HarmonyAnalysis, top_n: usize) -> String {
    let mut out = String::new();

    out.push_str("Flaws (worst first):\n");
    if analysis.flaws.is_empty() {
        out.push_str("  none\n");
    }
    for f in analysis.flaws.iter().take(top_n) {
        out.push_str(&format!(
            "- {} [{}] {} ({}, {})\n",
            truncate(&f.metric_name, 28),
            f.category,
            f.deviation,
            f.severity.display_name(),
            f.confidence.display_name(),
        ));
        out.push_str(&format!("    {}\n", f.reasoning));
    }
    out.push('\n');

    out.push_str("Strengths (best first):\n");
    if analysis.strengths.is_empty() {
        out.push_str("  none\n");
    }
    for s in analysis.strengths.iter().take(top_n) {
        out.push_str(&format!(
            "- {} [{}] {:.2} ({})\n",
            truncate(&s.metric_name, 28),
            s.category,
            s.value,
            s.quality_tier.display_name(),
        ));
        out.push_str(&format!("    {}\n", s.reasoning));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
