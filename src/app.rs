//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - loads or generates landmarks
//! - runs the analysis
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{AnalyzeArgs, Command, CurveArgs, SampleArgs};
use crate::domain::{DemographicOptions, RunConfig};
use crate::error::AppError;
use crate::registry::MetricRegistry;

pub mod pipeline;

/// Entry point for the `harmony` binary.
pub fn run() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Sample(args) => handle_sample(args),
        Command::Curve(args) => handle_curve(args),
        Command::Metrics => handle_metrics(),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    if args.front.is_none() && args.side.is_none() {
        return Err(AppError::new(2, "Provide --front and/or --side landmark files."));
    }

    let config = RunConfig {
        front_path: args.front,
        side_path: args.side,
        gender: args.demographics.gender,
        ethnicity: args.demographics.ethnicity,
        top_n: args.report.top,
        plot_metric: args.report.plot_metric,
        plot_width: args.report.width,
        plot_height: args.report.height,
        export_path: args.report.export,
    };

    let run = pipeline::run_analysis(&config)?;
    print_report(&run, &config)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let mut landmarks = crate::data::sample_front_landmarks(args.seed);
    if !args.front_only {
        landmarks.merge(crate::data::sample_side_landmarks(args.seed));
    }

    if let Some(prefix) = &args.write_landmarks {
        pipeline::write_landmark_files(prefix, args.seed, args.front_only)?;
    }

    let config = RunConfig {
        front_path: None,
        side_path: None,
        gender: args.demographics.gender,
        ethnicity: args.demographics.ethnicity,
        top_n: args.report.top,
        plot_metric: args.report.plot_metric,
        plot_width: args.report.width,
        plot_height: args.report.height,
        export_path: args.report.export,
    };

    let run = pipeline::run_analysis_with_landmarks(&config, landmarks);
    print_report(&run, &config)
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let registry = MetricRegistry::global();
    let config = registry.get(&args.metric)?;
    let opts = DemographicOptions {
        gender: args.demographics.gender,
        ethnicity: args.demographics.ethnicity,
    };
    let range = crate::scoring::demographics::resolve(config, &opts);

    let plot = crate::plot::render_metric_curve(config, range, args.value, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_metrics() -> Result<(), AppError> {
    let registry = MetricRegistry::global();
    println!(
        "{:<26} {:<30} {:<12} {:>14} {:>5} {:<6} {:<17} {:>6}",
        "id", "name", "category", "ideal", "unit", "side", "polarity", "weight"
    );
    for m in registry.iter() {
        println!(
            "{:<26} {:<30} {:<12} {:>14} {:>5} {:<6} {:<17} {:>6.2}",
            m.id,
            m.name,
            m.category,
            format!("{:.2}-{:.2}", m.ideal.min, m.ideal.max),
            m.unit.symbol(),
            m.profile.display_name(),
            m.polarity.display_name(),
            m.weight,
        );
    }
    Ok(())
}

fn print_report(run: &pipeline::RunOutput, config: &RunConfig) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_summary(&run.analysis, &run.opts));
    println!("{}", crate::report::format_measurements(&run.analysis.measurements));
    println!("{}", crate::report::format_assessments(&run.analysis, config.top_n));

    if let Some(metric_id) = &config.plot_metric {
        let registry = MetricRegistry::global();
        let metric = registry.get(metric_id)?;
        let range = crate::scoring::demographics::resolve(metric, &run.opts);
        let value = run
            .analysis
            .measurements
            .iter()
            .find(|m| &m.metric_id == metric_id)
            .map(|m| m.value);
        let plot = crate::plot::render_metric_curve(
            metric,
            range,
            value,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_path {
        crate::io::export::write_analysis_json(path, &run.analysis, &run.opts)?;
        println!("Wrote analysis JSON: {}", path.display());
    }

    Ok(())
}
