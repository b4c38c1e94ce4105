//! fxgap: gap and spread analysis of a minute-bar FX history export
//!
//!   fxgap --input data/EURUSD_M1_2023.csv
//!   fxgap --config fxgap.toml --threshold 720 --output ./output/eurusd

use clap::Parser;
use fxgap::config::{CliConfigMerge, Settings};
use fxgap::core::types::PIPETTES_PER_PIP;
use fxgap::pipeline;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fxgap",
    about = "Detect gaps and describe spread seasonality in minute-bar FX quotes",
    long_about = "
Loads a tab-separated quote history export (date, time, open, high, low, close,
tickvol, vol, spread), classifies the intervals between consecutive bars into
regular samples, missing-data gaps and market closures, and aggregates the
spread by value, hour of day and hour of week.

Outputs one x,y CSV series per chart plus a JSON summary in the output
directory.

Configuration precedence: CLI flags > FXGAP_* environment > config file > defaults.
Set RUST_LOG to override the log filter.
",
    version
)]
struct Args {
    /// Quote history export (tab-separated)
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// TOML configuration file (default: ./fxgap.toml when present)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Long-gap threshold in minutes separating closures from missing data
    #[arg(short = 't', long, value_name = "MINUTES")]
    threshold: Option<i64>,

    /// Output directory for chart series and the summary
    #[arg(short = 'o', long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Skip chart series, write the summary only
    #[arg(long)]
    no_charts: bool,
}

impl CliConfigMerge for Args {
    fn merge_into_config(&self, config: &mut Settings) {
        if let Some(input) = &self.input {
            config.data.input_path = Some(input.clone());
        }
        if let Some(threshold) = self.threshold {
            config.analysis.long_gap_threshold_minutes = threshold;
        }
        if let Some(output) = &self.output {
            config.export.output_dir = output.clone();
        }
        if self.no_charts {
            config.export.write_charts = false;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load()?,
    }
    .merge_cli_args(&args);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(settings.app.filter_directive()))?,
        )
        .init();

    let outcome = pipeline::run(&settings)?;
    let report = &outcome.report;
    let gaps = &report.gaps;
    let spread = &report.spread.summary;

    info!(
        quotes = report.quote_count,
        first = ?report.first_timestamp,
        last = ?report.last_timestamp,
        "dataset"
    );
    info!(
        threshold_minutes = gaps.threshold_minutes,
        expected = gaps.counts.expected,
        exact = gaps.counts.exact,
        anomalous = gaps.counts.anomalous,
        duplicates = gaps.counts.duplicates,
        "gaps"
    );
    info!("anomaly rate: {:.4}% of intervals", gaps.anomaly_rate_pct);
    info!(
        min = spread.min,
        max = spread.max,
        mean = spread.mean,
        median = spread.median,
        mean_pips = spread.mean / PIPETTES_PER_PIP as f64,
        "spread (pipettes)"
    );
    for threshold in &report.spread.percentiles {
        match threshold.spread {
            Some(value) => info!(p = threshold.p, spread = value, "spread threshold"),
            None => info!(p = threshold.p, "spread threshold: none below target"),
        }
    }
    for file in &outcome.chart_files {
        info!(chart = %file.name, rows = file.rows, path = %file.path.display(), "chart");
    }
    if let Some(path) = &outcome.summary_path {
        info!(path = %path.display(), "summary");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let args = Args::parse_from([
            "fxgap",
            "--input",
            "EURUSD_M1.csv",
            "--threshold",
            "720",
            "--output",
            "out",
            "--no-charts",
        ]);
        let settings = Settings::default().merge_cli_args(&args);

        assert_eq!(settings.data.input_path, Some(PathBuf::from("EURUSD_M1.csv")));
        assert_eq!(settings.analysis.long_gap_threshold_minutes, 720);
        assert_eq!(settings.export.output_dir, PathBuf::from("out"));
        assert!(!settings.export.write_charts);
    }

    #[test]
    fn test_cli_defaults_leave_settings_untouched() {
        let args = Args::parse_from(["fxgap"]);
        let settings = Settings::default().merge_cli_args(&args);

        assert_eq!(settings.data.input_path, None);
        assert_eq!(settings.analysis.long_gap_threshold_minutes, 500);
        assert!(settings.export.write_charts);
    }
}
