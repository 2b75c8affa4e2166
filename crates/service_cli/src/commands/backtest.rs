//! Backtest command implementation
//!
//! Reads a CSV table of daily observations, runs the realized-outcome
//! backtest and reports error metrics by volatility regime.

use std::io::{Read, Write};
use std::path::Path;

use clap::Args;
use pricer_models::instruments::DecisionRule;
use pricer_validation::backtest::{run_backtest, BacktestConfig, BacktestReport};
use pricer_validation::metrics::ErrorMetrics;
use pricer_validation::observation::MarketObservation;
use pricer_validation::regime::RegimeSummary;
use tracing::info;

use super::{fmt_mape, fmt_opt, open_output, OutputFormat};
use crate::{CliError, Result};

/// Arguments of `chooser backtest`.
#[derive(Debug, Clone, Args)]
pub struct BacktestArgs {
    /// Observation table (CSV with a header row)
    #[arg(short, long)]
    pub input: String,

    /// Number of Monte Carlo paths per date (defaults to the config file)
    #[arg(short = 'n', long)]
    pub num_paths: Option<usize>,

    /// Base seed (defaults to the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Decision rule: naive or parity (defaults to the config file)
    #[arg(long)]
    pub rule: Option<String>,

    /// Trading days to the decision date
    #[arg(long)]
    pub t1_days: Option<usize>,

    /// Trading days to maturity
    #[arg(long)]
    pub t2_days: Option<usize>,

    /// Output format (json, csv, table)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

impl BacktestArgs {
    /// Applies command line overrides on top of the configured settings.
    pub fn resolve(&self, defaults: &BacktestConfig) -> Result<BacktestConfig> {
        let mut config = defaults.clone();
        if let Some(rule) = &self.rule {
            config.rule = rule.parse::<DecisionRule>().map_err(CliError::InvalidArgument)?;
        }
        if let Some(n_paths) = self.num_paths {
            config.n_paths = n_paths;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(t1_days) = self.t1_days {
            config.t1_days = t1_days;
        }
        if let Some(t2_days) = self.t2_days {
            config.t2_days = t2_days;
        }
        Ok(config)
    }
}

/// Parses an observation table from any reader.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<MarketObservation>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<MarketObservation>, csv::Error>>()?;
    Ok(rows)
}

/// Run the backtest command
pub fn run(args: &BacktestArgs, defaults: &BacktestConfig) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;
    let config = args.resolve(defaults)?;

    info!("Starting backtest...");
    info!("  Input: {}", args.input);
    info!("  Horizon: {} / {} trading days", config.t1_days, config.t2_days);
    info!("  Monte Carlo paths: {}", config.n_paths);
    info!("  Rule: {}", config.rule);
    info!("  Output format: {}", format);

    if !Path::new(&args.input).exists() {
        return Err(CliError::FileNotFound(args.input.clone()));
    }

    let observations = read_observations(std::fs::File::open(&args.input)?)?;
    info!("Loaded {} observations", observations.len());

    let report = run_backtest(&observations, &config)?;

    let mut out = open_output(args.output.as_deref())?;
    render(&report, format, &mut out)?;
    out.flush()?;

    info!("Backtest complete");
    Ok(())
}

/// Writes `report` in the requested format.
///
/// CSV carries the per-date rows; JSON the whole report; the table the
/// aggregate metrics only.
pub fn render<W: Write>(report: &BacktestReport, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &report.rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let first = report.rows.first().map(|r| r.date.to_string());
            let last = report.rows.last().map(|r| r.date.to_string());
            writeln!(
                out,
                "\nValuation dates: {} ({} to {})",
                report.rows.len(),
                first.unwrap_or_default(),
                last.unwrap_or_default()
            )?;

            writeln!(out, "\n┌──────────┬──────────────┬───────┬────────────┬────────────┬────────────┐")?;
            writeln!(
                out,
                "│ {:<8} │ {:<12} │ {:>5} │ {:>10} │ {:>10} │ {:>10} │",
                "Model", "Regime", "Count", "MAE", "RMSE", "MAPE"
            )?;
            writeln!(out, "├──────────┼──────────────┼───────┼────────────┼────────────┼────────────┤")?;
            write_overall(out, "MC", report.rows.len(), Some(&report.mc_overall))?;
            write_regimes(out, "MC", &report.mc_by_regime)?;
            let analytic_count: usize = report.analytic_by_regime.iter().map(|s| s.count).sum();
            write_overall(out, "Closed", analytic_count, report.analytic_overall.as_ref())?;
            write_regimes(out, "Closed", &report.analytic_by_regime)?;
            writeln!(out, "└──────────┴──────────────┴───────┴────────────┴────────────┴────────────┘")?;
        }
    }
    Ok(())
}

fn write_overall<W: Write>(
    out: &mut W,
    model: &str,
    count: usize,
    metrics: Option<&ErrorMetrics>,
) -> std::io::Result<()> {
    writeln!(
        out,
        "│ {:<8} │ {:<12} │ {:>5} │ {:>10} │ {:>10} │ {:>10} │",
        model,
        "all",
        count,
        fmt_opt(metrics.map(|m| m.mae), 4),
        fmt_opt(metrics.map(|m| m.rmse), 4),
        metrics.map(|m| fmt_mape(m.mape)).unwrap_or_else(|| "n/a".to_string())
    )
}

fn write_regimes<W: Write>(
    out: &mut W,
    model: &str,
    summaries: &[RegimeSummary],
) -> std::io::Result<()> {
    for s in summaries {
        writeln!(
            out,
            "│ {:<8} │ {:<12} │ {:>5} │ {:>10.4} │ {:>10.4} │ {:>10} │",
            model,
            s.regime,
            s.count,
            s.mae,
            s.rmse,
            fmt_mape(s.mape)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
date, close_price, risk_free_rate, dividend_yield_proxy, volatility_estimate, vix_level
2024-05-01, 100.0, 0.05, 0.01, 0.20, 14.0
2024-05-02, 101.2, 0.05, 0.01, 0.20, 15.5
2024-05-03, 99.8,  0.05, 0.01, 0.22, 31.0
2024-05-06, 98.1,  0.05, 0.01, 0.25, 34.2
2024-05-07, 100.4, 0.05, 0.01, 0.23, 22.0
2024-05-08, 102.9, 0.05, 0.01, 0.21, 18.3
";

    fn args() -> BacktestArgs {
        BacktestArgs {
            input: "unused.csv".to_string(),
            num_paths: Some(2_000),
            seed: Some(3),
            rule: None,
            t1_days: Some(1),
            t2_days: Some(2),
            format: "table".to_string(),
            output: None,
        }
    }

    #[test]
    fn test_read_observations_trims_whitespace() {
        let obs = read_observations(TABLE.as_bytes()).unwrap();
        assert_eq!(obs.len(), 6);
        assert_eq!(obs[2].close_price, 99.8);
        assert_eq!(obs[3].vix_level, 34.2);
    }

    #[test]
    fn test_read_observations_rejects_bad_date() {
        let bad = "date,close_price,risk_free_rate,dividend_yield_proxy,volatility_estimate,vix_level\n\
                   01/05/2024,100,0.05,0.01,0.2,14\n";
        assert!(matches!(read_observations(bad.as_bytes()), Err(CliError::Csv(_))));
    }

    #[test]
    fn test_resolve_overrides() {
        let config = args().resolve(&BacktestConfig::default()).unwrap();
        assert_eq!(config.n_paths, 2_000);
        assert_eq!(config.seed, 3);
        assert_eq!(config.t1_days, 1);
        assert_eq!(config.t2_days, 2);
        assert_eq!(config.rule, BacktestConfig::default().rule);

        let mut a = args();
        a.rule = Some("sideways".to_string());
        assert!(matches!(
            a.resolve(&BacktestConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_render_formats() {
        let obs = read_observations(TABLE.as_bytes()).unwrap();
        let config = args().resolve(&BacktestConfig::default()).unwrap();
        let report = run_backtest(&obs, &config).unwrap();
        assert_eq!(report.rows.len(), 4);

        let mut csv_out = Vec::new();
        render(&report, OutputFormat::Csv, &mut csv_out).unwrap();
        let text = String::from_utf8(csv_out).unwrap();
        // Header plus one line per date
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().starts_with("date,spot,strike"));
        assert!(text.contains("high_vol"));

        let mut json = Vec::new();
        render(&report, OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);

        let mut table = Vec::new();
        render(&report, OutputFormat::Table, &mut table).unwrap();
        let text = String::from_utf8(table).unwrap();
        assert!(text.contains("Valuation dates: 4 (2024-05-01 to 2024-05-06)"));
        assert!(text.contains("normal_vol"));
    }

    #[test]
    fn test_missing_input_is_file_not_found() {
        let mut a = args();
        a.input = "/definitely/not/here.csv".to_string();
        assert!(matches!(
            run(&a, &BacktestConfig::default()),
            Err(CliError::FileNotFound(_))
        ));
    }
}
