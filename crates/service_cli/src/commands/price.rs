//! Price command implementation
//!
//! Values a single chooser by Monte Carlo and, where it is defined, by the
//! Rubinstein closed form.

use std::io::Write;

use clap::Args;
use pricer_core::types::PricingError;
use pricer_models::analytical::{rubinstein_decomposition, AnalyticalError, ChooserDecomposition};
use pricer_models::instruments::{ChooserParams, DecisionRule};
use pricer_pricing::mc::{price_chooser_mc, ChooserPricingResult};
use serde::Serialize;
use tracing::{info, warn};

use super::{fmt_opt, open_output, OutputFormat};
use crate::config::PricingSettings;
use crate::{CliError, Result};

/// Arguments of `chooser price`.
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike shared by both legs
    #[arg(long)]
    pub strike: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dividend: f64,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: f64,

    /// Decision time in years
    #[arg(long)]
    pub t1: f64,

    /// Maturity in years
    #[arg(long)]
    pub t2: f64,

    /// Number of Monte Carlo paths (defaults to the config file)
    #[arg(short = 'n', long)]
    pub num_paths: Option<usize>,

    /// Random seed (defaults to the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Decision rule: naive or parity (defaults to the config file)
    #[arg(long)]
    pub rule: Option<String>,

    /// Output format (json, csv, table)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Flat summary of one valuation, shared by every output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike shared by both legs.
    pub strike: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Continuous dividend yield.
    pub dividend: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Decision time in years.
    pub t1: f64,
    /// Maturity in years.
    pub t2: f64,
    /// Decision rule used by the simulation.
    pub rule: DecisionRule,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Seed of the run, drawn from entropy when none was given.
    pub seed: u64,
    /// Monte Carlo price.
    pub mc_price: f64,
    /// Standard error of the Monte Carlo price.
    pub mc_std_error: f64,
    /// Lower end of the 95% confidence interval.
    pub ci95_lower: f64,
    /// Upper end of the 95% confidence interval.
    pub ci95_upper: f64,
    /// Fraction of paths on which the call was chosen.
    pub call_ratio: f64,
    /// Rubinstein price, absent when the closed form is singular.
    pub analytic_price: Option<f64>,
    /// Call leg of the Rubinstein decomposition.
    pub analytic_call_leg: Option<f64>,
    /// Discounted put leg of the Rubinstein decomposition.
    pub analytic_put_leg: Option<f64>,
}

impl PriceSummary {
    fn new(
        params: &ChooserParams,
        rule: DecisionRule,
        mc: &ChooserPricingResult,
        analytic: Option<ChooserDecomposition>,
    ) -> Self {
        let half_width = mc.confidence_95();
        Self {
            spot: params.spot(),
            strike: params.strike(),
            rate: params.rate(),
            dividend: params.dividend(),
            volatility: params.volatility(),
            t1: params.t1(),
            t2: params.t2(),
            rule,
            n_paths: mc.n_paths,
            seed: mc.seed,
            mc_price: mc.price,
            mc_std_error: mc.std_error,
            ci95_lower: mc.price - half_width,
            ci95_upper: mc.price + half_width,
            call_ratio: mc.call_ratio,
            analytic_price: analytic.map(|d| d.total()),
            analytic_call_leg: analytic.map(|d| d.call_leg),
            analytic_put_leg: analytic.map(|d| d.put_leg),
        }
    }

    /// MC minus closed form, when both exist.
    pub fn difference(&self) -> Option<f64> {
        self.analytic_price.map(|a| self.mc_price - a)
    }
}

/// Prices the chooser described by `args`, filling gaps from `defaults`.
pub fn evaluate(args: &PriceArgs, defaults: &PricingSettings) -> Result<PriceSummary> {
    let rule = match &args.rule {
        Some(rule) => rule.parse::<DecisionRule>().map_err(CliError::InvalidArgument)?,
        None => defaults.rule,
    };
    let n_paths = args.num_paths.unwrap_or(defaults.n_paths);
    let seed = args.seed.or(defaults.seed);

    let params = ChooserParams::new(
        args.spot,
        args.strike,
        args.rate,
        args.dividend,
        args.volatility,
        args.t1,
        args.t2,
    )
    .map_err(PricingError::from)?;

    let mc = price_chooser_mc(&params, n_paths, seed, rule)?;

    let analytic = match rubinstein_decomposition(&params) {
        Ok(decomposition) => Some(decomposition),
        Err(AnalyticalError::Singular { parameter }) => {
            warn!("Closed form undefined at zero {}, reporting MC only", parameter);
            None
        }
        Err(err) => return Err(PricingError::from(err).into()),
    };

    if !rule.is_consistent_with_closed_form() && analytic.is_some() {
        info!("Rule '{}' does not converge to the closed form", rule);
    }

    Ok(PriceSummary::new(&params, rule, &mc, analytic))
}

/// Run the price command
pub fn run(args: &PriceArgs, defaults: &PricingSettings) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;

    info!("Starting pricing...");
    info!("  Spot: {}  Strike: {}", args.spot, args.strike);
    info!("  t1: {}  t2: {}", args.t1, args.t2);
    info!("  Output format: {}", format);

    let summary = evaluate(args, defaults)?;
    let mut out = open_output(args.output.as_deref())?;
    render(&summary, format, &mut out)?;
    out.flush()?;

    info!("Pricing complete");
    Ok(())
}

/// Writes `summary` in the requested format.
pub fn render<W: Write>(summary: &PriceSummary, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.serialize(summary)?;
            writer.flush()?;
        }
        OutputFormat::Table => {
            let rows = [
                ("Rule", summary.rule.to_string()),
                ("Paths", summary.n_paths.to_string()),
                ("Seed", summary.seed.to_string()),
                ("MC price", format!("{:.6}", summary.mc_price)),
                ("Std error", format!("{:.6}", summary.mc_std_error)),
                (
                    "95% CI",
                    format!("[{:.4}, {:.4}]", summary.ci95_lower, summary.ci95_upper),
                ),
                ("Call ratio", format!("{:.4}", summary.call_ratio)),
                ("Closed form", fmt_opt(summary.analytic_price, 6)),
                ("  call leg", fmt_opt(summary.analytic_call_leg, 6)),
                ("  put leg", fmt_opt(summary.analytic_put_leg, 6)),
                ("MC - closed", fmt_opt(summary.difference(), 6)),
            ];

            writeln!(out, "\n┌──────────────┬──────────────────────────┐")?;
            writeln!(out, "│ {:<12} │ {:<24} │", "Measure", "Value")?;
            writeln!(out, "├──────────────┼──────────────────────────┤")?;
            for (label, value) in rows {
                writeln!(out, "│ {:<12} │ {:>24} │", label, value)?;
            }
            writeln!(out, "└──────────────┴──────────────────────────┘")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args() -> PriceArgs {
        PriceArgs {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            dividend: 0.0,
            volatility: 0.2,
            t1: 0.25,
            t2: 1.0,
            num_paths: Some(20_000),
            seed: Some(11),
            rule: Some("parity".to_string()),
            format: "table".to_string(),
            output: None,
        }
    }

    #[test]
    fn test_evaluate_matches_closed_form() {
        let summary = evaluate(&args(), &PricingSettings::default()).unwrap();

        assert_relative_eq!(summary.analytic_price.unwrap(), 12.378483731079122, epsilon = 1e-9);
        assert!(summary.difference().unwrap().abs() < 4.0 * summary.mc_std_error);
        assert!(summary.ci95_lower < summary.mc_price && summary.mc_price < summary.ci95_upper);
        assert_eq!(summary.n_paths, 20_000);
        assert_eq!(summary.seed, 11);
    }

    #[test]
    fn test_defaults_fill_missing_args() {
        let mut a = args();
        a.num_paths = None;
        a.seed = None;
        a.rule = None;
        let defaults = PricingSettings {
            n_paths: 1_000,
            seed: Some(5),
            rule: DecisionRule::Naive,
        };

        let summary = evaluate(&a, &defaults).unwrap();
        assert_eq!(summary.n_paths, 1_000);
        assert_eq!(summary.seed, 5);
        assert_eq!(summary.rule, DecisionRule::Naive);
    }

    #[test]
    fn test_zero_volatility_reports_mc_only() {
        let mut a = args();
        a.volatility = 0.0;
        let summary = evaluate(&a, &PricingSettings::default()).unwrap();
        assert!(summary.analytic_price.is_none());
        assert!(summary.difference().is_none());
        assert_eq!(summary.mc_std_error, 0.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut a = args();
        a.t1 = 2.0;
        let err = evaluate(&a, &PricingSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::Pricing(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let mut a = args();
        a.rule = Some("optimal".to_string());
        assert!(matches!(
            evaluate(&a, &PricingSettings::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_render_formats() {
        let summary = evaluate(&args(), &PricingSettings::default()).unwrap();

        let mut json = Vec::new();
        render(&summary, OutputFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["rule"], "parity");
        assert_eq!(value["n_paths"], 20_000);

        let mut csv_out = Vec::new();
        render(&summary, OutputFormat::Csv, &mut csv_out).unwrap();
        let text = String::from_utf8(csv_out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("spot,strike,rate"));
        assert!(lines.next().unwrap().starts_with("100.0,100.0,0.05"));

        let mut table = Vec::new();
        render(&summary, OutputFormat::Table, &mut table).unwrap();
        let text = String::from_utf8(table).unwrap();
        assert!(text.contains("MC price"));
        assert!(text.contains("Closed form"));
    }
}
