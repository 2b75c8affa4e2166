//! Volatility regimes and per-regime error summaries.
//!
//! A valuation date is labelled `high_vol` when the VIX closes strictly
//! above a threshold (30 by default) and `normal_vol` otherwise. Errors are
//! then stratified by that label so pricing accuracy can be compared across
//! calm and stressed markets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

use crate::metrics::error_metrics;

/// VIX level above which a date is labelled high volatility.
pub const DEFAULT_VIX_THRESHOLD: f64 = 30.0;

/// Market volatility regime.
///
/// Variants are ordered the same way as their labels sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VolRegime {
    /// VIX above the threshold.
    HighVol,
    /// VIX at or below the threshold.
    NormalVol,
}

impl VolRegime {
    /// Label used in summaries and output files.
    pub fn as_str(self) -> &'static str {
        match self {
            VolRegime::HighVol => "high_vol",
            VolRegime::NormalVol => "normal_vol",
        }
    }
}

impl fmt::Display for VolRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolRegime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "high_vol" => Ok(VolRegime::HighVol),
            "normal_vol" => Ok(VolRegime::NormalVol),
            other => Err(format!("Unknown regime '{}'", other)),
        }
    }
}

impl From<VolRegime> for String {
    fn from(regime: VolRegime) -> Self {
        regime.as_str().to_string()
    }
}

/// Labels a VIX level with the default threshold of 30.
///
/// # Examples
///
/// ```
/// use pricer_validation::regime::{regime_label, VolRegime};
///
/// assert_eq!(regime_label(35.0), VolRegime::HighVol);
/// assert_eq!(regime_label(30.0), VolRegime::NormalVol);
/// ```
#[inline]
pub fn regime_label(vix: f64) -> VolRegime {
    regime_label_with_threshold(vix, DEFAULT_VIX_THRESHOLD)
}

/// Labels a VIX level; the boundary itself is `NormalVol`.
#[inline]
pub fn regime_label_with_threshold(vix: f64, threshold: f64) -> VolRegime {
    if vix > threshold {
        VolRegime::HighVol
    } else {
        VolRegime::NormalVol
    }
}

/// Error metrics for one regime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegimeSummary {
    /// Regime label.
    pub regime: String,
    /// Number of rows in the regime.
    pub count: usize,
    /// Mean absolute error.
    pub mae: f64,
    /// Root-mean-square error.
    pub rmse: f64,
    /// Mean absolute percentage error in percent, `NaN` when undefined.
    pub mape: f64,
}

/// Groups rows by regime and computes error metrics per group.
///
/// Column accessors are closures, so any row type can be summarised.
/// Output is sorted by regime label ascending; `count` is the number of
/// rows in the group.
///
/// # Errors
///
/// Propagates failures from [`error_metrics`]. Every group is non-empty,
/// so an empty `rows` slice yields an empty summary rather than an error.
///
/// # Examples
///
/// ```
/// use pricer_validation::regime::{summarize_by_regime, VolRegime};
///
/// let rows = vec![
///     (10.0, 11.0, VolRegime::NormalVol),
///     (20.0, 18.0, VolRegime::HighVol),
/// ];
/// let summary = summarize_by_regime(&rows, |r| r.0, |r| r.1, |r| r.2).unwrap();
///
/// assert_eq!(summary[0].regime, "high_vol");
/// assert_eq!(summary[1].regime, "normal_vol");
/// assert_eq!(summary[0].count, 1);
/// ```
pub fn summarize_by_regime<R, T, P, G, L>(
    rows: &[R],
    true_col: T,
    pred_col: P,
    regime_col: G,
) -> Result<Vec<RegimeSummary>, PricingError>
where
    T: Fn(&R) -> f64,
    P: Fn(&R) -> f64,
    G: Fn(&R) -> L,
    L: Into<String>,
{
    let mut groups: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for row in rows {
        let (actual, predicted) = groups.entry(regime_col(row).into()).or_default();
        actual.push(true_col(row));
        predicted.push(pred_col(row));
    }

    groups
        .into_iter()
        .map(|(regime, (actual, predicted))| {
            let metrics = error_metrics(&actual, &predicted)?;
            Ok(RegimeSummary {
                regime,
                count: actual.len(),
                mae: metrics.mae,
                rmse: metrics.rmse,
                mape: metrics.mape,
            })
        })
        .collect()
}
