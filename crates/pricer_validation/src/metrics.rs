//! Point-forecast error metrics.
//!
//! | Metric | Definition |
//! |--------|------------|
//! | MAE | `mean(|y - ŷ|)` |
//! | RMSE | `sqrt(mean((y - ŷ)²))` |
//! | MAPE | `100 · mean(|y - ŷ| / |y|)` over rows with `|y| > 1e-8` |
//!
//! Realized chooser payoffs are frequently zero, so MAPE silently drops
//! those rows. When none survive it is `NaN`, which is distinct from a
//! genuine zero error.

use pricer_core::types::PricingError;

/// `|y_true|` at or below this is excluded from MAPE.
pub const MAPE_EPSILON: f64 = 1e-8;

/// Error metrics between two aligned series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Root-mean-square error.
    pub rmse: f64,
    /// Mean absolute percentage error, in percent. `NaN` when undefined.
    pub mape: f64,
}

/// Computes MAE, RMSE and MAPE between `y_true` and `y_pred`.
///
/// # Errors
///
/// `PricingError::InvalidInput` if the series are empty or differ in length.
///
/// # Examples
///
/// ```
/// use pricer_validation::metrics::error_metrics;
///
/// let exact = error_metrics(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!((exact.mae, exact.rmse, exact.mape), (0.0, 0.0, 0.0));
///
/// let zeros = error_metrics(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]).unwrap();
/// assert_eq!(zeros.mae, 1.0);
/// assert!(zeros.mape.is_nan());
/// ```
pub fn error_metrics(y_true: &[f64], y_pred: &[f64]) -> Result<ErrorMetrics, PricingError> {
    if y_true.len() != y_pred.len() {
        return Err(PricingError::invalid_input(format!(
            "Series length mismatch: {} true vs {} predicted",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(PricingError::invalid_input(
            "Error metrics need at least one observation",
        ));
    }

    let n = y_true.len() as f64;
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut pct_sum = 0.0;
    let mut pct_count = 0usize;

    for (&actual, &predicted) in y_true.iter().zip(y_pred) {
        let abs_err = (actual - predicted).abs();
        abs_sum += abs_err;
        sq_sum += abs_err * abs_err;
        if actual.abs() > MAPE_EPSILON {
            pct_sum += abs_err / actual.abs();
            pct_count += 1;
        }
    }

    let mape = if pct_count == 0 {
        f64::NAN
    } else {
        100.0 * pct_sum / pct_count as f64
    };

    Ok(ErrorMetrics {
        mae: abs_sum / n,
        rmse: (sq_sum / n).sqrt(),
        mape,
    })
}
