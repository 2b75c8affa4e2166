//! Streaming sample statistics.
//!
//! Standard deviations here are **population** deviations (divisor `n`), which
//! is the convention used for Monte Carlo standard errors throughout the
//! workspace.

/// Streaming mean/variance accumulator (Welford).
///
/// Aggregates samples one at a time without holding the batch in memory.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::RunningMoments;
///
/// let mut acc = RunningMoments::new();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     acc.push(x);
/// }
/// assert_eq!(acc.count(), 4);
/// assert!((acc.mean() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunningMoments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of samples seen.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean (`NaN` when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    /// Population variance (`NaN` when empty).
    #[inline]
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Population standard deviation (`NaN` when empty).
    #[inline]
    pub fn population_std(&self) -> f64 {
        self.population_variance().sqrt()
    }
}
