//! Terminal-price simulation under Geometric Brownian Motion.
//!
//! A chooser only needs prices at `t1` and `t2`, so each period is simulated
//! in a single exact log-space step rather than on a time grid:
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - q - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! The second period is chained from the first with [`evolve_terminal`],
//! path by path, so `S(t2)` on path `i` starts from `S(t1)` on path `i`.

use pricer_core::types::PricingError;

use crate::rng::PricerRng;

/// One GBM period under the risk-neutral measure.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmStep;
///
/// let step = GbmStep::new(0.05, 0.0, 0.2, 1.0);
/// // Z = 0 leaves only the drift
/// let s = step.evolve(100.0, 0.0);
/// assert!((s - 100.0 * (0.05_f64 - 0.02).exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStep {
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Period length in years.
    pub dt: f64,
}

impl GbmStep {
    /// Creates a new GBM step.
    #[inline]
    pub fn new(rate: f64, dividend: f64, volatility: f64, dt: f64) -> Self {
        Self {
            rate,
            dividend,
            volatility,
            dt,
        }
    }

    /// Checks that the step describes a valid forward period.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` if any field is non-finite, `dt < 0`
    /// or `volatility < 0`.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.rate.is_finite()
            && self.dividend.is_finite()
            && self.volatility.is_finite()
            && self.dt.is_finite())
        {
            return Err(PricingError::invalid_input(format!(
                "GBM step has a non-finite field: {:?}",
                self
            )));
        }
        if self.dt < 0.0 {
            return Err(PricingError::invalid_input(format!(
                "Period length must be non-negative, got dt = {}",
                self.dt
            )));
        }
        if self.volatility < 0.0 {
            return Err(PricingError::invalid_input(format!(
                "Volatility must be non-negative, got σ = {}",
                self.volatility
            )));
        }
        Ok(())
    }

    /// Deterministic log-drift `(r - q - 0.5σ²)·dt`.
    #[inline]
    pub fn drift(&self) -> f64 {
        (self.rate - self.dividend - 0.5 * self.volatility * self.volatility) * self.dt
    }

    /// Diffusion scale `σ·√dt`.
    #[inline]
    pub fn diffusion(&self) -> f64 {
        self.volatility * self.dt.sqrt()
    }

    /// Evolves a single price over the period with normal draw `z`.
    #[inline]
    pub fn evolve(&self, spot: f64, z: f64) -> f64 {
        spot * (self.drift() + self.diffusion() * z).exp()
    }
}

/// Where the standard normal draws for one period come from.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate_terminal, GbmStep, NormalSource};
///
/// let step = GbmStep::new(0.05, 0.0, 0.2, 0.5);
/// let a = simulate_terminal(100.0, step, 4, NormalSource::Seeded(1)).unwrap();
/// let b = simulate_terminal(100.0, step, 4, NormalSource::Seeded(1)).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug)]
pub enum NormalSource<'a> {
    /// Caller-supplied draws, used verbatim.
    Precomputed(&'a [f64]),
    /// Fresh generator with a fixed seed.
    Seeded(u64),
    /// Fresh generator seeded from OS entropy.
    Entropy,
    /// Caller-owned generator; the stream advances by `n_paths` draws.
    Rng(&'a mut PricerRng),
}

fn ensure_positive_spot(spot: f64) -> Result<(), PricingError> {
    if spot > 0.0 && spot.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_input(format!(
            "Initial price must be positive and finite, got {}",
            spot
        )))
    }
}

// Zero is absorbing under GBM, so intermediate prices that underflow stay valid.
fn ensure_non_negative_spot(spot: f64) -> Result<(), PricingError> {
    if spot >= 0.0 && spot.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_input(format!(
            "Price must be non-negative and finite, got {}",
            spot
        )))
    }
}

/// Simulates `n_paths` terminal prices over one period from a common start.
///
/// # Arguments
///
/// * `s0` - Price at the start of the period (must be positive)
/// * `step` - Period parameters
/// * `n_paths` - Number of terminal prices to produce
/// * `source` - Origin of the normal draws
///
/// # Errors
///
/// `PricingError::InvalidInput` if `s0 <= 0`, the step is invalid, or a
/// precomputed slice does not hold exactly `n_paths` values.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate_terminal, GbmStep, NormalSource};
///
/// // dt = 0 leaves the price unchanged
/// let step = GbmStep::new(0.05, 0.0, 0.2, 0.0);
/// let prices = simulate_terminal(100.0, step, 3, NormalSource::Precomputed(&[1.0, -1.0, 2.0]))
///     .unwrap();
/// assert_eq!(prices, vec![100.0, 100.0, 100.0]);
/// ```
pub fn simulate_terminal(
    s0: f64,
    step: GbmStep,
    n_paths: usize,
    source: NormalSource<'_>,
) -> Result<Vec<f64>, PricingError> {
    ensure_positive_spot(s0)?;
    step.validate()?;

    let drawn;
    let normals: &[f64] = match source {
        NormalSource::Precomputed(z) => {
            if z.len() != n_paths {
                return Err(PricingError::invalid_input(format!(
                    "Expected {} precomputed normals, got {}",
                    n_paths,
                    z.len()
                )));
            }
            z
        }
        NormalSource::Seeded(seed) => {
            drawn = PricerRng::from_seed(seed).normals(n_paths);
            &drawn
        }
        NormalSource::Entropy => {
            drawn = PricerRng::from_entropy().normals(n_paths);
            &drawn
        }
        NormalSource::Rng(rng) => {
            drawn = rng.normals(n_paths);
            &drawn
        }
    };

    let drift = step.drift();
    let diffusion = step.diffusion();
    Ok(normals
        .iter()
        .map(|&z| s0 * (drift + diffusion * z).exp())
        .collect())
}

/// Evolves each price in `spots` over one period with its own draw.
///
/// Path `i` uses `spots[i]` and `normals[i]`. A zero price, as reached when
/// a path underflows, stays at zero.
///
/// # Errors
///
/// `PricingError::InvalidInput` if the slices differ in length, the step is
/// invalid, or any starting price is negative or non-finite.
pub fn evolve_terminal(
    spots: &[f64],
    step: &GbmStep,
    normals: &[f64],
) -> Result<Vec<f64>, PricingError> {
    if spots.len() != normals.len() {
        return Err(PricingError::invalid_input(format!(
            "Length mismatch: {} prices vs {} normals",
            spots.len(),
            normals.len()
        )));
    }
    step.validate()?;
    for &spot in spots {
        ensure_non_negative_spot(spot)?;
    }

    let drift = step.drift();
    let diffusion = step.diffusion();
    Ok(spots
        .iter()
        .zip(normals)
        .map(|(&s, &z)| s * (drift + diffusion * z).exp())
        .collect())
}
