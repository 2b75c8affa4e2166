//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper that offers
//! reproducible normal variates with batch operations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Monte Carlo simulation random number generator.
///
/// Wraps `rand::StdRng` and samples normals with the Ziggurat algorithm
/// through `rand_distr::StandardNormal`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let n: f64 = rng.gen_normal();
/// let batch = rng.normals(100);
/// assert_eq!(batch.len(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    ///
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG seeded from the thread-local entropy source.
    ///
    /// The drawn seed is retained, so an unseeded run can still be replayed
    /// by passing [`PricerRng::seed`] to [`PricerRng::from_seed`].
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::from_seed(seed)
    }

    /// Returns the seed used for initialisation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let rng = PricerRng::from_seed(42);
    /// assert_eq!(rng.seed(), 42);
    /// ```
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// # Algorithm Reference
    ///
    /// Marsaglia, G. & Tsang, W. W. (2000). "The Ziggurat Method for
    /// Generating Random Variables". Journal of Statistical Software.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Empty buffers are a no-op and consume nothing from the stream.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }

    /// Draws `n` standard normal variates into a new vector.
    pub fn normals(&mut self, n: usize) -> Vec<f64> {
        let mut buffer = vec![0.0; n];
        self.fill_normal(&mut buffer);
        buffer
    }
}
