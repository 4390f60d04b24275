// src/demand/implementations.rs

use crate::demand::traits::{DemandKind, DemandSampler};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Gamma, Poisson};
use tracing::debug;

/// Above this rate `exp(-rate)` gets too close to underflow and the
/// product-of-uniforms loop too long; hand over to `rand_distr`.
const PRODUCT_METHOD_MAX_RATE: f64 = 500.0;

/// Draws a Poisson count by multiplying uniforms until the running product
/// drops to `exp(-rate)` or below.
///
/// Returns 0 for a non-positive or non-finite rate.
pub fn poisson_count(rate: f64, rng: &mut dyn RngCore) -> u32 {
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    if rate > PRODUCT_METHOD_MAX_RATE {
        return match Poisson::new(rate) {
            Ok(dist) => {
                let v: f64 = dist.sample(rng);
                if v.is_finite() && v > 0.0 {
                    v.min(u32::MAX as f64) as u32
                } else {
                    0
                }
            }
            Err(_) => 0,
        };
    }

    let cutoff = (-rate).exp();
    let mut count = 0u32;
    let mut product: f64 = rng.gen();
    while product > cutoff {
        product *= rng.gen::<f64>();
        count += 1;
    }
    count
}

// =========================================================================
// 1. Zero Demand
// =========================================================================

/// Never sells anything. Used for items with no usable statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroDemand;

impl DemandSampler for ZeroDemand {
    fn sample(&self, _rng: &mut dyn RngCore) -> u32 {
        0
    }

    fn kind(&self) -> DemandKind {
        DemandKind::Zero
    }
}

// =========================================================================
// 2. Poisson Demand
// =========================================================================

/// Equidispersed demand: variance equals the mean.
#[derive(Debug, Clone)]
pub struct PoissonDemand {
    rate: f64,
}

impl PoissonDemand {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl DemandSampler for PoissonDemand {
    fn sample(&self, rng: &mut dyn RngCore) -> u32 {
        poisson_count(self.rate, rng)
    }

    fn kind(&self) -> DemandKind {
        DemandKind::Poisson
    }
}

// =========================================================================
// 3. Negative Binomial Demand
// =========================================================================

/// Overdispersed demand (variance above the mean), fitted by method of
/// moments:
///
/// r = mean² / (var - mean), p = r / (r + mean)
///
/// Sampled as a gamma-Poisson mixture: the day's rate is drawn from
/// Gamma(shape = r, scale = (1 - p) / p), then a Poisson count at that rate.
#[derive(Debug, Clone)]
pub struct NegativeBinomialDemand {
    r: f64,
    p: f64,
    rate_mix: Gamma<f64>,
}

impl NegativeBinomialDemand {
    /// Fits r and p from mean and variance. Returns `None` when the moments
    /// are not overdispersed or the gamma mixture can't be built.
    pub fn from_moments(mean: f64, variance: f64) -> Option<Self> {
        if !(mean > 0.0 && variance > mean) {
            return None;
        }
        let r = mean * mean / (variance - mean);
        let p = r / (r + mean);
        let rate_mix = Gamma::new(r, (1.0 - p) / p).ok()?;
        Some(Self { r, p, rate_mix })
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl DemandSampler for NegativeBinomialDemand {
    fn sample(&self, rng: &mut dyn RngCore) -> u32 {
        let rate: f64 = self.rate_mix.sample(rng);
        // poisson_count maps NaN/inf rates to zero demand.
        poisson_count(rate, rng)
    }

    fn kind(&self) -> DemandKind {
        DemandKind::NegativeBinomial
    }
}

// =========================================================================
// Selection
// =========================================================================

/// Picks the sampler for an item's daily demand statistics.
///
/// - non-finite mean or std, or mean <= 0: zero demand
/// - std² > mean > 0: negative binomial
/// - otherwise: Poisson at the mean
pub fn demand_model(mean: f64, std: f64) -> Box<dyn DemandSampler> {
    if !mean.is_finite() || !std.is_finite() {
        debug!(mean, std, "non-finite demand statistics, using zero demand");
        return Box::new(ZeroDemand);
    }
    if mean <= 0.0 {
        return Box::new(ZeroDemand);
    }

    let variance = std * std;
    if std > 0.0 && variance > mean {
        if let Some(nb) = NegativeBinomialDemand::from_moments(mean, variance) {
            return Box::new(nb);
        }
        debug!(mean, std, "negative binomial fit failed, falling back to Poisson");
    }
    Box::new(PoissonDemand::new(mean))
}
