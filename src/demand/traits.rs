// src/demand/traits.rs

use rand::RngCore;
use serde::Serialize;
use std::fmt::Debug;

/// Which distribution a sampler draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DemandKind {
    Zero,
    Poisson,
    NegativeBinomial,
}

/// Draws one day's unit demand for a single item.
///
/// The concrete distribution is fixed when the sampler is built, so the
/// per-item-per-day hot loop never re-evaluates the selection rule.
///
/// We require `Send` + `Sync` so samplers can be shared by trials running on
/// the rayon pool. The random source is passed in rather than owned: every
/// trial brings its own stream.
pub trait DemandSampler: Debug + Send + Sync {
    /// Draws one non-negative daily demand.
    fn sample(&self, rng: &mut dyn RngCore) -> u32;

    /// The distribution this sampler was fitted to.
    fn kind(&self) -> DemandKind;
}
