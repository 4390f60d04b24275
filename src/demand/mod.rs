pub mod estimation;
pub mod implementations;
pub mod traits;

pub use estimation::{daily_stats_since_launch, Weighting, DAYS_PER_MONTH};
pub use implementations::{
    demand_model, poisson_count, NegativeBinomialDemand, PoissonDemand, ZeroDemand,
};
pub use traits::{DemandKind, DemandSampler};
