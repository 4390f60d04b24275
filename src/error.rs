// src/error.rs

use thiserror::Error;

/// Invalid run parameters. Raised before any trial starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `number_of_simulations` was zero.
    #[error("number of simulations must be at least 1")]
    NoTrials,

    /// `days_between_visits` was zero.
    #[error("days between visits must be at least 1")]
    EmptyCycle,

    /// Lead time was negative or not a finite number.
    #[error("lead time must be a finite, non-negative number of days (got {0})")]
    InvalidLeadTime(f64),

    /// `max_days` was zero.
    #[error("max days must be at least 1")]
    NoDays,

    /// `exhaustion_milestone` was zero.
    #[error("exhaustion milestone must be at least 1")]
    ZeroMilestone,

    /// The fleet race was given no items.
    #[error("fleet race needs at least one item")]
    EmptyFleet,
}

/// Errors surfaced by a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The caller raised the cancel flag. Partial results are discarded.
    #[error("simulation cancelled after {completed} completed trials")]
    Cancelled { completed: usize },
}
