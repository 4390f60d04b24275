// src/demand/estimation.rs

//! Turns period sales history into daily demand statistics.
//!
//! Periods before an item's first sale are dropped: counting the months
//! before launch as zero-demand months would drag the mean toward zero.

/// Days in one history period when the history is monthly.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// How history periods are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Plain mean and sample standard deviation (n - 1 denominator).
    #[default]
    Uniform,
    /// Weights 1, 2, ..., n so the most recent period counts most.
    /// Applied to both the mean and the (population) variance.
    LinearRecency,
}

/// Estimates (mean daily sales, std of daily sales) from per-period sales.
///
/// # Arguments
/// * `period_sales` - Units sold per period, oldest first. Non-finite
///   entries are read as zero.
/// * `days_per_period` - Divisor converting period totals to daily rates.
/// * `weighting` - See [`Weighting`].
///
/// # Returns
/// `(0.0, 0.0)` when no period has positive sales, or when
/// `days_per_period` isn't a positive number.
pub fn daily_stats_since_launch(
    period_sales: &[f64],
    days_per_period: f64,
    weighting: Weighting,
) -> (f64, f64) {
    if !(days_per_period.is_finite() && days_per_period > 0.0) {
        return (0.0, 0.0);
    }

    let cleaned: Vec<f64> = period_sales
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .collect();

    let Some(launch) = cleaned.iter().position(|&v| v > 0.0) else {
        return (0.0, 0.0);
    };

    let daily: Vec<f64> = cleaned[launch..]
        .iter()
        .map(|&v| v / days_per_period)
        .collect();

    match weighting {
        Weighting::Uniform => uniform_stats(&daily),
        Weighting::LinearRecency => linear_recency_stats(&daily),
    }
}

fn uniform_stats(daily: &[f64]) -> (f64, f64) {
    let n = daily.len() as f64;
    let mean = daily.iter().sum::<f64>() / n;
    if daily.len() < 2 {
        return (mean, 0.0);
    }
    let var = daily.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

fn linear_recency_stats(daily: &[f64]) -> (f64, f64) {
    let weights = (1..=daily.len()).map(|w| w as f64);
    let total_weight: f64 = weights.clone().sum();

    let mean = daily
        .iter()
        .zip(weights.clone())
        .map(|(d, w)| d * w)
        .sum::<f64>()
        / total_weight;

    let var = daily
        .iter()
        .zip(weights)
        .map(|(d, w)| w * (d - mean).powi(2))
        .sum::<f64>()
        / total_weight;

    (mean, var.sqrt())
}
