// src/simulation/stats.rs

//! Order statistics over a complete set of trial outcomes.
//!
//! Everything here works on the full collected sample, never on a running
//! estimate, so a run's aggregates depend only on its trial outcomes.

use serde::Serialize;

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// The `q`-th percentile (0..=100) of an already sorted slice, linearly
/// interpolating between the two nearest order statistics.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let q = q.clamp(0.0, 100.0);
    let rank = (sorted.len() - 1) as f64 * q / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Sorts a copy of `values` and takes the `q`-th percentile.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    percentile_sorted(&sorted_copy(values), q)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Mean and upper percentiles of one outcome series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let sorted = sorted_copy(values);
        Self {
            mean: mean(&sorted),
            p50: percentile_sorted(&sorted, 50.0),
            p75: percentile_sorted(&sorted, 75.0),
            p95: percentile_sorted(&sorted, 95.0),
        }
    }
}

/// Rounds to `places` decimal places for reporting.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 50.0), 2.5);
        // rank = 3 * 0.95 = 2.85 -> 3 + 0.85
        assert!((percentile(&values, 95.0) - 3.85).abs() < 1e-12);
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 4.0);
    }

    #[test]
    fn percentile_ignores_input_order() {
        assert_eq!(percentile(&[4.0, 1.0, 3.0, 2.0], 75.0), 3.25);
    }

    #[test]
    fn single_value_summary() {
        let s = Summary::from_values(&[7.0]);
        assert_eq!(s, Summary { mean: 7.0, p50: 7.0, p75: 7.0, p95: 7.0 });
    }

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(percentile(&[], 95.0), 0.0);
    }

    #[test]
    fn rounding_for_reports() {
        assert_eq!(round_to(1.234_56, 4), 1.2346);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
