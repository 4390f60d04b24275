// src/simulation/risk.rs

//! Classifies cycle results for restocking decisions.

use crate::simulation::cycle::CycleResult;
use serde::Serialize;

/// Stockout probability at or below which an item is low risk.
pub const LOW_RISK_MAX: f64 = 0.05;
/// Stockout probability at or below which an item is medium risk.
pub const MEDIUM_RISK_MAX: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_stockout_probability(p: f64) -> Self {
        if p <= LOW_RISK_MAX {
            RiskTier::Low
        } else if p <= MEDIUM_RISK_MAX {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// How simulated cycle demand compares with par level and slot capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CapacityFlag {
    /// Average cycle demand alone is more than the slot holds.
    OverCapacity,
    /// The p95 cycle demand is more than the slot holds.
    TailOverCapacity,
    /// Demand runs above par and the slot has room to raise it.
    RaisePar,
    Ok,
}

impl CapacityFlag {
    /// Checks are made in order; the first one that holds wins.
    pub fn classify(result: &CycleResult, capacity: u32) -> Self {
        let capacity = capacity as f64;
        let par = result.current_par_level as f64;
        let avg = result.avg_cycle_demand as f64;
        let p95 = result.p95_cycle_demand;

        if avg > capacity {
            CapacityFlag::OverCapacity
        } else if p95 > capacity {
            CapacityFlag::TailOverCapacity
        } else if avg > par && p95 > par && capacity > par {
            CapacityFlag::RaisePar
        } else {
            CapacityFlag::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::DemandKind;

    fn result(avg: u64, p95: f64, par: u32) -> CycleResult {
        CycleResult {
            item_name: "Cola".into(),
            avg_daily_sales: 1.0,
            daily_std: 1.0,
            demand_kind: DemandKind::Poisson,
            p95_cycle_demand: p95,
            avg_cycle_demand: avg,
            effective_inventory: par,
            availability: 1.0,
            stockout_probability: 0.0,
            current_par_level: par,
            risk_tier: RiskTier::Low,
            seed: 0,
            simulated_sales: None,
        }
    }

    #[test]
    fn tiers_at_thresholds() {
        assert_eq!(RiskTier::from_stockout_probability(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_stockout_probability(0.05), RiskTier::Low);
        assert_eq!(RiskTier::from_stockout_probability(0.06), RiskTier::Medium);
        assert_eq!(RiskTier::from_stockout_probability(0.15), RiskTier::Medium);
        assert_eq!(RiskTier::from_stockout_probability(0.5), RiskTier::High);
    }

    #[test]
    fn capacity_flags_in_priority_order() {
        assert_eq!(CapacityFlag::classify(&result(30, 40.0, 10), 25), CapacityFlag::OverCapacity);
        assert_eq!(
            CapacityFlag::classify(&result(20, 30.0, 10), 25),
            CapacityFlag::TailOverCapacity
        );
        assert_eq!(CapacityFlag::classify(&result(12, 18.0, 10), 25), CapacityFlag::RaisePar);
        assert_eq!(CapacityFlag::classify(&result(12, 18.0, 25), 25), CapacityFlag::Ok);
        assert_eq!(CapacityFlag::classify(&result(5, 8.0, 10), 25), CapacityFlag::Ok);
    }
}
