// src/simulation/cycle.rs

use crate::demand::{DemandKind, DemandSampler};
use crate::error::{ConfigError, SimulationError};
use crate::model::{effective_inventory, round_inventory, ItemDemandProfile};
use crate::simulation::config::CycleConfig;
use crate::simulation::risk::RiskTier;
use crate::simulation::stats::{mean, percentile, round_to};
use crate::simulation::trials::{resolve_seed, run_rng, run_trials};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::info;

/// Outcome of one item's service-cycle simulation.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub item_name: String,
    pub avg_daily_sales: f64,
    pub daily_std: f64,
    pub demand_kind: DemandKind,
    pub p95_cycle_demand: f64,
    pub avg_cycle_demand: u64,
    pub effective_inventory: u32,
    pub availability: f64,
    pub stockout_probability: f64,
    pub current_par_level: u32,
    pub risk_tier: RiskTier,
    pub seed: u64,
    /// Cycle demand of every trial, in trial order.
    #[serde(skip)]
    pub simulated_sales: Option<Vec<u64>>,
}

/// Simulates total demand over one service cycle, many times, for a single
/// item and counts how often it outruns the stock on hand.
#[derive(Debug)]
pub struct CycleSimulator {
    config: CycleConfig,
    profile: ItemDemandProfile,
    demand: Box<dyn DemandSampler>,
}

impl CycleSimulator {
    /// Builds the simulator with the sampler fitted to `profile`.
    pub fn new(config: CycleConfig, profile: ItemDemandProfile) -> Result<Self, ConfigError> {
        let demand = profile.sampler();
        Self::with_sampler(config, profile, demand)
    }

    /// Builds the simulator around a caller-supplied sampler.
    pub fn with_sampler(
        config: CycleConfig,
        profile: ItemDemandProfile,
        demand: Box<dyn DemandSampler>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            profile,
            demand,
        })
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn run(&self) -> Result<CycleResult, SimulationError> {
        self.execute(None)
    }

    /// Like [`run`](Self::run), but stops at the next trial boundary once
    /// `cancel` is raised.
    pub fn run_cancellable(&self, cancel: &AtomicBool) -> Result<CycleResult, SimulationError> {
        self.execute(Some(cancel))
    }

    fn execute(&self, cancel: Option<&AtomicBool>) -> Result<CycleResult, SimulationError> {
        let cfg = &self.config;
        let seed = resolve_seed(cfg.seed);

        let raw_inventory = effective_inventory(
            cfg.par_level,
            self.profile.avg_daily_sales,
            cfg.lead_time_days,
        );
        let inventory = round_inventory(raw_inventory, cfg.rounding, &mut run_rng(seed));

        info!(
            item = %self.profile.item_name,
            kind = ?self.demand.kind(),
            trials = cfg.number_of_simulations,
            days = cfg.days_between_visits,
            effective_inventory = inventory,
            seed,
            "running cycle simulation"
        );

        let days = cfg.days_between_visits;
        let cycle_totals = run_trials(cfg.number_of_simulations, seed, cancel, |_, rng| {
            (0..days)
                .map(|_| self.demand.sample(rng) as u64)
                .sum::<u64>()
        })?;

        let trials = cycle_totals.len() as f64;
        let stockouts = cycle_totals
            .iter()
            .filter(|&&total| total > inventory as u64)
            .count() as f64;
        let stockout_probability = stockouts / trials;

        let as_f64: Vec<f64> = cycle_totals.iter().map(|&t| t as f64).collect();
        let p95_cycle_demand = percentile(&as_f64, 95.0);
        let avg_cycle_demand = mean(&as_f64).round() as u64;

        info!(
            item = %self.profile.item_name,
            stockout_probability,
            p95_cycle_demand,
            "cycle simulation finished"
        );

        Ok(CycleResult {
            item_name: self.profile.item_name.clone(),
            avg_daily_sales: round_to(self.profile.avg_daily_sales, 4),
            daily_std: round_to(self.profile.daily_std, 4),
            demand_kind: self.demand.kind(),
            p95_cycle_demand,
            avg_cycle_demand,
            effective_inventory: inventory,
            availability: 1.0 - stockout_probability,
            stockout_probability,
            current_par_level: cfg.par_level,
            risk_tier: RiskTier::from_stockout_probability(stockout_probability),
            seed,
            simulated_sales: cfg.keep_series.then_some(cycle_totals),
        })
    }
}

/// Runs one cycle simulation for `profile` under `config`.
pub fn run_cycle(
    config: CycleConfig,
    profile: ItemDemandProfile,
) -> Result<CycleResult, SimulationError> {
    CycleSimulator::new(config, profile)?.run()
}
