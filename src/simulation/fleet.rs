// src/simulation/fleet.rs

//! Whole-machine race: every item depletes its own slot day by day, and
//! each trial records when enough slots have run dry to warrant an
//! emergency visit, and when the machine's cumulative demand crosses a
//! volume threshold.

use crate::demand::DemandSampler;
use crate::error::{ConfigError, SimulationError};
use crate::model::{FleetItem, SlotInventory};
use crate::simulation::config::FleetRaceConfig;
use crate::simulation::stats::{mean, Summary};
use crate::simulation::trials::{resolve_seed, run_trials};
use rand::RngCore;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::{debug, info};

/// What happened in one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceOutcome {
    /// Day the exhaustion milestone was hit, if it was.
    pub days_to_exhaustion: Option<u32>,
    /// Day cumulative demand reached the volume milestone, if it did.
    pub days_to_volume: Option<u32>,
    /// Cumulative demand at the end of the exhaustion day, or at the end of
    /// the trial when the milestone was never hit.
    pub sales_at_exhaustion: u64,
    /// Indices of the first `exhaustion_milestone` items to run dry, in
    /// the order they did.
    pub first_exhausted: Vec<usize>,
}

/// Trial-local state. Built fresh for every trial and dropped at its end.
#[derive(Debug)]
pub struct TrialState<'a> {
    items: &'a [FleetItem],
    slots: Vec<SlotInventory>,
    day: u32,
    cumulative_sales: u64,
    exhausted_count: usize,
    first_exhausted: Vec<usize>,
    exhaustion_milestone: usize,
    volume_milestone: Option<u64>,
    days_to_exhaustion: Option<u32>,
    sales_at_exhaustion: Option<u64>,
    days_to_volume: Option<u32>,
}

impl<'a> TrialState<'a> {
    pub fn new(
        items: &'a [FleetItem],
        exhaustion_milestone: usize,
        volume_milestone: Option<u64>,
    ) -> Self {
        Self {
            items,
            slots: items.iter().map(|i| SlotInventory::new(i.par_level)).collect(),
            day: 0,
            cumulative_sales: 0,
            exhausted_count: 0,
            first_exhausted: Vec::with_capacity(exhaustion_milestone.min(items.len())),
            exhaustion_milestone,
            volume_milestone,
            days_to_exhaustion: None,
            sales_at_exhaustion: None,
            days_to_volume: None,
        }
    }

    /// Advances one day: every item draws demand in declaration order.
    pub fn step_day(&mut self, rng: &mut dyn RngCore) {
        self.day += 1;
        let items = self.items;

        for (index, (item, slot)) in items.iter().zip(self.slots.iter_mut()).enumerate() {
            let demand = item.demand.sample(rng);
            slot.vend(demand);
            // Volume counts every vend attempt, including ones an empty
            // slot couldn't fill.
            self.cumulative_sales = self.cumulative_sales.saturating_add(demand as u64);

            if slot.mark_if_exhausted() {
                self.exhausted_count += 1;
                if self.first_exhausted.len() < self.exhaustion_milestone {
                    self.first_exhausted.push(index);
                }
            }
        }

        if self.days_to_exhaustion.is_none() && self.exhausted_count >= self.exhaustion_milestone {
            self.days_to_exhaustion = Some(self.day);
            self.sales_at_exhaustion = Some(self.cumulative_sales);
        }
        if let Some(threshold) = self.volume_milestone {
            if self.days_to_volume.is_none() && self.cumulative_sales >= threshold {
                self.days_to_volume = Some(self.day);
            }
        }
    }

    /// True once every tracked milestone has been recorded.
    pub fn is_settled(&self) -> bool {
        self.days_to_exhaustion.is_some()
            && (self.volume_milestone.is_none() || self.days_to_volume.is_some())
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn cumulative_sales(&self) -> u64 {
        self.cumulative_sales
    }

    pub fn exhausted_count(&self) -> usize {
        self.exhausted_count
    }

    pub fn finish(self) -> RaceOutcome {
        RaceOutcome {
            days_to_exhaustion: self.days_to_exhaustion,
            days_to_volume: self.days_to_volume,
            sales_at_exhaustion: self.sales_at_exhaustion.unwrap_or(self.cumulative_sales),
            first_exhausted: self.first_exhausted,
        }
    }
}

/// How often one item was among the first exhausted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemExhaustion {
    pub item_name: String,
    pub count: usize,
    pub frequency: f64,
}

/// One row of the per-trial raw series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceTrialRecord {
    pub simulation: usize,
    pub days_to_exhaustion: u32,
    pub days_to_volume: Option<u32>,
    pub sales_at_exhaustion: u64,
}

/// Aggregate over all trials of a fleet race.
#[derive(Debug, Clone, Serialize)]
pub struct RaceSummary {
    pub trials: usize,
    pub max_days: u32,
    pub exhaustion_milestone: usize,
    pub volume_milestone: Option<u64>,
    /// Day-to-exhaustion series, unreached trials counted as `max_days`.
    pub days_to_exhaustion: Summary,
    /// Share of trials that hit the exhaustion milestone at all.
    pub exhaustion_reached_probability: f64,
    /// `None` when no volume milestone was set or no trial ever reached it.
    pub days_to_volume: Option<Summary>,
    /// Share of trials where volume was reached no later than exhaustion.
    pub volume_before_exhaustion_probability: Option<f64>,
    pub avg_sales_at_exhaustion: f64,
    /// Every item, in declaration order.
    pub item_exhaustion: Vec<ItemExhaustion>,
    /// Most frequently exhausted items, highest first.
    pub top_items: Vec<ItemExhaustion>,
    pub seed: u64,
    #[serde(skip)]
    pub series: Option<Vec<RaceTrialRecord>>,
}

/// Runs the race for a fixed set of items.
#[derive(Debug)]
pub struct FleetRaceSimulator {
    items: Vec<FleetItem>,
    config: FleetRaceConfig,
}

impl FleetRaceSimulator {
    pub fn new(items: Vec<FleetItem>, config: FleetRaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if items.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if config.exhaustion_milestone > items.len() {
            debug!(
                milestone = config.exhaustion_milestone,
                items = items.len(),
                "exhaustion milestone exceeds item count and can never be reached"
            );
        }
        Ok(Self { items, config })
    }

    pub fn items(&self) -> &[FleetItem] {
        &self.items
    }

    pub fn run(&self) -> Result<RaceSummary, SimulationError> {
        self.execute(None)
    }

    /// Like [`run`](Self::run), but stops at the next trial boundary once
    /// `cancel` is raised.
    pub fn run_cancellable(&self, cancel: &AtomicBool) -> Result<RaceSummary, SimulationError> {
        self.execute(Some(cancel))
    }

    /// Plays a single trial to completion.
    pub fn simulate_trial(&self, rng: &mut dyn RngCore) -> RaceOutcome {
        let mut state = TrialState::new(
            &self.items,
            self.config.exhaustion_milestone,
            self.config.volume_milestone,
        );
        while state.day() < self.config.max_days && !state.is_settled() {
            state.step_day(rng);
        }
        state.finish()
    }

    fn execute(&self, cancel: Option<&AtomicBool>) -> Result<RaceSummary, SimulationError> {
        let cfg = &self.config;
        let seed = resolve_seed(cfg.seed);

        info!(
            items = self.items.len(),
            trials = cfg.number_of_simulations,
            max_days = cfg.max_days,
            exhaustion_milestone = cfg.exhaustion_milestone,
            volume_milestone = ?cfg.volume_milestone,
            seed,
            "running fleet race"
        );

        let outcomes = run_trials(cfg.number_of_simulations, seed, cancel, |_, rng| {
            self.simulate_trial(rng)
        })?;

        let summary = self.aggregate(&outcomes, seed);
        info!(
            mean_days_to_exhaustion = summary.days_to_exhaustion.mean,
            p95_days_to_exhaustion = summary.days_to_exhaustion.p95,
            "fleet race finished"
        );
        Ok(summary)
    }

    fn aggregate(&self, outcomes: &[RaceOutcome], seed: u64) -> RaceSummary {
        let cfg = &self.config;
        let trials = outcomes.len();
        let n = trials as f64;
        let max_days = cfg.max_days;

        let exhaustion_days: Vec<f64> = outcomes
            .iter()
            .map(|o| o.days_to_exhaustion.unwrap_or(max_days) as f64)
            .collect();
        let exhaustion_reached = outcomes
            .iter()
            .filter(|o| o.days_to_exhaustion.is_some())
            .count();

        let volume_reached = outcomes.iter().any(|o| o.days_to_volume.is_some());
        let days_to_volume = volume_reached.then(|| {
            let days: Vec<f64> = outcomes
                .iter()
                .map(|o| o.days_to_volume.unwrap_or(max_days) as f64)
                .collect();
            Summary::from_values(&days)
        });

        let volume_before_exhaustion_probability = cfg.volume_milestone.map(|_| {
            let wins = outcomes
                .iter()
                .filter(|o| match (o.days_to_volume, o.days_to_exhaustion) {
                    (Some(v), Some(e)) => v <= e,
                    (Some(_), None) => true,
                    (None, _) => false,
                })
                .count();
            wins as f64 / n
        });

        let sales: Vec<f64> = outcomes.iter().map(|o| o.sales_at_exhaustion as f64).collect();

        let mut counts = vec![0usize; self.items.len()];
        for outcome in outcomes {
            for &index in &outcome.first_exhausted {
                counts[index] += 1;
            }
        }
        let item_exhaustion: Vec<ItemExhaustion> = self
            .items
            .iter()
            .zip(&counts)
            .map(|(item, &count)| ItemExhaustion {
                item_name: item.name.clone(),
                count,
                frequency: count as f64 / n,
            })
            .collect();

        // Stable sort: equal counts keep declaration order.
        let mut top_items: Vec<ItemExhaustion> = item_exhaustion
            .iter()
            .filter(|e| e.count > 0)
            .cloned()
            .collect();
        top_items.sort_by(|a, b| b.count.cmp(&a.count));
        top_items.truncate(cfg.top_n);

        let series = cfg.keep_series.then(|| {
            outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| RaceTrialRecord {
                    simulation: i + 1,
                    days_to_exhaustion: o.days_to_exhaustion.unwrap_or(max_days),
                    days_to_volume: o.days_to_volume,
                    sales_at_exhaustion: o.sales_at_exhaustion,
                })
                .collect()
        });

        RaceSummary {
            trials,
            max_days,
            exhaustion_milestone: cfg.exhaustion_milestone,
            volume_milestone: cfg.volume_milestone,
            days_to_exhaustion: Summary::from_values(&exhaustion_days),
            exhaustion_reached_probability: exhaustion_reached as f64 / n,
            days_to_volume,
            volume_before_exhaustion_probability,
            avg_sales_at_exhaustion: mean(&sales),
            item_exhaustion,
            top_items,
            seed,
            series,
        }
    }
}
