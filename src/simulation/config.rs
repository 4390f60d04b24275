// src/simulation/config.rs

use crate::error::ConfigError;
use crate::model::InventoryRounding;

/// Parameters for the per-item service-cycle simulation.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub days_between_visits: u32,
    pub lead_time_days: f64,
    /// Stock left at the last visit.
    pub par_level: u32,
    pub number_of_simulations: usize,
    pub rounding: InventoryRounding,
    /// Fixed seed for reproducible runs. `None` draws one per run.
    pub seed: Option<u64>,
    /// Keep every trial's cycle demand in the result.
    pub keep_series: bool,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            days_between_visits: 21,
            lead_time_days: 2.0,
            par_level: 0,
            number_of_simulations: 10_000,
            rounding: InventoryRounding::Floor,
            seed: None,
            keep_series: false,
        }
    }
}

impl CycleConfig {
    pub fn with_par_level(mut self, par_level: u32) -> Self {
        self.par_level = par_level;
        self
    }

    pub fn with_days_between_visits(mut self, days: u32) -> Self {
        self.days_between_visits = days;
        self
    }

    pub fn with_lead_time_days(mut self, days: f64) -> Self {
        self.lead_time_days = days;
        self
    }

    pub fn with_simulations(mut self, n: usize) -> Self {
        self.number_of_simulations = n;
        self
    }

    pub fn with_rounding(mut self, rounding: InventoryRounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_series(mut self, keep: bool) -> Self {
        self.keep_series = keep;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_simulations < 1 {
            return Err(ConfigError::NoTrials);
        }
        if self.days_between_visits < 1 {
            return Err(ConfigError::EmptyCycle);
        }
        if !(self.lead_time_days.is_finite() && self.lead_time_days >= 0.0) {
            return Err(ConfigError::InvalidLeadTime(self.lead_time_days));
        }
        Ok(())
    }
}

/// Parameters for the whole-machine race to exhaustion.
#[derive(Debug, Clone)]
pub struct FleetRaceConfig {
    pub number_of_simulations: usize,
    pub max_days: u32,
    /// How many distinct exhausted items call for an emergency visit.
    pub exhaustion_milestone: usize,
    /// Cumulative machine demand to race against. `None` runs the
    /// exhaustion race alone.
    pub volume_milestone: Option<u64>,
    /// How many items to list in the most-frequently-exhausted ranking.
    pub top_n: usize,
    pub seed: Option<u64>,
    /// Keep every trial's outcome in the summary.
    pub keep_series: bool,
}

impl Default for FleetRaceConfig {
    fn default() -> Self {
        Self {
            number_of_simulations: 10_000,
            max_days: 365,
            exhaustion_milestone: 3,
            volume_milestone: None,
            top_n: 10,
            seed: None,
            keep_series: false,
        }
    }
}

impl FleetRaceConfig {
    pub fn with_simulations(mut self, n: usize) -> Self {
        self.number_of_simulations = n;
        self
    }

    pub fn with_max_days(mut self, days: u32) -> Self {
        self.max_days = days;
        self
    }

    pub fn with_exhaustion_milestone(mut self, items: usize) -> Self {
        self.exhaustion_milestone = items;
        self
    }

    pub fn with_volume_milestone(mut self, units: u64) -> Self {
        self.volume_milestone = Some(units);
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_series(mut self, keep: bool) -> Self {
        self.keep_series = keep;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_simulations < 1 {
            return Err(ConfigError::NoTrials);
        }
        if self.max_days < 1 {
            return Err(ConfigError::NoDays);
        }
        if self.exhaustion_milestone < 1 {
            return Err(ConfigError::ZeroMilestone);
        }
        Ok(())
    }
}
