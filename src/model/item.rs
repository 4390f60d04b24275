// src/model/item.rs

use crate::demand::{demand_model, DemandSampler};
use serde::{Deserialize, Serialize};

/// Daily demand statistics for one item. Built once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDemandProfile {
    pub item_name: String,
    pub avg_daily_sales: f64,
    pub daily_std: f64,
}

impl ItemDemandProfile {
    pub fn new(item_name: impl Into<String>, avg_daily_sales: f64, daily_std: f64) -> Self {
        Self {
            item_name: item_name.into(),
            avg_daily_sales,
            daily_std,
        }
    }

    /// Builds the sampler matching these statistics.
    pub fn sampler(&self) -> Box<dyn DemandSampler> {
        demand_model(self.avg_daily_sales, self.daily_std)
    }
}

/// An item as handed over by the loader: statistics plus slot sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_name: String,
    pub avg_daily_sales: f64,
    pub daily_std: f64,
    pub par_level: u32,
    /// Physical slot capacity, when known.
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl ItemRecord {
    pub fn profile(&self) -> ItemDemandProfile {
        ItemDemandProfile::new(self.item_name.clone(), self.avg_daily_sales, self.daily_std)
    }

    /// Discontinued items are prefixed `zz` in the item master.
    pub fn is_discontinued(&self) -> bool {
        self.item_name.to_lowercase().starts_with("zz")
    }
}

/// One item taking part in a fleet race.
#[derive(Debug)]
pub struct FleetItem {
    pub name: String,
    pub par_level: u32,
    pub demand: Box<dyn DemandSampler>,
}

impl FleetItem {
    pub fn new(name: impl Into<String>, par_level: u32, demand: Box<dyn DemandSampler>) -> Self {
        Self {
            name: name.into(),
            par_level,
            demand,
        }
    }

    pub fn from_record(record: &ItemRecord) -> Self {
        Self::new(
            record.item_name.clone(),
            record.par_level,
            record.profile().sampler(),
        )
    }
}

/// Stock of one item inside a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotInventory {
    pub on_hand: u32,
    pub exhausted: bool,
}

impl SlotInventory {
    pub fn new(par_level: u32) -> Self {
        Self {
            on_hand: par_level,
            exhausted: false,
        }
    }

    /// Sells what it can against `demand`.
    ///
    /// Returns the quantity actually vended.
    pub fn vend(&mut self, demand: u32) -> u32 {
        let fulfilled = demand.min(self.on_hand);
        self.on_hand -= fulfilled;
        fulfilled
    }

    /// Marks the slot exhausted the first time it is empty.
    ///
    /// Returns true only on that first call.
    pub fn mark_if_exhausted(&mut self) -> bool {
        if !self.exhausted && self.on_hand == 0 {
            self.exhausted = true;
            return true;
        }
        false
    }
}
