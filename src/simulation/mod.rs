pub mod config;
pub mod cycle;
pub mod fleet;
pub mod risk;
pub mod stats;
pub mod trials;

pub use config::{CycleConfig, FleetRaceConfig};
pub use cycle::{run_cycle, CycleResult, CycleSimulator};
pub use fleet::{
    FleetRaceSimulator, ItemExhaustion, RaceOutcome, RaceSummary, RaceTrialRecord, TrialState,
};
pub use risk::{CapacityFlag, RiskTier};
pub use stats::Summary;
