use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vending_risk::io::{items, reporting};
use vending_risk::model::{FleetItem, InventoryRounding};
use vending_risk::simulation::{
    CapacityFlag, CycleConfig, CycleSimulator, FleetRaceConfig, FleetRaceSimulator,
};

#[derive(Parser, Debug)]
#[command(name = "vending-risk")]
#[command(about = "Monte Carlo stockout and exhaustion forecasts for vending machines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Per-item stockout risk over one service cycle
    Cycle {
        /// CSV of item records
        #[arg(long)]
        items: PathBuf,

        #[arg(long, default_value_t = 21)]
        days_between_visits: u32,

        #[arg(long, default_value_t = 2.0)]
        lead_time_days: f64,

        #[arg(long, default_value_t = 10_000)]
        simulations: usize,

        /// Round effective inventory up or down at random by its fraction
        #[arg(long)]
        stochastic_rounding: bool,

        #[arg(long)]
        seed: Option<u64>,

        /// Where to write one summary row per item
        #[arg(long, default_value = "cycle_results.csv")]
        out: PathBuf,

        /// Also write every trial's cycle demand here
        #[arg(long)]
        series_out: Option<PathBuf>,
    },

    /// Days until a machine has enough empty slots for an emergency visit
    Race {
        /// CSV of item records
        #[arg(long)]
        items: PathBuf,

        #[arg(long, default_value_t = 365)]
        max_days: u32,

        /// Empty slots that trigger a visit
        #[arg(long, default_value_t = 3)]
        exhaustion_milestone: usize,

        /// Cumulative machine demand to race against
        #[arg(long)]
        volume_milestone: Option<u64>,

        #[arg(long, default_value_t = 10_000)]
        simulations: usize,

        #[arg(long, default_value_t = 10)]
        top: usize,

        #[arg(long)]
        seed: Option<u64>,

        /// Where to write per-item exhaustion frequencies
        #[arg(long, default_value = "item_exhaustion.csv")]
        out: PathBuf,

        /// Also write every trial's outcome here
        #[arg(long)]
        series_out: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_env("VENDING_RISK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cycle {
            items: items_path,
            days_between_visits,
            lead_time_days,
            simulations,
            stochastic_rounding,
            seed,
            out,
            series_out,
        } => {
            let records = items::filter_active(items::read_item_records(&items_path)?);

            let rounding = if stochastic_rounding {
                InventoryRounding::Stochastic
            } else {
                InventoryRounding::Floor
            };
            let mut base = CycleConfig::default()
                .with_days_between_visits(days_between_visits)
                .with_lead_time_days(lead_time_days)
                .with_simulations(simulations)
                .with_rounding(rounding)
                .with_series(series_out.is_some());
            if let Some(seed) = seed {
                base = base.with_seed(seed);
            }

            let mut results = Vec::with_capacity(records.len());
            for record in &records {
                let config = base.clone().with_par_level(record.par_level);
                let result = CycleSimulator::new(config, record.profile())?.run()?;

                let flag = record
                    .capacity
                    .map(|cap| format!("{:?}", CapacityFlag::classify(&result, cap)))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}: stockout {:.2}%, avg cycle demand {}, p95 {:.1}, effective inventory {}, par {}, tier {:?}, capacity {}",
                    result.item_name,
                    result.stockout_probability * 100.0,
                    result.avg_cycle_demand,
                    result.p95_cycle_demand,
                    result.effective_inventory,
                    result.current_par_level,
                    result.risk_tier,
                    flag,
                );
                results.push(result);
            }

            reporting::write_cycle_results(&out, &results)?;
            if let Some(path) = series_out {
                reporting::write_cycle_series(&path, &results)?;
            }
        }

        Commands::Race {
            items: items_path,
            max_days,
            exhaustion_milestone,
            volume_milestone,
            simulations,
            top,
            seed,
            out,
            series_out,
        } => {
            let records = items::filter_active(items::read_item_records(&items_path)?);
            let fleet: Vec<FleetItem> = records.iter().map(FleetItem::from_record).collect();

            let mut config = FleetRaceConfig::default()
                .with_simulations(simulations)
                .with_max_days(max_days)
                .with_exhaustion_milestone(exhaustion_milestone)
                .with_top_n(top)
                .with_series(series_out.is_some());
            if let Some(units) = volume_milestone {
                config = config.with_volume_milestone(units);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            let summary = FleetRaceSimulator::new(fleet, config)?.run()?;

            let d = &summary.days_to_exhaustion;
            println!(
                "Days to {} outs: avg {:.1}, p50 {:.0}, p75 {:.0}, p95 {:.0}",
                summary.exhaustion_milestone, d.mean, d.p50, d.p75, d.p95
            );
            println!(
                "Avg demand at {} outs: {:.1}",
                summary.exhaustion_milestone, summary.avg_sales_at_exhaustion
            );
            match (&summary.days_to_volume, summary.volume_milestone) {
                (Some(v), Some(units)) => println!(
                    "Days to {} units: avg {:.1}, p50 {:.0}, p75 {:.0}, p95 {:.0}",
                    units, v.mean, v.p50, v.p75, v.p95
                ),
                (None, Some(units)) => {
                    warn!(units, "volume milestone was not reached in any trial")
                }
                _ => {}
            }
            if let Some(p) = summary.volume_before_exhaustion_probability {
                println!("Volume milestone first: {:.1}%", p * 100.0);
            }
            for (rank, item) in summary.top_items.iter().enumerate() {
                println!("{:>2}. {} {:.1}%", rank + 1, item.item_name, item.frequency * 100.0);
            }

            reporting::write_item_frequencies(&out, &summary.item_exhaustion)?;
            if let (Some(path), Some(series)) = (series_out, &summary.series) {
                reporting::write_race_series(&path, series)?;
            }
        }
    }

    Ok(())
}
