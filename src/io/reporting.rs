// src/io/reporting.rs

use crate::simulation::{CycleResult, ItemExhaustion, RaceTrialRecord};
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tracing::info;

/// One trial of one item's cycle simulation, as exported.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSeriesRow<'a> {
    pub item_name: &'a str,
    pub simulation: usize,
    pub cycle_demand: u64,
    pub par_level: u32,
    pub avg_daily_sales: f64,
    pub daily_std: f64,
}

/// Flattens the kept per-trial series of each result into export rows.
/// Results run without a series contribute nothing.
pub fn cycle_series_rows(results: &[CycleResult]) -> Vec<CycleSeriesRow<'_>> {
    results
        .iter()
        .flat_map(|r| {
            r.simulated_sales
                .iter()
                .flatten()
                .enumerate()
                .map(move |(i, &demand)| CycleSeriesRow {
                    item_name: &r.item_name,
                    simulation: i + 1,
                    cycle_demand: demand,
                    par_level: r.current_par_level,
                    avg_daily_sales: r.avg_daily_sales,
                    daily_std: r.daily_std,
                })
        })
        .collect()
}

/// Serializes `rows` to a CSV file with a header from the field names.
fn write_rows<T: Serialize>(file_path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(file_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = rows.len(), path = %file_path.display(), "exported csv");
    Ok(())
}

/// Writes one summary row per item.
pub fn write_cycle_results(
    file_path: impl AsRef<Path>,
    results: &[CycleResult],
) -> Result<(), Box<dyn Error>> {
    write_rows(file_path.as_ref(), results)
}

/// Writes every kept trial of every item.
pub fn write_cycle_series(
    file_path: impl AsRef<Path>,
    results: &[CycleResult],
) -> Result<(), Box<dyn Error>> {
    write_rows(file_path.as_ref(), &cycle_series_rows(results))
}

/// Writes the per-trial outcomes of a fleet race.
pub fn write_race_series(
    file_path: impl AsRef<Path>,
    series: &[RaceTrialRecord],
) -> Result<(), Box<dyn Error>> {
    write_rows(file_path.as_ref(), series)
}

/// Writes how often each item was among the first exhausted.
pub fn write_item_frequencies(
    file_path: impl AsRef<Path>,
    items: &[ItemExhaustion],
) -> Result<(), Box<dyn Error>> {
    write_rows(file_path.as_ref(), items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::DemandKind;
    use crate::simulation::RiskTier;

    fn result(series: Option<Vec<u64>>) -> CycleResult {
        CycleResult {
            item_name: "Cola".into(),
            avg_daily_sales: 1.5,
            daily_std: 2.0,
            demand_kind: DemandKind::NegativeBinomial,
            p95_cycle_demand: 40.0,
            avg_cycle_demand: 31,
            effective_inventory: 27,
            availability: 0.9,
            stockout_probability: 0.1,
            current_par_level: 30,
            risk_tier: RiskTier::Medium,
            seed: 1,
            simulated_sales: series,
        }
    }

    #[test]
    fn series_rows_are_numbered_from_one() {
        let results = vec![result(Some(vec![10, 12])), result(None)];
        let rows = cycle_series_rows(&results);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].simulation, 1);
        assert_eq!(rows[1].simulation, 2);
        assert_eq!(rows[1].cycle_demand, 12);
    }

    #[test]
    fn summary_csv_has_stable_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_cycle_results(&path, &[result(None)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "item_name,avg_daily_sales,daily_std,demand_kind,p95_cycle_demand,\
             avg_cycle_demand,effective_inventory,availability,stockout_probability,\
             current_par_level,risk_tier,seed"
        );
        assert!(text.contains("NegativeBinomial"));
    }

    #[test]
    fn race_series_writes_blank_for_unreached_volume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.csv");
        let series = vec![RaceTrialRecord {
            simulation: 1,
            days_to_exhaustion: 12,
            days_to_volume: None,
            sales_at_exhaustion: 80,
        }];
        write_race_series(&path, &series).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("simulation,days_to_exhaustion,days_to_volume,sales_at_exhaustion")
        );
        assert_eq!(lines.next(), Some("1,12,,80"));
    }
}
