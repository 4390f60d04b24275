// src/io/items.rs

use crate::model::ItemRecord;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};

/// Reads item records from a CSV file.
///
/// Expected header: `item_name,avg_daily_sales,daily_std,par_level` with an
/// optional `capacity` column.
pub fn read_item_records(file_path: impl AsRef<Path>) -> Result<Vec<ItemRecord>, Box<dyn Error>> {
    let path = file_path.as_ref();
    let mut rdr = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in rdr.deserialize() {
        let record: ItemRecord = row?;
        records.push(record);
    }

    info!(rows = records.len(), path = %path.display(), "loaded item records");
    Ok(records)
}

/// Drops discontinued items and items with no positive demand.
pub fn filter_active(records: Vec<ItemRecord>) -> Vec<ItemRecord> {
    records
        .into_iter()
        .filter(|r| {
            let keep = !r.is_discontinued()
                && r.avg_daily_sales.is_finite()
                && r.avg_daily_sales > 0.0;
            if !keep {
                debug!(item = %r.item_name, "skipping inactive item");
            }
            keep
        })
        .collect()
}
