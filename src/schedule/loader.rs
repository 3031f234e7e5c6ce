//! CSV-based fee schedule loader
//!
//! Loads a fee schedule from a two-column `key,value` CSV in data/schedules/

use super::{FeeModel, FeeSchedule};
use crate::error::{Result, SimulatorError};
use log::info;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Default path to the bundled fee schedules
pub const DEFAULT_SCHEDULES_PATH: &str = "data/schedules";

/// Load raw `key -> value` pairs from a schedule CSV
pub fn load_fee_table(path: &Path) -> Result<HashMap<String, f64>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut table = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let key = record[0].trim().to_string();
        let value: f64 = record[1].trim().parse()?;
        table.insert(key, value);
    }

    Ok(table)
}

fn required(table: &HashMap<String, f64>, key: &str) -> Result<f64> {
    table
        .get(key)
        .copied()
        .ok_or_else(|| SimulatorError::config(format!("missing fee constant {key}")))
}

fn optional_model(table: &HashMap<String, f64>, prefix: &str) -> Option<FeeModel> {
    let keys = ["per_primary", "per_secondary_a", "per_secondary_b"].map(|k| format!("{prefix}_{k}"));
    if keys.iter().all(|k| !table.contains_key(k)) {
        return None;
    }
    // Partially specified models default the missing coefficients to zero
    let get = |k: &String| table.get(k).copied().unwrap_or(0.0);
    Some(FeeModel {
        per_primary: get(&keys[0]),
        per_secondary_a: get(&keys[1]),
        per_secondary_b: get(&keys[2]),
    })
}

/// Build a validated schedule from a schedule CSV
pub fn load_schedule(path: &Path) -> Result<FeeSchedule> {
    let table = load_fee_table(path)?;

    let baseline = FeeModel {
        per_primary: required(&table, "baseline_per_primary")?,
        per_secondary_a: required(&table, "baseline_per_secondary_a")?,
        per_secondary_b: required(&table, "baseline_per_secondary_b")?,
    };
    let alternative = FeeModel {
        per_primary: required(&table, "alternative_per_primary")?,
        per_secondary_a: required(&table, "alternative_per_secondary_a")?,
        per_secondary_b: required(&table, "alternative_per_secondary_b")?,
    };

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("custom")
        .to_string();

    let schedule = FeeSchedule::new(
        name,
        baseline,
        alternative,
        required(&table, "dedicated_surcharge")?,
        optional_model(&table, "discounted"),
        required(&table, "unit_price_usd")?,
    )?;

    info!("loaded fee schedule '{}' from {}", schedule.name(), path.display());
    Ok(schedule)
}

/// Load a bundled schedule by name from the default directory
pub fn load_named(name: &str) -> Result<FeeSchedule> {
    load_schedule(&Path::new(DEFAULT_SCHEDULES_PATH).join(format!("{name}.csv")))
}
