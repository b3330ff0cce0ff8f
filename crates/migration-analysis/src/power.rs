//! Per-strategy power and energy summary statistics.

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

use crate::loader::LoadedTables;
use crate::stats::Sample;
use crate::table::{columns, RawTable};

/// Host value marking a pre-aggregated totals row.
const TOTAL_SENTINEL: &str = "Total";

/// Power/energy statistics of one strategy.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PowerSummary {
    pub total_power_consumption: f64,
    pub average_power_consumption: f64,
    pub max_power_consumption: f64,
    pub active_hosts: u32,
    pub total_energy_consumption: f64,
}

/// Computes power summaries for all strategies with a power table.
///
/// Tables without the power consumption column are excluded with a warning;
/// the remaining strategies are still analyzed.
pub fn analyze_power(tables: &LoadedTables) -> IndexMap<String, PowerSummary> {
    let mut results = IndexMap::new();
    for (strategy, table) in &tables.power {
        match analyze_power_table(table) {
            Some(summary) => {
                results.insert(strategy.clone(), summary);
            }
            None => warn!(
                "strategy '{}' has no '{}' column, power analysis skipped",
                strategy,
                columns::POWER_CONSUMPTION
            ),
        }
    }
    results
}

/// Computes the power summary of a single table.
///
/// Some exporters emit a pre-aggregated "Total" row and some do not. Both
/// shapes produce comparable summaries: per-host aggregates are always
/// computed over the regular rows, and the declared totals are preferred over
/// the computed sums whenever the sentinel row carries them.
pub fn analyze_power_table(table: &RawTable) -> Option<PowerSummary> {
    let power = table.column(columns::POWER_CONSUMPTION)?;
    let host = table.column(columns::HOST);
    let cpu = table.column(columns::CPU_UTILIZATION);
    let energy = table.column(columns::TOTAL_ENERGY_CONSUMPTION);
    if energy.is_none() {
        warn!(
            "table '{}' has no '{}' column, energy totals default to 0",
            table.strategy(),
            columns::TOTAL_ENERGY_CONSUMPTION
        );
    }

    let total_row =
        host.and_then(|col| (0..table.row_count()).find(|&row| col.cell_text(row) == TOTAL_SENTINEL));

    let mut power_values = Sample::default();
    let mut computed_energy = 0.0;
    let mut active_hosts = 0;
    for row in 0..table.row_count() {
        if Some(row) == total_row {
            continue;
        }
        if let Some(value) = power.cell_f64(row) {
            power_values.add(value);
        }
        if let Some(value) = energy.and_then(|col| col.cell_f64(row)) {
            computed_energy += value;
        }
        if cpu.and_then(|col| col.cell_f64(row)).map_or(false, |util| util > 0.0) {
            active_hosts += 1;
        }
    }

    let declared_power = total_row.and_then(|row| power.cell_f64(row));
    let declared_energy = total_row.and_then(|row| energy.and_then(|col| col.cell_f64(row)));

    Some(PowerSummary {
        total_power_consumption: declared_power.unwrap_or_else(|| power_values.sum()),
        average_power_consumption: power_values.mean(),
        max_power_consumption: power_values.max(),
        active_hosts,
        total_energy_consumption: declared_energy.unwrap_or(computed_energy),
    })
}
