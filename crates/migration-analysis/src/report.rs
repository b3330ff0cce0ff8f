//! Export of comparison records and placement series to files.
//!
//! Thin presentation layer: each function writes one output file once and
//! has no other effects. Absent summary parts become empty cells in CSV and
//! null in JSON, so a partial record is never mistaken for a zero one.

use std::fs::File;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::comparison::ComparisonRecord;
use crate::placement::PlacementSummary;

/// Writes the per-strategy comparison table, one row per strategy.
pub fn save_comparison_csv(records: &[ComparisonRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record([
        "Strategy",
        "TotalPower(W)",
        "AveragePower(W)",
        "MaxPower(W)",
        "ActiveHosts",
        "TotalEnergy(Wh)",
        "MinExecTime(s)",
        "MaxExecTime(s)",
        "AvgExecTime(s)",
        "TotalExecTime(s)",
        "Cloudlets",
    ])?;
    for record in records {
        let power = record.power.as_ref();
        let times = record.execution_time.as_ref();
        let stats = times.and_then(|summary| summary.stats);
        wtr.write_record([
            record.strategy.clone(),
            float_cell(power.map(|p| p.total_power_consumption)),
            float_cell(power.map(|p| p.average_power_consumption)),
            float_cell(power.map(|p| p.max_power_consumption)),
            int_cell(power.map(|p| p.active_hosts as usize)),
            float_cell(power.map(|p| p.total_energy_consumption)),
            float_cell(stats.map(|s| s.min)),
            float_cell(stats.map(|s| s.max)),
            float_cell(stats.map(|s| s.avg)),
            float_cell(stats.map(|s| s.total)),
            int_cell(times.map(|t| t.cloudlet_count)),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the per-host VM count series, one row per strategy/host pair.
pub fn save_placement_csv(
    placements: &IndexMap<String, PlacementSummary>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["Strategy", "Host", "VmCount"])?;
    for (strategy, summary) in placements {
        for (host, count) in &summary.vms_per_host {
            wtr.write_record([strategy.as_str(), host.as_str(), &count.to_string()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Dumps the merged records and placement series as pretty-printed JSON.
pub fn save_results_json(
    records: &[ComparisonRecord],
    placements: &IndexMap<String, PlacementSummary>,
    path: &Path,
) -> io::Result<()> {
    #[derive(Serialize)]
    struct Results<'a> {
        comparison: &'a [ComparisonRecord],
        placements: &'a IndexMap<String, PlacementSummary>,
    }

    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(
        &mut file,
        &Results {
            comparison: records,
            placements,
        },
    )?;
    Ok(())
}

fn float_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn int_cell(value: Option<usize>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
