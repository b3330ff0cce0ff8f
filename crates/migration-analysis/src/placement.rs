//! Distribution of VMs across hosts.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use crate::loader::LoadedTables;
use crate::table::{columns, RawTable};

/// VM counts per host for one strategy.
///
/// Counts are row counts, so duplicate VM entries for one host are counted
/// as many times as they occur. Min/max over an empty host set are 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlacementSummary {
    pub vms_per_host: IndexMap<String, usize>,
    pub max_vms_per_host: usize,
    pub min_vms_per_host: usize,
}

/// Computes VM placement distributions for all strategies with a policy table.
pub fn analyze_placements(tables: &LoadedTables) -> IndexMap<String, PlacementSummary> {
    tables
        .policy
        .iter()
        .map(|(strategy, table)| (strategy.clone(), analyze_placement_table(table)))
        .collect()
}

/// Counts table rows per host.
///
/// Tables without the host and VM columns produce an empty distribution with
/// zero counts. Host keys are sorted, numerically when they parse as numbers,
/// so the output never depends on the input row order.
pub fn analyze_placement_table(table: &RawTable) -> PlacementSummary {
    let host = match table.column(columns::HOST) {
        Some(column) => column,
        None => return PlacementSummary::default(),
    };
    if table.column(columns::VM).is_none() {
        return PlacementSummary::default();
    }

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for row in 0..table.row_count() {
        *counts.entry(host.cell_text(row)).or_insert(0) += 1;
    }
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| compare_hosts(&a.0, &b.0));

    let max_vms_per_host = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let min_vms_per_host = entries.iter().map(|(_, count)| *count).min().unwrap_or(0);
    PlacementSummary {
        vms_per_host: entries.into_iter().collect(),
        max_vms_per_host,
        min_vms_per_host,
    }
}

// Host identifiers are usually numeric, sort them as numbers when possible.
fn compare_hosts(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
