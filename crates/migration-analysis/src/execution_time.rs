//! Per-strategy execution time statistics from policy tables.

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

use crate::loader::LoadedTables;
use crate::stats::Sample;
use crate::table::{ColumnResolver, RawTable};

/// Lookup for the execution time column, which is named slightly differently
/// across exporter versions.
pub const EXEC_TIME_COLUMN: ColumnResolver =
    ColumnResolver::new(&["ExecTime", "ExecutionTime", "Exec Time"], &["exec", "time"]);

/// Aggregates over the non-missing execution time values of one strategy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExecTimeStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub total: f64,
}

/// Execution time statistics of one strategy.
///
/// `stats` is `None` when the table has no usable execution time values at
/// all; `cloudlet_count` still reports the table size in that case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecutionTimeSummary {
    pub cloudlet_count: usize,
    pub stats: Option<ExecTimeStats>,
}

/// Computes execution time summaries for all strategies with a policy table.
///
/// A strategy whose table has no recognizable execution time column is
/// reported and excluded from the results; the others proceed.
pub fn analyze_execution_times(tables: &LoadedTables) -> IndexMap<String, ExecutionTimeSummary> {
    let mut results = IndexMap::new();
    for (strategy, table) in &tables.policy {
        match analyze_execution_time_table(table) {
            Some(summary) => {
                results.insert(strategy.clone(), summary);
            }
            None => warn!(
                "strategy '{}' has no execution time column, timing analysis skipped",
                strategy
            ),
        }
    }
    results
}

/// Computes the execution time summary of a single policy table.
///
/// The column is coerced cell by cell; unparseable entries are excluded from
/// the aggregates but still count towards `cloudlet_count`.
pub fn analyze_execution_time_table(table: &RawTable) -> Option<ExecutionTimeSummary> {
    let column = table.resolve_column(&EXEC_TIME_COLUMN)?;
    let sample: Sample = (0..table.row_count())
        .filter_map(|row| column.cell_f64(row))
        .collect();
    let stats = if sample.is_empty() {
        None
    } else {
        Some(ExecTimeStats {
            min: sample.min(),
            max: sample.max(),
            avg: sample.mean(),
            total: sample.sum(),
        })
    };
    Some(ExecutionTimeSummary {
        cloudlet_count: table.row_count(),
        stats,
    })
}
