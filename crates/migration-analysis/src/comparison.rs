//! Merged cross-strategy comparison records.

use indexmap::IndexMap;
use serde::Serialize;

use crate::execution_time::ExecutionTimeSummary;
use crate::power::PowerSummary;

/// Per-strategy merge of the power and execution time summaries.
///
/// A strategy missing one of the two summaries keeps the corresponding part
/// empty; absent values are exported as empty cells or JSON null, never as
/// zeros.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub strategy: String,
    pub power: Option<PowerSummary>,
    pub execution_time: Option<ExecutionTimeSummary>,
}

/// Joins the per-strategy summaries into one ordered record set.
///
/// Strategies follow the power map order; strategies with only an execution
/// time summary are appended afterwards as partial records.
pub fn merge_summaries(
    power: &IndexMap<String, PowerSummary>,
    execution_times: &IndexMap<String, ExecutionTimeSummary>,
) -> Vec<ComparisonRecord> {
    let mut records: Vec<ComparisonRecord> = power
        .iter()
        .map(|(strategy, summary)| ComparisonRecord {
            strategy: strategy.clone(),
            power: Some(summary.clone()),
            execution_time: execution_times.get(strategy).cloned(),
        })
        .collect();

    for (strategy, summary) in execution_times {
        if !power.contains_key(strategy) {
            records.push(ComparisonRecord {
                strategy: strategy.clone(),
                power: None,
                execution_time: Some(summary.clone()),
            });
        }
    }

    records
}
