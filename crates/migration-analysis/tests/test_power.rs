use std::path::PathBuf;

use approx::assert_abs_diff_eq;

use migration_analysis::execution_time::analyze_execution_times;
use migration_analysis::loader::load_results;
use migration_analysis::placement::analyze_placements;
use migration_analysis::power::{analyze_power, analyze_power_table};
use migration_analysis::table::{RawTable, TableKind};

fn data_dir(name: &str) -> PathBuf {
    PathBuf::from(format!("test-data/{}", name))
}

#[test]
// The declared totals differ from the per-host sums by rounding in the source
// file and must be taken verbatim, while the per-host aggregates exclude the
// sentinel row.
fn test_total_row_preferred() {
    let tables = load_results(&data_dir("results")).unwrap();
    let results = analyze_power(&tables);
    let summary = &results["first_fit"];

    assert_eq!(summary.total_power_consumption, 126.41);
    assert_eq!(summary.total_energy_consumption, 37.93);
    assert_eq!(summary.active_hosts, 2);
    assert_abs_diff_eq!(summary.average_power_consumption, 126.4 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(summary.max_power_consumption, 49.3);
}

#[test]
// Without a sentinel row the totals are the sums over all rows.
fn test_without_total_row() {
    let tables = load_results(&data_dir("results")).unwrap();
    let results = analyze_power(&tables);
    let summary = &results["worst_fit"];

    assert_eq!(summary.total_power_consumption, 120.0);
    assert_eq!(summary.average_power_consumption, 60.0);
    assert_eq!(summary.max_power_consumption, 100.0);
    assert_eq!(summary.active_hosts, 1);
    assert_eq!(summary.total_energy_consumption, 12.0);
}

#[test]
fn test_active_hosts_bound() {
    let tables = load_results(&data_dir("results")).unwrap();
    let results = analyze_power(&tables);

    for (strategy, summary) in &results {
        let rows = tables.power[strategy].row_count();
        assert!((summary.active_hosts as usize) <= rows);
    }
}

#[test]
fn test_missing_power_column_excluded() {
    let tables = load_results(&data_dir("edge")).unwrap();

    // the table loads fine, only the power analysis skips it
    assert!(tables.power.contains_key("broken"));
    assert!(analyze_power(&tables).is_empty());
}

#[test]
// A sentinel row with missing cells only wins for the values it carries.
fn test_total_row_with_missing_cells_falls_back() {
    let table = RawTable::new(
        "partial_total",
        TableKind::Power,
        vec![
            "Host".into(),
            "CPUUtilization".into(),
            "PowerConsumption(W)".into(),
            "TotalEnergyConsumption(Wh)".into(),
        ],
        vec![
            vec!["0".into(), "50".into(), "100".into(), "10".into()],
            vec!["Total".into(), "".into(), "".into(), "".into()],
        ],
    );
    let summary = analyze_power_table(&table).unwrap();

    assert_eq!(summary.total_power_consumption, 100.0);
    assert_eq!(summary.total_energy_consumption, 10.0);
    assert_eq!(summary.average_power_consumption, 100.0);
    assert_eq!(summary.active_hosts, 1);
}

#[test]
// Re-loading and re-aggregating the same inputs produces identical values.
fn test_determinism() {
    let first = load_results(&data_dir("results")).unwrap();
    let second = load_results(&data_dir("results")).unwrap();

    assert_eq!(analyze_power(&first), analyze_power(&second));
    assert_eq!(
        analyze_execution_times(&first),
        analyze_execution_times(&second)
    );
    assert_eq!(analyze_placements(&first), analyze_placements(&second));
}
