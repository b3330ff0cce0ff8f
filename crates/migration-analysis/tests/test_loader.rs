use std::path::{Path, PathBuf};

use migration_analysis::loader::{load_results, SkipReason};
use migration_analysis::table::{ColumnValues, RawTable, TableKind};

fn data_dir(name: &str) -> PathBuf {
    PathBuf::from(format!("test-data/{}", name))
}

#[test]
fn test_classification_and_order() {
    let tables = load_results(&data_dir("results")).unwrap();

    let power: Vec<&str> = tables.power.keys().map(String::as_str).collect();
    let policy: Vec<&str> = tables.policy.keys().map(String::as_str).collect();
    assert_eq!(power, ["first_fit", "worst_fit"]);
    assert_eq!(policy, ["best_fit", "first_fit", "worst_fit"]);
    assert!(tables.skipped.is_empty());

    assert_eq!(tables.power["first_fit"].kind(), TableKind::Power);
    assert_eq!(tables.policy["first_fit"].kind(), TableKind::Policy);
    assert_eq!(tables.power["first_fit"].strategy(), "first_fit");
}

#[test]
fn test_policy_preamble_is_discarded() {
    let tables = load_results(&data_dir("results")).unwrap();
    let table = &tables.policy["first_fit"];

    assert_eq!(table.row_count(), 3);
    // header tokens are trimmed, the units row never shows up as data
    let cloudlet = table.column("Cloudlet").unwrap();
    assert_eq!(cloudlet.cell_text(0), "0");
    let host = table.column("Host").unwrap();
    assert_eq!(host.cell_text(0), "h1");
    assert!(table.column("ExecTime").is_some());
}

#[test]
fn test_skipped_files_are_reported() {
    let tables = load_results(&data_dir("edge")).unwrap();

    let power: Vec<&str> = tables.power.keys().map(String::as_str).collect();
    let policy: Vec<&str> = tables.policy.keys().map(String::as_str).collect();
    assert_eq!(power, ["broken"]);
    assert_eq!(
        policy,
        ["degenerate", "minimal", "placement_only", "round_robin"]
    );

    assert_eq!(tables.skipped.len(), 2);
    assert_eq!(tables.skipped[0].reason, SkipReason::Empty);
    assert!(tables.skipped[0].path.ends_with("migration_empty_power.csv"));
    assert_eq!(tables.skipped[1].reason, SkipReason::UnrecognizedKind);
    assert!(tables.skipped[1].path.ends_with("migration_notes.csv"));
}

#[test]
fn test_missing_directory_is_an_error() {
    assert!(load_results(Path::new("test-data/no_such_dir")).is_err());
}

#[test]
fn test_column_typing() {
    let table = RawTable::new(
        "typing",
        TableKind::Policy,
        vec!["Id".into(), "Load".into(), "Label".into(), "Count".into()],
        vec![
            vec!["1".into(), "1.5".into(), "a".into(), "".into()],
            vec!["2".into(), "2".into(), "1".into(), "3".into()],
        ],
    );

    match &table.column("Id").unwrap().values {
        ColumnValues::Int(vals) => assert_eq!(vals, &vec![Some(1), Some(2)]),
        other => panic!("expected integer column, got {:?}", other),
    }
    match &table.column("Load").unwrap().values {
        ColumnValues::Float(vals) => assert_eq!(vals, &vec![Some(1.5), Some(2.0)]),
        other => panic!("expected float column, got {:?}", other),
    }
    // one text cell makes the whole column string-typed
    match &table.column("Label").unwrap().values {
        ColumnValues::Str(vals) => assert_eq!(vals, &vec!["a".to_string(), "1".to_string()]),
        other => panic!("expected string column, got {:?}", other),
    }
    // empty cells do not block numeric inference, they are just missing
    match &table.column("Count").unwrap().values {
        ColumnValues::Int(vals) => assert_eq!(vals, &vec![None, Some(3)]),
        other => panic!("expected integer column, got {:?}", other),
    }

    // numeric view of a string column: unparseable cells are missing
    let label = table.column("Label").unwrap();
    assert_eq!(label.cell_f64(0), None);
    assert_eq!(label.cell_f64(1), Some(1.0));
}
