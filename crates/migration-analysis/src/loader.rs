//! Discovery and parsing of migration result files.

use std::fmt;
use std::fs::read_dir;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;
use log::{info, warn};

use crate::table::{RawTable, TableKind};

/// File name prefix identifying migration result files.
pub const RESULT_FILE_PREFIX: &str = "migration_";

/// Why a discovered result file produced no table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be opened or read.
    Unreadable(String),
    /// The file had no parseable header.
    Empty,
    /// The derived name matches neither the power nor the policy convention.
    UnrecognizedKind,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(err) => write!(f, "unreadable ({})", err),
            SkipReason::Empty => write!(f, "empty file"),
            SkipReason::UnrecognizedKind => write!(f, "unrecognized table kind"),
        }
    }
}

/// A discovered result file that was left out of the batch.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of a batch load: tables grouped by kind and keyed by strategy name,
/// plus the files that produced no table.
#[derive(Debug, Default)]
pub struct LoadedTables {
    pub power: IndexMap<String, RawTable>,
    pub policy: IndexMap<String, RawTable>,
    pub skipped: Vec<SkippedFile>,
}

/// Loads all migration result files from the given directory.
///
/// Files are processed in sorted name order so that the produced maps never
/// depend on the file system iteration order. A file that cannot be parsed is
/// recorded in `skipped` and does not fail the batch; only a missing or
/// unreadable directory is an error.
pub fn load_results(dir: &Path) -> io::Result<LoadedTables> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => continue,
        };
        if let Some(name) = stem.strip_prefix(RESULT_FILE_PREFIX) {
            files.push((name.to_string(), path));
        }
    }
    files.sort();

    let mut loaded = LoadedTables::default();
    for (name, path) in files {
        let (kind, strategy) = match classify(&name) {
            Some(classified) => classified,
            None => {
                info!("ignoring {}: unrecognized table kind", path.display());
                loaded.skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::UnrecognizedKind,
                });
                continue;
            }
        };
        let parsed = match kind {
            TableKind::Power => parse_power(&path),
            TableKind::Policy => parse_policy(&path),
        };
        match parsed {
            Ok((header, rows)) => {
                let map = match kind {
                    TableKind::Power => &mut loaded.power,
                    TableKind::Policy => &mut loaded.policy,
                };
                if map.contains_key(&strategy) {
                    warn!(
                        "duplicate {} table for strategy '{}', keeping the first ({} ignored)",
                        kind,
                        strategy,
                        path.display()
                    );
                    continue;
                }
                let table = RawTable::new(&strategy, kind, header, rows);
                info!(
                    "loaded {} table for strategy '{}' ({} rows)",
                    kind,
                    strategy,
                    table.row_count()
                );
                map.insert(strategy, table);
            }
            Err(reason) => {
                warn!("skipping {}: {}", path.display(), reason);
                loaded.skipped.push(SkippedFile { path, reason });
            }
        }
    }
    Ok(loaded)
}

// Table kind by substring search on the derived name, as the result files are
// named; the designator is stripped so that both tables of one strategy share
// a join key.
fn classify(name: &str) -> Option<(TableKind, String)> {
    if name.contains("power") {
        Some((TableKind::Power, name.replace("_power", "")))
    } else if name.contains("policy") {
        Some((TableKind::Policy, name.replace("_policy", "")))
    } else {
        None
    }
}

type Parsed = (Vec<String>, Vec<Vec<String>>);

/// Power tables: one header row defining column names verbatim, then data.
fn parse_power(path: &Path) -> Result<Parsed, SkipReason> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|err| SkipReason::Unreadable(err.to_string()))?;
    let header: Vec<String> = reader
        .headers()
        .map_err(|err| SkipReason::Unreadable(err.to_string()))?
        .iter()
        .map(String::from)
        .collect();
    if header.iter().all(|name| name.is_empty()) {
        return Err(SkipReason::Empty);
    }
    let rows = collect_rows(&mut reader)?;
    Ok((header, rows))
}

/// Policy tables: a column-name row and a units row, then data. The header
/// tokens and all cells are trimmed since the writer pads them with spaces.
fn parse_policy(path: &Path) -> Result<Parsed, SkipReason> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|err| SkipReason::Unreadable(err.to_string()))?;
    let mut records = reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|err| SkipReason::Unreadable(err.to_string()))?
            .iter()
            .map(String::from)
            .collect(),
        None => return Err(SkipReason::Empty),
    };
    if header.iter().all(|name| name.is_empty()) {
        return Err(SkipReason::Empty);
    }
    // units row
    match records.next() {
        Some(record) => {
            record.map_err(|err| SkipReason::Unreadable(err.to_string()))?;
        }
        None => return Err(SkipReason::Empty),
    }
    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|err| SkipReason::Unreadable(err.to_string()))?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok((header, rows))
}

fn collect_rows(reader: &mut csv::Reader<std::fs::File>) -> Result<Vec<Vec<String>>, SkipReason> {
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| SkipReason::Unreadable(err.to_string()))?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}
