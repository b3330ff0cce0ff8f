//! In-memory model of parsed result tables.

/// Well-known column names written by the simulator exports.
pub mod columns {
    pub const HOST: &str = "Host";
    pub const VM: &str = "VM";
    pub const CPU_UTILIZATION: &str = "CPUUtilization";
    pub const POWER_CONSUMPTION: &str = "PowerConsumption(W)";
    pub const TOTAL_ENERGY_CONSUMPTION: &str = "TotalEnergyConsumption(Wh)";
}

/// Kind of a migration result table, resolved once when the file is discovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Per-host power/energy report with an optional "Total" sentinel row.
    Power,
    /// Per-VM placement and execution time report.
    Policy,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Power => write!(f, "power"),
            TableKind::Policy => write!(f, "policy"),
        }
    }
}

/// Cell values of a single column.
///
/// The type is inferred over the whole column: integer if every non-empty
/// cell parses as an integer, float if every non-empty cell parses as a
/// number, string otherwise. Missing cells are `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<String>),
}

/// Named column of a table.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    /// Numeric view of a cell: `None` for missing or unparseable values.
    pub fn cell_f64(&self, row: usize) -> Option<f64> {
        match &self.values {
            ColumnValues::Int(vals) => vals.get(row).copied().flatten().map(|v| v as f64),
            ColumnValues::Float(vals) => vals.get(row).copied().flatten(),
            ColumnValues::Str(vals) => vals.get(row).and_then(|s| parse_number(s)),
        }
    }

    /// Text of a cell as it appears in the table; missing cells render empty.
    pub fn cell_text(&self, row: usize) -> String {
        match &self.values {
            ColumnValues::Int(vals) => vals
                .get(row)
                .copied()
                .flatten()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ColumnValues::Float(vals) => vals
                .get(row)
                .copied()
                .flatten()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ColumnValues::Str(vals) => vals.get(row).cloned().unwrap_or_default(),
        }
    }
}

/// Parsed table: an ordered set of typed columns sharing one row count.
///
/// Built once by the loader and immutable afterwards.
#[derive(Clone, Debug)]
pub struct RawTable {
    strategy: String,
    kind: TableKind,
    columns: Vec<Column>,
    row_count: usize,
}

impl RawTable {
    /// Builds a table from a header and raw data rows, inferring column types.
    ///
    /// Rows shorter than the header are padded with missing cells, extra
    /// trailing cells are dropped.
    pub fn new(strategy: &str, kind: TableKind, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        let mut columns = Vec::with_capacity(header.len());
        for (idx, name) in header.into_iter().enumerate() {
            let cells: Vec<&str> = rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            columns.push(Column {
                name,
                values: infer_column(&cells),
            });
        }
        Self {
            strategy: strategy.to_string(),
            kind,
            columns,
            row_count,
        }
    }

    /// Name of the strategy this table belongs to.
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Number of data rows (preamble rows are never counted).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column using a resolution policy.
    pub fn resolve_column(&self, resolver: &ColumnResolver) -> Option<&Column> {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        resolver.resolve(&names).map(|idx| &self.columns[idx])
    }
}

/// Column lookup policy: an ordered list of accepted exact names with a
/// fallback match on lowercase name fragments (all fragments must occur).
pub struct ColumnResolver {
    exact: &'static [&'static str],
    fragments: &'static [&'static str],
}

impl ColumnResolver {
    pub const fn new(exact: &'static [&'static str], fragments: &'static [&'static str]) -> Self {
        Self { exact, fragments }
    }

    /// Returns the index of the first matching name, exact names first.
    pub fn resolve(&self, names: &[&str]) -> Option<usize> {
        for want in self.exact {
            if let Some(pos) = names.iter().position(|name| name == want) {
                return Some(pos);
            }
        }
        if self.fragments.is_empty() {
            return None;
        }
        names.iter().position(|name| {
            let lower = name.to_lowercase();
            self.fragments.iter().all(|fragment| lower.contains(fragment))
        })
    }
}

fn infer_column(cells: &[&str]) -> ColumnValues {
    let non_empty: Vec<&str> = cells
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !non_empty.is_empty() && non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnValues::Int(cells.iter().map(|s| s.trim().parse().ok()).collect());
    }
    if !non_empty.is_empty() && non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnValues::Float(cells.iter().map(|s| parse_number(s)).collect());
    }
    ColumnValues::Str(cells.iter().map(|s| s.to_string()).collect())
}

// NaN cells count as missing, like the source tooling treats them.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
