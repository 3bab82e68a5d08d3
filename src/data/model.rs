use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the data layer. A missing column always indicates a
/// caller/config defect (schema drift), never a recoverable condition.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),
    #[error("column '{name}' has {len} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },
    #[error("dataset has no columns")]
    Empty,
}

// ---------------------------------------------------------------------------
// ColumnKind – inferred storage class of a column
// ---------------------------------------------------------------------------

/// Storage class of a column, inferred from its observed values.
///
/// Only [`ColumnKind::Float`] columns are offered as plot targets; an
/// [`ColumnKind::Indicator`] column (all values in {0, 1}) drives the
/// boolean filter toggle and the scatter-plot colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    Integer,
    Indicator,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Integer => write!(f, "int"),
            ColumnKind::Indicator => write!(f, "indicator"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named numeric column
// ---------------------------------------------------------------------------

/// A named numeric column. Missing cells are stored as `NaN`.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<f64>,
}

impl Column {
    /// Build a column, inferring its [`ColumnKind`] from the values
    /// (missing cells are ignored during inference).
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        let kind = infer_kind(&values);
        Column {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Number of missing (`NaN`) cells.
    pub fn missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Observed (min, max) over present cells, or `None` if every cell
    /// is missing.
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for &v in &self.values {
            if v.is_nan() {
                continue;
            }
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        bounds
    }
}

fn infer_kind(values: &[f64]) -> ColumnKind {
    let mut indicator = true;
    let mut integral = true;
    let mut seen = false;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        seen = true;
        if v != 0.0 && v != 1.0 {
            indicator = false;
        }
        if v.fract() != 0.0 {
            integral = false;
        }
    }
    if seen && indicator {
        ColumnKind::Indicator
    } else if seen && integral {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

// ---------------------------------------------------------------------------
// HousingDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded dataset: a column-major numeric table, immutable for
/// the rest of the session once loaded.
#[derive(Debug, Clone)]
pub struct HousingDataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl HousingDataset {
    /// Build a dataset from columns, checking they share one length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, DataError> {
        let n_rows = columns.first().ok_or(DataError::Empty)?.values.len();
        for col in &columns {
            if col.values.len() != n_rows {
                return Err(DataError::LengthMismatch {
                    name: col.name.clone(),
                    len: col.values.len(),
                    expected: n_rows,
                });
            }
        }
        Ok(HousingDataset { columns, n_rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has zero rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// All columns in load order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, DataError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Names of float-typed columns, the only eligible plot targets.
    pub fn float_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Float)
            .map(|c| c.name.clone())
            .collect()
    }

    /// First indicator column, if any (used for scatter colouring).
    pub fn indicator_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.kind == ColumnKind::Indicator)
    }

    /// Upper-case every column name (Boston preset normalization).
    pub fn uppercase_column_names(&mut self) {
        for col in &mut self.columns {
            col.name = col.name.to_uppercase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> HousingDataset {
        HousingDataset::from_columns(vec![
            Column::new("crim", vec![0.1, 0.2, 0.3]),
            Column::new("chas", vec![0.0, 1.0, 0.0]),
            Column::new("tax", vec![300.0, 250.0, 400.0]),
        ])
        .unwrap()
    }

    #[test]
    fn kind_inference() {
        assert_eq!(toy().column("crim").unwrap().kind, ColumnKind::Float);
        assert_eq!(toy().column("chas").unwrap().kind, ColumnKind::Indicator);
        assert_eq!(toy().column("tax").unwrap().kind, ColumnKind::Integer);
    }

    #[test]
    fn missing_cells_are_counted_and_skipped_in_range() {
        let col = Column::new("rm", vec![6.0, f64::NAN, 4.0]);
        assert_eq!(col.missing(), 1);
        assert_eq!(col.range(), Some((4.0, 6.0)));
        assert_eq!(col.kind, ColumnKind::Integer);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = toy().column("medv").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "medv"));
    }

    #[test]
    fn ragged_columns_rejected() {
        let err = HousingDataset::from_columns(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("b", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { .. }));
    }

    #[test]
    fn float_columns_only_eligible_targets() {
        assert_eq!(toy().float_column_names(), vec!["crim".to_string()]);
        assert_eq!(toy().indicator_column().unwrap().name, "chas");
    }
}
