use std::collections::BTreeSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Column – one named numeric column of the table
// ---------------------------------------------------------------------------

/// A single numeric column. `None` marks a missing cell (empty / NaN in the
/// source file) and is never treated as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    /// Build a column, folding non-finite numbers into the missing marker.
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        Column {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor for fully-populated columns.
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().copied().map(Some).collect())
    }

    /// Iterate over the present (non-missing) values only.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("column '{name}' has {got} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// Ordered set of equal-length numeric columns. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Validate column lengths and names.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = BTreeSet::new();
        for col in &columns {
            if col.len() != rows {
                return Err(DatasetError::LengthMismatch {
                    name: col.name.clone(),
                    expected: rows,
                    got: col.len(),
                });
            }
            if !seen.insert(col.name.as_str()) {
                return Err(DatasetError::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Dataset { columns, rows })
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
