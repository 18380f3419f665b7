//! Row records
//!
//! A row is an opaque record: a stable identity plus a mapping from column id
//! to value. The engine only mutates rows through the edit path.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{CellValue, NULL};

/// Column id that doubles as the row identity when present
pub const ID_FIELD: &str = "id";

/// Stable identity of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub String);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId(s.to_string())
    }
}

impl From<usize> for RowId {
    fn from(n: usize) -> Self {
        RowId(n.to_string())
    }
}

/// A single record of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    /// Create an empty row with the given identity
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Build a row from a cell map
    ///
    /// The identity comes from the `id` cell when it is present and non-null,
    /// otherwise from `fallback` (typically the row's position in its source).
    pub fn from_cells(fallback: usize, cells: BTreeMap<String, CellValue>) -> Self {
        let id = match cells.get(ID_FIELD) {
            Some(value) if !value.is_null() => RowId(value.to_string()),
            _ => RowId::from(fallback),
        };
        Self { id, cells }
    }

    /// Set a cell (builder pattern)
    pub fn with(mut self, column_id: &str, value: impl Into<CellValue>) -> Self {
        self.set(column_id, value.into());
        self
    }

    /// Get the value for a column; missing columns read as null
    pub fn get(&self, column_id: &str) -> &CellValue {
        self.cells.get(column_id).unwrap_or(&NULL)
    }

    /// Replace the value for a column, returning the previous value
    pub fn set(&mut self, column_id: &str, value: CellValue) -> CellValue {
        self.cells
            .insert(column_id.to_string(), value)
            .unwrap_or_default()
    }
}
