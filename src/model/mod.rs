//! Data model - rows, cell values and column declarations
//!
//! Rows are owned by the hosting application; columns are owned by the grid.

pub mod column;
pub mod row;
pub mod value;

pub use column::{ColumnDescriptor, ColumnSet, Pin, DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};
pub use row::{Row, RowId, ID_FIELD};
pub use value::CellValue;

/// Errors raised while constructing a grid
///
/// Runtime operations never fail: constraint violations are corrected or
/// ignored, validation failures surface as per-cell state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Two columns share an id
    DuplicateColumn(String),
    /// A column was declared with an empty id
    EmptyColumnId,
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::DuplicateColumn(id) => write!(f, "Duplicate column id: {}", id),
            GridError::EmptyColumnId => write!(f, "Column id must not be empty"),
        }
    }
}

impl std::error::Error for GridError {}
