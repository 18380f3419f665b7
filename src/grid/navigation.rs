//! Focus navigation
//!
//! Moves the focused cell through the displayed rows and the column
//! navigation order (left-pinned, scrollable, right-pinned). Movement is
//! clamped at every edge and never wraps.

use serde::Serialize;

use crate::messages::Direction;

use super::layout::ColumnLayout;

/// The focused cell: a position in the displayed row order and a column id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FocusedCell {
    pub row: usize,
    pub column_id: String,
}

impl FocusedCell {
    pub fn new(row: usize, column_id: &str) -> Self {
        Self {
            row,
            column_id: column_id.to_string(),
        }
    }
}

/// A focus movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One row or column (arrow keys)
    Step(Direction),
    /// First column of the row (Home)
    RowStart,
    /// Last column of the row (End)
    RowEnd,
    /// First row, first column (Cmd+Home)
    FirstCell,
    /// Last row, last column (Cmd+End)
    LastCell,
    PageUp,
    PageDown,
}

/// Compute the focus after `motion`
///
/// Without a current focus (or with focus on a column that is no longer
/// visible) movement starts from the first cell. Returns `None` when the grid
/// has no rows or no visible columns.
pub fn move_focus(
    current: Option<&FocusedCell>,
    motion: Motion,
    layout: &ColumnLayout,
    row_count: usize,
    page_rows: usize,
) -> Option<FocusedCell> {
    if row_count == 0 || layout.is_empty() {
        return None;
    }
    let last_row = row_count - 1;
    let last_col = layout.len() - 1;

    let (row, col) = match current {
        Some(focus) => (
            focus.row.min(last_row),
            layout.position_of(&focus.column_id).unwrap_or(0),
        ),
        None => {
            let id = layout.id_at(0)?;
            return Some(FocusedCell::new(0, id));
        }
    };

    let page = page_rows.max(1);
    let (row, col) = match motion {
        Motion::Step(Direction::Up) => (row.saturating_sub(1), col),
        Motion::Step(Direction::Down) => ((row + 1).min(last_row), col),
        Motion::Step(Direction::Left) => (row, col.saturating_sub(1)),
        Motion::Step(Direction::Right) => (row, (col + 1).min(last_col)),
        Motion::RowStart => (row, 0),
        Motion::RowEnd => (row, last_col),
        Motion::FirstCell => (0, 0),
        Motion::LastCell => (last_row, last_col),
        Motion::PageUp => (row.saturating_sub(page), col),
        Motion::PageDown => (row.saturating_add(page).min(last_row), col),
    };

    layout.id_at(col).map(|id| FocusedCell::new(row, id))
}
