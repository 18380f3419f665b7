//! Column message handlers (sorting, resizing, pinning, visibility)

use crate::commands::Cmd;
use crate::grid::GridState;
use crate::messages::ColumnMsg;

/// Handle column messages
///
/// Requests against unknown columns, or against columns whose flags forbid
/// the operation, are ignored and produce no command.
pub fn update_columns(grid: &mut GridState, msg: ColumnMsg) -> Option<Cmd> {
    let changed = match msg {
        ColumnMsg::Sort { column_id, multi } => grid.on_sort(&column_id, multi),
        ColumnMsg::SortFocused { multi } => grid.on_sort_focused(multi),
        ColumnMsg::Resize { column_id, width } => grid.on_resize_column(&column_id, width),
        ColumnMsg::Pin { column_id, target } => grid.on_pin_column(&column_id, target),
        ColumnMsg::SetVisible { column_id, visible } => {
            grid.on_set_column_visible(&column_id, visible)
        }
    };

    changed.then_some(Cmd::Redraw)
}
