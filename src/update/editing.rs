//! Edit message handlers (sessions, commit, validation, undo)

use crate::commands::Cmd;
use crate::grid::{CommitReport, GridState, Resolution};
use crate::messages::EditMsg;

/// Handle editing messages
///
/// Every dataset change is reported with `Cmd::DataChanged` carrying the full
/// row set, in the order the changes happened.
pub fn update_edit(grid: &mut GridState, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::Start { row, column_id } => redraw_if(grid.on_start_edit(row, &column_id)),
        EditMsg::StartFocused => redraw_if(grid.on_start_edit_focused()),
        EditMsg::Change(value) => redraw_if(grid.on_edit_change(value)),
        EditMsg::Cancel => redraw_if(grid.on_cancel_edit()),
        EditMsg::Commit => commit(grid),

        EditMsg::Undo => grid
            .on_undo()
            .then(|| Cmd::DataChanged(grid.rows().to_vec())),

        EditMsg::ValidationResolved { ticket, error } => {
            match grid.on_validation_resolved(ticket, error) {
                Resolution::RolledBack(_) => Some(Cmd::DataChanged(grid.rows().to_vec())),
                // Clears the pending indicator
                Resolution::Accepted => Some(Cmd::Redraw),
                Resolution::Stale => None,
            }
        }

        EditMsg::ReplaceRows(rows) => {
            grid.replace_rows(rows);
            Some(Cmd::Redraw)
        }
    }
}

fn commit(grid: &mut GridState) -> Option<Cmd> {
    match grid.on_commit_edit() {
        CommitReport::Idle => None,
        CommitReport::NoChange => Some(Cmd::Redraw),
        CommitReport::Committed => Some(Cmd::DataChanged(grid.rows().to_vec())),
        CommitReport::Rejected { applied, error: _ } => Some(Cmd::batch(vec![
            Cmd::DataChanged(applied),
            Cmd::DataChanged(grid.rows().to_vec()),
        ])),
        CommitReport::Pending(ticket) => Some(Cmd::batch(vec![
            Cmd::DataChanged(grid.rows().to_vec()),
            Cmd::ValidationPending(ticket),
        ])),
    }
}

fn redraw_if(changed: bool) -> Option<Cmd> {
    changed.then_some(Cmd::Redraw)
}
