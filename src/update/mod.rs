//! Update functions for the Elm-style architecture
//!
//! All grid state transformations flow through these functions.

mod columns;
mod editing;
mod viewport;

use crate::commands::Cmd;
use crate::grid::GridState;
use crate::messages::Msg;

#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use columns::update_columns;
pub use editing::update_edit;
pub use viewport::update_viewport;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(grid: &mut GridState, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(grid, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(grid, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(grid: &mut GridState, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Viewport(m) => viewport::update_viewport(grid, m),
        Msg::Column(m) => columns::update_columns(grid, m),
        Msg::Edit(m) => editing::update_edit(grid, m),
        Msg::Key(keystroke) => {
            let context = grid.key_context();
            let command = grid
                .keymap()
                .lookup_with_context(&keystroke, Some(&context))?;
            let msg = command.to_msg()?;
            update(grid, msg)
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after grid state and logs diffs for debugging.
/// Scroll messages fire per frame and are not logged.
#[cfg(debug_assertions)]
fn update_traced(grid: &mut GridState, msg: Msg) -> Option<Cmd> {
    use crate::messages::ViewportMsg;

    let is_noisy = matches!(&msg, Msg::Viewport(ViewportMsg::Scroll { .. }));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = GridSnapshot::from_grid(grid);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(grid, msg);

    if let Some(diff) = before.diff(&GridSnapshot::from_grid(grid)) {
        debug!(target: "grid", %diff, "state changed");
    }

    grid.assert_invariants_with_context(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Viewport::MoveFocus(Up)`
/// - `Column::Sort { column_id: "name", multi: false }`
/// - `Key(cmd+z)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::EditMsg;

    match msg {
        Msg::Viewport(m) => format!("Viewport::{:?}", m),
        Msg::Column(m) => format!("Column::{:?}", m),
        // Dataset payloads are too large to log
        Msg::Edit(EditMsg::ReplaceRows(rows)) => format!("Edit::ReplaceRows({} rows)", rows.len()),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::Key(k) => format!("Key({})", k),
    }
}
