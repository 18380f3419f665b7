//! Viewport message handlers (scrolling, container size, focus)

use crate::commands::Cmd;
use crate::grid::{GridState, Motion};
use crate::messages::ViewportMsg;

/// Handle viewport messages
pub fn update_viewport(grid: &mut GridState, msg: ViewportMsg) -> Option<Cmd> {
    let changed = match msg {
        ViewportMsg::Scroll { top, left } => grid.on_scroll(top, left),
        ViewportMsg::Resize { width, height } => grid.on_resize(width, height),
        ViewportMsg::Focus { row, column_id } => grid.on_focus(row, &column_id),
        ViewportMsg::ClearFocus => grid.clear_focus(),

        ViewportMsg::MoveFocus(direction) => grid.on_move_focus(Motion::Step(direction)),
        ViewportMsg::FocusRowStart => grid.on_move_focus(Motion::RowStart),
        ViewportMsg::FocusRowEnd => grid.on_move_focus(Motion::RowEnd),
        ViewportMsg::FocusFirstCell => grid.on_move_focus(Motion::FirstCell),
        ViewportMsg::FocusLastCell => grid.on_move_focus(Motion::LastCell),
        ViewportMsg::PageUp => grid.on_move_focus(Motion::PageUp),
        ViewportMsg::PageDown => grid.on_move_focus(Motion::PageDown),
    };

    changed.then_some(Cmd::Redraw)
}
