//! Command enum representing every grid action a key can trigger
//!
//! Commands are the bridge between keybindings and the message system. Each
//! command maps to at most one `Msg` for the update loop.

use crate::messages::{ColumnMsg, Direction, EditMsg, Msg, ViewportMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // === Focus movement ===
    FocusUp,
    FocusDown,
    FocusLeft,
    FocusRight,
    FocusRowStart,
    FocusRowEnd,
    FocusFirstCell,
    FocusLastCell,
    PageUp,
    PageDown,
    ClearFocus,

    // === Editing ===
    StartEdit,
    CommitEdit,
    CancelEdit,
    Undo,

    // === Columns ===
    /// Cycle the focused column's sort, replacing the sort model
    SortFocusedColumn,
    /// Cycle the focused column's sort, keeping other descriptors
    SortFocusedColumnMulti,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    pub fn to_msg(self) -> Option<Msg> {
        use Command::*;

        let msg = match self {
            FocusUp => Msg::Viewport(ViewportMsg::MoveFocus(Direction::Up)),
            FocusDown => Msg::Viewport(ViewportMsg::MoveFocus(Direction::Down)),
            FocusLeft => Msg::Viewport(ViewportMsg::MoveFocus(Direction::Left)),
            FocusRight => Msg::Viewport(ViewportMsg::MoveFocus(Direction::Right)),
            FocusRowStart => Msg::Viewport(ViewportMsg::FocusRowStart),
            FocusRowEnd => Msg::Viewport(ViewportMsg::FocusRowEnd),
            FocusFirstCell => Msg::Viewport(ViewportMsg::FocusFirstCell),
            FocusLastCell => Msg::Viewport(ViewportMsg::FocusLastCell),
            PageUp => Msg::Viewport(ViewportMsg::PageUp),
            PageDown => Msg::Viewport(ViewportMsg::PageDown),
            ClearFocus => Msg::Viewport(ViewportMsg::ClearFocus),

            StartEdit => Msg::Edit(EditMsg::StartFocused),
            CommitEdit => Msg::Edit(EditMsg::Commit),
            CancelEdit => Msg::Edit(EditMsg::Cancel),
            Undo => Msg::Edit(EditMsg::Undo),

            SortFocusedColumn => Msg::Column(ColumnMsg::SortFocused { multi: false }),
            SortFocusedColumnMulti => Msg::Column(ColumnMsg::SortFocused { multi: true }),

            Unbound => return None,
        };
        Some(msg)
    }

    pub fn display_name(self) -> &'static str {
        use Command::*;

        match self {
            FocusUp => "Focus Up",
            FocusDown => "Focus Down",
            FocusLeft => "Focus Left",
            FocusRight => "Focus Right",
            FocusRowStart => "Focus Row Start",
            FocusRowEnd => "Focus Row End",
            FocusFirstCell => "Focus First Cell",
            FocusLastCell => "Focus Last Cell",
            PageUp => "Page Up",
            PageDown => "Page Down",
            ClearFocus => "Clear Focus",
            StartEdit => "Edit Cell",
            CommitEdit => "Commit Edit",
            CancelEdit => "Cancel Edit",
            Undo => "Undo",
            SortFocusedColumn => "Sort Column",
            SortFocusedColumnMulti => "Add Column to Sort",
            Unbound => "Unbound",
        }
    }
}
