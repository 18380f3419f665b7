//! Message types for the Elm-style architecture
//!
//! Every state change of a grid flows through these messages. They are the
//! already-decoded semantic events a hosting surface sends: scroll and resize
//! notifications, header clicks, drag-resize results, focus changes, edit
//! input and validation verdicts.

use crate::grid::edit::ValidationTicket;
use crate::keymap::Keystroke;
use crate::model::{CellValue, Pin, Row};

/// Direction for focus movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Viewport messages (scrolling, container size, focus)
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportMsg {
    /// The surface scrolled to absolute offsets
    Scroll { top: f32, left: f32 },
    /// The container changed size
    Resize { width: f32, height: f32 },
    /// Focus a cell by displayed row position and column id (mouse click)
    Focus { row: usize, column_id: String },
    /// Drop focus entirely
    ClearFocus,

    // === Keyboard navigation ===
    /// Move focus one row or column
    MoveFocus(Direction),
    /// First column of the focused row (Home)
    FocusRowStart,
    /// Last column of the focused row (End)
    FocusRowEnd,
    /// First cell of the grid (Cmd+Home)
    FocusFirstCell,
    /// Last cell of the grid (Cmd+End)
    FocusLastCell,
    PageUp,
    PageDown,
}

/// Column messages (header interaction)
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnMsg {
    /// Header clicked; `multi` keeps the other sort descriptors
    Sort { column_id: String, multi: bool },
    /// Sort the focused cell's column
    SortFocused { multi: bool },
    /// Drag-resize finished at `width` pixels
    Resize { column_id: String, width: f32 },
    /// Pin to a side; pinning to the current side unpins
    Pin { column_id: String, target: Pin },
    /// Show or hide a column
    SetVisible { column_id: String, visible: bool },
}

/// Editing messages
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// Open an edit session on a cell (displayed row position)
    Start { row: usize, column_id: String },
    /// Open an edit session on the focused cell (Enter)
    StartFocused,
    /// The editing widget's value changed
    Change(CellValue),
    /// Commit the open session (Enter while editing)
    Commit,
    /// Discard the open session (Escape)
    Cancel,
    /// Restore the previous snapshot (Cmd+Z)
    Undo,
    /// An asynchronous validator finished
    ValidationResolved {
        ticket: ValidationTicket,
        error: Option<String>,
    },
    /// The host replaced the dataset
    ReplaceRows(Vec<Row>),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Viewport(ViewportMsg),
    Column(ColumnMsg),
    Edit(EditMsg),
    /// A raw key press, resolved through the keymap
    Key(Keystroke),
}
