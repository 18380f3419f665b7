//! The grid engine
//!
//! Pure engines for each concern, coordinated by [`GridState`]:
//!
//! - `range`: fixed-size virtualization (which rows to materialize)
//! - `layout`: pinned column groups, offsets and horizontal windowing
//! - `sort`: the sort model and stable multi-key ordering
//! - `history` and `edit`: edit sessions, optimistic commit, validation, undo
//! - `viewport` and `navigation`: scroll geometry and keyboard focus
//! - `window`: the render-ready slice of rows and columns
//!
//! Row indices exposed to the host (focus, edit start, visible window) are
//! positions in the displayed (sorted) order. The engine translates them to
//! source indices before touching data, so edits under an active sort land
//! on the right record.

pub mod edit;
pub mod history;
pub mod layout;
pub mod memo;
pub mod navigation;
pub mod range;
pub mod sort;
mod state;
pub mod viewport;
pub mod window;

pub use edit::{
    CellKey, EditSession, Resolution, ValidationOutcome, ValidationRequest, ValidationTicket,
    Validator,
};
pub use layout::{ColumnLayout, ColumnSlot, Region};
pub use navigation::{FocusedCell, Motion};
pub use range::{compute_window, VirtualItem, VirtualWindow, DEFAULT_OVERSCAN};
pub use sort::{apply_sort, sort_order, sort_rows, SortDescriptor, SortDirection};
pub use state::{CommitReport, GridState};
pub use viewport::{scroll_into_view, ScrollOffset, ScrollTarget, Viewport};
pub use window::{VisibleWindow, WindowColumns, WindowRow};
