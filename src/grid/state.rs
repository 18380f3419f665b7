//! The grid engine
//!
//! `GridState` owns every piece of mutable grid state (columns, sort model,
//! edit session, history, viewport, focus) and coordinates the pure engines
//! in the sibling modules. Derived state (column layout and the sorted row
//! order) is memoized on revision counters bumped by the mutators.

use std::fmt;

use crate::config::GridConfig;
use crate::keymap::{default_bindings, KeyContext, Keymap};
use crate::model::{CellValue, ColumnDescriptor, ColumnSet, GridError, Pin, Row};

use super::edit::{
    CommitOutcome, EditEngine, EditSession, Resolution, ValidationOutcome, ValidationTicket,
    Validator,
};
use super::layout::ColumnLayout;
use super::memo::Memo;
use super::navigation::{move_focus, FocusedCell, Motion};
use super::sort::{apply_sort, sort_order, SortDescriptor};
use super::viewport::{scroll_into_view, ScrollOffset, ScrollTarget, Viewport};
use super::window::VisibleWindow;

/// What a commit did to the dataset
#[derive(Debug, Clone, PartialEq)]
pub enum CommitReport {
    /// No session was open
    Idle,
    /// The session closed without changing the value
    NoChange,
    /// Applied and accepted (or no validator configured)
    Committed,
    /// Applied, then rolled back by a synchronous validator
    Rejected { applied: Vec<Row>, error: String },
    /// Applied; the validator answers later
    Pending(ValidationTicket),
}

pub struct GridState {
    columns: ColumnSet,
    columns_rev: u64,
    layout: Memo<u64, ColumnLayout>,

    rows: Vec<Row>,
    rows_rev: u64,
    sort_model: Vec<SortDescriptor>,
    sort_rev: u64,
    /// Displayed position → source index
    order: Memo<(u64, u64), Vec<usize>>,

    viewport: Viewport,
    focus: Option<FocusedCell>,
    edit: EditEngine,
    validator: Option<Box<dyn Validator>>,
    config: GridConfig,
    keymap: Keymap,
}

impl fmt::Debug for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("sort_model", &self.sort_model)
            .field("viewport", &self.viewport)
            .field("focus", &self.focus)
            .field("editing", &self.edit.session())
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

impl GridState {
    /// Create an engine with default configuration
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
        row_height: f32,
        header_height: f32,
    ) -> Result<Self, GridError> {
        let config = GridConfig {
            row_height,
            header_height,
            ..GridConfig::default()
        };
        Self::with_config(columns, rows, config)
    }

    /// Create an engine from a configuration
    ///
    /// The configured default width fills in columns that declare none and the
    /// configured minimum raises every column's floor.
    pub fn with_config(
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
        config: GridConfig,
    ) -> Result<Self, GridError> {
        let columns = columns
            .into_iter()
            .map(|mut column| {
                column.min_width = column.min_width.max(config.min_column_width);
                if column.width.is_none() {
                    column.width = Some(config.default_column_width);
                }
                column
            })
            .collect();
        let columns = ColumnSet::new(columns)?;

        let layout = ColumnLayout::compute(&columns);
        let order = sort_order(&rows, &[]);

        tracing::debug!(
            columns = columns.len(),
            rows = rows.len(),
            row_height = config.row_height,
            "grid created"
        );

        Ok(Self {
            columns,
            columns_rev: 0,
            layout: Memo::new(0, layout),
            rows,
            rows_rev: 0,
            sort_model: Vec::new(),
            sort_rev: 0,
            order: Memo::new((0, 0), order),
            viewport: Viewport::default(),
            focus: None,
            edit: EditEngine::new(config.history_limit, config.pop_history_on_rollback),
            validator: None,
            config,
            keymap: Keymap::with_bindings(default_bindings()),
        })
    }

    /// Attach a validator (builder pattern)
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.set_validator(Some(Box::new(validator)));
        self
    }

    pub fn set_validator(&mut self, validator: Option<Box<dyn Validator>>) {
        self.validator = validator;
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn column_layout(&self) -> &ColumnLayout {
        self.layout.get()
    }

    /// Rows in source order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Source indices in displayed order
    pub fn view_order(&self) -> &[usize] {
        self.order.get()
    }

    /// Source index of a displayed row
    pub fn source_index(&self, view_row: usize) -> Option<usize> {
        self.order.get().get(view_row).copied()
    }

    /// Row at a displayed position
    pub fn view_row(&self, view_row: usize) -> Option<&Row> {
        self.source_index(view_row).and_then(|i| self.rows.get(i))
    }

    /// Rows in displayed order
    pub fn sorted_rows(&self) -> Vec<Row> {
        self.order
            .get()
            .iter()
            .map(|&i| self.rows[i].clone())
            .collect()
    }

    pub fn sort_model(&self) -> &[SortDescriptor] {
        &self.sort_model
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn focused_cell(&self) -> Option<&FocusedCell> {
        self.focus.as_ref()
    }

    /// The open edit session (its `row` is a source index)
    pub fn editing(&self) -> Option<&EditSession> {
        self.edit.session()
    }

    /// Validation error shown on a displayed cell
    pub fn cell_error(&self, view_row: usize, column_id: &str) -> Option<&str> {
        let source = self.source_index(view_row)?;
        self.edit.error_at(source, column_id)
    }

    pub fn can_undo(&self) -> bool {
        self.edit.can_undo()
    }

    pub fn history_depth(&self) -> usize {
        self.edit.history_depth()
    }

    pub fn pending_validations(&self) -> Vec<ValidationTicket> {
        self.edit.pending_tickets()
    }

    /// Total height of all rows (header excluded)
    pub fn content_height(&self) -> f32 {
        let height = self.rows.len() as f32 * self.config.row_height;
        if height.is_nan() {
            0.0
        } else {
            height.max(0.0)
        }
    }

    /// Rows fully visible in the body
    pub fn page_rows(&self) -> usize {
        self.viewport
            .page_rows(self.config.row_height, self.config.header_height)
    }

    /// State used to pick conditional keybindings
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            editing: self.edit.is_editing(),
            has_focus: self.focus.is_some(),
            can_undo: self.edit.can_undo(),
        }
    }

    /// Render-ready snapshot of the materialized rows and columns
    pub fn visible_window(&self) -> VisibleWindow<'_> {
        VisibleWindow::compute(self)
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    /// Scroll to absolute offsets (clamped). Returns whether anything moved.
    pub fn on_scroll(&mut self, top: f32, left: f32) -> bool {
        let before = self.viewport.offset();
        let content_height = self.content_height();
        self.viewport.scroll_to(
            ScrollOffset { top, left },
            content_height,
            self.config.header_height,
            self.layout.get(),
        );
        self.viewport.offset() != before
    }

    /// The container changed size
    pub fn on_resize(&mut self, width: f32, height: f32) -> bool {
        let before = self.viewport;
        self.viewport.resize(width, height);
        self.clamp_viewport();
        self.viewport != before
    }

    /// Focus a displayed cell and scroll it into view
    ///
    /// Out-of-range rows and hidden or unknown columns are ignored.
    pub fn on_focus(&mut self, row: usize, column_id: &str) -> bool {
        if row >= self.rows.len() || self.layout.get().position_of(column_id).is_none() {
            return false;
        }
        self.set_focus(Some(FocusedCell::new(row, column_id)))
    }

    /// Move focus by a keyboard motion
    pub fn on_move_focus(&mut self, motion: Motion) -> bool {
        let next = move_focus(
            self.focus.as_ref(),
            motion,
            self.layout.get(),
            self.rows.len(),
            self.page_rows(),
        );
        if next.is_none() {
            return false;
        }
        self.set_focus(next)
    }

    pub fn clear_focus(&mut self) -> bool {
        self.set_focus(None)
    }

    fn set_focus(&mut self, focus: Option<FocusedCell>) -> bool {
        let changed = self.focus != focus;
        self.focus = focus;
        let scrolled = self.reveal_focus();
        changed || scrolled
    }

    /// Scroll the focused cell into view. Returns whether the offsets changed.
    fn reveal_focus(&mut self) -> bool {
        let Some(focus) = &self.focus else {
            return false;
        };
        let target = ScrollTarget {
            row: focus.row,
            column_id: &focus.column_id,
        };
        let offset = scroll_into_view(
            target,
            &self.viewport,
            self.layout.get(),
            self.config.row_height,
            self.config.header_height,
        );
        let before = self.viewport.offset();
        if offset == before {
            return false;
        }
        let content_height = self.content_height();
        self.viewport.scroll_to(
            offset,
            content_height,
            self.config.header_height,
            self.layout.get(),
        );
        // The clamp can land back on the current offset
        self.viewport.offset() != before
    }

    fn clamp_viewport(&mut self) {
        let content_height = self.content_height();
        self.viewport
            .clamp(content_height, self.config.header_height, self.layout.get());
    }

    // ========================================================================
    // Columns and sorting
    // ========================================================================

    /// Cycle a column's sort state
    ///
    /// Unknown and non-sortable columns are ignored.
    pub fn on_sort(&mut self, column_id: &str, multi: bool) -> bool {
        if !self.columns.get(column_id).is_some_and(|c| c.sortable) {
            return false;
        }
        self.sort_model = apply_sort(&self.sort_model, column_id, multi);
        self.sort_rev += 1;
        self.refresh();
        tracing::debug!(column = column_id, multi, model = ?self.sort_model, "sort changed");
        true
    }

    /// Sort by the focused cell's column
    pub fn on_sort_focused(&mut self, multi: bool) -> bool {
        match self.focus.as_ref().map(|f| f.column_id.clone()) {
            Some(column_id) => self.on_sort(&column_id, multi),
            None => false,
        }
    }

    /// Resize a column (clamped to its floor and optional ceiling)
    ///
    /// Unknown and non-resizable columns are ignored.
    pub fn on_resize_column(&mut self, column_id: &str, width: f32) -> bool {
        if !self.columns.get(column_id).is_some_and(|c| c.resizable) {
            return false;
        }
        let changed = self.columns.resize(column_id, width);
        if changed {
            self.columns_changed();
        }
        changed
    }

    /// Pin a column; pinning to its current side unpins it
    pub fn on_pin_column(&mut self, column_id: &str, target: Pin) -> bool {
        let changed = self.columns.pin(column_id, target);
        if changed {
            self.columns_changed();
        }
        changed
    }

    /// Show or hide a column; hiding the focused column drops focus
    pub fn on_set_column_visible(&mut self, column_id: &str, visible: bool) -> bool {
        let changed = self.columns.set_visible(column_id, visible);
        if changed {
            if !visible && self.focus.as_ref().is_some_and(|f| f.column_id == column_id) {
                self.focus = None;
            }
            self.columns_changed();
        }
        changed
    }

    fn columns_changed(&mut self) {
        self.columns_rev += 1;
        self.refresh();
        self.clamp_viewport();
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Open an edit session on a displayed cell
    ///
    /// Refused for unknown or read-only columns, out-of-range rows, and while
    /// another cell is being edited. Focuses the cell on success.
    pub fn on_start_edit(&mut self, row: usize, column_id: &str) -> bool {
        if !self.columns.get(column_id).is_some_and(|c| c.editable) {
            return false;
        }
        let Some(source) = self.source_index(row) else {
            return false;
        };
        let current = self.rows[source].get(column_id).clone();
        if !self.edit.start(source, column_id, current) {
            return false;
        }
        if self.layout.get().position_of(column_id).is_some() {
            self.set_focus(Some(FocusedCell::new(row, column_id)));
        }
        true
    }

    /// Open an edit session on the focused cell
    pub fn on_start_edit_focused(&mut self) -> bool {
        match self.focus.clone() {
            Some(focus) => self.on_start_edit(focus.row, &focus.column_id),
            None => false,
        }
    }

    /// Update the working value of the open session
    pub fn on_edit_change(&mut self, value: CellValue) -> bool {
        self.edit.set_value(value)
    }

    /// Commit the open session
    ///
    /// Applies optimistically, records history, then asks the validator. A
    /// synchronous rejection rolls the cell back immediately; `Pending` leaves
    /// the ticket open for `on_validation_resolved`.
    pub fn on_commit_edit(&mut self) -> CommitReport {
        let request = match self.edit.commit(&mut self.rows) {
            CommitOutcome::Idle => return CommitReport::Idle,
            CommitOutcome::Unchanged => return CommitReport::NoChange,
            CommitOutcome::Applied(request) => request,
        };
        self.rows_changed();

        let verdict = match &self.validator {
            Some(validator) => validator.validate(&request),
            None => ValidationOutcome::Valid,
        };
        tracing::debug!(cell = %request.key, ticket = %request.ticket, ?verdict, "edit committed");

        match verdict {
            ValidationOutcome::Valid => {
                self.edit.resolve(request.ticket, None, &mut self.rows);
                CommitReport::Committed
            }
            ValidationOutcome::Invalid(error) => {
                let applied = self.rows.clone();
                self.edit
                    .resolve(request.ticket, Some(error.clone()), &mut self.rows);
                self.rows_changed();
                CommitReport::Rejected { applied, error }
            }
            ValidationOutcome::Pending => CommitReport::Pending(request.ticket),
        }
    }

    /// Close the open session without touching data or history
    pub fn on_cancel_edit(&mut self) -> bool {
        self.edit.cancel()
    }

    /// Settle an asynchronous validation
    pub fn on_validation_resolved(
        &mut self,
        ticket: ValidationTicket,
        error: Option<String>,
    ) -> Resolution {
        let resolution = self.edit.resolve(ticket, error, &mut self.rows);
        match &resolution {
            Resolution::RolledBack(error) => {
                tracing::debug!(%ticket, error = %error, "validation failed, rolled back");
                self.rows_changed();
            }
            Resolution::Stale => tracing::debug!(%ticket, "ignoring stale validation result"),
            Resolution::Accepted => {}
        }
        resolution
    }

    /// Restore the newest history snapshot
    pub fn on_undo(&mut self) -> bool {
        if !self.edit.undo(&mut self.rows) {
            return false;
        }
        self.rows_changed();
        true
    }

    /// Replace the dataset (the host owns the rows)
    ///
    /// Edit state is keyed by source row index, so the open session, undo
    /// history, cell errors and pending tickets are all dropped. Focus is
    /// clamped to the new row count.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.edit.reset();
        self.rows_changed();
    }

    fn rows_changed(&mut self) {
        self.rows_rev += 1;
        self.refresh();
        let row_count = self.rows.len();
        if row_count == 0 {
            self.focus = None;
        } else if let Some(focus) = &mut self.focus {
            focus.row = focus.row.min(row_count - 1);
        }
        self.clamp_viewport();
    }

    /// Check engine invariants after an update (debug builds)
    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str) {
        if let Some(focus) = &self.focus {
            debug_assert!(
                focus.row < self.rows.len(),
                "[{}] focus row {} out of range ({} rows)",
                context,
                focus.row,
                self.rows.len()
            );
        }
        let max_top = self
            .viewport
            .max_scroll_top(self.content_height(), self.config.header_height);
        debug_assert!(
            self.viewport.scroll_top <= max_top,
            "[{}] scroll_top {} past {}",
            context,
            self.viewport.scroll_top,
            max_top
        );
        let max_left = self.viewport.max_scroll_left(self.layout.get());
        debug_assert!(
            self.viewport.scroll_left <= max_left,
            "[{}] scroll_left {} past {}",
            context,
            self.viewport.scroll_left,
            max_left
        );
    }

    /// Recompute derived state whose inputs changed
    fn refresh(&mut self) {
        let columns = &self.columns;
        self.layout
            .refresh(self.columns_rev, || ColumnLayout::compute(columns));

        let rows = &self.rows;
        let sort_model = &self.sort_model;
        self.order
            .refresh((self.rows_rev, self.sort_rev), || sort_order(rows, sort_model));
    }
}
