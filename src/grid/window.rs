//! The visible window
//!
//! A borrowed, render-ready view of what the host should materialize for the
//! current scroll position: the windowed rows (with their source indices) and
//! the three column groups, the scrollable one windowed horizontally.

use std::ops::Range;

use serde::Serialize;

use crate::model::Row;

use super::layout::ColumnSlot;
use super::range::{compute_window, VirtualItem};
use super::state::GridState;

/// One materialized row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRow<'a> {
    /// Position in the displayed order and pixel placement
    pub item: VirtualItem,
    /// Index into the source rows
    pub source_index: usize,
    pub row: &'a Row,
}

/// Materialized columns by region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowColumns<'a> {
    pub left_pinned: &'a [ColumnSlot],
    /// Only the scrollable columns intersecting the viewport (plus overscan)
    pub scrollable: &'a [ColumnSlot],
    pub right_pinned: &'a [ColumnSlot],
}

impl WindowColumns<'_> {
    /// Every materialized slot in render order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSlot> {
        self.left_pinned
            .iter()
            .chain(self.scrollable)
            .chain(self.right_pinned)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleWindow<'a> {
    pub rows: Vec<WindowRow<'a>>,
    /// Displayed row positions covered by `rows`
    pub row_range: Range<usize>,
    pub columns: WindowColumns<'a>,
    /// Scrollable column positions covered by `columns.scrollable`
    pub column_range: Range<usize>,
    /// Total width of all visible columns
    pub total_width: f32,
    /// Total height of all rows, header excluded
    pub total_height: f32,
    pub scroll_top: f32,
    pub scroll_left: f32,
}

impl<'a> VisibleWindow<'a> {
    pub fn compute(grid: &'a GridState) -> Self {
        let config = grid.config();
        let viewport = grid.viewport();
        let layout = grid.column_layout();
        let order = grid.view_order();

        let window = compute_window(
            order.len(),
            config.row_height,
            viewport.body_height(config.header_height),
            viewport.scroll_top,
            config.overscan,
        );

        let rows = window
            .items
            .iter()
            .filter_map(|item| {
                let source_index = *order.get(item.index)?;
                let row = grid.rows().get(source_index)?;
                Some(WindowRow {
                    item: *item,
                    source_index,
                    row,
                })
            })
            .collect();

        let column_range = layout.scrollable_range(
            viewport.scroll_left,
            layout.scrollable_viewport_width(viewport.width),
            config.column_overscan,
        );

        Self {
            rows,
            row_range: window.range(),
            columns: WindowColumns {
                left_pinned: &layout.left_pinned,
                scrollable: &layout.scrollable[column_range.clone()],
                right_pinned: &layout.right_pinned,
            },
            column_range,
            total_width: layout.total_width,
            total_height: window.total_size,
            scroll_top: viewport.scroll_top,
            scroll_left: viewport.scroll_left,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
