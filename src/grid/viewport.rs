//! Viewport geometry
//!
//! Tracks the scroll offsets and container size of the grid and computes
//! scroll-into-view adjustments. Everything here is a pure calculation; the
//! hosting surface applies the resulting offsets.

use serde::Serialize;

use super::layout::{ColumnLayout, Region};

/// Scroll offsets and container dimensions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Viewport {
    pub scroll_top: f32,
    pub scroll_left: f32,
    /// Container width in pixels
    pub width: f32,
    /// Container height in pixels, header included
    pub height: f32,
}

/// A pair of scroll offsets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn offset(&self) -> ScrollOffset {
        ScrollOffset {
            top: self.scroll_top,
            left: self.scroll_left,
        }
    }

    /// Height available to rows below the sticky header
    pub fn body_height(&self, header_height: f32) -> f32 {
        (self.height - header_height).max(0.0)
    }

    /// Number of rows fully visible in the body (at least one)
    pub fn page_rows(&self, row_height: f32, header_height: f32) -> usize {
        if row_height <= 0.0 {
            return 1;
        }
        ((self.body_height(header_height) / row_height).floor() as usize).max(1)
    }

    /// Largest valid vertical offset for `content_height` pixels of rows
    pub fn max_scroll_top(&self, content_height: f32, header_height: f32) -> f32 {
        (content_height - self.body_height(header_height)).max(0.0)
    }

    /// Largest valid horizontal offset of the scrollable region
    pub fn max_scroll_left(&self, layout: &ColumnLayout) -> f32 {
        (layout.scrollable_width - layout.scrollable_viewport_width(self.width)).max(0.0)
    }

    /// Set both offsets, clamped to the content extent
    pub fn scroll_to(
        &mut self,
        offset: ScrollOffset,
        content_height: f32,
        header_height: f32,
        layout: &ColumnLayout,
    ) {
        self.scroll_top = sanitize(offset.top).min(self.max_scroll_top(content_height, header_height));
        self.scroll_left = sanitize(offset.left).min(self.max_scroll_left(layout));
    }

    /// Re-clamp the current offsets after a size or content change
    pub fn clamp(&mut self, content_height: f32, header_height: f32, layout: &ColumnLayout) {
        let offset = self.offset();
        self.scroll_to(offset, content_height, header_height, layout);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = sanitize(width);
        self.height = sanitize(height);
    }
}

/// Negative and NaN sizes or offsets read as zero
fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// The cell being brought into view: a position in the displayed row order
/// and a column id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget<'a> {
    pub row: usize,
    pub column_id: &'a str,
}

/// Compute the minimal scroll change that shows `target` fully
///
/// Rows above the body snap to its top, rows below snap to its bottom; the
/// scrollable column band behaves the same horizontally. Pinned columns are
/// always visible and leave the horizontal offset alone, as do unknown
/// column ids.
pub fn scroll_into_view(
    target: ScrollTarget<'_>,
    viewport: &Viewport,
    layout: &ColumnLayout,
    row_height: f32,
    header_height: f32,
) -> ScrollOffset {
    let mut offset = viewport.offset();

    if row_height > 0.0 {
        let row_top = target.row as f32 * row_height;
        let row_bottom = row_top + row_height;
        let body = viewport.body_height(header_height);

        if row_top < offset.top {
            offset.top = row_top;
        } else if row_bottom > offset.top + body {
            // A body shorter than one row shows the row's top edge
            offset.top = (row_bottom - body).min(row_top);
        }
    }

    if let Some((Region::Scrollable, slot)) = layout.slot(target.column_id) {
        let visible = layout.scrollable_viewport_width(viewport.width);
        if slot.offset < offset.left {
            offset.left = slot.offset;
        } else if slot.right() > offset.left + visible {
            offset.left = (slot.right() - visible).min(slot.offset);
        }
    }

    offset
}
