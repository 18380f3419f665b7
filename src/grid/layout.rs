//! Column layout
//!
//! Partitions the column set into left-pinned, scrollable and right-pinned
//! groups, precomputes per-group offsets and widths, and exposes the canonical
//! focus-navigation order (left, scrollable, right).

use std::ops::Range;

use serde::Serialize;

use crate::model::{ColumnSet, Pin};

/// Which horizontal region a column renders in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    LeftPinned,
    Scrollable,
    RightPinned,
}

/// A positioned column inside its region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSlot {
    pub id: String,
    /// Index into the declared column set
    pub index: usize,
    /// Left edge relative to the start of the slot's region
    pub offset: f32,
    pub width: f32,
}

impl ColumnSlot {
    pub fn right(&self) -> f32 {
        self.offset + self.width
    }
}

/// Derived layout of a column set
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColumnLayout {
    pub left_pinned: Vec<ColumnSlot>,
    pub scrollable: Vec<ColumnSlot>,
    pub right_pinned: Vec<ColumnSlot>,
    pub left_pinned_width: f32,
    pub scrollable_width: f32,
    pub right_pinned_width: f32,
    /// Sum of every visible column's effective width
    pub total_width: f32,
    /// Navigation order: left-pinned, scrollable, right-pinned
    pub ordered_ids: Vec<String>,
}

impl ColumnLayout {
    /// Lay out the visible columns in one pass, preserving relative order
    /// within each group
    pub fn compute(columns: &ColumnSet) -> Self {
        let mut layout = ColumnLayout::default();

        for (index, column) in columns.iter().enumerate() {
            if !column.visible {
                continue;
            }
            let width = column.effective_width();
            let (group, group_width) = match column.pin {
                Pin::Left => (&mut layout.left_pinned, &mut layout.left_pinned_width),
                Pin::Right => (&mut layout.right_pinned, &mut layout.right_pinned_width),
                Pin::None => (&mut layout.scrollable, &mut layout.scrollable_width),
            };
            group.push(ColumnSlot {
                id: column.id.clone(),
                index,
                offset: *group_width,
                width,
            });
            *group_width += width;
            layout.total_width += width;
        }

        layout.ordered_ids = layout
            .left_pinned
            .iter()
            .chain(&layout.scrollable)
            .chain(&layout.right_pinned)
            .map(|slot| slot.id.clone())
            .collect();

        layout
    }

    /// Number of visible columns
    pub fn len(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }

    /// Position of a column in navigation order
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.ordered_ids.iter().position(|c| c == id)
    }

    /// Column id at a navigation position
    pub fn id_at(&self, position: usize) -> Option<&str> {
        self.ordered_ids.get(position).map(String::as_str)
    }

    /// Find a column's slot and region
    pub fn slot(&self, id: &str) -> Option<(Region, &ColumnSlot)> {
        let find = |slots: &[ColumnSlot]| slots.iter().position(|s| s.id == id);
        if let Some(i) = find(&self.left_pinned) {
            return Some((Region::LeftPinned, &self.left_pinned[i]));
        }
        if let Some(i) = find(&self.scrollable) {
            return Some((Region::Scrollable, &self.scrollable[i]));
        }
        find(&self.right_pinned).map(|i| (Region::RightPinned, &self.right_pinned[i]))
    }

    /// Width available to the scrollable region in a container of `container_width`
    pub fn scrollable_viewport_width(&self, container_width: f32) -> f32 {
        (container_width - self.left_pinned_width - self.right_pinned_width).max(0.0)
    }

    /// Range of scrollable columns intersecting `[scroll_left, scroll_left + viewport_width)`,
    /// widened by `overscan` columns on each side
    pub fn scrollable_range(
        &self,
        scroll_left: f32,
        viewport_width: f32,
        overscan: usize,
    ) -> Range<usize> {
        let count = self.scrollable.len();
        if count == 0 {
            return 0..0;
        }
        let left = scroll_left.max(0.0);
        let right = left + viewport_width.max(0.0);

        // Slots are sorted by offset, so both edges are binary searches
        let first = self.scrollable.partition_point(|s| s.right() <= left);
        let last = self.scrollable.partition_point(|s| s.offset < right);
        let last = last.max(first + 1).min(count);

        let start = first.saturating_sub(overscan).min(count);
        let end = last.saturating_add(overscan).min(count).max(start);
        start..end
    }
}
