//! Range calculation for fixed-size virtualization
//!
//! Maps (item count, item size, container size, scroll offset, overscan) to the
//! minimal contiguous index window covering the viewport plus a margin.

use std::ops::Range;

use serde::Serialize;

/// Number of extra items materialized past each viewport edge
pub const DEFAULT_OVERSCAN: usize = 5;

/// A materialized item: derived on every computation, never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VirtualItem {
    pub index: usize,
    /// Pixel offset from the start of the content
    pub offset: f32,
    pub size: f32,
}

/// Result of a window computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualWindow {
    pub items: Vec<VirtualItem>,
    /// First materialized index
    pub start: usize,
    /// One past the last materialized index (`start == end` for an empty window)
    pub end: usize,
    /// Total content size in pixels
    pub total_size: f32,
}

impl VirtualWindow {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            start: 0,
            end: 0,
            total_size: 0.0,
        }
    }

    /// Inclusive last index, `None` when nothing is materialized
    pub fn last_index(&self) -> Option<usize> {
        (self.end > self.start).then(|| self.end - 1)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Compute the window of items to materialize
///
/// A non-positive (or NaN) `item_size` yields an empty window with zero total
/// size. Scroll offsets beyond the content clamp `end` to `item_count`, which
/// can leave the window empty.
pub fn compute_window(
    item_count: usize,
    item_size: f32,
    container_size: f32,
    scroll_offset: f32,
    overscan: usize,
) -> VirtualWindow {
    if item_size.is_nan() || item_size <= 0.0 {
        return VirtualWindow::empty();
    }

    let total_size = item_count as f32 * item_size;
    if item_count == 0 {
        return VirtualWindow {
            total_size,
            ..VirtualWindow::empty()
        };
    }

    let first_visible = index_at(scroll_offset, item_size);
    let last_visible = index_at(scroll_offset + container_size.max(0.0), item_size);

    let start = first_visible.saturating_sub(overscan).min(item_count);
    let end = last_visible
        .saturating_add(overscan)
        .saturating_add(1)
        .min(item_count)
        .max(start);

    let items = (start..end)
        .map(|index| VirtualItem {
            index,
            offset: index as f32 * item_size,
            size: item_size,
        })
        .collect();

    VirtualWindow {
        items,
        start,
        end,
        total_size,
    }
}

/// Index of the item containing pixel `offset` (negative offsets map to 0)
fn index_at(offset: f32, item_size: f32) -> usize {
    let index = (offset / item_size).floor();
    if index.is_nan() || index <= 0.0 {
        0
    } else if index >= usize::MAX as f32 {
        usize::MAX
    } else {
        index as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_at_top() {
        let w = compute_window(100, 40.0, 400.0, 0.0, 5);
        assert_eq!(w.start, 0);
        // floor(400 / 40) + 5 = 15 is the last index
        assert_eq!(w.last_index(), Some(15));
        assert_eq!(w.items.len(), 16);
        assert_eq!(w.total_size, 4000.0);
    }

    #[test]
    fn test_window_scrolled() {
        let w = compute_window(100, 40.0, 400.0, 1000.0, 5);
        // floor(1000 / 40) - 5 = 20, floor(1400 / 40) + 5 = 40
        assert_eq!(w.start, 20);
        assert_eq!(w.last_index(), Some(40));
        assert_eq!(w.items[0].offset, 800.0);
        assert_eq!(w.items[0].size, 40.0);
    }

    #[test]
    fn test_window_clamps_to_end() {
        let w = compute_window(10, 40.0, 400.0, 300.0, 5);
        assert_eq!(w.last_index(), Some(9));
    }

    #[test]
    fn test_zero_items() {
        let w = compute_window(0, 40.0, 400.0, 0.0, 5);
        assert!(w.items.is_empty());
        assert_eq!(w.last_index(), None);
        assert_eq!(w.total_size, 0.0);
    }

    #[test]
    fn test_non_positive_item_size() {
        for size in [0.0, -10.0, f32::NAN] {
            let w = compute_window(100, size, 400.0, 100.0, 5);
            assert!(w.is_empty());
            assert_eq!(w.last_index(), None);
            assert_eq!(w.total_size, 0.0);
        }
    }

    #[test]
    fn test_scroll_far_past_content() {
        let w = compute_window(10, 40.0, 400.0, 10_000.0, 5);
        assert!(w.items.iter().all(|item| item.index < 10));
        assert!(w.start <= w.end);
    }

    #[test]
    fn test_idempotent() {
        let a = compute_window(1000, 24.0, 600.0, 3333.0, 3);
        let b = compute_window(1000, 24.0, 600.0, 3333.0, 3);
        assert_eq!(a, b);
    }
}
