//! Multi-column sorting
//!
//! The sort model is an ordered list of descriptors with dense priorities
//! (`0..k`). Sorting never mutates the source rows: it produces a stable
//! permutation of source indices.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{CellValue, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One column's contribution to a multi-key sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column_id: String,
    pub direction: SortDirection,
    /// Lower sorts first; dense across the model
    pub priority: usize,
}

/// Toggle the sort state of `column_id`
///
/// Each column cycles none → ascending → descending → none. Without `multi`
/// the model collapses to at most the touched column. With `multi` the other
/// descriptors are kept, the touched one is removed and (if still active)
/// re-appended last, and priorities are renumbered densely.
pub fn apply_sort(current: &[SortDescriptor], column_id: &str, multi: bool) -> Vec<SortDescriptor> {
    let next_direction = match current.iter().find(|d| d.column_id == column_id) {
        None => Some(SortDirection::Ascending),
        Some(d) if d.direction == SortDirection::Ascending => Some(SortDirection::Descending),
        Some(_) => None,
    };

    let mut next: Vec<SortDescriptor> = if multi {
        let mut kept: Vec<SortDescriptor> = current
            .iter()
            .filter(|d| d.column_id != column_id)
            .cloned()
            .collect();
        kept.sort_by_key(|d| d.priority);
        kept
    } else {
        Vec::new()
    };

    if let Some(direction) = next_direction {
        next.push(SortDescriptor {
            column_id: column_id.to_string(),
            direction,
            priority: 0,
        });
    }

    for (priority, descriptor) in next.iter_mut().enumerate() {
        descriptor.priority = priority;
    }
    next
}

/// Compare two cell values under one descriptor's direction
///
/// Nulls sort after every defined value in both directions.
pub fn compare_values(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.compare(b)),
    }
}

/// Compare two rows under a sort model (descriptors in priority order)
pub fn compare_rows(a: &Row, b: &Row, descriptors: &[SortDescriptor]) -> Ordering {
    for descriptor in descriptors {
        let ordering = compare_values(
            a.get(&descriptor.column_id),
            b.get(&descriptor.column_id),
            descriptor.direction,
        );
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable sorted permutation of source indices
pub fn sort_order(rows: &[Row], descriptors: &[SortDescriptor]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    if descriptors.is_empty() {
        return order;
    }

    let mut by_priority: Vec<&SortDescriptor> = descriptors.iter().collect();
    by_priority.sort_by_key(|d| d.priority);
    let by_priority: Vec<SortDescriptor> = by_priority.into_iter().cloned().collect();

    // slice::sort_by is stable: ties keep source order
    order.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], &by_priority));
    order
}

/// Produce a new, sorted sequence of rows; the source is untouched
pub fn sort_rows(rows: &[Row], descriptors: &[SortDescriptor]) -> Vec<Row> {
    sort_order(rows, descriptors)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect()
}
