//! Column descriptors and the owned column set
//!
//! The column set is owned by the engine for the lifetime of the grid. Its
//! invariants: ids are unique, and every declared width is at least the
//! column's floor.

use serde::{Deserialize, Serialize};

use super::GridError;

/// Width used when a column declares none
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Absolute minimum column width; a column's own `min_width` can only raise it
pub const MIN_COLUMN_WIDTH: f32 = 50.0;

/// Where a column is rendered horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    /// Scrolls with the grid body
    #[default]
    None,
    /// Stuck to the left edge
    Left,
    /// Stuck to the right edge
    Right,
}

/// Declaration of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Unique, stable identifier (also the key into each row's cells)
    pub id: String,
    /// Header label; defaults to the id
    #[serde(default)]
    pub header: String,
    /// Declared width in pixels (`None` = default width)
    #[serde(default)]
    pub width: Option<f32>,
    /// Per-column floor; the effective floor is never below `MIN_COLUMN_WIDTH`
    #[serde(default = "default_min_width")]
    pub min_width: f32,
    /// Optional ceiling applied on resize
    #[serde(default)]
    pub max_width: Option<f32>,
    #[serde(default)]
    pub pin: Pin,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_min_width() -> f32 {
    MIN_COLUMN_WIDTH
}

fn default_true() -> bool {
    true
}

impl ColumnDescriptor {
    /// Create a scrollable, resizable, sortable, editable column with default width
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            header: id.to_string(),
            width: None,
            min_width: MIN_COLUMN_WIDTH,
            max_width: None,
            pin: Pin::None,
            resizable: true,
            sortable: true,
            editable: true,
            visible: true,
        }
    }

    pub fn header(mut self, header: &str) -> Self {
        self.header = header.to_string();
        self
    }

    /// Set the declared width (clamped to the column's floor)
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(self.clamp_width(width));
        self
    }

    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = min_width;
        if let Some(w) = self.width {
            self.width = Some(self.clamp_width(w));
        }
        self
    }

    pub fn max_width(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn pinned(mut self, pin: Pin) -> Self {
        self.pin = pin;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn fixed_width(mut self) -> Self {
        self.resizable = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Effective floor: the larger of the global minimum and the declared minimum
    pub fn floor(&self) -> f32 {
        self.min_width.max(MIN_COLUMN_WIDTH)
    }

    /// Width used for layout
    pub fn effective_width(&self) -> f32 {
        self.width.unwrap_or(DEFAULT_COLUMN_WIDTH).max(self.floor())
    }

    /// Clamp a requested width to `[floor, max_width]` (no ceiling when unset)
    pub fn clamp_width(&self, width: f32) -> f32 {
        let floor = self.floor();
        let width = if width.is_nan() { floor } else { width };
        match self.max_width {
            Some(max) => width.min(max.max(floor)).max(floor),
            None => width.max(floor),
        }
    }
}

/// The ordered set of columns owned by a grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    /// Create a column set, rejecting empty or duplicate ids
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, GridError> {
        let mut seen = std::collections::HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.id.is_empty() {
                return Err(GridError::EmptyColumnId);
            }
            if !seen.insert(column.id.as_str()) {
                return Err(GridError::DuplicateColumn(column.id.clone()));
            }
        }
        let columns = columns
            .into_iter()
            .map(|mut c| {
                if let Some(w) = c.width {
                    c.width = Some(c.clamp_width(w));
                }
                c
            })
            .collect();
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut ColumnDescriptor> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// Resize a column, clamping to its floor (and ceiling, if declared)
    ///
    /// Unknown ids are ignored. Returns whether the stored width changed.
    pub fn resize(&mut self, id: &str, new_width: f32) -> bool {
        let Some(column) = self.get_mut(id) else {
            return false;
        };
        let width = column.clamp_width(new_width);
        if column.width == Some(width) {
            return false;
        }
        column.width = Some(width);
        true
    }

    /// Pin a column to `target`; pinning to the side it is already on unpins it
    ///
    /// Unknown ids are ignored. Returns whether the pin state changed.
    pub fn pin(&mut self, id: &str, target: Pin) -> bool {
        let Some(column) = self.get_mut(id) else {
            return false;
        };
        let next = if target != Pin::None && column.pin == target {
            Pin::None
        } else {
            target
        };
        if column.pin == next {
            return false;
        }
        column.pin = next;
        true
    }

    /// Show or hide a column. Returns whether visibility changed.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        let Some(column) = self.get_mut(id) else {
            return false;
        };
        if column.visible == visible {
            return false;
        }
        column.visible = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ColumnSet {
        ColumnSet::new(vec![
            ColumnDescriptor::new("id").width(80.0),
            ColumnDescriptor::new("name").width(200.0).min_width(120.0),
            ColumnDescriptor::new("role").width(150.0).max_width(300.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = ColumnSet::new(vec![ColumnDescriptor::new("a"), ColumnDescriptor::new("a")])
            .unwrap_err();
        assert_eq!(err, GridError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_effective_width_defaults() {
        assert_eq!(ColumnDescriptor::new("x").effective_width(), DEFAULT_COLUMN_WIDTH);
        assert_eq!(
            ColumnDescriptor::new("x").min_width(200.0).effective_width(),
            200.0
        );
    }

    #[test]
    fn test_resize_clamps_to_declared_floor() {
        let mut columns = set();
        assert!(columns.resize("name", 60.0));
        assert_eq!(columns.get("name").unwrap().width, Some(120.0));
    }

    #[test]
    fn test_resize_respects_ceiling() {
        let mut columns = set();
        columns.resize("role", 900.0);
        assert_eq!(columns.get("role").unwrap().width, Some(300.0));
    }

    #[test]
    fn test_resize_unknown_is_noop() {
        let mut columns = set();
        let before = columns.clone();
        assert!(!columns.resize("missing", 500.0));
        assert_eq!(columns, before);
    }

    #[test]
    fn test_pin_toggle() {
        let mut columns = set();
        assert!(columns.pin("role", Pin::Right));
        assert_eq!(columns.get("role").unwrap().pin, Pin::Right);
        assert!(columns.pin("role", Pin::Left));
        assert_eq!(columns.get("role").unwrap().pin, Pin::Left);
        assert!(columns.pin("role", Pin::Left));
        assert_eq!(columns.get("role").unwrap().pin, Pin::None);
        assert!(!columns.pin("role", Pin::None));
    }
}
