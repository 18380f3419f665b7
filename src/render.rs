//! Plain-text rendering of the visible window
//!
//! Draws what a host would materialize, one character cell per
//! `char_width` pixels:
//! - Row numbers column (displayed position)
//! - Column headers with sort markers
//! - Pinned regions separated from the scrollable band by `‖`
//! - Focused cell in brackets, edited cell marked `*`, failed cell marked `!`

use std::fmt::Write;

use crate::grid::{ColumnSlot, GridState, SortDirection, VisibleWindow};

/// Default pixels per rendered character
pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Pad (or truncate) to exactly `width` characters
fn fit(s: &str, width: usize, right_align: bool) -> String {
    let text = truncate_text(s, width);
    let pad = width.saturating_sub(text.chars().count());
    if right_align {
        format!("{}{}", " ".repeat(pad), text)
    } else {
        format!("{}{}", text, " ".repeat(pad))
    }
}

/// Render the grid's visible window as text
pub fn render_text(grid: &GridState, char_width: f32) -> String {
    let window = grid.visible_window();
    render_window(grid, &window, char_width)
}

pub fn render_window(grid: &GridState, window: &VisibleWindow<'_>, char_width: f32) -> String {
    let char_width = if char_width > 0.0 {
        char_width
    } else {
        DEFAULT_CHAR_WIDTH
    };
    let chars = |slot: &ColumnSlot| ((slot.width / char_width).floor() as usize).max(3);

    let digits = window
        .row_range
        .end
        .max(1)
        .to_string()
        .len()
        .max(3);

    let regions: [&[ColumnSlot]; 3] = [
        window.columns.left_pinned,
        window.columns.scrollable,
        window.columns.right_pinned,
    ];
    let regions: Vec<&[ColumnSlot]> = regions.into_iter().filter(|r| !r.is_empty()).collect();

    let mut out = String::new();

    // Header
    let mut line = " ".repeat(digits);
    for (i, region) in regions.iter().enumerate() {
        line.push_str(if i == 0 { " │" } else { " ‖" });
        for slot in region.iter() {
            let header = grid
                .columns()
                .get(&slot.id)
                .map(|c| c.header.as_str())
                .unwrap_or(&slot.id);
            let label = format!("{}{}", header, sort_marker(grid, &slot.id));
            let _ = write!(line, " {} ", fit(&label, chars(slot), false));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');

    // Body
    let focus = grid.focused_cell();
    let editing = grid.editing();
    for window_row in &window.rows {
        let view_row = window_row.item.index;
        let mut line = format!("{:>width$}", view_row + 1, width = digits);
        for (i, region) in regions.iter().enumerate() {
            line.push_str(if i == 0 { " │" } else { " ‖" });
            for slot in region.iter() {
                let is_editing = editing.is_some_and(|s| {
                    s.row == window_row.source_index && s.column_id == slot.id
                });
                let text = match editing {
                    Some(session) if is_editing => session.value.to_string(),
                    _ => window_row.row.get(&slot.id).to_string(),
                };
                let flag = if is_editing {
                    "*"
                } else if grid.cell_error(view_row, &slot.id).is_some() {
                    "!"
                } else {
                    ""
                };
                let width = chars(slot).saturating_sub(flag.chars().count());
                let cell = format!("{}{}", fit(&text, width, is_number(&text)), flag);

                let focused = focus.is_some_and(|f| f.row == view_row && f.column_id == slot.id);
                if focused {
                    let _ = write!(line, "[{}]", cell);
                } else {
                    let _ = write!(line, " {} ", cell);
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    // Status
    let _ = write!(
        out,
        "rows {}-{} of {}",
        window.row_range.start + usize::from(!window.row_range.is_empty()),
        window.row_range.end,
        grid.row_count()
    );
    if !grid.sort_model().is_empty() {
        let keys: Vec<String> = grid
            .sort_model()
            .iter()
            .map(|d| format!("{} {}", d.column_id, direction_name(d.direction)))
            .collect();
        let _ = write!(out, " | sort: {}", keys.join(", "));
    }
    if grid.history_depth() > 0 {
        let _ = write!(out, " | history: {}", grid.history_depth());
    }
    if let Some(session) = editing {
        let _ = write!(out, " | editing: {}", session.key());
    }
    out.push('\n');

    for window_row in &window.rows {
        for slot in window.columns.iter() {
            if let Some(error) = grid.cell_error(window_row.item.index, &slot.id) {
                let _ = writeln!(
                    out,
                    "! row {} {}: {}",
                    window_row.item.index + 1,
                    slot.id,
                    error
                );
            }
        }
    }

    out
}

fn sort_marker(grid: &GridState, column_id: &str) -> String {
    let model = grid.sort_model();
    let Some(descriptor) = model.iter().find(|d| d.column_id == column_id) else {
        return String::new();
    };
    let arrow = match descriptor.direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    };
    if model.len() > 1 {
        format!(" {}{}", arrow, descriptor.priority + 1)
    } else {
        format!(" {}", arrow)
    }
}

fn direction_name(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnDescriptor, Pin, Row};

    fn grid() -> GridState {
        let columns = vec![
            ColumnDescriptor::new("id").width(64.0).pinned(Pin::Left),
            ColumnDescriptor::new("name").header("Name").width(96.0),
        ];
        let rows = vec![
            Row::new("1").with("id", 1i64).with("name", "Alice"),
            Row::new("2").with("id", 2i64).with("name", "Bob"),
        ];
        let mut grid = GridState::new(columns, rows, 20.0, 20.0).unwrap();
        grid.on_resize(400.0, 200.0);
        grid
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("123"));
        assert!(is_number("-45.67"));
        assert!(!is_number(""));
        assert!(!is_number("12abc"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hell…");
        assert_eq!(truncate_text("abc", 1), "a");
    }

    #[test]
    fn test_render_basic() {
        let text = render_text(&grid(), 8.0);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("id"));
        assert!(lines[0].contains("Name"));
        assert!(lines[1].contains("Alice"));
        assert!(lines[2].contains("Bob"));
        assert_eq!(lines[3], "rows 1-2 of 2");
    }

    #[test]
    fn test_render_focus_and_sort() {
        let mut grid = grid();
        grid.on_sort("name", false);
        grid.on_sort("name", false);
        grid.on_focus(0, "name");
        let text = render_text(&grid, 8.0);
        assert!(text.contains("Name ▼"));
        assert!(text.contains("[Bob"));
        assert!(text.contains("sort: name desc"));
    }
}
