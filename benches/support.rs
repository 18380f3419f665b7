//! Shared helpers for benchmarks

use datagrid::model::{CellValue, ColumnDescriptor, Pin, Row};
use datagrid::GridState;

pub const ROW_HEIGHT: f32 = 36.0;
pub const HEADER_HEIGHT: f32 = 40.0;

/// Twelve columns, two pinned left and one pinned right
pub fn make_columns() -> Vec<ColumnDescriptor> {
    let mut columns = vec![
        ColumnDescriptor::new("id").width(80.0).pinned(Pin::Left),
        ColumnDescriptor::new("name").width(200.0).pinned(Pin::Left),
    ];
    columns.extend((0..9).map(|i| ColumnDescriptor::new(&format!("c{}", i)).width(140.0)));
    columns.push(ColumnDescriptor::new("status").width(120.0).pinned(Pin::Right));
    columns
}

/// Deterministic rows with repeated keys and some nulls
pub fn make_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let mut row = Row::new(i)
                .with("id", i as i64)
                .with("name", format!("user{:06}", (i * 7919) % count.max(1)))
                .with("status", ["active", "pending", "blocked"][i % 3]);
            for c in 0..9 {
                let value = if (i + c) % 13 == 0 {
                    CellValue::Null
                } else {
                    CellValue::from(((i * 31 + c * 17) % 1000) as i64)
                };
                row.set(&format!("c{}", c), value);
            }
            row
        })
        .collect()
}

/// A grid sized like a laptop window
#[allow(dead_code)]
pub fn make_grid(rows: usize) -> GridState {
    let mut grid = GridState::new(make_columns(), make_rows(rows), ROW_HEIGHT, HEADER_HEIGHT)
        .expect("valid columns");
    grid.on_resize(1280.0, 800.0);
    grid
}
