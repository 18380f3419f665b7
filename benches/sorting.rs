//! Benchmarks for sort model application
//!
//! Run with: cargo bench --bench sorting

mod support;
use support::{make_grid, make_rows};

use datagrid::grid::{sort_order, SortDescriptor, SortDirection};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn descriptor(column_id: &str, direction: SortDirection, priority: usize) -> SortDescriptor {
    SortDescriptor {
        column_id: column_id.to_string(),
        direction,
        priority,
    }
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn single_key(bencher: divan::Bencher, rows: usize) {
    let data = make_rows(rows);
    let model = [descriptor("name", SortDirection::Ascending, 0)];
    bencher.bench_local(|| divan::black_box(sort_order(&data, &model)));
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn three_keys_with_nulls(bencher: divan::Bencher, rows: usize) {
    let data = make_rows(rows);
    let model = [
        descriptor("status", SortDirection::Ascending, 0),
        descriptor("c0", SortDirection::Descending, 1),
        descriptor("id", SortDirection::Ascending, 2),
    ];
    bencher.bench_local(|| divan::black_box(sort_order(&data, &model)));
}

/// Header click through the grid, including memo invalidation and window rebuild
#[divan::bench(args = [10_000, 100_000])]
fn header_click(bencher: divan::Bencher, rows: usize) {
    let mut grid = make_grid(rows);
    bencher.bench_local(|| {
        grid.on_sort("c3", false);
        divan::black_box(grid.visible_window().row_range.clone());
    });
}
