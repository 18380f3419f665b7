//! Property tests - window bounds, sort stability and density, scroll clamping

mod common;

use common::{user_grid, Host};
use datagrid::grid::{apply_sort, compute_window, sort_rows, SortDescriptor, SortDirection};
use datagrid::messages::{Msg, ViewportMsg};
use datagrid::model::{CellValue, ColumnDescriptor, ColumnSet, Pin, Row};
use proptest::prelude::*;

const SORT_COLUMNS: [&str; 4] = ["a", "b", "c", "d"];

proptest! {
    #[test]
    fn window_indices_stay_in_bounds(
        item_count in 0usize..5_000,
        item_size in 1.0f32..200.0,
        container in 0.0f32..3_000.0,
        scroll in -1_000.0f32..1_000_000.0,
        overscan in 0usize..20,
    ) {
        let window = compute_window(item_count, item_size, container, scroll, overscan);
        prop_assert!(window.start <= window.end);
        prop_assert!(window.end <= item_count);
        prop_assert_eq!(window.items.len(), window.end - window.start);
        for (i, item) in window.items.iter().enumerate() {
            prop_assert_eq!(item.index, window.start + i);
        }
        prop_assert_eq!(window.total_size, item_count as f32 * item_size);
    }

    #[test]
    fn non_positive_item_size_gives_empty_window(
        item_count in 0usize..5_000,
        item_size in -100.0f32..=0.0,
        container in 0.0f32..3_000.0,
        scroll in 0.0f32..100_000.0,
    ) {
        let window = compute_window(item_count, item_size, container, scroll, 5);
        prop_assert!(window.is_empty());
        prop_assert_eq!(window.total_size, 0.0);
    }

    #[test]
    fn sort_priorities_stay_dense(
        clicks in prop::collection::vec((0usize..SORT_COLUMNS.len(), any::<bool>()), 0..40),
    ) {
        let mut model: Vec<SortDescriptor> = Vec::new();
        for (column, multi) in clicks {
            model = apply_sort(&model, SORT_COLUMNS[column], multi);
            let priorities: Vec<_> = model.iter().map(|d| d.priority).collect();
            prop_assert_eq!(priorities, (0..model.len()).collect::<Vec<_>>());
            let mut ids: Vec<_> = model.iter().map(|d| d.column_id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), model.len());
        }
    }

    #[test]
    fn sort_with_constant_key_is_identity(
        values in prop::collection::vec(0i64..100, 0..200),
        descending in any::<bool>(),
    ) {
        let rows: Vec<Row> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Row::new(i).with("v", *v).with("k", "same"))
            .collect();
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let sorted = sort_rows(&rows, &[SortDescriptor { column_id: "k".into(), direction, priority: 0 }]);
        prop_assert_eq!(sorted, rows);
    }

    #[test]
    fn sorted_output_is_a_permutation_with_nulls_last(
        values in prop::collection::vec(prop::option::of(-50i64..50), 0..200),
        descending in any::<bool>(),
    ) {
        let rows: Vec<Row> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Row::new(i).with("v", CellValue::from(*v)))
            .collect();
        let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
        let sorted = sort_rows(&rows, &[SortDescriptor { column_id: "v".into(), direction, priority: 0 }]);

        prop_assert_eq!(sorted.len(), rows.len());
        let mut ids: Vec<_> = sorted.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<_> = rows.iter().map(|r| r.id.clone()).collect();
        expected.sort();
        prop_assert_eq!(ids, expected);

        if let Some(first_null) = sorted.iter().position(|r| r.get("v").is_null()) {
            prop_assert!(sorted[first_null..].iter().all(|r| r.get("v").is_null()));
        }
    }

    #[test]
    fn resize_never_goes_below_floor(width in -1_000.0f32..5_000.0, min_width in 0.0f32..300.0) {
        let mut columns = ColumnSet::new(vec![ColumnDescriptor::new("x").min_width(min_width)]).unwrap();
        columns.resize("x", width);
        let stored = columns.get("x").unwrap().effective_width();
        prop_assert!(stored >= 50.0_f32.max(min_width));
        if width >= 50.0_f32.max(min_width) {
            prop_assert_eq!(stored, width);
        }
    }

    #[test]
    fn double_pin_to_same_side_unpins(side in prop::sample::select(vec![Pin::Left, Pin::Right])) {
        let mut columns = ColumnSet::new(vec![ColumnDescriptor::new("x")]).unwrap();
        prop_assert!(columns.pin("x", side));
        prop_assert_eq!(columns.get("x").unwrap().pin, side);
        prop_assert!(columns.pin("x", side));
        prop_assert_eq!(columns.get("x").unwrap().pin, Pin::None);
    }

    #[test]
    fn scroll_offsets_stay_clamped(
        rows in 0usize..300,
        events in prop::collection::vec((-5_000.0f32..20_000.0, -5_000.0f32..5_000.0), 1..20),
    ) {
        let mut host = Host::new(user_grid(rows));
        for (top, left) in events {
            host.send(Msg::Viewport(ViewportMsg::Scroll { top, left }));
            let viewport = *host.grid.viewport();
            let max_top = viewport.max_scroll_top(host.grid.content_height(), 40.0);
            let max_left = viewport.max_scroll_left(host.grid.column_layout());
            prop_assert!((0.0..=max_top).contains(&viewport.scroll_top));
            prop_assert!((0.0..=max_left).contains(&viewport.scroll_left));
        }
    }
}
