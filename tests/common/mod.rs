//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use datagrid::grid::{GridState, ValidationTicket};
use datagrid::messages::{ColumnMsg, EditMsg, Msg, ViewportMsg};
use datagrid::model::{CellValue, ColumnDescriptor, Pin, Row};
use datagrid::update::update;
use datagrid::Cmd;

pub const ROW_HEIGHT: f32 = 40.0;
pub const HEADER_HEIGHT: f32 = 40.0;

pub const STATUSES: [&str; 3] = ["active", "inactive", "pending"];

/// Columns of the users table: pinned id, scrollable middle, pinned status
pub fn user_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id").width(80.0).pinned(Pin::Left).read_only(),
        ColumnDescriptor::new("name").header("Name").width(200.0),
        ColumnDescriptor::new("email").width(250.0),
        ColumnDescriptor::new("role").width(150.0),
        ColumnDescriptor::new("age").width(100.0),
        ColumnDescriptor::new("status").width(150.0).pinned(Pin::Right),
    ]
}

/// `n` users; status cycles active/inactive/pending, every 10th age is missing
pub fn users(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let age = if i % 10 == 9 {
                CellValue::Null
            } else {
                CellValue::from(((i * 17) % 60 + 18) as i64)
            };
            Row::new(i)
                .with("id", i as i64)
                .with("name", format!("User {:03}", i))
                .with("email", format!("user{}@example.com", i))
                .with("role", ["admin", "editor", "viewer"][i % 3])
                .with("age", age)
                .with("status", STATUSES[i % 3])
        })
        .collect()
}

/// A grid of `n` users in an 800x440 container (400px body = 10 rows)
pub fn user_grid(n: usize) -> GridState {
    let mut grid = GridState::new(user_columns(), users(n), ROW_HEIGHT, HEADER_HEIGHT)
        .expect("valid columns");
    grid.on_resize(800.0, 440.0);
    grid
}

/// Plays the hosting application: sends messages, executes commands
pub struct Host {
    pub grid: GridState,
    /// Every dataset reported through `Cmd::DataChanged`, in order
    pub data_changes: Vec<Vec<Row>>,
    /// Tickets the grid asked us to settle
    pub pending: Vec<ValidationTicket>,
    pub redraws: usize,
}

impl Host {
    pub fn new(grid: GridState) -> Self {
        Self {
            grid,
            data_changes: Vec::new(),
            pending: Vec::new(),
            redraws: 0,
        }
    }

    pub fn send(&mut self, msg: Msg) -> Option<Cmd> {
        let cmd = update(&mut self.grid, msg);
        if let Some(cmd) = &cmd {
            for leaf in cmd.clone().flatten() {
                match leaf {
                    Cmd::DataChanged(rows) => self.data_changes.push(rows),
                    Cmd::ValidationPending(ticket) => self.pending.push(ticket),
                    Cmd::Redraw => self.redraws += 1,
                    Cmd::None | Cmd::Batch(_) => {}
                }
            }
        }
        cmd
    }

    pub fn click_header(&mut self, column_id: &str, multi: bool) {
        self.send(Msg::Column(ColumnMsg::Sort {
            column_id: column_id.to_string(),
            multi,
        }));
    }

    /// Start, change and commit an edit on a displayed cell
    pub fn edit(&mut self, row: usize, column_id: &str, value: impl Into<CellValue>) {
        self.send(Msg::Edit(EditMsg::Start {
            row,
            column_id: column_id.to_string(),
        }));
        self.send(Msg::Edit(EditMsg::Change(value.into())));
        self.send(Msg::Edit(EditMsg::Commit));
    }

    pub fn resolve(&mut self, ticket: ValidationTicket, error: Option<&str>) -> Option<Cmd> {
        self.send(Msg::Edit(EditMsg::ValidationResolved {
            ticket,
            error: error.map(str::to_string),
        }))
    }

    pub fn undo(&mut self) -> Option<Cmd> {
        self.send(Msg::Edit(EditMsg::Undo))
    }

    pub fn focus(&mut self, row: usize, column_id: &str) {
        self.send(Msg::Viewport(ViewportMsg::Focus {
            row,
            column_id: column_id.to_string(),
        }));
    }

    /// Values of a column in displayed order
    pub fn column_values(&self, column_id: &str) -> Vec<CellValue> {
        self.grid
            .sorted_rows()
            .iter()
            .map(|row| row.get(column_id).clone())
            .collect()
    }
}
