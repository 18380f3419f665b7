//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging focus,
//! scroll and edit-session state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid=debug,message=debug` - scoped filtering
//! - `RUST_LOG=datagrid::grid=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/datagrid/logs/datagrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_NAME;
use crate::grid::{CellKey, FocusedCell, GridState};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var for filtering (default `warn`).
/// File logging writes to `~/.config/datagrid/logs/datagrid.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so rendered grids on stdout stay clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of interaction state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub focus: Option<FocusedCell>,
    pub scroll_top: f32,
    pub scroll_left: f32,
    pub editing: Option<CellKey>,
    pub sort_len: usize,
    pub history_depth: usize,
    pub pending: usize,
}

impl GridSnapshot {
    pub fn from_grid(grid: &GridState) -> Self {
        let viewport = grid.viewport();
        Self {
            focus: grid.focused_cell().cloned(),
            scroll_top: viewport.scroll_top,
            scroll_left: viewport.scroll_left,
            editing: grid.editing().map(|session| session.key()),
            sort_len: grid.sort_model().len(),
            history_depth: grid.history_depth(),
            pending: grid.pending_validations().len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.focus != other.focus {
            changes.push(format!(
                "focus: {} → {}",
                describe_focus(self.focus.as_ref()),
                describe_focus(other.focus.as_ref())
            ));
        }
        if self.scroll_top != other.scroll_top || self.scroll_left != other.scroll_left {
            changes.push(format!(
                "scroll: ({},{}) → ({},{})",
                self.scroll_top, self.scroll_left, other.scroll_top, other.scroll_left
            ));
        }
        if self.editing != other.editing {
            changes.push(match &other.editing {
                Some(key) => format!("editing {}", key),
                None => "edit closed".to_string(),
            });
        }
        if self.sort_len != other.sort_len {
            changes.push(format!("sort keys: {} → {}", self.sort_len, other.sort_len));
        }
        if self.history_depth != other.history_depth {
            changes.push(format!(
                "history: {} → {}",
                self.history_depth, other.history_depth
            ));
        }
        if self.pending != other.pending {
            changes.push(format!("pending: {} → {}", self.pending, other.pending));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe_focus(focus: Option<&FocusedCell>) -> String {
    match focus {
        Some(f) => format!("({},{})", f.row, f.column_id),
        None => "none".to_string(),
    }
}
