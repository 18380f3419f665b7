//! datagrid - a virtualized data grid engine
//!
//! This crate provides the core types and logic for a headless data grid
//! implementing the Elm Architecture pattern: fixed-size row virtualization,
//! pinned column groups, multi-column sorting, and optimistic cell editing
//! with validation and undo. Hosting surfaces send decoded events as `Msg`,
//! render `GridState::visible_window()`, and execute the returned `Cmd`s.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dataset;
pub mod grid;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod render;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::GridState;
pub use messages::Msg;
pub use model::{CellValue, ColumnDescriptor, Row};
pub use update::update;
