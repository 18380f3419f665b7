//! Command-line argument parsing for the headless grid driver
//!
//! Supports:
//! - Loading a CSV/TSV/PSV or JSON dataset
//! - Container size and row/header height overrides
//! - Scripted interaction (pins, sorts, scroll, focus, edits, key presses)
//! - Text or JSON output of the resulting visible window

use std::path::PathBuf;

use clap::Parser;

use crate::keymap::{parse_key_string, Keystroke};
use crate::messages::{ColumnMsg, EditMsg, Msg, ViewportMsg};
use crate::model::{CellValue, Pin};

/// Render the visible window of a virtualized data grid
#[derive(Parser, Debug, Default)]
#[command(
    name = "datagrid",
    version,
    about = "Render the visible window of a virtualized data grid"
)]
pub struct CliArgs {
    /// Dataset to load (.csv, .tsv, .psv or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Container width in pixels
    #[arg(long, default_value_t = 960.0)]
    pub width: f32,

    /// Container height in pixels (header included)
    #[arg(long, default_value_t = 480.0)]
    pub height: f32,

    /// Row height in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    pub row_height: Option<f32>,

    /// Header height in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    pub header_height: Option<f32>,

    /// Vertical scroll offset in pixels
    #[arg(long, value_name = "PX")]
    pub scroll_top: Option<f32>,

    /// Horizontal scroll offset in pixels
    #[arg(long, value_name = "PX")]
    pub scroll_left: Option<f32>,

    /// Click a column header (repeat to cycle or add columns)
    #[arg(long = "sort", value_name = "COL")]
    pub sort: Vec<String>,

    /// Header clicks keep existing sort keys (multi-column sort)
    #[arg(long)]
    pub multi: bool,

    /// Pin a column to the left edge
    #[arg(long = "pin-left", value_name = "COL")]
    pub pin_left: Vec<String>,

    /// Pin a column to the right edge
    #[arg(long = "pin-right", value_name = "COL")]
    pub pin_right: Vec<String>,

    /// Hide a column
    #[arg(long = "hide", value_name = "COL")]
    pub hide: Vec<String>,

    /// Resize a column
    #[arg(long = "resize", value_name = "COL=PX")]
    pub resize: Vec<String>,

    /// Focus a cell (1-based displayed row)
    #[arg(long, value_name = "ROW:COL")]
    pub focus: Option<String>,

    /// Edit and commit a cell (1-based displayed row)
    #[arg(long = "edit", value_name = "ROW:COL=VALUE")]
    pub edit: Vec<String>,

    /// Reject empty values in a column when committing
    #[arg(long = "required", value_name = "COL")]
    pub required: Vec<String>,

    /// Key presses to send after everything else, e.g. "down,down,enter"
    #[arg(long, value_name = "KEY,...", value_delimiter = ',')]
    pub keys: Vec<String>,

    /// Print the visible window as JSON instead of a text grid
    #[arg(long)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    pub config_path: Option<PathBuf>,
    pub row_height: Option<f32>,
    pub header_height: Option<f32>,
    /// Columns whose committed values must not be empty
    pub required: Vec<String>,
    /// Messages to apply in order
    pub script: Vec<Msg>,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    ///
    /// Events are scripted in a fixed order: container size, pins, visibility,
    /// column widths, sorts, scroll, focus, edits, then key presses.
    pub fn into_config(self) -> Result<RunConfig, String> {
        let mut script = vec![Msg::Viewport(ViewportMsg::Resize {
            width: self.width,
            height: self.height,
        })];

        for (columns, target) in [(&self.pin_left, Pin::Left), (&self.pin_right, Pin::Right)] {
            script.extend(columns.iter().map(|column_id| {
                Msg::Column(ColumnMsg::Pin {
                    column_id: column_id.clone(),
                    target,
                })
            }));
        }

        script.extend(self.hide.iter().map(|column_id| {
            Msg::Column(ColumnMsg::SetVisible {
                column_id: column_id.clone(),
                visible: false,
            })
        }));

        for arg in &self.resize {
            let (column_id, width) = arg
                .split_once('=')
                .ok_or_else(|| format!("Invalid --resize '{}': expected COL=PX", arg))?;
            let width: f32 = width
                .trim()
                .parse()
                .map_err(|_| format!("Invalid width in --resize '{}'", arg))?;
            script.push(Msg::Column(ColumnMsg::Resize {
                column_id: column_id.to_string(),
                width,
            }));
        }

        script.extend(self.sort.iter().map(|column_id| {
            Msg::Column(ColumnMsg::Sort {
                column_id: column_id.clone(),
                multi: self.multi,
            })
        }));

        if self.scroll_top.is_some() || self.scroll_left.is_some() {
            script.push(Msg::Viewport(ViewportMsg::Scroll {
                top: self.scroll_top.unwrap_or(0.0),
                left: self.scroll_left.unwrap_or(0.0),
            }));
        }

        if let Some(focus) = &self.focus {
            let (row, column_id) = parse_cell(focus)?;
            script.push(Msg::Viewport(ViewportMsg::Focus { row, column_id }));
        }

        for arg in &self.edit {
            let (cell, value) = arg
                .split_once('=')
                .ok_or_else(|| format!("Invalid --edit '{}': expected ROW:COL=VALUE", arg))?;
            let (row, column_id) = parse_cell(cell)?;
            script.push(Msg::Edit(EditMsg::Start { row, column_id }));
            script.push(Msg::Edit(EditMsg::Change(CellValue::infer(value))));
            script.push(Msg::Edit(EditMsg::Commit));
        }

        for key in &self.keys {
            let keystroke: Keystroke = parse_key_string(key.trim())
                .map_err(|e| format!("Invalid key '{}': {}", key, e))?;
            script.push(Msg::Key(keystroke));
        }

        Ok(RunConfig {
            file: self.file,
            config_path: self.config,
            row_height: self.row_height,
            header_height: self.header_height,
            required: self.required,
            script,
            json: self.json,
        })
    }
}

/// Parse `ROW:COL` with a 1-based row into a 0-based displayed row
fn parse_cell(s: &str) -> Result<(usize, String), String> {
    let (row, column_id) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid cell '{}': expected ROW:COL", s))?;
    let row: usize = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row in '{}'", s))?;
    if row == 0 || column_id.is_empty() {
        return Err(format!("Invalid cell '{}': rows start at 1", s));
    }
    Ok((row - 1, column_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeyCode;

    fn args() -> CliArgs {
        CliArgs {
            file: PathBuf::from("data.csv"),
            width: 800.0,
            height: 400.0,
            ..CliArgs::default()
        }
    }

    #[test]
    fn test_minimal_script_is_resize() {
        let config = args().into_config().unwrap();
        assert_eq!(
            config.script,
            vec![Msg::Viewport(ViewportMsg::Resize {
                width: 800.0,
                height: 400.0
            })]
        );
    }

    #[test]
    fn test_event_order() {
        let config = CliArgs {
            sort: vec!["name".into()],
            pin_left: vec!["id".into()],
            focus: Some("3:name".into()),
            keys: vec!["down".into()],
            ..args()
        }
        .into_config()
        .unwrap();

        assert!(matches!(config.script[1], Msg::Column(ColumnMsg::Pin { .. })));
        assert!(matches!(config.script[2], Msg::Column(ColumnMsg::Sort { .. })));
        assert_eq!(
            config.script[3],
            Msg::Viewport(ViewportMsg::Focus {
                row: 2,
                column_id: "name".into()
            })
        );
        assert_eq!(config.script[4], Msg::Key(Keystroke::key(KeyCode::Down)));
    }

    #[test]
    fn test_edit_expands_to_session() {
        let config = CliArgs {
            edit: vec!["1:age=42".into()],
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(
            &config.script[1..],
            &[
                Msg::Edit(EditMsg::Start {
                    row: 0,
                    column_id: "age".into()
                }),
                Msg::Edit(EditMsg::Change(CellValue::Number(42.0))),
                Msg::Edit(EditMsg::Commit),
            ]
        );
    }

    #[test]
    fn test_invalid_arguments() {
        for bad in [
            CliArgs {
                focus: Some("0:name".into()),
                ..args()
            },
            CliArgs {
                focus: Some("name".into()),
                ..args()
            },
            CliArgs {
                resize: vec!["name".into()],
                ..args()
            },
            CliArgs {
                keys: vec!["hyper+q".into()],
                ..args()
            },
        ] {
            assert!(bad.into_config().is_err());
        }
    }
}
