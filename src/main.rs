//! Headless data grid driver
//!
//! Loads a dataset, replays a scripted sequence of grid events through the
//! update loop and prints the resulting visible window.

use anyhow::{Context, Result};
use clap::Parser;

use datagrid::cli::{CliArgs, RunConfig};
use datagrid::config::GridConfig;
use datagrid::dataset::load_dataset;
use datagrid::grid::GridState;
use datagrid::keymap::{load_default_keymap, Keymap};
use datagrid::model::{CellValue, Row};
use datagrid::render::{render_text, DEFAULT_CHAR_WIDTH};
use datagrid::update::update;
use datagrid::Cmd;

fn main() -> Result<()> {
    datagrid::tracing::init();

    let run = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)
        .context("Invalid arguments")?;

    let mut config = match &run.config_path {
        Some(path) => GridConfig::load_from(path),
        None => GridConfig::load(),
    };
    if let Some(row_height) = run.row_height {
        config.row_height = row_height;
    }
    if let Some(header_height) = run.header_height {
        config.header_height = header_height;
    }

    let dataset = load_dataset(&run.file)
        .with_context(|| format!("Failed to load {}", run.file.display()))?;

    let mut grid = GridState::with_config(dataset.columns, dataset.rows, config)
        .context("Invalid column declarations")?
        .with_keymap(Keymap::with_bindings(load_default_keymap()));
    if !run.required.is_empty() {
        grid = grid.with_validator(required_validator(run.required.clone()));
    }

    replay(&mut grid, &run);

    if run.json {
        let window = grid.visible_window();
        let json = serde_json::to_string_pretty(&window).context("Failed to serialize window")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&grid, DEFAULT_CHAR_WIDTH));
    }

    Ok(())
}

/// Feed the scripted messages through the update loop, acting as the host
fn replay(grid: &mut GridState, run: &RunConfig) {
    for msg in run.script.iter().cloned() {
        let Some(cmd) = update(grid, msg) else {
            continue;
        };
        for cmd in cmd.flatten() {
            match cmd {
                Cmd::DataChanged(rows) => {
                    tracing::info!("Dataset changed ({} rows)", rows.len());
                }
                Cmd::ValidationPending(ticket) => {
                    // Nothing validates asynchronously here; accept right away
                    update(
                        grid,
                        datagrid::Msg::Edit(datagrid::messages::EditMsg::ValidationResolved {
                            ticket,
                            error: None,
                        }),
                    );
                }
                Cmd::Redraw | Cmd::None | Cmd::Batch(_) => {}
            }
        }
    }
}

fn required_validator(
    columns: Vec<String>,
) -> impl Fn(&str, &CellValue, &Row) -> Option<String> + 'static {
    move |column_id: &str, value: &CellValue, _row: &Row| {
        let required = columns.iter().any(|c| c == column_id);
        (required && value.to_string().trim().is_empty())
            .then(|| format!("{} is required", column_id))
    }
}
