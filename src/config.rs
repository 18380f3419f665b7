//! Grid configuration
//!
//! Stored in `~/.config/datagrid/config.yaml`. Every field is optional in the
//! file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::history::DEFAULT_HISTORY_LIMIT;
use crate::grid::range::DEFAULT_OVERSCAN;
use crate::model::{DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};

/// Tunables of the grid engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed height of every body row in pixels
    pub row_height: f32,
    /// Height of the sticky header in pixels
    pub header_height: f32,
    /// Extra rows materialized past each vertical viewport edge
    pub overscan: usize,
    /// Extra scrollable columns materialized past each horizontal edge
    pub column_overscan: usize,
    /// Width given to columns that declare none
    pub default_column_width: f32,
    /// Floor applied to every column (never below 50)
    pub min_column_width: f32,
    /// Undo snapshots retained
    pub history_limit: usize,
    /// Drop a commit's history entry when its validation fails
    pub pop_history_on_rollback: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: 36.0,
            header_height: 40.0,
            overscan: DEFAULT_OVERSCAN,
            column_overscan: 1,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            pop_history_on_rollback: false,
        }
    }
}

impl GridConfig {
    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
