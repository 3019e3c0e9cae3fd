//! Configuration persistence
//!
//! Stores user preferences in `~/.config/tabgrid/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::delimiter::{Delimiters, DEFAULT_DELIMITERS};
use crate::grid::DEFAULT_CELL_CAPACITY;

/// Settings used when the command line leaves them out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Delimiter set used to split input; the first one is written on output
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Bytes reserved for each new cell's text
    #[serde(default = "default_cell_capacity")]
    pub cell_capacity: usize,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITERS.to_string()
}

fn default_cell_capacity() -> usize {
    DEFAULT_CELL_CAPACITY
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            cell_capacity: default_cell_capacity(),
        }
    }
}

impl GridConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if missing or invalid
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

    /// Save config to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
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

    /// Configured delimiter set, falling back to the default if invalid
    pub fn delimiters(&self) -> Delimiters {
        Delimiters::parse(&self.delimiter).unwrap_or_else(|e| {
            tracing::warn!("Ignoring configured delimiter: {}", e);
            Delimiters::default()
        })
    }
}
