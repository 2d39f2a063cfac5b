//! Layered editor configuration: built-in defaults overridden by `PLTR_`-prefixed environment variables.

use std::path::PathBuf;

use bevy_ecs::resource::Resource;
use figment::providers::{Env, Serialized};
use figment::Figment;
use glam::UVec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_GRID_SIZE, DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};
use crate::error::ConfigError;

/// Largest grid side accepted from configuration.
pub const MAX_GRID_SIDE: u32 = 256;

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Directory plots are saved into (desktop only; the browser downloads them instead).
    pub save_dir: PathBuf,
    pub window_width: u32,
    pub window_height: u32,
    /// Size of a new plot, in cells.
    pub grid_width: u32,
    pub grid_height: u32,
    /// Default tracing filter, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            save_dir: PathBuf::from("."),
            window_width: DEFAULT_WINDOW_SIZE.x,
            window_height: DEFAULT_WINDOW_SIZE.y,
            grid_width: DEFAULT_GRID_SIZE.x,
            grid_height: DEFAULT_GRID_SIZE.y,
            log_filter: if cfg!(debug_assertions) { "debug" } else { "info" }.to_string(),
        }
    }
}

impl EditorConfig {
    /// The default provider stack: defaults, then the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(EditorConfig::default())).merge(Env::prefixed("PLTR_"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Extracts and validates a configuration from any provider stack.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: EditorConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("grid_width", self.grid_width), ("grid_height", self.grid_height)] {
            if value == 0 || value > MAX_GRID_SIDE {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be between 1 and {MAX_GRID_SIDE}, got {value}"
                )));
            }
        }
        if self.window_width < MIN_WINDOW_SIZE.x || self.window_height < MIN_WINDOW_SIZE.y {
            return Err(ConfigError::Invalid(format!(
                "window must be at least {}x{}, got {}x{}",
                MIN_WINDOW_SIZE.x, MIN_WINDOW_SIZE.y, self.window_width, self.window_height
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn window_size(&self) -> UVec2 {
        UVec2::new(self.window_width, self.window_height)
    }

    pub fn grid_size(&self) -> UVec2 {
        UVec2::new(self.grid_width, self.grid_height)
    }
}
