//! Dashboard settings, read from an optional `dashboard.json`.
//!
//! Every field has a default, so a partial file only overrides what it names:
//!
//! ```json
//! { "data_path": "data/survey.csv", "bar_chart": { "width": 720.0 } }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "dashboard.json";

// ============================================================================
// Settings types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV loaded at startup.
    pub data_path: PathBuf,
    pub window: WindowConfig,
    pub line_chart: ChartConfig,
    pub bar_chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/mental_health_care.csv"),
            window: WindowConfig::default(),
            line_chart: ChartConfig::default(),
            bar_chart: ChartConfig {
                margin: Margins {
                    bottom: 90.0,
                    ..Margins::default()
                },
                ..ChartConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

/// Fixed pixel size of one chart plus the space kept around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub margin: Margins,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 340.0,
            margin: Margins::default(),
        }
    }
}

impl ChartConfig {
    /// Plot area once margins are taken off. Never negative.
    pub fn inner_size(&self) -> (f32, f32) {
        (
            (self.width - self.margin.left - self.margin.right).max(0.0),
            (self.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 60.0,
            left: 20.0,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse a settings file.
pub fn read_config(path: &Path) -> Result<DashboardConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Load settings, falling back to defaults when the file is missing or bad.
pub fn load_config(path: &Path) -> DashboardConfig {
    if !path.exists() {
        log::info!("No settings file at {}, using defaults", path.display());
        return DashboardConfig::default();
    }
    match read_config(path) {
        Ok(config) => {
            log::info!("Loaded settings from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring settings file: {e:#}");
            DashboardConfig::default()
        }
    }
}
