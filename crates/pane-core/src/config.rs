// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves appearance and splitter defaults from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Color;

/// Pass-through styling applied when a layout declaration leaves it unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Pane background
    pub background: Color,

    /// Border drawn between adjacent panes and rows
    pub border_width: f32,
    pub border_color: Color,

    /// Space between siblings in pixels
    pub gap: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background: Color::SLATE,
            border_width: 1.0,
            border_color: Color::GRAY,
            gap: 0.0,
        }
    }
}

/// Splitter and intersection handle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterSettings {
    /// Splitter thickness in pixels
    pub thickness: f32,

    /// Highlight color while hovered or dragged
    pub color: Color,

    /// Extra margin around an intersection handle, per side
    pub intersection_padding: f32,

    /// Tolerance when deciding whether two splitters touch
    pub alignment_epsilon: f32,
}

impl Default for SplitterSettings {
    fn default() -> Self {
        Self {
            thickness: 4.0,
            color: Color::SPLITTER,
            intersection_padding: 2.0,
            alignment_epsilon: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default pane styling
    pub appearance: Appearance,

    /// Splitter defaults
    pub splitter: SplitterSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/pane-grid/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pane-grid").join("config.toml"))
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
