// ABOUTME: Shared types and configuration for pane-grid.
// ABOUTME: Defines colors, geometry primitives, and config file handling.

pub mod color;
pub mod config;
pub mod geometry;

pub use color::{Color, ColorError};
pub use config::{Appearance, Config, ConfigError, SplitterSettings};
pub use geometry::{Point, Rect};
