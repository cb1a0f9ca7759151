// ABOUTME: Declarative description of a pane system: rows of panes, optionally nested.
// ABOUTME: Deserializes from TOML and offers builders for programmatic layouts.

use pane_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::axis::{AxisItem, Constraint};
use crate::drag::Edge;
use crate::error::LayoutError;
use crate::size::SizeSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSplitterSide {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneSplitterSide {
    Left,
    Right,
}

impl RowSplitterSide {
    pub fn edge(self) -> Edge {
        match self {
            RowSplitterSide::Top => Edge::Leading,
            RowSplitterSide::Bottom => Edge::Trailing,
        }
    }
}

impl PaneSplitterSide {
    pub fn edge(self) -> Edge {
        match self {
            PaneSplitterSide::Left => Edge::Leading,
            PaneSplitterSide::Right => Edge::Trailing,
        }
    }
}

/// A grid of rows. The outermost one is sized against the host container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemDecl {
    pub width: SizeSpec,
    pub height: SizeSpec,
    pub background: Option<Color>,
    pub border_width: Option<f32>,
    pub border_color: Option<Color>,
    /// Space between rows, and between panes unless the row sets its own
    pub gap: Option<f32>,
    pub rows: Vec<RowDecl>,
}

/// A horizontal band of panes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowDecl {
    pub height: SizeSpec,
    pub min_height: SizeSpec,
    pub max_height: SizeSpec,
    pub splitter: Option<RowSplitterSide>,
    pub splitter_height: Option<f32>,
    pub splitter_color: Option<Color>,
    pub background: Option<Color>,
    pub border_width: Option<f32>,
    pub border_color: Option<Color>,
    pub gap: Option<f32>,
    pub panes: Vec<PaneDecl>,
}

/// A leaf region, which may host a nested system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneDecl {
    pub id: String,
    pub width: SizeSpec,
    pub min_width: SizeSpec,
    pub max_width: SizeSpec,
    pub splitter: Option<PaneSplitterSide>,
    pub splitter_width: Option<f32>,
    pub splitter_color: Option<Color>,
    pub background: Option<Color>,
    pub border_width: Option<f32>,
    pub border_color: Option<Color>,
    /// Opaque content rendered by the host
    pub content: Vec<String>,
    pub system: Option<Box<SystemDecl>>,
}

impl Default for SystemDecl {
    fn default() -> Self {
        Self {
            width: SizeSpec::Percent(100.0),
            height: SizeSpec::Percent(100.0),
            background: None,
            border_width: None,
            border_color: None,
            gap: None,
            rows: Vec::new(),
        }
    }
}

impl Default for RowDecl {
    fn default() -> Self {
        Self {
            height: SizeSpec::Auto,
            min_height: SizeSpec::Fixed(0.0),
            max_height: SizeSpec::Percent(100.0),
            splitter: None,
            splitter_height: None,
            splitter_color: None,
            background: None,
            border_width: None,
            border_color: None,
            gap: None,
            panes: Vec::new(),
        }
    }
}

impl Default for PaneDecl {
    fn default() -> Self {
        Self {
            id: String::new(),
            width: SizeSpec::Auto,
            min_width: SizeSpec::Fixed(0.0),
            max_width: SizeSpec::Percent(100.0),
            splitter: None,
            splitter_width: None,
            splitter_color: None,
            background: None,
            border_width: None,
            border_color: None,
            content: Vec::new(),
            system: None,
        }
    }
}

impl SystemDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LayoutError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn width(mut self, width: impl Into<SizeSpec>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<SizeSpec>) -> Self {
        self.height = height.into();
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = Some(width);
        self.border_color = Some(color);
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn row(mut self, row: RowDecl) -> Self {
        self.rows.push(row);
        self
    }
}

impl RowDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, height: impl Into<SizeSpec>) -> Self {
        self.height = height.into();
        self
    }

    pub fn min_height(mut self, min: impl Into<SizeSpec>) -> Self {
        self.min_height = min.into();
        self
    }

    pub fn max_height(mut self, max: impl Into<SizeSpec>) -> Self {
        self.max_height = max.into();
        self
    }

    pub fn splitter(mut self, side: RowSplitterSide) -> Self {
        self.splitter = Some(side);
        self
    }

    pub fn splitter_height(mut self, thickness: f32) -> Self {
        self.splitter_height = Some(thickness);
        self
    }

    pub fn splitter_color(mut self, color: Color) -> Self {
        self.splitter_color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = Some(width);
        self.border_color = Some(color);
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn pane(mut self, pane: PaneDecl) -> Self {
        self.panes.push(pane);
        self
    }

    pub fn axis_item(&self) -> AxisItem {
        AxisItem {
            size: self.height.clone(),
            constraint: Constraint {
                min: self.min_height.clone(),
                max: self.max_height.clone(),
            },
        }
    }
}

impl PaneDecl {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn width(mut self, width: impl Into<SizeSpec>) -> Self {
        self.width = width.into();
        self
    }

    pub fn min_width(mut self, min: impl Into<SizeSpec>) -> Self {
        self.min_width = min.into();
        self
    }

    pub fn max_width(mut self, max: impl Into<SizeSpec>) -> Self {
        self.max_width = max.into();
        self
    }

    pub fn splitter(mut self, side: PaneSplitterSide) -> Self {
        self.splitter = Some(side);
        self
    }

    pub fn splitter_width(mut self, thickness: f32) -> Self {
        self.splitter_width = Some(thickness);
        self
    }

    pub fn splitter_color(mut self, color: Color) -> Self {
        self.splitter_color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = Some(width);
        self.border_color = Some(color);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content.push(content.into());
        self
    }

    pub fn system(mut self, system: SystemDecl) -> Self {
        self.system = Some(Box::new(system));
        self
    }

    pub fn axis_item(&self) -> AxisItem {
        AxisItem {
            size: self.width.clone(),
            constraint: Constraint {
                min: self.min_width.clone(),
                max: self.max_width.clone(),
            },
        }
    }
}
