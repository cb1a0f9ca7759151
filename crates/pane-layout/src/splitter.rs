// ABOUTME: Splitter descriptors and their stable, tree-derived identifiers.
// ABOUTME: A splitter is a thin draggable strip on one edge of a row or pane.

use pane_core::{Color, Point, Rect};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Lies along the x axis and is dragged vertically (between rows)
    Horizontal,
    /// Lies along the y axis and is dragged horizontally (between panes)
    Vertical,
}

/// One step in a layout tree path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Row(usize),
    Pane(usize),
}

/// Identifies a splitter by the tree position of the row or pane that owns it.
///
/// The same logical splitter gets the same id on every pass, so registry
/// updates can be compared and intersections stay stable while dragging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SplitterId(Vec<Segment>);

impl SplitterId {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// This path extended by one segment
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for SplitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                Segment::Row(n) => write!(f, "r{n}")?,
                Segment::Pane(n) => write!(f, "p{n}")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid splitter id: {0}")]
pub struct ParseSplitterIdError(String);

impl FromStr for SplitterId {
    type Err = ParseSplitterIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSplitterIdError(s.to_string());
        if s == "root" {
            return Ok(Self::default());
        }
        s.split('/')
            .map(|part| {
                let (kind, number) = part.split_at_checked(1).ok_or_else(invalid)?;
                let n: usize = number.parse().map_err(|_| invalid())?;
                match kind {
                    "r" => Ok(Segment::Row(n)),
                    "p" => Ok(Segment::Pane(n)),
                    _ => Err(invalid()),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for SplitterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Range the splitter line may travel, in overlay coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DragBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// Geometry of one registered splitter.
///
/// `x`/`y` is the start of the splitter line: for a vertical splitter `x` is
/// the line itself and `y` its top, for a horizontal one `x` is its left end
/// and `y` the line. `width`/`height` are the extents, so a vertical splitter
/// has `width == thickness`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Splitter {
    pub id: SplitterId,
    pub orientation: Orientation,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Gap of the sibling group this splitter divides. The line sits half of
    /// it away from the sibling edges.
    pub gap: f32,
    pub color: Color,
    pub bounds: DragBounds,
}

impl Splitter {
    /// Drawn rectangle, centered on the line across its thickness
    pub fn rect(&self) -> Rect {
        match self.orientation {
            Orientation::Vertical => Rect::new(self.x - self.width / 2.0, self.y, self.width, self.height),
            Orientation::Horizontal => Rect::new(self.x, self.y - self.height / 2.0, self.width, self.height),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Pick the component of a pointer delta this splitter responds to
    pub fn axis_delta(&self, dx: f32, dy: f32) -> f32 {
        match self.orientation {
            Orientation::Vertical => dx,
            Orientation::Horizontal => dy,
        }
    }

    /// Whether two descriptors would render and behave the same
    pub fn same_geometry(&self, other: &Splitter) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_round_trips() {
        let id = SplitterId::default()
            .child(Segment::Row(1))
            .child(Segment::Pane(2))
            .child(Segment::Row(0));
        assert_eq!(id.to_string(), "r1/p2/r0");
        assert_eq!("r1/p2/r0".parse::<SplitterId>().unwrap(), id);
    }

    #[test]
    fn id_parse_rejects_garbage() {
        assert!("x1".parse::<SplitterId>().is_err());
        assert!("r".parse::<SplitterId>().is_err());
        assert!("r1//p2".parse::<SplitterId>().is_err());
    }

    #[test]
    fn rect_is_centered_on_line() {
        let splitter = Splitter {
            id: SplitterId::default().child(Segment::Pane(0)),
            orientation: Orientation::Vertical,
            x: 100.0,
            y: 0.0,
            width: 4.0,
            height: 50.0,
            color: Color::SPLITTER,
            bounds: DragBounds::default(),
            gap: 0.0,
        };
        assert_eq!(splitter.rect(), Rect::new(98.0, 0.0, 4.0, 50.0));
        assert!(splitter.contains(Point::new(101.0, 25.0)));
        assert!(!splitter.contains(Point::new(103.0, 25.0)));
        assert_eq!(splitter.axis_delta(5.0, -3.0), 5.0);
    }
}
