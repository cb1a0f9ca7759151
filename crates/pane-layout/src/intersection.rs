// ABOUTME: Detects where a horizontal and a vertical splitter meet.
// ABOUTME: Each meeting point gets a combined handle that drags both splitters.

use pane_core::{Point, Rect};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::splitter::{Orientation, Splitter, SplitterId};

/// Default tolerance for sub-pixel jitter when matching splitter lines
pub const DEFAULT_ALIGNMENT_EPSILON: f32 = 1.0;

/// Default margin around an intersection handle, per side
pub const DEFAULT_HANDLE_PADDING: f32 = 2.0;

/// Unordered pair of splitter ids, stored in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntersectionId {
    first: SplitterId,
    second: SplitterId,
}

impl IntersectionId {
    pub fn new(a: SplitterId, b: SplitterId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn splitters(&self) -> [&SplitterId; 2] {
        [&self.first, &self.second]
    }
}

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

impl Serialize for IntersectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A combined drag handle where two perpendicular splitters meet.
///
/// `x`/`y` is the crossing point, the handle is a square of side `width`
/// centered on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitterIntersection {
    pub id: IntersectionId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub splitter1: Splitter,
    pub splitter2: Splitter,
}

impl SplitterIntersection {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn handle_rect(&self) -> Rect {
        Rect::new(
            self.x - self.width / 2.0,
            self.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Split a pointer delta between the two splitters: x to the vertical one, y to the horizontal one
    pub fn drag_deltas(&self, dx: f32, dy: f32) -> [(SplitterId, f32); 2] {
        [
            (self.splitter1.id.clone(), self.splitter1.axis_delta(dx, dy)),
            (self.splitter2.id.clone(), self.splitter2.axis_delta(dx, dy)),
        ]
    }
}

fn within(value: f32, start: f32, end: f32, epsilon: f32) -> bool {
    value >= start - epsilon && value <= end + epsilon
}

/// Whether two splitter lines touch or cross.
///
/// The vertical line must fall within the horizontal run (endpoints included)
/// and the horizontal line within the vertical run, each within `epsilon`.
/// Runs stop at the sibling edges while the lines sit in the middle of the
/// gap, so each test also allows half the gap of the other line's group.
/// Parallel splitters never intersect.
pub fn crosses(a: &Splitter, b: &Splitter, epsilon: f32) -> bool {
    let (h, v) = match (a.orientation, b.orientation) {
        (Orientation::Horizontal, Orientation::Vertical) => (a, b),
        (Orientation::Vertical, Orientation::Horizontal) => (b, a),
        _ => return false,
    };
    within(v.x, h.x, h.x + h.width, epsilon + v.gap / 2.0)
        && within(h.y, v.y, v.y + v.height, epsilon + h.gap / 2.0)
}

/// Find every crossing pair. Quadratic in the number of splitters.
pub fn detect<'a, I>(splitters: I, epsilon: f32, padding: f32) -> Vec<SplitterIntersection>
where
    I: IntoIterator<Item = &'a Splitter>,
{
    let splitters: Vec<&Splitter> = splitters.into_iter().collect();
    let mut found = Vec::new();

    for (i, s1) in splitters.iter().enumerate() {
        for s2 in &splitters[i + 1..] {
            if s1.id == s2.id || !crosses(s1, s2, epsilon) {
                continue;
            }
            let (h, v) = if s1.orientation == Orientation::Horizontal {
                (*s1, *s2)
            } else {
                (*s2, *s1)
            };
            let side = v.width.max(h.height) + padding * 2.0;
            let id = IntersectionId::new(s1.id.clone(), s2.id.clone());
            let (splitter1, splitter2) = if s1.id <= s2.id {
                ((*s1).clone(), (*s2).clone())
            } else {
                ((*s2).clone(), (*s1).clone())
            };

            found.push(SplitterIntersection {
                id,
                x: v.x,
                y: h.y,
                width: side,
                height: side,
                splitter1,
                splitter2,
            });
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::{DragBounds, Segment};
    use pane_core::Color;

    fn splitter(id: usize, orientation: Orientation, x: f32, y: f32, width: f32, height: f32) -> Splitter {
        Splitter {
            id: SplitterId::default().child(Segment::Row(id)),
            orientation,
            x,
            y,
            width,
            height,
            color: Color::SPLITTER,
            bounds: DragBounds::default(),
            gap: 0.0,
        }
    }

    #[test]
    fn vertical_meeting_horizontal_run() {
        let v = splitter(0, Orientation::Vertical, 100.0, 0.0, 4.0, 50.0);
        let h = splitter(1, Orientation::Horizontal, 0.0, 50.0, 200.0, 4.0);

        let found = detect([&v, &h], DEFAULT_ALIGNMENT_EPSILON, DEFAULT_HANDLE_PADDING);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].center(), Point::new(100.0, 50.0));
        assert_eq!(found[0].width, 8.0);
        assert_eq!(found[0].handle_rect(), Rect::new(96.0, 46.0, 8.0, 8.0));
    }

    #[test]
    fn moving_away_removes_intersection() {
        let v = splitter(0, Orientation::Vertical, 300.0, 0.0, 4.0, 50.0);
        let h = splitter(1, Orientation::Horizontal, 0.0, 50.0, 200.0, 4.0);
        assert!(detect([&v, &h], 1.0, 2.0).is_empty());

        let other = splitter(2, Orientation::Horizontal, 200.0, 50.0, 100.0, 4.0);
        let found = detect([&v, &h, &other], 1.0, 2.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, IntersectionId::new(v.id.clone(), other.id.clone()));
    }

    #[test]
    fn endpoints_match_within_epsilon() {
        let h = splitter(0, Orientation::Horizontal, 0.0, 50.0, 200.0, 4.0);
        let at_start = splitter(1, Orientation::Vertical, 0.6, 50.0, 4.0, 100.0);
        let at_end = splitter(2, Orientation::Vertical, 200.9, 0.0, 4.0, 50.4);
        let outside = splitter(3, Orientation::Vertical, 201.5, 0.0, 4.0, 50.0);

        assert!(crosses(&h, &at_start, 1.0));
        assert!(crosses(&h, &at_end, 1.0));
        assert!(!crosses(&h, &outside, 1.0));
    }

    #[test]
    fn lines_across_a_gap_still_meet() {
        // Row splitter in the middle of a 10px gap, pane splitter starting below it
        let mut h = splitter(0, Orientation::Horizontal, 0.0, 105.0, 300.0, 4.0);
        let mut v = splitter(1, Orientation::Vertical, 105.0, 110.0, 4.0, 290.0);
        assert!(!crosses(&h, &v, 1.0));

        h.gap = 10.0;
        v.gap = 10.0;
        assert!(crosses(&h, &v, 1.0));
        let found = detect([&h, &v], 1.0, 2.0);
        assert_eq!(found[0].center(), Point::new(105.0, 105.0));

        // Half a gap is all the slack there is
        v.y = 112.0;
        assert!(!crosses(&h, &v, 1.0));
    }

    #[test]
    fn parallel_splitters_never_intersect() {
        let a = splitter(0, Orientation::Vertical, 100.0, 0.0, 4.0, 50.0);
        let b = splitter(1, Orientation::Vertical, 100.0, 0.0, 4.0, 50.0);
        assert!(detect([&a, &b], 1.0, 2.0).is_empty());
    }

    #[test]
    fn combined_drag_routes_each_axis() {
        let v = splitter(0, Orientation::Vertical, 100.0, 0.0, 4.0, 50.0);
        let h = splitter(1, Orientation::Horizontal, 0.0, 50.0, 200.0, 4.0);
        let found = detect([&h, &v], 1.0, 2.0);

        let deltas = found[0].drag_deltas(7.0, -3.0);
        assert!(deltas.contains(&(v.id.clone(), 7.0)));
        assert!(deltas.contains(&(h.id.clone(), -3.0)));
    }

    #[test]
    fn id_is_order_independent() {
        let a = SplitterId::default().child(Segment::Row(0));
        let b = SplitterId::default().child(Segment::Pane(3));
        assert_eq!(IntersectionId::new(a.clone(), b.clone()), IntersectionId::new(b, a));
    }
}
