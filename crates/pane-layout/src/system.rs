// ABOUTME: Layout tree runtime for a declared pane system.
// ABOUTME: Runs layout passes, registers splitters, and applies drags and pointer gestures.

use pane_core::{Color, Config, Point, Rect};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::axis::{self, AxisItem, AxisState};
use crate::decl::{PaneDecl, PaneSplitterSide, RowDecl, RowSplitterSide, SystemDecl};
use crate::drag::{drag_partner, Edge};
use crate::error::{GroupError, LayoutError};
use crate::gesture::{DragGesture, DragTarget};
use crate::intersection::{IntersectionId, SplitterIntersection};
use crate::registry::SplitterRegistry;
use crate::splitter::{DragBounds, Orientation, Segment, Splitter, SplitterId};

/// Pass-through styling after cascading pane over row over system over config
#[derive(Debug, Clone, Copy, PartialEq)]
struct Style {
    background: Color,
    border_width: f32,
    border_color: Color,
}

impl Style {
    fn cascade(&self, background: Option<Color>, border_width: Option<f32>, border_color: Option<Color>) -> Self {
        Self {
            background: background.unwrap_or(self.background),
            border_width: border_width.unwrap_or(self.border_width),
            border_color: border_color.unwrap_or(self.border_color),
        }
    }

    fn border(&self) -> Border {
        Border {
            width: self.border_width,
            color: self.border_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitterStyle {
    thickness: f32,
    color: Color,
}

/// Resolved geometry of one pane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaneGeometry {
    pub id: String,
    pub rect: Rect,
    pub background: Color,
    /// Trailing-edge border, absent on the last pane of a row
    pub border: Option<Border>,
    pub content: Vec<String>,
}

/// Resolved geometry of one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGeometry {
    pub path: String,
    pub rect: Rect,
    /// Bottom border, absent on the last row of a system
    pub border: Option<Border>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutFrame {
    pub system: Option<Rect>,
    pub rows: Vec<RowGeometry>,
    pub panes: Vec<PaneGeometry>,
    pub splitters: Vec<Splitter>,
    pub intersections: Vec<SplitterIntersection>,
    pub active: Vec<SplitterId>,
}

#[derive(Debug)]
struct PaneNode {
    id: String,
    path: SplitterId,
    splitter: Option<(PaneSplitterSide, SplitterStyle)>,
    style: Style,
    content: Vec<String>,
    nested: Option<Box<SystemNode>>,
    rect: Option<Rect>,
}

#[derive(Debug)]
struct RowNode {
    path: SplitterId,
    splitter: Option<(RowSplitterSide, SplitterStyle)>,
    style: Style,
    gap: f32,
    items: Vec<AxisItem>,
    axis: AxisState,
    panes: Vec<PaneNode>,
    rect: Option<Rect>,
}

#[derive(Debug)]
struct SystemNode {
    path: SplitterId,
    width: crate::size::SizeSpec,
    height: crate::size::SizeSpec,
    gap: f32,
    items: Vec<AxisItem>,
    axis: AxisState,
    rows: Vec<RowNode>,
    frame: Option<Rect>,
}

fn group_error(kind: &'static str, path: &SplitterId, source: GroupError) -> LayoutError {
    LayoutError::Group {
        kind,
        path: path.to_string(),
        source,
    }
}

/// Warn when a declared splitter does not sit between its sibling and the auto sibling
fn check_splitter_side(items: &[AxisItem], index: usize, edge: Edge, path: &SplitterId) {
    if drag_partner(items, index, edge).is_none() {
        tracing::warn!(
            "Splitter {} does not border the auto-sized sibling; dragging it has no effect",
            path
        );
    }
}

impl SystemNode {
    fn build(decl: &SystemDecl, path: SplitterId, inherited: &Style, config: &Config) -> Result<Self, LayoutError> {
        let style = inherited.cascade(decl.background, decl.border_width, decl.border_color);
        let gap = decl.gap.unwrap_or(config.appearance.gap);
        let items: Vec<AxisItem> = decl.rows.iter().map(RowDecl::axis_item).collect();
        axis::auto_index(&items).map_err(|source| group_error("row", &path, source))?;

        let rows = decl
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let row_path = path.child(Segment::Row(i));
                if let Some(side) = row.splitter {
                    check_splitter_side(&items, i, side.edge(), &row_path);
                }
                RowNode::build(row, row_path, &style, gap, config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path,
            width: decl.width.clone(),
            height: decl.height.clone(),
            gap,
            items,
            axis: AxisState::new(),
            rows,
            frame: None,
        })
    }

    fn invalidate(&mut self) {
        self.axis.invalidate();
        for row in &mut self.rows {
            row.axis.invalidate();
            for pane in &mut row.panes {
                if let Some(nested) = &mut pane.nested {
                    nested.invalidate();
                }
            }
        }
    }

    fn layout(
        &mut self,
        host: Rect,
        registry: &mut SplitterRegistry,
        seen: &mut BTreeSet<SplitterId>,
    ) -> Result<(), LayoutError> {
        let frame = Rect::new(
            host.x,
            host.y,
            self.width.resolve(host.width),
            self.height.resolve(host.height),
        );
        self.frame = Some(frame);

        self.axis
            .measure(&self.items, frame.height, self.gap)
            .map_err(|source| group_error("row", &self.path, source))?;
        if !self.axis.is_allocated() {
            return Ok(());
        }

        let heights = self.axis.sizes().to_vec();
        let tops = axis::offsets(&heights, self.gap);
        let half_gap = self.gap / 2.0;

        for (i, row) in self.rows.iter_mut().enumerate() {
            let rect = Rect::new(frame.x, frame.y + tops[i], frame.width, heights[i]);
            row.rect = Some(rect);

            if let Some((side, look)) = row.splitter {
                // A deferred measurement keeps the sizes and bounds of the last real one
                let (extent, _) = self.axis.measured().unwrap_or((frame.height, self.gap));
                let bounds = self.items[i].constraint.resolve(extent, self.gap);
                let (line, min_y, max_y) = match side {
                    RowSplitterSide::Bottom => (
                        rect.bottom() + half_gap,
                        rect.y + bounds.min + half_gap,
                        rect.y + bounds.max + half_gap,
                    ),
                    RowSplitterSide::Top => (
                        rect.y - half_gap,
                        rect.bottom() - bounds.max - half_gap,
                        rect.bottom() - bounds.min - half_gap,
                    ),
                };
                registry.add_splitter(Splitter {
                    id: row.path.clone(),
                    orientation: Orientation::Horizontal,
                    x: frame.x,
                    y: line,
                    width: frame.width,
                    height: look.thickness,
                    gap: self.gap,
                    color: look.color,
                    bounds: DragBounds {
                        min_x: frame.x,
                        min_y,
                        max_x: frame.right(),
                        max_y,
                    },
                });
                seen.insert(row.path.clone());
            }

            row.layout(rect, registry, seen)?;
        }

        Ok(())
    }

    /// Route a drag to the group owning the splitter at `segments`. None if no
    /// such splitter is declared.
    fn drag(&mut self, segments: &[Segment], delta: f32) -> Option<bool> {
        match segments {
            [Segment::Row(i)] => {
                let (side, _) = self.rows.get(*i)?.splitter?;
                Some(self.axis.drag(&self.items, *i, side.edge(), delta))
            }
            [Segment::Row(i), Segment::Pane(j)] => {
                let row = self.rows.get_mut(*i)?;
                let (side, _) = row.panes.get(*j)?.splitter?;
                Some(row.axis.drag(&row.items, *j, side.edge(), delta))
            }
            [Segment::Row(i), Segment::Pane(j), rest @ ..] => self
                .rows
                .get_mut(*i)?
                .panes
                .get_mut(*j)?
                .nested
                .as_mut()?
                .drag(rest, delta),
            _ => None,
        }
    }

    fn collect(&self, rows: &mut Vec<RowGeometry>, panes: &mut Vec<PaneGeometry>) {
        let last_row = self.rows.len().saturating_sub(1);
        for (i, row) in self.rows.iter().enumerate() {
            let Some(rect) = row.rect else { continue };
            rows.push(RowGeometry {
                path: row.path.to_string(),
                rect,
                border: (i != last_row).then(|| row.style.border()),
            });

            let last_pane = row.panes.len().saturating_sub(1);
            for (j, pane) in row.panes.iter().enumerate() {
                let Some(rect) = pane.rect else { continue };
                panes.push(PaneGeometry {
                    id: pane.id.clone(),
                    rect,
                    background: pane.style.background,
                    border: (j != last_pane).then(|| pane.style.border()),
                    content: pane.content.clone(),
                });
                if let Some(nested) = &pane.nested {
                    nested.collect(rows, panes);
                }
            }
        }
    }
}

impl RowNode {
    fn build(decl: &RowDecl, path: SplitterId, inherited: &Style, system_gap: f32, config: &Config) -> Result<Self, LayoutError> {
        let style = inherited.cascade(decl.background, decl.border_width, decl.border_color);
        let gap = decl.gap.unwrap_or(system_gap);
        let items: Vec<AxisItem> = decl.panes.iter().map(PaneDecl::axis_item).collect();
        axis::auto_index(&items).map_err(|source| group_error("pane", &path, source))?;

        let splitter = decl.splitter.map(|side| {
            (
                side,
                SplitterStyle {
                    thickness: decl.splitter_height.unwrap_or(config.splitter.thickness),
                    color: decl.splitter_color.unwrap_or(config.splitter.color),
                },
            )
        });

        let panes = decl
            .panes
            .iter()
            .enumerate()
            .map(|(j, pane)| {
                let pane_path = path.child(Segment::Pane(j));
                if let Some(side) = pane.splitter {
                    check_splitter_side(&items, j, side.edge(), &pane_path);
                }
                PaneNode::build(pane, pane_path, &style, config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path,
            splitter,
            style,
            gap,
            items,
            axis: AxisState::new(),
            panes,
            rect: None,
        })
    }

    fn layout(
        &mut self,
        rect: Rect,
        registry: &mut SplitterRegistry,
        seen: &mut BTreeSet<SplitterId>,
    ) -> Result<(), LayoutError> {
        self.axis
            .measure(&self.items, rect.width, self.gap)
            .map_err(|source| group_error("pane", &self.path, source))?;
        if !self.axis.is_allocated() {
            return Ok(());
        }

        let widths = self.axis.sizes().to_vec();
        let lefts = axis::offsets(&widths, self.gap);
        let half_gap = self.gap / 2.0;

        for (j, pane) in self.panes.iter_mut().enumerate() {
            let pane_rect = Rect::new(rect.x + lefts[j], rect.y, widths[j], rect.height);
            pane.rect = Some(pane_rect);

            if let Some((side, look)) = pane.splitter {
                let (extent, _) = self.axis.measured().unwrap_or((rect.width, self.gap));
                let bounds = self.items[j].constraint.resolve(extent, self.gap);
                let (line, min_x, max_x) = match side {
                    PaneSplitterSide::Right => (
                        pane_rect.right() + half_gap,
                        pane_rect.x + bounds.min + half_gap,
                        pane_rect.x + bounds.max + half_gap,
                    ),
                    PaneSplitterSide::Left => (
                        pane_rect.x - half_gap,
                        pane_rect.right() - bounds.max - half_gap,
                        pane_rect.right() - bounds.min - half_gap,
                    ),
                };
                registry.add_splitter(Splitter {
                    id: pane.path.clone(),
                    orientation: Orientation::Vertical,
                    x: line,
                    y: rect.y,
                    width: look.thickness,
                    height: rect.height,
                    gap: self.gap,
                    color: look.color,
                    bounds: DragBounds {
                        min_x,
                        min_y: rect.y,
                        max_x,
                        max_y: rect.bottom(),
                    },
                });
                seen.insert(pane.path.clone());
            }

            if let Some(nested) = &mut pane.nested {
                nested.layout(pane_rect, registry, seen)?;
            }
        }

        Ok(())
    }
}

impl PaneNode {
    fn build(decl: &PaneDecl, path: SplitterId, inherited: &Style, config: &Config) -> Result<Self, LayoutError> {
        let style = inherited.cascade(decl.background, decl.border_width, decl.border_color);
        let splitter = decl.splitter.map(|side| {
            (
                side,
                SplitterStyle {
                    thickness: decl.splitter_width.unwrap_or(config.splitter.thickness),
                    color: decl.splitter_color.unwrap_or(config.splitter.color),
                },
            )
        });

        let nested = match &decl.system {
            Some(system) => {
                if !decl.content.is_empty() {
                    tracing::warn!(
                        "Pane {:?} nests a pane system alongside other content; its sizing is best-effort",
                        decl.id
                    );
                }
                Some(Box::new(SystemNode::build(system, path.clone(), &style, config)?))
            }
            None => None,
        };

        Ok(Self {
            id: decl.id.clone(),
            path,
            splitter,
            style,
            content: decl.content.clone(),
            nested,
            rect: None,
        })
    }
}

/// A laid-out pane system with its own splitter registry.
///
/// Nested systems declared inside panes share this registry and are laid out
/// in the same coordinate space. A separate `Layout` embedded in another one
/// keeps its own registry; place it with [`Layout::resize_within`] to express
/// its geometry in the outer tree's coordinates.
#[derive(Debug)]
pub struct Layout {
    root: SystemNode,
    registry: SplitterRegistry,
    gesture: DragGesture,
    config: Config,
    host: Option<Rect>,
}

impl Layout {
    /// Validate `decl` and build an unmeasured layout
    pub fn new(decl: &SystemDecl, config: &Config) -> Result<Self, LayoutError> {
        let root = Self::build_root(decl, config)?;
        Ok(Self {
            root,
            registry: SplitterRegistry::new(&config.splitter),
            gesture: DragGesture::new(),
            config: config.clone(),
            host: None,
        })
    }

    pub fn with_defaults(decl: &SystemDecl) -> Result<Self, LayoutError> {
        Self::new(decl, &Config::default())
    }

    fn build_root(decl: &SystemDecl, config: &Config) -> Result<SystemNode, LayoutError> {
        let base = Style {
            background: config.appearance.background,
            border_width: config.appearance.border_width,
            border_color: config.appearance.border_color,
        };
        SystemNode::build(decl, SplitterId::default(), &base, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lay out against a host container at the origin
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), LayoutError> {
        self.resize_within(Rect::new(0.0, 0.0, width, height))
    }

    /// Lay out against a host rectangle in the overlay's coordinate space
    pub fn resize_within(&mut self, host: Rect) -> Result<(), LayoutError> {
        self.host = Some(host);
        self.relayout()
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        let Some(host) = self.host else {
            return Ok(());
        };
        let mut seen = BTreeSet::new();
        self.root.layout(host, &mut self.registry, &mut seen)?;
        if self.root.axis.is_allocated() {
            self.registry.retain(|id| seen.contains(id));
        }
        Ok(())
    }

    /// Forget drag adjustments; the next pass reallocates from the declarations
    pub fn invalidate(&mut self) -> Result<(), LayoutError> {
        self.root.invalidate();
        self.relayout()
    }

    /// Swap in a new declaration. Splitters it no longer declares are removed.
    pub fn replace(&mut self, decl: &SystemDecl) -> Result<(), LayoutError> {
        self.root = Self::build_root(decl, &self.config)?;
        self.gesture.end();
        self.registry.set_active(None);
        self.relayout()
    }

    fn apply_drag(&mut self, id: &SplitterId, delta: f32) -> Result<bool, LayoutError> {
        if self.registry.get(id).is_none() {
            return Err(LayoutError::UnknownSplitter(id.clone()));
        }
        let changed = self
            .root
            .drag(id.segments(), delta)
            .ok_or_else(|| LayoutError::UnknownSplitter(id.clone()))?;
        if changed {
            tracing::debug!("Dragged splitter {} by {}", id, delta);
        }
        Ok(changed)
    }

    /// Apply one relative drag to a splitter and re-run the layout pass
    pub fn drag_splitter(&mut self, id: &SplitterId, delta: f32) -> Result<bool, LayoutError> {
        let changed = self.apply_drag(id, delta)?;
        if changed {
            self.relayout()?;
        }
        Ok(changed)
    }

    /// Apply a pointer delta to both splitters behind an intersection handle.
    ///
    /// Dispatches through the splitter ids, so the drag keeps working if the
    /// two lines stop touching partway through a gesture.
    pub fn drag_intersection(&mut self, id: &IntersectionId, dx: f32, dy: f32) -> Result<bool, LayoutError> {
        let mut steps = Vec::with_capacity(2);
        for splitter_id in id.splitters() {
            let delta = self
                .registry
                .get(splitter_id)
                .ok_or_else(|| LayoutError::UnknownSplitter(splitter_id.clone()))?
                .axis_delta(dx, dy);
            steps.push((splitter_id, delta));
        }

        let mut changed = false;
        let mut failed = None;
        for (splitter_id, delta) in steps {
            match self.apply_drag(splitter_id, delta) {
                Ok(moved) => changed |= moved,
                Err(e) => {
                    failed = Some(e);
                    break;
                }
            }
        }
        // Geometry must follow whatever was applied, even if one half failed
        if changed {
            self.relayout()?;
        }
        match failed {
            Some(e) => Err(e),
            None => Ok(changed),
        }
    }

    /// Pointer pressed. Starts a gesture if a handle or splitter is under `at`.
    pub fn pointer_down(&mut self, at: Point) -> Option<DragTarget> {
        let target = self.registry.hit_test(at)?;
        self.gesture.begin(target.clone(), at);
        self.registry.set_active(Some(&target));
        Some(target)
    }

    /// Pointer moved. Returns true when sizes changed.
    pub fn pointer_move(&mut self, at: Point) -> Result<bool, LayoutError> {
        let Some(step) = self.gesture.update(at) else {
            return Ok(false);
        };
        let result = match &step.target {
            DragTarget::Splitter(id) => match self.registry.get(id) {
                Some(splitter) => {
                    let delta = splitter.axis_delta(step.dx, step.dy);
                    self.drag_splitter(id, delta)
                }
                None => Err(LayoutError::UnknownSplitter(id.clone())),
            },
            DragTarget::Intersection(id) => self.drag_intersection(id, step.dx, step.dy),
        };
        if result.is_err() {
            tracing::warn!("Drag target vanished mid-gesture, releasing");
            self.pointer_up();
        }
        result
    }

    /// Pointer released
    pub fn pointer_up(&mut self) -> Option<DragTarget> {
        self.registry.set_active(None);
        self.gesture.end()
    }

    /// Pointer capture taken away (window lost focus, touch cancelled)
    pub fn capture_lost(&mut self) -> Option<DragTarget> {
        tracing::debug!("Pointer capture lost");
        self.pointer_up()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn registry(&self) -> &SplitterRegistry {
        &self.registry
    }

    pub fn splitters(&self) -> impl Iterator<Item = &Splitter> {
        self.registry.splitters()
    }

    pub fn splitter(&self, id: &SplitterId) -> Option<&Splitter> {
        self.registry.get(id)
    }

    pub fn intersections(&self) -> &[SplitterIntersection] {
        self.registry.intersections()
    }

    pub fn active_splitters(&self) -> &[SplitterId] {
        self.registry.active_ids()
    }

    /// Resolved rectangle of the outermost system, once measured
    pub fn system_rect(&self) -> Option<Rect> {
        self.root.frame
    }

    pub fn rows(&self) -> Vec<RowGeometry> {
        let mut rows = Vec::new();
        let mut panes = Vec::new();
        self.root.collect(&mut rows, &mut panes);
        rows
    }

    /// Laid-out panes in tree order, nested systems after their host pane
    pub fn panes(&self) -> Vec<PaneGeometry> {
        let mut rows = Vec::new();
        let mut panes = Vec::new();
        self.root.collect(&mut rows, &mut panes);
        panes
    }

    pub fn pane_rect(&self, id: &str) -> Option<Rect> {
        self.panes().into_iter().find(|p| p.id == id).map(|p| p.rect)
    }

    /// Get all panes with their layout rectangles
    pub fn pane_rects(&self) -> BTreeMap<String, Rect> {
        self.panes().into_iter().map(|p| (p.id, p.rect)).collect()
    }

    pub fn frame(&self) -> LayoutFrame {
        let mut rows = Vec::new();
        let mut panes = Vec::new();
        self.root.collect(&mut rows, &mut panes);
        LayoutFrame {
            system: self.root.frame,
            rows,
            panes,
            splitters: self.registry.splitters().cloned().collect(),
            intersections: self.registry.intersections().to_vec(),
            active: self.registry.active_ids().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{PaneDecl, RowDecl};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Collects the message of every warning emitted while installed
    #[derive(Clone, Default)]
    struct WarningCapture {
        messages: Arc<Mutex<Vec<String>>>,
    }

    struct MessageVisitor<'a>(&'a mut String);

    impl tracing::field::Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                *self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for WarningCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::WARN {
                return;
            }
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.messages.lock().expect("warning capture lock").push(message);
        }
    }

    fn warnings_while(f: impl FnOnce()) -> Vec<String> {
        let capture = WarningCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        {
            let _guard = tracing::subscriber::set_default(subscriber);
            tracing::callsite::rebuild_interest_cache();
            f();
        }
        let messages = capture.messages.lock().expect("warning capture lock");
        messages.clone()
    }

    fn single_pane(id: &str) -> SystemDecl {
        SystemDecl::new().row(RowDecl::new().pane(PaneDecl::new(id)))
    }

    fn two_columns() -> SystemDecl {
        SystemDecl::new().row(
            RowDecl::new()
                .pane(
                    PaneDecl::new("left")
                        .width(200.0)
                        .min_width(100.0)
                        .max_width(400.0)
                        .splitter(PaneSplitterSide::Right),
                )
                .pane(PaneDecl::new("right")),
        )
    }

    #[test]
    fn unmeasured_layout_has_no_geometry() {
        let layout = Layout::with_defaults(&two_columns()).unwrap();
        assert!(layout.panes().is_empty());
        assert!(layout.registry().is_empty());
    }

    #[test]
    fn zero_size_defers_allocation() {
        let mut layout = Layout::with_defaults(&two_columns()).unwrap();
        layout.resize(0.0, 0.0).unwrap();
        assert!(layout.panes().is_empty());

        layout.resize(1000.0, 500.0).unwrap();
        assert_eq!(layout.pane_rect("left"), Some(Rect::new(0.0, 0.0, 200.0, 500.0)));
        assert_eq!(layout.pane_rect("right"), Some(Rect::new(200.0, 0.0, 800.0, 500.0)));
    }

    #[test]
    fn splitter_sits_on_pane_edge() {
        let mut layout = Layout::with_defaults(&two_columns()).unwrap();
        layout.resize(1000.0, 500.0).unwrap();

        let id: SplitterId = "r0/p0".parse().unwrap();
        let splitter = layout.splitter(&id).unwrap();
        assert_eq!(splitter.orientation, Orientation::Vertical);
        assert_eq!((splitter.x, splitter.y), (200.0, 0.0));
        assert_eq!((splitter.width, splitter.height), (4.0, 500.0));
        assert_eq!((splitter.bounds.min_x, splitter.bounds.max_x), (100.0, 400.0));
    }

    #[test]
    fn empty_system_is_rejected() {
        let err = Layout::with_defaults(&SystemDecl::new()).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Group {
                source: GroupError::Empty,
                ..
            }
        ));
    }

    #[test]
    fn nested_multiple_auto_reports_path() {
        let decl = SystemDecl::new().row(
            RowDecl::new().pane(
                PaneDecl::new("host").system(
                    SystemDecl::new().row(
                        RowDecl::new()
                            .pane(PaneDecl::new("a"))
                            .pane(PaneDecl::new("b")),
                    ),
                ),
            ),
        );
        match Layout::with_defaults(&decl).unwrap_err() {
            LayoutError::Group { kind, path, source } => {
                assert_eq!(kind, "pane");
                assert_eq!(path, "r0/p0/r0");
                assert_eq!(source, GroupError::MultipleAuto { count: 2 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_system_beside_content_warns() {
        let decl = SystemDecl::new().row(
            RowDecl::new().pane(
                PaneDecl::new("host")
                    .content("status line")
                    .system(single_pane("inner")),
            ),
        );
        let mut layout = None;
        let warnings = warnings_while(|| layout = Some(Layout::with_defaults(&decl).unwrap()));
        assert!(
            warnings.iter().any(|w| w.contains("\"host\" nests a pane system")),
            "warnings: {warnings:?}"
        );

        // Still laid out on a best-effort basis
        let mut layout = layout.unwrap();
        layout.resize(200.0, 100.0).unwrap();
        assert_eq!(layout.pane_rect("inner"), Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
    }

    #[test]
    fn nested_system_alone_is_quiet() {
        let decl = SystemDecl::new().row(
            RowDecl::new().pane(PaneDecl::new("host").system(single_pane("inner"))),
        );
        let warnings = warnings_while(|| {
            Layout::with_defaults(&decl).unwrap();
        });
        assert!(warnings.is_empty(), "warnings: {warnings:?}");
    }

    #[test]
    fn splitter_facing_away_from_auto_warns_and_stays_put() {
        let decl = SystemDecl::new().row(
            RowDecl::new()
                .pane(PaneDecl::new("content"))
                .pane(
                    PaneDecl::new("side")
                        .width(200.0)
                        .splitter(PaneSplitterSide::Right),
                ),
        );
        let mut layout = None;
        let warnings = warnings_while(|| layout = Some(Layout::with_defaults(&decl).unwrap()));
        assert!(
            warnings.iter().any(|w| w.contains("r0/p1 does not border")),
            "warnings: {warnings:?}"
        );

        let mut layout = layout.unwrap();
        layout.resize(800.0, 600.0).unwrap();
        let id: SplitterId = "r0/p1".parse().unwrap();
        assert!(!layout.drag_splitter(&id, 30.0).unwrap());
        assert_eq!(layout.pane_rect("side").unwrap().width, 200.0);
        assert_eq!(layout.pane_rect("content").unwrap().width, 600.0);
    }

    #[test]
    fn styles_cascade() {
        let decl = SystemDecl::new().background(Color::GRAY).row(
            RowDecl::new()
                .border(3.0, Color::TRANSPARENT)
                .pane(PaneDecl::new("a").width(100.0))
                .pane(PaneDecl::new("b").background(Color::TRANSPARENT)),
        );
        let mut layout = Layout::with_defaults(&decl).unwrap();
        layout.resize(300.0, 100.0).unwrap();

        let panes = layout.panes();
        assert_eq!(panes[0].background, Color::GRAY);
        assert_eq!(
            panes[0].border,
            Some(Border {
                width: 3.0,
                color: Color::TRANSPARENT
            })
        );
        assert_eq!(panes[1].background, Color::TRANSPARENT);
        assert_eq!(panes[1].border, None);
    }
}
