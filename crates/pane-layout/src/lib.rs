// ABOUTME: Declarative split-pane layout engine.
// ABOUTME: Sizes rows and panes from declarations and manages draggable splitters.

pub mod axis;
pub mod decl;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod intersection;
pub mod registry;
pub mod size;
pub mod splitter;
pub mod system;

pub use axis::{AxisItem, AxisState, Constraint};
pub use drag::Edge;
pub use decl::{PaneDecl, PaneSplitterSide, RowDecl, RowSplitterSide, SystemDecl};
pub use error::{GroupError, LayoutError};
pub use gesture::{DragGesture, DragTarget, GestureState};
pub use intersection::{IntersectionId, SplitterIntersection};
pub use registry::SplitterRegistry;
pub use size::{size_to_pixels, SizeError, SizeSpec};
pub use splitter::{DragBounds, Orientation, Segment, Splitter, SplitterId};
pub use system::{Border, Layout, LayoutFrame, PaneGeometry, RowGeometry};
