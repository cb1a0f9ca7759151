// ABOUTME: Axis allocator turning sibling size specs into pixel lengths.
// ABOUTME: Clamps numeric siblings to their bounds and lets one auto sibling fill the rest.

use serde::{Deserialize, Serialize};

use crate::drag::Edge;
use crate::error::GroupError;
use crate::size::SizeSpec;

/// Per-sibling bounds, resolved against the same container as the size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraint {
    pub min: SizeSpec,
    pub max: SizeSpec,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            min: SizeSpec::Fixed(0.0),
            max: SizeSpec::Percent(100.0),
        }
    }
}

/// Pixel bounds for one sibling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Constraint {
    pub fn new(min: impl Into<SizeSpec>, max: impl Into<SizeSpec>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// The max loses one gap so the auto sibling never goes negative when gaps are present
    pub fn resolve(&self, container: f32, gap: f32) -> Bounds {
        Bounds {
            min: self.min.resolve(container),
            max: self.max.resolve(container) - gap,
        }
    }
}

/// One sibling as the allocator sees it
#[derive(Debug, Clone, PartialEq)]
pub struct AxisItem {
    pub size: SizeSpec,
    pub constraint: Constraint,
}

impl AxisItem {
    pub fn new(size: impl Into<SizeSpec>) -> Self {
        Self {
            size: size.into(),
            constraint: Constraint::default(),
        }
    }

    pub fn auto() -> Self {
        Self::new(SizeSpec::Auto)
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }
}

/// Limit `value` to `[min, max]`, letting `max` win when the range is inverted
pub fn limit(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Check the group and return the index of its auto sibling, if any
pub fn auto_index(items: &[AxisItem]) -> Result<Option<usize>, GroupError> {
    if items.is_empty() {
        return Err(GroupError::Empty);
    }
    let count = items.iter().filter(|item| item.size.is_auto()).count();
    if count > 1 {
        return Err(GroupError::MultipleAuto { count });
    }
    Ok(items.iter().position(|item| item.size.is_auto()))
}

/// Resolve every sibling to pixels.
///
/// Returns an empty vector while the container is unmeasured (zero, negative
/// or non-finite). Configuration errors are reported before that check, so a
/// broken group fails even before its first measurement.
pub fn allocate(items: &[AxisItem], container: f32, gap: f32) -> Result<Vec<f32>, GroupError> {
    let auto = auto_index(items)?;
    if !(container.is_finite() && container > 0.0) {
        return Ok(Vec::new());
    }

    let mut sizes: Vec<f32> = items
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != auto)
        .map(|(_, item)| {
            let bounds = item.constraint.resolve(container, gap);
            limit(item.size.resolve(container), bounds.min, bounds.max)
        })
        .collect();

    if let Some(index) = auto {
        let total_gap = gap * sizes.len() as f32;
        let used: f32 = sizes.iter().sum();
        sizes.insert(index, container - used - total_gap);
    }

    Ok(sizes)
}

/// Offsets of each sibling from the start of the container
pub fn offsets(sizes: &[f32], gap: f32) -> Vec<f32> {
    let mut start = 0.0;
    sizes
        .iter()
        .map(|size| {
            let offset = start;
            start += size + gap;
            offset
        })
        .collect()
}

/// Allocation state for one axis group across layout passes.
///
/// Sizes are only recomputed from the declarations when the measured container
/// length or gap changes, or after [`AxisState::invalidate`]. Otherwise the
/// current pixels, including any drag adjustments, are kept.
#[derive(Debug, Clone, Default)]
pub struct AxisState {
    sizes: Vec<f32>,
    measured: Option<(f32, f32)>,
}

impl AxisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn is_allocated(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Container length and gap of the last allocation
    pub fn measured(&self) -> Option<(f32, f32)> {
        self.measured
    }

    /// Drop the current result so the next measurement reallocates
    pub fn invalidate(&mut self) {
        self.measured = None;
    }

    /// Feed a container measurement. Returns true when the sizes were recomputed.
    pub fn measure(&mut self, items: &[AxisItem], container: f32, gap: f32) -> Result<bool, GroupError> {
        auto_index(items)?;

        if !(container.is_finite() && container > 0.0) {
            tracing::debug!("Allocation deferred until the container is measured");
            return Ok(false);
        }
        if self.measured == Some((container, gap)) && self.sizes.len() == items.len() {
            return Ok(false);
        }

        self.sizes = allocate(items, container, gap)?;
        self.measured = Some((container, gap));
        Ok(true)
    }

    /// Apply one drag event to the splitter on `edge` of sibling `index`
    pub fn drag(&mut self, items: &[AxisItem], index: usize, edge: Edge, delta: f32) -> bool {
        let Some((container, gap)) = self.measured else {
            return false;
        };
        let next = crate::drag::redistribute(items, index, edge, delta, container, gap, &self.sizes);
        if next == self.sizes {
            return false;
        }
        self.sizes = next;
        true
    }
}
