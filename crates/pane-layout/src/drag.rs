// ABOUTME: Drag redistribution between a splitter's sibling and the auto sibling.
// ABOUTME: Each event moves pixels between exactly two siblings and conserves their sum.

use crate::axis::{auto_index, limit, AxisItem};

/// Which edge of its sibling a splitter is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top of a row, left of a pane
    Leading,
    /// Bottom of a row, right of a pane
    Trailing,
}

/// The sibling that gives or takes pixels when the splitter on `edge` of
/// sibling `index` is dragged.
///
/// Only the auto sibling can absorb a drag, and only when it is the neighbour
/// on the splitter's side. Every other splitter is inert at this layer.
pub fn drag_partner(items: &[AxisItem], index: usize, edge: Edge) -> Option<usize> {
    let auto = auto_index(items).ok().flatten()?;
    if index >= items.len() {
        return None;
    }
    let neighbour = match edge {
        Edge::Leading => index.checked_sub(1)?,
        Edge::Trailing => index + 1,
    };
    (neighbour == auto).then_some(auto)
}

/// Apply one relative drag `delta` to the splitter on `edge` of sibling `index`.
///
/// `current` is the live pixel state; the result is derived from it rather
/// than from where the gesture started, so every event is applied exactly
/// once on top of the previous one. The numeric sibling is clamped to its
/// bounds and the auto sibling takes whatever keeps
/// `auto + sibling + gap` unchanged. Drags that have no partner return
/// `current` unchanged.
pub fn redistribute(
    items: &[AxisItem],
    index: usize,
    edge: Edge,
    delta: f32,
    container: f32,
    gap: f32,
    current: &[f32],
) -> Vec<f32> {
    let mut next = current.to_vec();
    if current.len() != items.len() || !delta.is_finite() {
        return next;
    }
    let Some(auto) = drag_partner(items, index, edge) else {
        return next;
    };

    let bounds = items[index].constraint.resolve(container, gap);
    let total = current[auto] + current[index] + gap;

    // A leading splitter moving forward shrinks `index`; a trailing one grows it
    let wanted = match edge {
        Edge::Leading => current[index] - delta,
        Edge::Trailing => current[index] + delta,
    };
    let sized = limit(wanted, bounds.min, bounds.max);

    next[index] = sized;
    next[auto] = total - sized - gap;
    next
}
