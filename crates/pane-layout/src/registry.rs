// ABOUTME: Splitter registry owned by one layout tree.
// ABOUTME: Stores splitters by id, derives intersections, and tracks the active splitters.

use pane_core::{Point, SplitterSettings};
use std::collections::BTreeMap;

use crate::gesture::DragTarget;
use crate::intersection::{self, IntersectionId, SplitterIntersection};
use crate::splitter::{Splitter, SplitterId};

#[derive(Debug)]
pub struct SplitterRegistry {
    splitters: BTreeMap<SplitterId, Splitter>,
    intersections: Vec<SplitterIntersection>,
    /// Empty, one splitter, or the two splitters behind an intersection handle
    active: Vec<SplitterId>,
    revision: u64,
    epsilon: f32,
    padding: f32,
}

impl SplitterRegistry {
    pub fn new(settings: &SplitterSettings) -> Self {
        Self {
            splitters: BTreeMap::new(),
            intersections: Vec::new(),
            active: Vec::new(),
            revision: 0,
            epsilon: settings.alignment_epsilon,
            padding: settings.intersection_padding,
        }
    }

    /// Insert or update a splitter. Returns false when nothing changed.
    pub fn add_splitter(&mut self, splitter: Splitter) -> bool {
        if let Some(existing) = self.splitters.get(&splitter.id) {
            if existing.same_geometry(&splitter) {
                return false;
            }
        }
        tracing::debug!("Splitter {} at ({}, {})", splitter.id, splitter.x, splitter.y);
        self.splitters.insert(splitter.id.clone(), splitter);
        self.changed();
        true
    }

    /// Remove a splitter. Removing an unknown id is a no-op.
    pub fn remove_splitter(&mut self, id: &SplitterId) -> Option<Splitter> {
        let removed = self.splitters.remove(id)?;
        self.active.retain(|active| active != id);
        self.changed();
        Some(removed)
    }

    /// Keep only the splitters matching `keep`
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&SplitterId) -> bool,
    {
        let stale: Vec<SplitterId> = self
            .splitters
            .keys()
            .filter(|id| !keep(*id))
            .cloned()
            .collect();
        for id in stale {
            self.remove_splitter(&id);
        }
    }

    fn changed(&mut self) {
        self.revision += 1;
        self.intersections = intersection::detect(self.splitters.values(), self.epsilon, self.padding);
    }

    pub fn get(&self, id: &SplitterId) -> Option<&Splitter> {
        self.splitters.get(id)
    }

    /// All splitters, sorted by id
    pub fn splitters(&self) -> impl Iterator<Item = &Splitter> {
        self.splitters.values()
    }

    pub fn len(&self) -> usize {
        self.splitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splitters.is_empty()
    }

    pub fn intersections(&self) -> &[SplitterIntersection] {
        &self.intersections
    }

    pub fn intersection(&self, id: &IntersectionId) -> Option<&SplitterIntersection> {
        self.intersections.iter().find(|i| &i.id == id)
    }

    /// Bumped on every effective change to the splitter set
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn active_ids(&self) -> &[SplitterId] {
        &self.active
    }

    pub fn is_active(&self, id: &SplitterId) -> bool {
        self.active.contains(id)
    }

    /// Mark the splitters behind `target` as active, or clear with `None`
    pub fn set_active(&mut self, target: Option<&DragTarget>) {
        self.active = match target {
            None => Vec::new(),
            Some(DragTarget::Splitter(id)) => vec![id.clone()],
            Some(DragTarget::Intersection(id)) => id.splitters().into_iter().cloned().collect(),
        };
    }

    /// Topmost drag target under `point`: intersection handles sit above splitters
    pub fn hit_test(&self, point: Point) -> Option<DragTarget> {
        if let Some(found) = self.intersections.iter().find(|i| i.handle_rect().contains(point)) {
            return Some(DragTarget::Intersection(found.id.clone()));
        }
        self.splitters
            .values()
            .find(|s| s.contains(point))
            .map(|s| DragTarget::Splitter(s.id.clone()))
    }
}

impl Default for SplitterRegistry {
    fn default() -> Self {
        Self::new(&SplitterSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::{DragBounds, Orientation, Segment};
    use pane_core::Color;

    fn vertical(pane: usize, x: f32) -> Splitter {
        Splitter {
            id: SplitterId::default().child(Segment::Row(0)).child(Segment::Pane(pane)),
            orientation: Orientation::Vertical,
            x,
            y: 0.0,
            width: 4.0,
            height: 50.0,
            color: Color::SPLITTER,
            bounds: DragBounds::default(),
            gap: 0.0,
        }
    }

    fn horizontal(row: usize, y: f32) -> Splitter {
        Splitter {
            id: SplitterId::default().child(Segment::Row(row)),
            orientation: Orientation::Horizontal,
            x: 0.0,
            y,
            width: 200.0,
            height: 4.0,
            color: Color::SPLITTER,
            bounds: DragBounds::default(),
            gap: 0.0,
        }
    }

    #[test]
    fn redundant_upsert_is_suppressed() {
        let mut registry = SplitterRegistry::default();
        assert!(registry.add_splitter(vertical(0, 100.0)));
        let revision = registry.revision();

        assert!(!registry.add_splitter(vertical(0, 100.0)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.revision(), revision);
    }

    #[test]
    fn moved_splitter_is_updated() {
        let mut registry = SplitterRegistry::default();
        registry.add_splitter(vertical(0, 100.0));
        assert!(registry.add_splitter(vertical(0, 120.0)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&vertical(0, 0.0).id).unwrap().x, 120.0);
    }

    #[test]
    fn remove_is_safe_when_absent() {
        let mut registry = SplitterRegistry::default();
        let id = vertical(0, 0.0).id;
        assert!(registry.remove_splitter(&id).is_none());
        assert_eq!(registry.revision(), 0);
    }

    #[test]
    fn intersections_follow_the_splitter_set() {
        let mut registry = SplitterRegistry::default();
        registry.add_splitter(horizontal(0, 50.0));
        registry.add_splitter(vertical(0, 100.0));
        assert_eq!(registry.intersections().len(), 1);

        registry.add_splitter(vertical(0, 300.0));
        assert!(registry.intersections().is_empty());

        registry.add_splitter(vertical(0, 200.0));
        assert_eq!(registry.intersections().len(), 1);

        registry.remove_splitter(&horizontal(0, 0.0).id);
        assert!(registry.intersections().is_empty());
    }

    #[test]
    fn hit_test_prefers_intersection_handles() {
        let mut registry = SplitterRegistry::default();
        let h = horizontal(1, 50.0);
        let v = vertical(0, 100.0);
        registry.add_splitter(h.clone());
        registry.add_splitter(v.clone());

        assert_eq!(
            registry.hit_test(Point::new(100.0, 50.0)),
            Some(DragTarget::Intersection(IntersectionId::new(h.id.clone(), v.id.clone())))
        );
        assert_eq!(
            registry.hit_test(Point::new(100.0, 20.0)),
            Some(DragTarget::Splitter(v.id.clone()))
        );
        assert_eq!(
            registry.hit_test(Point::new(20.0, 51.0)),
            Some(DragTarget::Splitter(h.id.clone()))
        );
        assert_eq!(registry.hit_test(Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn active_set_tracks_targets() {
        let mut registry = SplitterRegistry::default();
        let h = horizontal(1, 50.0);
        let v = vertical(0, 100.0);
        let target = DragTarget::Intersection(IntersectionId::new(h.id.clone(), v.id.clone()));

        registry.set_active(Some(&target));
        assert_eq!(registry.active_ids().len(), 2);
        assert!(registry.is_active(&h.id) && registry.is_active(&v.id));

        registry.set_active(Some(&DragTarget::Splitter(v.id.clone())));
        assert_eq!(registry.active_ids(), &[v.id.clone()]);

        registry.set_active(None);
        assert!(registry.active_ids().is_empty());
    }
}
