//! Physics domain: the geometry query surface and a plain box-scene implementation.

use bevy::prelude::*;

/// Parallel-direction tolerance for slab tests.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Opaque identity of a collider in some collision world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

impl ColliderId {
    pub fn from_entity(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

/// One result of a box sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub collider: ColliderId,
    /// Distance travelled along the sweep direction before contact.
    pub distance: f32,
    pub is_trigger: bool,
}

/// Read-only box queries against scene geometry.
///
/// Results never contain `exclude`. Boxes that only share an edge with the
/// query box do not count as overlapping.
pub trait CollisionWorld {
    /// Colliders overlapping an axis-aligned box of `size` centered at `center`.
    fn overlap(&self, center: Vec2, size: Vec2, exclude: Option<ColliderId>) -> Vec<ColliderId>;

    /// Colliders hit when sweeping the box along unit `direction` up to
    /// `max_distance`, nearest first. Equal distances keep scan order.
    fn sweep_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        exclude: Option<ColliderId>,
    ) -> Vec<SweepHit>;

    fn is_trigger(&self, id: ColliderId) -> bool;
}

/// Static axis-aligned box in a [`BoxScene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub id: ColliderId,
    pub center: Vec2,
    pub size: Vec2,
    pub trigger: bool,
}

impl BoxCollider {
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    fn overlaps(&self, center: Vec2, size: Vec2) -> bool {
        let reach = self.half_extents() + size * 0.5;
        let gap = (center - self.center).abs();
        gap.x < reach.x && gap.y < reach.y
    }

    /// Entry distance of a box sweep against this collider, if any.
    fn sweep(&self, center: Vec2, size: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let reach = self.half_extents() + size * 0.5;
        let offset = center - self.center;

        let mut entry = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;
        for axis in 0..2 {
            let (o, d, r) = (offset[axis], direction[axis], reach[axis]);
            if d.abs() < DIRECTION_EPSILON {
                if o.abs() >= r {
                    return None;
                }
                continue;
            }
            let t1 = (-r - o) / d;
            let t2 = (r - o) / d;
            entry = entry.max(t1.min(t2));
            exit = exit.min(t1.max(t2));
        }

        if entry < exit && exit > 0.0 && entry <= max_distance {
            Some(entry.max(0.0))
        } else {
            None
        }
    }
}

/// A flat list of boxes. Scan order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct BoxScene {
    boxes: Vec<BoxCollider>,
    next_id: u64,
}

impl BoxScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid box and return its id.
    pub fn add_solid(&mut self, center: Vec2, size: Vec2) -> ColliderId {
        self.push(center, size, false)
    }

    /// Add a trigger box; triggers never block movement.
    pub fn add_trigger(&mut self, center: Vec2, size: Vec2) -> ColliderId {
        self.push(center, size, true)
    }

    fn push(&mut self, center: Vec2, size: Vec2, trigger: bool) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.boxes.push(BoxCollider {
            id,
            center,
            size,
            trigger,
        });
        id
    }

    pub fn boxes(&self) -> &[BoxCollider] {
        &self.boxes
    }

    fn candidates(&self, exclude: Option<ColliderId>) -> impl Iterator<Item = &BoxCollider> {
        self.boxes.iter().filter(move |b| Some(b.id) != exclude)
    }
}

impl CollisionWorld for BoxScene {
    fn overlap(&self, center: Vec2, size: Vec2, exclude: Option<ColliderId>) -> Vec<ColliderId> {
        self.candidates(exclude)
            .filter(|b| b.overlaps(center, size))
            .map(|b| b.id)
            .collect()
    }

    fn sweep_cast(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Vec2,
        max_distance: f32,
        exclude: Option<ColliderId>,
    ) -> Vec<SweepHit> {
        let mut hits: Vec<SweepHit> = self
            .candidates(exclude)
            .filter_map(|b| {
                b.sweep(center, size, direction, max_distance)
                    .map(|distance| SweepHit {
                        collider: b.id,
                        distance,
                        is_trigger: b.trigger,
                    })
            })
            .collect();
        // Stable: ties stay in scan order.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn is_trigger(&self, id: ColliderId) -> bool {
        self.boxes.iter().any(|b| b.id == id && b.trigger)
    }
}
