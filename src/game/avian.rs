//! Game domain: the collision query surface backed by avian2d spatial queries.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::GameLayer;
use crate::physics::{ColliderId, CollisionWorld, SweepHit};

/// Query boxes are shrunk by this much per side so shapes that only share
/// an edge do not count as touching.
const EDGE_TOLERANCE: f32 = 1e-4;

/// Upper bound on hits collected by one sweep.
const MAX_SWEEP_HITS: u32 = 16;

/// Level geometry as seen through avian2d's spatial query pipeline.
#[derive(SystemParam)]
pub struct AvianWorld<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    sensors: Query<'w, 's, Entity, With<Sensor>>,
}

impl AvianWorld<'_, '_> {
    fn filter() -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask([GameLayer::Solid, GameLayer::Trigger])
    }

    fn query_shape(size: Vec2) -> Collider {
        let shrunk = (size - Vec2::splat(2.0 * EDGE_TOLERANCE)).max(Vec2::splat(EDGE_TOLERANCE));
        Collider::rectangle(shrunk.x, shrunk.y)
    }

    fn is_sensor(&self, entity: Entity) -> bool {
        self.sensors.contains(entity)
    }
}

fn excluded(entity: Entity, exclude: Option<ColliderId>) -> bool {
    exclude.is_some_and(|id| id == ColliderId::from_entity(entity))
}

impl CollisionWorld for AvianWorld<'_, '_> {
    fn overlap(&self, center: Vec2, size: Vec2, exclude: Option<ColliderId>) -> Vec<ColliderId> {
        self.spatial
            .shape_intersections(&Self::query_shape(size), center, 0.0, &Self::filter())
            .into_iter()
            .filter(|&entity| !excluded(entity, exclude))
            .map(ColliderId::from_entity)
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
        let Ok(direction) = Dir2::new(direction) else {
            return Vec::new();
        };
        let config = ShapeCastConfig::from_max_distance(max_distance);
        let mut hits: Vec<SweepHit> = self
            .spatial
            .shape_hits(
                &Self::query_shape(size),
                center,
                0.0,
                direction,
                MAX_SWEEP_HITS,
                &config,
                &Self::filter(),
            )
            .into_iter()
            .filter(|hit| !excluded(hit.entity, exclude))
            .map(|hit| SweepHit {
                collider: ColliderId::from_entity(hit.entity),
                distance: hit.distance,
                is_trigger: self.is_sensor(hit.entity),
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn is_trigger(&self, id: ColliderId) -> bool {
        self.sensors
            .iter()
            .any(|entity| ColliderId::from_entity(entity) == id)
    }
}
