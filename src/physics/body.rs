//! Physics domain: kinematic body translation and contact probing.

use bevy::prelude::*;

use super::collision::{ColliderId, CollisionWorld, SweepHit};

/// Axis-aligned box that moves only through blocked/unblocked axis steps.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    /// Own collider identity, excluded from every query.
    pub id: Option<ColliderId>,
    pub velocity: Vec3,
    position: Vec3,
    half_extents: Vec2,
}

/// Touch results recomputed after each tick's movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ContactFlags {
    pub is_grounded: bool,
    pub bumped_head: bool,
    pub wall_on_left: bool,
    pub wall_on_right: bool,
}

impl KinematicBody {
    pub fn new(position: Vec3, half_extents: Vec2) -> Self {
        Self {
            id: None,
            velocity: Vec3::ZERO,
            position,
            half_extents,
        }
    }

    pub fn with_id(mut self, id: ColliderId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Place the body without any collision test (spawns and teleports).
    pub fn place_at(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Nearest solid contact when sweeping by `sweep` plus `snap` extra reach.
    pub fn first_contact(
        &self,
        world: &impl CollisionWorld,
        sweep: Vec2,
        snap: f32,
    ) -> Option<SweepHit> {
        let center = self.position.truncate();
        let distance = sweep.length();
        if distance <= f32::EPSILON {
            return world
                .overlap(center, self.size(), self.id)
                .into_iter()
                .find(|&id| !world.is_trigger(id))
                .map(|collider| SweepHit {
                    collider,
                    distance: 0.0,
                    is_trigger: false,
                });
        }

        world
            .sweep_cast(center, self.size(), sweep / distance, distance + snap, self.id)
            .into_iter()
            .find(|hit| !hit.is_trigger)
    }

    /// Would sweeping by `sweep` (plus `snap`) touch solid geometry?
    pub fn touches(&self, world: &impl CollisionWorld, sweep: Vec2, snap: f32) -> bool {
        self.first_contact(world, sweep, snap).is_some()
    }

    /// Try a single-axis translation. The move is all or nothing: if the
    /// destination overlaps anything solid the body stays put and zero is
    /// returned.
    pub fn move_axis(&mut self, world: &impl CollisionWorld, delta: Vec2) -> Vec2 {
        debug_assert!(
            delta.x == 0.0 || delta.y == 0.0,
            "move_axis takes one axis at a time"
        );
        if delta == Vec2::ZERO {
            return Vec2::ZERO;
        }

        let destination = self.position.truncate() + delta;
        let blocked = world
            .overlap(destination, self.size(), self.id)
            .into_iter()
            .any(|id| !world.is_trigger(id));
        if blocked {
            return Vec2::ZERO;
        }

        self.position += delta.extend(0.0);
        delta
    }

    /// Axis-separated move: vertical first, then horizontal.
    pub fn move_by(&mut self, world: &impl CollisionWorld, delta: Vec2) -> Vec2 {
        let vertical = self.move_axis(world, Vec2::new(0.0, delta.y));
        let horizontal = self.move_axis(world, Vec2::new(delta.x, 0.0));
        vertical + horizontal
    }

    pub fn check_grounded(&self, world: &impl CollisionWorld, skin: f32, snap: f32) -> bool {
        self.velocity.y <= 0.0 && self.touches(world, Vec2::NEG_Y * skin, snap)
    }

    /// Will next tick's fall reach the ground?
    pub fn check_will_touch_ground(&self, world: &impl CollisionWorld, dt: f32, snap: f32) -> bool {
        self.velocity.y <= 0.0 && self.touches(world, Vec2::new(0.0, self.velocity.y * dt), snap)
    }

    pub fn check_bumped_head(&self, world: &impl CollisionWorld, skin: f32, snap: f32) -> bool {
        self.velocity.y > 0.0 && self.touches(world, Vec2::Y * skin, snap)
    }

    pub fn check_wall_on_left(&self, world: &impl CollisionWorld, skin: f32, snap: f32) -> bool {
        self.touches(world, Vec2::NEG_X * skin, snap)
    }

    pub fn check_wall_on_right(&self, world: &impl CollisionWorld, skin: f32, snap: f32) -> bool {
        self.touches(world, Vec2::X * skin, snap)
    }
}

impl ContactFlags {
    pub fn probe(body: &KinematicBody, world: &impl CollisionWorld, skin: f32, snap: f32) -> Self {
        Self {
            is_grounded: body.check_grounded(world, skin, snap),
            bumped_head: body.check_bumped_head(world, skin, snap),
            wall_on_left: body.check_wall_on_left(world, skin, snap),
            wall_on_right: body.check_wall_on_right(world, skin, snap),
        }
    }
}
