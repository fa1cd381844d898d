//! Game domain: straight-line projectiles that die on the first blocked move.

use bevy::prelude::*;

use crate::actions::ShotRequest;
use crate::physics::{CollisionWorld, KinematicBody};

/// Base projectile box edge; each charge tier adds [`TIER_GROWTH`].
const BASE_SIZE: f32 = 0.25;
const TIER_GROWTH: f32 = 0.125;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: KinematicBody,
    pub velocity: Vec2,
    /// Seconds left before the projectile expires.
    pub lifetime: f32,
    pub tier: u8,
}

impl Projectile {
    pub fn from_request(request: &ShotRequest, speed: f32, lifetime: f32) -> Self {
        let half = (BASE_SIZE + TIER_GROWTH * f32::from(request.tier)) * 0.5;
        Self {
            body: KinematicBody::new(request.origin, Vec2::splat(half)),
            velocity: Vec2::new(speed * request.facing, 0.0),
            lifetime,
            tier: request.tier,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.body.size()
    }

    /// Advance one tick. Returns false once the projectile should despawn:
    /// its lifetime ran out or any part of the move was rejected.
    pub fn step(&mut self, world: &impl CollisionWorld, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }

        let attempt = self.velocity * dt;
        let applied = self.body.move_by(world, attempt);
        applied == attempt
    }
}
