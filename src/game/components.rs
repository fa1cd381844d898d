//! Game domain: components, physics layers, and messages for the host world.

use avian2d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::actions::ShotRequest;
use crate::controller::TickReport;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Level geometry that blocks movement
    Solid,
    /// Trigger zones - reported by queries but never block movement
    Trigger,
}

#[derive(Component, Debug)]
pub struct Player;

/// Level box spawned from level data.
#[derive(Component, Debug)]
pub struct LevelGeometry;

/// Child entity playing the melee slash overlay for its parent controller.
#[derive(Component, Debug, Clone, Copy)]
pub struct EffectTrack(pub Entity);

/// Marker on the effect child itself.
#[derive(Component, Debug)]
pub struct EffectSprite;

/// A controller fired a shot this tick.
#[derive(Debug, Clone)]
pub struct ShotFired {
    pub shooter: Entity,
    pub request: ShotRequest,
    /// Projectile prefab name, e.g. `Shot` or `Shot2`.
    pub prefab: String,
    pub speed: f32,
    pub lifetime: f32,
}

impl Message for ShotFired {}

/// One controller finished a tick.
#[derive(Debug, Clone)]
pub struct ControllerTicked {
    pub entity: Entity,
    pub report: TickReport,
}

impl Message for ControllerTicked {}
