//! Movement domain: motion tuning and capability flags.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunable motion constants. Distances are in tiles (1 tile = 16 px),
/// times in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    pub walk_speed: f32,
    pub dash_speed: f32,
    /// Downward acceleration per second.
    pub gravity: f32,
    /// Bound on vertical speed in either direction.
    pub terminal_velocity: f32,
    pub jump_power: f32,
    /// Probe distance for ground/ceiling/wall checks.
    pub skin_width: f32,
    /// Extra reach added to every touch query.
    pub snap_distance: f32,
    /// Fall speed approached while clinging to a wall.
    pub cling_speed: f32,
    /// How quickly vertical speed approaches `cling_speed`.
    pub cling_response: f32,
    pub grounded_friction: f32,
    pub friction: f32,
    /// Window after a dodge or wall-kick in which input and friction are ignored.
    pub control_delay: f32,
    pub kick_power: [f32; 2],
    pub dodge_power: [f32; 2],
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            dash_speed: 16.0,
            gravity: 33.0,
            terminal_velocity: 40.0,
            jump_power: 15.0,
            skin_width: 0.125,
            snap_distance: 1.0 / 64.0,
            cling_speed: 1.0,
            cling_response: 11.0,
            grounded_friction: 255.0,
            friction: 30.0,
            control_delay: 0.3,
            kick_power: [8.0, 13.0],
            dodge_power: [17.0, 4.0],
        }
    }
}

impl MotionConfig {
    pub fn kick_power(&self) -> Vec2 {
        Vec2::from_array(self.kick_power)
    }

    pub fn dodge_power(&self) -> Vec2 {
        Vec2::from_array(self.dodge_power)
    }

    /// Apex height of a standing jump: h = v^2 / (2g)
    pub fn jump_height(&self) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_power * self.jump_power / (2.0 * self.gravity)
    }
}

/// Per-character ability switches. A disabled ability's rule never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Capabilities {
    pub melee: bool,
    pub dodge: bool,
    pub wall_cling: bool,
    pub dash: bool,
    pub shoot: bool,
    pub charge: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            melee: true,
            dodge: true,
            wall_cling: true,
            dash: true,
            shoot: true,
            charge: true,
        }
    }
}

impl Capabilities {
    /// Everything off: a character that can only walk and jump.
    pub fn none() -> Self {
        Self {
            melee: false,
            dodge: false,
            wall_cling: false,
            dash: false,
            shoot: false,
            charge: false,
        }
    }
}
