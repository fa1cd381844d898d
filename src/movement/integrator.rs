//! Movement domain: gravity, wall-cling damping, friction, and requested movement.

use bevy::prelude::*;

use super::config::MotionConfig;
use crate::physics::ContactFlags;

/// Step `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Interpolate toward `target` by factor `t`, clamped to [0, 1].
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}

/// Uncontested vertical forces for one tick.
///
/// Grounded bodies stop vertically. Airborne clinging bodies ease toward
/// `-cling_speed`; otherwise gravity applies.
pub fn integrate_vertical(
    velocity: &mut Vec3,
    contacts: &ContactFlags,
    clinging: bool,
    config: &MotionConfig,
    dt: f32,
) {
    if contacts.is_grounded {
        velocity.y = 0.0;
    } else if clinging {
        velocity.y = approach(velocity.y, -config.cling_speed, dt * config.cling_response);
    } else {
        velocity.y -= config.gravity * dt;
    }
}

/// Decay horizontal velocity toward zero unless an impulse window is open.
pub fn apply_friction(
    velocity: &mut Vec3,
    grounded: bool,
    impulse_window: bool,
    config: &MotionConfig,
    dt: f32,
) {
    if impulse_window {
        return;
    }
    let friction = if grounded {
        config.grounded_friction
    } else {
        config.friction
    };
    velocity.x = move_towards(velocity.x, 0.0, friction * dt);
}

pub fn clamp_terminal(velocity: &mut Vec3, config: &MotionConfig) {
    let limit = config.terminal_velocity.max(0.0);
    velocity.y = velocity.y.clamp(-limit, limit);
}

/// Per-second movement request: player-directed speed plus velocity.
///
/// Directed speed is dropped during an impulse window and the whole
/// horizontal component is dropped when movement is locked.
pub fn requested_movement(
    input_x: f32,
    dashing: bool,
    impulse_window: bool,
    can_move: bool,
    velocity: Vec3,
    config: &MotionConfig,
) -> Vec3 {
    let mut movement = Vec3::ZERO;
    if !impulse_window {
        let speed = if dashing {
            config.dash_speed
        } else {
            config.walk_speed
        };
        movement.x = input_x * speed;
    }
    movement += velocity;
    if !can_move {
        movement.x = 0.0;
    }
    movement
}
