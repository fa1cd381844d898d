//! Actions domain: per-tick resolution of action requests into state changes
//! and velocity impulses.

use bevy::prelude::*;
use serde::Serialize;

use super::state::{ActionTimers, ChargeState, ComboState, MeleeConfig};
use crate::input::{Action, ButtonState};
use crate::movement::{Capabilities, MotionConfig};
use crate::physics::ContactFlags;

/// Discrete velocity impulses. At most one fires per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impulse {
    Jump,
    Dodge,
    WallKick,
}

impl Impulse {
    /// Overwrite velocity with this impulse. Dodges push away from facing,
    /// wall-kicks push along it (facing already points off the wall).
    pub fn apply(self, velocity: &mut Vec3, config: &MotionConfig, facing: f32) {
        match self {
            Impulse::Jump => velocity.y = config.jump_power,
            Impulse::Dodge => {
                let power = config.dodge_power();
                velocity.x = power.x * -facing;
                velocity.y = power.y;
            }
            Impulse::WallKick => {
                let power = config.kick_power();
                velocity.x = power.x * facing;
                velocity.y = power.y;
            }
        }
    }
}

/// All action state owned by one character.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionMachine {
    pub timers: ActionTimers,
    pub combo: ComboState,
    pub charge: ChargeState,
    /// Dash modifier, decided on the ground and carried through the air.
    pub dashing: bool,
    /// Playback fraction of the body clip at the last animation pass.
    pub playback_percent: f32,
}

impl ActionMachine {
    pub fn new(charge: ChargeState) -> Self {
        Self {
            charge,
            ..default()
        }
    }

    /// Whether player-directed horizontal movement is allowed this tick.
    pub fn can_move(
        &self,
        contacts: &ContactFlags,
        clinging: bool,
        allow_movement: bool,
        fire_charge_pose: bool,
    ) -> bool {
        if !allow_movement || fire_charge_pose {
            return false;
        }
        !(self.combo.is_active() && !contacts.is_grounded && !clinging)
    }

    pub fn advance_timers(&mut self, dt: f32) {
        self.timers.advance(dt);
        self.combo.last_melee += dt;
    }

    /// Fire and charge handling. Returns the tier of a shot fired this tick.
    pub fn resolve_shooting(
        &mut self,
        buttons: &ButtonState,
        capabilities: &Capabilities,
        dt: f32,
    ) -> Option<u8> {
        if !capabilities.shoot {
            return None;
        }

        let mut fired = None;
        if buttons.pressed(Action::Shoot) {
            self.timers.last_shoot = 0.0;
            self.charge.charge_time = 0.0;
            fired = Some(0);
        } else if capabilities.charge && buttons.held(Action::Shoot) {
            self.charge.charge_time += dt;
        }

        if capabilities.charge && buttons.released(Action::Shoot) {
            if self.charge.is_charged() {
                let tier = self.charge.tier_for(self.charge.charge_time);
                self.timers.last_shoot = 0.0;
                fired = Some(tier);
                debug!(
                    "Charged shot: tier={}, charge_time={:.3}",
                    tier, self.charge.charge_time
                );
            }
            self.charge.charge_time = 0.0;
        }

        fired
    }

    /// Start a melee swing if one was requested and can begin. Returns the pose.
    pub fn resolve_melee(
        &mut self,
        buttons: &ButtonState,
        grounded: bool,
        capabilities: &Capabilities,
        config: &MeleeConfig,
    ) -> Option<u8> {
        if !capabilities.melee || !buttons.pressed(Action::Melee) {
            return None;
        }
        if !self.combo.accepts_input(self.playback_percent, config) {
            return None;
        }
        let pose = self.combo.trigger(grounded, config);
        debug!("Melee: pose={}, grounded={}", pose, grounded);
        Some(pose)
    }

    /// Pick this tick's impulse in priority order: jump, dodge, wall-kick.
    /// Also latches the dash modifier while grounded.
    pub fn resolve_impulse(
        &mut self,
        buttons: &ButtonState,
        contacts: &ContactFlags,
        clinging: bool,
        can_move: bool,
        input_x: f32,
        capabilities: &Capabilities,
    ) -> Option<Impulse> {
        if contacts.is_grounded {
            self.dashing = capabilities.dash && buttons.held(Action::Dash) && input_x != 0.0;

            if can_move && buttons.pressed(Action::Jump) {
                return Some(Impulse::Jump);
            }
            if capabilities.dodge && can_move && buttons.pressed(Action::Dodge) {
                self.timers.last_dodge = 0.0;
                return Some(Impulse::Dodge);
            }
            return None;
        }

        if clinging {
            self.dashing = false;
            if can_move && buttons.pressed(Action::Jump) {
                self.timers.last_kick = 0.0;
                return Some(Impulse::WallKick);
            }
        }
        None
    }
}
