//! Controller domain: one side-scrolling character's per-tick orchestration.
//!
//! A tick runs in a fixed order: sample input, resolve actions and impulses,
//! integrate velocity, move axis by axis, then re-probe contacts. Animation
//! selection is a separate pass so hosts without an animator skip it.

use bevy::prelude::*;
use serde::Serialize;

use crate::actions::{
    ActionMachine, ActionTimers, ChargeGlow, ChargeState, Impulse, MeleeConfig, ShotConfig,
    ShotRequest,
};
use crate::animation::{
    AnimationPlayback, AnimationRequest, AnimationSelector, AnimationSettings, ClipSource,
    SelectionInput,
};
use crate::content::ControllerDef;
use crate::input::{Action, ActionBindings, ButtonState, KeySource};
use crate::movement::{
    Capabilities, MotionConfig, apply_friction, clamp_terminal, integrate_vertical,
    requested_movement,
};
use crate::physics::{ColliderId, CollisionWorld, ContactFlags, KinematicBody};


/// Velocity factor applied when a horizontal move is blocked or a landing is imminent.
const DAMPING: f32 = 0.5;

/// Host-owned state shared across controllers and scene changes.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ControlContext {
    /// False while a cutscene or transition holds the player still.
    pub allow_movement: bool,
    /// Facing carried over to the next controller spawned.
    pub last_facing: f32,
}

impl Default for ControlContext {
    fn default() -> Self {
        Self {
            allow_movement: true,
            last_facing: 1.0,
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Step length this report was produced with.
    pub dt: f32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    /// Applied displacement, zero on any blocked axis.
    pub moved: [f32; 3],
    pub facing: f32,
    pub contacts: ContactFlags,
    pub clinging: bool,
    pub can_move: bool,
    pub dashing: bool,
    pub impulse: Option<Impulse>,
    pub melee_pose: Option<u8>,
    pub shot_tier: Option<u8>,
    pub timers: ActionTimers,
    pub charge_time: f32,
    #[serde(skip)]
    pub shot: Option<ShotRequest>,
}

#[derive(Component, Debug, Clone)]
pub struct SidescrollController {
    pub motion: MotionConfig,
    pub capabilities: Capabilities,
    pub melee: MeleeConfig,
    pub shot: ShotConfig,
    pub animation: AnimationSettings,
    pub body: KinematicBody,
    pub contacts: ContactFlags,
    pub actions: ActionMachine,
    buttons: ButtonState,
    input_x: f32,
    facing: f32,
    moved: Vec3,
    movement: Vec3,
    can_move: bool,
    selector: AnimationSelector,
    /// A charged shot fired this tick and the selector has not seen it yet.
    charged_release: bool,
    contacts_probed: bool,
}

impl SidescrollController {
    pub fn new(def: &ControllerDef, position: Vec3, facing: f32) -> Self {
        Self {
            motion: def.motion.clone(),
            capabilities: def.capabilities,
            melee: def.melee.clone(),
            shot: def.shot.clone(),
            animation: def.animation.clone(),
            body: KinematicBody::new(position, def.half_extents()),
            contacts: ContactFlags::default(),
            actions: ActionMachine::new(ChargeState::new(def.charge.clone())),
            buttons: ButtonState::default(),
            input_x: 0.0,
            facing: if facing < 0.0 { -1.0 } else { 1.0 },
            moved: Vec3::ZERO,
            movement: Vec3::ZERO,
            can_move: true,
            selector: AnimationSelector::default(),
            charged_release: false,
            contacts_probed: false,
        }
    }

    /// Exclude this collider from every query the body makes.
    pub fn with_collider(mut self, id: ColliderId) -> Self {
        self.body.id = Some(id);
        self
    }

    /// Probe contacts without moving, e.g. right after spawning.
    pub fn refresh_contacts(&mut self, world: &impl CollisionWorld) {
        self.contacts = ContactFlags::probe(
            &self.body,
            world,
            self.motion.skin_width,
            self.motion.snap_distance,
        );
        self.contacts_probed = true;
    }

    /// Report the body clip's playback fraction from the animator.
    pub fn observe_playback(&mut self, percent: f32) {
        self.actions.playback_percent = percent;
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    pub fn moved(&self) -> Vec3 {
        self.moved
    }

    /// Requested per-second movement from the last tick.
    pub fn movement(&self) -> Vec3 {
        self.movement
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.contacts.is_grounded
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Airborne, pushing toward an adjacent wall, and allowed to cling.
    pub fn clinging(&self) -> bool {
        self.capabilities.wall_cling
            && !self.contacts.is_grounded
            && ((self.input_x < 0.0 && self.contacts.wall_on_left)
                || (self.input_x > 0.0 && self.contacts.wall_on_right))
    }

    /// Resolved name of the clip chosen by the last animation pass.
    pub fn animation_name(&self) -> &str {
        self.selector.current_name()
    }

    pub fn effect_name(&self) -> Option<&str> {
        self.selector.effect_name()
    }

    pub fn charge_glow(&self) -> Option<ChargeGlow> {
        self.actions.charge.glow()
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f32,
        bindings: &ActionBindings,
        keys: &impl KeySource,
        world: &impl CollisionWorld,
        context: &mut ControlContext,
    ) -> TickReport {
        if !self.contacts_probed {
            self.refresh_contacts(world);
        }
        self.buttons.sample(bindings, keys);
        let origin = self.body.position();

        self.input_x = self.buttons.horizontal_axis();
        let clinging = self.clinging();
        if self.input_x != 0.0 {
            self.facing = self.input_x.signum();
            if clinging {
                self.facing = -self.facing;
            }
        }

        let fire_charge_pose = self
            .selector
            .holding_fire_charge(self.actions.playback_percent);
        self.can_move = self.actions.can_move(
            &self.contacts,
            clinging,
            context.allow_movement,
            fire_charge_pose,
        );

        self.actions.advance_timers(dt);
        let shot_tier = self
            .actions
            .resolve_shooting(&self.buttons, &self.capabilities, dt);
        self.charged_release = shot_tier.is_some_and(|tier| tier > 0);

        if self.body.velocity.y > 0.0 && self.buttons.released(Action::Jump) {
            self.body.velocity.y = 0.0;
        }

        let melee_pose = self.actions.resolve_melee(
            &self.buttons,
            self.contacts.is_grounded,
            &self.capabilities,
            &self.melee,
        );
        let impulse = self.actions.resolve_impulse(
            &self.buttons,
            &self.contacts,
            clinging,
            self.can_move,
            self.input_x,
            &self.capabilities,
        );

        let velocity = &mut self.body.velocity;
        integrate_vertical(velocity, &self.contacts, clinging, &self.motion, dt);
        if let Some(impulse) = impulse {
            impulse.apply(velocity, &self.motion, self.facing);
            debug!(
                "{:?}: velocity=({:.2}, {:.2}), facing={}",
                impulse, velocity.x, velocity.y, self.facing
            );
        }
        if !self.contacts.is_grounded && self.contacts.bumped_head {
            velocity.y = 0.0;
        }

        let impulse_window = self.actions.timers.impulse_window(self.motion.control_delay);
        apply_friction(
            velocity,
            self.contacts.is_grounded,
            impulse_window,
            &self.motion,
            dt,
        );
        clamp_terminal(velocity, &self.motion);

        self.movement = requested_movement(
            self.input_x,
            self.actions.dashing,
            impulse_window,
            self.can_move,
            *velocity,
            &self.motion,
        );

        let was_grounded = self.contacts.is_grounded;
        self.moved = self
            .body
            .move_by(world, (self.movement * dt).truncate())
            .extend(0.0);

        if self.moved.x == 0.0 && self.body.velocity.x != 0.0 {
            self.body.velocity.x *= DAMPING;
        }
        if self.body.velocity.y < 0.0
            && self
                .body
                .check_will_touch_ground(world, dt, self.motion.snap_distance)
        {
            self.body.velocity.y *= DAMPING;
        }

        self.refresh_contacts(world);
        if self.contacts.is_grounded {
            if !was_grounded {
                let position = self.body.position();
                debug!("Landed at ({:.3}, {:.3})", position.x, position.y);
            }
            self.actions.timers.settle_dodge();
        }
        context.last_facing = self.facing;

        let shot = shot_tier.map(|tier| ShotRequest::new(tier, origin, self.facing, &self.shot));
        if let Some(shot) = &shot {
            debug!(
                "Shot fired: tier={}, origin=({:.2}, {:.2})",
                shot.tier, shot.origin.x, shot.origin.y
            );
        }

        TickReport {
            dt,
            position: self.body.position().to_array(),
            velocity: self.body.velocity.to_array(),
            moved: self.moved.to_array(),
            facing: self.facing,
            contacts: self.contacts,
            clinging: self.clinging(),
            can_move: self.can_move,
            dashing: self.actions.dashing,
            impulse,
            melee_pose,
            shot_tier,
            timers: self.actions.timers,
            charge_time: self.actions.charge.charge_time,
            shot,
        }
    }

    /// Pick body and effect clips for the state left by the last tick.
    ///
    /// Without a body animator the pass is skipped; physics is unaffected.
    pub fn select_animation(
        &mut self,
        clips: &dyn ClipSource,
        player: Option<&mut dyn AnimationPlayback>,
        effect: Option<&mut dyn AnimationPlayback>,
    ) -> Option<AnimationRequest> {
        let Some(player) = player else {
            // Swings finish through playback; with none attached, end them here.
            self.actions.combo.settle();
            self.charged_release = false;
            return None;
        };
        let input = SelectionInput {
            facing: self.facing,
            grounded: self.contacts.is_grounded,
            clinging: self.clinging(),
            dashing: self.actions.dashing,
            moved_x: self.moved.x,
            velocity_y: self.body.velocity.y,
            last_dodge: self.actions.timers.last_dodge,
            last_shoot: self.actions.timers.last_shoot,
            charged_release: self.charged_release,
        };
        let request = self.selector.update(
            &input,
            &mut self.actions.combo,
            &self.animation,
            clips,
            &mut *player,
            effect,
        );
        self.actions.playback_percent = player.percent();
        self.charged_release = false;
        request
    }
}
