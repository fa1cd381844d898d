//! Animation domain: maps physical and action state to a named clip request.

use std::collections::HashSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::playback::{AnimationPlayback, Clip, ClipSource};
use crate::actions::{ComboState, MeleePhase};

/// Fraction a fire-charge clip must reach before other clips may replace it.
const FIRE_CHARGE_HOLD: f32 = 0.99;
/// `last_dodge` below this shows the backwards-jump pose in the air.
const JUMP_BACK_WINDOW: f32 = 1.0;

/// Discrete animations the selector can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    Idle,
    Moving,
    Dash,
    Rising,
    Falling,
    JumpBack,
    WallCling,
    FireCharge,
    /// Grounded combo swing with its pose number.
    Melee(u8),
    MeleeAir,
    MeleeWallCling,
}

impl AnimationId {
    /// Asset name, e.g. `Idle` or `Melee2`.
    pub fn name(self) -> String {
        match self {
            AnimationId::Idle => "Idle".to_string(),
            AnimationId::Moving => "Moving".to_string(),
            AnimationId::Dash => "Dash".to_string(),
            AnimationId::Rising => "Rising".to_string(),
            AnimationId::Falling => "Falling".to_string(),
            AnimationId::JumpBack => "JumpBack".to_string(),
            AnimationId::WallCling => "WallCling".to_string(),
            AnimationId::FireCharge => "FireCharge".to_string(),
            AnimationId::Melee(pose) => format!("Melee{pose}"),
            AnimationId::MeleeAir => "MeleeAir".to_string(),
            AnimationId::MeleeWallCling => "MeleeWallCling".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Character name; clips are looked up as `<prefix>/<name>`.
    pub prefix: String,
    /// Direction the art faces: 1 right, -1 left.
    pub default_x_facing: f32,
    /// How long after a shot the `<name>Shoot` variants are preferred.
    pub shoot_pose_timeout: f32,
    /// Played when a requested clip cannot be found.
    pub default_clip: Clip,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            prefix: "Reimu".to_string(),
            default_x_facing: 1.0,
            shoot_pose_timeout: 0.25,
            default_clip: Clip::default(),
        }
    }
}

/// Snapshot of the state the selector reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionInput {
    pub facing: f32,
    pub grounded: bool,
    pub clinging: bool,
    pub dashing: bool,
    /// Applied (not requested) horizontal displacement this tick.
    pub moved_x: f32,
    pub velocity_y: f32,
    pub last_dodge: f32,
    pub last_shoot: f32,
    /// A charged shot was released on the ground this tick.
    pub charged_release: bool,
}

/// Clip chosen for the body track this pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationRequest {
    pub name: String,
    pub restart: bool,
}

/// Picks body and effect clips once per tick.
#[derive(Debug, Clone, Default)]
pub struct AnimationSelector {
    current: Option<AnimationId>,
    current_name: String,
    effect_name: Option<String>,
    missing: HashSet<String>,
}

impl AnimationSelector {
    pub fn current(&self) -> Option<AnimationId> {
        self.current
    }

    /// Resolved name of the last clip sent to the body track.
    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn effect_name(&self) -> Option<&str> {
        self.effect_name.as_deref()
    }

    /// Is a fire-charge clip still holding the body track?
    pub fn holding_fire_charge(&self, playback_percent: f32) -> bool {
        self.current == Some(AnimationId::FireCharge) && playback_percent < FIRE_CHARGE_HOLD
    }

    /// Run one selection pass. Returns `None` when the current clip is kept
    /// as is (a fire-charge clip still playing).
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        input: &SelectionInput,
        combo: &mut ComboState,
        settings: &AnimationSettings,
        clips: &dyn ClipSource,
        player: &mut dyn AnimationPlayback,
        effect: Option<&mut dyn AnimationPlayback>,
    ) -> Option<AnimationRequest> {
        let flip = input.facing != settings.default_x_facing.signum();
        player.set_flip_x(flip);

        let request = self.choose_body(input, combo, settings, clips, player);

        if let Some(effect) = effect {
            self.update_effect(effect, flip, settings, clips);
        }
        request
    }

    fn choose_body(
        &mut self,
        input: &SelectionInput,
        combo: &mut ComboState,
        settings: &AnimationSettings,
        clips: &dyn ClipSource,
        player: &mut dyn AnimationPlayback,
    ) -> Option<AnimationRequest> {
        if self.holding_fire_charge(player.percent()) {
            return None;
        }

        match combo.phase {
            MeleePhase::Starting => {
                let id = melee_variant(input, combo.pose);
                let request = self.apply(id, true, input, settings, clips, player);
                combo.begin_playback();
                return Some(request);
            }
            MeleePhase::Playing => {
                let id = melee_variant(input, combo.pose);
                let request = self.apply(id, false, input, settings, clips, player);
                if !combo.finish_if_played(player.percent()) {
                    return Some(request);
                }
            }
            MeleePhase::Done => {}
        }

        let mut id = if input.moved_x == 0.0 {
            AnimationId::Idle
        } else if input.dashing {
            AnimationId::Dash
        } else {
            AnimationId::Moving
        };
        let mut restart = false;

        if input.grounded {
            if input.charged_release {
                id = AnimationId::FireCharge;
                restart = true;
            }
        } else {
            id = if input.velocity_y > 0.0 {
                AnimationId::Rising
            } else {
                AnimationId::Falling
            };
            if input.last_dodge < JUMP_BACK_WINDOW {
                id = AnimationId::JumpBack;
            }
            if input.clinging {
                id = AnimationId::WallCling;
            }
        }

        Some(self.apply(id, restart, input, settings, clips, player))
    }

    fn apply(
        &mut self,
        id: AnimationId,
        restart: bool,
        input: &SelectionInput,
        settings: &AnimationSettings,
        clips: &dyn ClipSource,
        player: &mut dyn AnimationPlayback,
    ) -> AnimationRequest {
        let (name, clip) = self.resolve(&id.name(), input.last_shoot, settings, clips);
        if restart {
            player.play(&clip, true);
        } else {
            player.set_clip(&clip);
        }
        self.current = Some(id);
        self.current_name = name.clone();
        AnimationRequest { name, restart }
    }

    /// Prefer the shoot variant right after firing, then the plain clip, then
    /// the configured default.
    fn resolve(
        &mut self,
        name: &str,
        last_shoot: f32,
        settings: &AnimationSettings,
        clips: &dyn ClipSource,
    ) -> (String, Clip) {
        if last_shoot < settings.shoot_pose_timeout {
            let shoot_name = format!("{name}Shoot");
            if let Some(clip) = clips.load_animation(&settings.prefix, &shoot_name) {
                return (shoot_name, clip);
            }
        }

        match clips.load_animation(&settings.prefix, name) {
            Some(clip) => (name.to_string(), clip),
            None => {
                if self.missing.insert(name.to_string()) {
                    warn!(
                        "Missing animation '{}/{}', using default clip '{}'",
                        settings.prefix, name, settings.default_clip.name
                    );
                }
                (name.to_string(), settings.default_clip.clone())
            }
        }
    }

    /// Melee clips get a matching `<name>Slash` overlay; everything else
    /// clears the effect track.
    fn update_effect(
        &mut self,
        effect: &mut dyn AnimationPlayback,
        flip: bool,
        settings: &AnimationSettings,
        clips: &dyn ClipSource,
    ) {
        effect.set_flip_x(flip);
        self.effect_name = None;
        if !self.current_name.contains("Melee") {
            effect.clear();
            return;
        }

        let slash = format!("{}Slash", self.current_name);
        match clips.load_animation(&settings.prefix, &slash) {
            Some(clip) => {
                effect.set_clip(&clip);
                self.effect_name = Some(slash);
            }
            None => effect.clear(),
        }
    }
}

fn melee_variant(input: &SelectionInput, pose: u8) -> AnimationId {
    if input.grounded {
        AnimationId::Melee(pose)
    } else if input.clinging {
        AnimationId::MeleeWallCling
    } else {
        AnimationId::MeleeAir
    }
}
