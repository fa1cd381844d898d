//! Actions domain: timer, combo, and charge state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Value timers start at and settle to: long enough ago that no window is open.
pub const SETTLED_TIMER: f32 = 3.0;

/// Playback fraction past which a melee swing counts as finished.
pub const MELEE_DONE_PERCENT: f32 = 0.90;

/// Count-up timers since the last shot, dodge, and wall-kick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionTimers {
    pub last_shoot: f32,
    pub last_dodge: f32,
    pub last_kick: f32,
}

impl Default for ActionTimers {
    fn default() -> Self {
        Self {
            last_shoot: SETTLED_TIMER,
            last_dodge: SETTLED_TIMER,
            last_kick: SETTLED_TIMER,
        }
    }
}

impl ActionTimers {
    pub fn advance(&mut self, dt: f32) {
        self.last_shoot += dt;
        self.last_dodge += dt;
        self.last_kick += dt;
    }

    /// True while a dodge or wall-kick impulse still owns horizontal motion.
    pub fn impulse_window(&self, control_delay: f32) -> bool {
        self.last_dodge < control_delay || self.last_kick < control_delay
    }

    /// Landing closes the dodge window. Never moves the timer backwards.
    pub fn settle_dodge(&mut self) {
        self.last_dodge = self.last_dodge.max(SETTLED_TIMER);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MeleePhase {
    /// Input received, animation not yet started.
    Starting,
    Playing,
    #[default]
    Done,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Window between presses in which the next pose chains.
    pub combo_time: f32,
    /// Playback fraction after which a new swing may interrupt the current one.
    pub combo_percent: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            combo_time: 0.8,
            combo_percent: 0.63,
        }
    }
}

/// Melee sequencing: phase, pose (1..=3), and time since the last swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComboState {
    pub phase: MeleePhase,
    pub pose: u8,
    pub last_melee: f32,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            phase: MeleePhase::Done,
            pose: 1,
            last_melee: SETTLED_TIMER,
        }
    }
}

impl ComboState {
    pub fn is_active(&self) -> bool {
        self.phase != MeleePhase::Done
    }

    /// Can a new swing start, given the current clip's playback fraction?
    pub fn accepts_input(&self, playback_percent: f32, config: &MeleeConfig) -> bool {
        self.phase == MeleePhase::Done || playback_percent > config.combo_percent
    }

    /// Start a swing. Chains to the next pose only on the ground, inside
    /// the combo window, and below pose 3.
    pub fn trigger(&mut self, grounded: bool, config: &MeleeConfig) -> u8 {
        self.phase = MeleePhase::Starting;
        self.pose = if grounded && self.last_melee < config.combo_time && self.pose < 3 {
            self.pose + 1
        } else {
            1
        };
        self.last_melee = 0.0;
        self.pose
    }

    pub fn begin_playback(&mut self) {
        if self.phase == MeleePhase::Starting {
            self.phase = MeleePhase::Playing;
        }
    }

    pub fn settle(&mut self) {
        self.phase = MeleePhase::Done;
    }

    /// Finish the swing once playback passes [`MELEE_DONE_PERCENT`].
    pub fn finish_if_played(&mut self, playback_percent: f32) -> bool {
        if self.phase == MeleePhase::Playing && playback_percent > MELEE_DONE_PERCENT {
            self.phase = MeleePhase::Done;
        }
        self.phase == MeleePhase::Done
    }
}

/// One charge level: reached once the fire button is held past `time`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChargeThreshold {
    pub time: f32,
    /// Tint while flashing at this tier (RGBA, may exceed 1 for HDR glow).
    pub color: [f32; 4],
    /// Seconds per flash cycle.
    pub flash_rate: f32,
}

impl ChargeThreshold {
    pub fn new(time: f32, color: [f32; 4], flash_rate: f32) -> Self {
        Self {
            time,
            color,
            flash_rate,
        }
    }
}

/// Visual state of a charging shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeGlow {
    /// Exceeded tier, 0 while below the first threshold.
    pub tier: u8,
    pub color: [f32; 4],
    /// Whether the tint is showing this frame.
    pub lit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeState {
    pub charge_time: f32,
    thresholds: Vec<ChargeThreshold>,
}

impl Default for ChargeState {
    fn default() -> Self {
        Self::new(vec![
            ChargeThreshold::new(0.333, [1.5, 1.5, 1.0, 1.0], 0.25),
            ChargeThreshold::new(2.0, [1.5, 2.5, 1.0, 1.0], 0.15),
        ])
    }
}

impl ChargeState {
    pub fn new(thresholds: Vec<ChargeThreshold>) -> Self {
        Self {
            charge_time: 0.0,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &[ChargeThreshold] {
        &self.thresholds
    }

    /// 1-indexed highest threshold exceeded by `time`; 0 if none.
    pub fn tier_for(&self, time: f32) -> u8 {
        self.thresholds
            .iter()
            .rposition(|threshold| time > threshold.time)
            .map_or(0, |index| (index + 1) as u8)
    }

    /// Held long enough that releasing would fire a charged shot.
    pub fn is_charged(&self) -> bool {
        self.thresholds
            .first()
            .is_some_and(|first| self.charge_time > first.time)
    }

    pub fn glow(&self) -> Option<ChargeGlow> {
        if self.charge_time <= 0.0 {
            return None;
        }
        let tier = self.tier_for(self.charge_time);
        let info = self.thresholds.get(usize::from(tier.max(1)) - 1)?;
        let lit = if info.flash_rate > 0.0 {
            (self.charge_time % info.flash_rate) / info.flash_rate >= 0.5
        } else {
            true
        };
        Some(ChargeGlow {
            tier,
            color: info.color,
            lit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Spawn offset for facing right; x is mirrored when facing left.
    pub offset: [f32; 2],
    /// Projectile prefab base name; charged tiers append the tier number.
    pub prefab: String,
    pub speed: f32,
    pub lifetime: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            offset: [1.0, 0.0],
            prefab: "Shot".to_string(),
            speed: 10.0,
            lifetime: 3.0,
        }
    }
}

/// A projectile the host should spawn this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub tier: u8,
    pub origin: Vec3,
    pub facing: f32,
}

impl ShotRequest {
    pub fn new(tier: u8, position: Vec3, facing: f32, config: &ShotConfig) -> Self {
        let offset = Vec3::new(config.offset[0] * facing, config.offset[1], 0.0);
        Self {
            tier,
            origin: position + offset,
            facing,
        }
    }

    pub fn prefab_name(&self, config: &ShotConfig) -> String {
        if self.tier > 0 {
            format!("{}{}", config.prefab, self.tier)
        } else {
            config.prefab.clone()
        }
    }
}
