//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron. Every field has a default so a
//! file only needs to list what it overrides.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::{ChargeState, ChargeThreshold, MeleeConfig, ShotConfig};
use crate::animation::AnimationSettings;
use crate::movement::{Capabilities, MotionConfig};
use crate::physics::BoxScene;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Controller (controller.ron)
// ============================================================================

/// Everything needed to build one side-scrolling controller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerDef {
    pub motion: MotionConfig,
    pub capabilities: Capabilities,
    pub melee: MeleeConfig,
    /// Charge levels in ascending time order. Empty disables charged shots.
    pub charge: Vec<ChargeThreshold>,
    pub shot: ShotConfig,
    pub animation: AnimationSettings,
    pub half_extents: [f32; 2],
}

impl Default for ControllerDef {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            capabilities: Capabilities::default(),
            melee: MeleeConfig::default(),
            charge: ChargeState::default().thresholds().to_vec(),
            shot: ShotConfig::default(),
            animation: AnimationSettings::default(),
            half_extents: [0.375, 0.75],
        }
    }
}

impl ControllerDef {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::from_array(self.half_extents)
    }
}

// ============================================================================
// Level (level.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoxDef {
    pub center: [f32; 2],
    pub size: [f32; 2],
    #[serde(default)]
    pub trigger: bool,
}

impl BoxDef {
    pub fn center(&self) -> Vec2 {
        Vec2::from_array(self.center)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::from_array(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelDef {
    pub name: String,
    pub spawn: [f32; 2],
    #[serde(default = "default_facing")]
    pub facing: f32,
    pub boxes: Vec<BoxDef>,
}

fn default_facing() -> f32 {
    1.0
}

impl LevelDef {
    pub fn spawn(&self) -> Vec3 {
        Vec2::from_array(self.spawn).extend(0.0)
    }

    pub fn scene(&self) -> BoxScene {
        let mut scene = BoxScene::new();
        for def in &self.boxes {
            if def.trigger {
                scene.add_trigger(def.center(), def.size());
            } else {
                scene.add_solid(def.center(), def.size());
            }
        }
        scene
    }
}
