//! ContentRegistry resource holding the loaded controller and level data.

use bevy::prelude::*;

use super::data::{ControllerDef, LevelDef};
use crate::physics::BoxScene;

/// Loaded content, inserted by the host before the level spawns.
#[derive(Resource, Debug, Clone, Default)]
pub struct ContentRegistry {
    pub controller: ControllerDef,
    pub level: Option<LevelDef>,
    /// Number of clips registered with the clip library at load time.
    pub clip_count: usize,
}

impl ContentRegistry {
    /// Returns a summary of loaded content for logging.
    pub fn summary(&self) -> String {
        let level = match &self.level {
            Some(level) => format!("'{}' ({} boxes)", level.name, level.boxes.len()),
            None => "none".to_string(),
        };
        format!(
            "ContentRegistry loaded:\n\
             - Character: {}\n\
             - Charge tiers: {}\n\
             - Level: {}\n\
             - Clips: {}",
            self.controller.animation.prefix,
            self.controller.charge.len(),
            level,
            self.clip_count
        )
    }

    /// Plain collision scene for the loaded level, for headless simulation.
    pub fn level_scene(&self) -> BoxScene {
        self.level
            .as_ref()
            .map_or_else(BoxScene::new, LevelDef::scene)
    }
}
