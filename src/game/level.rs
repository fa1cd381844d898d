//! Game domain: startup content loading and demo level spawning.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::Path;

use super::components::{EffectSprite, EffectTrack, GameLayer, LevelGeometry, Player};
use crate::animation::{ClipLibrary, SpriteAnimator};
use crate::content::{ContentRegistry, load_all_content, validate_content};
use crate::controller::{ControlContext, SidescrollController};

const CONTENT_DIR: &str = "assets/data";
/// World units are tiles; this many screen pixels per tile.
const PIXELS_PER_TILE: f32 = 32.0;

const SOLID_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const TRIGGER_COLOR: Color = Color::srgba(0.4, 0.8, 0.4, 0.3);

/// Load assets/data/*.ron and publish it as resources.
pub(crate) fn load_content(
    mut commands: Commands,
    mut context: ResMut<ControlContext>,
) {
    match load_all_content(Path::new(CONTENT_DIR)) {
        Ok((registry, clips)) => {
            for error in validate_content(&registry) {
                warn!("Content validation: {}", error);
            }
            info!("{}", registry.summary());
            if let Some(level) = &registry.level {
                context.last_facing = if level.facing < 0.0 { -1.0 } else { 1.0 };
            }
            commands.insert_resource(registry);
            commands.insert_resource(clips);
        }
        Err(errors) => {
            for error in &errors {
                error!("{}", error);
            }
            warn!("Continuing with built-in defaults and no level");
            commands.insert_resource(ContentRegistry::default());
            commands.insert_resource(ClipLibrary::default());
        }
    }
}

pub(crate) fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 4.0, 0.0).with_scale(Vec3::splat(1.0 / PIXELS_PER_TILE)),
    ));
}

pub(crate) fn spawn_level(mut commands: Commands, registry: Res<ContentRegistry>) {
    let Some(level) = &registry.level else {
        warn!("No level loaded, nothing to spawn");
        return;
    };

    let solid_layers = CollisionLayers::new(GameLayer::Solid, [GameLayer::Default]);
    let trigger_layers = CollisionLayers::new(GameLayer::Trigger, [GameLayer::Default]);

    for def in &level.boxes {
        let size = def.size();
        let center = def.center();
        let mut entity = commands.spawn((
            LevelGeometry,
            Sprite {
                color: if def.trigger { TRIGGER_COLOR } else { SOLID_COLOR },
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));
        if def.trigger {
            entity.insert((Sensor, trigger_layers));
        } else {
            entity.insert(solid_layers);
        }
    }

    info!("Spawned level '{}' with {} boxes", level.name, level.boxes.len());
}

pub(crate) fn spawn_player(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    context: Res<ControlContext>,
) {
    let Some(level) = &registry.level else {
        return;
    };

    let def = &registry.controller;
    let spawn = level.spawn();
    let size = def.half_extents() * 2.0;

    let effect = commands
        .spawn((
            EffectSprite,
            SpriteAnimator::default(),
            Sprite {
                color: Color::srgba(1.0, 1.0, 1.0, 0.6),
                custom_size: Some(Vec2::new(size.x * 2.0, size.y)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 0.5),
            Visibility::Hidden,
        ))
        .id();

    commands
        .spawn((
            Player,
            Name::new(def.animation.prefix.clone()),
            SidescrollController::new(def, spawn, context.last_facing),
            SpriteAnimator::default(),
            EffectTrack(effect),
            Sprite {
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(spawn.x, spawn.y, 1.0),
        ))
        .add_child(effect);

    info!(
        "Spawning player: prefix={}, position=({:.2}, {:.2}), facing={}, jump_height={:.2}",
        def.animation.prefix,
        spawn.x,
        spawn.y,
        context.last_facing,
        def.motion.jump_height()
    );
}
