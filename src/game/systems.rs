//! Game domain: per-frame systems driving controllers, animators, and shots.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::avian::AvianWorld;
use super::components::{ControllerTicked, EffectSprite, EffectTrack, ShotFired};
use super::projectile::Projectile;
use crate::animation::{AnimationPlayback, ClipLibrary, SpriteAnimator};
use crate::controller::{ControlContext, SidescrollController};
use crate::input::ActionBindings;

const PROJECTILE_COLOR: Color = Color::srgb(1.0, 0.35, 0.35);

pub(crate) fn tick_controllers(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<ActionBindings>,
    mut context: ResMut<ControlContext>,
    world: AvianWorld,
    mut controllers: Query<(
        Entity,
        &mut SidescrollController,
        &mut Transform,
        Option<&SpriteAnimator>,
    )>,
    mut shots: MessageWriter<ShotFired>,
    mut ticks: MessageWriter<ControllerTicked>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut controller, mut transform, animator) in &mut controllers {
        if let Some(animator) = animator {
            controller.observe_playback(animator.percent());
        }

        let report = controller.tick(dt, &bindings, &*keyboard, &world, &mut context);
        let position = controller.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        if let Some(request) = report.shot {
            shots.write(ShotFired {
                shooter: entity,
                request,
                prefab: request.prefab_name(&controller.shot),
                speed: controller.shot.speed,
                lifetime: controller.shot.lifetime,
            });
        }
        ticks.write(ControllerTicked { entity, report });
    }
}

pub(crate) fn select_animations(
    clips: Res<ClipLibrary>,
    mut controllers: Query<(
        &mut SidescrollController,
        Option<&mut SpriteAnimator>,
        Option<&EffectTrack>,
    )>,
    mut effects: Query<&mut SpriteAnimator, (With<EffectSprite>, Without<SidescrollController>)>,
) {
    for (mut controller, animator, effect) in &mut controllers {
        let mut effect_animator = effect.and_then(|track| effects.get_mut(track.0).ok());
        let player = animator.map(|animator| animator.into_inner() as &mut dyn AnimationPlayback);
        let effect = effect_animator
            .as_deref_mut()
            .map(|animator| animator as &mut dyn AnimationPlayback);

        if let Some(request) = controller.select_animation(&*clips, player, effect)
            && request.restart
        {
            debug!("Animation restarted: {}", request.name);
        }
    }
}

pub(crate) fn advance_animators(time: Res<Time>, mut animators: Query<&mut SpriteAnimator>) {
    let dt = time.delta_secs();
    for mut animator in &mut animators {
        animator.advance(dt);
    }
}

/// Mirror animator flip, frame, and clip presence onto the rendered sprite.
pub(crate) fn sync_sprites(
    mut sprites: Query<(&SpriteAnimator, &mut Sprite, &mut Visibility)>,
) {
    for (animator, mut sprite, mut visibility) in &mut sprites {
        sprite.flip_x = animator.flip_x;
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = animator.current_frame() as usize;
        }
        *visibility = if animator.clip_name().is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Tint charging characters with their current charge tier's glow.
pub(crate) fn apply_charge_glow(
    mut controllers: Query<(&SidescrollController, &mut Sprite), Without<EffectSprite>>,
) {
    for (controller, mut sprite) in &mut controllers {
        sprite.color = match controller.charge_glow() {
            Some(glow) if glow.lit => {
                let [r, g, b, a] = glow.color;
                Color::linear_rgba(r, g, b, a)
            }
            _ => Color::WHITE,
        };
    }
}

pub(crate) fn spawn_shots(mut commands: Commands, mut shots: MessageReader<ShotFired>) {
    for shot in shots.read() {
        let projectile = Projectile::from_request(&shot.request, shot.speed, shot.lifetime);
        let origin = shot.request.origin;
        commands.spawn((
            Name::new(shot.prefab.clone()),
            Sprite {
                color: PROJECTILE_COLOR,
                custom_size: Some(projectile.size()),
                flip_x: shot.request.facing < 0.0,
                ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 1.0),
            projectile,
        ));
    }
}

pub(crate) fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    world: AvianWorld,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut projectile, mut transform) in &mut projectiles {
        if !projectile.step(&world, dt) {
            commands.entity(entity).despawn();
            continue;
        }
        let position = projectile.body.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
