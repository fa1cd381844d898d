//! Game domain: Bevy plugin wiring controllers, animation, and projectiles
//! into an avian2d world.

mod avian;
mod components;
mod level;
mod projectile;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::animation::ClipLibrary;
use crate::content::ContentRegistry;
use crate::controller::ControlContext;
use crate::input::ActionBindings;

pub use avian::AvianWorld;
pub use components::{
    ControllerTicked, EffectSprite, EffectTrack, GameLayer, LevelGeometry, Player, ShotFired,
};
pub use projectile::Projectile;

pub struct SidescrollPlugin;

impl Plugin for SidescrollPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionBindings>()
            .init_resource::<ControlContext>()
            .init_resource::<ClipLibrary>()
            .init_resource::<ContentRegistry>()
            .add_message::<ShotFired>()
            .add_message::<ControllerTicked>()
            .add_systems(
                Startup,
                (
                    level::load_content,
                    level::spawn_camera,
                    level::spawn_level,
                    level::spawn_player,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::tick_controllers,
                    systems::select_animations,
                    systems::advance_animators,
                    systems::sync_sprites,
                    systems::apply_charge_glow,
                    systems::spawn_shots,
                    systems::move_projectiles,
                )
                    .chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_plugins(crate::trace::TracePlugin);
    }
}
