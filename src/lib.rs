//! Kinematic motion and action-state core for a side-scrolling character,
//! with a Bevy + avian2d host layer.

pub mod actions;
pub mod animation;
pub mod content;
pub mod controller;
pub mod game;
pub mod input;
pub mod movement;
pub mod physics;
#[cfg(feature = "dev-tools")]
pub mod trace;

pub use controller::{ControlContext, SidescrollController, TickReport};
pub use game::SidescrollPlugin;
