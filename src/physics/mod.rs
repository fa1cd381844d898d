//! Physics domain: box collision queries and the kinematic body built on them.

mod body;
mod collision;


pub use body::{ContactFlags, KinematicBody};
pub use collision::{BoxCollider, BoxScene, ColliderId, CollisionWorld, SweepHit};
