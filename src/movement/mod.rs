//! Movement domain: tuning and per-tick velocity integration.

mod config;
mod integrator;


pub use config::{Capabilities, MotionConfig};
pub use integrator::{
    apply_friction, approach, clamp_terminal, integrate_vertical, move_towards,
    requested_movement,
};
