//! Actions domain: timers and discrete states for jumps, dodges, kicks,
//! dashes, melee combos, and charged shots.

mod machine;
mod state;


pub use machine::{ActionMachine, Impulse};
pub use state::{
    ActionTimers, ChargeGlow, ChargeState, ChargeThreshold, ComboState, MELEE_DONE_PERCENT,
    MeleeConfig, MeleePhase, SETTLED_TIMER, ShotConfig, ShotRequest,
};
