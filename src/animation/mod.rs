//! Animation domain: clip lookup, playback, and per-tick clip selection.

mod playback;
mod selector;

#[cfg(test)]
mod tests;

pub use playback::{AnimationPlayback, Clip, ClipLibrary, ClipSource, SpriteAnimator};
pub use selector::{
    AnimationId, AnimationRequest, AnimationSelector, AnimationSettings, SelectionInput,
};
