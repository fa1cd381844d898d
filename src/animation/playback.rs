//! Animation domain: clips, clip sources, and frame-timed playback.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Highest fraction a finished one-shot clip reports.
const LAST_PERCENT: f32 = 0.999_999;

/// A named frame sequence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Clip {
    pub name: String,
    pub frames: u32,
    /// Seconds per frame.
    pub frame_duration: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_looping() -> bool {
    true
}

impl Default for Clip {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            frames: 1,
            frame_duration: 0.15,
            looping: true,
        }
    }
}

impl Clip {
    pub fn new(name: impl Into<String>, frames: u32, frame_duration: f32, looping: bool) -> Self {
        Self {
            name: name.into(),
            frames,
            frame_duration,
            looping,
        }
    }

    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.frame_duration
    }
}

/// Resolves `(prefix, name)` to a clip, e.g. `("Reimu", "Idle")`.
pub trait ClipSource {
    fn load_animation(&self, prefix: &str, name: &str) -> Option<Clip>;
}

/// Something that plays clips and reports how far along it is.
pub trait AnimationPlayback {
    /// Start `clip`; with `restart` the clip begins again even if already playing.
    fn play(&mut self, clip: &Clip, restart: bool);
    /// Switch to `clip` without restarting it if it is already current.
    fn set_clip(&mut self, clip: &Clip) {
        self.play(clip, false);
    }
    fn clear(&mut self);
    /// Playback fraction in [0, 1).
    fn percent(&self) -> f32;
    fn set_flip_x(&mut self, flip: bool);
}

/// In-memory clip table keyed by `"<prefix>/<name>"`.
#[derive(Resource, Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: HashMap<String, Clip>,
}

impl ClipLibrary {
    pub fn insert(&mut self, prefix: &str, clip: Clip) {
        self.clips.insert(format!("{}/{}", prefix, clip.name), clip);
    }

    pub fn from_clips(prefix: &str, clips: impl IntoIterator<Item = Clip>) -> Self {
        let mut library = Self::default();
        for clip in clips {
            library.insert(prefix, clip);
        }
        library
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl ClipSource for ClipLibrary {
    fn load_animation(&self, prefix: &str, name: &str) -> Option<Clip> {
        self.clips.get(&format!("{prefix}/{name}")).cloned()
    }
}

/// Frame-timer playback of a single clip.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpriteAnimator {
    pub clip: Option<Clip>,
    pub elapsed: f32,
    pub flip_x: bool,
    /// Playback speed multiplier.
    pub rate: f32,
}

impl Default for SpriteAnimator {
    fn default() -> Self {
        Self {
            clip: None,
            elapsed: 0.0,
            flip_x: false,
            rate: 1.0,
        }
    }
}

impl SpriteAnimator {
    pub fn advance(&mut self, dt: f32) {
        if self.clip.is_some() {
            self.elapsed += dt * self.rate;
        }
    }

    /// Zero-based index of the frame on screen.
    pub fn current_frame(&self) -> u32 {
        match &self.clip {
            Some(clip) if clip.frames > 0 => {
                ((self.percent() * clip.frames as f32) as u32).min(clip.frames - 1)
            }
            _ => 0,
        }
    }

    pub fn clip_name(&self) -> Option<&str> {
        self.clip.as_ref().map(|clip| clip.name.as_str())
    }
}

impl AnimationPlayback for SpriteAnimator {
    fn play(&mut self, clip: &Clip, restart: bool) {
        let same = self.clip.as_ref().is_some_and(|current| current == clip);
        if !same {
            self.clip = Some(clip.clone());
            self.elapsed = 0.0;
        } else if restart {
            self.elapsed = 0.0;
        }
    }

    fn clear(&mut self) {
        self.clip = None;
        self.elapsed = 0.0;
    }

    fn percent(&self) -> f32 {
        let Some(clip) = &self.clip else {
            return 0.0;
        };
        let duration = clip.duration();
        if duration <= 0.0 {
            return 0.0;
        }
        let fraction = self.elapsed / duration;
        if clip.looping {
            fraction.fract()
        } else {
            fraction.min(LAST_PERCENT)
        }
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }
}
