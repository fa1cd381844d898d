//! Input domain: edge-triggered logical actions sampled from raw key state.

use std::collections::HashSet;

use bevy::prelude::*;

#[cfg(test)]
mod tests;

/// Number of logical actions. Button buffers are fixed arrays of this size.
pub const ACTION_COUNT: usize = 9;

/// Logical actions the side-scrolling controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Down,
    Up,
    Jump,
    Shoot,
    Dash,
    Melee,
    Dodge,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::Left,
        Action::Right,
        Action::Down,
        Action::Up,
        Action::Jump,
        Action::Shoot,
        Action::Dash,
        Action::Melee,
        Action::Dodge,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Down => "down",
            Action::Up => "up",
            Action::Jump => "jump",
            Action::Shoot => "shoot",
            Action::Dash => "dash",
            Action::Melee => "melee",
            Action::Dodge => "dodge",
        }
    }

    /// Look up an action by its binding name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// Anything that can answer "is this physical key down right now".
pub trait KeySource {
    fn is_key_down(&self, key: KeyCode) -> bool;
}

impl KeySource for ButtonInput<KeyCode> {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.pressed(key)
    }
}

/// A frozen set of held keys, used for replays and headless ticking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    down: HashSet<KeyCode>,
}

impl KeySnapshot {
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            down: keys.into_iter().collect(),
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }
}

impl KeySource for KeySnapshot {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }
}

/// Logical action to physical key table.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ActionBindings {
    keys: [Option<KeyCode>; ACTION_COUNT],
}

impl Default for ActionBindings {
    fn default() -> Self {
        let mut bindings = Self::unbound();
        bindings.bind(Action::Left, KeyCode::KeyJ);
        bindings.bind(Action::Right, KeyCode::KeyL);
        bindings.bind(Action::Down, KeyCode::KeyK);
        bindings.bind(Action::Up, KeyCode::KeyI);
        bindings.bind(Action::Jump, KeyCode::KeyZ);
        bindings.bind(Action::Shoot, KeyCode::KeyX);
        bindings.bind(Action::Dash, KeyCode::KeyC);
        bindings.bind(Action::Melee, KeyCode::KeyV);
        bindings.bind(Action::Dodge, KeyCode::KeyS);
        bindings
    }
}

impl ActionBindings {
    /// A table with no action bound to any key.
    pub fn unbound() -> Self {
        Self {
            keys: [None; ACTION_COUNT],
        }
    }

    pub fn bind(&mut self, action: Action, key: KeyCode) {
        self.keys[action.index()] = Some(key);
    }

    pub fn key(&self, action: Action) -> Option<KeyCode> {
        self.keys[action.index()]
    }
}

/// Double-buffered per-action button state.
///
/// `sample` must run exactly once per tick before anything reads edges:
/// the buffers are swapped by index (no copy) and the current one is refilled
/// from raw key state.
#[derive(Debug, Clone, Default)]
pub struct ButtonState {
    buffers: [[bool; ACTION_COUNT]; 2],
    current: usize,
    bound: [bool; ACTION_COUNT],
}

impl ButtonState {
    pub fn sample(&mut self, bindings: &ActionBindings, keys: &impl KeySource) {
        self.current ^= 1;
        let current = &mut self.buffers[self.current];
        for action in Action::ALL {
            let key = bindings.key(action);
            self.bound[action.index()] = key.is_some();
            current[action.index()] = key.is_some_and(|key| keys.is_key_down(key));
        }
    }

    #[inline]
    fn now(&self, action: Action) -> bool {
        self.buffers[self.current][action.index()]
    }

    #[inline]
    fn before(&self, action: Action) -> bool {
        self.buffers[self.current ^ 1][action.index()]
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.bound[action.index()] && self.now(action) && !self.before(action)
    }

    pub fn released(&self, action: Action) -> bool {
        self.bound[action.index()] && !self.now(action) && self.before(action)
    }

    pub fn held(&self, action: Action) -> bool {
        self.bound[action.index()] && self.now(action)
    }

    /// String-keyed variants; unknown names are simply not pressed.
    pub fn pressed_named(&self, name: &str) -> bool {
        Action::from_name(name).is_some_and(|action| self.pressed(action))
    }

    pub fn released_named(&self, name: &str) -> bool {
        Action::from_name(name).is_some_and(|action| self.released(action))
    }

    pub fn held_named(&self, name: &str) -> bool {
        Action::from_name(name).is_some_and(|action| self.held(action))
    }

    /// Horizontal intent from the left/right actions: -1, 0 or 1.
    pub fn horizontal_axis(&self) -> f32 {
        let mut x = 0.0;
        if self.held(Action::Left) {
            x -= 1.0;
        }
        if self.held(Action::Right) {
            x += 1.0;
        }
        x
    }
}
