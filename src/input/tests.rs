//! Input domain: tests for edge detection and bindings.

use bevy::prelude::KeyCode;

use super::{Action, ActionBindings, ButtonState, KeySnapshot};

fn sample(state: &mut ButtonState, bindings: &ActionBindings, keys: &KeySnapshot) {
    state.sample(bindings, keys);
}

#[test]
fn test_press_hold_release_sequence() {
    let bindings = ActionBindings::default();
    let mut state = ButtonState::default();
    let mut keys = KeySnapshot::default();

    sample(&mut state, &bindings, &keys);
    assert!(!state.held(Action::Jump));

    keys.press(KeyCode::KeyZ);
    sample(&mut state, &bindings, &keys);
    assert!(state.pressed(Action::Jump));
    assert!(state.held(Action::Jump));
    assert!(!state.released(Action::Jump));

    sample(&mut state, &bindings, &keys);
    assert!(!state.pressed(Action::Jump));
    assert!(state.held(Action::Jump));

    keys.release(KeyCode::KeyZ);
    sample(&mut state, &bindings, &keys);
    assert!(state.released(Action::Jump));
    assert!(!state.held(Action::Jump));

    sample(&mut state, &bindings, &keys);
    assert!(!state.released(Action::Jump));
}

#[test]
fn test_pressed_and_released_never_both_true() {
    let bindings = ActionBindings::default();
    let mut state = ButtonState::default();
    let mut keys = KeySnapshot::default();

    for frame in 0..12 {
        if frame % 3 == 0 {
            keys.press(KeyCode::KeyX);
        } else {
            keys.release(KeyCode::KeyX);
        }
        sample(&mut state, &bindings, &keys);
        assert!(!(state.pressed(Action::Shoot) && state.released(Action::Shoot)));
    }
}

#[test]
fn test_unbound_action_is_always_false() {
    let mut bindings = ActionBindings::unbound();
    bindings.bind(Action::Shoot, KeyCode::KeyX);
    let mut state = ButtonState::default();
    let keys = KeySnapshot::new([KeyCode::KeyS, KeyCode::KeyX]);

    sample(&mut state, &bindings, &keys);
    assert!(state.pressed(Action::Shoot));
    assert!(!state.pressed(Action::Dodge));
    assert!(!state.held(Action::Dodge));
    assert!(!state.released(Action::Dodge));
}

#[test]
fn test_unknown_action_name_is_false() {
    let bindings = ActionBindings::default();
    let mut state = ButtonState::default();
    let keys = KeySnapshot::new([KeyCode::KeyZ]);
    sample(&mut state, &bindings, &keys);

    assert!(state.pressed_named("jump"));
    assert!(!state.pressed_named("swim"));
    assert!(!state.held_named("swim"));
    assert!(!state.released_named(""));
}

#[test]
fn test_horizontal_axis_cancels_out() {
    let bindings = ActionBindings::default();
    let mut state = ButtonState::default();

    sample(&mut state, &bindings, &KeySnapshot::new([KeyCode::KeyJ]));
    assert_eq!(state.horizontal_axis(), -1.0);

    sample(
        &mut state,
        &bindings,
        &KeySnapshot::new([KeyCode::KeyJ, KeyCode::KeyL]),
    );
    assert_eq!(state.horizontal_axis(), 0.0);

    sample(&mut state, &bindings, &KeySnapshot::new([KeyCode::KeyL]));
    assert_eq!(state.horizontal_axis(), 1.0);
}

#[test]
fn test_action_names_round_trip() {
    for action in Action::ALL {
        assert_eq!(Action::from_name(action.name()), Some(action));
    }
}
