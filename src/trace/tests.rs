//! Trace domain: tests for JSON-lines output and replay determinism.

use bevy::prelude::*;

use super::TickTrace;
use crate::content::ControllerDef;
use crate::controller::{ControlContext, SidescrollController};
use crate::input::{ActionBindings, KeySnapshot};
use crate::physics::BoxScene;

const DT: f32 = 1.0 / 60.0;

fn scene() -> BoxScene {
    let mut scene = BoxScene::new();
    scene.add_solid(Vec2::new(0.0, -0.5), Vec2::new(40.0, 1.0));
    scene.add_solid(Vec2::new(6.0, 4.0), Vec2::new(1.0, 8.0));
    scene
}

/// Run a fixed input script and return its trace.
fn replay() -> TickTrace {
    let scene = scene();
    let bindings = ActionBindings::default();
    let mut context = ControlContext::default();
    let mut controller =
        SidescrollController::new(&ControllerDef::default(), Vec3::new(0.0, 2.0, 0.0), 1.0);
    let mut trace = TickTrace::default();

    for tick in 0..240 {
        let keys: &[KeyCode] = match tick {
            0..=59 => &[KeyCode::KeyL],
            60..=75 => &[KeyCode::KeyL, KeyCode::KeyZ],
            76..=120 => &[KeyCode::KeyL],
            121 => &[KeyCode::KeyL, KeyCode::KeyZ],
            150 => &[KeyCode::KeyS],
            180..=200 => &[KeyCode::KeyX],
            _ => &[],
        };
        let snapshot = KeySnapshot::new(keys.iter().copied());
        let report = controller.tick(DT, &bindings, &snapshot, &scene, &mut context);
        trace.record(&report).expect("serialize tick");
    }
    trace
}

#[test]
fn test_replays_are_byte_identical() {
    let first = replay().to_json_lines();
    let second = replay().to_json_lines();
    assert_eq!(first, second);
}

#[test]
fn test_one_line_per_tick() {
    let trace = replay();
    assert_eq!(trace.len(), 240);
    let text = trace.to_json_lines();
    assert_eq!(text.lines().count(), 240);

    let first: serde_json::Value =
        serde_json::from_str(text.lines().next().expect("first line")).expect("valid json");
    assert_eq!(first["tick"], 0);
    assert!(first["contacts"]["is_grounded"].is_boolean());
    assert!(first.get("shot").is_none());
}

#[test]
fn test_lines_carry_the_step_of_their_tick() {
    let scene = scene();
    let mut controller =
        SidescrollController::new(&ControllerDef::default(), Vec3::new(0.0, 2.0, 0.0), 1.0);
    let report = controller.tick(
        0.02,
        &ActionBindings::default(),
        &KeySnapshot::default(),
        &scene,
        &mut ControlContext::default(),
    );
    assert_eq!(report.dt, 0.02);

    let mut trace = TickTrace::default();
    trace.record(&report).expect("serialize tick");
    let line: serde_json::Value =
        serde_json::from_str(trace.to_json_lines().trim_end()).expect("valid json");
    let dt = line["dt"].as_f64().expect("dt column");
    assert!((dt - 0.02).abs() < 1e-6);
}

#[test]
fn test_clear_restarts_numbering() {
    let mut trace = replay();
    trace.clear();
    assert!(trace.is_empty());
    assert_eq!(trace.to_json_lines(), "");
}
