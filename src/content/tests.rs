//! Content domain: tests for RON parsing, loading fallbacks, and validation.

use std::fs;
use std::path::PathBuf;

use super::{
    ClipSetDef, ContentRegistry, ControllerDef, DataFile, LevelDef, build_clip_library,
    load_all_content, parse_ron, validate_content, validate_controller, validate_level,
};
use crate::actions::ChargeThreshold;
use crate::animation::ClipSource;
use crate::physics::CollisionWorld;

const CONTROLLER_RON: &str = include_str!("../../assets/data/controller.ron");
const LEVEL_RON: &str = include_str!("../../assets/data/level.ron");
const CLIPS_RON: &str = include_str!("../../assets/data/clips.ron");

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sidescroll-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

// -----------------------------------------------------------------------------
// Shipped data
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_controller_matches_defaults() {
    let def: ControllerDef = parse_ron("controller.ron", CONTROLLER_RON).expect("parse");
    assert_eq!(def, ControllerDef::default());
}

#[test]
fn test_shipped_level_is_valid() {
    let level: LevelDef = parse_ron("level.ron", LEVEL_RON).expect("parse");
    assert!(!level.boxes.is_empty());
    assert!(validate_level(&level, &ControllerDef::default()).is_empty());
}

#[test]
fn test_shipped_clips_load_under_prefix() {
    let data: DataFile<ClipSetDef> = parse_ron("clips.ron", CLIPS_RON).expect("parse");
    let library = build_clip_library(data.items);
    assert!(library.load_animation("Reimu", "Idle").is_some());
    assert!(library.load_animation("Reimu", "Melee3Slash").is_some());

    let jump_back = library.load_animation("Reimu", "JumpBack").expect("JumpBack");
    assert!(!jump_back.looping);
    let idle = library.load_animation("Reimu", "Idle").expect("Idle");
    assert!(idle.looping);
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn test_partial_controller_keeps_defaults() {
    let def: ControllerDef = parse_ron(
        "partial",
        "(motion: (jump_power: 20.0), capabilities: (melee: false))",
    )
    .expect("parse");
    assert_eq!(def.motion.jump_power, 20.0);
    assert_eq!(def.motion.walk_speed, 7.0);
    assert!(!def.capabilities.melee);
    assert!(def.capabilities.dodge);
    assert_eq!(def.charge.len(), 2);
}

#[test]
fn test_shoot_pose_window_is_tuned_under_animation() {
    let def: ControllerDef =
        parse_ron("partial", "(animation: (shoot_pose_timeout: 0.5))").expect("parse");
    assert_eq!(def.animation.shoot_pose_timeout, 0.5);
    assert_eq!(def.animation.prefix, "Reimu");
    assert_eq!(def.shot, ControllerDef::default().shot);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_ron::<LevelDef>("broken.ron", "(name: ").expect_err("should fail");
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

// -----------------------------------------------------------------------------
// Loading
// -----------------------------------------------------------------------------

#[test]
fn test_missing_optional_files_fall_back() {
    let dir = scratch_dir("fallback");
    fs::write(dir.join("level.ron"), LEVEL_RON).expect("write level");

    let (registry, clips) = load_all_content(&dir).expect("load");
    assert_eq!(registry.controller, ControllerDef::default());
    assert!(clips.is_empty());
    assert_eq!(registry.level.map(|level| level.name), Some("Test Room".to_string()));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_level_is_an_error() {
    let dir = scratch_dir("nolevel");
    let errors = load_all_content(&dir).expect_err("level is required");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].file.ends_with("level.ron"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_full_load_counts_clips() {
    let dir = scratch_dir("full");
    fs::write(dir.join("controller.ron"), CONTROLLER_RON).expect("write controller");
    fs::write(dir.join("level.ron"), LEVEL_RON).expect("write level");
    fs::write(dir.join("clips.ron"), CLIPS_RON).expect("write clips");

    let (registry, clips) = load_all_content(&dir).expect("load");
    assert_eq!(registry.clip_count, clips.len());
    assert!(registry.summary().contains("Test Room"));
    assert!(validate_content(&registry).is_empty());

    let _ = fs::remove_dir_all(&dir);
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_negative_tuning_is_reported() {
    let mut def = ControllerDef::default();
    def.motion.gravity = -1.0;
    let errors = validate_controller(&def);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "motion.gravity");
}

#[test]
fn test_unordered_thresholds_are_reported() {
    let mut def = ControllerDef::default();
    def.charge = vec![
        ChargeThreshold::new(2.0, [1.0; 4], 0.1),
        ChargeThreshold::new(0.5, [1.0; 4], 0.1),
    ];
    let errors = validate_controller(&def);
    assert!(errors.iter().any(|e| e.field == "charge"));
}

#[test]
fn test_embedded_spawn_is_reported() {
    let mut level: LevelDef = parse_ron("level.ron", LEVEL_RON).expect("parse");
    level.spawn = [0.0, 0.0];
    let errors = validate_level(&level, &ControllerDef::default());
    assert!(errors.iter().any(|e| e.field == "spawn"));
}

#[test]
fn test_level_scene_marks_triggers() {
    let level: LevelDef = parse_ron("level.ron", LEVEL_RON).expect("parse");
    let registry = ContentRegistry {
        level: Some(level),
        ..Default::default()
    };
    let scene = registry.level_scene();
    let triggers = scene
        .boxes()
        .iter()
        .filter(|collider| scene.is_trigger(collider.id))
        .count();
    assert_eq!(triggers, 1);
}
