//! Validation for loaded controller and level definitions.

use super::data::*;
use super::registry::ContentRegistry;
use crate::physics::{CollisionWorld, KinematicBody};

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for checking a value is not negative
macro_rules! check_non_negative {
    ($errors:expr, $source_type:expr, $source_id:expr, $field:expr, $value:expr) => {
        if $value < 0.0 {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!("must not be negative, got {}", $value),
            });
        }
    };
}

/// Validate tuning values and level geometry.
/// Returns a list of validation errors, empty if everything is usable.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = validate_controller(&registry.controller);
    if let Some(level) = &registry.level {
        errors.extend(validate_level(level, &registry.controller));
    }
    errors
}

pub fn validate_controller(def: &ControllerDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let id = def.animation.prefix.as_str();
    let motion = &def.motion;

    check_non_negative!(errors, "Controller", id, "motion.walk_speed", motion.walk_speed);
    check_non_negative!(errors, "Controller", id, "motion.dash_speed", motion.dash_speed);
    check_non_negative!(errors, "Controller", id, "motion.gravity", motion.gravity);
    check_non_negative!(
        errors,
        "Controller",
        id,
        "motion.terminal_velocity",
        motion.terminal_velocity
    );
    check_non_negative!(errors, "Controller", id, "motion.jump_power", motion.jump_power);
    check_non_negative!(errors, "Controller", id, "motion.skin_width", motion.skin_width);
    check_non_negative!(errors, "Controller", id, "motion.snap_distance", motion.snap_distance);
    check_non_negative!(errors, "Controller", id, "motion.cling_speed", motion.cling_speed);
    check_non_negative!(
        errors,
        "Controller",
        id,
        "motion.cling_response",
        motion.cling_response
    );
    check_non_negative!(
        errors,
        "Controller",
        id,
        "motion.grounded_friction",
        motion.grounded_friction
    );
    check_non_negative!(errors, "Controller", id, "motion.friction", motion.friction);
    check_non_negative!(errors, "Controller", id, "motion.control_delay", motion.control_delay);
    check_non_negative!(errors, "Controller", id, "melee.combo_time", def.melee.combo_time);

    if !(0.0..=1.0).contains(&def.melee.combo_percent) {
        errors.push(ValidationError {
            source_type: "Controller",
            source_id: id.to_string(),
            field: "melee.combo_percent",
            message: format!("must be within [0, 1], got {}", def.melee.combo_percent),
        });
    }

    if def.half_extents.iter().any(|&extent| extent <= 0.0) {
        errors.push(ValidationError {
            source_type: "Controller",
            source_id: id.to_string(),
            field: "half_extents",
            message: format!("must be positive, got {:?}", def.half_extents),
        });
    }

    for pair in def.charge.windows(2) {
        if pair[1].time <= pair[0].time {
            errors.push(ValidationError {
                source_type: "Controller",
                source_id: id.to_string(),
                field: "charge",
                message: format!(
                    "thresholds must be ascending, {} follows {}",
                    pair[1].time, pair[0].time
                ),
            });
        }
    }
    for threshold in &def.charge {
        check_non_negative!(errors, "Controller", id, "charge.flash_rate", threshold.flash_rate);
    }

    if def.animation.default_clip.frames == 0 {
        errors.push(ValidationError {
            source_type: "Controller",
            source_id: id.to_string(),
            field: "animation.default_clip",
            message: "needs at least one frame".to_string(),
        });
    }

    errors
}

pub fn validate_level(level: &LevelDef, controller: &ControllerDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, def) in level.boxes.iter().enumerate() {
        if def.size.iter().any(|&extent| extent <= 0.0) {
            errors.push(ValidationError {
                source_type: "Level",
                source_id: level.name.clone(),
                field: "boxes",
                message: format!("box {} has non-positive size {:?}", index, def.size),
            });
        }
    }

    let scene = level.scene();
    let body = KinematicBody::new(level.spawn(), controller.half_extents());
    let embedded = scene
        .overlap(body.position().truncate(), body.size(), None)
        .into_iter()
        .any(|collider| !scene.is_trigger(collider));
    if embedded {
        errors.push(ValidationError {
            source_type: "Level",
            source_id: level.name.clone(),
            field: "spawn",
            message: format!("spawn point {:?} is inside solid geometry", level.spawn),
        });
    }

    errors
}
