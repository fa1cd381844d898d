//! Animation domain: tests for playback timing and clip selection.

use super::{
    AnimationId, AnimationPlayback, AnimationSelector, AnimationSettings, Clip, ClipLibrary,
    ClipSource, SelectionInput, SpriteAnimator,
};
use crate::actions::{ComboState, MeleeConfig, MeleePhase};

fn library(names: &[&str]) -> ClipLibrary {
    ClipLibrary::from_clips(
        "Reimu",
        names.iter().map(|name| Clip::new(*name, 4, 0.1, true)),
    )
}

fn standing() -> SelectionInput {
    SelectionInput {
        facing: 1.0,
        grounded: true,
        clinging: false,
        dashing: false,
        moved_x: 0.0,
        velocity_y: 0.0,
        last_dodge: 3.0,
        last_shoot: 3.0,
        charged_release: false,
    }
}

/// One selection pass with no effect track.
fn select(
    selector: &mut AnimationSelector,
    input: &SelectionInput,
    combo: &mut ComboState,
    clips: &dyn ClipSource,
    player: &mut SpriteAnimator,
) -> Option<String> {
    selector
        .update(input, combo, &AnimationSettings::default(), clips, player, None)
        .map(|request| request.name)
}

// -----------------------------------------------------------------------------
// Playback tests
// -----------------------------------------------------------------------------

#[test]
fn test_looping_percent_wraps() {
    let mut animator = SpriteAnimator::default();
    animator.play(&Clip::new("Idle", 4, 0.25, true), false);
    animator.advance(1.25);
    assert!((animator.percent() - 0.25).abs() < 1e-5);
    assert_eq!(animator.current_frame(), 1);
}

#[test]
fn test_one_shot_percent_stays_below_one() {
    let mut animator = SpriteAnimator::default();
    animator.play(&Clip::new("Melee1", 4, 0.1, false), false);
    animator.advance(5.0);
    assert!(animator.percent() < 1.0);
    assert!(animator.percent() > 0.99);
    assert_eq!(animator.current_frame(), 3);
}

#[test]
fn test_set_clip_keeps_progress_of_same_clip() {
    let clip = Clip::new("Moving", 4, 0.25, true);
    let mut animator = SpriteAnimator::default();
    animator.play(&clip, false);
    animator.advance(0.5);
    animator.set_clip(&clip);
    assert!((animator.percent() - 0.5).abs() < 1e-5);

    animator.play(&clip, true);
    assert_eq!(animator.percent(), 0.0);
}

#[test]
fn test_cleared_animator_reports_zero() {
    let mut animator = SpriteAnimator::default();
    animator.play(&Clip::default(), false);
    animator.advance(0.1);
    animator.clear();
    assert_eq!(animator.percent(), 0.0);
    assert_eq!(animator.clip_name(), None);
}

#[test]
fn test_library_keys_by_prefix() {
    let clips = library(&["Idle"]);
    assert!(clips.load_animation("Reimu", "Idle").is_some());
    assert!(clips.load_animation("Marisa", "Idle").is_none());
    assert_eq!(clips.len(), 1);
}

// -----------------------------------------------------------------------------
// Selection tests
// -----------------------------------------------------------------------------

#[test]
fn test_melee_names_carry_pose() {
    assert_eq!(AnimationId::Melee(2).name(), "Melee2");
    assert_eq!(AnimationId::MeleeWallCling.name(), "MeleeWallCling");
}

#[test]
fn test_ground_states() {
    let clips = library(&["Idle", "Moving", "Dash"]);
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    let mut input = standing();
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Idle")
    );

    input.moved_x = 0.1;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Moving")
    );

    input.dashing = true;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Dash")
    );
    assert_eq!(player.clip_name(), Some("Dash"));
}

#[test]
fn test_air_states_by_priority() {
    let clips = library(&["Rising", "Falling", "JumpBack", "WallCling"]);
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    let mut input = SelectionInput {
        grounded: false,
        velocity_y: 4.0,
        ..standing()
    };
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Rising")
    );

    input.velocity_y = -4.0;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Falling")
    );

    input.last_dodge = 0.2;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("JumpBack")
    );

    input.clinging = true;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("WallCling")
    );
}

#[test]
fn test_shoot_variant_preferred_after_firing() {
    let clips = library(&["Idle", "IdleShoot", "Moving"]);
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    let mut input = SelectionInput {
        last_shoot: 0.1,
        ..standing()
    };
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("IdleShoot")
    );

    // No MovingShoot clip: fall back to the plain name.
    input.moved_x = 0.1;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Moving")
    );

    input.moved_x = 0.0;
    input.last_shoot = 0.3;
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("Idle")
    );
}

#[test]
fn test_missing_clip_uses_default() {
    let clips = ClipLibrary::default();
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    let name = select(&mut selector, &standing(), &mut combo, &clips, &mut player);
    assert_eq!(name.as_deref(), Some("Idle"));
    assert_eq!(player.clip_name(), Some("Default"));
    assert_eq!(selector.current_name(), "Idle");
}

#[test]
fn test_flip_follows_default_facing() {
    let clips = library(&["Idle"]);
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    let input = SelectionInput {
        facing: -1.0,
        ..standing()
    };
    select(&mut selector, &input, &mut combo, &clips, &mut player);
    assert!(player.flip_x);

    select(&mut selector, &standing(), &mut combo, &clips, &mut player);
    assert!(!player.flip_x);
}

#[test]
fn test_melee_plays_then_finishes() {
    let clips = ClipLibrary::from_clips(
        "Reimu",
        [
            Clip::new("Idle", 4, 0.1, true),
            Clip::new("Melee1", 5, 0.1, false),
            Clip::new("Melee1Slash", 5, 0.1, false),
        ],
    );
    let settings = AnimationSettings::default();
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();
    let mut effect = SpriteAnimator::default();

    combo.trigger(true, &MeleeConfig::default());
    let request = selector.update(
        &standing(),
        &mut combo,
        &settings,
        &clips,
        &mut player,
        Some(&mut effect),
    );
    assert_eq!(request.map(|r| (r.name, r.restart)), Some(("Melee1".to_string(), true)));
    assert_eq!(combo.phase, MeleePhase::Playing);
    assert_eq!(effect.clip_name(), Some("Melee1Slash"));
    assert_eq!(selector.effect_name(), Some("Melee1Slash"));

    // Half played: still swinging.
    player.advance(0.25);
    selector.update(&standing(), &mut combo, &settings, &clips, &mut player, Some(&mut effect));
    assert_eq!(combo.phase, MeleePhase::Playing);
    assert_eq!(player.clip_name(), Some("Melee1"));

    // Played out: swing ends and the base state takes over in the same pass.
    player.advance(1.0);
    selector.update(&standing(), &mut combo, &settings, &clips, &mut player, Some(&mut effect));
    assert_eq!(combo.phase, MeleePhase::Done);
    assert_eq!(player.clip_name(), Some("Idle"));
    assert_eq!(effect.clip_name(), None);
}

#[test]
fn test_air_melee_variant() {
    let clips = library(&["MeleeAir", "MeleeWallCling"]);
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    combo.trigger(false, &MeleeConfig::default());
    let input = SelectionInput {
        grounded: false,
        ..standing()
    };
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("MeleeAir")
    );
    assert_eq!(selector.current(), Some(AnimationId::MeleeAir));
}

#[test]
fn test_fire_charge_holds_until_played() {
    let clips = ClipLibrary::from_clips(
        "Reimu",
        [
            Clip::new("Idle", 4, 0.1, true),
            Clip::new("FireCharge", 4, 0.1, false),
        ],
    );
    let mut selector = AnimationSelector::default();
    let mut combo = ComboState::default();
    let mut player = SpriteAnimator::default();

    let input = SelectionInput {
        charged_release: true,
        ..standing()
    };
    assert_eq!(
        select(&mut selector, &input, &mut combo, &clips, &mut player).as_deref(),
        Some("FireCharge")
    );
    assert!(selector.holding_fire_charge(player.percent()));

    player.advance(0.2);
    assert_eq!(
        select(&mut selector, &standing(), &mut combo, &clips, &mut player),
        None
    );
    assert_eq!(player.clip_name(), Some("FireCharge"));

    player.advance(1.0);
    assert_eq!(
        select(&mut selector, &standing(), &mut combo, &clips, &mut player).as_deref(),
        Some("Idle")
    );
}
