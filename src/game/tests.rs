//! Game domain: tests for projectile motion against a plain box scene.

use bevy::prelude::*;

use super::Projectile;
use crate::actions::{ShotConfig, ShotRequest};
use crate::physics::BoxScene;

const DT: f32 = 1.0 / 60.0;

fn shot(tier: u8, facing: f32) -> ShotRequest {
    ShotRequest::new(tier, Vec3::new(0.0, 1.0, 0.0), facing, &ShotConfig::default())
}

#[test]
fn test_projectile_flies_along_facing() {
    let scene = BoxScene::new();
    let mut projectile = Projectile::from_request(&shot(0, -1.0), 10.0, 3.0);
    assert_eq!(projectile.body.position().x, -1.0);

    assert!(projectile.step(&scene, DT));
    assert!(projectile.body.position().x < -1.0);
}

#[test]
fn test_projectile_expires() {
    let scene = BoxScene::new();
    let mut projectile = Projectile::from_request(&shot(0, 1.0), 10.0, 0.04);
    assert!(projectile.step(&scene, DT));
    assert!(projectile.step(&scene, DT));
    assert!(!projectile.step(&scene, DT));
}

#[test]
fn test_projectile_dies_on_wall() {
    let mut scene = BoxScene::new();
    scene.add_solid(Vec2::new(1.6, 1.0), Vec2::new(0.2, 4.0));
    let mut projectile = Projectile::from_request(&shot(0, 1.0), 10.0, 3.0);

    let mut alive_ticks = 0;
    while projectile.step(&scene, DT) {
        alive_ticks += 1;
        assert!(alive_ticks < 60, "projectile should hit the wall");
    }
    assert!(projectile.body.position().x < 1.5);
}

#[test]
fn test_projectile_passes_triggers() {
    let mut scene = BoxScene::new();
    scene.add_trigger(Vec2::new(1.6, 1.0), Vec2::new(0.2, 4.0));
    let mut projectile = Projectile::from_request(&shot(0, 1.0), 10.0, 3.0);
    for _ in 0..30 {
        assert!(projectile.step(&scene, DT));
    }
    assert!(projectile.body.position().x > 2.0);
}

#[test]
fn test_charged_projectiles_are_larger() {
    let small = Projectile::from_request(&shot(0, 1.0), 10.0, 3.0);
    let large = Projectile::from_request(&shot(2, 1.0), 10.0, 3.0);
    assert!(large.size().x > small.size().x);
    assert_eq!(large.tier, 2);
}
