use std::time::Duration;

use arena_survival_core::{ArenaRect, Rgb, Vec2};
use arena_survival_system_projectiles::{
    advance_all, Fate, FirePreview, FireZone, Projectile, SpecialBehavior, SpecialKind,
    SPLIT_DAMAGE_RATIO,
};

const WHITE: Rgb = Rgb::from_rgb(0xff, 0xff, 0xff);

fn arena() -> ArenaRect {
    ArenaRect::new(400.0, 300.0)
}

fn plain(position: Vec2, velocity: Vec2, lifetime: u32) -> Projectile {
    Projectile::new(position, velocity, 10.0, 4.0, lifetime, WHITE)
}

#[test]
fn lifetime_counts_frames_then_expires() {
    let mut projectile = plain(Vec2::new(200.0, 150.0), Vec2::ZERO, 2);
    let mut spawned = Vec::new();

    assert_eq!(projectile.advance(&arena(), None, &mut spawned), Fate::Alive);
    assert_eq!(projectile.advance(&arena(), None, &mut spawned), Fate::Alive);
    assert_eq!(projectile.advance(&arena(), None, &mut spawned), Fate::Expired);
    assert!(spawned.is_empty());
}

#[test]
fn leaving_the_playfield_destroys_plain_projectiles() {
    let mut projectile = plain(Vec2::new(395.0, 150.0), Vec2::new(20.0, 0.0), 60);
    let mut spawned = Vec::new();

    assert_eq!(
        projectile.advance(&arena(), None, &mut spawned),
        Fate::LeftArena
    );
}

#[test]
fn bouncing_projectiles_reflect_a_limited_number_of_times() {
    let mut projectile = plain(Vec2::new(390.0, 150.0), Vec2::new(20.0, 0.0), 600)
        .with_special(SpecialBehavior::Bouncing { bounces_left: 1 });
    let mut spawned = Vec::new();

    assert_eq!(projectile.advance(&arena(), None, &mut spawned), Fate::Alive);
    assert!(projectile.velocity().x < 0.0, "velocity should be reflected");
    assert_eq!(
        projectile.special(),
        Some(SpecialBehavior::Bouncing { bounces_left: 0 })
    );

    let mut fate = Fate::Alive;
    for _ in 0..40 {
        fate = projectile.advance(&arena(), None, &mut spawned);
        if fate != Fate::Alive {
            break;
        }
    }
    assert_eq!(fate, Fate::LeftArena, "no bounces left at the far wall");
}

#[test]
fn accelerating_projectiles_respect_the_speed_cap() {
    let mut projectile = plain(Vec2::new(10.0, 150.0), Vec2::new(2.0, 0.0), 600)
        .with_special(SpecialKind::Accelerating.behavior());
    let mut spawned = Vec::new();
    let SpecialBehavior::Accelerating { max_speed, .. } = SpecialKind::Accelerating.behavior()
    else {
        unreachable!("accelerating kind maps to accelerating behaviour");
    };

    let mut previous = projectile.velocity().length();
    for _ in 0..60 {
        if projectile.advance(&arena(), None, &mut spawned) != Fate::Alive {
            break;
        }
        let speed = projectile.velocity().length();
        assert!(speed >= previous - 1e-4);
        assert!(speed <= max_speed + 1e-4);
        previous = speed;
    }
    assert!(previous > 2.0);
}

#[test]
fn splitting_projectiles_replace_themselves_with_two_weaker_children() {
    let mut projectiles = vec![plain(Vec2::new(200.0, 150.0), Vec2::new(1.0, 0.0), 600)
        .with_special(SpecialBehavior::Splitting {
            frames_until_split: 2,
        })];

    advance_all(&mut projectiles, &arena(), None);
    assert_eq!(projectiles.len(), 1);

    advance_all(&mut projectiles, &arena(), None);
    assert_eq!(projectiles.len(), 2);
    for child in &projectiles {
        assert!((child.damage() - 10.0 * SPLIT_DAMAGE_RATIO).abs() < 1e-5);
        assert!(child.special().is_none());
    }
    assert!(projectiles[0].velocity().y < 0.0);
    assert!(projectiles[1].velocity().y > 0.0);
}

#[test]
fn homing_projectiles_turn_toward_the_target() {
    let mut projectile = plain(Vec2::new(100.0, 150.0), Vec2::new(3.0, 0.0), 600)
        .with_special(SpecialKind::Homing.behavior());
    let mut spawned = Vec::new();
    let target = Vec2::new(100.0, 290.0);

    let _ = projectile.advance(&arena(), Some(target), &mut spawned);
    let heading = projectile.velocity().y.atan2(projectile.velocity().x);
    assert!(heading > 0.0, "projectile should bend toward the target");
    assert!(heading < 0.1, "turn rate bounds the heading change");
    assert!((projectile.velocity().length() - 3.0).abs() < 1e-4);
}

#[test]
fn fire_zone_damage_is_gated_by_the_clock() {
    let mut zone = FireZone::new(
        Vec2::new(100.0, 100.0),
        40.0,
        5.0,
        300,
        Duration::from_millis(500),
    );
    let player = Vec2::new(100.0, 100.0);

    assert_eq!(zone.try_damage(player, 10.0, Duration::from_millis(0)), Some(5.0));
    assert_eq!(zone.try_damage(player, 10.0, Duration::from_millis(100)), None);
    assert_eq!(zone.try_damage(player, 10.0, Duration::from_millis(499)), None);
    assert_eq!(zone.try_damage(player, 10.0, Duration::from_millis(500)), Some(5.0));
}

#[test]
fn fire_zone_ignores_distant_targets_and_burns_out() {
    let mut zone = FireZone::new(Vec2::ZERO, 40.0, 5.0, 2, Duration::from_millis(500));
    assert_eq!(zone.try_damage(Vec2::new(300.0, 0.0), 10.0, Duration::ZERO), None);

    assert!(zone.update());
    assert!(!zone.update());
    assert!(zone.is_expired());
    assert_eq!(zone.try_damage(Vec2::ZERO, 10.0, Duration::from_secs(5)), None);
}

#[test]
fn fire_zone_radius_grows_to_its_maximum() {
    let mut zone = FireZone::new(Vec2::ZERO, 60.0, 5.0, 300, Duration::from_millis(500));
    let initial = zone.current_radius();
    for _ in 0..40 {
        let _ = zone.update();
    }
    assert!(initial < zone.current_radius());
    assert!((zone.current_radius() - zone.max_radius()).abs() < 1e-4);
}

#[test]
fn preview_counts_down_to_ignition() {
    let mut preview = FirePreview::new(Vec2::new(10.0, 10.0), 40.0, 3);
    assert!(!preview.tick());
    assert!(!preview.tick());
    assert!(preview.tick());
    assert_eq!(preview.frames_until_ignition(), 0);
}
