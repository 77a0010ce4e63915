use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use arena_survival_core::{ArenaRect, EnemyId, Sound, TickContext, Vec2};
use arena_survival_system_boss::{
    division::{CHILD_DAMAGE_RATIO, CHILD_OFFSET_RADII, CHILD_RADIUS_RATIO},
    patterns::{circle, circle_shot_count},
    AttackPattern, Boss, BossSpec, ChildSpec, PatternContext, PHASE_MITIGATION,
    RAGE_SPEED_MULTIPLIER,
};
use arena_survival_system_enemies::{Emissions, Hostile};

fn arena() -> ArenaRect {
    ArenaRect::new(1600.0, 1200.0)
}

fn context(player: Vec2, frame: u64) -> TickContext {
    TickContext {
        player,
        arena: arena(),
        now: Duration::from_millis(frame * 16),
        frame,
    }
}

fn spec(phase_count: u8, can_divide: bool) -> BossSpec {
    BossSpec {
        stats: Boss::BASE_STATS,
        phase_count,
        seed: 42,
        can_divide,
        division_cooldown: 0,
    }
}

fn boss(phase_count: u8, can_divide: bool) -> Boss {
    Boss::new(
        EnemyId::new(1),
        Vec2::new(800.0, 600.0),
        spec(phase_count, can_divide),
    )
}

fn count(sounds: &[Sound], wanted: Sound) -> usize {
    sounds.iter().filter(|sound| **sound == wanted).count()
}

#[test]
fn lethal_damage_kills_the_boss() {
    let mut boss = boss(1, false);
    let health = boss.health();
    assert!(boss.take_damage(health));
    assert!(boss.is_dead());

    let mut out = Emissions::new();
    assert!(boss.update(&context(Vec2::ZERO, 0), &mut out).is_none());
    assert!(out.is_empty(), "dead bosses stay silent");
}

#[test]
fn phases_only_move_forward_as_health_drops() {
    let mut boss = boss(4, false);
    let mut out = Emissions::new();
    let player = Vec2::new(200.0, 200.0);
    let mut previous = boss.current_phase();
    assert_eq!(previous, 1);

    for frame in 0..60 {
        let _ = boss.take_damage(12.0);
        let _ = boss.update(&context(player, frame), &mut out);
        assert!(boss.current_phase() >= previous);
        previous = boss.current_phase();
        if boss.is_dead() {
            break;
        }
    }

    assert_eq!(previous, 4);
    assert_eq!(count(&out.sounds, Sound::BossPhaseChange), 3);
}

#[test]
fn a_large_hit_skips_straight_to_the_matching_phase() {
    let mut boss = boss(4, false);
    let _ = boss.take_damage(400.0);
    let mut out = Emissions::new();
    let _ = boss.update(&context(Vec2::ZERO, 0), &mut out);

    assert_eq!(boss.current_phase(), 4);
    assert_eq!(count(&out.sounds, Sound::BossPhaseChange), 3);
}

#[test]
fn later_phases_mitigate_incoming_damage() {
    let mut boss = boss(2, false);
    let _ = boss.take_damage(250.0);
    let mut out = Emissions::new();
    let _ = boss.update(&context(Vec2::ZERO, 0), &mut out);
    assert_eq!(boss.current_phase(), 2);

    let before = boss.health();
    let _ = boss.take_damage(100.0);
    let expected = 100.0 * (1.0 - PHASE_MITIGATION);
    assert!((before - boss.health() - expected).abs() < 1e-3);

    let _ = boss.take_damage(-50.0);
    assert!((before - boss.health() - expected).abs() < 1e-3);
}

#[test]
fn rage_latches_exactly_once() {
    let mut boss = boss(1, false);
    let speed = boss.body().speed();
    let cooldown = boss.attack_cooldown();
    let mut out = Emissions::new();

    let _ = boss.take_damage(350.0);
    for frame in 0..5 {
        let _ = boss.update(&context(Vec2::new(100.0, 100.0), frame), &mut out);
    }

    assert!(boss.is_enraged());
    assert_eq!(count(&out.sounds, Sound::BossRage), 1);
    assert!((boss.body().speed() - speed * RAGE_SPEED_MULTIPLIER).abs() < 1e-5);
    assert!(boss.attack_cooldown() < cooldown);

    let _ = boss.take_damage(10.0);
    let _ = boss.update(&context(Vec2::new(100.0, 100.0), 6), &mut out);
    assert_eq!(count(&out.sounds, Sound::BossRage), 1);
}

#[test]
fn boss_does_not_rage_above_a_third_of_its_health() {
    let mut boss = boss(1, false);
    let _ = boss.take_damage(300.0);
    let mut out = Emissions::new();
    let _ = boss.update(&context(Vec2::ZERO, 0), &mut out);
    assert!(!boss.is_enraged());
}

#[test]
fn division_spawns_two_weaker_children_once() {
    let mut boss = boss(4, true);
    let _ = boss.take_damage(250.0);
    let health_at_trigger = boss.health();
    let parent_position = boss.position();
    let parent_radius = boss.radius();
    let parent_damage = boss.contact_damage();
    let mut out = Emissions::new();

    let player = parent_position + Vec2::new(300.0, 0.0);
    let event = boss
        .update(&context(player, 0), &mut out)
        .expect("boss at half health divides");

    assert_eq!(count(&out.sounds, Sound::BossDivision), 1);
    assert!(boss.division().has_divided());
    assert!(!boss.division().can_divide());

    for child in &event.children {
        assert!(!child.division().can_divide());
        assert!((child.health() - 0.4 * health_at_trigger).abs() < 1e-3);
        assert!((child.max_health() - 0.4 * health_at_trigger).abs() < 1e-3);
        assert!((child.radius() - parent_radius * CHILD_RADIUS_RATIO).abs() < 1e-3);
        assert!((child.contact_damage() - parent_damage * CHILD_DAMAGE_RATIO).abs() < 1e-3);
        assert_eq!(child.phases().len(), 2);
        let offset = child.position() - parent_position;
        assert!(offset.x.abs() < 1e-3, "children sit across the player axis");
        assert!((offset.y.abs() - parent_radius * CHILD_OFFSET_RADII).abs() < 1e-3);
    }
    let [first, second] = &event.children;
    let above = first.position().y - parent_position.y;
    let below = second.position().y - parent_position.y;
    assert!(above * below < 0.0, "children sit on opposite sides");
    assert_ne!(event.children[0].seed(), event.children[1].seed());

    let _ = boss.take_damage(50.0);
    for frame in 1..10 {
        assert!(boss.update(&context(player, frame), &mut out).is_none());
    }
    assert_eq!(count(&out.sounds, Sound::BossDivision), 1);
}

#[test]
fn children_of_a_single_phase_boss_keep_one_phase() {
    let mut boss = boss(1, true);
    let _ = boss.take_damage(260.0);
    let mut out = Emissions::new();
    let event = boss
        .update(&context(Vec2::ZERO, 0), &mut out)
        .expect("boss divides");
    for child in &event.children {
        assert_eq!(child.phases().len(), 1);
    }
}

#[test]
fn division_waits_for_the_cooldown() {
    let mut boss = Boss::new(
        EnemyId::new(1),
        Vec2::new(800.0, 600.0),
        BossSpec {
            division_cooldown: 30,
            ..spec(2, true)
        },
    );
    let _ = boss.take_damage(300.0);
    let mut out = Emissions::new();
    let mut divided_at = None;
    for frame in 0..60 {
        if boss.update(&context(Vec2::ZERO, frame), &mut out).is_some() {
            divided_at = Some(frame);
            break;
        }
    }
    assert_eq!(divided_at, Some(29));
}

#[test]
fn non_dividable_boss_never_divides() {
    let mut boss = boss(3, false);
    let _ = boss.take_damage(400.0);
    let mut out = Emissions::new();
    for frame in 0..30 {
        assert!(boss.update(&context(Vec2::ZERO, frame), &mut out).is_none());
    }
}

fn tagged_child(spec: ChildSpec) -> Boss {
    Boss::from_child_spec(ChildSpec {
        seed: 0xC0FFEE,
        ..spec
    })
}

#[test]
fn injected_factory_builds_the_children() {
    let mut boss = boss(2, true).with_child_factory(tagged_child);
    let _ = boss.take_damage(250.0);
    let mut out = Emissions::new();
    let event = boss
        .update(&context(Vec2::ZERO, 0), &mut out)
        .expect("boss divides");
    assert!(event.children.iter().all(|child| child.seed() == 0xC0FFEE));
}

#[test]
fn circle_pattern_matches_the_closed_form() {
    for depth in 1..=3u8 {
        let ctx = PatternContext {
            origin: Vec2::new(400.0, 400.0),
            phase: depth,
            enraged: false,
            speed: 3.0,
            damage: 5.0,
            elapsed: Duration::ZERO,
        };
        let mut shots = Vec::new();
        circle(ctx.origin, depth, depth, &ctx, &mut shots);
        assert_eq!(shots.len(), circle_shot_count(depth));
    }
    assert_eq!([1u8, 2, 3].map(circle_shot_count), [6, 32, 138]);
}

#[test]
fn rage_pool_excludes_calm_patterns() {
    assert!(!AttackPattern::RAGE.contains(&AttackPattern::Circle));
    assert!(!AttackPattern::RAGE.contains(&AttackPattern::Burst));
}

#[test]
fn boss_attacks_on_its_cooldown_and_scales_damage() {
    let mut boss = boss(1, false);
    let mut out = Emissions::new();
    let cooldown = boss.attack_cooldown();
    for frame in 0..=u64::from(cooldown) {
        let _ = boss.update(&context(Vec2::new(100.0, 100.0), frame), &mut out);
    }
    assert_eq!(count(&out.sounds, Sound::BossAttack), 1);
    assert!(!out.projectiles.is_empty());
    for projectile in &out.projectiles {
        assert!((projectile.damage() - boss.projectile_damage()).abs() < 1e-4);
        assert!(projectile.special().is_none(), "phase 1 has no specials");
    }
}

#[derive(Hash)]
struct Fingerprint {
    projectiles: Vec<(i64, i64, i64, i64)>,
    phase: u8,
    enraged: bool,
}

fn run(seed: u64) -> u64 {
    let mut boss = Boss::new(
        EnemyId::new(9),
        Vec2::new(800.0, 600.0),
        BossSpec {
            seed,
            ..spec(4, false)
        },
    );
    let mut out = Emissions::new();
    for frame in 0..600 {
        if frame % 20 == 0 {
            let _ = boss.take_damage(15.0);
        }
        let _ = boss.update(&context(Vec2::new(300.0, 300.0), frame), &mut out);
    }
    let fingerprint = Fingerprint {
        projectiles: out
            .projectiles
            .iter()
            .map(|shot| {
                let scale = |value: f32| (value * 1_000.0).round() as i64;
                (
                    scale(shot.position().x),
                    scale(shot.position().y),
                    scale(shot.velocity().x),
                    scale(shot.velocity().y),
                )
            })
            .collect(),
        phase: boss.current_phase(),
        enraged: boss.is_enraged(),
    };
    let mut hasher = DefaultHasher::new();
    fingerprint.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn seeded_bosses_replay_identically() {
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}
