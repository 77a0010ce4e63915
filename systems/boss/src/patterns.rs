//! Procedural bullet patterns.
//!
//! Every generator appends [`ShotSpec`]s to a caller-owned buffer. Generators
//! are deterministic given the random stream they receive.

use std::{
    f32::consts::{FRAC_PI_3, TAU},
    time::Duration,
};

use arena_survival_core::{
    geometry::{perpendicular, unit_from_angle},
    GameRng, Vec2,
};
use rand::{seq::SliceRandom, Rng};

/// Deepest recursion level of the circle pattern.
pub const MAX_CIRCLE_DEPTH: u8 = 3;
/// Sub-rings spawned around each circle level.
pub const CIRCLE_FAN_OUT: usize = 4;
/// Ring spacing of the circle pattern.
pub const CIRCLE_RING_SPACING: f32 = 30.0;

const SPIRAL_TRAIL: usize = 4;
const SPIRAL_ROTATION_PER_SECOND: f32 = 2.0;
const SPIRAL_TRAIL_TWIST: f32 = 0.25;
const SPIRAL_TRAIL_SPACING: f32 = 12.0;
const BURST_SPEED_JITTER: f32 = 0.2;
const WAVE_RINGS: usize = 3;
const WAVE_RING_SHOTS: usize = 12;
const WAVE_AMPLITUDE: f32 = 0.3;
const WAVE_LOBES: f32 = 3.0;

/// Attack patterns a boss phase may select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackPattern {
    /// Recursive rings of rings.
    Circle,
    /// Rotating arms with tangential shots.
    Spiral,
    /// One radial ring with jittered speeds.
    Burst,
    /// Layered rings whose speed follows a sinusoid of the angle.
    Wave,
    /// Two distinct simple patterns fired back to back.
    Mixed,
}

impl AttackPattern {
    /// Patterns that do not compose other patterns.
    pub const SIMPLE: [AttackPattern; 4] = [
        AttackPattern::Circle,
        AttackPattern::Spiral,
        AttackPattern::Burst,
        AttackPattern::Wave,
    ];

    /// Harsher subset used once a boss is enraged.
    pub const RAGE: [AttackPattern; 3] = [
        AttackPattern::Spiral,
        AttackPattern::Wave,
        AttackPattern::Mixed,
    ];
}

/// A projectile to be created by the boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotSpec {
    /// Spawn position.
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Damage on hit.
    pub damage: f32,
}

/// Inputs shared by every generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternContext {
    /// Centre of the attacker.
    pub origin: Vec2,
    /// Active phase number, starting at 1.
    pub phase: u8,
    /// Whether the attacker is enraged.
    pub enraged: bool,
    /// Base projectile speed.
    pub speed: f32,
    /// Damage carried by every shot.
    pub damage: f32,
    /// Simulation clock, used to rotate time-dependent patterns.
    pub elapsed: Duration,
}

/// Generates the shots of a pattern.
pub fn generate(
    pattern: AttackPattern,
    ctx: &PatternContext,
    rng: &mut GameRng,
    out: &mut Vec<ShotSpec>,
) {
    match pattern {
        AttackPattern::Circle => {
            let depth = ctx.phase.clamp(1, MAX_CIRCLE_DEPTH);
            circle(ctx.origin, depth, depth, ctx, out);
        }
        AttackPattern::Spiral => spiral(ctx, out),
        AttackPattern::Burst => burst(ctx, rng, out),
        AttackPattern::Wave => wave(ctx, out),
        AttackPattern::Mixed => {
            let picked: Vec<AttackPattern> = AttackPattern::SIMPLE
                .choose_multiple(rng, 2)
                .copied()
                .collect();
            for pattern in picked {
                generate(pattern, ctx, rng, out);
            }
        }
    }
}

/// Emits one circle level and recurses into its sub-rings.
///
/// Level `depth` places `4 + 2 * depth` shots on a ring of radius
/// `30 * (max_depth - depth + 1)` around `center`, then recurses into
/// [`CIRCLE_FAN_OUT`] rings centred on evenly spaced points of that ring.
pub fn circle(
    center: Vec2,
    depth: u8,
    max_depth: u8,
    ctx: &PatternContext,
    out: &mut Vec<ShotSpec>,
) {
    if depth == 0 {
        return;
    }
    let radius = CIRCLE_RING_SPACING * f32::from(max_depth - depth + 1);
    let shots = 4 + 2 * usize::from(depth);
    let step = TAU / shots as f32;
    for index in 0..shots {
        let direction = unit_from_angle(step * index as f32);
        out.push(ShotSpec {
            position: center + direction * radius,
            velocity: direction * ctx.speed,
            damage: ctx.damage,
        });
    }
    for branch in 0..CIRCLE_FAN_OUT {
        let angle = TAU * branch as f32 / CIRCLE_FAN_OUT as f32;
        circle(
            center + unit_from_angle(angle) * radius,
            depth - 1,
            max_depth,
            ctx,
            out,
        );
    }
}

/// Number of shots the circle pattern produces at the given depth.
#[must_use]
pub fn circle_shot_count(depth: u8) -> usize {
    let depth = u32::from(depth);
    (1..=depth)
        .map(|level| (4 + 2 * level as usize) * CIRCLE_FAN_OUT.pow(depth - level))
        .sum()
}

fn spiral(ctx: &PatternContext, out: &mut Vec<ShotSpec>) {
    let arms = 2 + usize::from(ctx.phase) + usize::from(ctx.enraged);
    let rotation = ctx.elapsed.as_secs_f32() * SPIRAL_ROTATION_PER_SECOND;
    for arm in 0..arms {
        let arm_angle = rotation + TAU * arm as f32 / arms as f32;
        for step in 0..SPIRAL_TRAIL {
            let angle = arm_angle + SPIRAL_TRAIL_TWIST * step as f32;
            let direction = unit_from_angle(angle);
            out.push(ShotSpec {
                position: ctx.origin + direction * (20.0 + SPIRAL_TRAIL_SPACING * step as f32),
                velocity: perpendicular(direction) * ctx.speed,
                damage: ctx.damage,
            });
        }
    }
}

fn burst(ctx: &PatternContext, rng: &mut GameRng, out: &mut Vec<ShotSpec>) {
    let shots = 6 + 2 * usize::from(ctx.phase);
    for index in 0..shots {
        let direction = unit_from_angle(TAU * index as f32 / shots as f32);
        let jitter = rng.gen_range(1.0 - BURST_SPEED_JITTER..=1.0 + BURST_SPEED_JITTER);
        out.push(ShotSpec {
            position: ctx.origin,
            velocity: direction * ctx.speed * jitter,
            damage: ctx.damage,
        });
    }
}

fn wave(ctx: &PatternContext, out: &mut Vec<ShotSpec>) {
    for ring in 0..WAVE_RINGS {
        let offset = FRAC_PI_3 * ring as f32;
        let ring_speed = ctx.speed * (1.0 - 0.15 * ring as f32);
        for index in 0..WAVE_RING_SHOTS {
            let angle = TAU * index as f32 / WAVE_RING_SHOTS as f32;
            let swell = 1.0 + WAVE_AMPLITUDE * (WAVE_LOBES * angle + offset).sin();
            out.push(ShotSpec {
                position: ctx.origin,
                velocity: unit_from_angle(angle) * ring_speed * swell,
                damage: ctx.damage,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_survival_core::seeded_rng;

    fn context(phase: u8) -> PatternContext {
        PatternContext {
            origin: Vec2::new(500.0, 400.0),
            phase,
            enraged: false,
            speed: 3.0,
            damage: 10.0,
            elapsed: Duration::from_millis(1_500),
        }
    }

    #[test]
    fn closed_form_matches_known_counts() {
        assert_eq!(circle_shot_count(1), 6);
        assert_eq!(circle_shot_count(2), 32);
        assert_eq!(circle_shot_count(3), 138);
    }

    #[test]
    fn first_circle_level_uses_the_outermost_spacing_rule() {
        let mut out = Vec::new();
        circle(Vec2::ZERO, 2, 2, &context(2), &mut out);
        for shot in &out[..8] {
            assert!((shot.position.length() - CIRCLE_RING_SPACING).abs() < 1e-3);
        }
    }

    #[test]
    fn spiral_gains_an_arm_in_rage() {
        let mut calm = Vec::new();
        spiral(&context(2), &mut calm);
        let mut enraged = Vec::new();
        spiral(
            &PatternContext {
                enraged: true,
                ..context(2)
            },
            &mut enraged,
        );
        assert_eq!(calm.len(), 4 * SPIRAL_TRAIL);
        assert_eq!(enraged.len(), 5 * SPIRAL_TRAIL);
    }

    #[test]
    fn spiral_shots_travel_tangentially() {
        let ctx = context(1);
        let mut out = Vec::new();
        spiral(&ctx, &mut out);
        for shot in out {
            let radial = (shot.position - ctx.origin).normalize();
            assert!(radial.dot(shot.velocity).abs() < 1e-3);
        }
    }

    #[test]
    fn mixed_combines_two_distinct_patterns() {
        let ctx = context(3);
        let mut rng = seeded_rng(5);
        let mut out = Vec::new();
        generate(AttackPattern::Mixed, &ctx, &mut rng, &mut out);
        let singles: Vec<usize> = AttackPattern::SIMPLE
            .iter()
            .map(|pattern| {
                let mut single = Vec::new();
                generate(*pattern, &ctx, &mut seeded_rng(0), &mut single);
                single.len()
            })
            .collect();
        let possible: Vec<usize> = (0..singles.len())
            .flat_map(|a| ((a + 1)..singles.len()).map(move |b| (a, b)))
            .map(|(a, b)| singles[a] + singles[b])
            .collect();
        assert!(possible.contains(&out.len()));
    }
}
