#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multi-phase floor boss.
//!
//! A [`Boss`] escalates through [`BossPhase`]s as its health drops, latches
//! into rage at a third of its health, and divides once into two weaker
//! children at half health. It shares the [`Hostile`] combat surface with
//! regular enemies but is updated separately because division hands new
//! entities back to the caller.

use arena_survival_core::{
    derive_seed,
    geometry::{direction_to, perpendicular},
    seeded_rng, EnemyId, EnemyKind, GameRng, Rgb, Sound, TickContext, Vec2,
};
use arena_survival_system_enemies::{Emissions, EnemyBody, EnemyStats, Hostile};
use arena_survival_system_projectiles::Projectile;
use rand::{seq::SliceRandom, Rng};

pub mod division;
pub mod patterns;
pub mod phases;

pub use division::{BossDivisionSystem, ChildFactory, ChildSpec, DivisionEvent};
pub use patterns::{AttackPattern, PatternContext, ShotSpec};
pub use phases::{build_phases, phases_for_floor, BossPhase};

/// Health ratio at or below which rage activates.
pub const RAGE_HEALTH_RATIO: f32 = 1.0 / 3.0;
/// Speed multiplier applied on rage.
pub const RAGE_SPEED_MULTIPLIER: f32 = 1.5;
/// Projectile damage multiplier applied on rage.
pub const RAGE_DAMAGE_MULTIPLIER: f32 = 1.3;
/// Attack cooldown multiplier applied on rage.
pub const RAGE_COOLDOWN_MULTIPLIER: f32 = 0.6;
/// Damage reduction gained per phase after the first.
pub const PHASE_MITIGATION: f32 = 0.08;

const STANDOFF_DISTANCE: f32 = 160.0;
const PROJECTILE_SPEED: f32 = 3.0;
const PROJECTILE_LIFETIME_FRAMES: u32 = 240;
const SPECIAL_CHANCE: (u32, u32) = (1, 3);
const CHILD_SPEED_JITTER: f32 = 0.1;
const DIVISION_SEED_LABEL: &str = "boss-division";

/// Construction parameters of a boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossSpec {
    /// Stats at spawn.
    pub stats: EnemyStats,
    /// Number of phases, clamped to `1..=4`.
    pub phase_count: u8,
    /// Seed of the boss-owned random stream.
    pub seed: u64,
    /// Whether the boss may divide.
    pub can_divide: bool,
    /// Frames before division becomes possible.
    pub division_cooldown: u32,
}

/// Multi-phase boss with rage and self-division.
#[derive(Clone, Debug)]
pub struct Boss {
    body: EnemyBody,
    base_speed: f32,
    phases: Vec<BossPhase>,
    phase_index: usize,
    enraged: bool,
    attack_timer: u32,
    division: BossDivisionSystem,
    rng: GameRng,
    seed: u64,
}

impl Boss {
    /// Stats of a floor 1 boss.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 1.5,
        health: 500.0,
        damage: 20.0,
        radius: 40.0,
    };

    /// Creates a boss in its first phase.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, spec: BossSpec) -> Self {
        let phases = build_phases(spec.phase_count);
        let attack_timer = phases[0].attack_cooldown();
        Self {
            body: EnemyBody::new(id, position, spec.stats),
            base_speed: spec.stats.speed,
            phases,
            phase_index: 0,
            enraged: false,
            attack_timer,
            division: BossDivisionSystem::new(
                spec.can_divide,
                spec.division_cooldown,
                Self::from_child_spec,
            ),
            rng: seeded_rng(spec.seed),
            seed: spec.seed,
        }
    }

    /// Default division factory: a non-dividable boss without an identifier.
    #[must_use]
    pub fn from_child_spec(spec: ChildSpec) -> Self {
        Self::new(
            EnemyId::new(0),
            spec.position,
            BossSpec {
                stats: spec.stats,
                phase_count: spec.phase_count,
                seed: spec.seed,
                can_divide: false,
                division_cooldown: 0,
            },
        )
    }

    /// Replaces the factory used to build division children.
    #[must_use]
    pub fn with_child_factory(mut self, factory: ChildFactory) -> Self {
        self.division = BossDivisionSystem::new(
            self.division.can_divide(),
            self.division.cooldown(),
            factory,
        );
        self
    }

    /// One-based number of the active phase.
    #[must_use]
    pub fn current_phase(&self) -> u8 {
        self.active_phase().number()
    }

    /// Every phase owned by the boss, in activation order.
    #[must_use]
    pub fn phases(&self) -> &[BossPhase] {
        &self.phases
    }

    /// Active phase descriptor.
    #[must_use]
    pub fn active_phase(&self) -> &BossPhase {
        &self.phases[self.phase_index]
    }

    /// Whether rage has been triggered.
    #[must_use]
    pub const fn is_enraged(&self) -> bool {
        self.enraged
    }

    /// Division bookkeeping.
    #[must_use]
    pub const fn division(&self) -> &BossDivisionSystem {
        &self.division
    }

    /// Seed of the boss-owned random stream.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames until the next attack.
    #[must_use]
    pub const fn attack_timer(&self) -> u32 {
        self.attack_timer
    }

    /// Remaining health as a fraction of the maximum.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        self.body.health_ratio()
    }

    /// Attack cooldown of the active phase, shortened in rage.
    #[must_use]
    pub fn attack_cooldown(&self) -> u32 {
        let cooldown = self.active_phase().attack_cooldown();
        if self.enraged {
            (cooldown as f32 * RAGE_COOLDOWN_MULTIPLIER).round() as u32
        } else {
            cooldown
        }
    }

    /// Damage carried by the boss projectiles right now.
    #[must_use]
    pub fn projectile_damage(&self) -> f32 {
        let rage = if self.enraged {
            RAGE_DAMAGE_MULTIPLIER
        } else {
            1.0
        };
        self.body.damage() * self.active_phase().damage_multiplier() * rage
    }

    /// Advances the boss by one frame.
    ///
    /// Phase and rage transitions are evaluated first so that damage taken
    /// since the last frame is reflected before moving and attacking. Returns
    /// the division event when the boss splits this frame.
    pub fn update(&mut self, ctx: &TickContext, out: &mut Emissions) -> Option<DivisionEvent> {
        if self.is_dead() {
            return None;
        }
        self.sync_phase(out);
        self.check_rage(out);

        self.division.tick();
        let division = if self.division.should_divide(self.health_ratio()) {
            self.divide(ctx, out)
        } else {
            None
        };

        self.move_toward(ctx);
        self.attack(ctx, out);
        division
    }

    fn sync_phase(&mut self, out: &mut Emissions) {
        let ratio = self.health_ratio();
        while let Some(next) = self.phases.get(self.phase_index + 1) {
            if ratio > next.health_threshold() {
                break;
            }
            self.phase_index += 1;
            out.sounds.push(Sound::BossPhaseChange);
            log::debug!(
                "boss {} entered phase {} at {:.2} health",
                self.body.id(),
                self.current_phase(),
                ratio
            );
        }
    }

    fn check_rage(&mut self, out: &mut Emissions) {
        if self.enraged || self.health_ratio() > RAGE_HEALTH_RATIO {
            return;
        }
        self.enraged = true;
        self.body.set_speed(self.base_speed * RAGE_SPEED_MULTIPLIER);
        out.sounds.push(Sound::BossRage);
        log::debug!("boss {} is enraged", self.body.id());
    }

    fn divide(&mut self, ctx: &TickContext, out: &mut Emissions) -> Option<DivisionEvent> {
        let (direction, _) = direction_to(self.body.position(), ctx.player);
        let axis = if direction == Vec2::ZERO {
            Vec2::Y
        } else {
            perpendicular(direction)
        };
        let offset = axis * self.body.radius() * division::CHILD_OFFSET_RADII;
        let radius = self.body.radius() * division::CHILD_RADIUS_RATIO;
        let phase_count = division::child_phase_count(self.phases.len() as u8);

        let mut spec_for = |index: u64, side: f32| {
            let jitter = self
                .rng
                .gen_range(1.0 - CHILD_SPEED_JITTER..=1.0 + CHILD_SPEED_JITTER);
            ChildSpec {
                position: ctx
                    .arena
                    .clamp_circle(self.body.position() + offset * side, radius),
                stats: EnemyStats {
                    speed: self.base_speed * jitter,
                    health: self.body.health() * division::CHILD_HEALTH_RATIO,
                    damage: self.body.damage() * division::CHILD_DAMAGE_RATIO,
                    radius,
                },
                phase_count,
                seed: derive_seed(self.seed, DIVISION_SEED_LABEL, index),
            }
        };
        let specs = [spec_for(0, 1.0), spec_for(1, -1.0)];

        let event = self.division.divide(specs)?;
        out.sounds.push(Sound::BossDivision);
        log::debug!(
            "boss {} divided at {:.1} health",
            self.body.id(),
            self.body.health()
        );
        Some(event)
    }

    fn move_toward(&mut self, ctx: &TickContext) {
        let (direction, distance) = direction_to(self.body.position(), ctx.player);
        let approach = (distance - STANDOFF_DISTANCE).clamp(0.0, self.body.speed());
        self.body.step(direction, approach, &ctx.arena);
    }

    fn attack(&mut self, ctx: &TickContext, out: &mut Emissions) {
        if self.attack_timer > 0 {
            self.attack_timer -= 1;
            return;
        }
        self.attack_timer = self.attack_cooldown();

        let pool: &[AttackPattern] = if self.enraged {
            &AttackPattern::RAGE
        } else {
            self.phases[self.phase_index].patterns()
        };
        let Some(pattern) = pool.choose(&mut self.rng).copied() else {
            return;
        };

        let pattern_ctx = PatternContext {
            origin: self.body.position(),
            phase: self.current_phase(),
            enraged: self.enraged,
            speed: PROJECTILE_SPEED,
            damage: self.projectile_damage(),
            elapsed: ctx.now,
        };
        let mut shots = Vec::new();
        patterns::generate(pattern, &pattern_ctx, &mut self.rng, &mut shots);

        let phase = &self.phases[self.phase_index];
        let (numerator, denominator) = SPECIAL_CHANCE;
        for shot in shots {
            let mut projectile = Projectile::new(
                shot.position,
                shot.velocity,
                shot.damage,
                phase.projectile_radius(),
                PROJECTILE_LIFETIME_FRAMES,
                phase.color(),
            );
            if !phase.specials().is_empty() && self.rng.gen_ratio(numerator, denominator) {
                if let Some(kind) = phase.specials().choose(&mut self.rng) {
                    projectile = projectile.with_special(kind.behavior());
                }
            }
            out.projectiles.push(projectile);
        }
        out.sounds.push(Sound::BossAttack);
        log::trace!("boss {} fired {:?} at {:?}", self.body.id(), pattern, ctx.now);
    }
}

impl Hostile for Boss {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Boss
    }

    fn take_damage(&mut self, amount: f32) -> bool {
        let mitigation = 1.0 - f32::from(self.current_phase() - 1) * PHASE_MITIGATION;
        self.body.apply_damage(amount.max(0.0) * mitigation)
    }

    fn color(&self) -> Rgb {
        self.active_phase().color()
    }
}
