#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Passive simulated effects: projectiles and fire zones.
//!
//! Nothing in this crate knows who fired a projectile or placed a zone. The
//! owner keeps the entities in its own collections, advances them once per
//! frame and queries them during collision resolution.

use std::time::Duration;

use arena_survival_core::{
    geometry::{steer_towards, unit_from_angle},
    ArenaRect, EntitySnapshot, EntityVisual, Rgb, Vec2,
};

/// Fraction of the parent's damage carried by each splitting child.
pub const SPLIT_DAMAGE_RATIO: f32 = 0.5;
/// Angle in radians between a split child and its parent's heading.
pub const SPLIT_ANGLE: f32 = 0.45;

const BOUNCE_LIMIT: u8 = 3;
const ACCELERATION_FACTOR: f32 = 1.03;
const ACCELERATION_MAX_SPEED: f32 = 9.0;
const SPLIT_DELAY_FRAMES: u32 = 40;
const HOMING_TURN_RATE: f32 = 0.04;
const FIRE_ZONE_GROWTH_FRAMES: u32 = 20;

/// Category of special projectile a boss phase may substitute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    /// Reflects off arena walls a limited number of times.
    Bouncing,
    /// Speeds up every frame until it reaches a cap.
    Accelerating,
    /// Replaces itself with two weaker children after a delay.
    Splitting,
    /// Steers toward the player at a bounded turn rate.
    Homing,
}

impl SpecialKind {
    /// Every special kind, in declaration order.
    pub const ALL: [SpecialKind; 4] = [
        SpecialKind::Bouncing,
        SpecialKind::Accelerating,
        SpecialKind::Splitting,
        SpecialKind::Homing,
    ];

    /// Fresh behaviour state for a projectile of this kind.
    #[must_use]
    pub const fn behavior(self) -> SpecialBehavior {
        match self {
            Self::Bouncing => SpecialBehavior::Bouncing {
                bounces_left: BOUNCE_LIMIT,
            },
            Self::Accelerating => SpecialBehavior::Accelerating {
                factor: ACCELERATION_FACTOR,
                max_speed: ACCELERATION_MAX_SPEED,
            },
            Self::Splitting => SpecialBehavior::Splitting {
                frames_until_split: SPLIT_DELAY_FRAMES,
            },
            Self::Homing => SpecialBehavior::Homing {
                turn_rate: HOMING_TURN_RATE,
            },
        }
    }
}

/// Mutable state of a projectile's special behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpecialBehavior {
    /// Remaining wall reflections.
    Bouncing {
        /// Reflections left before the projectile may leave the arena.
        bounces_left: u8,
    },
    /// Multiplicative speed-up per frame.
    Accelerating {
        /// Velocity multiplier applied every frame.
        factor: f32,
        /// Speed cap in arena units per frame.
        max_speed: f32,
    },
    /// Countdown to splitting.
    Splitting {
        /// Frames left before the projectile splits.
        frames_until_split: u32,
    },
    /// Steering toward a live target.
    Homing {
        /// Maximum heading change per frame, in radians.
        turn_rate: f32,
    },
}

impl SpecialBehavior {
    /// Kind of this behaviour.
    #[must_use]
    pub const fn kind(&self) -> SpecialKind {
        match self {
            Self::Bouncing { .. } => SpecialKind::Bouncing,
            Self::Accelerating { .. } => SpecialKind::Accelerating,
            Self::Splitting { .. } => SpecialKind::Splitting,
            Self::Homing { .. } => SpecialKind::Homing,
        }
    }
}

/// Outcome of advancing a projectile by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    /// The projectile is still in flight.
    Alive,
    /// The projectile ran out of lifetime.
    Expired,
    /// The projectile left the playfield.
    LeftArena,
    /// The projectile replaced itself with children.
    Split,
}

/// A moving damaging projectile.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    position: Vec2,
    velocity: Vec2,
    damage: f32,
    radius: f32,
    lifetime: u32,
    color: Rgb,
    special: Option<SpecialBehavior>,
}

impl Projectile {
    /// Creates a plain projectile.
    #[must_use]
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        damage: f32,
        radius: f32,
        lifetime: u32,
        color: Rgb,
    ) -> Self {
        Self {
            position,
            velocity,
            damage,
            radius,
            lifetime,
            color,
            special: None,
        }
    }

    /// Attaches a special behaviour to the projectile.
    #[must_use]
    pub fn with_special(mut self, special: SpecialBehavior) -> Self {
        self.special = Some(special);
        self
    }

    /// Centre of the projectile.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Displacement applied every frame.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Damage dealt on hit.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Collision radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Frames left before the projectile expires.
    #[must_use]
    pub const fn lifetime(&self) -> u32 {
        self.lifetime
    }

    /// Display color.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Special behaviour, if any.
    #[must_use]
    pub const fn special(&self) -> Option<SpecialBehavior> {
        self.special
    }

    /// Reports whether the projectile overlaps the provided circle.
    #[must_use]
    pub fn hits(&self, center: Vec2, radius: f32) -> bool {
        self.position.distance(center) <= self.radius + radius
    }

    /// Advances the projectile by one frame.
    ///
    /// Homing projectiles steer toward `homing_target` when one is provided.
    /// Children created by a split are pushed onto `spawned`.
    pub fn advance(
        &mut self,
        arena: &ArenaRect,
        homing_target: Option<Vec2>,
        spawned: &mut Vec<Projectile>,
    ) -> Fate {
        if self.lifetime == 0 {
            return Fate::Expired;
        }
        self.lifetime -= 1;

        match &mut self.special {
            Some(SpecialBehavior::Homing { turn_rate }) => {
                if let Some(target) = homing_target {
                    self.velocity =
                        steer_towards(self.velocity, target - self.position, *turn_rate);
                }
            }
            Some(SpecialBehavior::Accelerating { factor, max_speed }) => {
                let accelerated = self.velocity * *factor;
                self.velocity = accelerated.clamp_length_max(*max_speed);
            }
            Some(SpecialBehavior::Splitting { frames_until_split }) => {
                *frames_until_split = frames_until_split.saturating_sub(1);
                if *frames_until_split == 0 {
                    self.split_into(spawned);
                    return Fate::Split;
                }
            }
            Some(SpecialBehavior::Bouncing { .. }) | None => {}
        }

        self.position += self.velocity;

        if let Some(SpecialBehavior::Bouncing { bounces_left }) = &mut self.special {
            if *bounces_left > 0
                && reflect_off_walls(&mut self.position, &mut self.velocity, self.radius, arena)
            {
                *bounces_left -= 1;
            }
        }

        if !arena.overlaps_circle(self.position, self.radius) {
            return Fate::LeftArena;
        }
        Fate::Alive
    }

    /// Render snapshot of the projectile.
    #[must_use]
    pub fn snapshot(&self, visual: EntityVisual) -> EntitySnapshot {
        EntitySnapshot {
            visual,
            position: self.position,
            radius: self.radius,
            color: self.color,
            health_fraction: None,
        }
    }

    fn split_into(&self, spawned: &mut Vec<Projectile>) {
        let speed = self.velocity.length();
        let heading = self.velocity.y.atan2(self.velocity.x);
        for offset in [-SPLIT_ANGLE, SPLIT_ANGLE] {
            spawned.push(Projectile::new(
                self.position,
                unit_from_angle(heading + offset) * speed,
                self.damage * SPLIT_DAMAGE_RATIO,
                self.radius * 0.8,
                self.lifetime,
                self.color,
            ));
        }
    }
}

fn reflect_off_walls(
    position: &mut Vec2,
    velocity: &mut Vec2,
    radius: f32,
    arena: &ArenaRect,
) -> bool {
    let mut reflected = false;
    let min = arena.min();
    let max = arena.max();
    if (position.x - radius < min.x && velocity.x < 0.0)
        || (position.x + radius > max.x && velocity.x > 0.0)
    {
        velocity.x = -velocity.x;
        reflected = true;
    }
    if (position.y - radius < min.y && velocity.y < 0.0)
        || (position.y + radius > max.y && velocity.y > 0.0)
    {
        velocity.y = -velocity.y;
        reflected = true;
    }
    if reflected {
        *position = arena.clamp_circle(*position, radius);
    }
    reflected
}

/// Advances every projectile in the collection by one frame.
///
/// Dead projectiles are removed and split children are appended at the end,
/// so the collection keeps a stable order across frames.
pub fn advance_all(
    projectiles: &mut Vec<Projectile>,
    arena: &ArenaRect,
    homing_target: Option<Vec2>,
) {
    let mut spawned = Vec::new();
    projectiles.retain_mut(|projectile| {
        projectile.advance(arena, homing_target, &mut spawned) == Fate::Alive
    });
    if !spawned.is_empty() {
        log::trace!("{} projectiles spawned by splits", spawned.len());
    }
    projectiles.append(&mut spawned);
}

/// Stationary damaging hazard.
#[derive(Clone, Debug, PartialEq)]
pub struct FireZone {
    position: Vec2,
    max_radius: f32,
    damage_per_tick: f32,
    frames_left: u32,
    age: u32,
    tick_interval: Duration,
    last_damage_at: Option<Duration>,
}

impl FireZone {
    /// Creates a live fire zone.
    ///
    /// Damage is applied at most once per `tick_interval` of simulation time.
    #[must_use]
    pub fn new(
        position: Vec2,
        max_radius: f32,
        damage_per_tick: f32,
        lifetime_frames: u32,
        tick_interval: Duration,
    ) -> Self {
        Self {
            position,
            max_radius,
            damage_per_tick,
            frames_left: lifetime_frames,
            age: 0,
            tick_interval,
            last_damage_at: None,
        }
    }

    /// Centre of the zone.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Damage applied per damage tick.
    #[must_use]
    pub const fn damage_per_tick(&self) -> f32 {
        self.damage_per_tick
    }

    /// Radius after the ignition animation has finished.
    #[must_use]
    pub const fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Animated radius: grows from a third of the maximum during ignition.
    #[must_use]
    pub fn current_radius(&self) -> f32 {
        let progress = (self.age as f32 / FIRE_ZONE_GROWTH_FRAMES as f32).min(1.0);
        self.max_radius * (1.0 + 2.0 * progress) / 3.0
    }

    /// Reports whether the zone has burned out.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.frames_left == 0
    }

    /// Ages the zone by one frame. Returns `false` once it has burned out.
    pub fn update(&mut self) -> bool {
        self.age = self.age.saturating_add(1);
        self.frames_left = self.frames_left.saturating_sub(1);
        !self.is_expired()
    }

    /// Damages a circle overlapping the zone if the damage tick is ready.
    pub fn try_damage(&mut self, target: Vec2, target_radius: f32, now: Duration) -> Option<f32> {
        let reach = self.current_radius() + target_radius;
        if self.is_expired() || self.position.distance(target) > reach {
            return None;
        }
        let ready = self
            .last_damage_at
            .map_or(true, |last| now.saturating_sub(last) >= self.tick_interval);
        if !ready {
            return None;
        }
        self.last_damage_at = Some(now);
        Some(self.damage_per_tick)
    }

    /// Render snapshot of the zone.
    #[must_use]
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            visual: EntityVisual::FireZone,
            position: self.position,
            radius: self.current_radius(),
            color: Rgb::from_rgb(0xff, 0x57, 0x22),
            health_fraction: None,
        }
    }
}

/// Telegraphed fire zone that has not ignited yet.
///
/// Previews are visible to the player but never deal damage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirePreview {
    position: Vec2,
    radius: f32,
    frames_until_ignition: u32,
}

impl FirePreview {
    /// Schedules a zone at `position` that ignites after `delay_frames`.
    #[must_use]
    pub const fn new(position: Vec2, radius: f32, delay_frames: u32) -> Self {
        Self {
            position,
            radius,
            frames_until_ignition: delay_frames,
        }
    }

    /// Centre of the future zone.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Radius of the future zone.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Frames left before ignition.
    #[must_use]
    pub const fn frames_until_ignition(&self) -> u32 {
        self.frames_until_ignition
    }

    /// Counts the preview down by one frame. Returns `true` once it is due.
    pub fn tick(&mut self) -> bool {
        self.frames_until_ignition = self.frames_until_ignition.saturating_sub(1);
        self.frames_until_ignition == 0
    }

    /// Render snapshot of the preview.
    #[must_use]
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            visual: EntityVisual::FireZonePreview,
            position: self.position,
            radius: self.radius,
            color: Rgb::from_rgb(0xff, 0xc1, 0x07),
            health_fraction: None,
        }
    }
}
