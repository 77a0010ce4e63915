//! Combat state shared by every enemy type.

use arena_survival_core::{geometry::direction_to, ArenaRect, EnemyId, Vec2};

/// Base statistics of an enemy type before floor scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Movement speed in arena units per frame.
    pub speed: f32,
    /// Health at spawn.
    pub health: f32,
    /// Contact or attack damage.
    pub damage: f32,
    /// Collision radius.
    pub radius: f32,
}

impl EnemyStats {
    /// Returns the stats with health and damage multiplied.
    #[must_use]
    pub fn scaled(self, health_multiplier: f32, damage_multiplier: f32) -> Self {
        Self {
            health: self.health * health_multiplier,
            damage: self.damage * damage_multiplier,
            ..self
        }
    }
}

/// Position, health and stats of a single enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyBody {
    id: EnemyId,
    position: Vec2,
    speed: f32,
    health: f32,
    max_health: f32,
    damage: f32,
    radius: f32,
}

impl EnemyBody {
    /// Creates a body at full health.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats) -> Self {
        let max_health = stats.health.max(1.0);
        Self {
            id,
            position,
            speed: stats.speed.max(0.0),
            health: max_health,
            max_health,
            damage: stats.damage.max(0.0),
            radius: stats.radius.max(1.0),
        }
    }

    /// Identifier allocated at spawn time.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Replaces the identifier, used when an orchestrator adopts an entity
    /// that was constructed without one.
    pub fn set_id(&mut self, id: EnemyId) {
        self.id = id;
    }

    /// Centre of the body.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Movement speed in arena units per frame.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Overrides the movement speed.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Health at spawn.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Remaining health as a fraction of the maximum, clamped to `0..=1`.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Contact or attack damage.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Overrides the damage.
    pub fn set_damage(&mut self, damage: f32) {
        self.damage = damage.max(0.0);
    }

    /// Collision radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Reports whether health has been depleted.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtracts damage and reports whether the body is dead.
    ///
    /// Negative amounts are clamped to zero. The stored health may go below
    /// zero; the returned flag is authoritative.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        self.health -= amount.max(0.0);
        self.is_dead()
    }

    /// Moves toward `target` by at most the body's speed, then clamps.
    ///
    /// Returns the distance to the target measured before moving.
    pub fn seek(&mut self, target: Vec2, arena: &ArenaRect) -> f32 {
        let (direction, distance) = direction_to(self.position, target);
        self.step(direction, self.speed.min(distance), arena);
        distance
    }

    /// Moves away from `threat` by the body's speed, then clamps.
    pub fn flee(&mut self, threat: Vec2, arena: &ArenaRect) {
        let (direction, _) = direction_to(self.position, threat);
        self.step(-direction, self.speed, arena);
    }

    /// Moves along a unit direction, then clamps to the arena.
    pub fn step(&mut self, direction: Vec2, distance: f32, arena: &ArenaRect) {
        self.position += direction * distance;
        self.clamp_to(arena);
    }

    /// Moves the body to an absolute position, clamped to the arena.
    pub fn place(&mut self, position: Vec2, arena: &ArenaRect) {
        self.position = position;
        self.clamp_to(arena);
    }

    /// Pulls the body back inside the arena.
    pub fn clamp_to(&mut self, arena: &ArenaRect) {
        self.position = arena.clamp_circle(self.position, self.radius);
    }
}
