#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Behaviour policies of every regular enemy.
//!
//! Each enemy kind is its own type implementing [`Enemy`]. All of them embed
//! an [`EnemyBody`] holding the shared combat state; the [`Hostile`] trait
//! exposes that state to the collision resolver and is reused by the boss.
//! Updates never touch global state: projectiles, fire zones and sound cues
//! are pushed onto the caller-owned [`Emissions`].

use std::fmt;

use arena_survival_core::{
    EnemyId, EnemyKind, EntitySnapshot, EntityVisual, Rgb, Sound, TickContext, Vec2,
};
use arena_survival_system_projectiles::{FirePreview, FireZone, Projectile};

pub mod body;
pub mod destructeur;
pub mod pyromane;
pub mod seekers;
pub mod shooter;
pub mod suicide;

pub use body::{EnemyBody, EnemyStats};
pub use destructeur::Destructeur;
pub use pyromane::Pyromane;
pub use seekers::{Basic, Charger};
pub use shooter::Shooter;
pub use suicide::Suicide;

/// Side effects produced by enemies during a frame.
#[derive(Debug, Default)]
pub struct Emissions {
    /// Projectiles fired this frame.
    pub projectiles: Vec<Projectile>,
    /// Fire zones that ignited this frame.
    pub zones: Vec<FireZone>,
    /// Sound cues to forward to the audio sink.
    pub sounds: Vec<Sound>,
}

impl Emissions {
    /// Creates empty emission buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.zones.is_empty() && self.sounds.is_empty()
    }
}

/// Area damage produced by a detonating enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    /// Centre of the blast.
    pub center: Vec2,
    /// Radius within which the player is hurt.
    pub radius: f32,
    /// Damage dealt to the player.
    pub damage: f32,
}

/// Combat surface shared by regular enemies and bosses.
pub trait Hostile: fmt::Debug {
    /// Shared combat state.
    fn body(&self) -> &EnemyBody;

    /// Mutable access to the shared combat state.
    fn body_mut(&mut self) -> &mut EnemyBody;

    /// Kind of the enemy.
    fn kind(&self) -> EnemyKind;

    /// Identifier allocated at spawn time.
    fn id(&self) -> EnemyId {
        self.body().id()
    }

    /// Centre of the enemy.
    fn position(&self) -> Vec2 {
        self.body().position()
    }

    /// Collision radius.
    fn radius(&self) -> f32 {
        self.body().radius()
    }

    /// Current health. May be negative once dead.
    fn health(&self) -> f32 {
        self.body().health()
    }

    /// Health at spawn.
    fn max_health(&self) -> f32 {
        self.body().max_health()
    }

    /// Damage dealt to the player on contact.
    fn contact_damage(&self) -> f32 {
        self.body().damage()
    }

    /// Applies incoming damage and reports whether the enemy is now dead.
    fn take_damage(&mut self, amount: f32) -> bool {
        self.body_mut().apply_damage(amount)
    }

    /// Reports whether health has been depleted.
    fn is_dead(&self) -> bool {
        self.body().is_dead()
    }

    /// Display color.
    fn color(&self) -> Rgb {
        kind_color(self.kind())
    }

    /// Render snapshot of the enemy.
    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            visual: EntityVisual::Enemy(self.kind()),
            position: self.position(),
            radius: self.radius(),
            color: self.color(),
            health_fraction: Some(self.body().health_ratio()),
        }
    }
}

/// Movement and attack policy of a regular enemy.
pub trait Enemy: Hostile {
    /// Advances the enemy by one frame.
    fn update(&mut self, ctx: &TickContext, out: &mut Emissions);

    /// Blast to resolve this frame, for enemies that detonated.
    fn explosion(&self) -> Option<Explosion> {
        None
    }

    /// Telegraphed fire zones that have not ignited yet.
    fn pending_zones(&self) -> &[FirePreview] {
        &[]
    }

    /// Reports whether the enemy should be removed from the arena.
    fn is_finished(&self) -> bool {
        self.is_dead()
    }
}

/// Default display color of each kind.
#[must_use]
pub const fn kind_color(kind: EnemyKind) -> Rgb {
    match kind {
        EnemyKind::Basic => Rgb::from_rgb(0x2f, 0x95, 0x32),
        EnemyKind::Charger => Rgb::from_rgb(0xc8, 0x2a, 0x36),
        EnemyKind::Shooter => Rgb::from_rgb(0xff, 0xc1, 0x07),
        EnemyKind::Suicide => Rgb::from_rgb(0xff, 0x6f, 0x00),
        EnemyKind::Destructeur => Rgb::from_rgb(0x58, 0x47, 0xff),
        EnemyKind::Pyromane => Rgb::from_rgb(0xe6, 0x4a, 0x19),
        EnemyKind::Boss => Rgb::from_rgb(0x8e, 0x24, 0xaa),
    }
}
