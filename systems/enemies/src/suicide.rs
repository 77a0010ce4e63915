//! Seeker that arms itself next to the player and detonates.

use arena_survival_core::{geometry::direction_to, EnemyId, EnemyKind, Sound, TickContext, Vec2};

use crate::{Emissions, Enemy, EnemyBody, EnemyStats, Explosion, Hostile};

/// Distance to the player below which the fuse is lit.
pub const TRIGGER_RADIUS: f32 = 50.0;
/// Frames between lighting the fuse and detonation.
pub const FUSE_FRAMES: u32 = 15;
/// Radius of the blast.
pub const EXPLOSION_RADIUS: f32 = 80.0;

/// Suicide bomber. Deals no contact damage; its attack is the explosion.
#[derive(Clone, Debug, PartialEq)]
pub struct Suicide {
    body: EnemyBody,
    is_exploding: bool,
    explosion_timer: u32,
    detonated: bool,
}

impl Suicide {
    /// Stats on floor 1. `damage` is the explosion damage.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 3.0,
        health: 15.0,
        damage: 40.0,
        radius: 13.0,
    };

    /// Creates an unarmed bomber.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats) -> Self {
        Self {
            body: EnemyBody::new(id, position, stats),
            is_exploding: false,
            explosion_timer: 0,
            detonated: false,
        }
    }

    /// Reports whether the fuse has been lit.
    #[must_use]
    pub const fn is_exploding(&self) -> bool {
        self.is_exploding
    }

    /// Frames left on the fuse.
    #[must_use]
    pub const fn explosion_timer(&self) -> u32 {
        self.explosion_timer
    }

    /// Reports whether the bomber has gone off.
    #[must_use]
    pub const fn has_detonated(&self) -> bool {
        self.detonated
    }
}

impl Hostile for Suicide {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Suicide
    }

    fn contact_damage(&self) -> f32 {
        0.0
    }
}

impl Enemy for Suicide {
    fn update(&mut self, ctx: &TickContext, out: &mut Emissions) {
        if self.detonated {
            return;
        }
        if self.is_exploding {
            self.explosion_timer = self.explosion_timer.saturating_sub(1);
            if self.explosion_timer == 0 {
                self.detonated = true;
                out.sounds.push(Sound::Explosion);
                log::debug!("suicide enemy {} detonated", self.body.id());
            }
            return;
        }

        let (_, distance) = direction_to(self.body.position(), ctx.player);
        if distance < TRIGGER_RADIUS {
            self.is_exploding = true;
            self.explosion_timer = FUSE_FRAMES;
            return;
        }
        let _ = self.body.seek(ctx.player, &ctx.arena);
    }

    fn explosion(&self) -> Option<Explosion> {
        self.detonated.then(|| Explosion {
            center: self.body.position(),
            radius: EXPLOSION_RADIUS,
            damage: self.body.damage(),
        })
    }

    fn is_finished(&self) -> bool {
        self.detonated || self.is_dead()
    }
}
