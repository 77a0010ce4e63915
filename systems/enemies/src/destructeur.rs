//! Slow mini-boss firing rings of projectiles.

use std::f32::consts::TAU;

use arena_survival_core::{
    geometry::{direction_to, unit_from_angle},
    EnemyId, EnemyKind, Rgb, Sound, TickContext, Vec2,
};
use arena_survival_system_projectiles::Projectile;

use crate::{Emissions, Enemy, EnemyBody, EnemyStats, Hostile};

const STANDOFF_DISTANCE: f32 = 220.0;
const RING_COOLDOWN_FRAMES: u32 = 120;
const RING_PROJECTILES: u32 = 16;
const PROJECTILE_SPEED: f32 = 3.5;
const PROJECTILE_RADIUS: f32 = 6.0;
const PROJECTILE_LIFETIME_FRAMES: u32 = 240;

/// Mini-boss that parks at a distance and fires 360° rings.
#[derive(Clone, Debug, PartialEq)]
pub struct Destructeur {
    body: EnemyBody,
    ring_timer: u32,
}

impl Destructeur {
    /// Stats on floor 1. `damage` applies to contact and to every ring shot.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 1.2,
        health: 200.0,
        damage: 15.0,
        radius: 30.0,
    };

    /// Creates a destructeur whose first ring comes after half a cooldown.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats) -> Self {
        Self {
            body: EnemyBody::new(id, position, stats),
            ring_timer: RING_COOLDOWN_FRAMES / 2,
        }
    }

    /// Frames until the next ring.
    #[must_use]
    pub const fn ring_timer(&self) -> u32 {
        self.ring_timer
    }

    fn fire_ring(&self, out: &mut Emissions) {
        for index in 0..RING_PROJECTILES {
            let angle = TAU * index as f32 / RING_PROJECTILES as f32;
            out.projectiles.push(Projectile::new(
                self.body.position(),
                unit_from_angle(angle) * PROJECTILE_SPEED,
                self.body.damage(),
                PROJECTILE_RADIUS,
                PROJECTILE_LIFETIME_FRAMES,
                Rgb::from_hue(angle.to_degrees()),
            ));
        }
        out.sounds.push(Sound::EnemyShot);
    }
}

impl Hostile for Destructeur {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Destructeur
    }
}

impl Enemy for Destructeur {
    fn update(&mut self, ctx: &TickContext, out: &mut Emissions) {
        let (direction, distance) = direction_to(self.body.position(), ctx.player);
        let approach = (distance - STANDOFF_DISTANCE).clamp(0.0, self.body.speed());
        self.body.step(direction, approach, &ctx.arena);

        if self.ring_timer > 0 {
            self.ring_timer -= 1;
        } else {
            self.fire_ring(out);
            self.ring_timer = RING_COOLDOWN_FRAMES;
        }
    }
}
