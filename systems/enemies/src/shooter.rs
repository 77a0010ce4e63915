//! Ranged enemy holding a stand-off distance.

use arena_survival_core::{
    geometry::direction_to, EnemyId, EnemyKind, Rgb, Sound, TickContext, Vec2,
};
use arena_survival_system_projectiles::Projectile;

use crate::{Emissions, Enemy, EnemyBody, EnemyStats, Hostile};

const ATTACK_RANGE: f32 = 300.0;
const RANGE_TOLERANCE: f32 = 50.0;
const FIRE_COOLDOWN_FRAMES: u32 = 90;
const PROJECTILE_SPEED: f32 = 5.0;
const PROJECTILE_RADIUS: f32 = 5.0;
const PROJECTILE_LIFETIME_FRAMES: u32 = 180;
const PROJECTILE_COLOR: Rgb = Rgb::from_rgb(0xff, 0xeb, 0x3b);

/// Keeps within `[attack_range - delta, attack_range]` of the player and
/// fires aimed shots while roughly in range.
#[derive(Clone, Debug, PartialEq)]
pub struct Shooter {
    body: EnemyBody,
    attack_range: f32,
    range_tolerance: f32,
    fire_cooldown: u32,
    fire_timer: u32,
}

impl Shooter {
    /// Stats on floor 1.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 1.5,
        health: 25.0,
        damage: 8.0,
        radius: 14.0,
    };

    /// Creates a shooter ready to fire on its first frame in range.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats) -> Self {
        Self {
            body: EnemyBody::new(id, position, stats),
            attack_range: ATTACK_RANGE,
            range_tolerance: RANGE_TOLERANCE,
            fire_cooldown: FIRE_COOLDOWN_FRAMES,
            fire_timer: 0,
        }
    }

    /// Preferred distance to the player.
    #[must_use]
    pub const fn attack_range(&self) -> f32 {
        self.attack_range
    }

    /// Width of the stand-off band below the attack range.
    #[must_use]
    pub const fn range_tolerance(&self) -> f32 {
        self.range_tolerance
    }

    /// Frames left before the next shot may be fired.
    #[must_use]
    pub const fn fire_timer(&self) -> u32 {
        self.fire_timer
    }

    fn in_firing_band(&self, distance: f32) -> bool {
        distance >= self.attack_range - 2.0 * self.range_tolerance
            && distance <= self.attack_range + self.range_tolerance
    }

    fn keep_distance(&mut self, ctx: &TickContext) {
        let (direction, distance) = direction_to(self.body.position(), ctx.player);
        if distance > self.attack_range {
            let approach = self.body.speed().min(distance - self.attack_range);
            self.body.step(direction, approach, &ctx.arena);
        } else if distance < self.attack_range - self.range_tolerance {
            self.body.flee(ctx.player, &ctx.arena);
        } else {
            self.body.clamp_to(&ctx.arena);
        }
    }
}

impl Hostile for Shooter {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Shooter
    }
}

impl Enemy for Shooter {
    fn update(&mut self, ctx: &TickContext, out: &mut Emissions) {
        self.keep_distance(ctx);

        if self.fire_timer > 0 {
            self.fire_timer -= 1;
            return;
        }
        let (direction, distance) = direction_to(self.body.position(), ctx.player);
        if !self.in_firing_band(distance) {
            return;
        }
        out.projectiles.push(Projectile::new(
            self.body.position(),
            direction * PROJECTILE_SPEED,
            self.body.damage(),
            PROJECTILE_RADIUS,
            PROJECTILE_LIFETIME_FRAMES,
            PROJECTILE_COLOR,
        ));
        out.sounds.push(Sound::EnemyShot);
        self.fire_timer = self.fire_cooldown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firing_band_is_wider_than_the_movement_band() {
        let shooter = Shooter::new(EnemyId::new(1), Vec2::ZERO, Shooter::BASE_STATS);
        assert!(shooter.in_firing_band(ATTACK_RANGE + RANGE_TOLERANCE));
        assert!(shooter.in_firing_band(ATTACK_RANGE - 2.0 * RANGE_TOLERANCE));
        assert!(!shooter.in_firing_band(ATTACK_RANGE + RANGE_TOLERANCE + 1.0));
        assert!(!shooter.in_firing_band(ATTACK_RANGE - 2.0 * RANGE_TOLERANCE - 1.0));
    }
}
