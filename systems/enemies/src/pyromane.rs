//! Area-denial enemy orbiting the player and telegraphing fire zones.

use std::time::Duration;

use arena_survival_core::{
    geometry::{direction_to, unit_from_angle},
    seeded_rng, EnemyId, EnemyKind, GameRng, Sound, TickContext, Vec2,
};
use arena_survival_system_projectiles::{FirePreview, FireZone};
use rand::Rng;

use crate::{Emissions, Enemy, EnemyBody, EnemyStats, Hostile};

const ENGAGE_RANGE: f32 = 350.0;
const ORBIT_RADIUS: f32 = 180.0;
const ORBIT_ANGULAR_SPEED: f32 = 0.02;
const ZONE_COOLDOWN_FRAMES: u32 = 180;
const ZONES_PER_CAST: usize = 2;
const ZONE_OFFSET_MIN: f32 = 40.0;
const ZONE_OFFSET_MAX: f32 = 120.0;
const ZONE_MIN_SEPARATION: f32 = 80.0;
const PLACEMENT_ATTEMPTS: u32 = 8;
const COMPASS_POINTS: usize = 16;
const PREVIEW_FRAMES: u32 = 60;
const ZONE_RADIUS: f32 = 45.0;
const ZONE_LIFETIME_FRAMES: u32 = 300;
const ZONE_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Whether the pyromane is still closing in or already circling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PyromaneMode {
    /// Walking toward the player.
    Approaching,
    /// Circling the player at a fixed radius.
    Orbiting {
        /// Current angle around the player, in radians.
        angle: f32,
    },
}

/// Orbits the player and periodically places pairs of fire zones around them.
///
/// `damage` of the stats is the contact damage; zone damage per tick is half of it.
#[derive(Clone, Debug)]
pub struct Pyromane {
    body: EnemyBody,
    mode: PyromaneMode,
    zone_timer: u32,
    previews: Vec<FirePreview>,
    rng: GameRng,
}

impl Pyromane {
    /// Stats on floor 1.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 2.0,
        health: 60.0,
        damage: 12.0,
        radius: 16.0,
    };

    /// Creates a pyromane whose zone placement is driven by `seed`.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats, seed: u64) -> Self {
        Self {
            body: EnemyBody::new(id, position, stats),
            mode: PyromaneMode::Approaching,
            zone_timer: ZONE_COOLDOWN_FRAMES,
            previews: Vec::new(),
            rng: seeded_rng(seed),
        }
    }

    /// Current movement mode.
    #[must_use]
    pub const fn mode(&self) -> PyromaneMode {
        self.mode
    }

    /// Frames until the next pair of zones is scheduled.
    #[must_use]
    pub const fn zone_timer(&self) -> u32 {
        self.zone_timer
    }

    fn move_around(&mut self, ctx: &TickContext) {
        match self.mode {
            PyromaneMode::Approaching => {
                let distance = self.body.seek(ctx.player, &ctx.arena);
                if distance <= ENGAGE_RANGE {
                    let offset = self.body.position() - ctx.player;
                    self.mode = PyromaneMode::Orbiting {
                        angle: offset.y.atan2(offset.x),
                    };
                    log::trace!("pyromane {} started orbiting", self.body.id());
                }
            }
            PyromaneMode::Orbiting { angle } => {
                let angle = angle + ORBIT_ANGULAR_SPEED;
                self.mode = PyromaneMode::Orbiting { angle };
                let slot = ctx.player + unit_from_angle(angle) * ORBIT_RADIUS;
                let _ = self.body.seek(slot, &ctx.arena);
            }
        }
    }

    fn random_offset(&mut self) -> Vec2 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let length = self.rng.gen_range(ZONE_OFFSET_MIN..=ZONE_OFFSET_MAX);
        unit_from_angle(angle) * length
    }

    fn schedule_zones(&mut self, ctx: &TickContext) {
        let place = |offset: Vec2| ctx.arena.clamp_circle(ctx.player + offset, ZONE_RADIUS);
        let mut positions: Vec<Vec2> = Vec::with_capacity(ZONES_PER_CAST);
        while positions.len() < ZONES_PER_CAST {
            let mut placed = None;
            for _ in 0..PLACEMENT_ATTEMPTS {
                let candidate = place(self.random_offset());
                if positions
                    .iter()
                    .all(|other| other.distance(candidate) >= ZONE_MIN_SEPARATION)
                {
                    placed = Some(candidate);
                    break;
                }
            }
            match placed {
                Some(position) => positions.push(position),
                None => {
                    positions = spread_layout(place);
                    break;
                }
            }
        }

        for position in positions {
            self.previews
                .push(FirePreview::new(position, ZONE_RADIUS, PREVIEW_FRAMES));
        }
    }

    fn ignite_due_previews(&mut self, out: &mut Emissions) {
        let zone_damage = self.body.damage() / 2.0;
        self.previews.retain_mut(|preview| {
            if !preview.tick() {
                return true;
            }
            out.zones.push(FireZone::new(
                preview.position(),
                preview.radius(),
                zone_damage,
                ZONE_LIFETIME_FRAMES,
                ZONE_TICK_INTERVAL,
            ));
            out.sounds.push(Sound::FireZoneIgnited);
            false
        });
    }
}

/// Widest pair of zone positions on a fixed compass around the player.
fn spread_layout(place: impl Fn(Vec2) -> Vec2) -> Vec<Vec2> {
    let compass: Vec<Vec2> = (0..COMPASS_POINTS)
        .map(|point| {
            let angle = std::f32::consts::TAU * point as f32 / COMPASS_POINTS as f32;
            place(unit_from_angle(angle) * ZONE_OFFSET_MAX)
        })
        .collect();
    let mut best = (compass[0], compass[0]);
    for (index, first) in compass.iter().enumerate() {
        for second in &compass[index + 1..] {
            if first.distance(*second) > best.0.distance(best.1) {
                best = (*first, *second);
            }
        }
    }
    vec![best.0, best.1]
}

impl Hostile for Pyromane {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Pyromane
    }
}

impl Enemy for Pyromane {
    fn update(&mut self, ctx: &TickContext, out: &mut Emissions) {
        self.move_around(ctx);
        self.ignite_due_previews(out);

        let (_, distance) = direction_to(self.body.position(), ctx.player);
        if distance > ENGAGE_RANGE + ORBIT_RADIUS {
            return;
        }
        if self.zone_timer > 0 {
            self.zone_timer -= 1;
        } else {
            self.schedule_zones(ctx);
            self.zone_timer = ZONE_COOLDOWN_FRAMES;
        }
    }

    fn pending_zones(&self) -> &[FirePreview] {
        &self.previews
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_survival_core::ArenaRect;

    fn context(player: Vec2) -> TickContext {
        TickContext {
            player,
            arena: ArenaRect::new(1000.0, 1000.0),
            now: Duration::ZERO,
            frame: 0,
        }
    }

    #[test]
    fn scheduled_zones_are_separated() {
        for seed in 0..32 {
            let mut pyromane = Pyromane::new(
                EnemyId::new(1),
                Vec2::new(600.0, 500.0),
                Pyromane::BASE_STATS,
                seed,
            );
            pyromane.schedule_zones(&context(Vec2::new(500.0, 500.0)));
            let zones = pyromane.pending_zones();
            assert_eq!(zones.len(), ZONES_PER_CAST);
            let separation = zones[0].position().distance(zones[1].position());
            assert!(separation >= ZONE_MIN_SEPARATION - 1e-3);
        }
    }

    #[test]
    fn zones_stay_separated_against_walls_and_corners() {
        let players = [
            Vec2::new(20.0, 20.0),
            Vec2::new(980.0, 20.0),
            Vec2::new(980.0, 980.0),
            Vec2::new(20.0, 980.0),
            Vec2::new(500.0, 5.0),
        ];
        for player in players {
            for seed in 0..64 {
                let mut pyromane =
                    Pyromane::new(EnemyId::new(1), player, Pyromane::BASE_STATS, seed);
                let ctx = context(player);
                pyromane.schedule_zones(&ctx);
                let zones = pyromane.pending_zones();
                assert_eq!(zones.len(), ZONES_PER_CAST);
                for zone in zones {
                    assert_eq!(
                        ctx.arena.clamp_circle(zone.position(), ZONE_RADIUS),
                        zone.position()
                    );
                }
                let separation = zones[0].position().distance(zones[1].position());
                assert!(
                    separation >= ZONE_MIN_SEPARATION,
                    "zones {separation} apart near {player:?} with seed {seed}"
                );
            }
        }
    }
}
