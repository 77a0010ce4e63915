#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state and the per-frame combat loop.
//!
//! [`World::tick`] advances every entity by one frame in a fixed order:
//! player, enemies, bosses, projectiles and fire zones, collision
//! resolution, and finally the wave state machine. Rendering and audio are
//! reached only through the sinks passed in by the caller.

use std::time::Duration;

use arena_survival_core::{
    ArenaBounds, ArenaRect, AudioSink, EntityVisual, RenderSink, Settings, Sound, TickContext,
    Vec2, FRAME_DURATION,
};
use arena_survival_system_boss::Boss;
use arena_survival_system_enemies::{Emissions, Enemy, Hostile};
use arena_survival_system_projectiles::{advance_all, FireZone, Projectile};
use arena_survival_system_spawning::{FloorConfig, Spawn, WaveManager, WavePhase};
use arena_survival_system_wave_generation::WaveTableError;

pub mod player;

pub use player::{FrameInput, Player, Weapon};

/// Summary of a single [`World::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the simulated frame.
    pub frame: u64,
    /// Whether the player has no health left.
    pub player_dead: bool,
    /// Wave phase after the tick.
    pub phase: WavePhase,
    /// Whether the floor was cleared during this tick.
    pub floor_cleared: bool,
    /// Enemies and bosses removed during this tick.
    pub kills: u32,
}

/// Authoritative arena state.
#[derive(Debug)]
pub struct World {
    settings: Settings,
    player: Player,
    enemies: Vec<Box<dyn Enemy>>,
    bosses: Vec<Boss>,
    player_projectiles: Vec<Projectile>,
    enemy_projectiles: Vec<Projectile>,
    zones: Vec<FireZone>,
    manager: WaveManager,
    now: Duration,
    frame: u64,
    emissions: Emissions,
    spawns: Vec<Spawn>,
}

impl World {
    /// Creates a world on floor 1 with the player at the centre of `arena`.
    pub fn new(settings: Settings, arena: ArenaRect) -> Result<Self, WaveTableError> {
        let manager = WaveManager::new(&settings, settings.seed)?;
        let player = Player::new(arena.center(), &settings.player, settings.weapon.clone());
        log::debug!("world created with seed {:#x}", settings.seed);
        Ok(Self {
            settings,
            player,
            enemies: Vec::new(),
            bosses: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            zones: Vec::new(),
            manager,
            now: Duration::ZERO,
            frame: 0,
            emissions: Emissions::new(),
            spawns: Vec::new(),
        })
    }

    /// Advances the simulation by one frame.
    ///
    /// The arena is read once from `bounds` at the start of the frame so that
    /// a resized window takes effect immediately. A dead player freezes the
    /// simulation.
    pub fn tick(
        &mut self,
        input: &FrameInput,
        bounds: &dyn ArenaBounds,
        audio: &mut dyn AudioSink,
    ) -> TickReport {
        if self.player.is_dead() {
            return self.report(false, 0);
        }
        let arena = bounds.bounds();

        if self
            .player
            .update(input, &arena, &mut self.player_projectiles)
        {
            audio.play_sound(Sound::PlayerShot);
        }

        let ctx = TickContext {
            player: self.player.position(),
            arena,
            now: self.now,
            frame: self.frame,
        };
        self.update_hostiles(&ctx);
        self.flush_emissions(audio);

        advance_all(&mut self.player_projectiles, &arena, None);
        advance_all(&mut self.enemy_projectiles, &arena, Some(ctx.player));
        self.zones.retain_mut(FireZone::update);

        self.resolve_player_hits();
        self.resolve_damage_to_player(audio);
        let kills = self.remove_dead();

        let mut floor_cleared = false;
        match self.manager.update(self.now, &arena, &mut self.spawns) {
            Some(WavePhase::InWave) => audio.play_sound(Sound::WaveStart),
            Some(WavePhase::AllCleared) => {
                floor_cleared = true;
                audio.play_sound(Sound::FloorCleared);
                log::debug!("floor {} cleared at frame {}", self.floor(), self.frame);
            }
            _ => {}
        }
        for spawn in self.spawns.drain(..) {
            match spawn {
                Spawn::Enemy(enemy) => {
                    self.enemies.push(enemy);
                    audio.play_sound(Sound::EnemySpawn);
                }
                Spawn::Boss(boss) => {
                    self.bosses.push(*boss);
                    audio.play_sound(Sound::BossSpawn);
                }
            }
        }

        let report = self.report(floor_cleared, kills);
        self.frame += 1;
        self.now += FRAME_DURATION;
        log::trace!(
            "frame {}: {} enemies, {} bosses, {} enemy projectiles",
            report.frame,
            self.enemies.len(),
            self.bosses.len(),
            self.enemy_projectiles.len()
        );
        report
    }

    /// Draws every entity, pending fire zone previews included.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        for zone in &self.zones {
            sink.draw(&zone.snapshot());
        }
        for enemy in &self.enemies {
            for preview in enemy.pending_zones() {
                sink.draw(&preview.snapshot());
            }
        }
        for enemy in &self.enemies {
            sink.draw(&enemy.snapshot());
        }
        for boss in &self.bosses {
            sink.draw(&boss.snapshot());
        }
        for projectile in &self.enemy_projectiles {
            sink.draw(&projectile.snapshot(EntityVisual::EnemyProjectile));
        }
        for projectile in &self.player_projectiles {
            sink.draw(&projectile.snapshot(EntityVisual::PlayerProjectile));
        }
        sink.draw(&self.player.snapshot());
    }

    /// Discards every entity and timer and sets up the next floor.
    ///
    /// The player keeps its health and position.
    pub fn advance_floor(&mut self) {
        self.enemies.clear();
        self.bosses.clear();
        self.player_projectiles.clear();
        self.enemy_projectiles.clear();
        self.zones.clear();
        self.spawns.clear();
        self.emissions = Emissions::new();
        let floor = self.floor().saturating_add(1);
        self.manager
            .setup_floor(FloorConfig::from_settings(floor, &self.settings.boss), self.now);
        log::debug!("advanced to floor {floor}");
    }

    /// One-based number of the current floor.
    #[must_use]
    pub fn floor(&self) -> u32 {
        self.manager.floor().floor
    }

    /// Simulation clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    fn report(&self, floor_cleared: bool, kills: u32) -> TickReport {
        TickReport {
            frame: self.frame,
            player_dead: self.player.is_dead(),
            phase: self.manager.phase(),
            floor_cleared,
            kills,
        }
    }

    fn update_hostiles(&mut self, ctx: &TickContext) {
        for enemy in &mut self.enemies {
            enemy.update(ctx, &mut self.emissions);
        }
        let mut children = Vec::new();
        for boss in &mut self.bosses {
            if let Some(mut event) = boss.update(ctx, &mut self.emissions) {
                self.manager.adopt_division(&mut event);
                children.extend(event.children);
            }
        }
        self.bosses.append(&mut children);
    }

    fn flush_emissions(&mut self, audio: &mut dyn AudioSink) {
        self.enemy_projectiles
            .append(&mut self.emissions.projectiles);
        self.zones.append(&mut self.emissions.zones);
        for sound in self.emissions.sounds.drain(..) {
            audio.play_sound(sound);
        }
    }

    /// Player projectiles hit the first enemy or boss they overlap and are
    /// consumed by the hit.
    fn resolve_player_hits(&mut self) {
        let enemies = &mut self.enemies;
        let bosses = &mut self.bosses;
        self.player_projectiles.retain(|projectile| {
            for enemy in enemies.iter_mut() {
                if !enemy.is_dead() && projectile.hits(enemy.position(), enemy.radius()) {
                    let _ = enemy.take_damage(projectile.damage());
                    return false;
                }
            }
            for boss in bosses.iter_mut() {
                if !boss.is_dead() && projectile.hits(boss.position(), boss.radius()) {
                    let _ = boss.take_damage(projectile.damage());
                    return false;
                }
            }
            true
        });
    }

    fn resolve_damage_to_player(&mut self, audio: &mut dyn AudioSink) {
        let center = self.player.position();
        let radius = self.player.radius();
        let mut incoming = Vec::new();

        self.enemy_projectiles.retain(|projectile| {
            if projectile.hits(center, radius) {
                incoming.push(projectile.damage());
                false
            } else {
                true
            }
        });

        incoming.extend(
            self.enemies
                .iter()
                .filter_map(|enemy| contact_damage(enemy.as_ref(), center, radius)),
        );
        incoming.extend(
            self.bosses
                .iter()
                .filter_map(|boss| contact_damage(boss, center, radius)),
        );

        for zone in &mut self.zones {
            if let Some(damage) = zone.try_damage(center, radius, self.now) {
                incoming.push(damage);
            }
        }

        let blasts = self
            .enemies
            .iter()
            .filter_map(|enemy| enemy.explosion())
            .filter(|explosion| explosion.center.distance(center) <= explosion.radius + radius);
        for explosion in blasts {
            if self.player.take_explosion(explosion.damage) {
                audio.play_sound(Sound::PlayerHurt);
                log::trace!(
                    "player caught a {:.1} blast, {:.1} left",
                    explosion.damage,
                    self.player.health()
                );
            }
        }

        let strongest = incoming.into_iter().reduce(f32::max);
        if let Some(damage) = strongest {
            if self.player.take_damage(damage) {
                audio.play_sound(Sound::PlayerHurt);
                log::trace!("player took {damage:.1}, {:.1} left", self.player.health());
            }
        }
        if self.player.is_dead() {
            log::debug!("player died on floor {} at frame {}", self.floor(), self.frame);
        }
    }

    fn remove_dead(&mut self) -> u32 {
        let mut kills = 0;
        let manager = &mut self.manager;
        self.enemies.retain(|enemy| {
            if enemy.is_finished() {
                manager.on_enemy_died(enemy.id());
                kills += 1;
                false
            } else {
                true
            }
        });
        self.bosses.retain(|boss| {
            if boss.is_dead() {
                manager.on_enemy_died(boss.id());
                kills += 1;
                false
            } else {
                true
            }
        });
        kills
    }
}

/// Contact damage dealt by `hostile` to a circle it touches.
fn contact_damage<H: Hostile + ?Sized>(hostile: &H, center: Vec2, radius: f32) -> Option<f32> {
    let touching = hostile.position().distance(center) <= hostile.radius() + radius;
    let damage = hostile.contact_damage();
    (touching && !hostile.is_dead() && damage > 0.0).then_some(damage)
}

/// Read-only queries over the world state.
pub mod query {
    use arena_survival_core::Vec2;
    use arena_survival_system_boss::Boss;
    use arena_survival_system_enemies::{Enemy, Hostile};
    use arena_survival_system_projectiles::{FireZone, Projectile};
    use arena_survival_system_spawning::WaveManager;

    use super::{Player, World};

    /// The player avatar.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Regular enemies in spawn order.
    pub fn enemies(world: &World) -> impl Iterator<Item = &dyn Enemy> {
        world.enemies.iter().map(|enemy| enemy.as_ref())
    }

    /// Bosses in the arena, division children included.
    #[must_use]
    pub fn bosses(world: &World) -> &[Boss] {
        &world.bosses
    }

    /// Projectiles fired by enemies and bosses.
    #[must_use]
    pub fn enemy_projectiles(world: &World) -> &[Projectile] {
        &world.enemy_projectiles
    }

    /// Projectiles fired by the player.
    #[must_use]
    pub fn player_projectiles(world: &World) -> &[Projectile] {
        &world.player_projectiles
    }

    /// Live fire zones.
    #[must_use]
    pub fn fire_zones(world: &World) -> &[FireZone] {
        &world.zones
    }

    /// Wave orchestration state.
    #[must_use]
    pub fn wave_manager(world: &World) -> &WaveManager {
        &world.manager
    }

    /// Centre of the living hostile closest to the player.
    #[must_use]
    pub fn nearest_hostile(world: &World) -> Option<Vec2> {
        let origin = world.player.position();
        let enemies = world
            .enemies
            .iter()
            .filter(|enemy| !enemy.is_dead())
            .map(|enemy| enemy.position());
        let bosses = world
            .bosses
            .iter()
            .filter(|boss| !boss.is_dead())
            .map(|boss| boss.position());
        enemies
            .chain(bosses)
            .min_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)))
    }
}
