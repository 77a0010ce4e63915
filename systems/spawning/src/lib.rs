#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave orchestration for a floor of the arena.
//!
//! The [`WaveManager`] decides when the next roster of the floor enters the
//! arena, where every enemy appears, and when the floor boss takes over. It
//! never owns the spawned entities: they are handed to the caller through a
//! `&mut Vec<Spawn>` buffer and reported back through
//! [`WaveManager::on_enemy_died`] once the caller removes them.

use std::{collections::BTreeSet, time::Duration};

use arena_survival_core::{
    derive_seed, seeded_rng, ArenaRect, BossSettings, EnemyId, GameRng, Settings, Vec2,
    WaveSettings,
};
use arena_survival_system_boss::{Boss, DivisionEvent};
use arena_survival_system_enemies::{Enemy, Hostile};
use arena_survival_system_wave_generation::{WaveQueue, WaveTable, WaveTableError};
use rand::Rng;

pub mod factory;

pub use factory::EnemyFactory;

const SPAWN_SEED_LABEL: &str = "spawn-positions";
const FACTORY_SEED_LABEL: &str = "enemy-factory";

/// Lifecycle of the current floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Waiting for the inter-wave delay before the next roster or the boss.
    BetweenWaves,
    /// A roster is in the arena.
    InWave,
    /// The floor boss, or what is left of its lineage, is in the arena.
    BossWave,
    /// Every roster and the boss wave have been cleared.
    AllCleared,
}

/// Description of the floor to orchestrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorConfig {
    /// One-based floor number.
    pub floor: u32,
    /// Whether a boss closes the floor.
    pub has_boss: bool,
}

impl FloorConfig {
    /// Builds the configuration of `floor` from the boss schedule.
    #[must_use]
    pub fn from_settings(floor: u32, boss: &BossSettings) -> Self {
        Self {
            floor,
            has_boss: boss.floor_has_boss(floor),
        }
    }
}

/// Entity handed to the caller by [`WaveManager::update`].
#[derive(Debug)]
pub enum Spawn {
    /// A regular wave enemy.
    Enemy(Box<dyn Enemy>),
    /// The floor boss.
    Boss(Box<Boss>),
}

/// Floor-level spawn orchestrator.
#[derive(Debug)]
pub struct WaveManager {
    waves: WaveSettings,
    boss: BossSettings,
    seed: u64,
    queue: WaveQueue,
    factory: EnemyFactory,
    rng: GameRng,
    phase: WavePhase,
    floor: FloorConfig,
    boss_spawned: bool,
    live: BTreeSet<EnemyId>,
    bosses: BTreeSet<EnemyId>,
    next_id: u32,
    idle_since: Duration,
}

impl WaveManager {
    /// Creates a manager for the provided settings and run seed.
    ///
    /// The manager starts on floor 1, waiting for its first wave.
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, WaveTableError> {
        let table = WaveTable::from_settings(&settings.waves)?;
        let floor = FloorConfig::from_settings(1, &settings.boss);
        let mut manager = Self {
            waves: settings.waves.clone(),
            boss: settings.boss.clone(),
            seed,
            queue: WaveQueue::new(table, seed),
            factory: EnemyFactory::new(derive_seed(seed, FACTORY_SEED_LABEL, 0)),
            rng: seeded_rng(derive_seed(seed, SPAWN_SEED_LABEL, 0)),
            phase: WavePhase::BetweenWaves,
            floor,
            boss_spawned: false,
            live: BTreeSet::new(),
            bosses: BTreeSet::new(),
            next_id: 1,
            idle_since: Duration::ZERO,
        };
        manager.setup_floor(floor, Duration::ZERO);
        Ok(manager)
    }

    /// Discards every tracked entity and timer and prepares `config`.
    ///
    /// Identifiers keep increasing across floors so that stale deaths
    /// reported after a floor change never match a new entity.
    pub fn setup_floor(&mut self, config: FloorConfig, now: Duration) {
        self.floor = config;
        self.phase = WavePhase::BetweenWaves;
        self.boss_spawned = false;
        self.live.clear();
        self.bosses.clear();
        self.idle_since = now;
        self.rng = seeded_rng(derive_seed(
            self.seed,
            SPAWN_SEED_LABEL,
            u64::from(config.floor),
        ));
        self.queue
            .setup_waves_for_floor(config.floor, self.waves.waves_per_floor);
        log::debug!(
            "floor {} set up with {} waves{}",
            config.floor,
            self.queue.remaining(),
            if config.has_boss { " and a boss" } else { "" }
        );
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Floor being orchestrated.
    #[must_use]
    pub const fn floor(&self) -> FloorConfig {
        self.floor
    }

    /// Live regular enemies attributable to the active wave.
    #[must_use]
    pub fn enemies_remaining(&self) -> usize {
        self.live.len()
    }

    /// Live members of the boss lineage, division children included.
    #[must_use]
    pub fn bosses_remaining(&self) -> usize {
        self.bosses.len()
    }

    /// Rosters not yet spawned on this floor.
    #[must_use]
    pub fn waves_remaining(&self) -> usize {
        self.queue.remaining()
    }

    /// Reports whether the floor boss still has to appear.
    #[must_use]
    pub const fn boss_pending(&self) -> bool {
        self.floor.has_boss && !self.boss_spawned
    }

    /// Evaluates the wave state machine once.
    ///
    /// Newly spawned entities are appended to `out`. Returns the phase
    /// entered by this call, if any.
    pub fn update(
        &mut self,
        now: Duration,
        arena: &ArenaRect,
        out: &mut Vec<Spawn>,
    ) -> Option<WavePhase> {
        let next = match self.phase {
            WavePhase::InWave if self.live.is_empty() => {
                self.idle_since = now;
                WavePhase::BetweenWaves
            }
            WavePhase::BossWave if self.bosses.is_empty() => WavePhase::AllCleared,
            WavePhase::BetweenWaves if self.live.is_empty() && self.bosses.is_empty() => {
                let rested = now.saturating_sub(self.idle_since) >= self.waves.inter_wave_delay();
                if !self.queue.is_empty() {
                    if !rested {
                        return None;
                    }
                    self.spawn_wave(arena, out);
                    WavePhase::InWave
                } else if self.boss_pending() {
                    if !rested {
                        return None;
                    }
                    self.spawn_boss(arena, out);
                    WavePhase::BossWave
                } else {
                    WavePhase::AllCleared
                }
            }
            _ => return None,
        };
        log::debug!(
            "floor {}: {:?} -> {:?} at {:?}",
            self.floor.floor,
            self.phase,
            next,
            now
        );
        self.phase = next;
        Some(next)
    }

    /// Forgets a removed enemy or boss. Unknown identifiers are ignored.
    pub fn on_enemy_died(&mut self, id: EnemyId) {
        if self.live.remove(&id) {
            log::trace!("enemy {id} died, {} left", self.live.len());
        } else if self.bosses.remove(&id) {
            log::debug!("boss {id} died, {} left in lineage", self.bosses.len());
        } else {
            log::trace!("ignoring death of untracked enemy {id}");
        }
    }

    /// Assigns identifiers to division children and tracks them as bosses.
    pub fn adopt_division(&mut self, event: &mut DivisionEvent) {
        for child in &mut event.children {
            let id = self.allocate_id();
            child.body_mut().set_id(id);
            let _ = self.bosses.insert(id);
            log::debug!("adopted division child {id}");
        }
    }

    fn allocate_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn spawn_wave(&mut self, arena: &ArenaRect, out: &mut Vec<Spawn>) {
        let Some(roster) = self.queue.get_next_wave() else {
            return;
        };
        let floor = self.floor.floor;
        for kind in roster.into_kinds() {
            let id = self.allocate_id();
            let position = self.spawn_position(arena);
            let enemy = self.factory.create(kind, id, position, floor);
            let _ = self.live.insert(id);
            out.push(Spawn::Enemy(enemy));
        }
        log::debug!(
            "floor {floor}: spawned {} enemies, {} waves left",
            self.live.len(),
            self.queue.remaining()
        );
    }

    fn spawn_boss(&mut self, arena: &ArenaRect, out: &mut Vec<Spawn>) {
        let id = self.allocate_id();
        let position = self.spawn_position(arena);
        let boss = self
            .factory
            .create_boss(id, position, self.floor.floor, &self.boss);
        self.boss_spawned = true;
        let _ = self.bosses.insert(id);
        log::debug!(
            "floor {}: boss {id} spawned with {} phases",
            self.floor.floor,
            boss.phases().len()
        );
        out.push(Spawn::Boss(Box::new(boss)));
    }

    /// Picks a point on a random arena edge away from the centre.
    ///
    /// After the configured number of rejected candidates any point of the
    /// arena is accepted.
    fn spawn_position(&mut self, arena: &ArenaRect) -> Vec2 {
        let margin = self.waves.spawn_margin;
        let min = arena.min() + Vec2::splat(margin);
        let max = arena.max() - Vec2::splat(margin);
        let center = arena.center();
        for _ in 0..self.waves.max_spawn_attempts {
            let candidate = match self.rng.gen_range(0..4) {
                0 => Vec2::new(span(&mut self.rng, min.x, max.x), min.y),
                1 => Vec2::new(max.x, span(&mut self.rng, min.y, max.y)),
                2 => Vec2::new(span(&mut self.rng, min.x, max.x), max.y),
                _ => Vec2::new(min.x, span(&mut self.rng, min.y, max.y)),
            };
            if candidate.distance(center) >= self.waves.center_exclusion_radius {
                return candidate;
            }
        }
        log::debug!("no edge spawn point outside the centre, using any arena point");
        Vec2::new(
            span(&mut self.rng, arena.min().x, arena.max().x),
            span(&mut self.rng, arena.min().y, arena.max().y),
        )
    }
}

fn span(rng: &mut GameRng, low: f32, high: f32) -> f32 {
    if low < high {
        rng.gen_range(low..=high)
    } else {
        (low + high) * 0.5
    }
}
