//! Construction of enemies and bosses with floor-scaled stats.

use arena_survival_core::{derive_seed, BossSettings, EnemyId, EnemyKind, Vec2};
use arena_survival_system_boss::{phases_for_floor, Boss, BossSpec};
use arena_survival_system_enemies::{
    Basic, Charger, Destructeur, Enemy, EnemyStats, Pyromane, Shooter, Suicide,
};

/// Health gained by every enemy per floor past the first.
pub const HEALTH_GROWTH_PER_FLOOR: f32 = 0.15;
/// Damage gained by every enemy per floor past the first.
pub const DAMAGE_GROWTH_PER_FLOOR: f32 = 0.10;

const ENEMY_SEED_LABEL: &str = "enemy";
const BOSS_SEED_LABEL: &str = "boss";

/// Instantiates enemy variants from their kind.
#[derive(Clone, Copy, Debug)]
pub struct EnemyFactory {
    seed: u64,
}

impl EnemyFactory {
    /// Creates a factory deriving per-enemy seeds from `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Scales `base` to the provided floor.
    #[must_use]
    pub fn floor_stats(base: EnemyStats, floor: u32) -> EnemyStats {
        let steps = floor.max(1).saturating_sub(1) as f32;
        base.scaled(
            1.0 + HEALTH_GROWTH_PER_FLOOR * steps,
            1.0 + DAMAGE_GROWTH_PER_FLOOR * steps,
        )
    }

    /// Builds a regular enemy of the provided kind.
    ///
    /// Bosses are built through [`EnemyFactory::create_boss`]; asking for one
    /// here is a programming error that asserts in debug builds and yields a
    /// basic enemy otherwise.
    #[must_use]
    pub fn create(
        &self,
        kind: EnemyKind,
        id: EnemyId,
        position: Vec2,
        floor: u32,
    ) -> Box<dyn Enemy> {
        match kind {
            EnemyKind::Basic => Box::new(Basic::new(
                id,
                position,
                Self::floor_stats(Basic::BASE_STATS, floor),
            )),
            EnemyKind::Charger => Box::new(Charger::new(
                id,
                position,
                Self::floor_stats(Charger::BASE_STATS, floor),
            )),
            EnemyKind::Shooter => Box::new(Shooter::new(
                id,
                position,
                Self::floor_stats(Shooter::BASE_STATS, floor),
            )),
            EnemyKind::Suicide => Box::new(Suicide::new(
                id,
                position,
                Self::floor_stats(Suicide::BASE_STATS, floor),
            )),
            EnemyKind::Destructeur => Box::new(Destructeur::new(
                id,
                position,
                Self::floor_stats(Destructeur::BASE_STATS, floor),
            )),
            EnemyKind::Pyromane => Box::new(Pyromane::new(
                id,
                position,
                Self::floor_stats(Pyromane::BASE_STATS, floor),
                derive_seed(self.seed, ENEMY_SEED_LABEL, u64::from(id.get())),
            )),
            EnemyKind::Boss => {
                debug_assert!(false, "bosses are not built as regular enemies");
                log::warn!("boss requested as a regular enemy; spawning a basic enemy instead");
                self.create(EnemyKind::Basic, id, position, floor)
            }
        }
    }

    /// Builds a regular enemy from its roster token.
    #[must_use]
    pub fn create_from_token(
        &self,
        token: &str,
        id: EnemyId,
        position: Vec2,
        floor: u32,
    ) -> Box<dyn Enemy> {
        self.create(EnemyKind::from_token_or_basic(token), id, position, floor)
    }

    /// Builds the dividable boss guarding the provided floor.
    #[must_use]
    pub fn create_boss(
        &self,
        id: EnemyId,
        position: Vec2,
        floor: u32,
        settings: &BossSettings,
    ) -> Boss {
        Boss::new(
            id,
            position,
            BossSpec {
                stats: Self::floor_stats(Boss::BASE_STATS, floor),
                phase_count: phases_for_floor(floor),
                seed: derive_seed(self.seed, BOSS_SEED_LABEL, u64::from(floor)),
                can_divide: true,
                division_cooldown: settings.division_cooldown_frames,
            },
        )
    }
}
