//! One-shot self-division of a boss lineage.

use arena_survival_core::Vec2;
use arena_survival_system_enemies::EnemyStats;

use crate::Boss;

/// Health ratio at or below which a dividable boss splits.
pub const DIVISION_HEALTH_RATIO: f32 = 0.5;
/// Fraction of the parent's current health given to each child.
pub const CHILD_HEALTH_RATIO: f32 = 0.4;
/// Fraction of the parent's damage given to each child.
pub const CHILD_DAMAGE_RATIO: f32 = 0.6;
/// Fraction of the parent's radius given to each child.
pub const CHILD_RADIUS_RATIO: f32 = 0.7;
/// Children are placed this many parent radii away from the parent.
pub const CHILD_OFFSET_RADII: f32 = 1.5;
/// Maximum number of phases a child may own.
pub const CHILD_MAX_PHASES: u8 = 2;

/// Everything needed to construct a division child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildSpec {
    /// Spawn position of the child.
    pub position: Vec2,
    /// Stats of the child; `health` is its maximum health.
    pub stats: EnemyStats,
    /// Phases the child owns.
    pub phase_count: u8,
    /// Seed of the child's random stream.
    pub seed: u64,
}

/// Constructor used to build division children.
pub type ChildFactory = fn(ChildSpec) -> Boss;

/// Two children produced by a division.
#[derive(Debug)]
pub struct DivisionEvent {
    /// The freshly built children. Their identifiers are assigned by the
    /// orchestrator that adopts them.
    pub children: [Boss; 2],
}

/// Per-boss division bookkeeping.
#[derive(Clone, Debug)]
pub struct BossDivisionSystem {
    can_divide: bool,
    has_divided: bool,
    cooldown: u32,
    factory: ChildFactory,
}

impl BossDivisionSystem {
    /// Creates the bookkeeping for a boss.
    ///
    /// `cooldown` frames must elapse before the boss may divide.
    #[must_use]
    pub fn new(can_divide: bool, cooldown: u32, factory: ChildFactory) -> Self {
        Self {
            can_divide,
            has_divided: false,
            cooldown,
            factory,
        }
    }

    /// Whether this boss is allowed to divide at all.
    #[must_use]
    pub const fn can_divide(&self) -> bool {
        self.can_divide
    }

    /// Whether this boss has already divided.
    #[must_use]
    pub const fn has_divided(&self) -> bool {
        self.has_divided
    }

    /// Frames left before division is allowed.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Counts the cooldown down by one frame.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Reports whether a boss at `health_ratio` should divide now.
    #[must_use]
    pub fn should_divide(&self, health_ratio: f32) -> bool {
        health_ratio <= DIVISION_HEALTH_RATIO
            && self.can_divide
            && !self.has_divided
            && self.cooldown == 0
    }

    /// Builds both children and exhausts the system.
    ///
    /// Returns `None` when the lineage has already divided.
    pub fn divide(&mut self, specs: [ChildSpec; 2]) -> Option<DivisionEvent> {
        if !self.can_divide || self.has_divided {
            return None;
        }
        self.has_divided = true;
        self.can_divide = false;
        let [first, second] = specs;
        Some(DivisionEvent {
            children: [(self.factory)(first), (self.factory)(second)],
        })
    }
}

/// Phases owned by a child of a parent with `parent_phases` phases.
#[must_use]
pub fn child_phase_count(parent_phases: u8) -> u8 {
    parent_phases
        .saturating_sub(1)
        .min(CHILD_MAX_PHASES)
        .max(1)
}
