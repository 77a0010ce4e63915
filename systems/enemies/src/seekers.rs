//! Melee enemies that walk straight at the player.

use arena_survival_core::{EnemyId, EnemyKind, TickContext, Vec2};

use crate::{Emissions, Enemy, EnemyBody, EnemyStats, Hostile};

/// Slow, sturdy melee seeker.
#[derive(Clone, Debug, PartialEq)]
pub struct Basic {
    body: EnemyBody,
}

impl Basic {
    /// Stats on floor 1.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 2.0,
        health: 30.0,
        damage: 10.0,
        radius: 15.0,
    };

    /// Creates a basic enemy.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats) -> Self {
        Self {
            body: EnemyBody::new(id, position, stats),
        }
    }
}

impl Hostile for Basic {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Basic
    }
}

impl Enemy for Basic {
    fn update(&mut self, ctx: &TickContext, _out: &mut Emissions) {
        let _ = self.body.seek(ctx.player, &ctx.arena);
    }
}

/// Fast, fragile melee seeker.
#[derive(Clone, Debug, PartialEq)]
pub struct Charger {
    body: EnemyBody,
}

impl Charger {
    /// Stats on floor 1.
    pub const BASE_STATS: EnemyStats = EnemyStats {
        speed: 4.0,
        health: 20.0,
        damage: 15.0,
        radius: 12.0,
    };

    /// Creates a charger.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec2, stats: EnemyStats) -> Self {
        Self {
            body: EnemyBody::new(id, position, stats),
        }
    }
}

impl Hostile for Charger {
    fn body(&self) -> &EnemyBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut EnemyBody {
        &mut self.body
    }

    fn kind(&self) -> EnemyKind {
        EnemyKind::Charger
    }
}

impl Enemy for Charger {
    fn update(&mut self, ctx: &TickContext, _out: &mut Emissions) {
        let _ = self.body.seek(ctx.player, &ctx.arena);
    }
}
