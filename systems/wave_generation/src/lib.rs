#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic weighted wave roster generation.
//!
//! A [`WaveQueue`] holds the rosters of the current floor in FIFO order. Each
//! floor draws from its own random stream derived from the run seed, so a
//! floor's rosters do not depend on how many floors were generated before it.

use std::collections::VecDeque;

use arena_survival_core::{
    derive_seed, seeded_rng, BracketWeights, EnemyKind, GameRng, WaveSettings,
};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use thiserror::Error;

/// Enemies added to a roster for every floor past the first.
pub const ENEMIES_PER_FLOOR: u32 = 2;
/// Fraction of a floor added to the effective floor of each later roster.
pub const ROSTER_FLOOR_STEP: f32 = 0.3;

const SEED_LABEL: &str = "wave-queue";

/// Errors raised while building a [`WaveTable`].
#[derive(Debug, Error)]
pub enum WaveTableError {
    /// No bracket was provided.
    #[error("wave table has no brackets")]
    NoBrackets,
    /// Rosters would always be empty.
    #[error("wave roster base count must be positive")]
    ZeroBaseCount,
    /// A bracket cannot be sampled.
    #[error("bracket {index} cannot be sampled: {source}")]
    InvalidBracket {
        /// Zero-based bracket index.
        index: usize,
        /// Reason reported by the sampler.
        #[source]
        source: WeightedError,
    },
}

/// Ordered list of enemy kinds spawned together as one wave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WaveRoster(Vec<EnemyKind>);

impl WaveRoster {
    /// Wraps the provided kinds.
    #[must_use]
    pub fn new(kinds: Vec<EnemyKind>) -> Self {
        Self(kinds)
    }

    /// Kinds in spawn order.
    #[must_use]
    pub fn kinds(&self) -> &[EnemyKind] {
        &self.0
    }

    /// Number of enemies in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the roster spawns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of enemies of the provided kind.
    #[must_use]
    pub fn count_of(&self, kind: EnemyKind) -> usize {
        self.0.iter().filter(|entry| **entry == kind).count()
    }

    /// Unwraps the roster into its kinds.
    #[must_use]
    pub fn into_kinds(self) -> Vec<EnemyKind> {
        self.0
    }
}

/// Validated weight tables keyed by floor bracket.
#[derive(Clone, Debug)]
pub struct WaveTable {
    base_count: u32,
    samplers: Vec<WeightedIndex<u32>>,
}

impl WaveTable {
    /// Builds a table from explicit brackets.
    ///
    /// Bracket `i` applies to floor `i + 1`; the last bracket covers every
    /// deeper floor.
    pub fn new(base_count: u32, brackets: &[BracketWeights]) -> Result<Self, WaveTableError> {
        if brackets.is_empty() {
            return Err(WaveTableError::NoBrackets);
        }
        if base_count == 0 {
            return Err(WaveTableError::ZeroBaseCount);
        }
        let samplers = brackets
            .iter()
            .enumerate()
            .map(|(index, bracket)| {
                WeightedIndex::new(EnemyKind::ROSTER.iter().map(|kind| bracket.weight(*kind)))
                    .map_err(|source| WaveTableError::InvalidBracket { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            base_count,
            samplers,
        })
    }

    /// Builds the table described by the wave settings.
    pub fn from_settings(settings: &WaveSettings) -> Result<Self, WaveTableError> {
        Self::new(settings.base_count, &settings.brackets)
    }

    /// Roster size on the provided floor.
    #[must_use]
    pub fn roster_size(&self, floor: u32) -> usize {
        let extra = floor.max(1).saturating_sub(1).saturating_mul(ENEMIES_PER_FLOOR);
        self.base_count.saturating_add(extra) as usize
    }

    fn sampler(&self, floor: u32) -> &WeightedIndex<u32> {
        let index = (floor.max(1) - 1) as usize;
        let last = self.samplers.len() - 1;
        &self.samplers[index.min(last)]
    }
}

/// FIFO of the rosters left on the current floor.
#[derive(Clone, Debug)]
pub struct WaveQueue {
    table: WaveTable,
    seed: u64,
    rng: GameRng,
    queue: VecDeque<WaveRoster>,
}

impl WaveQueue {
    /// Creates an empty queue drawing from `table`.
    #[must_use]
    pub fn new(table: WaveTable, seed: u64) -> Self {
        Self {
            table,
            seed,
            rng: seeded_rng(derive_seed(seed, SEED_LABEL, 0)),
            queue: VecDeque::new(),
        }
    }

    /// Draws one roster for the provided floor.
    ///
    /// Every slot is sampled independently from the floor's bracket.
    pub fn generate_wave(&mut self, floor: u32) -> WaveRoster {
        let size = self.table.roster_size(floor);
        let sampler = self.table.sampler(floor);
        let kinds = (0..size)
            .map(|_| EnemyKind::ROSTER[sampler.sample(&mut self.rng)])
            .collect();
        WaveRoster::new(kinds)
    }

    /// Replaces the queue with `count` rosters for the provided floor.
    ///
    /// Roster `i` is generated for the effective floor
    /// `floor(floor + i * 0.3)`, so later waves of a floor drift harder.
    pub fn setup_waves_for_floor(&mut self, floor: u32, count: usize) {
        self.rng = seeded_rng(derive_seed(self.seed, SEED_LABEL, u64::from(floor)));
        self.queue.clear();
        for index in 0..count {
            let effective = (floor as f32 + index as f32 * ROSTER_FLOOR_STEP).floor() as u32;
            let roster = self.generate_wave(effective);
            self.queue.push_back(roster);
        }
        log::debug!(
            "queued {} waves for floor {floor}: sizes {:?}",
            self.queue.len(),
            self.queue.iter().map(WaveRoster::len).collect::<Vec<_>>()
        );
    }

    /// Removes and returns the next roster.
    pub fn get_next_wave(&mut self) -> Option<WaveRoster> {
        self.queue.pop_front()
    }

    /// Rosters left on the floor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Reports whether every roster has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_clamp_at_the_last_entry() {
        let table = WaveTable::new(
            4,
            &[
                BracketWeights::from_array([1, 0, 0, 0, 0, 0]),
                BracketWeights::from_array([0, 0, 0, 0, 0, 1]),
            ],
        )
        .expect("valid table");
        let mut queue = WaveQueue::new(table, 1);
        assert!(queue
            .generate_wave(1)
            .kinds()
            .iter()
            .all(|kind| *kind == EnemyKind::Basic));
        assert!(queue
            .generate_wave(9)
            .kinds()
            .iter()
            .all(|kind| *kind == EnemyKind::Pyromane));
    }

    #[test]
    fn roster_grows_two_per_floor() {
        let table = WaveTable::from_settings(&WaveSettings::default()).expect("stock table");
        assert_eq!(table.roster_size(1), 8);
        assert_eq!(table.roster_size(2), 10);
        assert_eq!(table.roster_size(5), 16);
        assert_eq!(table.roster_size(0), 8);
    }

    #[test]
    fn zero_weight_bracket_is_rejected() {
        let error = WaveTable::new(3, &[BracketWeights::default()]).expect_err("no weights");
        assert!(matches!(error, WaveTableError::InvalidBracket { index: 0, .. }));
    }
}
