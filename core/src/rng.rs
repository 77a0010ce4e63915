//! Seeded random streams.
//!
//! Every consumer owns its own [`GameRng`]; there is no process-global random
//! state. Sub-streams are derived from a parent seed and a label so that
//! independent systems stay reproducible regardless of call order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Pseudo-random generator used throughout the simulation.
pub type GameRng = ChaCha8Rng;

/// Creates a generator from a 64-bit seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derives a child seed from a parent seed, a stream label and an index.
#[must_use]
pub fn derive_seed(base: u64, label: &str, index: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn derived_seeds_are_stable_and_distinct() {
        assert_eq!(derive_seed(42, "wave", 1), derive_seed(42, "wave", 1));
        assert_ne!(derive_seed(42, "wave", 1), derive_seed(42, "wave", 2));
        assert_ne!(derive_seed(42, "wave", 1), derive_seed(42, "boss", 1));
    }

    #[test]
    fn seeded_streams_replay() {
        let mut first = seeded_rng(7);
        let mut second = seeded_rng(7);
        for _ in 0..16 {
            assert_eq!(first.gen::<u64>(), second.gen::<u64>());
        }
    }
}
