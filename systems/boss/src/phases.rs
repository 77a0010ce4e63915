//! Phase descriptors that drive how a boss escalates.

use arena_survival_core::Rgb;
use arena_survival_system_projectiles::SpecialKind;

use crate::patterns::AttackPattern;

/// Upper bound on the number of phases a boss may own.
pub const MAX_PHASES: u8 = 4;

/// Immutable description of one boss phase.
#[derive(Clone, Debug, PartialEq)]
pub struct BossPhase {
    number: u8,
    health_threshold: f32,
    attack_cooldown: u32,
    projectile_radius: f32,
    damage_multiplier: f32,
    patterns: Vec<AttackPattern>,
    specials: Vec<SpecialKind>,
    color: Rgb,
}

impl BossPhase {
    /// One-based phase number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Health ratio at or below which the phase becomes active.
    #[must_use]
    pub const fn health_threshold(&self) -> f32 {
        self.health_threshold
    }

    /// Frames between attacks.
    #[must_use]
    pub const fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    /// Radius of the projectiles fired during this phase.
    #[must_use]
    pub const fn projectile_radius(&self) -> f32 {
        self.projectile_radius
    }

    /// Multiplier applied to the boss damage for projectiles.
    #[must_use]
    pub const fn damage_multiplier(&self) -> f32 {
        self.damage_multiplier
    }

    /// Patterns the phase picks from.
    #[must_use]
    pub fn patterns(&self) -> &[AttackPattern] {
        &self.patterns
    }

    /// Special projectiles that may be substituted during this phase.
    #[must_use]
    pub fn specials(&self) -> &[SpecialKind] {
        &self.specials
    }

    /// Display color of the boss while the phase is active.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }
}

/// Number of phases of a boss guarding the provided floor.
#[must_use]
pub fn phases_for_floor(floor: u32) -> u8 {
    let phases = floor.max(1).saturating_add(1) / 2 + 1;
    u8::try_from(phases).map_or(MAX_PHASES, |phases| phases.min(MAX_PHASES))
}

/// Builds `count` phases with evenly spaced health thresholds.
///
/// `count` is clamped to `1..=MAX_PHASES`. Phase `k` activates once the
/// health ratio drops to `1 - (k - 1) / count`, so the first phase is active
/// from spawn.
#[must_use]
pub fn build_phases(count: u8) -> Vec<BossPhase> {
    let count = count.clamp(1, MAX_PHASES);
    (1..=count)
        .map(|number| {
            let step = f32::from(number - 1);
            BossPhase {
                number,
                health_threshold: 1.0 - step / f32::from(count),
                attack_cooldown: 100 - 15 * u32::from(number - 1),
                projectile_radius: 6.0 + f32::from(number),
                damage_multiplier: 1.0 + 0.2 * step,
                patterns: patterns_for(number),
                specials: specials_for(number),
                color: Rgb::from_hue(300.0 - 45.0 * step),
            }
        })
        .collect()
}

fn patterns_for(number: u8) -> Vec<AttackPattern> {
    let mut patterns = vec![AttackPattern::Circle, AttackPattern::Burst];
    if number >= 2 {
        patterns.push(AttackPattern::Spiral);
    }
    if number >= 3 {
        patterns.push(AttackPattern::Wave);
    }
    if number >= 4 {
        patterns.push(AttackPattern::Mixed);
    }
    patterns
}

fn specials_for(number: u8) -> Vec<SpecialKind> {
    match number {
        0 | 1 => Vec::new(),
        2 => vec![SpecialKind::Accelerating],
        3 => vec![
            SpecialKind::Accelerating,
            SpecialKind::Bouncing,
            SpecialKind::Splitting,
        ],
        _ => SpecialKind::ALL.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_decrease_and_start_at_full_health() {
        for count in 1..=MAX_PHASES {
            let phases = build_phases(count);
            assert_eq!(phases.len(), usize::from(count));
            assert_eq!(phases[0].health_threshold(), 1.0);
            for pair in phases.windows(2) {
                assert!(pair[1].health_threshold() < pair[0].health_threshold());
                assert!(pair[1].attack_cooldown() < pair[0].attack_cooldown());
            }
        }
    }

    #[test]
    fn later_phases_unlock_patterns_and_specials() {
        let phases = build_phases(4);
        assert!(phases[0].specials().is_empty());
        assert_eq!(phases[1].specials(), &[SpecialKind::Accelerating]);
        assert_eq!(phases[3].specials().len(), 4);
        assert!(phases[3].patterns().contains(&AttackPattern::Mixed));
        assert!(!phases[2].patterns().contains(&AttackPattern::Mixed));
    }

    #[test]
    fn phase_count_is_clamped() {
        assert_eq!(build_phases(0).len(), 1);
        assert_eq!(build_phases(9).len(), usize::from(MAX_PHASES));
    }

    #[test]
    fn deeper_floors_get_more_phases() {
        assert_eq!(phases_for_floor(1), 2);
        assert_eq!(phases_for_floor(3), 3);
        assert_eq!(phases_for_floor(5), 4);
        assert_eq!(phases_for_floor(40), MAX_PHASES);
    }
}
