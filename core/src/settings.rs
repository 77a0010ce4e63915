//! Read-only run configuration deserialised from TOML.
//!
//! Every field has a default, so an empty document yields the stock game.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EnemyKind;

/// Errors raised while loading [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    /// The document parsed but describes an unplayable configuration.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Complete configuration for a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root seed from which every random stream of the run is derived.
    pub seed: u64,
    /// Base player statistics.
    pub player: PlayerSettings,
    /// Base weapon statistics.
    pub weapon: WeaponSettings,
    /// Wave composition and pacing.
    pub waves: WaveSettings,
    /// Boss scheduling.
    pub boss: BossSettings,
}

impl Settings {
    /// Parses and validates settings from a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks invariants that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.waves_per_floor == 0 {
            return Err(ConfigError::Invalid(
                "waves.waves_per_floor must be positive".to_owned(),
            ));
        }
        if self.waves.base_count == 0 {
            return Err(ConfigError::Invalid(
                "waves.base_count must be positive".to_owned(),
            ));
        }
        if self.waves.brackets.is_empty() {
            return Err(ConfigError::Invalid(
                "waves.brackets must contain at least one bracket".to_owned(),
            ));
        }
        if let Some(index) = self
            .waves
            .brackets
            .iter()
            .position(|bracket| bracket.total() == 0)
        {
            return Err(ConfigError::Invalid(format!(
                "waves.brackets[{index}] has no positive weight"
            )));
        }
        if self.player.max_health <= 0.0 {
            return Err(ConfigError::Invalid(
                "player.max_health must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Base player statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Health at the start of a run.
    pub max_health: f32,
    /// Movement speed in arena units per frame.
    pub speed: f32,
    /// Collision radius.
    pub radius: f32,
    /// Frames of invulnerability granted after taking a hit.
    pub invulnerability_frames: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            speed: 4.0,
            radius: 15.0,
            invulnerability_frames: 30,
        }
    }
}

/// Base weapon statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponSettings {
    /// Damage dealt by a single projectile.
    pub damage: f32,
    /// Frames between volleys.
    pub fire_cooldown_frames: u32,
    /// Projectile speed in arena units per frame.
    pub projectile_speed: f32,
    /// Projectile collision radius.
    pub projectile_radius: f32,
    /// Frames a projectile survives before expiring.
    pub projectile_lifetime_frames: u32,
    /// Projectiles per volley.
    pub multishot: u32,
    /// Angle between neighbouring projectiles of a volley, in degrees.
    pub spread_degrees: f32,
}

impl Default for WeaponSettings {
    fn default() -> Self {
        Self {
            damage: 10.0,
            fire_cooldown_frames: 12,
            projectile_speed: 9.0,
            projectile_radius: 4.0,
            projectile_lifetime_frames: 120,
            multishot: 1,
            spread_degrees: 10.0,
        }
    }
}

/// Wave composition and pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Normal waves generated for each floor.
    pub waves_per_floor: usize,
    /// Roster size on floor 1; each further floor adds two enemies.
    pub base_count: u32,
    /// Minimum simulated time between a wave clearing and the next starting.
    pub inter_wave_delay_ms: u64,
    /// Distance from the arena edge at which enemies appear.
    pub spawn_margin: f32,
    /// Spawn candidates closer than this to the arena centre are rejected.
    pub center_exclusion_radius: f32,
    /// Edge candidates tried before falling back to any arena point.
    pub max_spawn_attempts: u32,
    /// Weight tables indexed by floor bracket; the last entry covers every
    /// deeper floor.
    pub brackets: Vec<BracketWeights>,
}

impl WaveSettings {
    /// Inter-wave delay as a [`Duration`].
    #[must_use]
    pub fn inter_wave_delay(&self) -> Duration {
        Duration::from_millis(self.inter_wave_delay_ms)
    }
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            waves_per_floor: 3,
            base_count: 8,
            inter_wave_delay_ms: 2_000,
            spawn_margin: 40.0,
            center_exclusion_radius: 200.0,
            max_spawn_attempts: 10,
            brackets: BracketWeights::default_table(),
        }
    }
}

/// Relative spawn weights of each rosterable enemy for one floor bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketWeights {
    /// Weight of [`EnemyKind::Basic`].
    pub basic: u32,
    /// Weight of [`EnemyKind::Charger`].
    pub charger: u32,
    /// Weight of [`EnemyKind::Shooter`].
    pub shooter: u32,
    /// Weight of [`EnemyKind::Suicide`].
    pub suicide: u32,
    /// Weight of [`EnemyKind::Destructeur`].
    pub destructeur: u32,
    /// Weight of [`EnemyKind::Pyromane`].
    pub pyromane: u32,
}

impl BracketWeights {
    /// Builds a bracket from weights listed in [`EnemyKind::ROSTER`] order.
    #[must_use]
    pub const fn from_array(weights: [u32; 6]) -> Self {
        Self {
            basic: weights[0],
            charger: weights[1],
            shooter: weights[2],
            suicide: weights[3],
            destructeur: weights[4],
            pyromane: weights[5],
        }
    }

    /// Stock table used when no configuration overrides it.
    #[must_use]
    pub fn default_table() -> Vec<Self> {
        vec![
            Self::from_array([70, 20, 10, 0, 0, 0]),
            Self::from_array([50, 25, 15, 10, 0, 0]),
            Self::from_array([40, 22, 15, 13, 5, 5]),
            Self::from_array([30, 20, 18, 14, 9, 9]),
            Self::from_array([25, 18, 18, 15, 12, 12]),
        ]
    }

    /// Weight assigned to the provided kind. Bosses never appear in rosters.
    #[must_use]
    pub const fn weight(&self, kind: EnemyKind) -> u32 {
        match kind {
            EnemyKind::Basic => self.basic,
            EnemyKind::Charger => self.charger,
            EnemyKind::Shooter => self.shooter,
            EnemyKind::Suicide => self.suicide,
            EnemyKind::Destructeur => self.destructeur,
            EnemyKind::Pyromane => self.pyromane,
            EnemyKind::Boss => 0,
        }
    }

    /// Sum of every weight in the bracket.
    #[must_use]
    pub fn total(&self) -> u64 {
        EnemyKind::ROSTER
            .iter()
            .map(|kind| u64::from(self.weight(*kind)))
            .sum()
    }
}

/// Boss scheduling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossSettings {
    /// A boss closes every floor divisible by this value; zero disables bosses.
    pub floor_interval: u32,
    /// Frames a freshly spawned boss waits before it may divide.
    pub division_cooldown_frames: u32,
}

impl BossSettings {
    /// Reports whether the provided floor ends with a boss wave.
    #[must_use]
    pub fn floor_has_boss(&self, floor: u32) -> bool {
        self.floor_interval != 0 && floor % self.floor_interval == 0
    }
}

impl Default for BossSettings {
    fn default() -> Self {
        Self {
            floor_interval: 1,
            division_cooldown_frames: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = Settings::from_toml_str("").expect("empty settings are valid");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.waves.inter_wave_delay(), Duration::from_millis(2_000));
    }

    #[test]
    fn partial_document_overrides_selected_fields() {
        let settings = Settings::from_toml_str(
            r#"
            seed = 99

            [weapon]
            multishot = 3

            [[waves.brackets]]
            basic = 1
            suicide = 4
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.seed, 99);
        assert_eq!(settings.weapon.multishot, 3);
        assert_eq!(settings.weapon.damage, WeaponSettings::default().damage);
        assert_eq!(settings.waves.brackets.len(), 1);
        assert_eq!(settings.waves.brackets[0].weight(EnemyKind::Suicide), 4);
        assert_eq!(settings.waves.brackets[0].weight(EnemyKind::Charger), 0);
    }

    #[test]
    fn zero_weight_bracket_is_rejected() {
        let error = Settings::from_toml_str(
            r#"
            [[waves.brackets]]
            basic = 0
            "#,
        )
        .expect_err("bracket without weight must be rejected");
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let error = Settings::from_toml_str("seed = \"many\"").expect_err("seed must be numeric");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn boss_interval_selects_floors() {
        let boss = BossSettings {
            floor_interval: 2,
            ..BossSettings::default()
        };
        assert!(!boss.floor_has_boss(1));
        assert!(boss.floor_has_boss(2));
        assert!(!BossSettings {
            floor_interval: 0,
            ..BossSettings::default()
        }
        .floor_has_boss(4));
    }
}
