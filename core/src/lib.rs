#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the arena survival engine.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure simulation systems, and adapters. Systems receive a
//! [`TickContext`] describing the current frame, mutate only the entities
//! they own, and report side effects through caller-owned buffers. Rendering
//! and audio are reached exclusively through the [`RenderSink`] and
//! [`AudioSink`] traits so that the simulation never depends on a backend.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod geometry;
pub mod rng;
pub mod settings;

pub use geometry::{ArenaBounds, ArenaRect, Insets, MIN_DISTANCE};
pub use glam::Vec2;
pub use rng::{derive_seed, seeded_rng, GameRng};
pub use settings::{
    BossSettings, BracketWeights, ConfigError, PlayerSettings, Settings, WaveSettings,
    WeaponSettings,
};

/// Nominal duration of a single simulation frame (60 Hz).
pub const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

/// Unique identifier assigned to every spawned enemy and boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every enemy type known to the engine.
///
/// Wave rosters and configuration refer to enemies through the snake_case
/// token of each variant (`"basic"`, `"pyromane"`, ...).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Seeks the player in a straight line.
    Basic,
    /// Fast melee seeker.
    Charger,
    /// Ranged enemy that keeps its distance.
    Shooter,
    /// Seeker that detonates next to the player.
    Suicide,
    /// Mini-boss firing projectile rings.
    Destructeur,
    /// Orbits the player and places fire zones.
    Pyromane,
    /// Multi-phase floor boss.
    Boss,
}

impl EnemyKind {
    /// Kinds that may appear in a normal wave roster, in weight-table order.
    pub const ROSTER: [EnemyKind; 6] = [
        EnemyKind::Basic,
        EnemyKind::Charger,
        EnemyKind::Shooter,
        EnemyKind::Suicide,
        EnemyKind::Destructeur,
        EnemyKind::Pyromane,
    ];

    /// Token used for this kind in rosters and configuration files.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Charger => "charger",
            Self::Shooter => "shooter",
            Self::Suicide => "suicide",
            Self::Destructeur => "destructeur",
            Self::Pyromane => "pyromane",
            Self::Boss => "boss",
        }
    }

    /// Resolves a spawn token, degrading unknown tokens to [`EnemyKind::Basic`].
    ///
    /// Unknown tokens are a programming error: debug builds assert so the
    /// mistake surfaces in tests, while release builds keep the running
    /// session alive with a basic enemy.
    #[must_use]
    pub fn from_token_or_basic(token: &str) -> Self {
        match token.parse() {
            Ok(kind) => kind,
            Err(error) => {
                debug_assert!(false, "{error}");
                log::warn!("{error}; spawning a basic enemy instead");
                Self::Basic
            }
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for EnemyKind {
    type Err = UnknownEnemyKind;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let kind = match token {
            "basic" => Self::Basic,
            "charger" => Self::Charger,
            "shooter" => Self::Shooter,
            "suicide" => Self::Suicide,
            "destructeur" => Self::Destructeur,
            "pyromane" => Self::Pyromane,
            "boss" => Self::Boss,
            other => {
                return Err(UnknownEnemyKind {
                    token: other.to_owned(),
                })
            }
        };
        Ok(kind)
    }
}

/// Reports that a spawn token does not name any registered enemy type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown enemy type token `{token}`")]
pub struct UnknownEnemyKind {
    token: String,
}

impl UnknownEnemyKind {
    /// Token that failed to resolve.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Fire-and-forget sound cues emitted by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    /// A regular enemy entered the arena.
    EnemySpawn,
    /// A floor boss entered the arena.
    BossSpawn,
    /// A boss advanced to its next phase.
    BossPhaseChange,
    /// A boss entered rage mode.
    BossRage,
    /// A boss split into two children.
    BossDivision,
    /// A boss executed an attack pattern.
    BossAttack,
    /// A ranged enemy fired.
    EnemyShot,
    /// A fire zone preview turned into a live hazard.
    FireZoneIgnited,
    /// A suicide enemy detonated.
    Explosion,
    /// The player fired a volley.
    PlayerShot,
    /// The player took damage.
    PlayerHurt,
    /// A new wave started.
    WaveStart,
    /// Every wave and boss of the floor has been cleared.
    FloorCleared,
}

/// Visual appearance applied to an entity or projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a fully saturated color from a hue expressed in degrees.
    #[must_use]
    pub fn from_hue(degrees: f32) -> Self {
        let hue = degrees.rem_euclid(360.0) / 60.0;
        let fraction = hue - hue.floor();
        let rising = (fraction * 255.0).round() as u8;
        let falling = 255 - rising;
        match hue as u32 {
            0 => Self::from_rgb(255, rising, 0),
            1 => Self::from_rgb(falling, 255, 0),
            2 => Self::from_rgb(0, 255, rising),
            3 => Self::from_rgb(0, falling, 255),
            4 => Self::from_rgb(rising, 0, 255),
            _ => Self::from_rgb(255, 0, falling),
        }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Immutable description of the frame being simulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickContext {
    /// Centre of the player this frame, after the player update.
    pub player: Vec2,
    /// Arena rectangle queried fresh for this frame.
    pub arena: ArenaRect,
    /// Simulation clock at the start of the frame.
    pub now: Duration,
    /// Zero-based index of the frame.
    pub frame: u64,
}

/// Category of an entity handed to a [`RenderSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityVisual {
    /// The player avatar.
    Player,
    /// A regular enemy or boss.
    Enemy(EnemyKind),
    /// Projectile fired by the player.
    PlayerProjectile,
    /// Projectile fired by an enemy or boss.
    EnemyProjectile,
    /// Live damaging fire zone.
    FireZone,
    /// Telegraphed fire zone that is not damaging yet.
    FireZonePreview,
}

/// Read-only snapshot of a drawable entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// What the entity is.
    pub visual: EntityVisual,
    /// Centre of the entity in arena coordinates.
    pub position: Vec2,
    /// Collision radius, also used as draw radius.
    pub radius: f32,
    /// Display color.
    pub color: Rgb,
    /// Remaining health as a fraction of the maximum, when applicable.
    pub health_fraction: Option<f32>,
}

/// Presentation backend receiving one call per visible entity per frame.
pub trait RenderSink {
    /// Draws the provided entity. Nothing returned affects the simulation.
    fn draw(&mut self, entity: &EntitySnapshot);
}

/// Audio backend receiving fire-and-forget sound cues.
pub trait AudioSink {
    /// Starts playback of the provided cue without waiting for completion.
    fn play_sound(&mut self, sound: Sound);
}

impl RenderSink for Vec<EntitySnapshot> {
    fn draw(&mut self, entity: &EntitySnapshot) {
        self.push(*entity);
    }
}

impl AudioSink for Vec<Sound> {
    fn play_sound(&mut self, sound: Sound) {
        self.push(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::{EnemyKind, Rgb};

    #[test]
    fn tokens_round_trip_through_from_str() {
        for kind in EnemyKind::ROSTER {
            assert_eq!(kind.token().parse::<EnemyKind>(), Ok(kind));
        }
        assert_eq!("boss".parse::<EnemyKind>(), Ok(EnemyKind::Boss));
    }

    #[test]
    fn unknown_token_reports_the_offending_text() {
        let error = "dragon".parse::<EnemyKind>().expect_err("dragon is not registered");
        assert_eq!(error.token(), "dragon");
        assert_eq!(error.to_string(), "unknown enemy type token `dragon`");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unknown enemy type token")]
    fn unknown_spawn_token_asserts_in_debug_builds() {
        let _ = EnemyKind::from_token_or_basic("dragon");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn unknown_spawn_token_degrades_to_basic_in_release_builds() {
        assert_eq!(EnemyKind::from_token_or_basic("dragon"), EnemyKind::Basic);
    }

    #[test]
    fn known_spawn_token_resolves_without_fallback() {
        assert_eq!(EnemyKind::from_token_or_basic("pyromane"), EnemyKind::Pyromane);
    }

    #[test]
    fn hue_wheel_hits_primary_colors() {
        assert_eq!(Rgb::from_hue(0.0), Rgb::from_rgb(255, 0, 0));
        assert_eq!(Rgb::from_hue(120.0), Rgb::from_rgb(0, 255, 0));
        assert_eq!(Rgb::from_hue(240.0), Rgb::from_rgb(0, 0, 255));
        assert_eq!(Rgb::from_hue(360.0), Rgb::from_rgb(255, 0, 0));
    }
}
