//! Headless run driven by a simple autopilot.

use std::collections::HashMap;

use anyhow::{Context, Result};
use arena_survival_core::{ArenaRect, AudioSink, Settings, Sound, Vec2};
use arena_survival_world::{query, FrameInput, World};

/// Distance under which the autopilot backs away from the nearest hostile.
const KITE_DISTANCE: f32 = 180.0;

/// Limits of a headless run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RunLimits {
    /// Floors to clear before stopping.
    pub(crate) floors: u32,
    /// Frames to simulate at most.
    pub(crate) max_ticks: u64,
}

/// Outcome of a headless run.
#[derive(Clone, Debug, Default)]
pub(crate) struct RunSummary {
    pub(crate) floors_cleared: u32,
    pub(crate) frames: u64,
    pub(crate) kills: u64,
    pub(crate) player_health: f32,
    pub(crate) player_died: bool,
    pub(crate) sounds: SoundTally,
}

/// Audio sink counting every cue instead of playing it.
#[derive(Clone, Debug, Default)]
pub(crate) struct SoundTally {
    counts: HashMap<Sound, u64>,
}

impl SoundTally {
    pub(crate) fn count(&self, sound: Sound) -> u64 {
        self.counts.get(&sound).copied().unwrap_or(0)
    }
}

impl AudioSink for SoundTally {
    fn play_sound(&mut self, sound: Sound) {
        *self.counts.entry(sound).or_insert(0) += 1;
    }
}

/// Plays floors with the autopilot until a limit is reached or the player dies.
pub(crate) fn run(settings: Settings, arena: ArenaRect, limits: RunLimits) -> Result<RunSummary> {
    let mut world = World::new(settings, arena).context("failed to build the world")?;
    let mut summary = RunSummary::default();

    while summary.frames < limits.max_ticks && summary.floors_cleared < limits.floors {
        let input = autopilot(&world);
        let report = world.tick(&input, &arena, &mut summary.sounds);
        summary.frames += 1;
        summary.kills += u64::from(report.kills);
        if report.player_dead {
            summary.player_died = true;
            break;
        }
        if report.floor_cleared {
            summary.floors_cleared += 1;
            log::info!(
                "floor {} cleared after {} frames",
                world.floor(),
                summary.frames
            );
            if summary.floors_cleared < limits.floors {
                world.advance_floor();
            }
        }
    }

    summary.player_health = query::player(&world).health();
    Ok(summary)
}

/// Aims at the nearest hostile, fires constantly and backs off when crowded.
fn autopilot(world: &World) -> FrameInput {
    let player = query::player(world).position();
    let target = query::nearest_hostile(world);
    let movement = match target {
        Some(target) if target.distance(player) < KITE_DISTANCE => player - target,
        _ => Vec2::ZERO,
    };
    FrameInput {
        movement,
        aim: target,
        fire: target.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use arena_survival_core::{PlayerSettings, WeaponSettings};

    use super::*;

    #[test]
    fn autopilot_clears_floors_with_a_strong_weapon() {
        let settings = Settings {
            seed: 7,
            player: PlayerSettings {
                max_health: 1.0e9,
                ..PlayerSettings::default()
            },
            weapon: WeaponSettings {
                damage: 1_000.0,
                fire_cooldown_frames: 2,
                multishot: 5,
                ..WeaponSettings::default()
            },
            ..Settings::default()
        };
        let limits = RunLimits {
            floors: 2,
            max_ticks: 60_000,
        };
        let summary =
            run(settings, ArenaRect::new(1600.0, 1200.0), limits).expect("valid settings");

        assert_eq!(summary.floors_cleared, 2);
        assert!(!summary.player_died);
        assert!(summary.kills > 0);
        assert_eq!(summary.sounds.count(Sound::FloorCleared), 2);
    }

    #[test]
    fn run_stops_at_the_tick_limit() {
        let limits = RunLimits {
            floors: 5,
            max_ticks: 10,
        };
        let summary = run(Settings::default(), ArenaRect::new(800.0, 600.0), limits)
            .expect("stock settings");
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.floors_cleared, 0);
    }
}
