//! Player avatar and weapon.

use arena_survival_core::{
    geometry::unit_from_angle, ArenaRect, EntitySnapshot, EntityVisual, PlayerSettings, Rgb,
    Vec2, WeaponSettings,
};
use arena_survival_system_projectiles::Projectile;

const PLAYER_COLOR: Rgb = Rgb::from_rgb(0x29, 0xb6, 0xf6);
const PLAYER_PROJECTILE_COLOR: Rgb = Rgb::from_rgb(0xff, 0xff, 0xff);

/// Player intent for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Desired movement direction; normalised before use.
    pub movement: Vec2,
    /// Arena point the player aims at.
    pub aim: Option<Vec2>,
    /// Whether the trigger is held.
    pub fire: bool,
}

/// Weapon statistics of the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    settings: WeaponSettings,
    cooldown: u32,
}

impl Weapon {
    /// Creates a ready-to-fire weapon.
    #[must_use]
    pub fn new(settings: WeaponSettings) -> Self {
        Self {
            settings,
            cooldown: 0,
        }
    }

    /// Statistics of the weapon.
    #[must_use]
    pub const fn settings(&self) -> &WeaponSettings {
        &self.settings
    }

    /// Frames until the weapon may fire again.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Fires a volley from `origin` toward `direction` when ready.
    ///
    /// Projectiles fan out symmetrically around `direction`, `spread_degrees`
    /// apart. Returns whether a volley left the barrel.
    fn fire(&mut self, origin: Vec2, direction: Vec2, out: &mut Vec<Projectile>) -> bool {
        if self.cooldown > 0 || direction == Vec2::ZERO {
            return false;
        }
        let count = self.settings.multishot.max(1);
        let step = self.settings.spread_degrees.to_radians();
        let heading = direction.y.atan2(direction.x);
        let first = heading - step * (count - 1) as f32 / 2.0;
        for index in 0..count {
            out.push(Projectile::new(
                origin,
                unit_from_angle(first + step * index as f32) * self.settings.projectile_speed,
                self.settings.damage,
                self.settings.projectile_radius,
                self.settings.projectile_lifetime_frames,
                PLAYER_PROJECTILE_COLOR,
            ));
        }
        self.cooldown = self.settings.fire_cooldown_frames;
        true
    }
}

/// The player avatar.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Vec2,
    radius: f32,
    speed: f32,
    health: f32,
    max_health: f32,
    invulnerability_frames: u32,
    invulnerable_for: u32,
    weapon: Weapon,
}

impl Player {
    /// Creates a player at `position` with full health.
    #[must_use]
    pub fn new(position: Vec2, settings: &PlayerSettings, weapon: WeaponSettings) -> Self {
        Self {
            position,
            radius: settings.radius,
            speed: settings.speed,
            health: settings.max_health,
            max_health: settings.max_health,
            invulnerability_frames: settings.invulnerability_frames,
            invulnerable_for: 0,
            weapon: Weapon::new(weapon),
        }
    }

    /// Centre of the player.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Collision radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Health at full strength.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Frames of invulnerability left.
    #[must_use]
    pub const fn invulnerable_for(&self) -> u32 {
        self.invulnerable_for
    }

    /// The equipped weapon.
    #[must_use]
    pub const fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    /// Reports whether health has been depleted.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Moves the player, ticks its timers and fires when asked.
    ///
    /// Returns whether a volley was fired.
    pub fn update(
        &mut self,
        input: &FrameInput,
        arena: &ArenaRect,
        out: &mut Vec<Projectile>,
    ) -> bool {
        self.invulnerable_for = self.invulnerable_for.saturating_sub(1);
        self.weapon.cooldown = self.weapon.cooldown.saturating_sub(1);

        let movement = input.movement.normalize_or_zero() * self.speed;
        self.position = arena.clamp_circle(self.position + movement, self.radius);

        if !input.fire {
            return false;
        }
        let direction = input
            .aim
            .map_or(Vec2::ZERO, |aim| (aim - self.position).normalize_or_zero());
        self.weapon.fire(self.position, direction, out)
    }

    /// Applies a hit unless the player is invulnerable.
    ///
    /// A landed hit grants the configured invulnerability window. Returns
    /// whether the hit landed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || self.invulnerable_for > 0 || self.is_dead() {
            return false;
        }
        self.health -= amount;
        self.invulnerable_for = self.invulnerability_frames;
        true
    }

    /// Applies blast damage, ignoring any running invulnerability window.
    ///
    /// The window is restarted so ordinary hits of the same frame are
    /// absorbed. Returns whether the blast landed.
    pub fn take_explosion(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || self.is_dead() {
            return false;
        }
        self.health -= amount;
        self.invulnerable_for = self.invulnerability_frames;
        true
    }

    /// Moves the player without collision checks, clamped to the arena.
    pub fn place(&mut self, position: Vec2, arena: &ArenaRect) {
        self.position = arena.clamp_circle(position, self.radius);
    }

    /// Render snapshot of the player.
    #[must_use]
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            visual: EntityVisual::Player,
            position: self.position,
            radius: self.radius,
            color: PLAYER_COLOR,
            health_fraction: Some((self.health / self.max_health).clamp(0.0, 1.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(multishot: u32) -> Player {
        Player::new(
            Vec2::new(100.0, 100.0),
            &PlayerSettings::default(),
            WeaponSettings {
                multishot,
                ..WeaponSettings::default()
            },
        )
    }

    #[test]
    fn volley_fans_out_around_the_aim() {
        let mut player = player(3);
        let arena = ArenaRect::new(800.0, 600.0);
        let mut shots = Vec::new();
        let input = FrameInput {
            movement: Vec2::ZERO,
            aim: Some(Vec2::new(400.0, 100.0)),
            fire: true,
        };
        assert!(player.update(&input, &arena, &mut shots));
        assert_eq!(shots.len(), 3);
        assert!(shots[1].velocity().y.abs() < 1e-4);
        assert!((shots[0].velocity().y + shots[2].velocity().y).abs() < 1e-4);

        assert!(!player.update(&input, &arena, &mut shots), "weapon is cooling down");
        assert_eq!(shots.len(), 3);
    }

    #[test]
    fn hits_grant_invulnerability() {
        let mut player = player(1);
        assert!(player.take_damage(10.0));
        assert!(!player.take_damage(10.0));
        assert_eq!(player.health(), 90.0);
        assert!(!player.take_damage(-5.0));
    }

    #[test]
    fn blasts_land_through_invulnerability() {
        let mut player = player(1);
        assert!(player.take_damage(10.0));
        assert!(player.take_explosion(40.0));
        assert!(player.take_explosion(40.0));
        assert_eq!(player.health(), 10.0);
        assert!(!player.take_damage(5.0));
        assert!(!player.take_explosion(0.0));
    }

    #[test]
    fn movement_is_clamped_to_the_arena() {
        let mut player = player(1);
        let arena = ArenaRect::new(800.0, 600.0);
        let input = FrameInput {
            movement: Vec2::new(-1.0, -1.0),
            ..FrameInput::default()
        };
        let mut shots = Vec::new();
        for _ in 0..100 {
            let _ = player.update(&input, &arena, &mut shots);
        }
        assert_eq!(player.position(), Vec2::splat(player.radius()));
    }
}
