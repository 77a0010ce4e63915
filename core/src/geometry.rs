//! Arena bounds and the vector helpers shared by every moving entity.

use std::cell::Cell;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest distance used when normalising a direction between two points.
///
/// Coincident positions would otherwise produce a zero-length vector.
pub const MIN_DISTANCE: f32 = 0.001;

/// Letterbox insets trimmed from each side of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    /// Inset applied to the left edge.
    pub left: f32,
    /// Inset applied to the top edge.
    pub top: f32,
    /// Inset applied to the right edge.
    pub right: f32,
    /// Inset applied to the bottom edge.
    pub bottom: f32,
}

/// Axis-aligned playable rectangle expressed in arena units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaRect {
    min: Vec2,
    max: Vec2,
}

impl ArenaRect {
    /// Creates an arena spanning `(0, 0)` to `(width, height)`.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_insets(width, height, Insets::default())
    }

    /// Creates an arena for a window of the given size minus letterbox insets.
    ///
    /// Insets larger than the window collapse the arena to a single point
    /// instead of producing an inverted rectangle.
    #[must_use]
    pub fn with_insets(width: f32, height: f32, insets: Insets) -> Self {
        let min = Vec2::new(insets.left.max(0.0), insets.top.max(0.0));
        let max = Vec2::new(
            (width - insets.right.max(0.0)).max(min.x),
            (height - insets.bottom.max(0.0)).max(min.y),
        );
        Self { min, max }
    }

    /// Upper-left corner of the playable area.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner of the playable area.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Width of the playable area.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the playable area.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Centre of the playable area.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Clamps a circle's centre so the circle stays inside the arena.
    ///
    /// When the arena is narrower than the circle along an axis the centre
    /// is pinned to the middle of that axis.
    #[must_use]
    pub fn clamp_circle(&self, position: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(position.x, self.min.x, self.max.x, radius),
            clamp_axis(position.y, self.min.y, self.max.y, radius),
        )
    }

    /// Reports whether any part of the circle overlaps the arena.
    #[must_use]
    pub fn overlaps_circle(&self, position: Vec2, radius: f32) -> bool {
        position.x + radius >= self.min.x
            && position.x - radius <= self.max.x
            && position.y + radius >= self.min.y
            && position.y - radius <= self.max.y
    }
}

fn clamp_axis(value: f32, min: f32, max: f32, radius: f32) -> f32 {
    let low = min + radius;
    let high = max - radius;
    if low > high {
        (min + max) * 0.5
    } else {
        value.clamp(low, high)
    }
}

/// Live source of the arena rectangle.
///
/// Implementations may change between frames (window resize); callers query
/// it once per frame and never cache the result on entities.
pub trait ArenaBounds {
    /// Current playable rectangle.
    fn bounds(&self) -> ArenaRect;
}

impl ArenaBounds for ArenaRect {
    fn bounds(&self) -> ArenaRect {
        *self
    }
}

impl ArenaBounds for Cell<ArenaRect> {
    fn bounds(&self) -> ArenaRect {
        self.get()
    }
}

/// Unit direction from `from` to `to` together with the distance between them.
///
/// The distance used for normalisation is floored at [`MIN_DISTANCE`]; for
/// coincident points the returned direction is zero and the distance is the
/// floor value.
#[must_use]
pub fn direction_to(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let distance = delta.length().max(MIN_DISTANCE);
    (delta / distance, distance)
}

/// Unit vector pointing along `angle` radians.
#[must_use]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Vector rotated a quarter turn counter-clockwise.
#[must_use]
pub fn perpendicular(vector: Vec2) -> Vec2 {
    Vec2::new(-vector.y, vector.x)
}

/// Rotates `current` toward `desired` by at most `max_turn` radians.
///
/// The length of `current` is preserved.
#[must_use]
pub fn steer_towards(current: Vec2, desired: Vec2, max_turn: f32) -> Vec2 {
    let speed = current.length();
    if speed <= MIN_DISTANCE || desired.length() <= MIN_DISTANCE {
        return current;
    }
    let heading = current.y.atan2(current.x);
    let target = desired.y.atan2(desired.x);
    let mut delta = target - heading;
    while delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    }
    while delta < -std::f32::consts::PI {
        delta += std::f32::consts::TAU;
    }
    let turn = delta.clamp(-max_turn, max_turn);
    unit_from_angle(heading + turn) * speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_yield_zero_direction() {
        let (direction, distance) = direction_to(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_eq!(direction, Vec2::ZERO);
        assert!((distance - MIN_DISTANCE).abs() < f32::EPSILON);
    }

    #[test]
    fn insets_shrink_the_playable_area() {
        let arena = ArenaRect::with_insets(
            800.0,
            600.0,
            Insets {
                left: 40.0,
                top: 0.0,
                right: 40.0,
                bottom: 20.0,
            },
        );
        assert_eq!(arena.min(), Vec2::new(40.0, 0.0));
        assert_eq!(arena.max(), Vec2::new(760.0, 580.0));
        assert_eq!(arena.center(), Vec2::new(400.0, 290.0));
    }

    #[test]
    fn clamp_keeps_circle_inside() {
        let arena = ArenaRect::new(100.0, 100.0);
        let clamped = arena.clamp_circle(Vec2::new(-20.0, 150.0), 10.0);
        assert_eq!(clamped, Vec2::new(10.0, 90.0));
    }

    #[test]
    fn clamp_centres_circle_in_tiny_arena() {
        let arena = ArenaRect::new(10.0, 100.0);
        let clamped = arena.clamp_circle(Vec2::new(0.0, 50.0), 20.0);
        assert_eq!(clamped, Vec2::new(5.0, 50.0));
    }

    #[test]
    fn steering_is_bounded_by_turn_rate() {
        let steered = steer_towards(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.1);
        let angle = steered.y.atan2(steered.x);
        assert!((angle - 0.1).abs() < 1e-5);
        assert!((steered.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn live_bounds_follow_resizes() {
        let bounds = Cell::new(ArenaRect::new(800.0, 600.0));
        assert_eq!(bounds.bounds().width(), 800.0);
        bounds.set(ArenaRect::new(1024.0, 600.0));
        assert_eq!(bounds.bounds().width(), 1024.0);
    }
}
