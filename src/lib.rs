//! Triangle Dodge - A 2D avoidance arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entity pool, steering, spawning, collisions, tick)
//! - `game`: Round/score controller and frame scheduler
//! - `highscores`: Best score per difficulty
//! - `persistence`: High score storage backends
//! - `platform`: Render sink and browser/native glue
//! - `settings`: Data-driven configuration

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Game, LifecycleEvent, LoopControl, RoundResult};
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed capacity of the pursuer pool
    pub const MAX_ENTITIES: usize = 100;
    /// Largest pool a settings file may ask for
    pub const MAX_POOL_CAPACITY: usize = u16::MAX as usize;

    /// Fraction of the remaining distance the player covers each tick
    pub const EASING_FACTOR: f32 = 0.1;
    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 15.0;

    /// Difficulty bounds and fallback
    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 10;
    pub const DEFAULT_DIFFICULTY: u8 = 3;

    /// Spawn timing: interval = max(MIN, BASE - (difficulty + 2) * STEP)
    pub const SPAWN_INTERVAL_BASE: i32 = 70;
    pub const SPAWN_INTERVAL_STEP: i32 = 5;
    pub const SPAWN_INTERVAL_MIN: u64 = 15;
    /// Difficulty offset shared by spawn interval and speed scaling
    pub const DIFFICULTY_OFFSET: u8 = 2;
    /// Speed gain per effective difficulty level
    pub const SPEED_STEP: f32 = 0.1;

    /// Probability that a spawned pursuer is BIG
    pub const BIG_CHANCE: f64 = 0.3;

    /// Score gained per tick (displayed score is the floor)
    pub const TICKS_PER_POINT: u64 = 6;

    /// Default viewport when the environment reports none
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Normalize a heading into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed angular difference normalized to (-180, 180]
#[inline]
pub fn signed_degrees(mut delta: f32) -> f32 {
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

/// Heading (degrees, 0 = up, clockwise in screen space) pointing from `from` to `to`
#[inline]
pub fn heading_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    wrap_degrees(d.y.atan2(d.x).to_degrees() + 90.0)
}

/// Unit direction for a heading in degrees (0 = up, screen y grows downward)
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    let rad = (heading - 90.0).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_signed_degrees_range() {
        assert!((signed_degrees(190.0) - (-170.0)).abs() < 1e-4);
        assert!((signed_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert_eq!(signed_degrees(180.0), 180.0);
        assert_eq!(signed_degrees(-180.0), 180.0);
    }

    #[test]
    fn test_heading_conventions() {
        let origin = Vec2::ZERO;
        // Straight up the screen (negative y) is heading 0
        assert!(heading_toward(origin, Vec2::new(0.0, -10.0)).abs() < 1e-4);
        // Right is 90, down is 180
        assert!((heading_toward(origin, Vec2::new(10.0, 0.0)) - 90.0).abs() < 1e-4);
        assert!((heading_toward(origin, Vec2::new(0.0, 10.0)) - 180.0).abs() < 1e-4);

        let dir = heading_to_dir(90.0);
        assert!((dir.x - 1.0).abs() < 1e-5 && dir.y.abs() < 1e-5);
        let dir = heading_to_dir(0.0);
        assert!(dir.x.abs() < 1e-5 && (dir.y + 1.0).abs() < 1e-5);
    }
}
