//! Broadside - a two-ship cannon duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `render`: Pure projection of game state into drawable descriptors
//! - `variant`: Presentation variant configuration (sprite sheets, frame counts)
//!
//! Rendering, audio playback, and timers are host concerns. The library
//! exposes an initial state, a per-tick transition function, and a render
//! projection; the host wires them to a real renderer and clock.

pub mod render;
pub mod sim;
pub mod variant;

pub use render::{Drawable, render};
pub use sim::{Command, CommandQueue, GameEvent, GameState, TickInput, tick};
pub use variant::SpriteVariant;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Ship hitbox dimensions (width across the beam, height bow to stern)
    pub const HITBOX_WIDTH: f32 = 30.0;
    pub const HITBOX_HEIGHT: f32 = 80.0;

    /// Ship cruise speed (units per tick, ships never stop)
    pub const SHIP_SPEED: f32 = 0.5;
    /// Turn rate (degrees per tick)
    pub const TURN_RATE: f32 = 1.0;

    /// Cannonball speed (units per tick)
    pub const CANNONBALL_SPEED: f32 = 2.0;
    /// Cannonball render radius
    pub const CANNONBALL_RADIUS: f32 = 3.0;
    /// Distance of the forward probe used to pick the broadside direction
    pub const AIM_PROBE_DISTANCE: f32 = 40.0;

    /// Reload delay after firing (wall-clock milliseconds, not ticks)
    pub const RELOAD_MS: f64 = 3000.0;
    /// Hits needed to win
    pub const SCORE_LIMIT: u32 = 3;

    /// Starting positions and headings
    pub const PLAYER1_START: (f32, f32) = (-150.0, -150.0);
    pub const PLAYER1_HEADING: f32 = -90.0;
    pub const PLAYER2_START: (f32, f32) = (150.0, 150.0);
    pub const PLAYER2_HEADING: f32 = 90.0;
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Move a point forward by `speed` along `heading_deg`.
///
/// Screen coordinates: increasing y is downward, so the y component
/// subtracts the sine term.
#[inline]
pub fn advance(pos: Vec2, speed: f32, heading_deg: f32) -> Vec2 {
    let rad = to_radians(heading_deg);
    Vec2::new(pos.x + rad.cos() * speed, pos.y - rad.sin() * speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_radians() {
        assert!((to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!(to_radians(0.0).abs() < 1e-6);
        assert!((to_radians(-90.0) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_advance_axis_aligned() {
        let p = advance(Vec2::ZERO, 2.0, 0.0);
        assert!((p.x - 2.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);

        // Heading 90 points "up", which is -y in screen coordinates
        let p = advance(Vec2::ZERO, 2.0, 90.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y + 2.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn advance_preserves_distance(
            heading in -720.0f32..720.0,
            speed in 0.0f32..10.0,
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
        ) {
            let origin = Vec2::new(x, y);
            let moved = advance(origin, speed, heading);
            prop_assert!((moved.distance(origin) - speed).abs() < 1e-3);
        }
    }
}
