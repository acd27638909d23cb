//! Carrom Sim - A two-color disk-flicking board game
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (physics, pockets, turn rules, game state)
//! - `ai`: Geometric shot planner and the deferred "thinking" controller
//! - `session`: Single-writer command queue tying input, AI and audio together
//! - `audio`: Sound cue routing for an optional playback backend
//! - `settings`: Persisted preferences (difficulty, side colors, seed)

pub mod ai;
pub mod audio;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Command, CommandSender, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Full table size including the wooden frame
    pub const TABLE_SIZE: f32 = 800.0;
    /// Playing surface size (square)
    pub const BOARD_SIZE: f32 = 720.0;
    /// Frame margin around the playing surface
    pub const BOARD_OFFSET: f32 = (TABLE_SIZE - BOARD_SIZE) / 2.0;
    pub const POCKET_RADIUS: f32 = 35.0;
    /// Distance from the frame edge to each baseline
    pub const BASELINE_INSET: f32 = 110.0;

    /// Velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.985;
    /// Energy kept after a wall bounce
    pub const WALL_BOUNCE: f32 = 0.7;
    /// Restitution for puck-puck collisions
    pub const PUCK_BOUNCE: f32 = 0.8;
    /// Speed below which a puck snaps to rest
    pub const STOP_THRESHOLD: f32 = 0.1;

    pub const COIN_RADIUS: f32 = 14.0;
    pub const STRIKER_RADIUS: f32 = 20.0;
    /// Coins of each color in the opening rack
    pub const COINS_PER_SIDE: usize = 9;
    /// Rack ring radii, in coin radii
    pub const RACK_INNER_RING: f32 = 2.1;
    pub const RACK_OUTER_RING: f32 = 4.2;

    /// Planned shot speed: base + travel / divisor, capped
    pub const SHOT_POWER_BASE: f32 = 30.0;
    pub const SHOT_POWER_DIVISOR: f32 = 10.0;
    pub const SHOT_POWER_CAP: f32 = 60.0;
    /// Speed of the fallback shot when no line is open
    pub const DEFAULT_SHOT_SPEED: f32 = 20.0;
    /// Obstacles must stay this many of their radii away from a shot line
    pub const CLEARANCE_FACTOR: f32 = 2.0;

    /// AI thinking delay (1.5 seconds at 60 ticks/sec)
    pub const AI_THINK_TICKS: u64 = 90;

    /// Drag-to-shoot conversion
    pub const MIN_PULL: f32 = 10.0;
    pub const MAX_PULL: f32 = 150.0;
    pub const PULL_SCALE: f32 = 10.0;
    pub const PULL_SPEED_MULTIPLIER: f32 = 2.0;
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Signed angle from `from` to `to` in radians, within [-π, π]
///
/// Zero if either vector has zero length.
#[inline]
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    if from.length_squared() == 0.0 || to.length_squared() == 0.0 {
        return 0.0;
    }
    from.perp_dot(to).atan2(from.dot(to))
}

/// Clamp a vector's magnitude to at most `max`
#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    if v.length() > max {
        v.normalize_or_zero() * max
    } else {
        v
    }
}
