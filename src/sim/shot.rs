//! Shot commands and drag-to-shoot conversion

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Turn;
use crate::consts::*;
use crate::limit;

/// A request to strike, from a human input handler or the AI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotCommand {
    pub side: Turn,
    /// Slide the striker to this baseline X first
    pub striker_x: Option<f32>,
    pub velocity: Vec2,
}

/// Convert a slingshot pull (drag start minus drag end) into a striker velocity.
///
/// Short pulls are treated as a cancelled aim. The pull length is capped, so
/// dragging further than `MAX_PULL` adds no power.
pub fn shot_from_pull(pull: Vec2) -> Option<Vec2> {
    let len = pull.length();
    if len <= MIN_PULL {
        return None;
    }
    Some(limit(pull, MAX_PULL) / PULL_SCALE * PULL_SPEED_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_pull_is_ignored() {
        assert_eq!(shot_from_pull(Vec2::new(5.0, 5.0)), None);
        assert_eq!(shot_from_pull(Vec2::ZERO), None);
    }

    #[test]
    fn test_pull_power() {
        let v = shot_from_pull(Vec2::new(0.0, -100.0)).unwrap();
        assert!((v.length() - 20.0).abs() < 1e-4);
        assert!(v.y < 0.0);
    }

    #[test]
    fn test_pull_is_capped() {
        let v = shot_from_pull(Vec2::new(600.0, 0.0)).unwrap();
        assert!((v.length() - 30.0).abs() < 1e-4);
    }
}
