//! Puck physics: integration, friction, wall bounces and puck-puck collisions
//!
//! One call to [`step`] advances every active entity by one tick. The tick is
//! the host's frame, not a fixed wall-clock timestep: velocities are in units
//! per tick and positions advance by exactly one velocity per call.
//!
//! Collisions are resolved in a single pass. Each overlapping pair is corrected
//! once, independently, so a tick with several simultaneous contacts can leave
//! a little residual penetration behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::entity::Entity;
use super::events::GameEvent;
use crate::consts::*;

/// Tunable physics coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Velocity multiplier per tick
    pub friction: f32,
    /// Fraction of the normal velocity kept after a wall bounce
    pub wall_bounce: f32,
    /// Restitution for puck-puck impulses
    pub puck_bounce: f32,
    /// Speeds below this snap to exactly zero
    pub stop_threshold: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            wall_bounce: WALL_BOUNCE,
            puck_bounce: PUCK_BOUNCE,
            stop_threshold: STOP_THRESHOLD,
        }
    }
}

/// Advance all active entities by one tick, pushing contact events
pub fn step(
    entities: &mut [Entity],
    board: &Board,
    params: &PhysicsParams,
    events: &mut Vec<GameEvent>,
) {
    // 1. Move
    for entity in entities.iter_mut() {
        if !entity.is_active() {
            continue;
        }
        integrate(entity, params);
        if resolve_walls(entity, board, params.wall_bounce) {
            events.push(GameEvent::WallHit);
        }
    }

    // 2. Resolve every unordered pair
    for i in 0..entities.len() {
        let (head, tail) = entities.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.is_active() {
            continue;
        }
        for b in tail.iter_mut() {
            if !b.is_active() {
                continue;
            }
            if resolve_pair(a, b, params.puck_bounce) {
                events.push(GameEvent::PuckHit);
            }
        }
    }
}

/// Apply friction, snap slow pieces to rest, then move
pub fn integrate(entity: &mut Entity, params: &PhysicsParams) {
    let mut vel = entity.vel * params.friction;
    if vel.length() < params.stop_threshold {
        vel = Vec2::ZERO;
    }
    entity.vel = vel;
    entity.pos += vel;
}

/// Keep an entity inside the frame, one axis at a time.
///
/// A crossing edge is clamped to touch the wall and that velocity component
/// is reversed and damped. Returns true if any wall was touched.
pub fn resolve_walls(entity: &mut Entity, board: &Board, restitution: f32) -> bool {
    let r = entity.radius;
    let min = board.min();
    let max = board.max();
    let Vec2 { mut x, mut y } = entity.pos;
    let mut vel = entity.vel;
    let mut collided = false;

    if x - r < min.x {
        x = min.x + r;
        vel = Vec2::new(-vel.x * restitution, vel.y);
        collided = true;
    } else if x + r > max.x {
        x = max.x - r;
        vel = Vec2::new(-vel.x * restitution, vel.y);
        collided = true;
    }

    if y - r < min.y {
        y = min.y + r;
        vel = Vec2::new(vel.x, -vel.y * restitution);
        collided = true;
    } else if y + r > max.y {
        y = max.y - r;
        vel = Vec2::new(vel.x, -vel.y * restitution);
        collided = true;
    }

    entity.pos = Vec2::new(x, y);
    entity.vel = vel;
    collided
}

/// Separate and bounce two overlapping pieces.
///
/// Coincident centers have no usable normal and are skipped. Returns true
/// when an impulse was applied (the pieces were approaching).
pub fn resolve_pair(a: &mut Entity, b: &mut Entity, restitution: f32) -> bool {
    let delta = a.pos - b.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;

    if dist >= min_dist || dist <= 0.0 {
        return false;
    }

    // Normal points from b toward a
    let normal = delta / dist;

    // Push apart, heavier piece moves less
    let overlap = min_dist - dist;
    let total_mass = a.mass + b.mass;
    a.pos += normal * (overlap * b.mass / total_mass);
    b.pos -= normal * (overlap * a.mass / total_mass);

    let vel_along_normal = (a.vel - b.vel).dot(normal);
    if vel_along_normal >= 0.0 {
        // Already separating
        return false;
    }

    let j = -(1.0 + restitution) * vel_along_normal / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = normal * j;
    a.vel += impulse / a.mass;
    b.vel -= impulse / b.mass;
    true
}
