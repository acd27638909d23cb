//! Pieces on the board: the striker and the coins

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use crate::consts::*;

/// What kind of piece an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Striker,
    Coin,
}

/// Coin color. The queen is its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
    Queen,
}

/// A striker or coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Always `radius * radius`
    pub mass: f32,
    pub category: Category,
    /// `None` for the striker
    pub side: Option<Side>,
    /// Captured by a pocket. Pocketed entities take no part in physics,
    /// collisions or rendering; their position is left as it was.
    pub pocketed: bool,
}

impl Entity {
    fn new(id: u32, pos: Vec2, category: Category, side: Option<Side>) -> Self {
        let radius = match category {
            Category::Striker => STRIKER_RADIUS,
            Category::Coin => COIN_RADIUS,
        };
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            mass: radius * radius,
            category,
            side,
            pocketed: false,
        }
    }

    pub fn striker(id: u32, pos: Vec2) -> Self {
        Self::new(id, pos, Category::Striker, None)
    }

    pub fn coin(id: u32, pos: Vec2, side: Side) -> Self {
        Self::new(id, pos, Category::Coin, Some(side))
    }

    pub fn queen(id: u32, pos: Vec2) -> Self {
        Self::coin(id, pos, Side::Queen)
    }

    #[inline]
    pub fn is_striker(&self) -> bool {
        self.category == Category::Striker
    }

    #[inline]
    pub fn is_queen(&self) -> bool {
        self.side == Some(Side::Queen)
    }

    /// A regular coin of the given color
    #[inline]
    pub fn is_coin_of(&self, side: Side) -> bool {
        self.category == Category::Coin && self.side == Some(side)
    }

    /// Takes part in physics this tick
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.pocketed
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    /// Remove from play
    pub fn capture(&mut self) {
        self.pocketed = true;
        self.vel = Vec2::ZERO;
    }

    /// Put back on the board at `pos`, at rest
    pub fn restore_at(&mut self, pos: Vec2) {
        self.pocketed = false;
        self.vel = Vec2::ZERO;
        self.pos = pos;
    }
}

/// Opening layout: striker on the player's baseline, queen in the center,
/// an inner ring of 6 and an outer ring of 12 alternating White/Black coins.
///
/// Entity ids equal their index; the striker is id 0 and the queen id 1.
pub fn standard_rack(board: &Board) -> Vec<Entity> {
    use std::f32::consts::PI;

    let center = board.center();
    let mut entities = Vec::with_capacity(2 + 2 * COINS_PER_SIDE);

    entities.push(Entity::striker(0, board.baseline_spot(super::state::Turn::Player)));
    entities.push(Entity::queen(1, center));

    let rings = [(6, RACK_INNER_RING), (12, RACK_OUTER_RING)];
    for (count, ring) in rings {
        let step = 2.0 * PI / count as f32;
        for i in 0..count {
            let angle = i as f32 * step;
            let pos = center + crate::rotate(Vec2::X, angle) * (COIN_RADIUS * ring);
            let side = if i % 2 == 0 { Side::White } else { Side::Black };
            let id = entities.len() as u32;
            entities.push(Entity::coin(id, pos, side));
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_is_radius_squared() {
        let s = Entity::striker(0, Vec2::ZERO);
        let c = Entity::coin(1, Vec2::ZERO, Side::Black);
        assert_eq!(s.mass, STRIKER_RADIUS * STRIKER_RADIUS);
        assert_eq!(c.mass, COIN_RADIUS * COIN_RADIUS);
        assert!(s.radius > c.radius);
    }

    #[test]
    fn test_standard_rack_counts() {
        let rack = standard_rack(&Board::default());
        assert_eq!(rack.len(), 20);
        assert_eq!(rack.iter().filter(|e| e.is_striker()).count(), 1);
        assert_eq!(rack.iter().filter(|e| e.is_queen()).count(), 1);
        assert_eq!(rack.iter().filter(|e| e.is_coin_of(Side::White)).count(), 9);
        assert_eq!(rack.iter().filter(|e| e.is_coin_of(Side::Black)).count(), 9);
        for (i, e) in rack.iter().enumerate() {
            assert_eq!(e.id as usize, i);
        }
    }

    #[test]
    fn test_standard_rack_has_no_overlap() {
        let rack = standard_rack(&Board::default());
        for (i, a) in rack.iter().enumerate() {
            for b in &rack[i + 1..] {
                assert!(a.pos.distance(b.pos) >= a.radius + b.radius);
            }
        }
    }

    #[test]
    fn test_capture_and_restore() {
        let mut c = Entity::coin(3, Vec2::new(10.0, 10.0), Side::White);
        c.vel = Vec2::new(5.0, 0.0);
        c.capture();
        assert!(c.pocketed);
        assert!(c.is_at_rest());
        // Position is not used as a sentinel
        assert_eq!(c.pos, Vec2::new(10.0, 10.0));

        c.restore_at(Vec2::new(400.0, 400.0));
        assert!(c.is_active());
        assert_eq!(c.pos, Vec2::new(400.0, 400.0));
    }
}
