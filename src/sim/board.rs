//! Board geometry
//!
//! A square-cornered playing surface with a pocket at each corner and one
//! baseline per side. Immutable once built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Turn;
use crate::consts::*;

/// Playing surface, pockets and baselines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    offset: Vec2,
    size: Vec2,
    pocket_radius: f32,
    baseline_inset: f32,
    /// Top-left, top-right, bottom-right, bottom-left
    pockets: [Vec2; 4],
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            Vec2::splat(BOARD_OFFSET),
            Vec2::splat(BOARD_SIZE),
            POCKET_RADIUS,
            BASELINE_INSET,
        )
    }
}

impl Board {
    /// Build a board whose playing surface spans `offset..offset + size`
    pub fn new(offset: Vec2, size: Vec2, pocket_radius: f32, baseline_inset: f32) -> Self {
        let min = offset;
        let max = offset + size;
        Self {
            offset,
            size,
            pocket_radius,
            baseline_inset,
            pockets: [
                Vec2::new(min.x, min.y),
                Vec2::new(max.x, min.y),
                Vec2::new(max.x, max.y),
                Vec2::new(min.x, max.y),
            ],
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn pocket_radius(&self) -> f32 {
        self.pocket_radius
    }

    #[inline]
    pub fn pockets(&self) -> &[Vec2; 4] {
        &self.pockets
    }

    /// Lower wall coordinates
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.offset
    }

    /// Upper wall coordinates
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.offset + self.size
    }

    /// Literal center of the playing surface (where returned coins go)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.offset + self.size * 0.5
    }

    /// Y coordinate of a side's baseline. The AI plays from the top edge.
    pub fn baseline_y(&self, side: Turn) -> f32 {
        match side {
            Turn::Ai => self.min().y + self.baseline_inset,
            Turn::Player => self.max().y - self.baseline_inset,
        }
    }

    /// Playable X range along either baseline
    pub fn baseline_x_range(&self) -> (f32, f32) {
        (
            self.min().x + self.baseline_inset,
            self.max().x - self.baseline_inset,
        )
    }

    /// Clamp an X coordinate onto the playable baseline
    pub fn clamp_baseline_x(&self, x: f32) -> f32 {
        let (lo, hi) = self.baseline_x_range();
        x.clamp(lo, hi)
    }

    /// Where a side's striker sits at the start of each of its turns
    pub fn baseline_spot(&self, side: Turn) -> Vec2 {
        Vec2::new(self.center().x, self.baseline_y(side))
    }

    /// Unit vector from a side's baseline toward the board center
    pub fn forward(&self, side: Turn) -> Vec2 {
        match side {
            Turn::Ai => Vec2::Y,
            Turn::Player => -Vec2::Y,
        }
    }

    /// Index of the pocket capturing `pos`, if any
    pub fn pocket_at(&self, pos: Vec2) -> Option<usize> {
        self.pockets
            .iter()
            .position(|&p| super::geometry::sd_circle(pos, p, self.pocket_radius) < 0.0)
    }
}
