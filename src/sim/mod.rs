//! Tick-driven simulation module
//!
//! All gameplay logic lives here:
//! - One integration step per tick (the tick follows the host's frame cadence)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies; side effects leave as `GameEvent`s

pub mod board;
pub mod entity;
pub mod events;
pub mod geometry;
pub mod physics;
pub mod rules;
pub mod shot;
pub mod state;
pub mod tick;

pub use board::Board;
pub use entity::{Category, Entity, Side, standard_rack};
pub use events::{GameEvent, Notice};
pub use physics::{PhysicsParams, step};
pub use rules::{ResolutionCase, ShotSummary, Transition, TurnDecision};
pub use shot::{ShotCommand, shot_from_pull};
pub use state::{
    Difficulty, GameConfig, GamePhase, GameState, QueenState, SideAssignment, Turn,
};
pub use tick::{TickInput, tick};
