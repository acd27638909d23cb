//! Game state and core rule types
//!
//! Everything a match needs to be resumed lives here; the turn state machine
//! that mutates it is in `rules`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::entity::{Entity, Side, standard_rack};
use super::events::GameEvent;
use super::physics::PhysicsParams;

/// Which participant is acting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Ai,
}

impl Turn {
    pub fn opponent(self) -> Self {
        match self {
            Turn::Player => Turn::Ai,
            Turn::Ai => Turn::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Turn::Player => "Player",
            Turn::Ai => "AI",
        }
    }
}

/// Current phase of the turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the active side's shot
    Aiming,
    /// Pieces in motion, pockets live
    Shooting,
    /// Everything stopped once; resolve if it is still stopped next tick
    Settling,
    /// A side has won
    GameOver,
}

/// Ownership of the queen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueenState {
    OnBoard,
    /// Pocketed by the owner, who must pocket one of their own coins to keep it
    PendingCover(Turn),
    Claimed(Turn),
}

/// AI accuracy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Largest aim error (degrees, either direction) for AI shots
    pub fn max_error_degrees(&self) -> f32 {
        match self {
            Difficulty::Easy => 5.0,
            Difficulty::Medium => 2.0,
            Difficulty::Hard => 0.5,
        }
    }
}

/// Coin color owned by each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideAssignment {
    pub player: Side,
    pub ai: Side,
}

impl Default for SideAssignment {
    fn default() -> Self {
        Self {
            player: Side::White,
            ai: Side::Black,
        }
    }
}

impl SideAssignment {
    /// Each side owns a distinct regular color
    pub fn is_valid(&self) -> bool {
        self.player != self.ai && self.player != Side::Queen && self.ai != Side::Queen
    }

    /// This assignment if valid, the default otherwise
    pub fn or_default(self) -> Self {
        if self.is_valid() {
            self
        } else {
            log::warn!("Invalid side assignment {:?}, using White/Black", self);
            Self::default()
        }
    }

    pub fn color_of(&self, turn: Turn) -> Side {
        match turn {
            Turn::Player => self.player,
            Turn::Ai => self.ai,
        }
    }
}

/// Setup values fixed for the whole session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: Board,
    pub sides: SideAssignment,
    /// `None` means an unrecognized difficulty: AI shots get no aim error
    pub difficulty: Option<Difficulty>,
    pub physics: PhysicsParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            sides: SideAssignment::default(),
            difficulty: Some(Difficulty::default()),
            physics: PhysicsParams::default(),
        }
    }
}

/// Complete game state
///
/// Deserializing runs the same layout checks as [`GameState::with_layout`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SavedGame")]
pub struct GameState {
    pub board: Board,
    pub sides: SideAssignment,
    pub physics: PhysicsParams,
    /// All pieces, indexed by id. Never shrinks.
    pub entities: Vec<Entity>,
    pub turn: Turn,
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub queen: QueenState,
    /// Entity ids captured since the current Aiming phase began, in order
    pub pocketed_this_turn: Vec<u32>,
    pub winner: Option<Turn>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Incremented every time an Aiming phase begins
    pub turn_serial: u64,
    /// Events not yet collected by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    striker_id: u32,
    #[serde(skip)]
    queen_id: u32,
}

/// Serialized form of [`GameState`], validated on the way in
#[derive(Deserialize)]
struct SavedGame {
    board: Board,
    sides: SideAssignment,
    physics: PhysicsParams,
    entities: Vec<Entity>,
    turn: Turn,
    phase: GamePhase,
    difficulty: Option<Difficulty>,
    queen: QueenState,
    pocketed_this_turn: Vec<u32>,
    winner: Option<Turn>,
    time_ticks: u64,
    turn_serial: u64,
}

impl TryFrom<SavedGame> for GameState {
    type Error = String;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        if let Some((i, e)) = saved
            .entities
            .iter()
            .enumerate()
            .find(|(i, e)| e.id as usize != *i)
        {
            return Err(format!("entity at index {} has id {}", i, e.id));
        }
        let count = saved.entities.len();
        if let Some(id) = saved
            .pocketed_this_turn
            .iter()
            .find(|&&id| id as usize >= count)
        {
            return Err(format!("pocketed id {} out of range", id));
        }
        let (striker_id, queen_id) = special_ids(&saved.entities)?;

        Ok(Self {
            board: saved.board,
            sides: saved.sides.or_default(),
            physics: saved.physics,
            entities: saved.entities,
            turn: saved.turn,
            phase: saved.phase,
            difficulty: saved.difficulty,
            queen: saved.queen,
            pocketed_this_turn: saved.pocketed_this_turn,
            winner: saved.winner,
            time_ticks: saved.time_ticks,
            turn_serial: saved.turn_serial,
            events: Vec::new(),
            striker_id,
            queen_id,
        })
    }
}

/// Ids of the one striker and the one queen
fn special_ids(entities: &[Entity]) -> Result<(u32, u32), String> {
    let strikers: Vec<u32> = entities.iter().filter(|e| e.is_striker()).map(|e| e.id).collect();
    let queens: Vec<u32> = entities.iter().filter(|e| e.is_queen()).map(|e| e.id).collect();
    match (strikers.as_slice(), queens.as_slice()) {
        ([striker], [queen]) => Ok((*striker, *queen)),
        _ => Err(format!(
            "layout needs one striker and one queen, found {} and {}",
            strikers.len(),
            queens.len()
        )),
    }
}

impl GameState {
    /// Create a new match with the standard opening rack; the player shoots first
    pub fn new(config: GameConfig) -> Self {
        let rack = standard_rack(&config.board);
        // The standard rack always has one striker and one queen
        Self::build(config, rack, 0, 1)
    }

    /// Create a match from a custom layout (ids are reassigned by index).
    ///
    /// Returns `None` unless the layout holds exactly one striker and one queen.
    pub fn with_layout(config: GameConfig, mut entities: Vec<Entity>) -> Option<Self> {
        for (i, e) in entities.iter_mut().enumerate() {
            e.id = i as u32;
        }
        match special_ids(&entities) {
            Ok((striker, queen)) => Some(Self::build(config, entities, striker, queen)),
            Err(e) => {
                log::warn!("Layout rejected: {}", e);
                None
            }
        }
    }

    fn build(config: GameConfig, entities: Vec<Entity>, striker_id: u32, queen_id: u32) -> Self {
        let mut state = Self {
            board: config.board,
            sides: config.sides.or_default(),
            physics: config.physics,
            entities,
            turn: Turn::Player,
            phase: GamePhase::Aiming,
            difficulty: config.difficulty,
            queen: QueenState::OnBoard,
            pocketed_this_turn: Vec::new(),
            winner: None,
            time_ticks: 0,
            turn_serial: 0,
            events: Vec::new(),
            striker_id,
            queen_id,
        };
        state.start_turn();
        state
    }

    pub fn striker(&self) -> &Entity {
        &self.entities[self.striker_id as usize]
    }

    pub fn striker_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.striker_id as usize]
    }

    pub fn queen_entity(&self) -> &Entity {
        &self.entities[self.queen_id as usize]
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.get(id as usize)
    }

    /// Coin color owned by a side
    pub fn color_of(&self, turn: Turn) -> Side {
        self.sides.color_of(turn)
    }

    /// On-board coins of a side's color
    pub fn coins_left(&self, turn: Turn) -> usize {
        let color = self.color_of(turn);
        self.entities
            .iter()
            .filter(|e| e.is_coin_of(color) && e.is_active())
            .count()
    }

    /// Every active piece has exactly zero velocity
    pub fn all_stopped(&self) -> bool {
        self.entities
            .iter()
            .all(|e| !e.is_active() || e.is_at_rest())
    }

    /// Current aim error bound for AI shots (degrees)
    pub fn aim_error_degrees(&self) -> f32 {
        self.difficulty.map_or(0.0, |d| d.max_error_degrees())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log::info!("Difficulty set to {}", difficulty.as_str());
        self.difficulty = Some(difficulty);
    }

    /// Set difficulty by name. Unknown names give perfectly accurate AI shots.
    pub fn set_difficulty_name(&mut self, name: &str) {
        match Difficulty::from_str(name) {
            Some(d) => self.set_difficulty(d),
            None => {
                log::warn!("Unknown difficulty {:?}, AI aim error disabled", name);
                self.difficulty = None;
            }
        }
    }

    /// True while `side` may shoot or move its striker
    pub fn is_aiming(&self, side: Turn) -> bool {
        self.phase == GamePhase::Aiming && self.turn == side
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn queen_id(&self) -> u32 {
        self.queen_id
    }

    /// Put an entity back at the literal board center, at rest.
    /// No overlap avoidance against other pieces.
    pub(crate) fn return_to_center(&mut self, id: u32) {
        let center = self.board.center();
        if let Some(e) = self.entities.get_mut(id as usize) {
            e.restore_at(center);
        }
    }

    /// Striker position for a side placed at `x` along its baseline
    pub fn baseline_position(&self, side: Turn, x: f32) -> Vec2 {
        Vec2::new(self.board.clamp_baseline_x(x), self.board.baseline_y(side))
    }
}
