//! Turn state machine: Aiming → Shooting → Settling → (Aiming | GameOver)
//!
//! Resolution is split into a pure part and an applying part. A finished shot
//! is summarized ([`ShotSummary`]), classified into exactly one
//! [`ResolutionCase`] by priority (foul > queen pocketed > pending cover >
//! normal), and each case maps to a [`Transition`]. `GameState::resolve_turn`
//! then applies the transition, checks for a winner, and starts the next turn.

use glam::Vec2;

use super::events::{GameEvent, Notice};
use super::state::{GamePhase, GameState, QueenState, Turn};

/// What went down the pockets during one shot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotSummary {
    pub foul: bool,
    pub queen_pocketed: bool,
    pub own_coins: usize,
    pub opponent_coins: usize,
}

impl ShotSummary {
    #[inline]
    pub fn own_coin_pocketed(&self) -> bool {
        self.own_coins > 0
    }
}

/// Which rule governs a finished shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionCase {
    /// Striker pocketed
    Foul,
    /// Queen pocketed this shot, no foul
    QueenPocketed,
    /// The shooter owes a cover for a queen pocketed last shot
    CoverAttempt,
    Normal,
}

impl ResolutionCase {
    pub fn classify(summary: &ShotSummary, queen: QueenState, turn: Turn) -> Self {
        if summary.foul {
            ResolutionCase::Foul
        } else if summary.queen_pocketed {
            ResolutionCase::QueenPocketed
        } else if queen == QueenState::PendingCover(turn) {
            ResolutionCase::CoverAttempt
        } else {
            ResolutionCase::Normal
        }
    }
}

/// Whether the shooter keeps the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDecision {
    Continue,
    Pass,
}

/// Effects of resolving one shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub decision: TurnDecision,
    pub queen: QueenState,
    /// Put one pocketed own coin back at the center
    pub return_own_coin: bool,
    /// Put the queen back at the center
    pub return_queen: bool,
    pub notice: Option<Notice>,
}

impl Transition {
    /// The transition table
    pub fn for_case(
        case: ResolutionCase,
        summary: &ShotSummary,
        queen: QueenState,
        turn: Turn,
    ) -> Self {
        let keep_if = |own: bool| {
            if own {
                TurnDecision::Continue
            } else {
                TurnDecision::Pass
            }
        };

        match case {
            ResolutionCase::Foul => {
                let owed_cover = queen == QueenState::PendingCover(turn);
                Self {
                    decision: TurnDecision::Pass,
                    queen: if owed_cover { QueenState::OnBoard } else { queen },
                    return_own_coin: true,
                    return_queen: summary.queen_pocketed || owed_cover,
                    notice: Some(Notice::Foul),
                }
            }
            ResolutionCase::QueenPocketed => {
                if summary.own_coin_pocketed() {
                    Self {
                        decision: TurnDecision::Continue,
                        queen: QueenState::Claimed(turn),
                        return_own_coin: false,
                        return_queen: false,
                        notice: Some(Notice::QueenCovered),
                    }
                } else {
                    Self {
                        decision: TurnDecision::Continue,
                        queen: QueenState::PendingCover(turn),
                        return_own_coin: false,
                        return_queen: false,
                        notice: Some(Notice::CoverTheQueen),
                    }
                }
            }
            ResolutionCase::CoverAttempt => {
                if summary.own_coin_pocketed() {
                    Self {
                        decision: TurnDecision::Continue,
                        queen: QueenState::Claimed(turn),
                        return_own_coin: false,
                        return_queen: false,
                        notice: Some(Notice::QueenCovered),
                    }
                } else {
                    Self {
                        decision: TurnDecision::Pass,
                        queen: QueenState::OnBoard,
                        return_own_coin: false,
                        return_queen: true,
                        notice: Some(Notice::FailedToCover),
                    }
                }
            }
            ResolutionCase::Normal => Self {
                decision: keep_if(summary.own_coin_pocketed()),
                queen,
                return_own_coin: false,
                return_queen: false,
                notice: None,
            },
        }
    }
}

impl GameState {
    /// Enter Aiming for the current side: clear the shot record and put that
    /// side's striker on its baseline spot, at rest.
    pub fn start_turn(&mut self) {
        self.phase = GamePhase::Aiming;
        self.pocketed_this_turn.clear();
        self.turn_serial += 1;

        let spot = self.board.baseline_spot(self.turn);
        self.striker_mut().restore_at(spot);

        log::info!("{} to shoot (turn {})", self.turn.as_str(), self.turn_serial);
        self.events.push(GameEvent::TurnChanged(self.turn));
    }

    /// Slide the striker along `side`'s baseline. Ignored unless `side` is aiming.
    pub fn place_striker(&mut self, side: Turn, x: f32) -> bool {
        if !self.is_aiming(side) {
            log::debug!("Ignoring striker placement from {} in {:?}", side.as_str(), self.phase);
            return false;
        }
        let pos = self.baseline_position(side, x);
        self.striker_mut().pos = pos;
        true
    }

    /// Strike with `velocity`. Ignored unless `side` is aiming and the velocity is non-zero.
    pub fn handle_shot(&mut self, side: Turn, velocity: Vec2) -> bool {
        if !self.is_aiming(side) {
            log::debug!("Ignoring shot from {} in {:?}", side.as_str(), self.phase);
            return false;
        }
        if velocity == Vec2::ZERO || !velocity.is_finite() {
            log::debug!("Ignoring degenerate shot {:?}", velocity);
            return false;
        }
        self.striker_mut().vel = velocity;
        self.phase = GamePhase::Shooting;
        true
    }

    /// Per-tick rule update: pocket captures while pieces move, then the
    /// two-observation settle check that triggers resolution.
    pub fn update_rules(&mut self) {
        if !matches!(self.phase, GamePhase::Shooting | GamePhase::Settling) {
            return;
        }

        self.capture_pocketed();

        if self.all_stopped() {
            if self.phase == GamePhase::Shooting {
                self.phase = GamePhase::Settling;
            } else {
                self.resolve_turn();
            }
        } else {
            self.phase = GamePhase::Shooting;
        }
    }

    /// Mark every piece sitting over a pocket as pocketed, immediately
    fn capture_pocketed(&mut self) {
        for i in 0..self.entities.len() {
            let entity = &self.entities[i];
            if !entity.is_active() || self.board.pocket_at(entity.pos).is_none() {
                continue;
            }
            let id = entity.id;
            self.entities[i].capture();
            self.pocketed_this_turn.push(id);
            self.events.push(GameEvent::PocketCapture);
        }
    }

    /// Classify this turn's captures
    pub fn shot_summary(&self) -> ShotSummary {
        let own = self.color_of(self.turn);
        let opponent = self.color_of(self.turn.opponent());
        let mut summary = ShotSummary::default();

        for e in self.pocketed_this_turn.iter().filter_map(|&id| self.entity(id)) {
            if e.is_striker() {
                summary.foul = true;
            } else if e.is_queen() {
                summary.queen_pocketed = true;
            } else if e.is_coin_of(own) {
                summary.own_coins += 1;
            } else if e.is_coin_of(opponent) {
                summary.opponent_coins += 1;
            }
        }
        summary
    }

    /// Apply the rules to the finished shot, then check for a winner before
    /// handing the next Aiming phase to the right side.
    pub fn resolve_turn(&mut self) {
        let summary = self.shot_summary();
        let case = ResolutionCase::classify(&summary, self.queen, self.turn);
        let transition = Transition::for_case(case, &summary, self.queen, self.turn);
        log::info!(
            "{} shot resolved as {:?}: {:?} -> {:?}",
            self.turn.as_str(),
            case,
            summary,
            transition.decision
        );

        if transition.return_own_coin {
            self.return_own_coin(self.turn);
        }
        if transition.return_queen {
            self.return_to_center(self.queen_id());
        }
        self.queen = transition.queen;
        if let Some(notice) = transition.notice {
            self.events.push(GameEvent::Notice(notice));
        }

        if let Some(winner) = self.check_win() {
            self.phase = GamePhase::GameOver;
            self.winner = Some(winner);
            log::info!("Game over: {} wins", winner.as_str());
            self.events.push(GameEvent::Notice(Notice::GameOver { winner }));
            return;
        }

        if transition.decision == TurnDecision::Pass {
            self.turn = self.turn.opponent();
        }
        self.start_turn();
    }

    /// Return the first pocketed coin of `side`'s color, if there is one
    fn return_own_coin(&mut self, side: Turn) {
        let color = self.color_of(side);
        let banked = self
            .entities
            .iter()
            .find(|e| e.pocketed && e.is_coin_of(color))
            .map(|e| e.id);
        if let Some(id) = banked {
            self.return_to_center(id);
        }
    }

    /// A side wins with none of its coins on the board, unless the opponent
    /// holds the queen. The player is checked first.
    pub fn check_win(&self) -> Option<Turn> {
        [Turn::Player, Turn::Ai].into_iter().find(|&side| {
            self.coins_left(side) == 0 && self.queen != QueenState::Claimed(side.opponent())
        })
    }
}
