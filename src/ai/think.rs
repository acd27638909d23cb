//! Deferred "thinking" before a computer-controlled shot
//!
//! When a controlled side's Aiming phase begins, a task is scheduled to fire a
//! fixed number of ticks later. A task belongs to one Aiming phase (identified
//! by the state's turn serial); if that phase is gone by the time it fires,
//! the task is dropped without touching the game.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::planner::{default_shot, perturb, plan_shot};
use crate::consts::AI_THINK_TICKS;
use crate::sim::shot::ShotCommand;
use crate::sim::state::{GamePhase, GameState, Turn};
use crate::sim::tick::apply_shot;

/// A pending shot decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkTask {
    pub side: Turn,
    /// Turn serial of the Aiming phase this task was planned for
    pub turn_serial: u64,
    /// Tick at which the task fires
    pub due_tick: u64,
}

impl ThinkTask {
    /// Still the same Aiming phase for the same side
    pub fn is_current(&self, state: &GameState) -> bool {
        state.phase == GamePhase::Aiming
            && state.turn == self.side
            && state.turn_serial == self.turn_serial
    }
}

/// Drives one side with the shot planner
#[derive(Debug, Clone)]
pub struct AiController {
    pub side: Turn,
    pub delay_ticks: u64,
    pending: Option<ThinkTask>,
    rng: Pcg32,
}

impl AiController {
    pub fn new(side: Turn, seed: u64) -> Self {
        Self {
            side,
            delay_ticks: AI_THINK_TICKS,
            pending: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_delay(mut self, delay_ticks: u64) -> Self {
        self.delay_ticks = delay_ticks;
        self
    }

    pub fn pending(&self) -> Option<&ThinkTask> {
        self.pending.as_ref()
    }

    /// Start thinking about the current Aiming phase. Replaces any older task.
    pub fn schedule(&mut self, state: &GameState) {
        if state.turn != self.side || state.phase != GamePhase::Aiming {
            return;
        }
        self.pending = Some(ThinkTask {
            side: self.side,
            turn_serial: state.turn_serial,
            due_tick: state.time_ticks + self.delay_ticks,
        });
        log::debug!("{} thinking until tick {}", self.side.as_str(), state.time_ticks + self.delay_ticks);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Fire the pending task if it is due. Returns the shot taken, if any.
    pub fn update(&mut self, state: &mut GameState) -> Option<ShotCommand> {
        let task = self.pending?;
        if state.time_ticks < task.due_tick {
            return None;
        }
        self.pending = None;

        if !task.is_current(state) {
            log::debug!(
                "Dropping stale {} shot for turn {} (now turn {}, {:?})",
                task.side.as_str(),
                task.turn_serial,
                state.turn_serial,
                state.phase
            );
            return None;
        }

        let command = self.decide(state);
        apply_shot(state, &command).then_some(command)
    }

    /// Plan, then add the difficulty's aim error
    pub fn decide(&mut self, state: &GameState) -> ShotCommand {
        match plan_shot(state, self.side) {
            Some(plan) => ShotCommand {
                side: self.side,
                striker_x: Some(plan.striker_pos.x),
                velocity: perturb(plan.velocity, state.aim_error_degrees(), &mut self.rng),
            },
            None => {
                log::info!("{} found no open shot, playing it straight", self.side.as_str());
                ShotCommand {
                    side: self.side,
                    striker_x: None,
                    velocity: default_shot(state, self.side),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameConfig;
    use crate::sim::tick::{TickInput, tick};
    use crate::sim::{Difficulty, Entity, GameEvent, Side};
    use glam::Vec2;

    fn ai_to_move() -> GameState {
        let mut state = GameState::new(GameConfig::default());
        state.turn = Turn::Ai;
        state.start_turn();
        state.drain_events();
        state
    }

    #[test]
    fn test_fires_after_delay() {
        let mut state = ai_to_move();
        let mut ai = AiController::new(Turn::Ai, 1).with_delay(10);
        ai.schedule(&state);

        for _ in 0..9 {
            tick(&mut state, &TickInput::default());
            assert!(ai.update(&mut state).is_none());
        }
        tick(&mut state, &TickInput::default());
        let shot = ai.update(&mut state);
        assert!(shot.is_some());
        assert_eq!(state.phase, GamePhase::Shooting);
        assert!(ai.pending().is_none());
    }

    #[test]
    fn test_only_schedules_own_turn() {
        let state = GameState::new(GameConfig::default());
        let mut ai = AiController::new(Turn::Ai, 1);
        ai.schedule(&state);
        assert!(ai.pending().is_none());
    }

    #[test]
    fn test_stale_task_is_dropped() {
        let mut state = ai_to_move();
        let mut ai = AiController::new(Turn::Ai, 1).with_delay(5);
        ai.schedule(&state);

        // The phase is superseded before the task fires
        state.start_turn();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert!(ai.update(&mut state).is_none());
        assert_eq!(state.phase, GamePhase::Aiming);
        assert!(ai.pending().is_none());
    }

    #[test]
    fn test_task_dropped_when_turn_changed() {
        let mut state = ai_to_move();
        let mut ai = AiController::new(Turn::Ai, 1).with_delay(0);
        ai.schedule(&state);
        state.turn = Turn::Player;
        state.start_turn();
        assert!(ai.update(&mut state).is_none());
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.turn, Turn::Player);
    }

    #[test]
    fn test_cancel() {
        let mut state = ai_to_move();
        let mut ai = AiController::new(Turn::Ai, 1).with_delay(0);
        ai.schedule(&state);
        ai.cancel();
        assert!(ai.update(&mut state).is_none());
        assert_eq!(state.phase, GamePhase::Aiming);
    }

    #[test]
    fn test_hard_shot_stays_near_plan() {
        let layout = vec![
            Entity::striker(0, Vec2::ZERO),
            Entity::queen(0, Vec2::new(700.0, 700.0)),
            Entity::coin(0, Vec2::new(250.0, 250.0), Side::Black),
        ];
        let mut state = GameState::with_layout(GameConfig::default(), layout).unwrap();
        state.turn = Turn::Ai;
        state.start_turn();
        state.set_difficulty(Difficulty::Hard);
        let plan = plan_shot(&state, Turn::Ai).expect("open line to a pocket");

        let mut ai = AiController::new(Turn::Ai, 99);
        for _ in 0..50 {
            let command = ai.decide(&state);
            let deviation = crate::signed_angle(plan.velocity, command.velocity)
                .to_degrees()
                .abs();
            assert!(deviation <= 0.5 + 1e-3);
            assert_eq!(command.striker_x, Some(plan.striker_pos.x));
        }
    }

    #[test]
    fn test_ai_shot_runs_to_next_turn() {
        let mut state = ai_to_move();
        let mut ai = AiController::new(Turn::Ai, 3).with_delay(0);
        ai.schedule(&state);
        assert!(ai.update(&mut state).is_some());

        for _ in 0..20_000 {
            tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::Aiming {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Aiming);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::TurnChanged(_)))
        );
    }
}
