//! Simulation tick
//!
//! One cooperative update step: apply this tick's shot command, run the rule
//! update (pocket captures, settle check, resolution), then one physics step.
//! Nothing suspends mid-tick, and once the game is over ticks do nothing.

use super::physics;
use super::shot::ShotCommand;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Strike request; ignored unless its side is aiming
    pub shot: Option<ShotCommand>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    if let Some(shot) = input.shot {
        apply_shot(state, &shot);
    }

    state.time_ticks += 1;

    state.update_rules();
    if state.phase == GamePhase::GameOver {
        return;
    }

    let GameState {
        entities,
        board,
        physics: params,
        events,
        ..
    } = state;
    physics::step(entities, board, params, events);
}

/// Place the striker (if asked) and strike. Returns true if the shot was taken.
pub fn apply_shot(state: &mut GameState, shot: &ShotCommand) -> bool {
    if !state.is_aiming(shot.side) {
        log::debug!("Dropping shot from {} outside its Aiming phase", shot.side.as_str());
        return false;
    }
    if let Some(x) = shot.striker_x {
        state.place_striker(shot.side, x);
    }
    state.handle_shot(shot.side, shot.velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;
    use crate::sim::events::GameEvent;
    use crate::sim::state::{GameConfig, Turn};
    use glam::Vec2;

    fn run_until_aiming(state: &mut GameState, limit: u32) -> u32 {
        let input = TickInput::default();
        for n in 1..=limit {
            tick(state, &input);
            if matches!(state.phase, GamePhase::Aiming | GamePhase::GameOver) {
                return n;
            }
        }
        panic!("shot never resolved within {limit} ticks");
    }

    #[test]
    fn test_aiming_is_stable() {
        let mut state = GameState::new(GameConfig::default());
        let before: Vec<Vec2> = state.entities.iter().map(|e| e.pos).collect();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        let after: Vec<Vec2> = state.entities.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.time_ticks, 120);
    }

    #[test]
    fn test_break_shot_resolves() {
        let mut state = GameState::new(GameConfig::default());
        let input = TickInput {
            shot: Some(ShotCommand {
                side: Turn::Player,
                striker_x: Some(410.0),
                velocity: Vec2::new(0.0, -45.0),
            }),
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Shooting);

        run_until_aiming(&mut state, 20_000);
        assert!(state.all_stopped());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PuckHit));
        assert!(events.iter().filter(|e| matches!(e, GameEvent::TurnChanged(_))).count() >= 2);
    }

    #[test]
    fn test_wrong_side_shot_is_noop() {
        let mut state = GameState::new(GameConfig::default());
        let input = TickInput {
            shot: Some(ShotCommand {
                side: Turn::Ai,
                striker_x: Some(200.0),
                velocity: Vec2::new(0.0, 30.0),
            }),
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.striker().pos, state.board.baseline_spot(Turn::Player));
    }

    #[test]
    fn test_striker_into_pocket_is_foul() {
        let layout = vec![
            Entity::striker(0, Vec2::ZERO),
            Entity::queen(0, Vec2::new(400.0, 400.0)),
            Entity::coin(0, Vec2::new(300.0, 300.0), crate::sim::Side::White),
            Entity::coin(0, Vec2::new(500.0, 300.0), crate::sim::Side::Black),
        ];
        let mut state = GameState::with_layout(GameConfig::default(), layout).unwrap();
        // From the player's baseline, straight at the bottom-left pocket
        let from = state.baseline_position(Turn::Player, 150.0);
        let pocket = state.board.pockets()[3];
        let velocity = (pocket - from).normalize() * 25.0;
        let input = TickInput {
            shot: Some(ShotCommand {
                side: Turn::Player,
                striker_x: Some(150.0),
                velocity,
            }),
        };
        tick(&mut state, &input);
        run_until_aiming(&mut state, 5_000);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PocketCapture));
        assert!(events.contains(&GameEvent::Notice(crate::sim::Notice::Foul)));
        assert_eq!(state.turn, Turn::Ai);
        assert!(!state.striker().pocketed);
    }

    #[test]
    fn test_game_over_ignores_ticks() {
        let mut state = GameState::new(GameConfig::default());
        state.phase = GamePhase::GameOver;
        let input = TickInput {
            shot: Some(ShotCommand {
                side: Turn::Player,
                striker_x: None,
                velocity: Vec2::new(0.0, -30.0),
            }),
        };
        tick(&mut state, &input);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
