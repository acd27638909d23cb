//! Single-writer game session
//!
//! Human input may arrive from any thread through a [`CommandSender`]; the
//! session drains the queue at the start of each [`Session::step`], lets the
//! AI controllers fire, advances one tick, and routes the tick's events to
//! the audio manager and the controllers. All game mutation happens inside
//! `step`.

use std::sync::mpsc::{self, Receiver, Sender};

use glam::Vec2;

use crate::ai::AiController;
use crate::audio::AudioManager;
use crate::settings::Settings;
use crate::sim::tick::apply_shot;
use crate::sim::{
    Difficulty, GameEvent, GamePhase, GameState, ShotCommand, TickInput, Turn, shot_from_pull,
    tick,
};

/// Input accepted by a session
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Shot(ShotCommand),
    /// Slingshot release: drag start minus drag end
    Pull { side: Turn, pull: Vec2 },
    PlaceStriker { side: Turn, x: f32 },
    SetDifficulty(Difficulty),
    /// Unknown names give an AI with no aim error
    SetDifficultyName(String),
    /// Let the planner play the player's side
    SetAutopilot(bool),
}

/// Cloneable handle for queueing commands from other threads
#[derive(Debug, Clone)]
pub struct CommandSender(Sender<Command>);

impl CommandSender {
    /// Queue a command. Returns false once the session is gone.
    pub fn send(&self, command: Command) -> bool {
        self.0.send(command).is_ok()
    }
}

/// A game plus everything that drives it
pub struct Session {
    state: GameState,
    ai: AiController,
    /// Controller for the player's side in demo mode
    autopilot: Option<AiController>,
    audio: AudioManager,
    tx: Sender<Command>,
    rx: Receiver<Command>,
    seed: u64,
    think_delay_ticks: u64,
}

impl Session {
    /// Fresh game with the opening rack
    pub fn new(settings: &Settings) -> Self {
        Self::with_state(GameState::new(settings.game_config()), settings)
    }

    /// Session around an existing game state
    pub fn with_state(state: GameState, settings: &Settings) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut audio = AudioManager::new();
        audio.apply_settings(settings);

        let mut session = Self {
            state,
            ai: AiController::new(Turn::Ai, settings.seed).with_delay(settings.think_delay_ticks),
            autopilot: None,
            audio,
            tx,
            rx,
            seed: settings.seed,
            think_delay_ticks: settings.think_delay_ticks,
        };
        session.set_autopilot(settings.autopilot);
        session.ai.schedule(&session.state);
        log::info!(
            "Session started: difficulty {:?}, seed {}",
            session.state.difficulty,
            settings.seed
        );
        session
    }

    /// Replace the audio manager (e.g. to attach a playback backend)
    pub fn with_audio(mut self, audio: AudioManager) -> Self {
        self.audio = audio;
        self
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender(self.tx.clone())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ai(&self) -> &AiController {
        &self.ai
    }

    pub fn autopilot(&self) -> Option<&AiController> {
        self.autopilot.as_ref()
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn winner(&self) -> Option<Turn> {
        self.state.winner
    }

    /// Advance one tick. Returns the events the tick produced.
    pub fn step(&mut self) -> Vec<GameEvent> {
        while let Ok(command) = self.rx.try_recv() {
            self.apply(command);
        }

        self.ai.update(&mut self.state);
        if let Some(pilot) = &mut self.autopilot {
            pilot.update(&mut self.state);
        }

        tick(&mut self.state, &TickInput::default());

        let events = self.state.drain_events();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    /// Step until the game ends or `max_ticks` steps have run
    pub fn run_until_over(&mut self, max_ticks: u64) -> Option<Turn> {
        for _ in 0..max_ticks {
            if self.is_over() {
                break;
            }
            self.step();
        }
        self.state.winner
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Shot(shot) => {
                apply_shot(&mut self.state, &shot);
            }
            Command::Pull { side, pull } => match shot_from_pull(pull) {
                Some(velocity) => {
                    let shot = ShotCommand {
                        side,
                        striker_x: None,
                        velocity,
                    };
                    apply_shot(&mut self.state, &shot);
                }
                None => log::debug!("Pull too short, aim cancelled"),
            },
            Command::PlaceStriker { side, x } => {
                self.state.place_striker(side, x);
            }
            Command::SetDifficulty(difficulty) => self.state.set_difficulty(difficulty),
            Command::SetDifficultyName(name) => self.state.set_difficulty_name(&name),
            Command::SetAutopilot(on) => self.set_autopilot(on),
        }
    }

    fn set_autopilot(&mut self, on: bool) {
        if on == self.autopilot.is_some() {
            return;
        }
        if on {
            let mut pilot = AiController::new(Turn::Player, self.seed.wrapping_add(1))
                .with_delay(self.think_delay_ticks);
            pilot.schedule(&self.state);
            self.autopilot = Some(pilot);
        } else {
            self.autopilot = None;
        }
        log::info!("Autopilot: {}", on);
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnChanged(_) => {
                self.ai.schedule(&self.state);
                if let Some(pilot) = &mut self.autopilot {
                    pilot.schedule(&self.state);
                }
            }
            GameEvent::Notice(notice) => log::info!("{}", notice),
            _ => {}
        }
        self.audio.handle(event);

        if self.is_over() {
            self.ai.cancel();
            if let Some(pilot) = &mut self.autopilot {
                pilot.cancel();
            }
        }
    }
}
