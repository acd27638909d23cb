//! Sound cue routing
//!
//! Game events are mapped to procedurally described cues (an oscillator
//! sweep with a decay envelope). Actual playback belongs to a host-provided
//! [`AudioSink`]; without one the cues are dropped.

use crate::settings::Settings;
use crate::sim::{GameEvent, Notice};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Piece bounces off the frame
    WallHit,
    /// Two pieces collide
    PuckHit,
    /// Piece drops into a pocket
    Pocket,
    /// Striker pocketed
    Foul,
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// A single oscillator sweep with exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Seconds until the oscillator stops
    pub duration: f32,
}

impl SoundEffect {
    /// Cue for a game event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::PuckHit => Some(SoundEffect::PuckHit),
            GameEvent::PocketCapture => Some(SoundEffect::Pocket),
            GameEvent::Notice(Notice::Foul) => Some(SoundEffect::Foul),
            GameEvent::Notice(Notice::GameOver { .. }) => Some(SoundEffect::GameOver),
            GameEvent::Notice(_) | GameEvent::TurnChanged(_) => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            // Higher ping
            SoundEffect::WallHit => Tone {
                waveform: Waveform::Sine,
                start_hz: 400.0,
                end_hz: 400.0,
                gain: 0.3,
                duration: 0.1,
            },
            // Wooden click
            SoundEffect::PuckHit => Tone {
                waveform: Waveform::Triangle,
                start_hz: 300.0,
                end_hz: 220.0,
                gain: 0.4,
                duration: 0.08,
            },
            // Falling thunk
            SoundEffect::Pocket => Tone {
                waveform: Waveform::Sine,
                start_hz: 180.0,
                end_hz: 60.0,
                gain: 0.6,
                duration: 0.25,
            },
            SoundEffect::Foul => Tone {
                waveform: Waveform::Sawtooth,
                start_hz: 220.0,
                end_hz: 110.0,
                gain: 0.35,
                duration: 0.4,
            },
            // Descending sad tone
            SoundEffect::GameOver => Tone {
                waveform: Waveform::Square,
                start_hz: 440.0,
                end_hz: 110.0,
                gain: 0.3,
                duration: 1.0,
            },
        }
    }
}

/// Playback backend supplied by the host
pub trait AudioSink {
    /// Play `tone` at `volume` (0.0 - 1.0, already includes master/sfx/mute)
    fn play(&mut self, effect: SoundEffect, tone: &Tone, volume: f32);
}

/// Drops every cue
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _tone: &Tone, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    cues_played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Manager with no playback backend
    pub fn new() -> Self {
        Self::with_sink(Box::new(NullSink))
    }

    pub fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            cues_played: 0,
        }
    }

    /// Take volume and mute from the settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues handed to the sink so far
    pub fn cues_played(&self) -> u64 {
        self.cues_played
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, &effect.tone(), vol);
        self.cues_played += 1;
    }

    /// Play the cue for a game event, if any
    pub fn handle(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::from_event(event) {
            self.play(effect);
        }
    }
}
