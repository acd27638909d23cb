//! Game settings and preferences
//!
//! Persisted as JSON at a path chosen by the host. Loading never fails: a
//! missing or malformed file gives the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::AI_THINK_TICKS;
use crate::sim::{Difficulty, GameConfig, SideAssignment};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty name ("easy", "medium", "hard"); anything else plays with no aim error
    pub difficulty: String,
    /// Coin color owned by each side
    pub sides: SideAssignment,

    // === AI ===
    /// Ticks the AI waits before shooting
    pub think_delay_ticks: u64,
    /// Seed for the AI's aim-error RNG
    pub seed: u64,
    /// Let the planner play the player's side too (demo mode)
    pub autopilot: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default().as_str().to_string(),
            sides: SideAssignment::default(),

            think_delay_ticks: AI_THINK_TICKS,
            seed: 0,
            autopilot: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parsed difficulty, `None` if the name is not recognized
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_str(&self.difficulty)
    }

    /// Session setup derived from these settings
    pub fn game_config(&self) -> GameConfig {
        let difficulty = self.difficulty();
        if difficulty.is_none() {
            log::warn!(
                "Unknown difficulty '{}', AI will aim without error",
                self.difficulty
            );
        }
        GameConfig {
            sides: self.sides.or_default(),
            difficulty,
            ..GameConfig::default()
        }
    }

    /// Parse settings from JSON. Fields missing from the document keep their defaults.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                None
            }
        };

        match loaded {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON. Failures are logged.
    pub fn save_to(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize settings: {}", e);
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }
}
