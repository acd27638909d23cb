//! Events leaving the simulation for presentation and audio collaborators

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::Turn;

/// Transient message for the presentation layer to show (and clear on its own timer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    Foul,
    CoverTheQueen,
    QueenCovered,
    FailedToCover,
    GameOver { winner: Turn },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Foul => write!(f, "FOUL! Striker pocketed."),
            Notice::CoverTheQueen => write!(f, "Cover the Queen!"),
            Notice::QueenCovered => write!(f, "Queen Covered!"),
            Notice::FailedToCover => write!(f, "Failed to cover Queen."),
            Notice::GameOver { winner } => write!(f, "GAME OVER! {} Wins!", winner.as_str()),
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new Aiming phase began for this side
    TurnChanged(Turn),
    Notice(Notice),
    /// A piece bounced off the frame
    WallHit,
    /// Two pieces struck each other
    PuckHit,
    /// A piece dropped into a pocket
    PocketCapture,
}

impl GameEvent {
    /// Physics-level event with no state attached (audio cue material)
    pub fn is_contact(&self) -> bool {
        matches!(
            self,
            GameEvent::WallHit | GameEvent::PuckHit | GameEvent::PocketCapture
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::Foul.to_string(), "FOUL! Striker pocketed.");
        assert_eq!(
            Notice::GameOver { winner: Turn::Ai }.to_string(),
            "GAME OVER! AI Wins!"
        );
    }

    #[test]
    fn test_contact_events() {
        assert!(GameEvent::WallHit.is_contact());
        assert!(GameEvent::PocketCapture.is_contact());
        assert!(!GameEvent::TurnChanged(Turn::Player).is_contact());
        assert!(!GameEvent::Notice(Notice::Foul).is_contact());
    }
}
