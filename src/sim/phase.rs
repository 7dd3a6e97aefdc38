//! Game phase transitions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::zone::Rect;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the play control to be activated
    #[default]
    Menu,
    /// Rolling and stacking
    Playing,
    /// A snowman was completed. Terminal for the session.
    Celebration,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Celebration => "celebration",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Celebration)
    }

    /// Primary activation (click/tap) at `point`.
    ///
    /// Only starts play from the menu, and only inside the play control.
    /// Returns true if the phase changed.
    pub fn activate(&mut self, point: Vec2, play_control: &Rect) -> bool {
        if *self == GamePhase::Menu && play_control.contains(point) {
            *self = GamePhase::Playing;
            log::info!("Game started");
            return true;
        }
        false
    }

    /// A snowman just completed. Returns true if the phase changed.
    pub fn snowman_completed(&mut self) -> bool {
        if *self == GamePhase::Playing {
            *self = GamePhase::Celebration;
            log::info!("Snowman complete - celebrating");
            return true;
        }
        false
    }
}
