//! Data-driven world layout and player values
//!
//! Fixed game rules (snowball sizes, growth, stacking margin) live in
//! [`crate::consts`]. Everything here can be overridden from a JSON file;
//! missing fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::zone::{Rect, World};

/// Errors from loading or validating a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse tuning JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Player ===
    /// Units per tick
    pub player_speed: f32,

    // === Menu ===
    /// Play control size; it is centered at (width / 2, 2 * height / 3)
    pub play_control_width: f32,
    pub play_control_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,

            player_speed: 5.0,

            play_control_width: 200.0,
            play_control_height: 80.0,
        }
    }
}

impl Tuning {
    pub fn world(&self) -> World {
        World::new(self.world_width, self.world_height)
    }

    /// Bounds of the menu's play control
    pub fn play_control(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(self.world_width / 2.0, 2.0 * self.world_height / 3.0),
            Vec2::new(self.play_control_width, self.play_control_height),
        )
    }

    /// Where the player appears when play starts
    pub fn player_start(&self) -> Vec2 {
        self.world().center()
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.world_width) || !positive(self.world_height) {
            return Err(TuningError::Invalid(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if !positive(self.player_speed) {
            return Err(TuningError::Invalid(format!(
                "player_speed must be positive, got {}",
                self.player_speed
            )));
        }
        if !positive(self.play_control_width) || !positive(self.play_control_height) {
            return Err(TuningError::Invalid(
                "play control size must be positive".to_string(),
            ));
        }
        if !self.world().bounds().contains_rect(&self.play_control()) {
            return Err(TuningError::Invalid(
                "play control does not fit inside the world".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate tuning JSON
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }
}
