//! The player: moves around the field and carries at most one snowball

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::snowball::BallId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Units moved per tick along each input axis
    pub speed: f32,
    /// Snowball currently being rolled
    pub carrying: Option<BallId>,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            carrying: None,
        }
    }

    /// Step by `dir * speed`. `dir` components are expected in [-1, 1].
    pub fn move_by(&mut self, dir: Vec2) {
        self.pos += dir * self.speed;
    }
}
