//! Session state
//!
//! Everything the simulation mutates lives in one [`GameState`] owned by the
//! caller's game loop. Renderers read it back through the accessors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use super::player::Player;
use super::snowball::{BallId, Snowball};
use super::snowman::{Snowman, SnowmanId};
use super::zone::{Rect, World};
use crate::tuning::Tuning;

/// Things that happened during a tick, for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    SnowballSpawned(BallId),
    /// Dropped in the building zone
    SnowballPlaced(BallId),
    SnowballStacked { ball: BallId, on: BallId },
    SnowmanStarted(SnowmanId),
    SnowmanCompleted(SnowmanId),
    Celebration,
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub world: World,
    /// Menu play control bounds
    pub play_control: Rect,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Present once play has started
    pub player: Option<Player>,
    /// Ball arena, indexed by `BallId`
    pub(super) balls: Vec<Snowball>,
    /// Balls dropped in the building zone, in placement order
    pub(super) placed_balls: Vec<BallId>,
    /// Snowmen in creation order, indexed by `SnowmanId`
    pub(super) snowmen: Vec<Snowman>,
    /// Events of the most recent tick; cleared when the next tick starts
    #[serde(skip)]
    pub(super) events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            world: tuning.world(),
            play_control: tuning.play_control(),
            tuning,
            phase: GamePhase::Menu,
            time_ticks: 0,
            player: None,
            balls: Vec::new(),
            placed_balls: Vec::new(),
            snowmen: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn balls(&self) -> &[Snowball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Snowball> {
        self.balls.get(id.index())
    }

    pub fn placed_balls(&self) -> &[BallId] {
        &self.placed_balls
    }

    pub fn snowmen(&self) -> &[Snowman] {
        &self.snowmen
    }

    pub fn snowman(&self, id: SnowmanId) -> Option<&Snowman> {
        self.snowmen.get(id.get() as usize)
    }

    /// Snowman that `ball` belongs to, if any
    pub fn snowman_of(&self, ball: BallId) -> Option<&Snowman> {
        self.snowmen
            .iter()
            .find(|s| s.tiers().contains(&Some(ball)))
    }

    /// Ball the player is rolling right now
    pub fn carried_ball(&self) -> Option<&Snowball> {
        self.player
            .as_ref()
            .and_then(|p| p.carrying)
            .and_then(|id| self.ball(id))
    }

    /// Placed balls that are not part of any stack
    pub fn loose_balls(&self) -> impl Iterator<Item = &Snowball> + '_ {
        self.placed_balls
            .iter()
            .filter_map(|&id| self.ball(id))
            .filter(|b| b.is_unattached())
    }

    /// Events of the most recent tick, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the most recent tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        log::debug!("event: {event:?}");
        self.events.push(event);
    }

    /// Put the player on the field
    pub(super) fn spawn_player(&mut self) {
        self.player = Some(Player::new(
            self.tuning.player_start(),
            self.tuning.player_speed,
        ));
    }

    /// Allocate a rolling snowball at `pos`
    pub(super) fn spawn_rolling_snowball(&mut self, pos: Vec2) -> BallId {
        let id = BallId::new(self.balls.len() as u32);
        let mut ball = Snowball::new(id, pos);
        ball.start_rolling();
        self.balls.push(ball);
        self.push_event(GameEvent::SnowballSpawned(id));
        id
    }

    pub(super) fn next_snowman_id(&self) -> SnowmanId {
        SnowmanId::new(self.snowmen.len() as u32)
    }

    /// Register a snowman built from `next_snowman_id`
    pub(super) fn add_snowman(&mut self, snowman: Snowman) {
        debug_assert_eq!(snowman.id, self.next_snowman_id());
        self.push_event(GameEvent::SnowmanStarted(snowman.id));
        self.snowmen.push(snowman);
    }

    /// JSON snapshot for debugging/telemetry
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
