//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call per tick, no clocks
//! - No randomness
//! - Stable iteration order (by ball id, by snowman creation order)
//! - No rendering or platform dependencies

pub mod phase;
pub mod player;
pub mod snowball;
pub mod snowman;
pub mod stacking;
pub mod state;
pub mod tick;
pub mod zone;

pub use phase::GamePhase;
pub use player::Player;
pub use snowball::{BallId, Snowball, update_positions};
pub use snowman::{AddBallOutcome, Snowman, SnowmanId, SnowmanStage};
pub use stacking::{StackTarget, can_stack_on, find_stackable, stack_on, unstack};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick, tick_with};
pub use zone::{Rect, World, ZoneGate};
