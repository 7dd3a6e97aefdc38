//! Snowball Snowman - roll snowballs, stack them into snowmen
//!
//! Core modules:
//! - `sim`: Deterministic simulation (growth, stacking, snowman assembly, game phase)
//! - `tuning`: Data-driven world layout and player values
//!
//! Rendering, windowing, audio and input capture live outside this crate.
//! Callers feed a [`sim::TickInput`] per frame and read [`sim::GameState`] back.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game rule constants
pub mod consts {
    /// Conventional simulation rate of the surrounding loop (ticks per second)
    pub const TICK_HZ: u32 = 60;

    /// Snowball radius at spawn
    pub const MIN_SIZE: f32 = 20.0;
    /// Snowball radius cap
    pub const MAX_SIZE: f32 = 60.0;
    /// Radius gained per tick while rolling
    pub const GROWTH_RATE: f32 = 0.2;

    /// Stacking reach tolerance: centers may be up to 20% farther apart than
    /// the sum of both radii
    pub const STACK_MARGIN: f32 = 1.2;
}

/// Point directly above `below` where a ball of radius `size` rests.
///
/// Screen coordinates: y grows downward, so "above" subtracts.
#[inline]
pub fn resting_position(below: Vec2, below_size: f32, size: f32) -> Vec2 {
    below - Vec2::new(0.0, below_size + size)
}
