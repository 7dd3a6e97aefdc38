//! Snowball entity: growth while rolling, following the carrier, resting on
//! the ball beneath it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::resting_position;

/// Handle of a snowball in the session's ball arena.
///
/// Balls are never removed, so the handle doubles as the arena index and as
/// spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(u32);

impl BallId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ball#{}", self.0)
    }
}

/// A snowball
///
/// `size` is the radius. Stacking links are only written by
/// [`super::stacking`], which keeps both sides of a link in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snowball {
    pub id: BallId,
    pub pos: Vec2,
    /// Radius gained per [`Snowball::grow`] call while rolling
    growth_rate: f32,
    size: f32,
    min_size: f32,
    max_size: f32,
    pub(super) is_rolling: bool,
    /// Ball directly beneath this one
    pub(super) stacked_on: Option<BallId>,
    /// Ball directly above this one
    pub(super) stacked_by: Option<BallId>,
}

impl Snowball {
    /// A stationary ball of minimum size
    pub fn new(id: BallId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            growth_rate: GROWTH_RATE,
            size: MIN_SIZE,
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
            is_rolling: false,
            stacked_on: None,
            stacked_by: None,
        }
    }

    /// Same ball with its radius set (clamped into the allowed range)
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size.clamp(self.min_size, self.max_size);
        self
    }

    /// Same ball with a different growth step.
    ///
    /// Negative or non-finite rates are refused and the current rate is kept.
    pub fn with_growth_rate(mut self, rate: f32) -> Self {
        if rate.is_finite() && rate >= 0.0 {
            self.growth_rate = rate;
        } else {
            log::warn!("{}: ignoring growth rate {rate}", self.id);
        }
        self
    }

    #[inline]
    pub fn growth_rate(&self) -> f32 {
        self.growth_rate
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    #[inline]
    pub fn max_size(&self) -> f32 {
        self.max_size
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.is_rolling
    }

    #[inline]
    pub fn stacked_on(&self) -> Option<BallId> {
        self.stacked_on
    }

    #[inline]
    pub fn stacked_by(&self) -> Option<BallId> {
        self.stacked_by
    }

    /// Neither resting on a ball nor carrying one
    #[inline]
    pub fn is_unattached(&self) -> bool {
        self.stacked_on.is_none() && self.stacked_by.is_none()
    }

    /// Mark the ball as carried. A stacked ball cannot roll.
    pub fn start_rolling(&mut self) -> bool {
        if self.stacked_on.is_some() {
            return false;
        }
        self.is_rolling = true;
        true
    }

    pub fn stop_rolling(&mut self) {
        self.is_rolling = false;
    }

    /// Grow by one step while rolling.
    ///
    /// The cap is checked before growing and the step never crosses it, so a
    /// single call cannot push the size past `max_size` whatever the rate.
    pub fn grow(&mut self) {
        if self.is_rolling && self.size < self.max_size {
            self.size = (self.size + self.growth_rate).clamp(self.min_size, self.max_size);
        }
    }

    /// Move with the carrier without growing
    pub fn follow(&mut self, carrier: Vec2) {
        if self.is_rolling {
            self.pos = carrier;
        }
    }

    /// Per-tick position update.
    ///
    /// Rolling balls track `carrier` and grow. Stacked balls sit on `below`
    /// (the ball referenced by `stacked_on`). Loose balls stay put.
    pub fn update(&mut self, carrier: Vec2, below: Option<&Snowball>) {
        if self.is_rolling {
            self.pos = carrier;
            self.grow();
        } else if let (Some(under), Some(below)) = (self.stacked_on, below) {
            debug_assert_eq!(under, below.id);
            self.pos = resting_position(below.pos, below.size, self.size);
        }
    }
}

/// Positional pass over the whole arena.
///
/// Carried balls move first. Stacks are then settled from each bottom ball
/// upward, so a ball always rests on the already-updated ball beneath it
/// regardless of spawn order.
/// `grow_carried` is false while the carrier is outside the rolling zone.
pub fn update_positions(balls: &mut [Snowball], carrier: Vec2, grow_carried: bool) {
    for ball in balls.iter_mut().filter(|b| b.is_rolling) {
        if grow_carried {
            ball.update(carrier, None);
        } else {
            ball.follow(carrier);
        }
    }

    for i in 0..balls.len() {
        let Some(bottom) = balls.get(i) else {
            break;
        };
        if bottom.stacked_on.is_some() {
            continue;
        }
        let mut below = bottom.clone();
        let mut next = below.stacked_by;
        // A chain is never longer than the arena; stops on a corrupted cycle
        for _ in 0..balls.len() {
            let Some(top) = next.and_then(|id| balls.get_mut(id.index())) else {
                break;
            };
            top.update(carrier, Some(&below));
            below = top.clone();
            next = below.stacked_by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rolling_ball() -> Snowball {
        let mut ball = Snowball::new(BallId::new(0), Vec2::new(100.0, 100.0));
        assert!(ball.start_rolling());
        ball
    }

    #[test]
    fn test_grows_while_rolling() {
        let mut ball = rolling_ball();
        let initial = ball.size();
        for _ in 0..10 {
            ball.grow();
        }
        assert!(ball.size() > initial);
        assert!((ball.size() - (MIN_SIZE + 10.0 * GROWTH_RATE)).abs() < 0.001);
    }

    #[test]
    fn test_growth_converges_to_max() {
        let mut ball = rolling_ball();
        for _ in 0..1000 {
            ball.grow();
            assert!(ball.size() <= MAX_SIZE);
        }
        assert_eq!(ball.size(), MAX_SIZE);
    }

    #[test]
    fn test_large_growth_rate_never_overshoots() {
        let mut ball = rolling_ball().with_growth_rate(1000.0);
        ball.grow();
        assert_eq!(ball.size(), MAX_SIZE);
    }

    #[test]
    fn test_stationary_ball_does_not_grow() {
        let mut ball = Snowball::new(BallId::new(0), Vec2::ZERO);
        for _ in 0..50 {
            ball.grow();
        }
        assert_eq!(ball.size(), MIN_SIZE);
    }

    #[test]
    fn test_with_size_clamps() {
        let ball = Snowball::new(BallId::new(0), Vec2::ZERO).with_size(90.0);
        assert_eq!(ball.size(), MAX_SIZE);
        let ball = Snowball::new(BallId::new(0), Vec2::ZERO).with_size(5.0);
        assert_eq!(ball.size(), MIN_SIZE);
    }

    #[test]
    fn test_update_rolling_follows_and_grows() {
        let mut ball = rolling_ball();
        ball.update(Vec2::new(250.0, 40.0), None);
        assert_eq!(ball.pos, Vec2::new(250.0, 40.0));
        assert!(ball.size() > MIN_SIZE);
    }

    #[test]
    fn test_update_loose_ball_is_stationary() {
        let mut ball = Snowball::new(BallId::new(0), Vec2::new(10.0, 20.0));
        ball.update(Vec2::new(500.0, 500.0), None);
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_follow_does_not_grow() {
        let mut ball = rolling_ball();
        ball.follow(Vec2::new(7.0, 8.0));
        assert_eq!(ball.pos, Vec2::new(7.0, 8.0));
        assert_eq!(ball.size(), MIN_SIZE);
    }

    #[test]
    fn test_update_positions_rests_stack_above_base() {
        let mut balls = vec![
            Snowball::new(BallId::new(0), Vec2::new(600.0, 400.0)).with_size(60.0),
            Snowball::new(BallId::new(1), Vec2::new(610.0, 330.0)).with_size(40.0),
        ];
        balls[1].stacked_on = Some(BallId::new(0));
        balls[0].stacked_by = Some(BallId::new(1));

        update_positions(&mut balls, Vec2::ZERO, true);

        assert_eq!(balls[0].pos, Vec2::new(600.0, 400.0));
        assert_eq!(balls[1].pos, Vec2::new(600.0, 300.0));
    }

    #[test]
    fn test_update_positions_rests_on_later_spawned_base() {
        let mut balls = vec![
            Snowball::new(BallId::new(0), Vec2::new(600.0, 330.0)).with_size(40.0),
            Snowball::new(BallId::new(1), Vec2::new(600.0, 400.0)).with_size(60.0),
        ];
        assert!(crate::sim::stacking::stack_on(&mut balls, BallId::new(0), BallId::new(1)));

        update_positions(&mut balls, Vec2::ZERO, true);

        assert_eq!(balls[1].pos, Vec2::new(600.0, 400.0));
        assert_eq!(balls[0].pos, Vec2::new(600.0, 300.0));
    }

    #[test]
    fn test_update_positions_settles_whole_chain() {
        let mut balls = vec![
            Snowball::new(BallId::new(0), Vec2::new(0.0, -100.0)).with_size(20.0),
            Snowball::new(BallId::new(1), Vec2::new(0.0, 0.0)).with_size(60.0),
            Snowball::new(BallId::new(2), Vec2::new(0.0, -90.0)).with_size(40.0),
        ];
        assert!(crate::sim::stacking::stack_on(&mut balls, BallId::new(2), BallId::new(1)));
        assert!(crate::sim::stacking::stack_on(&mut balls, BallId::new(0), BallId::new(2)));

        update_positions(&mut balls, Vec2::ZERO, true);

        assert_eq!(balls[2].pos, Vec2::new(0.0, -100.0));
        assert_eq!(balls[0].pos, Vec2::new(0.0, -160.0));
    }

    #[test]
    fn test_invalid_growth_rates_are_refused() {
        let ball = Snowball::new(BallId::new(0), Vec2::ZERO).with_growth_rate(f32::NAN);
        assert_eq!(ball.growth_rate(), GROWTH_RATE);
        let ball = ball.with_growth_rate(-1.0).with_growth_rate(f32::INFINITY);
        assert_eq!(ball.growth_rate(), GROWTH_RATE);

        let mut ball = ball.with_growth_rate(0.5);
        assert_eq!(ball.growth_rate(), 0.5);
        assert!(ball.start_rolling());
        ball.grow();
        assert_eq!(ball.size(), MIN_SIZE + 0.5);
    }

    #[test]
    fn test_update_positions_outside_rolling_zone_only_follows() {
        let mut balls = vec![rolling_ball()];
        update_positions(&mut balls, Vec2::new(3.0, 4.0), false);
        assert_eq!(balls[0].pos, Vec2::new(3.0, 4.0));
        assert_eq!(balls[0].size(), MIN_SIZE);
    }

    proptest! {
        #[test]
        fn prop_growth_stays_in_bounds(rate in 0.0f32..200.0, steps in 0usize..600) {
            let mut ball = rolling_ball().with_growth_rate(rate);
            for _ in 0..steps {
                ball.grow();
                prop_assert!(ball.size() >= MIN_SIZE);
                prop_assert!(ball.size() <= MAX_SIZE);
            }
        }
    }
}
