//! Snowman assembly: base, middle and head filled strictly in that order

use serde::{Deserialize, Serialize};

use super::snowball::{BallId, Snowball};
use super::stacking::stack_on;

/// Handle of a snowman, in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnowmanId(u32);

impl SnowmanId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SnowmanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "snowman#{}", self.0)
    }
}

/// Assembly progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnowmanStage {
    /// Only the base is set
    Base,
    /// Base and middle set, head missing
    AwaitingHead,
    /// All three tiers set; accepts nothing more
    Complete,
}

/// Result of [`Snowman::add_ball`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddBallOutcome {
    /// Ball refused, snowman unchanged
    Rejected,
    /// Ball became the middle tier
    Added,
    /// Ball became the head; the snowman just completed
    Completed,
}

impl AddBallOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, AddBallOutcome::Rejected)
    }

    pub fn became_complete(&self) -> bool {
        matches!(self, AddBallOutcome::Completed)
    }
}

/// A snowman under construction (or finished)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snowman {
    pub id: SnowmanId,
    base: BallId,
    middle: Option<BallId>,
    head: Option<BallId>,
    stage: SnowmanStage,
}

impl Snowman {
    /// Start a snowman on `base`
    pub fn new(id: SnowmanId, base: BallId) -> Self {
        Self {
            id,
            base,
            middle: None,
            head: None,
            stage: SnowmanStage::Base,
        }
    }

    pub fn base(&self) -> BallId {
        self.base
    }

    pub fn middle(&self) -> Option<BallId> {
        self.middle
    }

    pub fn head(&self) -> Option<BallId> {
        self.head
    }

    pub fn stage(&self) -> SnowmanStage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.stage == SnowmanStage::Complete
    }

    /// Slots bottom to top
    pub fn tiers(&self) -> [Option<BallId>; 3] {
        [Some(self.base), self.middle, self.head]
    }

    /// The ball the next tier must be stacked on, if any
    pub fn open_target(&self) -> Option<BallId> {
        match self.stage {
            SnowmanStage::Base => Some(self.base),
            SnowmanStage::AwaitingHead => self.middle,
            SnowmanStage::Complete => None,
        }
    }

    /// Put `ball` on the open slot.
    ///
    /// The ball must be strictly smaller than the tier below and within
    /// stacking reach of it; otherwise nothing changes.
    pub fn add_ball(&mut self, balls: &mut [Snowball], ball: BallId) -> AddBallOutcome {
        let Some(target) = self.open_target() else {
            return AddBallOutcome::Rejected;
        };
        if !is_smaller(balls, ball, target) || !stack_on(balls, ball, target) {
            return AddBallOutcome::Rejected;
        }

        match self.stage {
            SnowmanStage::Base => {
                self.middle = Some(ball);
                self.stage = SnowmanStage::AwaitingHead;
                AddBallOutcome::Added
            }
            SnowmanStage::AwaitingHead => {
                self.head = Some(ball);
                self.stage = SnowmanStage::Complete;
                log::info!("{} complete", self.id);
                AddBallOutcome::Completed
            }
            SnowmanStage::Complete => AddBallOutcome::Rejected,
        }
    }
}

fn is_smaller(balls: &[Snowball], ball: BallId, than: BallId) -> bool {
    match (balls.get(ball.index()), balls.get(than.index())) {
        (Some(a), Some(b)) => a.size() < b.size(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Base 60, middle 40, head 20 lined up so the head only reaches the
    /// middle once the middle is in place.
    fn tiers() -> Vec<Snowball> {
        vec![
            Snowball::new(BallId::new(0), Vec2::new(600.0, 400.0)).with_size(60.0),
            Snowball::new(BallId::new(1), Vec2::new(600.0, 300.0)).with_size(40.0),
            Snowball::new(BallId::new(2), Vec2::new(600.0, 230.0)).with_size(20.0),
            Snowball::new(BallId::new(3), Vec2::new(600.0, 210.0)).with_size(20.0),
        ]
    }

    #[test]
    fn test_new_snowman_offers_base() {
        let snowman = Snowman::new(SnowmanId::new(0), BallId::new(0));
        assert_eq!(snowman.stage(), SnowmanStage::Base);
        assert_eq!(snowman.open_target(), Some(BallId::new(0)));
        assert!(!snowman.is_complete());
    }

    #[test]
    fn test_assembly_order() {
        let mut balls = tiers();
        let mut snowman = Snowman::new(SnowmanId::new(0), BallId::new(0));

        // Head first is refused
        assert_eq!(snowman.add_ball(&mut balls, BallId::new(2)), AddBallOutcome::Rejected);
        assert_eq!(snowman.middle(), None);
        assert!(balls[2].is_unattached());

        assert_eq!(snowman.add_ball(&mut balls, BallId::new(1)), AddBallOutcome::Added);
        assert_eq!(snowman.stage(), SnowmanStage::AwaitingHead);
        assert_eq!(snowman.open_target(), Some(BallId::new(1)));

        let outcome = snowman.add_ball(&mut balls, BallId::new(2));
        assert!(outcome.became_complete());
        assert!(snowman.is_complete());
        assert_eq!(
            snowman.tiers(),
            [Some(BallId::new(0)), Some(BallId::new(1)), Some(BallId::new(2))]
        );
        assert_eq!(balls[2].stacked_on(), Some(BallId::new(1)));
        assert_eq!(balls[1].stacked_on(), Some(BallId::new(0)));
    }

    #[test]
    fn test_complete_snowman_rejects_more() {
        let mut balls = tiers();
        let mut snowman = Snowman::new(SnowmanId::new(0), BallId::new(0));
        snowman.add_ball(&mut balls, BallId::new(1));
        snowman.add_ball(&mut balls, BallId::new(2));
        let before = snowman.tiers();

        assert_eq!(snowman.add_ball(&mut balls, BallId::new(3)), AddBallOutcome::Rejected);
        assert_eq!(snowman.tiers(), before);
        assert_eq!(snowman.open_target(), None);
        assert!(balls[3].is_unattached());
    }

    #[test]
    fn test_middle_must_be_smaller_than_base() {
        let mut balls = vec![
            Snowball::new(BallId::new(0), Vec2::new(0.0, 0.0)).with_size(40.0),
            Snowball::new(BallId::new(1), Vec2::new(0.0, -50.0)).with_size(40.0),
        ];
        let mut snowman = Snowman::new(SnowmanId::new(0), BallId::new(0));
        assert_eq!(snowman.add_ball(&mut balls, BallId::new(1)), AddBallOutcome::Rejected);
        assert_eq!(snowman.stage(), SnowmanStage::Base);
    }

    #[test]
    fn test_head_must_be_smaller_than_middle() {
        let mut balls = vec![
            Snowball::new(BallId::new(0), Vec2::new(0.0, 0.0)).with_size(60.0),
            Snowball::new(BallId::new(1), Vec2::new(0.0, -100.0)).with_size(30.0),
            Snowball::new(BallId::new(2), Vec2::new(0.0, -150.0)).with_size(50.0),
        ];
        let mut snowman = Snowman::new(SnowmanId::new(0), BallId::new(0));
        assert!(snowman.add_ball(&mut balls, BallId::new(1)).is_accepted());
        assert_eq!(snowman.add_ball(&mut balls, BallId::new(2)), AddBallOutcome::Rejected);
        assert_eq!(snowman.head(), None);
        assert_eq!(snowman.stage(), SnowmanStage::AwaitingHead);
    }
}
