//! Stacking rules and stack-target search
//!
//! Every function here is a pure decision over explicit collections, except
//! [`stack_on`] and [`unstack`] which are the only writers of the
//! `stacked_on`/`stacked_by` link pair.

use serde::{Deserialize, Serialize};

use super::snowball::{BallId, Snowball};
use super::snowman::{Snowman, SnowmanId};
use crate::consts::STACK_MARGIN;

/// Where a newly placed ball should go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackTarget {
    /// Ball to stack onto
    pub ball: BallId,
    /// Snowman whose open slot `ball` is, or `None` for a loose ball
    pub snowman: Option<SnowmanId>,
}

#[inline]
fn ball(balls: &[Snowball], id: BallId) -> Option<&Snowball> {
    let found = balls.get(id.index()).filter(|b| b.id == id);
    debug_assert!(found.is_some(), "unknown {id}");
    found
}

/// Can `candidate` be stacked on `base`?
///
/// The top ball must be strictly smaller, both slots must be free, and the
/// centers must be within `STACK_MARGIN` times the sum of the radii.
pub fn can_stack_on(balls: &[Snowball], candidate: BallId, base: BallId) -> bool {
    if candidate == base {
        return false;
    }
    let (Some(top), Some(bottom)) = (ball(balls, candidate), ball(balls, base)) else {
        return false;
    };
    if top.stacked_on.is_some() || bottom.stacked_by.is_some() {
        return false;
    }
    if top.size() >= bottom.size() {
        return false;
    }
    let reach = (bottom.size() + top.size()) * STACK_MARGIN;
    top.pos.distance(bottom.pos) < reach
}

/// Stack `candidate` on `base`. Returns false and leaves everything untouched
/// when the stack is not allowed.
pub fn stack_on(balls: &mut [Snowball], candidate: BallId, base: BallId) -> bool {
    if !can_stack_on(balls, candidate, base) {
        return false;
    }
    if let Some(top) = balls.get_mut(candidate.index()) {
        top.stacked_on = Some(base);
        top.is_rolling = false;
    }
    if let Some(bottom) = balls.get_mut(base.index()) {
        bottom.stacked_by = Some(candidate);
    }
    log::debug!("{candidate} stacked on {base}");
    true
}

/// Detach `id` from the ball beneath it and from the ball above it.
///
/// Returns true if any link was cleared.
pub fn unstack(balls: &mut [Snowball], id: BallId) -> bool {
    let Some(target) = ball(balls, id) else {
        return false;
    };
    let (below, above) = (target.stacked_on, target.stacked_by);

    if let Some(below) = below {
        if let Some(b) = balls.get_mut(below.index()) {
            if b.stacked_by == Some(id) {
                b.stacked_by = None;
            }
        }
    }
    if let Some(above) = above {
        if let Some(b) = balls.get_mut(above.index()) {
            if b.stacked_on == Some(id) {
                b.stacked_on = None;
            }
        }
    }
    if let Some(target) = balls.get_mut(id.index()) {
        target.stacked_on = None;
        target.stacked_by = None;
    }
    below.is_some() || above.is_some()
}

/// First incomplete snowman (in creation order) whose open slot accepts the ball
pub fn open_snowman_slot(
    balls: &[Snowball],
    new_ball: BallId,
    snowmen: &[Snowman],
) -> Option<StackTarget> {
    snowmen
        .iter()
        .filter(|s| !s.is_complete())
        .find_map(|s| {
            s.open_target()
                .filter(|&target| can_stack_on(balls, new_ball, target))
                .map(|target| StackTarget {
                    ball: target,
                    snowman: Some(s.id),
                })
        })
}

/// Largest unattached placed ball that accepts the new ball.
///
/// Equal sizes keep placement order.
pub fn largest_loose_ball(
    balls: &[Snowball],
    new_ball: BallId,
    placed: &[BallId],
) -> Option<StackTarget> {
    let mut loose: Vec<&Snowball> = placed
        .iter()
        .filter(|&&id| id != new_ball)
        .filter_map(|&id| ball(balls, id))
        .filter(|b| b.is_unattached())
        .collect();
    // sort_by is stable
    loose.sort_by(|a, b| b.size().total_cmp(&a.size()));

    loose
        .into_iter()
        .find(|b| can_stack_on(balls, new_ball, b.id))
        .map(|b| StackTarget {
            ball: b.id,
            snowman: None,
        })
}

/// Pick where `new_ball` should stack.
///
/// In-progress snowmen are finished before loose balls are considered.
pub fn find_stackable(
    balls: &[Snowball],
    new_ball: BallId,
    placed: &[BallId],
    snowmen: &[Snowman],
) -> Option<StackTarget> {
    open_snowman_slot(balls, new_ball, snowmen)
        .or_else(|| largest_loose_ball(balls, new_ball, placed))
}
