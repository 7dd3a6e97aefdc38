//! Per-frame simulation tick
//!
//! Order within a tick: clear the previous tick's events, activation, player movement, spawn/place decisions
//! (including stacking), then the positional pass. Placement runs before the
//! positional pass so a freshly stacked ball is already resting on its base
//! when the tick returns.

use glam::Vec2;

use super::phase::GamePhase;
use super::snowball::{BallId, update_positions};
use super::snowman::{AddBallOutcome, Snowman};
use super::stacking::find_stackable;
use super::state::{GameEvent, GameState};
use super::zone::ZoneGate;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction, components in [-1, 1]
    pub move_dir: Vec2,
    /// Roll button held. Pressing starts a snowball, releasing places it.
    pub roll: bool,
    /// Primary activation (click/tap) position
    pub activate: Option<Vec2>,
}

/// Advance the game by one tick using the state's own world zones
pub fn tick(state: &mut GameState, input: &TickInput) {
    let world = state.world;
    tick_with(state, &world, input);
}

/// Advance the game by one tick against an external zone gate
pub fn tick_with<Z: ZoneGate + ?Sized>(state: &mut GameState, zones: &Z, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    if let Some(point) = input.activate {
        let control = state.play_control;
        if state.phase.activate(point, &control) {
            state.spawn_player();
            state.push_event(GameEvent::GameStarted);
        }
    }

    if state.phase == GamePhase::Playing {
        drive_player(state, zones, input);
    }

    let (carrier, grow_carried) = match &state.player {
        Some(player) => (player.pos, zones.point_in_rolling_zone(player.pos)),
        None => (Vec2::ZERO, false),
    };
    update_positions(&mut state.balls, carrier, grow_carried);
}

fn drive_player<Z: ZoneGate + ?Sized>(state: &mut GameState, zones: &Z, input: &TickInput) {
    let Some(player) = state.player.as_mut() else {
        return;
    };
    player.move_by(input.move_dir);
    let (pos, carrying) = (player.pos, player.carrying);

    if input.roll {
        if carrying.is_none() && zones.point_in_rolling_zone(pos) {
            let id = state.spawn_rolling_snowball(pos);
            if let Some(player) = state.player.as_mut() {
                player.carrying = Some(id);
            }
            log::debug!("Started rolling {id} at {pos}");
        }
    } else if let Some(id) = carrying {
        if zones.point_in_building_zone(pos) {
            place_snowball(state, id, pos);
        }
    }
}

/// Drop the carried ball at `pos` and try to stack it
fn place_snowball(state: &mut GameState, id: BallId, pos: Vec2) {
    if let Some(player) = state.player.as_mut() {
        player.carrying = None;
    }
    if let Some(ball) = state.balls.get_mut(id.index()) {
        ball.pos = pos;
        ball.stop_rolling();
    }
    state.placed_balls.push(id);
    state.push_event(GameEvent::SnowballPlaced(id));
    log::debug!("Placed {id} at {pos}");

    resolve_stack(state, id);
}

/// Stack a just-placed ball onto the best target, creating a snowman when
/// the target is a loose ball. Returns the assembly outcome.
fn resolve_stack(state: &mut GameState, id: BallId) -> AddBallOutcome {
    let Some(target) = find_stackable(&state.balls, id, &state.placed_balls, &state.snowmen)
    else {
        log::debug!("{id} left loose");
        return AddBallOutcome::Rejected;
    };

    let (snowman_id, outcome) = match target.snowman {
        Some(snowman_id) => {
            let outcome = match state.snowmen.get_mut(snowman_id.get() as usize) {
                Some(snowman) => snowman.add_ball(&mut state.balls, id),
                None => AddBallOutcome::Rejected,
            };
            (snowman_id, outcome)
        }
        None => {
            let mut snowman = Snowman::new(state.next_snowman_id(), target.ball);
            let outcome = snowman.add_ball(&mut state.balls, id);
            let snowman_id = snowman.id;
            if outcome.is_accepted() {
                state.add_snowman(snowman);
            }
            (snowman_id, outcome)
        }
    };

    if !outcome.is_accepted() {
        log::warn!("{id} could not join {snowman_id} after being matched to it");
        return outcome;
    }
    state.push_event(GameEvent::SnowballStacked {
        ball: id,
        on: target.ball,
    });

    if outcome.became_complete() {
        state.push_event(GameEvent::SnowmanCompleted(snowman_id));
        if state.phase.snowman_completed() {
            state.push_event(GameEvent::Celebration);
        }
    }
    outcome
}
