//! One simulation tick
//!
//! Order within a tick is fixed: advance counters, spawn, ease the player,
//! steer + move + cull pursuers, then test collisions against the post-move
//! positions.

use super::collision::first_collision;
use super::pool::SlotHandle;
use super::spawn::{should_spawn, spawn_random};
use super::state::{GameEvent, GamePhase, GameState};
use super::steering::step_pursuers;

/// What a tick did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing was simulated
    Skipped,
    /// Round continues
    Running,
    /// The player touched a pursuer; phase is now Ended
    Collided { slot: SlotHandle },
}

/// Advance the round by one tick
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::Skipped;
    }

    state.frame += 1;
    state.score.add_tick();

    if should_spawn(state.frame, state.difficulty) {
        spawn_random(state);
    }

    state.player.track();
    step_pursuers(state);

    match first_collision(state.player.pos, state.player_radius, &state.pursuers) {
        Some(slot) => {
            state.phase = GamePhase::Ended;
            state.events.push(GameEvent::Collision { slot });
            TickOutcome::Collided { slot }
        }
        None => TickOutcome::Running,
    }
}
