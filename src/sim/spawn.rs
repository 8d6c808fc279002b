//! Time-gated pursuer spawning at the screen edges

use glam::Vec2;
use rand::Rng;

use super::state::{Difficulty, GameEvent, GameState, Pursuer, PursuerKind, Viewport};
use crate::consts::*;
use crate::heading_toward;

/// Ticks between spawns; non-increasing in difficulty, floored at 15
pub fn spawn_interval(difficulty: Difficulty) -> u64 {
    let effective = (difficulty.get() + DIFFICULTY_OFFSET) as i32;
    let interval = SPAWN_INTERVAL_BASE - effective * SPAWN_INTERVAL_STEP;
    (interval.max(0) as u64).max(SPAWN_INTERVAL_MIN)
}

/// Multiplier applied to a pursuer's base speed
pub fn speed_multiplier(difficulty: Difficulty) -> f32 {
    let effective = (difficulty.get() + DIFFICULTY_OFFSET) as f32;
    1.0 + (effective - 1.0) * SPEED_STEP
}

/// Whether the given frame is a spawn frame
pub fn should_spawn(frame: u64, difficulty: Difficulty) -> bool {
    frame > 0 && frame % spawn_interval(difficulty) == 0
}

/// Screen edge a pursuer enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Position just outside this edge, `along` in [0, 1) across its length
    pub fn spawn_point(self, viewport: &Viewport, along: f32, offset: f32) -> Vec2 {
        let (w, h) = (viewport.width, viewport.height);
        match self {
            Edge::Top => Vec2::new(along * w, -offset),
            Edge::Right => Vec2::new(w + offset, along * h),
            Edge::Bottom => Vec2::new(along * w, h + offset),
            Edge::Left => Vec2::new(-offset, along * h),
        }
    }
}

/// Roll a kind, speed and edge position, then spawn.
/// Returns false when the pool had no free slot.
pub fn spawn_random(state: &mut GameState) -> bool {
    if state.pool.is_exhausted() {
        state.events.push(GameEvent::SpawnSkipped);
        log::debug!("Pool exhausted, spawn skipped at frame {}", state.frame);
        return false;
    }

    let kind = if state.rng.random_bool(BIG_CHANCE) {
        PursuerKind::Big
    } else {
        PursuerKind::Small
    };
    let (lo, hi) = kind.base_speed_range();
    let speed = state.rng.random_range(lo..hi) * speed_multiplier(state.difficulty);

    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let along: f32 = state.rng.random();
    let pos = edge.spawn_point(&state.viewport, along, kind.size());
    let heading = heading_toward(pos, state.viewport.center());

    spawn_at(state, kind, pos, heading, speed)
}

/// Place a pursuer with explicit parameters. Returns false when the pool is
/// exhausted.
pub fn spawn_at(
    state: &mut GameState,
    kind: PursuerKind,
    pos: Vec2,
    heading: f32,
    speed: f32,
) -> bool {
    let Some(slot) = state.pool.acquire() else {
        state.events.push(GameEvent::SpawnSkipped);
        return false;
    };
    state.pursuers.push(Pursuer::new(slot, kind, pos, heading, speed));
    state.events.push(GameEvent::Spawned { slot, kind });
    log::debug!(
        "Spawned {} pursuer in slot {:?} at ({:.0}, {:.0})",
        kind.as_str(),
        slot,
        pos.x,
        pos.y
    );
    true
}
