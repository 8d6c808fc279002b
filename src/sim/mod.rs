//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One tick per display frame, no timestep scaling
//! - Seeded RNG only
//! - Single-threaded; input only writes the player's target between ticks

pub mod collision;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use collision::{first_collision, player_hits};
pub use pool::{EntityPool, SlotHandle};
pub use spawn::{Edge, should_spawn, spawn_at, spawn_interval, spawn_random, speed_multiplier};
pub use state::{
    Difficulty, GameEvent, GamePhase, GameState, Player, Pursuer, PursuerKind, Score, Viewport,
};
pub use steering::{integrate, is_out_of_bounds, steer, step_pursuers};
pub use tick::{TickOutcome, tick};
