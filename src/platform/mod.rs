//! Platform abstraction layer
//!
//! The presentation side is an external collaborator. The core only talks to
//! it through [`RenderSink`]; pointer input arrives via
//! [`crate::Game::pointer_moved`] and storage via
//! [`crate::persistence::HighScoreStore`].

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::game::LifecycleEvent;
use crate::sim::{PursuerKind, SlotHandle};

/// What the display needs to place one pursuer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuerView {
    pub slot: SlotHandle,
    pub kind: PursuerKind,
    pub pos: Vec2,
    /// Degrees, 0 = up
    pub heading: f32,
}

/// Receives per-frame visuals and lifecycle transitions
pub trait RenderSink {
    /// Place a visible pursuer
    fn draw_pursuer(&mut self, view: &PursuerView);

    /// A slot went back to the pool; hide whatever showed it
    fn hide_pursuer(&mut self, slot: SlotHandle);

    fn draw_player(&mut self, _pos: Vec2) {}

    /// Floored score, sent every playing frame
    fn show_score(&mut self, _score: u64) {}

    /// Menu / playing / game-over screen changes
    fn lifecycle(&mut self, _event: &LifecycleEvent) {}
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_pursuer(&mut self, _view: &PursuerView) {}
    fn hide_pursuer(&mut self, _slot: SlotHandle) {}
}

/// Sink that keeps the latest frame in flat buffers for a host to pull.
///
/// Each drawn pursuer occupies [`FrameBuffer::STRIDE`] floats:
/// slot, kind (0 small, 1 big), x, y, heading.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    pub pursuers: Vec<f32>,
    pub hidden: Vec<u32>,
    pub player: Vec2,
    pub score: u64,
    pub lifecycle: Option<LifecycleEvent>,
}

impl FrameBuffer {
    pub const STRIDE: usize = 5;

    /// Drop per-frame draws; score and last lifecycle event persist
    pub fn clear(&mut self) {
        self.pursuers.clear();
        self.hidden.clear();
    }

    pub fn drawn_count(&self) -> usize {
        self.pursuers.len() / Self::STRIDE
    }
}

impl RenderSink for FrameBuffer {
    fn draw_pursuer(&mut self, view: &PursuerView) {
        let kind = match view.kind {
            PursuerKind::Small => 0.0,
            PursuerKind::Big => 1.0,
        };
        self.pursuers.extend_from_slice(&[
            view.slot.index() as f32,
            kind,
            view.pos.x,
            view.pos.y,
            view.heading,
        ]);
    }

    fn hide_pursuer(&mut self, slot: SlotHandle) {
        self.hidden.push(slot.index() as u32);
    }

    fn draw_player(&mut self, pos: Vec2) {
        self.player = pos;
    }

    fn show_score(&mut self, score: u64) {
        self.score = score;
    }

    fn lifecycle(&mut self, event: &LifecycleEvent) {
        self.lifecycle = Some(*event);
    }
}

/// Install the logger for the current platform
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
