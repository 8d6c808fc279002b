//! Round state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::{EntityPool, SlotHandle};
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Menu shown, no simulation
    #[default]
    Idle,
    /// Simulation running
    Playing,
    /// Result shown, simulation frozen
    Ended,
}

/// Selected difficulty, always within 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Difficulty(u8);

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(DEFAULT_DIFFICULTY)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = std::convert::Infallible;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(Difficulty::clamped(value))
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.0
    }
}

impl Difficulty {
    /// Clamp any integer into the valid range
    pub fn clamped(value: i64) -> Self {
        Difficulty(value.clamp(MIN_DIFFICULTY as i64, MAX_DIFFICULTY as i64) as u8)
    }

    /// Parse raw UI input. Leading integer digits are honored ("7", " 4 ", "5x");
    /// absent or non-numeric input falls back to the default.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(leading_integer)
            .map(Difficulty::clamped)
            .unwrap_or_default()
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first()? {
        b'-' => (-1, &s[1..]),
        b'+' => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long inputs; they clamp to the bounds anyway
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

/// Accumulated round score, counted in whole ticks so the 1/6 step stays exact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    ticks: u64,
}

impl Score {
    pub fn add_tick(&mut self) {
        self.ticks += 1;
    }

    /// Displayed/stored score
    pub fn floor(self) -> u64 {
        self.ticks / TICKS_PER_POINT
    }

    /// Fractional value of the accumulator
    pub fn value(self) -> f64 {
        self.ticks as f64 / TICKS_PER_POINT as f64
    }
}

/// Visible play area, re-read on every use so resizes take effect immediately
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player-controlled point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Latest raw pointer sample; the only field written by input
    pub target: Vec2,
    pub easing: f32,
}

impl Player {
    pub fn new(pos: Vec2, easing: f32) -> Self {
        Self {
            pos,
            target: pos,
            easing,
        }
    }

    /// Record a raw pointer sample (no smoothing on the target itself)
    pub fn set_target(&mut self, target: Vec2) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Ease toward the target by a fixed fraction, per axis
    pub fn track(&mut self) {
        self.pos += (self.target - self.pos) * self.easing;
    }

    pub fn recenter(&mut self, center: Vec2) {
        self.pos = center;
        self.target = center;
    }
}

/// Pursuer size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuerKind {
    Small,
    Big,
}

impl PursuerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PursuerKind::Small => "small",
            PursuerKind::Big => "big",
        }
    }

    /// Visual size; half of it is the collision radius
    pub fn size(&self) -> f32 {
        match self {
            PursuerKind::Small => 20.0,
            PursuerKind::Big => 60.0,
        }
    }

    /// Distance under which the pursuer steers toward the player
    pub fn follow_radius(&self) -> f32 {
        match self {
            PursuerKind::Small => 280.0,
            PursuerKind::Big => 180.0,
        }
    }

    /// Max heading change per tick (degrees)
    pub fn turn_speed(&self) -> f32 {
        match self {
            PursuerKind::Small => 3.5,
            PursuerKind::Big => 1.5,
        }
    }

    /// Unscaled speed range (pixels per tick), min inclusive, max exclusive
    pub fn base_speed_range(&self) -> (f32, f32) {
        match self {
            PursuerKind::Small => (1.0, 2.5),
            PursuerKind::Big => (0.5, 2.0),
        }
    }
}

/// An active pursuer bound to one pool slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub slot: SlotHandle,
    pub kind: PursuerKind,
    pub pos: Vec2,
    /// Derived from heading and speed each tick
    pub vel: Vec2,
    /// Degrees in [0, 360), 0 = up
    pub heading: f32,
    /// Last heading aimed at while the player was in range
    pub target_heading: f32,
    pub size: f32,
    /// Fixed at spawn time
    pub speed: f32,
    pub follow_radius: f32,
    pub turn_speed: f32,
}

impl Pursuer {
    pub fn new(slot: SlotHandle, kind: PursuerKind, pos: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            slot,
            kind,
            pos,
            vel: Vec2::ZERO,
            heading,
            target_heading: heading,
            size: kind.size(),
            speed,
            follow_radius: kind.follow_radius(),
            turn_speed: kind.turn_speed(),
        }
    }

    /// Collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }
}

/// Things that happened during a tick, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A pursuer was placed into a slot
    Spawned { slot: SlotHandle, kind: PursuerKind },
    /// A spawn tick found the pool empty
    SpawnSkipped,
    /// A pursuer left the viewport margin and its slot was freed
    Culled { slot: SlotHandle },
    /// The player touched a pursuer
    Collision { slot: SlotHandle },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: Score,
    /// Ticks simulated this round
    pub frame: u64,
    pub difficulty: Difficulty,
    pub viewport: Viewport,
    pub player: Player,
    /// Active pursuers; order carries no meaning
    pub pursuers: Vec<Pursuer>,
    pub pool: EntityPool,
    pub player_radius: f32,
    pub rng: Pcg32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, capacity: usize, viewport: Viewport) -> Self {
        let pool = EntityPool::new(capacity);
        Self {
            phase: GamePhase::Idle,
            score: Score::default(),
            frame: 0,
            difficulty: Difficulty::default(),
            viewport,
            player: Player::new(viewport.center(), EASING_FACTOR),
            pursuers: Vec::with_capacity(pool.capacity()),
            pool,
            player_radius: PLAYER_RADIUS,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Return every active pursuer to the pool, returning the freed slots
    pub fn release_all(&mut self) -> Vec<SlotHandle> {
        let slots: Vec<SlotHandle> = self.pursuers.drain(..).map(|p| p.slot).collect();
        for &slot in &slots {
            self.pool.release(slot);
        }
        slots
    }

    /// Clear round counters and recenter the player for a fresh round
    pub fn reset_round(&mut self, difficulty: Difficulty) -> Vec<SlotHandle> {
        let freed = self.release_all();
        self.difficulty = difficulty;
        self.score = Score::default();
        self.frame = 0;
        self.events.clear();
        self.player.recenter(self.viewport.center());
        self.phase = GamePhase::Playing;
        freed
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
