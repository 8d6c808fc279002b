//! Browser glue: LocalStorage backend and the JS-facing game handle

use wasm_bindgen::prelude::*;
use web_sys::Storage;

use super::FrameBuffer;
use crate::game::{Game, LifecycleEvent, LoopControl};
use crate::highscores::HighScores;
use crate::persistence::{HighScoreStore, StoreError};
use crate::settings::Settings;
use crate::sim::{GamePhase, Viewport};

/// High scores kept in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(HighScores::STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)
    }

    fn write(&self, scores: &HighScores) -> Result<(), StoreError> {
        let json = scores.to_json()?;
        Self::storage()?
            .set_item(HighScores::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> HighScores {
        match self.read() {
            Ok(Some(json)) => {
                let scores = HighScores::from_json(&json);
                log::info!("Loaded high scores from LocalStorage");
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(e) => {
                log::warn!("High scores unavailable: {}", e);
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) {
        match self.write(scores) {
            Ok(()) => log::info!("High scores saved"),
            Err(e) => log::warn!("Could not save high scores: {}", e),
        }
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    super::init_logging();
    log::info!("Triangle Dodge loaded");
}

/// Game handle driven from JavaScript.
///
/// The page forwards pointer moves and menu commands, calls `frame()` from
/// `requestAnimationFrame` while it returns true, and reads the latest
/// visuals through the getters.
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
    buffer: FrameBuffer,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let settings = Settings::load();
        let seed = settings
            .seed
            .unwrap_or_else(|| (math_random() * u64::MAX as f64) as u64);
        let mut web = WebGame {
            game: Game::new(
                &settings,
                Viewport::new(width, height),
                LocalStorageStore,
                seed,
            ),
            buffer: FrameBuffer::default(),
        };
        let difficulty = web.game.selected_difficulty();
        web.game.return_to_menu(difficulty, &mut web.buffer);
        web
    }

    /// Select a difficulty from the menu input; returns its best score
    pub fn set_difficulty(&mut self, raw: Option<String>) -> f64 {
        self.game.set_difficulty_raw(raw.as_deref()) as f64
    }

    /// Returns true when the page should start its frame loop
    pub fn start(&mut self, raw: Option<String>) -> bool {
        self.buffer.clear();
        self.game.start_raw(raw.as_deref(), &mut self.buffer) == LoopControl::Continue
    }

    pub fn restart(&mut self) -> bool {
        self.buffer.clear();
        self.game.restart(&mut self.buffer) == LoopControl::Continue
    }

    pub fn return_to_menu(&mut self, raw: Option<String>) {
        self.buffer.clear();
        self.game.return_to_menu_raw(raw.as_deref(), &mut self.buffer);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.game.pointer_moved(x, y);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.buffer.clear();
        self.game.resize(Viewport::new(width, height), &mut self.buffer);
    }

    /// Advance one frame; false means stop requesting frames
    pub fn frame(&mut self) -> bool {
        self.buffer.clear();
        self.game.frame(&mut self.buffer) == LoopControl::Continue
    }

    /// "idle", "playing" or "ended"
    pub fn phase(&self) -> String {
        match self.game.phase() {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Ended => "ended",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.buffer.score as f64
    }

    pub fn difficulty(&self) -> u8 {
        self.game.selected_difficulty().get()
    }

    pub fn high_score(&self) -> f64 {
        self.game.current_high_score() as f64
    }

    pub fn player_x(&self) -> f32 {
        self.buffer.player.x
    }

    pub fn player_y(&self) -> f32 {
        self.buffer.player.y
    }

    /// Pursuers drawn this frame, flattened: slot, kind, x, y, heading
    pub fn pursuers(&self) -> Vec<f32> {
        self.buffer.pursuers.clone()
    }

    /// Slots freed by the last command or frame
    pub fn hidden(&self) -> Vec<u32> {
        self.buffer.hidden.clone()
    }

    /// Whether the last finished round set a new best
    pub fn new_high_score(&self) -> bool {
        matches!(
            self.buffer.lifecycle,
            Some(LifecycleEvent::RoundEnded(result)) if result.new_high_score
        )
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Math, js_name = random)]
    fn math_random() -> f64;
}
