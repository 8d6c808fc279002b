//! Round/score controller and frame scheduler
//!
//! [`Game`] owns the simulation state, the high score table and the store.
//! The host calls [`Game::frame`] once per display refresh and keeps
//! scheduling frames only while it returns [`LoopControl::Continue`].
//!
//! Input, commands and frames all run on one thread; pointer samples land
//! between frames and only ever write the player's target. A multi-threaded
//! host must serialize those calls itself.

use glam::Vec2;

use crate::highscores::HighScores;
use crate::persistence::HighScoreStore;
use crate::platform::{PursuerView, RenderSink};
use crate::settings::Settings;
use crate::sim::{
    Difficulty, GameEvent, GamePhase, GameState, SlotHandle, TickOutcome, Viewport, tick,
};

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Game-over summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub difficulty: Difficulty,
    pub final_score: u64,
    /// Best score for this difficulty after the round
    pub high_score: u64,
    pub new_high_score: bool,
    pub frames: u64,
}

/// Screen transitions for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Menu shown with the selected difficulty and its best score
    Menu { difficulty: Difficulty, high_score: u64 },
    /// A round began
    RoundStarted { difficulty: Difficulty },
    /// A round ended
    RoundEnded(RoundResult),
}

pub struct Game<S: HighScoreStore> {
    state: GameState,
    /// Menu selection; copied into the round on start
    selected: Difficulty,
    high_scores: HighScores,
    store: S,
    last_result: Option<RoundResult>,
}

impl<S: HighScoreStore> Game<S> {
    /// Create a game in the menu, loading high scores from the store
    pub fn new(settings: &Settings, viewport: Viewport, mut store: S, seed: u64) -> Self {
        let settings = settings.clone().sanitized();
        let mut state = GameState::new(seed, settings.max_entities, viewport);
        state.player.easing = settings.easing_factor;
        state.player_radius = settings.player_radius;

        let high_scores = store.load();
        log::info!(
            "Game ready: {}x{} viewport, pool of {}, seed {}",
            viewport.width,
            viewport.height,
            settings.max_entities,
            seed
        );

        Self {
            state,
            selected: settings.difficulty,
            high_scores,
            store,
            last_result: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that stage scenarios directly
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn high_score_for(&self, difficulty: Difficulty) -> u64 {
        self.high_scores.best(difficulty)
    }

    /// Best score for the menu selection
    pub fn current_high_score(&self) -> u64 {
        self.high_score_for(self.selected)
    }

    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Latest raw pointer sample
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.state.player.set_target(Vec2::new(x, y));
    }

    /// Viewport changed. While playing, every pursuer is cleared and the
    /// spawner repopulates.
    pub fn resize(&mut self, viewport: Viewport, sink: &mut impl RenderSink) {
        self.state.viewport = viewport;
        if self.state.phase == GamePhase::Playing {
            let freed = self.state.release_all();
            log::debug!("Viewport resized, cleared {} pursuers", freed.len());
            hide_all(sink, &freed);
        }
    }

    /// Update the menu selection, returning the stored best for it
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> u64 {
        self.selected = difficulty;
        self.current_high_score()
    }

    /// [`Game::set_difficulty`] from raw UI input, via [`Difficulty::parse`]:
    /// clamped to 1..=10, absent or non-numeric input selects 3
    pub fn set_difficulty_raw(&mut self, raw: Option<&str>) -> u64 {
        self.set_difficulty(Difficulty::parse(raw))
    }

    /// [`Game::start`] from raw UI input, parsed like [`Game::set_difficulty_raw`]
    pub fn start_raw(&mut self, raw: Option<&str>, sink: &mut impl RenderSink) -> LoopControl {
        self.start(Difficulty::parse(raw), sink)
    }

    /// [`Game::return_to_menu`] from raw UI input, parsed like
    /// [`Game::set_difficulty_raw`]
    pub fn return_to_menu_raw(&mut self, raw: Option<&str>, sink: &mut impl RenderSink) {
        self.return_to_menu(Difficulty::parse(raw), sink)
    }

    /// Begin a round at the given difficulty. Raw UI values go through
    /// [`Difficulty::parse`] or [`Difficulty::clamped`] first, or use
    /// [`Game::start_raw`].
    pub fn start(&mut self, difficulty: Difficulty, sink: &mut impl RenderSink) -> LoopControl {
        self.selected = difficulty;
        let freed = self.state.reset_round(difficulty);
        hide_all(sink, &freed);
        self.last_result = None;

        log::info!("Round started at difficulty {}", difficulty.get());
        sink.draw_player(self.state.player.pos);
        sink.show_score(0);
        sink.lifecycle(&LifecycleEvent::RoundStarted { difficulty });
        LoopControl::Continue
    }

    /// Play again at the current selection
    pub fn restart(&mut self, sink: &mut impl RenderSink) -> LoopControl {
        self.start(self.selected, sink)
    }

    /// Leave the round (playing or ended) for the menu
    pub fn return_to_menu(&mut self, difficulty: Difficulty, sink: &mut impl RenderSink) {
        let freed = self.state.release_all();
        hide_all(sink, &freed);
        self.state.phase = GamePhase::Idle;
        self.selected = difficulty;

        log::info!("Back to menu (difficulty {})", difficulty.get());
        sink.lifecycle(&LifecycleEvent::Menu {
            difficulty,
            high_score: self.current_high_score(),
        });
    }

    /// Run one display frame. Returns whether another frame should be
    /// scheduled; the phase is re-checked after the tick, so a collision
    /// stops the loop on the same frame.
    pub fn frame(&mut self, sink: &mut impl RenderSink) -> LoopControl {
        if self.state.phase != GamePhase::Playing {
            return LoopControl::Stop;
        }

        let outcome = tick(&mut self.state);
        self.present(sink);

        if let TickOutcome::Collided { slot } = outcome {
            self.end_round(slot, sink);
        }

        if self.state.phase == GamePhase::Playing {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }

    fn present(&mut self, sink: &mut impl RenderSink) {
        for event in self.state.drain_events() {
            if let GameEvent::Culled { slot } = event {
                sink.hide_pursuer(slot);
            }
        }
        for p in &self.state.pursuers {
            sink.draw_pursuer(&PursuerView {
                slot: p.slot,
                kind: p.kind,
                pos: p.pos,
                heading: p.heading,
            });
        }
        sink.draw_player(self.state.player.pos);
        sink.show_score(self.state.score.floor());
    }

    fn end_round(&mut self, slot: SlotHandle, sink: &mut impl RenderSink) {
        let difficulty = self.state.difficulty;
        let final_score = self.state.score.floor();
        let new_high_score = self.high_scores.record(difficulty, final_score);
        if new_high_score {
            self.store.save(&self.high_scores);
        }

        let result = RoundResult {
            difficulty,
            final_score,
            high_score: self.high_scores.best(difficulty),
            new_high_score,
            frames: self.state.frame,
        };
        self.last_result = Some(result);

        log::info!(
            "Round over at difficulty {}: score {} (hit by slot {}){}",
            difficulty.get(),
            final_score,
            slot.index(),
            if new_high_score { ", new high score" } else { "" }
        );
        sink.lifecycle(&LifecycleEvent::RoundEnded(result));
    }
}

fn hide_all(sink: &mut impl RenderSink, slots: &[SlotHandle]) {
    for &slot in slots {
        sink.hide_pursuer(slot);
    }
}
