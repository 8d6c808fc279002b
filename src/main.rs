//! Triangle Dodge entry point
//!
//! Native builds run a headless round: an autopilot pointer flees the nearest
//! pursuer until it is caught or the frame budget runs out. Browser builds
//! drive `Game` from the page's animation frame callback.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use triangle_dodge::persistence::FileStore;
    use triangle_dodge::platform::{self, PursuerView, RenderSink};
    use triangle_dodge::sim::{Difficulty, GameState, SlotHandle, Viewport};
    use triangle_dodge::{Game, LifecycleEvent, LoopControl, Settings};

    const DEFAULT_MAX_FRAMES: u64 = 60 * 60;
    const HIGH_SCORE_FILE: &str = "triangle-dodge-highscores.json";

    /// Counts what a display would have shown and logs screen changes
    #[derive(Default)]
    struct LogSink {
        draws: u64,
        hides: u64,
    }

    impl RenderSink for LogSink {
        fn draw_pursuer(&mut self, _view: &PursuerView) {
            self.draws += 1;
        }

        fn hide_pursuer(&mut self, _slot: SlotHandle) {
            self.hides += 1;
        }

        fn lifecycle(&mut self, event: &LifecycleEvent) {
            match event {
                LifecycleEvent::Menu { difficulty, high_score } => log::info!(
                    "Menu: difficulty {}, high score {}",
                    difficulty.get(),
                    high_score
                ),
                LifecycleEvent::RoundStarted { difficulty } => {
                    log::info!("Playing at difficulty {}", difficulty.get())
                }
                LifecycleEvent::RoundEnded(result) if result.new_high_score => {
                    log::info!("New high score: {}!", result.final_score)
                }
                LifecycleEvent::RoundEnded(result) => log::info!(
                    "Your score: {} (high score {})",
                    result.final_score,
                    result.high_score
                ),
            }
        }
    }

    /// Pointer that steers away from the closest pursuer, pulled back toward
    /// the middle of the screen
    fn evasive_pointer(state: &GameState) -> Vec2 {
        let center = state.viewport.center();
        let me = state.player.pos;
        let threat = state
            .pursuers
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(me)
                    .total_cmp(&b.pos.distance_squared(me))
            });

        let away = match threat {
            Some(p) if p.pos.distance(me) < p.follow_radius => {
                (me - p.pos).normalize_or_zero() * 120.0
            }
            _ => Vec2::ZERO,
        };
        let home = (center - me) * 0.2;
        let bounds = Vec2::new(state.viewport.width, state.viewport.height);
        (me + away + home).clamp(Vec2::ZERO, bounds)
    }

    fn seed_from_clock() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        platform::init_logging();
        log::info!("Triangle Dodge (headless) starting...");

        let mut args = std::env::args().skip(1);
        let settings = Settings::load();
        let difficulty = match args.next() {
            Some(raw) => Difficulty::parse(Some(&raw)),
            None => settings.difficulty,
        };
        let max_frames = args
            .next()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FRAMES);

        let seed = settings.seed.unwrap_or_else(seed_from_clock);
        let store = FileStore::new(HIGH_SCORE_FILE);
        let mut game = Game::new(&settings, Viewport::default(), store, seed);
        let mut sink = LogSink::default();

        game.set_difficulty(difficulty);
        let mut control = game.start(difficulty, &mut sink);
        let mut frames = 0;
        while control == LoopControl::Continue && frames < max_frames {
            let target = evasive_pointer(game.state());
            game.pointer_moved(target.x, target.y);
            control = game.frame(&mut sink);
            frames += 1;
        }

        match game.last_result() {
            Some(result) => println!(
                "Caught after {} frames. Score {} at difficulty {} (best {})",
                result.frames,
                result.final_score,
                result.difficulty.get(),
                result.high_score
            ),
            None => println!(
                "Survived {} frames. Score {} at difficulty {}",
                frames,
                game.state().score.floor(),
                difficulty.get()
            ),
        }
        log::debug!("{} pursuer draws, {} hides", sink.draws, sink.hides);

        game.return_to_menu(difficulty, &mut sink);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts load the library and drive `platform::web::WebGame`
}
