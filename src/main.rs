//! Star Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use star_shooter::audio::AudioManager;
    use star_shooter::platform::InputQueue;
    use star_shooter::renderer::CanvasRenderer;
    use star_shooter::sim::{Frame, GameState, Viewport, tick};
    use star_shooter::{GameError, Settings};

    const SCORE_ELEMENT: &str = "score";
    const LOSS_ELEMENT: &str = "lose";
    const LOSS_MESSAGE: &str = "You lose!";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        input: InputQueue,
        document: Document,
    }

    impl Game {
        /// Run one tick and present it
        fn step(&mut self) {
            let input = self.input.drain();
            let frame = tick(&mut self.state, &input);
            self.renderer.render(&frame);
            self.audio.handle_events(&frame.events);
            self.update_hud(&frame);
        }

        /// Update score readout in DOM
        fn update_hud(&self, frame: &Frame) {
            if let Some(el) = self.document.get_element_by_id(SCORE_ELEMENT) {
                el.set_text_content(Some(&frame.score_text()));
            }
        }

        fn show_loss(&self) {
            if let Some(el) = self.document.get_element_by_id(LOSS_ELEMENT) {
                el.set_text_content(Some(LOSS_MESSAGE));
            }
        }
    }

    pub fn run() -> Result<(), GameError> {
        log::info!("Star Shooter starting...");

        let window = web_sys::window().ok_or_else(|| GameError::platform("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::platform("no document"))?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .ok_or_else(|| GameError::platform("no canvas"))?
            .dyn_into()
            .map_err(|_| GameError::platform("not a canvas"))?;

        let settings = Settings::load(&canvas)?;

        // Size the canvas to the viewport once; resizes are ignored
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let viewport = Viewport::new(width as f32, height as f32)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| GameError::platform("no 2d context"))?
            .dyn_into()
            .map_err(|_| GameError::platform("not a 2d context"))?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let audio = AudioManager::new(&settings);
        let state = GameState::new(settings, viewport, seed)?;

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer::new(ctx, viewport),
            audio,
            input: InputQueue::new(),
            document,
        }));

        setup_input_handlers(&window, game.clone());

        request_animation_frame(game);

        log::info!("Star Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if game.borrow_mut().input.push_key(&key) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = {
            let mut g = game.borrow_mut();
            g.step();
            if !g.state.is_running() {
                g.show_loss();
            }
            g.state.is_running()
        };

        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    match wasm_game::run() {
        Ok(()) => {}
        Err(e) if e.is_fatal() => log::error!("Failed to start: {e}"),
        Err(e) => log::warn!("Started with errors: {e}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("Headless run failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the ship drifts and fires whenever allowed until it dies
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use star_shooter::sim::{GamePhase, GameState, InputEvent, TickInput, Viewport, tick};
    use star_shooter::{GameError, Settings};

    const DEMO_SEED: u64 = 2024;
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        frames: u64,
        score: u64,
        phase: GamePhase,
        enemies_left: usize,
    }

    pub fn run() -> Result<(), GameError> {
        let settings = Settings::default();
        let viewport = Viewport::new(1280.0, 720.0)?;
        let mut state = GameState::new(settings, viewport, DEMO_SEED)?;

        let fire = TickInput::new(vec![InputEvent::Fire]);
        while state.is_running() && state.frame_count < MAX_FRAMES {
            tick(&mut state, &fire);
        }

        let summary = RunSummary {
            seed: DEMO_SEED,
            frames: state.frame_count,
            score: state.score,
            phase: state.phase,
            enemies_left: state.enemies.len(),
        };
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| GameError::platform(format!("summary: {e}")))?;
        println!("{json}");
        Ok(())
    }
}
