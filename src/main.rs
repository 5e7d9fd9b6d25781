//! Hard Maze entry point
//!
//! Handles platform-specific initialization and wires input to the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlSelectElement};

    use hard_maze::input::{KeyAction, action_for_key};
    use hard_maze::render::layout::{canvas_side, cell_size};
    use hard_maze::render::{CanvasRenderer, MazeRenderer};
    use hard_maze::sim::{GameEvent, GameSession};
    use hard_maze::{Difficulty, Settings};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        settings: Settings,
    }

    impl Game {
        /// Size the canvas to the view and redraw at the new cell size
        fn fit_canvas(&mut self) {
            let document = web_sys::window().and_then(|w| w.document());
            let Some(view) = document.and_then(|d| d.get_element_by_id("view")) else {
                return;
            };
            let w = view.client_width() as f32;
            let h = match view.client_height() {
                0 => w,
                h => h as f32,
            };
            let side = canvas_side(w, h);
            self.canvas.set_width(side as u32);
            self.canvas.set_height(side as u32);
            let dimension = self.session.maze().dimension();
            self.renderer.resize(cell_size(side, dimension));
            self.redraw();
        }

        fn redraw(&mut self) {
            let maze = self.session.maze().clone();
            if let Err(e) = self.renderer.redraw(&maze, self.session.state()) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Generate a maze at the selected difficulty
        fn new_game(&mut self) {
            let difficulty = Difficulty::resolve(selected_difficulty().as_deref());
            self.session.set_difficulty(difficulty);
            if let Err(e) = self.session.new_game() {
                log::error!("New game failed: {}", e);
                return;
            }
            if self.settings.difficulty != difficulty {
                self.settings.difficulty = difficulty;
                self.settings.save();
            }
            set_class("message-container", "hidden");
            self.fit_canvas();
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::Moved { .. } => {
                    let maze = self.session.maze().clone();
                    if let Err(e) = self.renderer.draw_player(&maze, self.session.state()) {
                        log::warn!("Render error: {:?}", e);
                    }
                }
                GameEvent::Completed { moves, optimal } => {
                    let maze = self.session.maze().clone();
                    if let Err(e) = self.renderer.draw_player(&maze, self.session.state()) {
                        log::warn!("Render error: {:?}", e);
                    }
                    show_victory(moves, optimal);
                }
                GameEvent::NewMaze { .. } => self.fit_canvas(),
                GameEvent::Blocked | GameEvent::Ignored => {}
            }
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_class(id: &str, class: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn selected_difficulty() -> Option<String> {
        let select: HtmlSelectElement = document()?
            .get_element_by_id("diff-select")?
            .dyn_into()
            .ok()?;
        Some(select.value())
    }

    fn show_victory(moves: u32, optimal: u32) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("moves")) {
            el.set_text_content(Some(&format!(
                "You moved {} steps (shortest: {}).",
                moves, optimal
            )));
        }
        set_class("message-container", "");
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Hard Maze starting...");

        let document = document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("maze-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();

        // Reflect the persisted difficulty in the select box
        if let Some(select) = document
            .get_element_by_id("diff-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(&settings.difficulty.dimension().to_string());
        }

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::from_settings(&settings, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", session.seed());

        let renderer = CanvasRenderer::new(ctx, 0.0, settings.show_trail);
        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            canvas,
            settings,
        }));
        game.borrow_mut().fit_canvas();

        setup_keyboard(game.clone());
        setup_start_button(game.clone());
        setup_ok_button();
        setup_resize(game);

        set_class("maze-container", "");
        log::info!("Hard Maze running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(action) = action_for_key(&event.key()) else {
                return;
            };
            let mut g = game.borrow_mut();
            match action {
                KeyAction::Move(_) => {
                    event.prevent_default();
                    match g.session.handle_action(action) {
                        Ok(Some(ev)) => g.handle_event(ev),
                        Ok(None) => {}
                        Err(e) => log::error!("Move failed: {}", e),
                    }
                }
                KeyAction::NewGame => g.new_game(),
                KeyAction::Quit => set_class("message-container", "hidden"),
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("start-btn")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().new_game();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_ok_button() {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("ok-btn")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            set_class("message-container", "hidden");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_canvas();
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io::{self, BufRead, Write};
    use std::time::{SystemTime, UNIX_EPOCH};

    use hard_maze::input::{KeyAction, action_for_key};
    use hard_maze::render::{AsciiRenderer, MazeRenderer};
    use hard_maze::sim::{GameEvent, GameSession};
    use hard_maze::{Difficulty, Settings};

    const HELP: &str = "w/a/s/d move, n new maze, 1-4 difficulty, q quit";

    fn draw(renderer: &mut AsciiRenderer, session: &GameSession) -> Result<(), Box<dyn Error>> {
        renderer.redraw(session.maze(), session.state())?;
        let mut out = io::stdout().lock();
        write!(out, "{}", renderer.frame())?;
        writeln!(
            out,
            "{} | moves: {} | {}",
            session.difficulty().as_str(),
            session.state().move_count,
            HELP
        )?;
        out.flush()?;
        Ok(())
    }

    /// Usage: `hard-maze [difficulty] [seed]`
    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut settings = Settings::load();
        let mut args = std::env::args().skip(1);
        if let Some(label) = args.next() {
            settings.difficulty = Difficulty::resolve(Some(&label));
        }
        // Seeds from the command line or environment apply to this run only
        let seed_override = match args.next() {
            Some(seed) => Some(seed.parse()?),
            None => Settings::seed_override(),
        };

        let clock_seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64;
        let mut session = GameSession::from_settings(&settings.for_run(seed_override), clock_seed)?;
        log::info!("Game initialized with seed: {}", session.seed());

        let mut renderer = AsciiRenderer::new(settings.show_trail);
        draw(&mut renderer, &session)?;

        for line in io::stdin().lock().lines() {
            let line = line?;
            for ch in line.chars() {
                if let Some(difficulty) = ch
                    .to_digit(10)
                    .and_then(|d| Difficulty::ALL.get((d as usize).checked_sub(1)?).copied())
                {
                    session.set_difficulty(difficulty);
                    settings.difficulty = difficulty;
                    session.new_game()?;
                    continue;
                }

                let Some(action) = action_for_key(&ch.to_string()) else {
                    continue;
                };
                if action == KeyAction::Quit {
                    settings.save();
                    return Ok(());
                }
                let event = session.handle_action(action)?;
                if let Some(GameEvent::Completed { moves, optimal }) = event {
                    draw(&mut renderer, &session)?;
                    println!(
                        "You moved {} steps (shortest: {}). Press n for a new maze.",
                        moves, optimal
                    );
                }
            }
            draw(&mut renderer, &session)?;
        }

        settings.save();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hard Maze (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("hard-maze: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
