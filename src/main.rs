//! Flappy Cat entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_cat::persistence::LocalStore;
    use flappy_cat::platform::{InputEvent, InputQueue};
    use flappy_cat::renderer::{RenderState, build_scene};
    use flappy_cat::sim::SeededRandom;
    use flappy_cat::ui::hud_texts;
    use flappy_cat::{Session, Tuning};

    /// Border the canvas leaves inside its container
    const CONTAINER_MARGIN: f64 = 6.0;

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore, SeededRandom>,
        render_state: Option<RenderState>,
        input: InputQueue,
        /// Last HUD markup written, to skip redundant DOM updates
        hud_cache: String,
    }

    impl Game {
        /// Apply queued input, tick, draw
        fn frame(&mut self) {
            for event in self.input.drain() {
                self.session.handle_input(event);
            }

            let view = self.session.frame();
            let vertices = build_scene(&view);
            let hud = hud_markup(&view);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if hud != self.hud_cache {
                if let Some(el) = document().and_then(|d| d.get_element_by_id("hud")) {
                    el.set_inner_html(&hud);
                }
                self.hud_cache = hud;
            }
        }
    }

    /// Absolutely positioned text spans for the HUD overlay
    fn hud_markup(view: &flappy_cat::FrameView) -> String {
        hud_texts(view)
            .into_iter()
            .map(|t| {
                format!(
                    "<div class=\"hud-text\" style=\"left:{:.1}px;top:{:.1}px;font-size:{:.1}px\">{}</div>",
                    t.pos.x, t.pos.y, t.size, t.text
                )
            })
            .collect()
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    /// Logical canvas width derived from the container
    fn container_width() -> f32 {
        document()
            .and_then(|d| d.get_element_by_id("game-container"))
            .map(|el| (el.client_width() as f64 - CONTAINER_MARGIN).max(1.0) as f32)
            .unwrap_or(400.0)
    }

    /// Size the canvas element (CSS and backing store) for a logical size
    fn size_canvas(canvas: &HtmlCanvasElement, width: f32, height: f32) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let physical_w = (width as f64 * dpr) as u32;
        let physical_h = (height as f64 * dpr) as u32;
        canvas.set_width(physical_w);
        canvas.set_height(physical_h);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));
        (physical_w, physical_h)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Cat starting...");

        let Some(document) = document() else {
            log::error!("No document; cannot start");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element; cannot start");
            return;
        };

        let store = LocalStore::open();
        let tuning = Tuning::load(&store);
        let seed = js_sys::Date::now() as u64;
        let width = container_width();

        let session = match Session::new(width, tuning, store, SeededRandom::new(seed)) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let vp = session.state().viewport;
        let (physical_w, physical_h) = size_canvas(&canvas, vp.width, vp.height);

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let render_state = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                match instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await
                {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        RenderState::new(surface, &adapter, physical_w, physical_h, (vp.width, vp.height))
                            .await
                            .map_err(|e| log::error!("Failed to create device: {}", e))
                            .ok()
                    }
                    Err(e) => {
                        log::error!("Failed to get adapter: {}", e);
                        None
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state,
            input: InputQueue::default(),
            hud_cache: String::new(),
        }));

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Cat running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                game.borrow_mut().input.push(InputEvent::primary(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                ));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().input.push(InputEvent::primary(x, y));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keep the page from scrolling under a finger
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = InputEvent::from_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input.push(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let mut g = game.borrow_mut();
            let width = container_width();
            // Apply now so the canvas and the viewport agree this frame
            g.session.handle_input(InputEvent::Resize { width });
            let vp = g.session.state().viewport;
            let (w, h) = size_canvas(&canvas, vp.width, vp.height);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(w, h, (vp.width, vp.height));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_cat::persistence::MemoryStore;
    use flappy_cat::platform::InputEvent;
    use flappy_cat::sim::{GamePhase, SeededRandom};
    use flappy_cat::ui::Button;
    use flappy_cat::{Session, Tuning};

    /// Frames to run (five minutes at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Flappy Cat (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    let mut session = match Session::new(
        400.0,
        Tuning::default(),
        MemoryStore::new(),
        SeededRandom::new(seed),
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    session.press(Button::Start);
    let mut frames = 0;
    while frames < MAX_FRAMES && session.phase() == GamePhase::Playing {
        if autopilot_wants_jump(&session) {
            session.handle_input(InputEvent::Jump);
        }
        session.frame();
        frames += 1;
    }

    let progression = session.progression();
    println!(
        "seed {}: score {} after {} frames, {} coins, high score {}",
        seed,
        session.state().score,
        frames,
        progression.coins,
        progression.high_score
    );
}

/// Jump when the cat would sink below the middle of the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_jump<S, R>(session: &flappy_cat::Session<S, R>) -> bool
where
    S: flappy_cat::persistence::KeyValueStore,
    R: flappy_cat::sim::RandomSource,
{
    let state = session.state();
    let tuning = session.tuning();
    let player = &state.player;
    let hitbox = player.hitbox(tuning.player_hitbox_inset);

    let target = state
        .pipes
        .iter()
        .find(|p| p.right(tuning.pipe_width) > hitbox.left())
        .map(|p| p.gap_top + tuning.pipe_gap * 0.65)
        .unwrap_or(state.viewport.height * 0.5);

    player.velocity >= 0.0 && hitbox.bottom() + player.velocity + tuning.gravity > target
}
