//! Neon Arcade entry point
//!
//! Picks the demo named by the `data-game` attribute on `<body>` and wires
//! the DOM (canvas, HUD, buttons, keyboard) to the pure game cores.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlFormElement,
        HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use neon_arcade::asteroids::{self, AsteroidsEvent, AsteroidsInput, AsteroidsState};
    use neon_arcade::audio::{AudioManager, SoundEffect};
    use neon_arcade::calculator::{Calculator, Op};
    use neon_arcade::login::welcome_message;
    use neon_arcade::melody::MELODY_STEP_MS;
    use neon_arcade::render;
    use neon_arcade::settings::Settings;
    use neon_arcade::snake::{Direction, SnakeState};
    use neon_arcade::tetris::{self, TetrisEvent, TetrisInput, TetrisState};

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let demo = document
            .body()
            .and_then(|body| body.get_attribute("data-game"))
            .unwrap_or_else(|| "asteroids".to_string());
        log::info!("Neon Arcade starting demo: {demo}");

        match demo.as_str() {
            "asteroids" => run_asteroids(&document),
            "tetris" => run_tetris(&document),
            "snake" => run_snake(&document),
            "calculator" => run_calculator(&document),
            "login" => run_login(&document),
            other => log::error!("Unknown demo '{other}'"),
        }
    }

    // === Shared DOM helpers ===

    fn canvas_context(
        document: &Document,
        id: &str,
    ) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas: HtmlCanvasElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        let ctx: CanvasRenderingContext2d =
            canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some((canvas, ctx))
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn seed_from_clock() -> u64 {
        js_sys::Date::now() as u64
    }

    /// One frame of a demo, driven by requestAnimationFrame
    trait Frame {
        fn frame(&mut self, time: f64);
    }

    fn schedule_frame<T: Frame + 'static>(app: Rc<RefCell<T>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            schedule_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Touch button that fires once per press
    fn on_touch(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                handler();
            });
            let _ = btn
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Touch button held down for the duration of the press
    fn on_touch_hold(
        document: &Document,
        id: &str,
        press: impl Fn(bool) + Clone + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };
        {
            let press = press.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                press(true);
            });
            let _ = btn
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            press(false);
        });
        let _ = btn.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Pause a game when the tab goes hidden
    fn setup_auto_pause(document: &Document, request_pause: impl Fn() + 'static) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                request_pause();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // === Asteroids ===

    struct AsteroidsApp {
        state: AsteroidsState,
        input: AsteroidsInput,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        document: Document,
        last_time: f64,
    }

    impl Frame for AsteroidsApp {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                16.0
            };
            self.last_time = time;

            let input = self.input;
            asteroids::tick(&mut self.state, &input, dt);
            self.input.pause = false;
            self.input.restart = false;

            for event in self.state.drain_events() {
                match event {
                    AsteroidsEvent::Shoot => self.audio.play(SoundEffect::Shoot),
                    AsteroidsEvent::Explosion | AsteroidsEvent::ShipHit => {
                        self.audio.play(SoundEffect::Explosion)
                    }
                    AsteroidsEvent::GameReset => self.audio.play(SoundEffect::GameOver),
                }
            }
            self.audio.set_thrust(self.state.ship.thrust);

            render::draw_asteroids(&self.ctx, &self.state);
            set_text(
                &self.document,
                "score",
                &format!("Puntuación: {}", self.state.score),
            );
            set_text(
                &self.document,
                "lives",
                &format!("Vidas: {}", self.state.lives),
            );
            set_text(
                &self.document,
                "level",
                &format!("Nivel: {}", self.state.level),
            );
        }
    }

    fn run_asteroids(document: &Document) {
        let Some((canvas, ctx)) = canvas_context(document, "game") else {
            log::error!("Missing #game canvas");
            return;
        };
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        let seed = seed_from_clock();
        log::info!("Asteroids seed: {seed}");

        let audio = AudioManager::new();
        audio.start_ambient();

        let app = Rc::new(RefCell::new(AsteroidsApp {
            state: AsteroidsState::new(seed, width, height),
            input: AsteroidsInput::default(),
            audio,
            ctx,
            document: document.clone(),
            last_time: 0.0,
        }));

        // Keyboard, held keys plus one-shots
        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => a.input.turn_left = true,
                    "ArrowRight" | "d" | "D" => a.input.turn_right = true,
                    "ArrowUp" | "w" | "W" => a.input.thrust = true,
                    " " => {
                        event.prevent_default();
                        a.input.shoot = true;
                    }
                    "p" | "P" => a.input.pause = true,
                    "r" | "R" => a.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => a.input.turn_left = false,
                    "ArrowRight" | "d" | "D" => a.input.turn_right = false,
                    "ArrowUp" | "w" | "W" => a.input.thrust = false,
                    " " => a.input.shoot = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch controls
        for (id, set) in [
            ("btn-left", (|i: &mut AsteroidsInput, v| i.turn_left = v) as fn(&mut AsteroidsInput, bool)),
            ("btn-right", |i, v| i.turn_right = v),
            ("btn-thrust", |i, v| i.thrust = v),
            ("btn-fire", |i, v| i.shoot = v),
        ] {
            let app = app.clone();
            on_touch_hold(document, id, move |held| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                set(&mut a.input, held);
            });
        }

        {
            let app = app.clone();
            setup_auto_pause(document, move || {
                let mut a = app.borrow_mut();
                if !a.state.paused {
                    a.input.pause = true;
                }
            });
        }

        // Track the CSS size of the canvas as the page scales it
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let w = canvas.client_width();
                let h = canvas.client_height();
                if w > 0 && h > 0 {
                    canvas.set_width(w as u32);
                    canvas.set_height(h as u32);
                    app.borrow_mut().state.set_viewport(w as f32, h as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        schedule_frame(app);
    }

    // === Tetris ===

    struct TetrisApp {
        state: TetrisState,
        input: TetrisInput,
        audio: AudioManager,
        settings: Settings,
        board_ctx: CanvasRenderingContext2d,
        next_ctx: CanvasRenderingContext2d,
        next_size: (f64, f64),
        document: Document,
        last_time: f64,
        melody_counter_ms: f32,
    }

    impl Frame for TetrisApp {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) as f32).min(250.0)
            } else {
                16.0
            };
            self.last_time = time;

            let input = self.input;
            tetris::tick(&mut self.state, &input, dt);
            self.input = TetrisInput::default();

            for event in self.state.drain_events() {
                match event {
                    TetrisEvent::Move => self.audio.play(SoundEffect::Move),
                    TetrisEvent::Rotate => self.audio.play(SoundEffect::Rotate),
                    TetrisEvent::HardDrop => self.audio.play(SoundEffect::Drop),
                    TetrisEvent::LineClear => self.audio.play(SoundEffect::LineClear),
                    TetrisEvent::GameOver => self.audio.play(SoundEffect::GameOver),
                }
            }

            // Background melody keeps playing through pause; only game
            // over (or the music toggle) silences it
            if !self.state.game_over {
                self.melody_counter_ms += dt;
                while self.melody_counter_ms >= MELODY_STEP_MS as f32 {
                    self.audio.play_melody_note();
                    self.melody_counter_ms -= MELODY_STEP_MS as f32;
                }
            }

            render::draw_tetris(&self.board_ctx, &self.state);
            render::draw_tetris_next(&self.next_ctx, &self.state, self.next_size.0, self.next_size.1);
            set_text(&self.document, "score", &self.state.score.to_string());
            set_text(&self.document, "lines", &self.state.lines.to_string());
            set_text(&self.document, "level", &self.state.level.to_string());
        }
    }

    fn run_tetris(document: &Document) {
        let Some((_, board_ctx)) = canvas_context(document, "board") else {
            log::error!("Missing #board canvas");
            return;
        };
        let Some((next_canvas, next_ctx)) = canvas_context(document, "next") else {
            log::error!("Missing #next canvas");
            return;
        };
        let next_size = (next_canvas.width() as f64, next_canvas.height() as f64);

        let seed = seed_from_clock();
        log::info!("Tetris seed: {seed}");

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_sound_enabled(settings.sound_enabled);
        audio.set_music_enabled(settings.music_enabled);

        let app = Rc::new(RefCell::new(TetrisApp {
            state: TetrisState::new(seed),
            input: TetrisInput::default(),
            audio,
            settings,
            board_ctx,
            next_ctx,
            next_size,
            document: document.clone(),
            last_time: 0.0,
            melody_counter_ms: 0.0,
        }));

        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                match event.key().as_str() {
                    "ArrowLeft" => a.input.left = true,
                    "ArrowRight" => a.input.right = true,
                    "ArrowUp" => a.input.rotate = true,
                    "ArrowDown" => a.input.soft_drop = true,
                    " " => {
                        event.prevent_default();
                        a.input.hard_drop = true;
                    }
                    "p" | "P" => a.input.pause = true,
                    "r" | "R" => a.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (id, set) in [
            ("touch-left", (|i: &mut TetrisInput| i.left = true) as fn(&mut TetrisInput)),
            ("touch-right", |i| i.right = true),
            ("touch-rotate", |i| i.rotate = true),
            ("touch-down", |i| i.soft_drop = true),
            ("touch-drop", |i| i.hard_drop = true),
        ] {
            let app = app.clone();
            on_touch(document, id, move || {
                let mut a = app.borrow_mut();
                a.audio.resume();
                set(&mut a.input);
            });
        }

        {
            let app = app.clone();
            on_click(document, "sound-toggle", move || {
                let mut a = app.borrow_mut();
                a.settings.sound_enabled = !a.settings.sound_enabled;
                a.settings.save();
                let enabled = a.settings.sound_enabled;
                a.audio.set_sound_enabled(enabled);
            });
        }
        {
            let app = app.clone();
            on_click(document, "music-toggle", move || {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.settings.music_enabled = !a.settings.music_enabled;
                a.settings.save();
                let enabled = a.settings.music_enabled;
                a.audio.set_music_enabled(enabled);
            });
        }

        {
            let app = app.clone();
            setup_auto_pause(document, move || {
                let mut a = app.borrow_mut();
                if !a.state.paused && !a.state.game_over {
                    a.input.pause = true;
                }
            });
        }

        schedule_frame(app);
    }

    // === Snake ===

    struct SnakeApp {
        state: SnakeState,
        ctx: CanvasRenderingContext2d,
        size: (f64, f64),
        document: Document,
        last_time: f64,
        step_counter_ms: f64,
    }

    impl SnakeApp {
        fn reset(&mut self) {
            self.state.reset();
            self.step_counter_ms = 0.0;
        }
    }

    impl Frame for SnakeApp {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).min(250.0)
            } else {
                16.0
            };
            self.last_time = time;

            if !self.state.game_over {
                self.step_counter_ms += dt;
                while self.step_counter_ms >= self.state.step_interval_ms as f64 {
                    self.step_counter_ms -= self.state.step_interval_ms as f64;
                    self.state.step();
                    if self.state.game_over {
                        break;
                    }
                }
            }

            render::draw_snake(&self.ctx, &self.state, self.size.0, self.size.1);
            set_text(
                &self.document,
                "score",
                &format!("Puntaje: {}", self.state.score),
            );
        }
    }

    fn run_snake(document: &Document) {
        let Some((canvas, ctx)) = canvas_context(document, "game") else {
            log::error!("Missing #game canvas");
            return;
        };
        let size = (canvas.width() as f64, canvas.height() as f64);

        let seed = seed_from_clock();
        log::info!("Snake seed: {seed}");

        let app = Rc::new(RefCell::new(SnakeApp {
            state: SnakeState::new(seed),
            ctx,
            size,
            document: document.clone(),
            last_time: 0.0,
            step_counter_ms: 0.0,
        }));

        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => a.state.turn(Direction::Up),
                    "ArrowDown" | "s" | "S" => a.state.turn(Direction::Down),
                    "ArrowLeft" | "a" | "A" => a.state.turn(Direction::Left),
                    "ArrowRight" | "d" | "D" => a.state.turn(Direction::Right),
                    "r" | "R" => a.reset(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for (id, dir) in [
            ("btn-up", Direction::Up),
            ("btn-down", Direction::Down),
            ("btn-left", Direction::Left),
            ("btn-right", Direction::Right),
        ] {
            let app = app.clone();
            on_touch(document, id, move || app.borrow_mut().state.turn(dir));
        }
        {
            let app = app.clone();
            on_click(document, "btn-restart", move || app.borrow_mut().reset());
        }

        schedule_frame(app);
    }

    // === Calculator ===

    fn update_calc_display(document: &Document, calc: &Calculator) {
        set_text(document, "result", &calc.display());
        set_text(document, "history", &calc.history());
    }

    fn apply_calc_key(calc: &mut Calculator, btn: &Element) {
        if btn.has_attribute("data-num") {
            let text = btn.text_content().unwrap_or_default();
            if let Some(d) = text.trim().chars().next() {
                calc.input_digit(d);
            }
            return;
        }
        match btn.get_attribute("data-action").as_deref() {
            Some("dot") => calc.input_digit('.'),
            Some("op") => {
                if let Some(op) = btn
                    .get_attribute("data-op")
                    .and_then(|s| s.chars().next())
                    .and_then(Op::from_char)
                {
                    calc.set_operator(op);
                }
            }
            Some("equals") => calc.equals(),
            Some("clear") => calc.clear(),
            Some("backspace") => calc.backspace(),
            Some("negate") => calc.negate(),
            Some("percent") => calc.percent(),
            _ => {}
        }
    }

    fn run_calculator(document: &Document) {
        let calc = Rc::new(RefCell::new(Calculator::new()));
        update_calc_display(document, &calc.borrow());

        // One delegated listener on the key grid
        if let Some(keys) = document.get_element_by_id("keys") {
            let calc = calc.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event.target() else { return };
                let Ok(el) = target.dyn_into::<Element>() else {
                    return;
                };
                let Ok(Some(btn)) = el.closest("button.key") else {
                    return;
                };
                apply_calc_key(&mut calc.borrow_mut(), &btn);
                update_calc_display(&document_clone, &calc.borrow());
            });
            let _ = keys.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::error!("Missing #keys container");
        }

        {
            let calc = calc.clone();
            let document_clone = document.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut c = calc.borrow_mut();
                match key.as_str() {
                    d if d.len() == 1 && d.chars().next().is_some_and(|ch| ch.is_ascii_digit()) => {
                        c.input_digit(key.chars().next().unwrap_or('0'))
                    }
                    "." => c.input_digit('.'),
                    "+" | "-" | "*" | "/" => {
                        if let Some(op) = key.chars().next().and_then(Op::from_char) {
                            c.set_operator(op);
                        }
                    }
                    "Enter" | "=" => {
                        event.prevent_default();
                        c.equals();
                    }
                    "Escape" => c.clear(),
                    "Backspace" => c.backspace(),
                    "%" => c.percent(),
                    _ => return,
                }
                drop(c);
                update_calc_display(&document_clone, &calc.borrow());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // === Login ===

    fn run_login(document: &Document) {
        let Some(form) = document
            .get_element_by_id("loginForm")
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            log::error!("Missing #loginForm");
            return;
        };

        let document_clone = document.clone();
        let form_clone = form.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let username = document_clone
                .get_element_by_id("username")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&welcome_message(&username));
            }
            form_clone.reset();
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Arcade (native) starting...");
    log::info!("The demos are browser-only - build for wasm32 and serve the pages");

    // Quick smoke check of the calculator core
    let mut calc = neon_arcade::Calculator::new();
    calc.input_digit('5');
    calc.set_operator(neon_arcade::calculator::Op::Add);
    calc.input_digit('3');
    calc.equals();
    assert_eq!(calc.display(), "8");
    println!("✓ Calculator smoke check passed (5 + 3 = {})", calc.display());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
