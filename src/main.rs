//! Hive Defense entry point
//!
//! The web build wires the game to a canvas and `requestAnimationFrame`.
//! The native build runs a headless autoplay demo on a synthetic 60 Hz clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use hive_defense::audio::{AudioManager, SoundEffect};
    use hive_defense::consts::{ARENA_HEIGHT, ARENA_WIDTH};
    use hive_defense::renderer::{RenderState, build_scene};
    use hive_defense::sim::UpgradeKind;
    use hive_defense::{FrameOutcome, FrameToken, Game, Overlay, Screen, Settings, Tuning};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        canvas: HtmlCanvasElement,
        /// Token of the animation-frame loop currently scheduled
        scheduled: Option<FrameToken>,
    }

    impl App {
        /// Convert a click in CSS pixels to arena coordinates
        fn client_to_arena(&self, client_x: f64, client_y: f64) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = ARENA_WIDTH as f64 / rect.width().max(1.0);
            let sy = ARENA_HEIGHT as f64 / rect.height().max(1.0);
            (
                ((client_x - rect.left()) * sx) as f32,
                ((client_y - rect.top()) * sy) as f32,
            )
        }

        fn play_events(&mut self) {
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        fn render(&mut self) {
            let Some(world) = self.game.world() else {
                return;
            };
            let vertices = build_scene(world, &self.settings);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&vertices) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = self.game.snapshot();

            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };

            set_text("hud-time", &format!("{}s", snap.score));
            set_text("hud-money", &format!("${}", snap.money));
            set_text("hud-health", &format!("{}/{}", snap.health, snap.max_health));
            set_text("shop-damage", &snap.damage.to_string());
            set_text("shop-fire-rate", &format!("{:.1}x", snap.fire_rate));
            set_text("shop-max-health", &snap.max_health.to_string());
            if let Some(bar) = document.get_element_by_id("health-bar") {
                let _ = bar.set_attribute("style", &format!("width: {:.0}%", snap.health_percent()));
            }

            set_visible("menu", snap.screen == Screen::Menu);
            set_visible("hud", snap.screen.in_run());
            set_visible("pause-menu", snap.screen == Screen::Suspended(Overlay::Paused));
            set_visible("shop", snap.screen == Screen::Suspended(Overlay::Shop));
            set_visible("game-over", snap.screen == Screen::GameOver);
            if snap.screen == Screen::GameOver {
                set_text("final-time", &snap.score.to_string());
                set_text("final-money", &snap.money.to_string());
            }
        }
    }

    /// Start an animation-frame loop if the game wants one and none runs yet
    fn schedule_if_needed(app: &Rc<RefCell<App>>) {
        let token = {
            let mut a = app.borrow_mut();
            match a.game.frame_token() {
                Some(token) if a.scheduled != Some(token) => {
                    a.scheduled = Some(token);
                    token
                }
                _ => return,
            }
        };
        request_animation_frame(app.clone(), token);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, token: FrameToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app, token);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, token: FrameToken) {
        let outcome = {
            let mut a = app.borrow_mut();
            let outcome = a.game.frame(token, js_sys::Date::now());
            a.play_events();
            a.render();
            a.update_hud();
            if outcome == FrameOutcome::Halted && a.scheduled == Some(token) {
                a.scheduled = None;
            }
            outcome
        };

        if outcome == FrameOutcome::Ticked {
            request_animation_frame(app, token);
        }
    }

    /// Apply a UI action, then refresh sound, HUD, frame and tick loop
    fn with_app(app: &Rc<RefCell<App>>, action: impl FnOnce(&mut App)) {
        {
            let mut a = app.borrow_mut();
            action(&mut a);
            a.play_events();
            a.render();
            a.update_hud();
        }
        schedule_if_needed(app);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Hive Defense starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let settings = Settings::default();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(Tuning::default(), seed),
            render_state: None,
            audio: AudioManager::new(&settings),
            settings,
            canvas: canvas.clone(),
            scheduled: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        match RenderState::new(surface, &adapter, canvas.width(), canvas.height())
                            .await
                        {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {:?}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {:?}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {:?}", e),
        }

        setup_input_handlers(&canvas, app.clone());
        app.borrow().update_hud();

        log::info!("Hive Defense ready!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Click: start from menu/game over, otherwise shoot
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                with_app(&app, |a| {
                    a.audio.resume();
                    let now = js_sys::Date::now();
                    match a.game.screen() {
                        Screen::Menu | Screen::GameOver => {
                            a.game.start_run(now);
                        }
                        _ => {
                            let (x, y) =
                                a.client_to_arena(event.client_x() as f64, event.client_y() as f64);
                            a.game.shoot_at(x, y, now);
                        }
                    }
                });
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                with_app(&app, |a| match event.key().as_str() {
                    "Escape" => a.game.toggle_pause(),
                    "s" | "S" => a.game.toggle_shop(),
                    "m" | "M" => a.game.return_to_menu(),
                    "v" | "V" => {
                        a.settings.muted = !a.settings.muted;
                        a.audio.apply_settings(&a.settings);
                    }
                    "Enter" | " " => {
                        if matches!(a.game.screen(), Screen::Menu | Screen::GameOver) {
                            a.game.start_run(js_sys::Date::now());
                        }
                    }
                    key => {
                        let kind = match key {
                            "1" => Some(UpgradeKind::Heal),
                            "2" => Some(UpgradeKind::Damage),
                            "3" => Some(UpgradeKind::FireRate),
                            "4" => Some(UpgradeKind::MaxHealth),
                            _ => None,
                        };
                        if let Some(kind) = kind {
                            a.game.buy(kind);
                        }
                    }
                });
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hive Defense (native) starting...");

    let tuning = load_tuning(std::env::args().nth(1));
    demo::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Read a balance table from disk, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> hive_defense::Tuning {
    use hive_defense::Tuning;

    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Can't read tuning file {}: {} - using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use hive_defense::sim::{GameEvent, UpgradeKind};
    use hive_defense::{FrameOutcome, Game, Screen, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop the demo after this much simulated time
    const MAX_DEMO_MS: f64 = 5.0 * 60.0 * 1000.0;

    /// Aim at the enemy closest to the hive, leading it by its flight time
    fn pick_target(game: &Game) -> Option<Vec2> {
        let world = game.world()?;
        let hive = world.hive.pos;
        let speed = world.tuning.projectile_speed;
        world
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(hive)
                    .total_cmp(&b.pos.distance_squared(hive))
            })
            .map(|enemy| {
                let flight_ticks = enemy.pos.distance(hive) / speed;
                enemy.pos + enemy.vel * flight_ticks
            })
    }

    /// Spend money: heal when hurt, otherwise grow damage and fire rate
    fn shop(game: &mut Game) {
        let snap = game.snapshot();
        let wish = if snap.health * 2 < snap.max_health {
            UpgradeKind::Heal
        } else if snap.fire_rate < snap.damage as f32 {
            UpgradeKind::FireRate
        } else {
            UpgradeKind::Damage
        };
        if snap.money >= game.tuning().cost_of(wish) {
            game.open_shop(true);
            game.buy(wish);
            game.open_shop(false);
        }
    }

    pub fn run(tuning: Tuning) {
        let mut game = Game::new(tuning, 0x00B3_3B33);
        let mut now = 0.0;
        let token = game.start_run(now);

        let (mut shots, mut kills, mut stings) = (0u32, 0u32, 0u32);

        while now < MAX_DEMO_MS {
            now += FRAME_MS;

            shop(&mut game);
            if let Some(target) = pick_target(&game) {
                game.shoot_at(target.x, target.y, now);
            }

            // Shop visits restart the clock, so follow the live token
            let token = game.frame_token().unwrap_or(token);
            if game.frame(token, now) == FrameOutcome::Halted {
                break;
            }

            for event in game.drain_events() {
                match event {
                    GameEvent::ShotFired { .. } => shots += 1,
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    GameEvent::HiveHit { health, .. } => {
                        stings += 1;
                        log::debug!("Hive stung, health {}", health);
                    }
                    GameEvent::UpgradePurchased { kind, cost } => {
                        log::info!("Bought {} for ${}", kind.as_str(), cost);
                    }
                    GameEvent::GameOver { .. } | GameEvent::EnemySpawned { .. } => {}
                }
            }

            if game.screen() == Screen::GameOver {
                break;
            }
        }

        let snap = game.snapshot();
        log::info!(
            "Demo finished on {:?}: survived {}s, {} shots, {} kills, {} stings",
            snap.screen,
            snap.score,
            shots,
            kills,
            stings
        );
        println!(
            "Survived {}s | money ${} | health {}/{} | damage {} | fire rate {:.1}x",
            snap.score, snap.money, snap.health, snap.max_health, snap.damage, snap.fire_rate
        );
    }
}
