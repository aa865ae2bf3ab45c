pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use sidewalk_core::{Action, GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Before `game_init` every call is a
/// logged no-op.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let Some(runner) = borrow.as_mut() else {
            log::warn!("game not initialized, call game_init() first");
            return None;
        };
        Some(f(runner))
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

fn action(code: u32) -> Option<Action> {
    let parsed = Action::from_code(code);
    if parsed.is_none() {
        web_sys::console::warn_1(&JsValue::from_str(&format!("unknown action code {}", code)));
    }
    parsed
}

/// Start (or restart) a session. `config_json` overrides any subset of the
/// defaults; an invalid config is rejected and the previous runner, if any,
/// stays in place.
#[wasm_bindgen]
pub fn game_init(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => GameConfig::from_json(json)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?,
        None => GameConfig::default(),
    };

    let runner = GameRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("sidewalk: initialized");
    Ok(())
}

/// Advance one animation frame. `dt` is in seconds.
#[wasm_bindgen]
pub fn game_tick(dt: f64) -> bool {
    with_runner(|r| r.tick(dt)).unwrap_or_default()
}

// ---- Input ----

#[wasm_bindgen]
pub fn game_press(code: u32) {
    if let Some(a) = action(code) {
        push(InputEvent::Press(a));
    }
}

#[wasm_bindgen]
pub fn game_release(code: u32) {
    if let Some(a) = action(code) {
        push(InputEvent::Release(a));
    }
}

#[wasm_bindgen]
pub fn game_release_all() {
    push(InputEvent::ReleaseAll);
}

#[wasm_bindgen]
pub fn game_aim_delta(dy: f64) {
    push(InputEvent::AimDelta { dy });
}

#[wasm_bindgen]
pub fn game_aim_stick(y: f64) {
    push(InputEvent::AimStick { y });
}

// ---- Session control ----

#[wasm_bindgen]
pub fn game_pause() {
    with_runner(|r| r.pause());
}

#[wasm_bindgen]
pub fn game_resume() {
    with_runner(|r| r.resume());
}

#[wasm_bindgen]
pub fn game_reset() {
    with_runner(|r| r.reset());
}

#[wasm_bindgen]
pub fn game_resize(width: f64, height: f64) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn game_set_high_score(high_score: u32) {
    with_runner(|r| r.set_high_score(high_score));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_hud_ptr() -> *const f32 {
    with_runner(|r| r.hud_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_hud_len() -> u32 {
    with_runner(|r| r.hud_len()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    sidewalk_core::bridge::PROTOCOL_VERSION
}
