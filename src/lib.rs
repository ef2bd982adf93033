//! Dice Football in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing — the same router
//! engine that powers Axum.
//!
//! The page is a thin presentation layer: it measures swipe power (or just
//! asks for a roll), drives the settle/advance timers through
//! `/api/game/tick`, and swaps the returned board into the DOM. All game
//! rules live here.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod game;
pub mod routes;

/// Install console logging and the panic hook once the module is loaded.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Process an HTTP-like request and return an HTML fragment (or JSON).
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/game/roll")
/// * `query`  — Query string (e.g., "?wrap=roll-slot")
/// * `body`   — Request body (e.g., "power=1.8"). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/game/board", "game_board").ok();
    router.insert("/api/game/roll", "game_roll").ok();
    router.insert("/api/game/roll-button", "game_roll_button").ok();
    router.insert("/api/game/tick", "game_tick").ok();
    router.insert("/api/game/restart", "game_restart").ok();
    router.insert("/api/game/config", "game_config").ok();
    router.insert("/api/game/state", "game_state").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("game_board", "GET") => routes::game::handle_board_get(query),
            ("game_roll_button", "GET") => routes::game::handle_roll_button_get(query),
            ("game_state", "GET") => routes::game::handle_state_get(query),

            ("game_roll", "POST") => routes::game::handle_roll_post(body),
            ("game_tick", "POST") => routes::game::handle_tick_post(body),
            ("game_restart", "POST") => routes::game::handle_restart_post(body),
            ("game_config", "POST") => routes::game::handle_config_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    log::debug!("no route");
    r#"<span class="text-red-700">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-700">405 — method not allowed</span>"#.to_string()
}
