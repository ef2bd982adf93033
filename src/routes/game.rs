//! `/api/game/*` routes — roll input, timer ticks, restarts and
//! configuration for the single live session.
//!
//! HTML responses are swapped into `#dice-football`; `/api/game/state` and
//! `format=json` ticks return JSON for scripted adapters.

use crate::error::InvalidInputError;
use crate::game::board;
use crate::game::resolver::{PowerSource, ResolverConfig, RollInput};
use crate::game::state::{self, Session, with_session, with_session_mut};
use crate::game::turns::{GameConfig, RollStatus};
use crate::routes::util::{
    get_number, get_param, html_escape, is_element_id, parse_form_body, parse_query,
};

fn error_fragment(err: &InvalidInputError) -> String {
    format!(
        r#"<span class="text-red-700">{}</span>"#,
        html_escape(&err.to_string())
    )
}

fn render_current_board() -> String {
    with_session(|s| board::render_board(&s.game))
}

// ── GET /api/game/board ────────────────────────────────────────────

/// Handle GET /api/game/board
pub fn handle_board_get(_query: &str) -> String {
    render_current_board()
}

// ── POST /api/game/roll ────────────────────────────────────────────

/// Handle POST /api/game/roll
/// Body params:
///   - power={real} → gesture roll with the measured power
///   - (empty)      → self-powered roll (simplified mode)
///
/// Ignored rolls re-render the unchanged board.
pub fn handle_roll_post(body: &str) -> String {
    match roll(body) {
        Ok(()) => render_current_board(),
        Err(e) => error_fragment(&e),
    }
}

fn roll(body: &str) -> Result<(), InvalidInputError> {
    let params = parse_form_body(body);
    let input = match get_number::<f64>(&params, "power")? {
        Some(power) => RollInput::Power(power),
        None => RollInput::Auto,
    };
    let status = with_session_mut(|s| s.game.trigger_roll(input, s.rng.as_mut()))?;
    if status == RollStatus::Ignored {
        log::debug!("roll request ignored");
    }
    Ok(())
}

// ── POST /api/game/tick ────────────────────────────────────────────

/// Handle POST /api/game/tick
/// Body params:
///   - elapsed={ms}  → time since the previous tick (default 0)
///   - format=json   → return the fired events instead of the board
pub fn handle_tick_post(body: &str) -> String {
    let params = parse_form_body(body);
    let elapsed = match get_number::<u32>(&params, "elapsed") {
        Ok(ms) => ms.unwrap_or(0),
        Err(e) => return error_fragment(&e),
    };
    let events = with_session_mut(|s| s.game.tick(elapsed));
    if get_param(&params, "format") == Some("json") {
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    } else {
        render_current_board()
    }
}

// ── POST /api/game/restart ─────────────────────────────────────────

/// Handle POST /api/game/restart — new game, same configuration and RNG.
pub fn handle_restart_post(_body: &str) -> String {
    with_session_mut(|s| s.game.restart());
    render_current_board()
}

// ── POST /api/game/config ──────────────────────────────────────────

/// Handle POST /api/game/config
/// Body params (all optional, unspecified keep their defaults):
///   - mode=gesture|simple → power source
///   - cap={real}          → gesture power cap
///   - dice={n}            → dice per turn
///   - seed={u64}          → fixed RNG seed (entropy when absent)
///
/// Always starts a new game.
pub fn handle_config_post(body: &str) -> String {
    match configure(body) {
        Ok(()) => render_current_board(),
        Err(e) => error_fragment(&e),
    }
}

fn configure(body: &str) -> Result<(), InvalidInputError> {
    let params = parse_form_body(body);
    let defaults = GameConfig::default();
    let power_source = match get_param(&params, "mode") {
        Some(mode) => mode.parse::<PowerSource>()?,
        None => defaults.resolver.power_source,
    };
    let config = GameConfig {
        resolver: ResolverConfig {
            power_source,
            cap_magnitude: get_number::<f64>(&params, "cap")?
                .unwrap_or(defaults.resolver.cap_magnitude),
        },
        dice_per_turn: get_number::<u8>(&params, "dice")?.unwrap_or(defaults.dice_per_turn),
        ..defaults
    };
    let seed = get_number::<u64>(&params, "seed")?;
    state::replace_session(Session::seeded(config, seed)?);
    log::info!("new {} game (seed {:?})", power_source.as_str(), seed);
    Ok(())
}

// ── GET /api/game/state ────────────────────────────────────────────

/// Handle GET /api/game/state — full JSON snapshot.
pub fn handle_state_get(_query: &str) -> String {
    state::export_state_json()
}

/// Handle GET /api/game/roll-button — only the roll control, for polling.
/// Query params:
///   - wrap={id} → wrap the control in `<div id="{id}">`, id is `[A-Za-z0-9_-]+`
pub fn handle_roll_button_get(query: &str) -> String {
    let params = parse_query(query);
    let wrap = get_param(&params, "wrap");
    if let Some(id) = wrap.filter(|id| !is_element_id(id)) {
        return error_fragment(&InvalidInputError::InvalidElementId(id.to_string()));
    }
    let html = with_session(|s| board::render_roll_control(&s.game));
    match wrap {
        Some(id) => format!(r#"<div id="{}">{}</div>"#, id, html),
        None => html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::SequenceRng;
    use crate::game::turns::TurnPhase;

    fn reset_state() {
        state::reset_session();
    }

    fn scripted(config: GameConfig, draws: Vec<f64>) {
        state::replace_session(
            Session::new(config, Box::new(SequenceRng::new(draws))).unwrap(),
        );
    }

    #[test]
    fn board_get_renders_board() {
        reset_state();
        let html = handle_board_get("");
        assert!(html.contains("Dice Football"));
        assert!(html.contains("Roll Dice (2 left)"));
        reset_state();
    }

    #[test]
    fn roll_post_with_power() {
        scripted(GameConfig::default(), vec![0.5]);
        let html = handle_roll_post("power=4.5");
        assert!(html.contains("Rolling..."));
        assert!(html.contains(r#"data-zone="off""#));
        with_session(|s| assert_eq!(s.game.turn().remaining_dice, 1));
        reset_state();
    }

    #[test]
    fn roll_post_rejects_garbage_power() {
        reset_state();
        let html = handle_roll_post("power=hard");
        assert!(html.contains("could not read a number"));
        let html = handle_roll_post("power=NaN");
        assert!(html.contains("finite"));
        with_session(|s| assert_eq!(s.game.turn().remaining_dice, 2));
        reset_state();
    }

    #[test]
    fn roll_post_without_power_in_gesture_mode_is_an_error() {
        reset_state();
        let html = handle_roll_post("");
        assert!(html.contains("needs a roll power"));
        reset_state();
    }

    #[test]
    fn tick_post_settles_and_returns_json_events() {
        scripted(GameConfig::default(), vec![0.5]);
        handle_roll_post("power=4.5");
        let json = handle_tick_post("elapsed=2000&format=json");
        assert!(json.starts_with('['));
        assert!(json.contains("roll_settled"));
        assert!(json.contains("Off the table!"));
        let json = handle_tick_post("elapsed=2000&format=json");
        assert_eq!(json, "[]");
        reset_state();
    }

    #[test]
    fn tick_post_renders_board_by_default() {
        scripted(GameConfig::default(), vec![0.5]);
        handle_roll_post("power=4.5");
        let html = handle_tick_post("elapsed=2000");
        assert!(html.contains("Off the table!"));
        assert!(html.contains("Roll Dice (1 left)"));
        reset_state();
    }

    #[test]
    fn tick_post_rejects_bad_elapsed() {
        reset_state();
        let html = handle_tick_post("elapsed=-5");
        assert!(html.contains("could not read a number"));
        reset_state();
    }

    #[test]
    fn restart_post_clears_scores() {
        scripted(GameConfig::default(), vec![0.5, 0.1]);
        handle_roll_post("power=2.1");
        handle_tick_post("elapsed=2000");
        let before = with_session(|s| s.game.scores().player1);
        assert_eq!(before, 7);
        handle_restart_post("");
        with_session(|s| {
            assert_eq!(s.game.scores().player1, 0);
            assert_eq!(s.game.phase(), TurnPhase::AwaitingInput);
        });
        reset_state();
    }

    #[test]
    fn config_post_switches_to_simplified_mode() {
        reset_state();
        let html = handle_config_post("mode=simple&seed=5&dice=3");
        assert!(html.contains("Roll Dice (3 left)"));
        assert!(!html.contains("data-gesture-surface"));
        let html = handle_roll_post("");
        assert!(html.contains("Rolling..."));
        reset_state();
    }

    #[test]
    fn config_post_rejects_bad_values() {
        reset_state();
        assert!(handle_config_post("mode=timer").contains("unknown power source"));
        assert!(handle_config_post("dice=0").contains("invalid configuration"));
        assert!(handle_config_post("cap=-1").contains("invalid configuration"));
        assert!(handle_config_post("seed=abc").contains("could not read a number"));
        reset_state();
    }

    #[test]
    fn state_get_returns_json() {
        reset_state();
        let json = handle_state_get("");
        assert!(json.contains(r#""current_player":1"#));
        assert!(json.contains(r#""remaining_dice":2"#));
        reset_state();
    }

    #[test]
    fn roll_button_get_can_wrap() {
        reset_state();
        let html = handle_roll_button_get("?wrap=roll-slot");
        assert!(html.starts_with(r#"<div id="roll-slot">"#));
        assert!(html.contains("Roll Dice (2 left)"));
        reset_state();
    }

    #[test]
    fn roll_button_get_rejects_markup_in_wrap() {
        reset_state();
        let html = handle_roll_button_get("?wrap=x%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        assert!(html.starts_with(r#"<span class="text-red-700">"#));
        assert!(html.contains("not a usable element id"));
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains(r#"x">"#));
        reset_state();
    }

    #[test]
    fn error_text_is_escaped() {
        reset_state();
        let html = handle_roll_post("power=%3Cimg+src%3D%22x%22+onerror%3Dalert(1)%3E");
        assert!(html.contains("could not read a number"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src="));
        assert!(html.contains("onerror=alert(1)&gt;"));
        let html = handle_config_post("mode=%3Cb%3Ebold%3C%2Fb%3E");
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        reset_state();
    }
}
