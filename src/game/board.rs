//! Board rendering — HTML fragments the adapter swaps into `#dice-football`.
//!
//! The fragment carries everything the page needs to draw: the scoreboard,
//! the last result line, the dice of the current turn at their landing
//! coordinates, and the roll control. Animation is left to the page; each
//! die exposes its start/end coordinates as CSS custom properties.
//!
//! A roll is scored as soon as it is accepted, but the board keeps the
//! result label and the new total hidden until the die settles.

use crate::game::placement::FIELD_HEIGHT;
use crate::game::resolver::{LandingZone, PowerSource};
use crate::game::turns::{DiceGame, Player, RollOutcome};

/// Unicode die faces, indexed by face value - 1.
const DIE_FACES: [&str; 6] = [
    "\u{2680}", "\u{2681}", "\u{2682}", "\u{2683}", "\u{2684}", "\u{2685}",
];

/// Render the complete board for the current game.
pub fn render_board(game: &DiceGame) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(r#"<div class="max-w-3xl mx-auto p-4 bg-gradient-to-b from-green-100 to-green-200 rounded-xl">"#);
    html.push_str(r#"<div class="text-center mb-8">"#);
    html.push_str(r#"<h1 class="text-3xl font-bold text-green-800 mb-4">Dice Football</h1>"#);
    html.push_str(&render_scoreboard(game));
    if !game.last_result().is_empty() && !game.is_rolling() {
        html.push_str(&format!(
            r#"<div id="last-result" class="text-lg font-bold text-green-700 mt-2">{}</div>"#,
            game.last_result()
        ));
    }
    html.push_str(r#"</div>"#);
    html.push_str(&render_field(game));
    html.push_str(&render_roll_control(game));
    html.push_str(r#"</div>"#);
    html
}

/// Total to display for `player`: the pre-roll total while a roll is in flight.
fn shown_score(game: &DiceGame, player: Player) -> u32 {
    let total = game.scores().get(player);
    if !game.is_rolling() || game.turn().current_player != player {
        return total;
    }
    let pending = game
        .turn()
        .dice_this_turn
        .last()
        .map_or(0, |outcome| outcome.score_delta);
    total.saturating_sub(pending)
}

/// Both players' totals, with the player on turn highlighted.
pub fn render_scoreboard(game: &DiceGame) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(r#"<div class="flex justify-around mb-4">"#);
    for player in [Player::One, Player::Two] {
        let active = if game.turn().current_player == player {
            "bg-green-500 text-white"
        } else {
            "bg-green-200"
        };
        html.push_str(&format!(
            r#"<div class="p-4 rounded-lg {}" data-player="{}"><p class="font-bold">Player {}</p><p class="text-2xl">{}</p></div>"#,
            active,
            player.number(),
            player.number(),
            shown_score(game, player)
        ));
    }
    html.push_str(r#"</div>"#);
    html
}

fn render_field(game: &DiceGame) -> String {
    let mut html = String::with_capacity(1024);
    // In gesture mode the field itself is the swipe surface.
    let surface = match game.config().resolver.power_source {
        PowerSource::Gesture => format!(
            r#" data-gesture-surface="true" data-player="{}""#,
            game.turn().current_player.number()
        ),
        PowerSource::Simplified => String::new(),
    };
    html.push_str(&format!(
        r#"<div id="dice-field" class="relative bg-green-600 rounded-xl p-8 mb-8 h-96 overflow-hidden" data-field-height="{}"{}>"#,
        FIELD_HEIGHT, surface
    ));
    html.push_str(r#"<div class="absolute top-2 left-2 right-2 h-20 border-2 border-white rounded opacity-50"></div>"#);
    html.push_str(r#"<div class="absolute top-1/2 left-2 right-2 h-px bg-white opacity-50"></div>"#);
    html.push_str(r#"<div class="absolute bottom-2 left-2 right-2 h-20 border-2 border-white rounded opacity-50"></div>"#);
    for outcome in &game.turn().dice_this_turn {
        html.push_str(&render_die(outcome));
    }
    html.push_str(r#"</div>"#);
    html
}

fn render_die(outcome: &RollOutcome) -> String {
    let p = &outcome.placement;
    let animation = match outcome.landing_zone {
        LandingZone::Off => "rollOff",
        _ => "rollAcross",
    };
    let face = DIE_FACES
        .get(usize::from(outcome.die_value.saturating_sub(1)))
        .copied()
        .unwrap_or("?");
    format!(
        r#"<div class="absolute bg-white p-2 rounded-lg shadow-lg dice" data-zone="{}" data-value="{}" style="left: 50%; top: 0; --start-x: {:.1}px; --start-y: {:.1}px; --end-x: {:.1}px; --end-y: {:.1}px; animation: {} 2s forwards"><span class="text-3xl text-slate-700">{}</span></div>"#,
        outcome.landing_zone,
        outcome.die_value,
        p.start_x,
        p.start_y,
        p.final_x,
        p.final_y,
        animation,
        face
    )
}

/// Roll button caption and enabled state follow the turn phase.
pub fn render_roll_control(game: &DiceGame) -> String {
    let caption = if game.is_rolling() {
        "Rolling...".to_string()
    } else {
        format!("Roll Dice ({} left)", game.turn().remaining_dice)
    };
    let (disabled, color) = if game.can_roll() {
        ("", "bg-green-500 hover:bg-green-600 active:bg-green-700")
    } else {
        (" disabled", "bg-gray-400")
    };
    let action = match game.config().resolver.power_source {
        PowerSource::Simplified => {
            "htmx.ajax('POST', '/api/game/roll', {target: '#dice-football', swap: 'innerHTML'})"
        }
        PowerSource::Gesture => "diceFootball.armGesture(document.getElementById('dice-field'))",
    };
    format!(
        r#"<div class="text-center"><button id="roll-button" class="px-6 py-3 rounded-full text-white font-bold text-lg shadow-lg {}" onclick="{}"{}>{}</button></div>"#,
        color, action, disabled, caption
    )
}
