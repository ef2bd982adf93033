//! Global session container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the WASM module alive, so the game persists
//! across `handle_request` calls until the page is closed. Requests are
//! serialized by the worker's message queue, so one roll is processed at a
//! time.

use std::cell::RefCell;

use crate::error::InvalidInputError;
use crate::game::rng::{RollRng, SeededRng};
use crate::game::turns::{DiceGame, GameConfig};

/// The running game plus the random stream that drives it.
pub struct Session {
    pub game: DiceGame,
    pub rng: Box<dyn RollRng>,
}

impl Session {
    pub fn new(config: GameConfig, rng: Box<dyn RollRng>) -> Result<Self, InvalidInputError> {
        Ok(Self {
            game: DiceGame::new(config)?,
            rng,
        })
    }

    /// Seeded session; `None` draws the seed from the platform's entropy.
    pub fn seeded(config: GameConfig, seed: Option<u64>) -> Result<Self, InvalidInputError> {
        let rng = match seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        Self::new(config, Box::new(rng))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            game: DiceGame::default(),
            rng: Box::new(SeededRng::from_entropy()),
        }
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the entire session (used when the adapter reconfigures the game).
pub fn replace_session(new_session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = new_session;
    });
}

/// Back to a default gesture-mode game on a fresh entropy seed.
pub fn reset_session() {
    replace_session(Session::default());
}

/// Export the game as a JSON snapshot for the adapter.
pub fn export_state_json() -> String {
    with_session(|s| {
        serde_json::to_string(&s.game.snapshot()).unwrap_or_else(|_| "{}".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolver::{PowerSource, ResolverConfig, RollInput};
    use crate::game::rng::SequenceRng;
    use crate::game::turns::{RollStatus, TurnPhase};

    #[test]
    fn default_session_awaits_player_one() {
        reset_session();
        with_session(|s| {
            assert_eq!(s.game.phase(), TurnPhase::AwaitingInput);
            assert_eq!(s.game.turn().current_player.number(), 1);
            assert_eq!(s.game.config().resolver.power_source, PowerSource::Gesture);
        });
    }

    #[test]
    fn rolls_persist_between_calls() {
        replace_session(
            Session::new(GameConfig::default(), Box::new(SequenceRng::new(vec![0.5]))).unwrap(),
        );
        let status = with_session_mut(|s| s.game.trigger_roll(RollInput::Power(4.5), s.rng.as_mut()));
        assert!(matches!(status, Ok(RollStatus::Accepted(_))));
        with_session(|s| assert_eq!(s.game.turn().remaining_dice, 1));
        reset_session();
    }

    #[test]
    fn export_contains_scores_and_phase() {
        reset_session();
        let json = export_state_json();
        assert!(json.contains(r#""phase":"awaiting_input""#));
        assert!(json.contains(r#""player1":0"#));
        assert!(json.contains(r#""power_source":"gesture""#));
        reset_session();
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let config = GameConfig {
            resolver: ResolverConfig {
                power_source: PowerSource::Simplified,
                ..ResolverConfig::default()
            },
            ..GameConfig::default()
        };
        let mut a = Session::seeded(config, Some(11)).unwrap();
        let mut b = Session::seeded(config, Some(11)).unwrap();
        let ra = a.game.trigger_roll(RollInput::Auto, a.rng.as_mut()).unwrap();
        let rb = b.game.trigger_roll(RollInput::Auto, b.rng.as_mut()).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            dice_per_turn: 0,
            ..GameConfig::default()
        };
        assert!(Session::seeded(config, Some(1)).is_err());
    }
}
