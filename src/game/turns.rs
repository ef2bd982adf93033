//! Turn/round state machine.
//!
//! ```text
//! AwaitingInput --roll accepted--> RollInProgress
//! RollInProgress --settle--------> AwaitingInput   (dice left this turn)
//! RollInProgress --settle--------> TurnComplete    (quota used up)
//! TurnComplete   --advance-------> AwaitingInput   (other player, quota restored)
//! ```
//!
//! A roll is fully resolved and scored the moment it is accepted. Settling
//! and turn advancement are timed continuations driven by `tick`; once a
//! roll is accepted both are guaranteed to fire, there is no cancel path.
//! Roll input is ignored while a roll is in progress or no dice remain.

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::game::placement::{self, Placement};
use crate::game::resolver::{LandingZone, PowerSource, ResolverConfig, RollInput, RollResolver};
use crate::game::rng::RollRng;
use crate::game::score::{self, Scoreboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidInputError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(InvalidInputError::InvalidPlayer(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingInput,
    RollInProgress,
    TurnComplete,
}

/// One landed die. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub die_value: u8,
    pub landing_zone: LandingZone,
    pub distance: f64,
    pub normalized_velocity: f64,
    pub score_delta: u32,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnState {
    pub current_player: Player,
    pub remaining_dice: u8,
    pub dice_this_turn: Vec<RollOutcome>,
}

impl TurnState {
    fn fresh(player: Player, quota: u8) -> Self {
        Self {
            current_player: player,
            remaining_dice: quota,
            dice_this_turn: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub resolver: ResolverConfig,
    /// Dice each player rolls per turn.
    pub dice_per_turn: u8,
    /// Delay between accepting a roll and it settling.
    pub settle_ms: u32,
    /// Delay between the last roll settling and the turn passing over.
    pub advance_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            dice_per_turn: 2,
            settle_ms: 2000,
            advance_ms: 2000,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.dice_per_turn == 0 {
            return Err(InvalidInputError::InvalidConfig(
                "a turn needs at least one die",
            ));
        }
        self.resolver.validate()
    }
}

/// Result of a roll request.
#[derive(Debug, Clone, PartialEq)]
pub enum RollStatus {
    Accepted(RollOutcome),
    /// Guarded out: a roll is in flight or the turn's dice are spent.
    Ignored,
}

/// Emitted to the adapter as timed transitions fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RollSettled {
        outcome: RollOutcome,
        label: String,
        current_player: Player,
        remaining_dice: u8,
        scores: Scoreboard,
    },
    TurnAdvanced {
        current_player: Player,
        remaining_dice: u8,
    },
}

/// Serializable view of the whole game for the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: TurnPhase,
    pub power_source: PowerSource,
    pub turn: TurnState,
    pub scores: Scoreboard,
    pub last_result: String,
}

#[derive(Debug, Clone)]
pub struct DiceGame {
    config: GameConfig,
    resolver: RollResolver,
    phase: TurnPhase,
    turn: TurnState,
    scores: Scoreboard,
    last_result: String,
    /// Time left on the pending continuation (settle or advance).
    pending_ms: u32,
}

impl Default for DiceGame {
    fn default() -> Self {
        Self::build(GameConfig::default())
    }
}

impl DiceGame {
    pub fn new(config: GameConfig) -> Result<Self, InvalidInputError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        Self {
            resolver: RollResolver::new(config.resolver),
            phase: TurnPhase::AwaitingInput,
            turn: TurnState::fresh(Player::One, config.dice_per_turn),
            scores: Scoreboard::default(),
            last_result: String::new(),
            pending_ms: 0,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    pub fn is_rolling(&self) -> bool {
        self.phase == TurnPhase::RollInProgress
    }

    /// Whether a roll request would currently be accepted.
    pub fn can_roll(&self) -> bool {
        self.phase == TurnPhase::AwaitingInput && self.turn.remaining_dice > 0
    }

    /// Accept one roll: draw the die, resolve and score it, and start the
    /// settle timer.
    pub fn trigger_roll(
        &mut self,
        input: RollInput,
        rng: &mut dyn RollRng,
    ) -> Result<RollStatus, InvalidInputError> {
        if !self.can_roll() {
            log::debug!(
                "roll ignored (phase={:?}, remaining={})",
                self.phase,
                self.turn.remaining_dice
            );
            return Ok(RollStatus::Ignored);
        }

        // Validate before touching the RNG so a rejected roll draws nothing.
        self.resolver.check_input(input)?;
        let player = self.turn.current_player;
        let die_value = rng.roll_die();
        let resolution = self.resolver.resolve(input, player, rng)?;
        let placement = placement::place(&resolution, player, rng);
        let result = score::score(resolution.zone, die_value);

        let outcome = RollOutcome {
            die_value,
            landing_zone: resolution.zone,
            distance: resolution.distance,
            normalized_velocity: resolution.normalized_velocity,
            score_delta: result.delta,
            placement,
        };

        self.turn.dice_this_turn.push(outcome.clone());
        self.scores.add(player, result.delta);
        self.turn.remaining_dice -= 1;
        self.last_result = result.label;
        self.phase = TurnPhase::RollInProgress;
        self.pending_ms = self.config.settle_ms;

        log::debug!(
            "player {} rolled {} into {} (+{})",
            player.number(),
            die_value,
            outcome.landing_zone,
            outcome.score_delta
        );
        Ok(RollStatus::Accepted(outcome))
    }

    /// Advance the clock, firing any continuations that come due. Leftover
    /// time from a settle carries into the following turn advance.
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut left = elapsed_ms;
        loop {
            match self.phase {
                TurnPhase::AwaitingInput => break,
                TurnPhase::RollInProgress | TurnPhase::TurnComplete => {
                    if left < self.pending_ms {
                        self.pending_ms -= left;
                        break;
                    }
                    left -= self.pending_ms;
                    self.pending_ms = 0;
                    let event = if self.is_rolling() {
                        self.settle()
                    } else {
                        self.advance_turn()
                    };
                    events.extend(event);
                }
            }
        }
        events
    }

    /// Finish the in-flight roll immediately.
    pub fn settle(&mut self) -> Option<GameEvent> {
        if self.phase != TurnPhase::RollInProgress {
            return None;
        }
        let outcome = self.turn.dice_this_turn.last()?.clone();
        if self.turn.remaining_dice > 0 {
            self.phase = TurnPhase::AwaitingInput;
            self.pending_ms = 0;
        } else {
            self.phase = TurnPhase::TurnComplete;
            self.pending_ms = self.config.advance_ms;
        }
        Some(GameEvent::RollSettled {
            outcome,
            label: self.last_result.clone(),
            current_player: self.turn.current_player,
            remaining_dice: self.turn.remaining_dice,
            scores: self.scores,
        })
    }

    /// Hand the dice to the other player immediately.
    pub fn advance_turn(&mut self) -> Option<GameEvent> {
        if self.phase != TurnPhase::TurnComplete {
            return None;
        }
        let next = self.turn.current_player.other();
        self.turn = TurnState::fresh(next, self.config.dice_per_turn);
        self.last_result.clear();
        self.phase = TurnPhase::AwaitingInput;
        self.pending_ms = 0;
        log::info!("turn passes to player {}", next.number());
        Some(GameEvent::TurnAdvanced {
            current_player: next,
            remaining_dice: self.turn.remaining_dice,
        })
    }

    /// Start a new game with the same configuration. Pending continuations
    /// belong to the old game and are dropped.
    pub fn restart(&mut self) {
        *self = Self::build(self.config);
        log::info!("game restarted");
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            power_source: self.config.resolver.power_source,
            turn: self.turn.clone(),
            scores: self.scores,
            last_result: self.last_result.clone(),
        }
    }
}
