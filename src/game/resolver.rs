//! Roll resolution — maps a roll's power onto a landing zone and distance.
//!
//! Two power sources share one resolver:
//!
//! - **Gesture**: the adapter measures a swipe and sends a raw power. The
//!   power is direction-adjusted for the thrower, clamped to
//!   `cap_magnitude`, and normalized into `v ∈ [0, 1]`.
//! - **Simplified**: no input at all; `v` is drawn fresh from the RNG for
//!   every roll.
//!
//! Each mode has its own band table. Comparisons are open (`<`, `>`) exactly
//! as listed, so the exact boundaries `v == 0.3` and `v == 0.8` land in the
//! gesture FIELD band.
//!
//! Distances are measured from the thrower's edge of the field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::game::rng::RollRng;
use crate::game::turns::Player;

/// Fixed landing distance for a die that leaves the table.
pub const OFF_TABLE_DISTANCE: f64 = 450.0;
/// Fixed landing distance for a touchdown.
pub const TOUCHDOWN_DISTANCE: f64 = 330.0;

const GESTURE_TOUCHDOWN_CHANCE: f64 = 0.15;
const SIMPLIFIED_TOUCHDOWN_CHANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingZone {
    Short,
    Field,
    Endzone,
    Touchdown,
    Off,
}

impl LandingZone {
    pub fn as_str(self) -> &'static str {
        match self {
            LandingZone::Short => "short",
            LandingZone::Field => "field",
            LandingZone::Endzone => "endzone",
            LandingZone::Touchdown => "touchdown",
            LandingZone::Off => "off",
        }
    }
}

impl fmt::Display for LandingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a roll's strength comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    /// Power measured by the adapter from a swipe gesture.
    #[default]
    Gesture,
    /// Power drawn internally for every roll.
    Simplified,
}

impl PowerSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PowerSource::Gesture => "gesture",
            PowerSource::Simplified => "simple",
        }
    }
}

impl FromStr for PowerSource {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gesture" => Ok(PowerSource::Gesture),
            "simple" | "simplified" => Ok(PowerSource::Simplified),
            other => Err(InvalidInputError::UnknownPowerSource(other.to_string())),
        }
    }
}

/// One roll request from the adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollInput {
    /// Raw, un-normalized power from a gesture.
    Power(f64),
    /// No input; the resolver supplies its own power.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub power_source: PowerSource,
    /// Raw power at or above this magnitude normalizes to `v = 1.0`.
    pub cap_magnitude: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            power_source: PowerSource::Gesture,
            cap_magnitude: 3.0,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !self.cap_magnitude.is_finite() || self.cap_magnitude <= 0.0 {
            return Err(InvalidInputError::InvalidConfig(
                "cap magnitude must be a positive finite number",
            ));
        }
        Ok(())
    }
}

/// Resolver output: everything about a roll except the die face and score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub zone: LandingZone,
    pub distance: f64,
    pub normalized_velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollResolver {
    config: ResolverConfig,
}

impl RollResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one roll for `player` according to the configured power source.
    pub fn resolve(
        &self,
        input: RollInput,
        player: Player,
        rng: &mut dyn RollRng,
    ) -> Result<Resolution, InvalidInputError> {
        match self.config.power_source {
            PowerSource::Gesture => {
                let power = match input {
                    RollInput::Power(p) => p,
                    RollInput::Auto => return Err(InvalidInputError::MissingPower),
                };
                let v = self.normalize(directed_power(player, power))?;
                Ok(gesture_band(v, rng))
            }
            PowerSource::Simplified => {
                if let RollInput::Power(p) = input {
                    log::debug!("simplified mode ignores supplied power {}", p);
                }
                let v = rng.next_unit();
                Ok(simplified_band(v, rng))
            }
        }
    }

    /// Reject input the configured power source cannot resolve.
    pub fn check_input(&self, input: RollInput) -> Result<(), InvalidInputError> {
        match (self.config.power_source, input) {
            (PowerSource::Gesture, RollInput::Auto) => Err(InvalidInputError::MissingPower),
            (PowerSource::Gesture, RollInput::Power(p)) if !p.is_finite() => {
                Err(InvalidInputError::NonFinitePower(p))
            }
            _ => Ok(()),
        }
    }

    /// `v = min(|power|, cap) / cap`.
    pub fn normalize(&self, power: f64) -> Result<f64, InvalidInputError> {
        if !power.is_finite() {
            return Err(InvalidInputError::NonFinitePower(power));
        }
        let cap = self.config.cap_magnitude;
        Ok(power.abs().min(cap) / cap)
    }
}

/// Player 2 throws from the opposite end, so their gesture sign is flipped.
pub fn directed_power(player: Player, power: f64) -> f64 {
    match player {
        Player::One => power,
        Player::Two => -power,
    }
}

/// Gesture band table, first match wins.
pub fn gesture_band(v: f64, rng: &mut dyn RollRng) -> Resolution {
    let (zone, distance) = if v < 0.3 {
        (LandingZone::Short, v * 150.0 + rng.uniform(0.0, 50.0))
    } else if v > 0.8 {
        (LandingZone::Off, OFF_TABLE_DISTANCE)
    } else if v > 0.6 && v < 0.8 {
        if rng.next_unit() < GESTURE_TOUCHDOWN_CHANCE {
            (LandingZone::Touchdown, TOUCHDOWN_DISTANCE)
        } else {
            (LandingZone::Endzone, 300.0 + rng.uniform(0.0, 40.0))
        }
    } else {
        (LandingZone::Field, v * 200.0 + rng.uniform(0.0, 100.0))
    };
    Resolution {
        zone,
        distance,
        normalized_velocity: v,
    }
}

/// Simplified band table. There is no SHORT zone in this mode: weak rolls
/// trickle into the endzone.
pub fn simplified_band(v: f64, rng: &mut dyn RollRng) -> Resolution {
    let (zone, distance) = if v > 0.8 {
        (LandingZone::Off, OFF_TABLE_DISTANCE)
    } else if v > 0.5 {
        // Far half of the field from the thrower.
        (LandingZone::Field, 180.0 + rng.uniform(0.0, 160.0))
    } else if rng.next_unit() < SIMPLIFIED_TOUCHDOWN_CHANCE {
        (LandingZone::Touchdown, TOUCHDOWN_DISTANCE)
    } else {
        (LandingZone::Endzone, 300.0 + rng.uniform(0.0, 40.0))
    };
    Resolution {
        zone,
        distance,
        normalized_velocity: v,
    }
}
