//! Scoring — turns a landing zone and die face into points and a result line.

use serde::{Deserialize, Serialize};

use crate::game::resolver::LandingZone;
use crate::game::turns::Player;

/// Flat value of a touchdown, independent of the die face.
pub const TOUCHDOWN_POINTS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub delta: u32,
    pub label: String,
}

/// Score one landed die.
pub fn score(zone: LandingZone, die_value: u8) -> ScoreResult {
    let (delta, label) = match zone {
        LandingZone::Touchdown => (TOUCHDOWN_POINTS, "TOUCHDOWN! +7 points".to_string()),
        LandingZone::Endzone => (
            u32::from(die_value),
            format!("In the endzone! +{} points", die_value),
        ),
        LandingZone::Off => (0, "Off the table!".to_string()),
        LandingZone::Short => (0, "Roll harder!".to_string()),
        LandingZone::Field => (0, "On the field".to_string()),
    };
    ScoreResult { delta, label }
}

/// Running totals for both players. Only ever grows until a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player1: u32,
    pub player2: u32,
}

impl Scoreboard {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    pub fn add(&mut self, player: Player, delta: u32) {
        let total = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *total = total.saturating_add(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touchdown_is_worth_seven_regardless_of_die() {
        for die in 1..=6 {
            let r = score(LandingZone::Touchdown, die);
            assert_eq!(r.delta, 7);
            assert_eq!(r.label, "TOUCHDOWN! +7 points");
        }
    }

    #[test]
    fn endzone_is_worth_the_die_face() {
        let r = score(LandingZone::Endzone, 4);
        assert_eq!(r.delta, 4);
        assert_eq!(r.label, "In the endzone! +4 points");
    }

    #[test]
    fn other_zones_score_nothing() {
        assert_eq!(score(LandingZone::Off, 6).label, "Off the table!");
        assert_eq!(score(LandingZone::Short, 6).label, "Roll harder!");
        assert_eq!(score(LandingZone::Field, 6).label, "On the field");
        for zone in [LandingZone::Off, LandingZone::Short, LandingZone::Field] {
            assert_eq!(score(zone, 3).delta, 0);
        }
    }

    #[test]
    fn deltas_stay_in_the_allowed_set() {
        let zones = [
            LandingZone::Short,
            LandingZone::Field,
            LandingZone::Endzone,
            LandingZone::Touchdown,
            LandingZone::Off,
        ];
        for zone in zones {
            for die in 1..=6 {
                let d = score(zone, die).delta;
                assert!(d == 0 || d == 7 || (1..=6).contains(&d));
            }
        }
    }

    #[test]
    fn scoreboard_credits_only_the_acting_player() {
        let mut board = Scoreboard::default();
        board.add(Player::Two, 7);
        board.add(Player::Two, 3);
        assert_eq!(board.get(Player::One), 0);
        assert_eq!(board.get(Player::Two), 10);
    }
}
