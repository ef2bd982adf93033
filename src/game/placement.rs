//! Landing coordinates for the board.
//!
//! The field is `FIELD_HEIGHT` units tall with player 1 throwing down from
//! the top edge and player 2 throwing up from the bottom. `x` is a lateral
//! offset from the field's centre line.

use serde::{Deserialize, Serialize};

use crate::game::resolver::Resolution;
use crate::game::rng::RollRng;
use crate::game::turns::Player;

/// Player 2 coordinates are an exact mirror, `FIELD_HEIGHT - y`, of player
/// 1's. An off-table landing therefore sits at -70 and the endzone spans
/// 40..80 at the top edge, not at separately tuned constants per end.
pub const FIELD_HEIGHT: f64 = 380.0;
const THROW_LINE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub start_x: f64,
    pub start_y: f64,
    pub final_x: f64,
    pub final_y: f64,
}

/// Place a resolved roll on the board. Takes two lateral draws.
pub fn place(resolution: &Resolution, player: Player, rng: &mut dyn RollRng) -> Placement {
    let start_x = rng.uniform(-50.0, 50.0);
    let final_x = start_x + rng.uniform(-100.0, 100.0);
    let (start_y, final_y) = match player {
        Player::One => (THROW_LINE, resolution.distance),
        Player::Two => (FIELD_HEIGHT - THROW_LINE, FIELD_HEIGHT - resolution.distance),
    };
    Placement {
        start_x,
        start_y,
        final_x,
        final_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolver::LandingZone;
    use crate::game::rng::SequenceRng;

    fn touchdown() -> Resolution {
        Resolution {
            zone: LandingZone::Touchdown,
            distance: 330.0,
            normalized_velocity: 0.7,
        }
    }

    #[test]
    fn player_one_lands_at_distance_from_top() {
        let mut rng = SequenceRng::new(vec![0.5, 0.75]);
        let p = place(&touchdown(), Player::One, &mut rng);
        assert_eq!(p.start_x, 0.0);
        assert_eq!(p.final_x, 50.0);
        assert_eq!(p.start_y, 30.0);
        assert_eq!(p.final_y, 330.0);
    }

    #[test]
    fn player_two_is_mirrored() {
        let mut rng = SequenceRng::new(vec![0.0, 0.0]);
        let p = place(&touchdown(), Player::Two, &mut rng);
        assert_eq!(p.start_x, -50.0);
        assert_eq!(p.final_x, -150.0);
        assert_eq!(p.start_y, 350.0);
        assert_eq!(p.final_y, 50.0);
    }

    #[test]
    fn player_two_landings_mirror_player_one() {
        let off = Resolution {
            zone: LandingZone::Off,
            distance: 450.0,
            normalized_velocity: 0.9,
        };
        let mut rng = SequenceRng::new(vec![0.5]);
        assert_eq!(place(&off, Player::Two, &mut rng).final_y, -70.0);
        for distance in [300.0, 340.0] {
            let endzone = Resolution {
                zone: LandingZone::Endzone,
                distance,
                normalized_velocity: 0.3,
            };
            let one = place(&endzone, Player::One, &mut rng);
            let two = place(&endzone, Player::Two, &mut rng);
            assert_eq!(one.final_y + two.final_y, FIELD_HEIGHT);
        }
    }

    #[test]
    fn off_table_lands_outside_the_field() {
        let off = Resolution {
            zone: LandingZone::Off,
            distance: 450.0,
            normalized_velocity: 1.0,
        };
        let mut rng = SequenceRng::new(vec![0.5]);
        assert!(place(&off, Player::One, &mut rng).final_y > FIELD_HEIGHT);
        assert!(place(&off, Player::Two, &mut rng).final_y < 0.0);
    }
}
