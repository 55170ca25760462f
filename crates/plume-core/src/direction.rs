use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::COMPASS_POINTS;
use crate::random::RandomSource;

/// One of the 8 compass points, in clockwise order starting at north.
///
/// A wind direction names where the wind blows *from*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

/// All 8 directions in clockwise order.
pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compass direction '{0}'")]
pub struct ParseDirectionError(pub String);

impl Direction {
    /// Horizontal unit step (dx, dz). North = (0, -1), east = (1, 0).
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::NorthEast => IVec2::new(1, -1),
            Direction::East => IVec2::new(1, 0),
            Direction::SouthEast => IVec2::new(1, 1),
            Direction::South => IVec2::new(0, 1),
            Direction::SouthWest => IVec2::new(-1, 1),
            Direction::West => IVec2::new(-1, 0),
            Direction::NorthWest => IVec2::new(-1, -1),
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Direction at a cyclic position; wraps modulo 8.
    pub fn from_ordinal(ordinal: i32) -> Direction {
        ALL_DIRECTIONS[ordinal.rem_euclid(COMPASS_POINTS as i32) as usize]
    }

    pub fn rotate_clockwise(self) -> Direction {
        Self::from_ordinal(self.ordinal() as i32 + 1)
    }

    pub fn rotate_counter_clockwise(self) -> Direction {
        Self::from_ordinal(self.ordinal() as i32 - 1)
    }

    /// Rotate by a uniformly random amount in [-steps, +steps].
    pub fn jitter<R: RandomSource + ?Sized>(self, steps: u8, rng: &mut R) -> Direction {
        let span = u32::from(steps) * 2 + 1;
        let delta = rng.next_below(span) as i32 - i32::from(steps);
        Self::from_ordinal(self.ordinal() as i32 + delta)
    }

    /// Clamp to the clockwise arc `from..=to`.
    ///
    /// Directions already on the arc are returned unchanged. Anything else
    /// snaps to whichever bound is nearer in cyclic distance, with ties going
    /// to `from`. When `from == to` the arc is a single point.
    pub fn constrain(self, from: Direction, to: Direction) -> Direction {
        let arc_len = clockwise_steps(from, to);
        if clockwise_steps(from, self) <= arc_len {
            return self;
        }
        if triangle_distance(self, to) < triangle_distance(self, from) {
            to
        } else {
            from
        }
    }

    /// Compass abbreviation: N, NE, E, ...
    pub fn short_name(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

/// Steps needed to turn clockwise from `a` to `b`, in [0, 8).
fn clockwise_steps(a: Direction, b: Direction) -> u8 {
    (b.ordinal() as i32 - a.ordinal() as i32).rem_euclid(COMPASS_POINTS as i32) as u8
}

/// Shortest way round the compass between two directions, in [0, 4].
/// A triangle wave over the ordinal difference.
fn triangle_distance(a: Direction, b: Direction) -> u8 {
    let d = clockwise_steps(a, b);
    d.min(COMPASS_POINTS - d)
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction = match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Direction::North,
            "ne" | "northeast" => Direction::NorthEast,
            "e" | "east" => Direction::East,
            "se" | "southeast" => Direction::SouthEast,
            "s" | "south" => Direction::South,
            "sw" | "southwest" => Direction::SouthWest,
            "w" | "west" => Direction::West,
            "nw" | "northwest" => Direction::NorthWest,
            _ => return Err(ParseDirectionError(s.to_string())),
        };
        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use Direction::*;

    #[test]
    fn test_all_directions_unique_unit_steps() {
        for (i, a) in ALL_DIRECTIONS.iter().enumerate() {
            let o = a.offset();
            assert!(o.x.abs() <= 1 && o.y.abs() <= 1 && o != IVec2::ZERO);
            for b in ALL_DIRECTIONS.iter().skip(i + 1) {
                assert_ne!(a.offset(), b.offset(), "{a:?} and {b:?} share offset");
            }
        }
    }

    #[test]
    fn test_rotation_closes_after_eight_steps() {
        for start in ALL_DIRECTIONS {
            let mut d = start;
            for _ in 0..8 {
                d = d.rotate_clockwise();
            }
            assert_eq!(d, start);
            assert_eq!(start.rotate_clockwise().rotate_counter_clockwise(), start);
        }
        assert_eq!(NorthWest.rotate_clockwise(), North);
        assert_eq!(North.rotate_counter_clockwise(), NorthWest);
    }

    #[test]
    fn test_constrain_inside_arc_unchanged() {
        for d in [North, NorthEast, East] {
            assert_eq!(d.constrain(North, East), d);
        }
        // Arc that wraps through north.
        for d in [West, NorthWest, North, NorthEast] {
            assert_eq!(d.constrain(West, NorthEast), d);
        }
    }

    #[test]
    fn test_constrain_snaps_to_nearer_bound() {
        assert_eq!(SouthWest.constrain(North, South), South);
        assert_eq!(NorthWest.constrain(North, South), North);
        assert_eq!(SouthEast.constrain(North, East), East);
        assert_eq!(NorthWest.constrain(North, East), North);
        // Tie goes to `from`.
        assert_eq!(West.constrain(North, South), North);
        assert_eq!(SouthWest.constrain(North, East), North);
    }

    #[test]
    fn test_constrain_north_south_never_leaves_arc() {
        let arc = [North, NorthEast, East, SouthEast, South];
        for d in ALL_DIRECTIONS {
            let c = d.constrain(North, South);
            assert!(arc.contains(&c), "{d:?} -> {c:?} left the arc");
        }
        let reverse_arc = [South, SouthWest, West, NorthWest, North];
        for d in ALL_DIRECTIONS {
            let c = d.constrain(South, North);
            assert!(reverse_arc.contains(&c), "{d:?} -> {c:?} left the arc");
        }
    }

    #[test]
    fn test_constrain_idempotent() {
        for from in ALL_DIRECTIONS {
            for to in ALL_DIRECTIONS {
                for d in ALL_DIRECTIONS {
                    let once = d.constrain(from, to);
                    assert_eq!(once.constrain(from, to), once, "{d:?} in {from:?}..{to:?}");
                }
            }
        }
    }

    #[test]
    fn test_constrain_single_point_collapses() {
        for d in ALL_DIRECTIONS {
            assert_eq!(d.constrain(SouthEast, SouthEast), SouthEast);
        }
    }

    #[test]
    fn test_jitter_stays_within_steps() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let d = East.jitter(1, &mut rng);
            assert!([NorthEast, East, SouthEast].contains(&d), "{d:?}");
        }
        assert_eq!(East.jitter(0, &mut rng), East);
    }

    #[test]
    fn test_parse_and_display() {
        for d in ALL_DIRECTIONS {
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
        assert_eq!(" north ".parse::<Direction>(), Ok(North));
        assert_eq!("sw".parse::<Direction>(), Ok(SouthWest));
        assert!("up".parse::<Direction>().is_err());
    }
}
