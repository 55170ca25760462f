use plume_core::constants::{INITIAL_WIND_STRENGTH, WIND_DRIFT_ODDS};
use plume_core::direction::Direction;
use plume_core::random::RandomSource;

/// Inclusive bounds for the global wind strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindLimits {
    pub min_strength: u32,
    pub max_strength: u32,
}

impl WindLimits {
    pub fn new(min_strength: u32, max_strength: u32) -> Self {
        Self {
            min_strength,
            max_strength: max_strength.max(min_strength),
        }
    }

    fn clamp(&self, strength: i64) -> u32 {
        strength.clamp(i64::from(self.min_strength), i64::from(self.max_strength)) as u32
    }
}

impl Default for WindLimits {
    fn default() -> Self {
        Self::new(0, 2)
    }
}

/// The wind every particle reads during one outer tick.
///
/// `direction` is where the wind blows *from*; particles drift the opposite
/// way by `strength` cells per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindState {
    pub direction: Direction,
    pub strength: u32,
}

impl WindState {
    /// North at the initial strength, pulled into the configured range.
    pub fn initial(limits: WindLimits) -> Self {
        Self {
            direction: Direction::North,
            strength: limits.clamp(i64::from(INITIAL_WIND_STRENGTH)),
        }
    }

    /// No push at all.
    pub fn calm() -> Self {
        Self {
            direction: Direction::North,
            strength: 0,
        }
    }

    /// One step of the random walk. Called once per outer tick, after every
    /// source has ticked.
    pub fn advance<R: RandomSource + ?Sized>(&mut self, limits: WindLimits, rng: &mut R) {
        if rng.next_below(WIND_DRIFT_ODDS) == 0 {
            self.direction = if rng.next_bool() {
                self.direction.rotate_clockwise()
            } else {
                self.direction.rotate_counter_clockwise()
            };
        }
        if rng.next_below(WIND_DRIFT_ODDS) == 0 {
            let delta = i64::from(rng.next_below(3)) - 1;
            self.strength = limits.clamp(i64::from(self.strength) + delta);
        }
    }
}
