use std::fmt;

use crate::direction::Direction;
use crate::error::SettingsError;
use crate::types::MaterialId;

/// Window of global wind directions a source accepts, as a clockwise arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindConstraint {
    pub from: Direction,
    pub to: Direction,
}

impl WindConstraint {
    pub fn new(from: Direction, to: Direction) -> Self {
        Self { from, to }
    }

    /// A window of exactly one direction.
    pub fn fixed(direction: Direction) -> Self {
        Self::new(direction, direction)
    }

    /// The global wind as seen by a source with this window.
    pub fn apply(&self, wind: Direction) -> Direction {
        wind.constrain(self.from, self.to)
    }
}

impl fmt::Display for WindConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

/// Tunable behavior of one smoke source.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeSettings {
    /// Material written into voxels that hold smoke.
    pub smoke_material: MaterialId,
    /// Inclusive range of particles spawned per tick.
    pub density_min: u32,
    pub density_max: u32,
    /// Per-tick probability that a particle dissipates, in (0, 1).
    pub decay_chance: f32,
    /// Particles farther than this from the anchor are dropped.
    pub max_distance: u32,
    /// None = follow the global wind freely.
    pub wind: Option<WindConstraint>,
    /// Add a small random lateral jitter to every movement search.
    pub random_spread: bool,
}

impl SmokeSettings {
    pub fn new(smoke_material: MaterialId) -> Self {
        Self {
            smoke_material,
            density_min: 1,
            density_max: 1,
            decay_chance: 0.1,
            max_distance: 50,
            wind: None,
            random_spread: false,
        }
    }

    /// Reject settings that cannot drive a source.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.smoke_material.is_air() {
            return Err(SettingsError::AirSmokeMaterial);
        }
        if self.density_max < 1 {
            return Err(SettingsError::MaxDensityTooLow(self.density_max));
        }
        if self.density_min > self.density_max {
            return Err(SettingsError::DensityRangeInverted {
                min: self.density_min,
                max: self.density_max,
            });
        }
        // NaN fails both comparisons and lands here too.
        if !(self.decay_chance > 0.0 && self.decay_chance < 1.0) {
            return Err(SettingsError::DecayChanceOutOfRange(self.decay_chance));
        }
        Ok(())
    }

    /// Whether particles should prefer spreading out over stacking onto
    /// existing smoke. Only single-width sources stack unconditionally.
    pub fn spreads(&self) -> bool {
        self.density_max > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(SmokeSettings::new(MaterialId(30)).validate(), Ok(()));
    }

    #[test]
    fn test_density_bounds_rejected() {
        let mut s = SmokeSettings::new(MaterialId(30));
        s.density_max = 0;
        s.density_min = 0;
        assert_eq!(s.validate(), Err(SettingsError::MaxDensityTooLow(0)));

        s.density_min = 4;
        s.density_max = 2;
        let err = s.validate().expect_err("inverted range");
        assert_eq!(err.field(), "minDensity");
    }

    #[test]
    fn test_decay_chance_exclusive_bounds() {
        let mut s = SmokeSettings::new(MaterialId(30));
        for bad in [0.0, 1.0, -0.5, 1.5, f32::NAN] {
            s.decay_chance = bad;
            assert!(s.validate().is_err(), "{bad} accepted");
        }
        s.decay_chance = 0.999;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_air_smoke_rejected() {
        let s = SmokeSettings::new(MaterialId::AIR);
        assert_eq!(s.validate(), Err(SettingsError::AirSmokeMaterial));
    }

    #[test]
    fn test_wind_constraint_display_and_apply() {
        let fixed = WindConstraint::fixed(Direction::East);
        assert_eq!(fixed.to_string(), "E");
        assert_eq!(fixed.apply(Direction::West), Direction::East);

        let arc = WindConstraint::new(Direction::North, Direction::East);
        assert_eq!(arc.to_string(), "N-E");
        assert_eq!(arc.apply(Direction::NorthEast), Direction::NorthEast);
    }

    #[test]
    fn test_spreads_only_above_single_density() {
        let mut s = SmokeSettings::new(MaterialId(30));
        assert!(!s.spreads());
        s.density_max = 2;
        assert!(s.spreads());
    }
}
