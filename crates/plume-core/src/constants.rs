//! Single source of truth for shared constants.

/// Side length of a sub-region column in voxels (x and z).
pub const COLUMN_SIZE: i32 = 16;

/// log2(COLUMN_SIZE), used for arithmetic-shift column lookup.
pub const COLUMN_SHIFT: u32 = 4;

/// Default world height ceiling for grids that don't specify one.
pub const DEFAULT_MAX_HEIGHT: i32 = 256;

/// Precomputed distance table covers offsets in [-DISTANCE_TABLE_RADIUS, DISTANCE_TABLE_RADIUS].
pub const DISTANCE_TABLE_RADIUS: i32 = 25;

/// Number of entries per axis in the distance table.
pub const DISTANCE_TABLE_SIZE: usize = DISTANCE_TABLE_RADIUS as usize + 1;

/// Number of compass points in a `Direction`.
pub const COMPASS_POINTS: u8 = 8;

/// Sides of the die rolled per axis for random spread. Only the two extremes jitter.
pub const SPREAD_ROLL_SIDES: u32 = 9;

/// Wind direction and strength each drift with probability 1 in WIND_DRIFT_ODDS per tick.
pub const WIND_DRIFT_ODDS: u32 = 3;

/// Starting wind strength before clamping to the configured range.
pub const INITIAL_WIND_STRENGTH: u32 = 1;
