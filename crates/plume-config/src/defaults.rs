//! Built-in defaults for the engine config and the material table.

/// Host ticks between two simulation steps.
pub const DELAY: u32 = 5;

/// Material name of the default smoke.
pub const SMOKE_TYPE: &str = "web";

pub const MIN_DENSITY: u32 = 1;
pub const MAX_DENSITY: u32 = 1;
pub const MAX_DISTANCE: u32 = 50;
pub const DECAY_CHANCE: f32 = 0.1;
pub const RANDOM_SPREAD: bool = false;

pub const MIN_WIND_STRENGTH: u32 = 0;
pub const MAX_WIND_STRENGTH: u32 = 2;

/// Shipped material table.
pub const MATERIALS_RON: &str = include_str!("../../../data/materials.ron");

/// Shipped engine config.
pub const CONFIG_RON: &str = include_str!("../../../data/plume.ron");

pub(crate) fn delay() -> u32 {
    DELAY
}

pub(crate) fn smoke_type() -> String {
    SMOKE_TYPE.to_string()
}

pub(crate) fn min_density() -> u32 {
    MIN_DENSITY
}

pub(crate) fn max_density() -> u32 {
    MAX_DENSITY
}

pub(crate) fn max_distance() -> u32 {
    MAX_DISTANCE
}

pub(crate) fn decay_chance() -> f32 {
    DECAY_CHANCE
}

pub(crate) fn max_wind_strength() -> u32 {
    MAX_WIND_STRENGTH
}
