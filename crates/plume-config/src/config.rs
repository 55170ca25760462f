use serde::{Deserialize, Serialize};

use plume_core::direction::Direction;
use plume_core::material::MaterialTable;
use plume_core::settings::{SmokeSettings, WindConstraint};
use plume_core::types::MaterialId;

use crate::defaults;

/// Engine-wide settings loaded from RON. Per-source settings start from these
/// and are overridden by command options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "defaults::delay")]
    pub delay: u32,
    #[serde(default = "defaults::smoke_type")]
    pub smoke_type: String,
    #[serde(default = "defaults::min_density")]
    pub min_density: u32,
    #[serde(default = "defaults::max_density")]
    pub max_density: u32,
    #[serde(default = "defaults::max_distance")]
    pub max_distance: u32,
    #[serde(default = "defaults::decay_chance")]
    pub decay_chance: f32,
    #[serde(default)]
    pub random_spread: bool,
    #[serde(default)]
    pub min_wind_strength: u32,
    #[serde(default = "defaults::max_wind_strength")]
    pub max_wind_strength: u32,
    #[serde(default)]
    pub wind_from: Option<Direction>,
    #[serde(default)]
    pub wind_to: Option<Direction>,
    /// Fixed seed for reproducible runs; None seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delay: defaults::DELAY,
            smoke_type: defaults::SMOKE_TYPE.to_string(),
            min_density: defaults::MIN_DENSITY,
            max_density: defaults::MAX_DENSITY,
            max_distance: defaults::MAX_DISTANCE,
            decay_chance: defaults::DECAY_CHANCE,
            random_spread: defaults::RANDOM_SPREAD,
            min_wind_strength: defaults::MIN_WIND_STRENGTH,
            max_wind_strength: defaults::MAX_WIND_STRENGTH,
            wind_from: None,
            wind_to: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Configured wind window, if both ends are set.
    pub fn wind_window(&self) -> Option<WindConstraint> {
        match (self.wind_from, self.wind_to) {
            (Some(from), Some(to)) => Some(WindConstraint::new(from, to)),
            _ => None,
        }
    }

    /// Default settings for new sources. None if `smoke_type` names no
    /// known material; run the validator first to get a proper error.
    pub fn default_settings(&self, materials: &MaterialTable) -> Option<SmokeSettings> {
        let smoke: MaterialId = materials.find_by_name(&self.smoke_type)?;
        Some(SmokeSettings {
            smoke_material: smoke,
            density_min: self.min_density,
            density_max: self.max_density,
            decay_chance: self.decay_chance,
            max_distance: self.max_distance,
            wind: self.wind_window(),
            random_spread: self.random_spread,
        })
    }
}
