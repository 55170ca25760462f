//! `key=value` source options, as typed by an operator.

use std::fmt::Write;

use plume_core::direction::Direction;
use plume_core::material::MaterialTable;
use plume_core::settings::{SmokeSettings, WindConstraint};
use plume_core::types::MaterialId;
use thiserror::Error;

/// A rejected option. Carries the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Unrecognized argument: {0}")]
    Unrecognized(String),
    #[error("Invalid block type: {0}")]
    InvalidType(String),
    #[error("Invalid density: {0}")]
    InvalidDensity(String),
    #[error("Invalid minimum density: {0}")]
    InvalidMinDensity(String),
    #[error("Invalid maximum density: {0}")]
    InvalidMaxDensity(String),
    #[error("Invalid maximum distance: {0}")]
    InvalidMaxDistance(String),
    #[error("Invalid decay chance: {0}")]
    InvalidDecayChance(String),
    #[error("Invalid wind direction specification: {0}")]
    InvalidWind(String),
    #[error("Invalid random spread argument: {0}")]
    InvalidRandomSpread(String),
}

/// Apply options left to right on top of `base`. Keys and values are
/// case-insensitive.
pub fn apply_options<S: AsRef<str>>(
    args: &[S],
    base: &SmokeSettings,
    materials: &MaterialTable,
) -> Result<SmokeSettings, OptionError> {
    let mut settings = base.clone();
    for raw in args {
        let raw = raw.as_ref();
        let arg = raw.trim().to_ascii_lowercase();
        let mut parts = arg.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(OptionError::Unrecognized(raw.to_string()));
        };
        let value = value.trim();
        match key {
            "type" | "id" => {
                settings.smoke_material = materials
                    .find_by_name(value)
                    .ok_or_else(|| OptionError::InvalidType(value.to_string()))?;
            }
            "density" => {
                let n = positive(value).ok_or_else(|| OptionError::InvalidDensity(value.to_string()))?;
                settings.density_min = n;
                settings.density_max = n;
            }
            "mindensity" => {
                let n = positive(value).ok_or_else(|| OptionError::InvalidMinDensity(value.to_string()))?;
                settings.density_min = n;
                settings.density_max = settings.density_max.max(n);
            }
            "maxdensity" => {
                let n = positive(value).ok_or_else(|| OptionError::InvalidMaxDensity(value.to_string()))?;
                settings.density_max = n;
                settings.density_min = settings.density_min.min(n);
            }
            "maxdistance" => {
                settings.max_distance = value
                    .parse::<u32>()
                    .map_err(|_| OptionError::InvalidMaxDistance(value.to_string()))?;
            }
            "decaychance" | "decay" | "chance" => {
                settings.decay_chance = value
                    .parse::<f32>()
                    .ok()
                    .filter(|p| *p > 0.0 && *p < 1.0)
                    .ok_or_else(|| OptionError::InvalidDecayChance(value.to_string()))?;
            }
            "wind" | "dir" | "direction" | "winddir" => {
                settings.wind = parse_wind(value)?;
            }
            "randomspread" | "random" => {
                settings.random_spread = value
                    .parse::<bool>()
                    .map_err(|_| OptionError::InvalidRandomSpread(value.to_string()))?;
            }
            _ => return Err(OptionError::Unrecognized(raw.to_string())),
        }
    }
    Ok(settings)
}

/// `random`, a single direction, or a `from-to` arc.
pub fn parse_wind(value: &str) -> Result<Option<WindConstraint>, OptionError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("random") {
        return Ok(None);
    }
    let invalid = || OptionError::InvalidWind(value.to_string());
    let window = match value.split_once('-') {
        None => WindConstraint::fixed(value.parse::<Direction>().map_err(|_| invalid())?),
        Some((from, to)) => WindConstraint::new(
            from.trim().parse::<Direction>().map_err(|_| invalid())?,
            to.trim().parse::<Direction>().map_err(|_| invalid())?,
        ),
    };
    Ok(Some(window))
}

/// One-line summary of a source's settings, in option vocabulary.
///
/// The smoke type is included when asked for, or when it differs from the
/// engine default.
pub fn describe_settings(
    settings: &SmokeSettings,
    materials: &MaterialTable,
    default_smoke: MaterialId,
    include_type: bool,
) -> String {
    let mut out = String::new();
    if include_type || settings.smoke_material != default_smoke {
        let _ = write!(out, "type: {}, ", materials.name_of(settings.smoke_material));
    }
    let _ = write!(
        out,
        "decayChance: {}, maxDistance: {}",
        settings.decay_chance, settings.max_distance
    );
    if settings.density_min == settings.density_max {
        let _ = write!(out, ", density: {}", settings.density_min);
    } else {
        let _ = write!(
            out,
            ", minDensity: {}, maxDensity: {}",
            settings.density_min, settings.density_max
        );
    }
    match settings.wind {
        Some(window) => {
            let _ = write!(out, ", wind: {window}");
        }
        None => out.push_str(", wind: random"),
    }
    let _ = write!(out, ", randomSpread: {}", settings.random_spread);
    out
}

fn positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n >= 1)
}
