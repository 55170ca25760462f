use std::collections::HashSet;

use plume_core::material::MaterialTable;
use plume_core::types::MaterialId;
use thiserror::Error;

use crate::config::EngineConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Duplicate material ID {0}")]
    DuplicateMaterialId(u16),
    #[error("Duplicate material name '{0}'")]
    DuplicateMaterialName(String),
    #[error("Material table has no air (id 0)")]
    MissingAir,
    #[error("delay must be at least 1 (got {0})")]
    DelayTooShort(u32),
    #[error("smokeType '{0}' is not a known material")]
    UnknownSmokeType(String),
    #[error("smokeType cannot be air")]
    AirSmokeType,
    #[error("maxDensity must be at least 1 (got {0})")]
    MaxDensityTooLow(u32),
    #[error("minDensity {min} exceeds maxDensity {max}")]
    DensityRangeInverted { min: u32, max: u32 },
    #[error("decayChance must lie strictly between 0 and 1 (got {0})")]
    DecayChanceOutOfRange(f32),
    #[error("minWindStrength {min} exceeds maxWindStrength {max}")]
    WindStrengthInverted { min: u32, max: u32 },
    #[error("windFrom and windTo must both be specified, or neither")]
    HalfWindWindow,
}

/// Validate a material table: unique IDs and names, air present.
pub fn validate_materials(table: &MaterialTable) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    for mat in &table.materials {
        if !seen_ids.insert(mat.id) {
            errors.push(ValidationError::DuplicateMaterialId(mat.id));
        }
        if !seen_names.insert(mat.name.to_ascii_lowercase()) {
            errors.push(ValidationError::DuplicateMaterialName(mat.name.clone()));
        }
    }
    if table.get(MaterialId::AIR).is_none() {
        errors.push(ValidationError::MissingAir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate an engine config against the material table. Every violation is
/// reported, not just the first.
pub fn validate_config(
    config: &EngineConfig,
    materials: &MaterialTable,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.delay < 1 {
        errors.push(ValidationError::DelayTooShort(config.delay));
    }

    match materials.find_by_name(&config.smoke_type) {
        None => errors.push(ValidationError::UnknownSmokeType(config.smoke_type.clone())),
        Some(id) if id.is_air() => errors.push(ValidationError::AirSmokeType),
        Some(_) => {}
    }

    if config.max_density < 1 {
        errors.push(ValidationError::MaxDensityTooLow(config.max_density));
    } else if config.min_density > config.max_density {
        errors.push(ValidationError::DensityRangeInverted {
            min: config.min_density,
            max: config.max_density,
        });
    }

    // Also rejects NaN.
    if !(config.decay_chance > 0.0 && config.decay_chance < 1.0) {
        errors.push(ValidationError::DecayChanceOutOfRange(config.decay_chance));
    }

    if config.min_wind_strength > config.max_wind_strength {
        errors.push(ValidationError::WindStrengthInverted {
            min: config.min_wind_strength,
            max: config.max_wind_strength,
        });
    }

    if config.wind_from.is_some() != config.wind_to.is_some() {
        errors.push(ValidationError::HalfWindWindow);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::default_materials;
    use plume_core::direction::Direction;
    use plume_core::material::MaterialDef;

    fn mat(id: u16, name: &str) -> MaterialDef {
        MaterialDef {
            id,
            name: name.into(),
        }
    }

    #[test]
    fn test_shipped_materials_valid() {
        let table = default_materials().expect("should load");
        validate_materials(&table).expect("shipped table should be valid");
    }

    #[test]
    fn test_duplicate_ids_and_names() {
        let table = MaterialTable {
            materials: vec![mat(0, "air"), mat(1, "stone"), mat(1, "Stone")],
        };
        let errors = validate_materials(&table).expect_err("should fail");
        assert!(errors.contains(&ValidationError::DuplicateMaterialId(1)));
        assert!(errors.contains(&ValidationError::DuplicateMaterialName("Stone".into())));
    }

    #[test]
    fn test_missing_air() {
        let table = MaterialTable {
            materials: vec![mat(1, "stone")],
        };
        let errors = validate_materials(&table).expect_err("should fail");
        assert_eq!(errors, vec![ValidationError::MissingAir]);
    }

    #[test]
    fn test_default_config_valid() {
        let table = default_materials().expect("should load");
        validate_config(&EngineConfig::default(), &table).expect("default config should be valid");
    }

    #[test]
    fn test_all_violations_collected() {
        let table = default_materials().expect("should load");
        let config = EngineConfig {
            delay: 0,
            smoke_type: "lava".into(),
            min_density: 3,
            max_density: 2,
            decay_chance: 1.0,
            min_wind_strength: 4,
            max_wind_strength: 1,
            wind_from: Some(Direction::North),
            ..EngineConfig::default()
        };
        let errors = validate_config(&config, &table).expect_err("should fail");
        assert_eq!(errors.len(), 6, "got {errors:?}");
        assert!(errors.contains(&ValidationError::UnknownSmokeType("lava".into())));
        assert!(errors.contains(&ValidationError::HalfWindWindow));
    }

    #[test]
    fn test_decay_chance_bounds_exclusive() {
        let table = default_materials().expect("should load");
        for bad in [0.0, 1.0, -0.5, f32::NAN] {
            let config = EngineConfig {
                decay_chance: bad,
                ..EngineConfig::default()
            };
            assert!(validate_config(&config, &table).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_air_smoke_rejected() {
        let table = default_materials().expect("should load");
        let config = EngineConfig {
            smoke_type: "AIR".into(),
            ..EngineConfig::default()
        };
        let errors = validate_config(&config, &table).expect_err("should fail");
        assert_eq!(errors, vec![ValidationError::AirSmokeType]);
    }
}
