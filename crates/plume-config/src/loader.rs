use plume_core::material::{MaterialDef, MaterialTable};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::defaults;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse materials RON: {0}")]
    MaterialParseError(String),
    #[error("Failed to parse engine config RON: {0}")]
    ConfigParseError(String),
}

/// Parse a single materials RON string into a MaterialTable.
pub fn load_materials_from_str(ron_str: &str) -> Result<MaterialTable, LoadError> {
    let options = ron::Options::default();
    let materials: Vec<MaterialDef> = options
        .from_str(ron_str)
        .map_err(|e| LoadError::MaterialParseError(e.to_string()))?;
    Ok(MaterialTable { materials })
}

/// Load and merge several material sources into one table, in order.
pub fn load_all_materials(sources: &[&str]) -> Result<MaterialTable, LoadError> {
    let mut all_materials = Vec::new();
    for source in sources {
        let table = load_materials_from_str(source)?;
        all_materials.extend(table.materials);
    }
    log::debug!("loaded {} materials from {} sources", all_materials.len(), sources.len());
    Ok(MaterialTable {
        materials: all_materials,
    })
}

/// The material table shipped with the crate.
pub fn default_materials() -> Result<MaterialTable, LoadError> {
    load_materials_from_str(defaults::MATERIALS_RON)
}

/// Parse an engine config. Omitted fields take their defaults.
pub fn load_config_from_str(ron_str: &str) -> Result<EngineConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))
}
