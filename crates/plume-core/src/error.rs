use thiserror::Error;

/// A rejected source configuration. The faulty settings never become a live source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("maxDensity must be at least 1 (got {0})")]
    MaxDensityTooLow(u32),

    #[error("minDensity {min} exceeds maxDensity {max}")]
    DensityRangeInverted { min: u32, max: u32 },

    #[error("decayChance must lie strictly between 0 and 1 (got {0})")]
    DecayChanceOutOfRange(f32),

    #[error("smoke material cannot be air")]
    AirSmokeMaterial,
}

impl SettingsError {
    /// Name of the setting that failed, as spelled in command options.
    pub fn field(&self) -> &'static str {
        match self {
            SettingsError::MaxDensityTooLow(_) => "maxDensity",
            SettingsError::DensityRangeInverted { .. } => "minDensity",
            SettingsError::DecayChanceOutOfRange(_) => "decayChance",
            SettingsError::AirSmokeMaterial => "type",
        }
    }
}
