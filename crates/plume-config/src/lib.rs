//! Engine configuration: RON loading, validation, and operator options.

pub mod config;
pub mod defaults;
pub mod loader;
pub mod options;
pub mod validator;

pub use config::EngineConfig;
pub use loader::{
    default_materials, load_all_materials, load_config_from_str, load_materials_from_str, LoadError,
};
pub use options::{apply_options, describe_settings, parse_wind, OptionError};
pub use validator::{validate_config, validate_materials, ValidationError};
