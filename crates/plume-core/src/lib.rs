pub mod constants;
pub mod direction;
pub mod error;
pub mod material;
pub mod math;
pub mod random;
pub mod settings;
pub mod types;
pub mod voxel;

pub use direction::{Direction, ParseDirectionError, ALL_DIRECTIONS};
pub use error::SettingsError;
pub use material::{MaterialDef, MaterialTable};
pub use random::RandomSource;
pub use settings::{SmokeSettings, WindConstraint};
pub use types::{ColumnCoord, GridCoord, MaterialId};
pub use voxel::{VoxelWorld, WorldProvider};
