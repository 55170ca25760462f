//! Collaborator surfaces the simulation reads and writes through.
//!
//! Implementations must be synchronous: a write is visible to the very next read.

use std::collections::HashMap;

use crate::types::{GridCoord, MaterialId};

/// Query/mutate surface of a voxel world.
pub trait VoxelWorld {
    fn material_at(&self, coord: GridCoord) -> MaterialId;

    fn set_material(&mut self, coord: GridCoord, material: MaterialId);

    /// Exclusive height ceiling. Voxels at `y >= max_height()` do not exist.
    fn max_height(&self) -> i32;
}

/// Resolves a region name to its voxel world.
pub trait WorldProvider {
    type World: VoxelWorld;

    fn world_mut(&mut self, region: &str) -> Option<&mut Self::World>;
}

impl<W: VoxelWorld> WorldProvider for HashMap<String, W> {
    type World = W;

    fn world_mut(&mut self, region: &str) -> Option<&mut W> {
        self.get_mut(region)
    }
}
