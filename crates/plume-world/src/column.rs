use std::collections::HashMap;

use plume_core::types::{ColumnCoord, GridCoord, MaterialId};

/// Column lifecycle as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnState {
    /// Resident and visible to the simulation.
    Loaded,
    /// Paged out. Voxel data is kept so a reload sees the same blocks.
    Unloaded,
}

/// One 16×16 column of voxels, stored sparsely (air is never stored).
#[derive(Debug, Clone)]
pub struct Column {
    pub coord: ColumnCoord,
    pub state: ColumnState,
    voxels: HashMap<GridCoord, MaterialId>,
}

impl Column {
    pub fn new(coord: ColumnCoord) -> Self {
        Self {
            coord,
            state: ColumnState::Loaded,
            voxels: HashMap::new(),
        }
    }

    pub fn get(&self, coord: GridCoord) -> MaterialId {
        self.voxels.get(&coord).copied().unwrap_or(MaterialId::AIR)
    }

    pub fn set(&mut self, coord: GridCoord, material: MaterialId) {
        if material.is_air() {
            self.voxels.remove(&coord);
        } else {
            self.voxels.insert(coord, material);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state == ColumnState::Loaded
    }

    /// Number of non-air voxels.
    pub fn solid_count(&self) -> usize {
        self.voxels.len()
    }

    pub fn count_of(&self, material: MaterialId) -> usize {
        self.voxels.values().filter(|&&m| m == material).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, MaterialId)> + '_ {
        self.voxels.iter().map(|(c, m)| (*c, *m))
    }
}
