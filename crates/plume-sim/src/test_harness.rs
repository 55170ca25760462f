//! Deterministic in-memory world for simulation unit tests.

use std::collections::BTreeMap;
use std::collections::HashMap;

use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::VoxelWorld;

/// Sparse voxel map; anything never written reads as air.
#[derive(Debug, Clone)]
pub struct TestWorld {
    voxels: HashMap<GridCoord, MaterialId>,
    max_height: i32,
    writes: usize,
}

impl TestWorld {
    pub fn new(max_height: i32) -> Self {
        Self {
            voxels: HashMap::new(),
            max_height,
            writes: 0,
        }
    }

    /// Number of `set_material` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn count_of(&self, material: MaterialId) -> usize {
        self.voxels.values().filter(|&&m| m == material).count()
    }

    pub fn cells_of(&self, material: MaterialId) -> Vec<GridCoord> {
        let mut cells: Vec<GridCoord> = self
            .voxels
            .iter()
            .filter(|(_, &m)| m == material)
            .map(|(c, _)| *c)
            .collect();
        cells.sort_by_key(|c| (c.x, c.y, c.z));
        cells
    }

    /// Ordered copy of every non-air voxel.
    pub fn snapshot(&self) -> BTreeMap<(i32, i32, i32), u16> {
        self.voxels
            .iter()
            .filter(|(_, m)| !m.is_air())
            .map(|(c, m)| ((c.x, c.y, c.z), m.0))
            .collect()
    }
}

impl VoxelWorld for TestWorld {
    fn material_at(&self, coord: GridCoord) -> MaterialId {
        self.voxels.get(&coord).copied().unwrap_or(MaterialId::AIR)
    }

    fn set_material(&mut self, coord: GridCoord, material: MaterialId) {
        self.writes += 1;
        if material.is_air() {
            self.voxels.remove(&coord);
        } else {
            self.voxels.insert(coord, material);
        }
    }

    fn max_height(&self) -> i32 {
        self.max_height
    }
}

/// Seeded RNG so a test's dice are repeatable.
pub fn seeded(seed: u64) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(seed)
}
