use std::collections::HashMap;

use glam::IVec2;
use plume_core::constants::DEFAULT_MAX_HEIGHT;
use plume_core::math::column_of;
use plume_core::types::{ColumnCoord, GridCoord, MaterialId};
use plume_core::voxel::VoxelWorld;

use crate::column::{Column, ColumnState};

/// Reported for every voxel below y = 0. Solid, so smoke never settles under
/// the floor, and never stored.
pub const FLOOR: MaterialId = MaterialId(u16::MAX);

/// In-memory voxel world made of 16×16 columns. Unwritten voxels are air.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    columns: HashMap<ColumnCoord, Column>,
    max_height: i32,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEIGHT)
    }
}

impl VoxelGrid {
    pub fn new(max_height: i32) -> Self {
        Self {
            columns: HashMap::new(),
            max_height,
        }
    }

    /// Load a column (creating it if it never existed). Idempotent.
    pub fn load_column(&mut self, coord: ColumnCoord) {
        self.columns
            .entry(coord)
            .or_insert_with(|| Column::new(coord))
            .state = ColumnState::Loaded;
    }

    /// Mark a column unloaded. Its voxels are retained.
    pub fn unload_column(&mut self, coord: ColumnCoord) {
        if let Some(column) = self.columns.get_mut(&coord) {
            column.state = ColumnState::Unloaded;
        }
    }

    pub fn column(&self, coord: ColumnCoord) -> Option<&Column> {
        self.columns.get(&coord)
    }

    /// Loaded columns in ascending (x, z) order.
    pub fn loaded_columns(&self) -> Vec<ColumnCoord> {
        let mut loaded: Vec<ColumnCoord> = self
            .columns
            .values()
            .filter(|c| c.is_loaded())
            .map(|c| c.coord)
            .collect();
        loaded.sort_by_key(|c| (c.x, c.y));
        loaded
    }

    /// Load every column overlapping the inclusive block rectangle.
    pub fn load_area(&mut self, min: IVec2, max: IVec2) {
        let lo = column_of(GridCoord::new(min.x, 0, min.y));
        let hi = column_of(GridCoord::new(max.x, 0, max.y));
        for cx in lo.x..=hi.x {
            for cz in lo.y..=hi.y {
                self.load_column(IVec2::new(cx, cz));
            }
        }
    }

    /// Fill an inclusive box with one material.
    pub fn fill(&mut self, min: GridCoord, max: GridCoord, material: MaterialId) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_material(GridCoord::new(x, y, z), material);
                }
            }
        }
    }

    /// Count of one material across all columns.
    pub fn count_of(&self, material: MaterialId) -> usize {
        self.columns.values().map(|c| c.count_of(material)).sum()
    }

    /// Every voxel holding `material`, in ascending (x, y, z) order.
    pub fn cells_of(&self, material: MaterialId) -> Vec<GridCoord> {
        let mut cells: Vec<GridCoord> = self
            .columns
            .values()
            .flat_map(|c| c.iter())
            .filter(|(_, m)| *m == material)
            .map(|(coord, _)| coord)
            .collect();
        cells.sort_by_key(|c| (c.x, c.y, c.z));
        cells
    }

    /// Get counts: (total columns, loaded, unloaded)
    pub fn column_counts(&self) -> (u32, u32, u32) {
        let loaded = self.columns.values().filter(|c| c.is_loaded()).count() as u32;
        let total = self.columns.len() as u32;
        (total, loaded, total - loaded)
    }
}

impl VoxelWorld for VoxelGrid {
    fn material_at(&self, coord: GridCoord) -> MaterialId {
        if coord.y < 0 {
            return FLOOR;
        }
        if coord.y >= self.max_height {
            return MaterialId::AIR;
        }
        self.columns
            .get(&column_of(coord))
            .map(|c| c.get(coord))
            .unwrap_or(MaterialId::AIR)
    }

    /// Writes outside the height range are dropped; writes into a column that
    /// was never loaded bring it into existence.
    fn set_material(&mut self, coord: GridCoord, material: MaterialId) {
        if coord.y < 0 || coord.y >= self.max_height {
            return;
        }
        let column = column_of(coord);
        self.columns
            .entry(column)
            .or_insert_with(|| Column::new(column))
            .set(coord, material);
    }

    fn max_height(&self) -> i32 {
        self.max_height
    }
}
