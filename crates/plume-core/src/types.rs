use glam::{IVec2, IVec3};

/// Newtype for material identifiers. 0 = air/empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub const AIR: MaterialId = MaterialId(0);

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// Voxel coordinate in world-space.
pub type GridCoord = IVec3;

/// Column coordinate (x, z) of a sub-region. Each unit = COLUMN_SIZE voxels.
pub type ColumnCoord = IVec2;
