use std::sync::OnceLock;

use glam::{IVec2, IVec3};

use crate::constants::{COLUMN_SHIFT, DISTANCE_TABLE_RADIUS, DISTANCE_TABLE_SIZE};
use crate::types::{ColumnCoord, GridCoord};

/// Euclidean distance between two voxel coordinates.
pub fn distance(a: GridCoord, b: GridCoord) -> f32 {
    offset_length(b - a)
}

/// Length of a voxel offset. Offsets within DISTANCE_TABLE_RADIUS on every
/// axis come from a precomputed table; the table is built with the same
/// formula as the fallback so both agree at the boundary.
pub fn offset_length(offset: IVec3) -> f32 {
    let r = DISTANCE_TABLE_RADIUS as u32;
    let (ax, ay, az) = (
        offset.x.unsigned_abs(),
        offset.y.unsigned_abs(),
        offset.z.unsigned_abs(),
    );
    if ax <= r && ay <= r && az <= r {
        distance_table()[table_index(ax as usize, ay as usize, az as usize)]
    } else {
        euclidean(offset)
    }
}

fn euclidean(offset: IVec3) -> f32 {
    let (x, y, z) = (offset.x as f64, offset.y as f64, offset.z as f64);
    (x * x + y * y + z * z).sqrt() as f32
}

fn table_index(x: usize, y: usize, z: usize) -> usize {
    (x * DISTANCE_TABLE_SIZE + y) * DISTANCE_TABLE_SIZE + z
}

fn distance_table() -> &'static [f32] {
    static TABLE: OnceLock<Vec<f32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let n = DISTANCE_TABLE_SIZE;
        let mut table = vec![0.0f32; n * n * n];
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    table[table_index(x, y, z)] =
                        euclidean(IVec3::new(x as i32, y as i32, z as i32));
                }
            }
        }
        table
    })
}

/// Column (sub-region) containing a voxel. Uses arithmetic shift so negative
/// coordinates land in the column below zero, not column zero.
pub fn column_of(coord: GridCoord) -> ColumnCoord {
    IVec2::new(coord.x >> COLUMN_SHIFT, coord.z >> COLUMN_SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_and_axes() {
        let o = IVec3::new(10, 64, -7);
        assert_eq!(distance(o, o), 0.0);
        assert_eq!(distance(o, o + IVec3::new(3, 0, 0)), 3.0);
        assert_eq!(distance(o, o + IVec3::new(0, -4, 0)), 4.0);
        assert_eq!(distance(o, o + IVec3::new(0, 0, 5)), 5.0);
    }

    #[test]
    fn test_distance_is_euclidean_not_mixed_product() {
        // dx*dz would give sqrt(3*4 + 0 + 16) here.
        let d = offset_length(IVec3::new(3, 0, 4));
        assert_eq!(d, 5.0);
        let far = offset_length(IVec3::new(30, 0, 40));
        assert_eq!(far, 50.0);
    }

    #[test]
    fn test_table_agrees_with_direct_formula_at_boundary() {
        let r = DISTANCE_TABLE_RADIUS;
        for offset in [
            IVec3::new(r, r, r),
            IVec3::new(-r, 0, r),
            IVec3::new(r, -r, 1),
        ] {
            assert_eq!(offset_length(offset), euclidean(offset), "{offset}");
        }
        // Just outside the table on one axis is continuous with just inside.
        let inside = offset_length(IVec3::new(r, 0, 0));
        let outside = offset_length(IVec3::new(r + 1, 0, 0));
        assert_eq!(outside - inside, 1.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = IVec3::new(1, 2, 3);
        let b = IVec3::new(-20, 40, 9);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_column_of_positive_and_negative() {
        assert_eq!(column_of(IVec3::new(0, 70, 0)), IVec2::new(0, 0));
        assert_eq!(column_of(IVec3::new(15, 0, 31)), IVec2::new(0, 1));
        assert_eq!(column_of(IVec3::new(-1, 0, -16)), IVec2::new(-1, -1));
        assert_eq!(column_of(IVec3::new(-17, 0, 16)), IVec2::new(-2, 1));
    }
}
