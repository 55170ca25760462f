use std::collections::HashMap;

use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::VoxelWorld;

/// Voxel writes made by one reconcile or flush pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Smoke written into empty voxels.
    pub placed: u32,
    /// Smoke voxels returned to air.
    pub cleared: u32,
}

/// Reference counts of particles claiming each cell as "smoke here".
///
/// A cell with a positive count should show smoke; a cell whose count drops
/// to zero is cleared on the next reconcile and then forgotten.
#[derive(Debug, Clone, Default)]
pub struct OccupancyLedger {
    counts: HashMap<GridCoord, u32>,
    /// Releases of claims that did not exist. Always zero in a healthy run.
    violations: u32,
}

impl OccupancyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current claim count for a cell (0 if untracked).
    pub fn count(&self, coord: GridCoord) -> u32 {
        self.counts.get(&coord).copied().unwrap_or(0)
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.counts.contains_key(&coord)
    }

    /// Add `n` claims to a cell.
    pub fn add(&mut self, coord: GridCoord, n: u32) {
        *self.counts.entry(coord).or_insert(0) += n;
    }

    /// Drop one claim from a cell. The entry stays (at zero) until reconcile
    /// so the voxel can be cleared.
    pub fn release(&mut self, coord: GridCoord) {
        match self.counts.get_mut(&coord) {
            Some(count) if *count > 0 => *count -= 1,
            _ => {
                self.violations += 1;
                log::warn!(
                    "ledger release below zero at {}, {}, {}; clamping to zero",
                    coord.x,
                    coord.y,
                    coord.z
                );
                self.counts.entry(coord).or_insert(0);
            }
        }
    }

    /// Move one claim between cells. No-op when both are the same cell.
    pub fn transfer(&mut self, from: GridCoord, to: GridCoord) {
        if from != to {
            self.release(from);
            self.add(to, 1);
        }
    }

    /// Track a cell with zero claims so the next reconcile clears it.
    pub fn mark_stale(&mut self, coord: GridCoord) {
        self.counts.entry(coord).or_insert(0);
    }

    /// Number of tracked cells (including zero-count cells awaiting reconcile).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all claims.
    pub fn total_claims(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn violations(&self) -> u32 {
        self.violations
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, u32)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    /// Entries in ascending (x, y, z) order, for stable serialization.
    pub fn sorted_entries(&self) -> Vec<(GridCoord, u32)> {
        let mut entries: Vec<(GridCoord, u32)> = self.iter().collect();
        entries.sort_by_key(|(c, _)| (c.x, c.y, c.z));
        entries
    }

    /// Make the world agree with the ledger.
    ///
    /// Zero-count cells are cleared (only if they still hold `smoke`) and
    /// dropped. Positive-count cells get `smoke` only if currently air; cells
    /// already showing smoke, or taken by something else, are left alone.
    pub fn reconcile<W: VoxelWorld + ?Sized>(
        &mut self,
        world: &mut W,
        smoke: MaterialId,
    ) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        self.counts.retain(|&coord, &mut count| {
            let existing = world.material_at(coord);
            if count == 0 {
                if existing == smoke {
                    world.set_material(coord, MaterialId::AIR);
                    stats.cleared += 1;
                }
                false
            } else {
                if existing.is_air() {
                    world.set_material(coord, smoke);
                    stats.placed += 1;
                }
                true
            }
        });
        stats
    }

    /// Clear every tracked voxel that still holds `smoke`, then forget all claims.
    /// Calling it again is a no-op.
    pub fn flush<W: VoxelWorld + ?Sized>(&mut self, world: &mut W, smoke: MaterialId) -> u32 {
        let mut cleared = 0;
        for (&coord, _) in self.counts.iter() {
            // Someone may have replaced our smoke since we placed it.
            if world.material_at(coord) == smoke {
                world.set_material(coord, MaterialId::AIR);
                cleared += 1;
            }
        }
        self.counts.clear();
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::TestWorld;
    use glam::IVec3;

    const SMOKE: MaterialId = MaterialId(30);
    const STONE: MaterialId = MaterialId(1);

    #[test]
    fn test_add_release_counts() {
        let mut ledger = OccupancyLedger::new();
        let c = IVec3::new(0, 64, 0);
        ledger.add(c, 3);
        ledger.release(c);
        assert_eq!(ledger.count(c), 2);
        assert_eq!(ledger.total_claims(), 2);
        assert_eq!(ledger.violations(), 0);
    }

    #[test]
    fn test_release_below_zero_clamps_and_counts_violation() {
        let mut ledger = OccupancyLedger::new();
        let c = IVec3::new(1, 2, 3);
        ledger.release(c);
        assert_eq!(ledger.count(c), 0);
        assert_eq!(ledger.violations(), 1);
        ledger.add(c, 1);
        ledger.release(c);
        ledger.release(c);
        assert_eq!(ledger.count(c), 0);
        assert_eq!(ledger.violations(), 2);
    }

    #[test]
    fn test_transfer_same_cell_is_noop() {
        let mut ledger = OccupancyLedger::new();
        let c = IVec3::new(0, 0, 0);
        ledger.add(c, 1);
        ledger.transfer(c, c);
        assert_eq!(ledger.count(c), 1);

        let d = IVec3::new(0, 1, 0);
        ledger.transfer(c, d);
        assert_eq!(ledger.count(c), 0);
        assert_eq!(ledger.count(d), 1);
        assert!(ledger.contains(c), "zero entry kept until reconcile");
    }

    #[test]
    fn test_reconcile_places_and_clears() {
        let mut world = TestWorld::new(256);
        let mut ledger = OccupancyLedger::new();
        let a = IVec3::new(0, 10, 0);
        let b = IVec3::new(0, 11, 0);
        world.set_material(a, SMOKE);
        ledger.mark_stale(a);
        ledger.add(b, 2);

        let stats = ledger.reconcile(&mut world, SMOKE);
        assert_eq!(stats, ReconcileStats { placed: 1, cleared: 1 });
        assert_eq!(world.material_at(a), MaterialId::AIR);
        assert_eq!(world.material_at(b), SMOKE);
        assert!(!ledger.contains(a));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_reconcile_skips_redundant_and_foreign_voxels() {
        let mut world = TestWorld::new(256);
        let mut ledger = OccupancyLedger::new();
        let a = IVec3::new(0, 10, 0);
        let b = IVec3::new(5, 10, 0);
        ledger.add(a, 1);
        ledger.add(b, 1);
        ledger.reconcile(&mut world, SMOKE);
        let writes = world.writes();

        // A block placed over our smoke by someone else survives.
        world.set_material(b, STONE);
        let writes = writes + 1;
        let stats = ledger.reconcile(&mut world, SMOKE);
        assert_eq!(stats, ReconcileStats::default());
        assert_eq!(world.writes(), writes);
        assert_eq!(world.material_at(b), STONE);

        // And it is not cleared when the claim goes away.
        ledger.release(b);
        ledger.reconcile(&mut world, SMOKE);
        assert_eq!(world.material_at(b), STONE);
    }

    #[test]
    fn test_flush_idempotent() {
        let mut world = TestWorld::new(256);
        let mut ledger = OccupancyLedger::new();
        for y in 10..15 {
            ledger.add(IVec3::new(0, y, 0), 1);
        }
        ledger.reconcile(&mut world, SMOKE);
        world.set_material(IVec3::new(0, 12, 0), STONE);

        assert_eq!(ledger.flush(&mut world, SMOKE), 4);
        let after_once = world.snapshot();
        assert_eq!(ledger.flush(&mut world, SMOKE), 0);
        assert_eq!(world.snapshot(), after_once);
        assert_eq!(world.material_at(IVec3::new(0, 12, 0)), STONE);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_sorted_entries_order() {
        let mut ledger = OccupancyLedger::new();
        ledger.add(IVec3::new(2, 0, 0), 1);
        ledger.add(IVec3::new(-1, 5, 0), 2);
        ledger.add(IVec3::new(-1, 4, 9), 1);
        let coords: Vec<IVec3> = ledger.sorted_entries().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            coords,
            vec![IVec3::new(-1, 4, 9), IVec3::new(-1, 5, 0), IVec3::new(2, 0, 0)]
        );
    }
}
