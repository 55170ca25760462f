//! Shared fixtures for engine tests.

use std::collections::HashMap;

use glam::{IVec2, IVec3};
use plume_config::{default_materials, EngineConfig};
use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::VoxelWorld;

use crate::engine::SmokeEngine;
use crate::grid::VoxelGrid;

pub(crate) const REGION: &str = "overworld";
pub(crate) const SMOKE: MaterialId = MaterialId(30);
pub(crate) const LOG: MaterialId = MaterialId(17);
pub(crate) const ANCHOR: GridCoord = IVec3::new(8, 64, 8);

pub(crate) fn engine(seed: u64) -> SmokeEngine {
    let config = EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    };
    SmokeEngine::new(&config, default_materials().expect("should load")).expect("valid config")
}

/// Engine with one source on a log block at `ANCHOR`, in a loaded 128-high grid.
pub(crate) fn scene(
    seed: u64,
    options: &[&str],
) -> (SmokeEngine, HashMap<String, VoxelGrid>, GridCoord) {
    let mut e = engine(seed);
    let mut grid = VoxelGrid::new(128);
    grid.load_area(IVec2::new(-32, -32), IVec2::new(63, 63));
    grid.set_material(ANCHOR, LOG);
    e.create_or_update(REGION, ANCHOR, &mut grid, options)
        .expect("create source");
    let mut worlds = HashMap::new();
    worlds.insert(REGION.to_string(), grid);
    (e, worlds, ANCHOR)
}
