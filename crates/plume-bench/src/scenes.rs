use glam::{IVec2, IVec3};
use plume_core::material::MaterialTable;
use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::VoxelWorld;
use plume_world::VoxelGrid;

/// One source in a scene: where its anchor block sits and the options it is
/// created with.
pub struct SceneSource {
    pub anchor: [i32; 3],
    pub options: &'static [&'static str],
}

/// Solid structure placed before any source is created.
pub enum Obstacle {
    /// A flat slab spanning the whole scene at height `y`.
    Ceiling { y: i32 },
    /// A square shaft of `half_width` around (x, z), open at the top.
    Chimney { x: i32, z: i32, half_width: i32, height: i32 },
}

/// Configuration for a single runner scene.
pub struct SceneConfig {
    pub name: &'static str,
    /// Half-width of the loaded square, in blocks, centred on the origin.
    pub extent: i32,
    pub max_height: i32,
    pub sources: Vec<SceneSource>,
    pub obstacles: Vec<Obstacle>,
}

pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "single",
            extent: 48,
            max_height: 128,
            sources: vec![SceneSource { anchor: [0, 64, 0], options: &[] }],
            obstacles: Vec::new(),
        },
        SceneConfig {
            name: "windy",
            extent: 64,
            max_height: 128,
            sources: vec![SceneSource {
                anchor: [0, 64, 0],
                options: &["maxdensity=3", "wind=E", "decay=0.05"],
            }],
            obstacles: Vec::new(),
        },
        SceneConfig {
            name: "dense",
            extent: 64,
            max_height: 128,
            sources: vec![
                SceneSource { anchor: [-16, 64, -16], options: &["density=4", "random=true"] },
                SceneSource { anchor: [16, 64, -16], options: &["density=4", "random=true"] },
                SceneSource { anchor: [-16, 64, 16], options: &["density=4", "type=wool"] },
                SceneSource { anchor: [16, 64, 16], options: &["density=4", "wind=S-W"] },
            ],
            obstacles: Vec::new(),
        },
        SceneConfig {
            name: "ceiling",
            extent: 32,
            max_height: 128,
            sources: vec![SceneSource {
                anchor: [0, 60, 0],
                options: &["maxdensity=2", "maxdistance=24"],
            }],
            obstacles: vec![Obstacle::Ceiling { y: 66 }],
        },
        SceneConfig {
            name: "chimney",
            extent: 32,
            max_height: 96,
            sources: vec![SceneSource { anchor: [0, 40, 0], options: &["density=2", "decay=0.02"] }],
            obstacles: vec![Obstacle::Chimney { x: 0, z: 0, half_width: 2, height: 30 }],
        },
    ]
}

/// Materials a scene is built from.
pub struct ScenePalette {
    pub anchor: MaterialId,
    pub solid: MaterialId,
}

impl ScenePalette {
    pub fn from_table(materials: &MaterialTable) -> Option<Self> {
        Some(Self {
            anchor: materials.find_by_name("log")?,
            solid: materials.find_by_name("stone")?,
        })
    }
}

/// Build the grid for a scene and return it with the source anchors.
pub fn build_scene(config: &SceneConfig, palette: &ScenePalette) -> (VoxelGrid, Vec<GridCoord>) {
    let mut grid = VoxelGrid::new(config.max_height);
    let e = config.extent;
    grid.load_area(IVec2::new(-e, -e), IVec2::new(e, e));

    for obstacle in &config.obstacles {
        match *obstacle {
            Obstacle::Ceiling { y } => {
                grid.fill(IVec3::new(-e, y, -e), IVec3::new(e, y, e), palette.solid);
            }
            Obstacle::Chimney { x, z, half_width, height } => {
                let w = half_width + 1;
                let base = chimney_base(config, x, z);
                let top = base + height;
                grid.fill(IVec3::new(x - w, base, z - w), IVec3::new(x + w, top, z - w), palette.solid);
                grid.fill(IVec3::new(x - w, base, z + w), IVec3::new(x + w, top, z + w), palette.solid);
                grid.fill(IVec3::new(x - w, base, z - w), IVec3::new(x - w, top, z + w), palette.solid);
                grid.fill(IVec3::new(x + w, base, z - w), IVec3::new(x + w, top, z + w), palette.solid);
            }
        }
    }

    let anchors: Vec<GridCoord> = config
        .sources
        .iter()
        .map(|s| IVec3::from_array(s.anchor))
        .collect();
    for anchor in &anchors {
        grid.set_material(*anchor, palette.anchor);
    }
    (grid, anchors)
}

/// A chimney starts just below the lowest source inside it.
fn chimney_base(config: &SceneConfig, x: i32, z: i32) -> i32 {
    config
        .sources
        .iter()
        .filter(|s| s.anchor[0] == x && s.anchor[2] == z)
        .map(|s| s.anchor[1] - 1)
        .min()
        .unwrap_or(0)
}
