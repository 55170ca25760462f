use std::time::Instant;

use thiserror::Error;

use plume_config::EngineConfig;
use plume_core::material::MaterialTable;
use plume_core::voxel::WorldProvider;
use plume_persist::{PersistError, PersistenceStore};
use plume_world::{CommandError, EngineError, FixedStepClock, SmokeEngine, TickClock, VoxelGrid};

use crate::scenes::{build_scene, ScenePalette, SceneConfig};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("scene source rejected: {0}")]
    Command(#[from] CommandError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("material table lacks the blocks scenes are built from")]
    MissingMaterials,
}

/// Timing data for the simulation steps of one scene.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SceneResult {
    pub scene_name: String,
    pub sources: u32,
    pub steps: u32,
    pub spawned: u64,
    pub peak_particles: usize,
    pub smoke_voxels: u32,
    pub retired: u32,
    pub ledger_violations: u32,
    /// Sources read back after the region was saved and reactivated.
    pub restored: u32,
    pub timings: TimingSeries,
}

/// Drives scenes through a `SmokeEngine` under a fixed-step clock.
pub struct SceneRunner {
    config: EngineConfig,
    materials: MaterialTable,
    host_ticks: u32,
}

/// The single-region world a scene runs in.
struct SceneWorld<'a> {
    region: &'a str,
    grid: &'a mut VoxelGrid,
}

impl WorldProvider for SceneWorld<'_> {
    type World = VoxelGrid;

    fn world_mut(&mut self, region: &str) -> Option<&mut VoxelGrid> {
        (region == self.region).then_some(&mut *self.grid)
    }
}

impl SceneRunner {
    /// `steps` simulation steps per scene; the clock is fed `steps * delay`
    /// host ticks.
    pub fn new(config: EngineConfig, materials: MaterialTable, steps: u32) -> Self {
        let host_ticks = steps.saturating_mul(config.delay.max(1));
        Self {
            config,
            materials,
            host_ticks,
        }
    }

    /// Run one scene, then save its region to `store` and load it back.
    /// The region is named after the scene.
    pub fn run_scene<S: PersistenceStore + ?Sized>(
        &self,
        scene: &SceneConfig,
        store: &mut S,
    ) -> Result<SceneResult, RunError> {
        log::info!("Running scene '{}' ({} sources)...", scene.name, scene.sources.len());

        let palette = ScenePalette::from_table(&self.materials).ok_or(RunError::MissingMaterials)?;
        let mut engine = SmokeEngine::new(&self.config, self.materials.clone())?;
        let smoke = engine.default_smoke();
        let (mut grid, anchors) = build_scene(scene, &palette);
        let region = scene.name;

        for (source, anchor) in scene.sources.iter().zip(&anchors) {
            let message = engine.create_or_update(region, *anchor, &mut grid, source.options)?;
            log::debug!("  {message}");
        }

        let mut clock = FixedStepClock::new(self.config.delay);
        let mut step_times = Vec::new();
        let mut spawned = 0u64;
        let mut peak_particles = 0usize;
        let mut retired = 0u32;
        for _ in 0..self.host_ticks {
            if !clock.poll(1) {
                continue;
            }
            let mut world = SceneWorld { region, grid: &mut grid };
            let step_start = Instant::now();
            let stats = engine.tick(&mut world);
            step_times.push(step_start.elapsed().as_secs_f64() * 1000.0);

            spawned += u64::from(stats.spawned);
            peak_particles = peak_particles.max(stats.live_particles);
            retired += stats.sources_retired;
        }

        let smoke_voxels = grid.count_of(smoke) as u32;
        let ledger_violations: u32 = engine
            .sources(region)
            .iter()
            .map(|s| s.ledger().violations())
            .sum();
        let timings = compute_timings(&step_times);
        log::info!(
            "  Done: {} steps, {} smoke voxels, mean={:.3}ms, p95={:.3}ms",
            step_times.len(),
            smoke_voxels,
            timings.mean_ms,
            timings.p95_ms
        );

        engine.deactivate_region(region, &mut grid, store)?;
        let columns = grid.loaded_columns();
        let restored = engine.activate_region(region, &mut grid, &columns, &*store)?;
        log::info!("  Persisted and restored {restored} sources");

        Ok(SceneResult {
            scene_name: scene.name.to_string(),
            sources: anchors.len() as u32,
            steps: step_times.len() as u32,
            spawned,
            peak_particles,
            smoke_voxels,
            retired,
            ledger_violations,
            restored: restored as u32,
            timings,
        })
    }
}

fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    TimingSeries {
        mean_ms: mean,
        median_ms: percentile(&sorted, 50.0),
        p95_ms: percentile(&sorted, 95.0),
        p99_ms: percentile(&sorted, 99.0),
        min_ms: sorted[0],
        max_ms: sorted[sorted.len() - 1],
    }
}

/// Nearest-rank percentile of an ascending slice.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let idx = ((pct / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
