use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use plume_config::{validate_config, EngineConfig, ValidationError};
use plume_core::material::MaterialTable;
use plume_core::settings::SmokeSettings;
use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::{VoxelWorld, WorldProvider};
use plume_sim::rng::source_seed;
use plume_sim::{Source, WindLimits, WindState};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid engine config: {}", join(.0))]
    InvalidConfig(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every source known in one region, and which of them are ticking.
#[derive(Debug, Default)]
pub(crate) struct RegionSources {
    pub(crate) sources: HashMap<GridCoord, Source>,
    /// Anchors whose column is loaded. Always a subset of `sources`' keys.
    pub(crate) active: HashSet<GridCoord>,
}

impl RegionSources {
    /// Active anchors in ascending (x, y, z) order.
    pub(crate) fn active_sorted(&self) -> Vec<GridCoord> {
        let mut anchors: Vec<GridCoord> = self.active.iter().copied().collect();
        anchors.sort_by_key(|c| (c.x, c.y, c.z));
        anchors
    }

    pub(crate) fn remove(&mut self, anchor: GridCoord) -> Option<Source> {
        self.active.remove(&anchor);
        self.sources.remove(&anchor)
    }
}

/// Totals from one outer tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineTickStats {
    pub sources_ticked: u32,
    pub sources_retired: u32,
    pub spawned: u32,
    pub live_particles: usize,
    pub placed: u32,
    pub cleared: u32,
}

/// Registry of smoke sources across regions plus the global wind.
///
/// The engine owns the single `WindState`; it is read by every particle in a
/// tick and advanced once after all sources have ticked.
pub struct SmokeEngine {
    pub(crate) regions: HashMap<String, RegionSources>,
    wind: WindState,
    limits: WindLimits,
    wind_rng: StdRng,
    pub(crate) paused: bool,
    seed: u64,
    pub(crate) defaults: SmokeSettings,
    pub(crate) materials: MaterialTable,
}

impl SmokeEngine {
    /// Build an engine from a validated config. A config without a seed is
    /// seeded from entropy.
    pub fn new(config: &EngineConfig, materials: MaterialTable) -> Result<Self, EngineError> {
        validate_config(config, &materials).map_err(EngineError::InvalidConfig)?;
        let defaults = config.default_settings(&materials).ok_or_else(|| {
            EngineError::InvalidConfig(vec![ValidationError::UnknownSmokeType(
                config.smoke_type.clone(),
            )])
        })?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let limits = WindLimits::new(config.min_wind_strength, config.max_wind_strength);

        log::info!("smoke engine settings:");
        log::info!("  delay: {}", config.delay);
        log::info!("  wind strength: {} - {}", limits.min_strength, limits.max_strength);
        log::info!("  default smoke type: {}", materials.name_of(defaults.smoke_material));
        log::info!("  default density: {} - {}", defaults.density_min, defaults.density_max);
        log::info!("  default max. distance: {}", defaults.max_distance);
        log::info!("  default decay chance: {}", defaults.decay_chance);
        log::info!("  default random spread: {}", defaults.random_spread);
        match defaults.wind {
            Some(window) => log::info!("  default wind direction: {window}"),
            None => log::info!("  default wind direction: random"),
        }
        log::debug!("  seed: {seed}");

        Ok(Self {
            regions: HashMap::new(),
            wind: WindState::initial(limits),
            limits,
            wind_rng: StdRng::seed_from_u64(seed ^ 0x5749_4E44),
            paused: false,
            seed,
            defaults,
            materials,
        })
    }

    pub fn wind(&self) -> WindState {
        self.wind
    }

    /// Override the current wind, e.g. to start a scene calm.
    pub fn set_wind(&mut self, wind: WindState) {
        self.wind = wind;
    }

    pub fn wind_limits(&self) -> WindLimits {
        self.limits
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn defaults(&self) -> &SmokeSettings {
        &self.defaults
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// The engine-wide smoke material (`smoke_type` in the config).
    pub fn default_smoke(&self) -> MaterialId {
        self.defaults.smoke_material
    }

    /// Regions holding at least one source, sorted by name.
    pub fn regions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn source(&self, region: &str, anchor: GridCoord) -> Option<&Source> {
        self.regions.get(region)?.sources.get(&anchor)
    }

    /// All sources in a region, sorted by anchor.
    pub fn sources(&self, region: &str) -> Vec<&Source> {
        let mut sources: Vec<&Source> = self
            .regions
            .get(region)
            .map(|r| r.sources.values().collect())
            .unwrap_or_default();
        sources.sort_by_key(|s| {
            let a = s.anchor();
            (a.x, a.y, a.z)
        });
        sources
    }

    pub fn source_count(&self, region: &str) -> usize {
        self.regions.get(region).map_or(0, |r| r.sources.len())
    }

    pub fn active_count(&self, region: &str) -> usize {
        self.regions.get(region).map_or(0, |r| r.active.len())
    }

    pub fn is_active(&self, region: &str, anchor: GridCoord) -> bool {
        self.regions
            .get(region)
            .is_some_and(|r| r.active.contains(&anchor))
    }

    /// Seed for the source anchored at `anchor`.
    pub(crate) fn seed_for(&self, anchor: GridCoord) -> u64 {
        source_seed(self.seed, anchor)
    }

    /// One outer tick. Does nothing while paused.
    ///
    /// Regions are visited by name and sources by anchor, so a seeded engine
    /// replays identically. Sources whose anchor block is gone are dropped,
    /// then regions left without sources. The wind moves last, so every
    /// particle in this tick saw the same wind.
    pub fn tick<P: WorldProvider + ?Sized>(&mut self, worlds: &mut P) -> EngineTickStats {
        let mut stats = EngineTickStats::default();
        if self.paused {
            return stats;
        }

        let mut names: Vec<String> = self.regions.keys().cloned().collect();
        names.sort_unstable();
        for name in names {
            let Some(world) = worlds.world_mut(&name) else {
                continue;
            };
            let Some(region) = self.regions.get_mut(&name) else {
                continue;
            };
            tick_region(&name, region, world, &self.wind, &mut stats);
            if region.sources.is_empty() {
                log::debug!("region {name} has no sources left");
                self.regions.remove(&name);
            }
        }

        self.wind.advance(self.limits, &mut self.wind_rng);
        stats
    }
}

fn tick_region<W: VoxelWorld + ?Sized>(
    name: &str,
    region: &mut RegionSources,
    world: &mut W,
    wind: &WindState,
    stats: &mut EngineTickStats,
) {
    let mut retired = Vec::new();
    for anchor in region.active_sorted() {
        let Some(source) = region.sources.get_mut(&anchor) else {
            continue;
        };
        stats.sources_ticked += 1;
        let keep = source.tick(world, wind);
        let last = source.last_tick();
        stats.spawned += last.spawned;
        stats.placed += last.placed;
        stats.cleared += last.cleared;
        if keep {
            stats.live_particles += source.particle_count();
        } else {
            retired.push(anchor);
        }
    }
    for anchor in retired {
        log::debug!("retiring source at {anchor:?} in region {name}: anchor block changed");
        region.remove(anchor);
        stats.sources_retired += 1;
    }
}
