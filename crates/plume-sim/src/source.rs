use rand::rngs::StdRng;
use rand::SeedableRng;

use plume_core::error::SettingsError;
use plume_core::random::RandomSource;
use plume_core::settings::SmokeSettings;
use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::VoxelWorld;

use crate::ledger::{OccupancyLedger, ReconcileStats};
use crate::particle::{Fate, Particle, SourceView};
use crate::wind::WindState;

/// Counters from the most recent `Source::tick`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub spawned: u32,
    pub moved: u32,
    pub decayed: u32,
    /// Left through the ceiling or past max distance.
    pub escaped: u32,
    pub stuck: u32,
    pub placed: u32,
    pub cleared: u32,
}

impl TickStats {
    fn record(&mut self, fate: Fate) {
        match fate {
            Fate::Moved(_) => self.moved += 1,
            Fate::Decayed => self.decayed += 1,
            Fate::Ceiling | Fate::OutOfRange => self.escaped += 1,
            Fate::Stuck => self.stuck += 1,
        }
    }

    fn absorb(&mut self, stats: ReconcileStats) {
        self.placed += stats.placed;
        self.cleared += stats.cleared;
    }
}

/// A stationary smoke emitter bound to one voxel.
///
/// The source exclusively owns its particles and its occupancy ledger. It is
/// the only writer of the voxels its ledger claims.
#[derive(Debug, Clone)]
pub struct Source {
    anchor: GridCoord,
    anchor_material: MaterialId,
    settings: SmokeSettings,
    particles: Vec<Particle>,
    ledger: OccupancyLedger,
    rng: StdRng,
    last_tick: TickStats,
}

impl Source {
    /// A fresh source with no particles. Fails if `settings` cannot drive one.
    pub fn new(
        anchor: GridCoord,
        anchor_material: MaterialId,
        settings: SmokeSettings,
        seed: u64,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            anchor,
            anchor_material,
            settings,
            particles: Vec::new(),
            ledger: OccupancyLedger::new(),
            rng: StdRng::seed_from_u64(seed),
            last_tick: TickStats::default(),
        })
    }

    /// Rebuild a persisted source. Its old claims have no particles behind
    /// them any more, so they come back at zero and the first reconcile clears
    /// whatever smoke they left in the world.
    pub fn restore(
        anchor: GridCoord,
        anchor_material: MaterialId,
        settings: SmokeSettings,
        stale_claims: impl IntoIterator<Item = GridCoord>,
        seed: u64,
    ) -> Result<Self, SettingsError> {
        let mut source = Self::new(anchor, anchor_material, settings, seed)?;
        for coord in stale_claims {
            source.ledger.mark_stale(coord);
        }
        Ok(source)
    }

    pub fn anchor(&self) -> GridCoord {
        self.anchor
    }

    pub fn anchor_material(&self) -> MaterialId {
        self.anchor_material
    }

    pub fn settings(&self) -> &SmokeSettings {
        &self.settings
    }

    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn last_tick(&self) -> TickStats {
        self.last_tick
    }

    /// One simulation step: spawn, propagate, reconcile, strictly in that
    /// order. Returns `false` when the anchor block is gone and the source
    /// should be dropped; its smoke has already been cleared.
    pub fn tick<W: VoxelWorld + ?Sized>(&mut self, world: &mut W, wind: &WindState) -> bool {
        if world.material_at(self.anchor) != self.anchor_material {
            log::debug!(
                "source at {:?} lost its anchor block, removing its smoke",
                self.anchor
            );
            self.remove_all_smoke(world);
            return false;
        }

        let mut stats = TickStats::default();

        let spawned = spawn_count(&self.settings, &mut self.rng);
        if spawned > 0 {
            self.ledger.add(self.anchor, spawned);
            self.particles
                .extend((0..spawned).map(|_| Particle::new(self.anchor)));
        }
        stats.spawned = spawned;

        let Source {
            anchor,
            settings,
            particles,
            ledger,
            rng,
            ..
        } = self;
        let view = SourceView {
            anchor: *anchor,
            settings: &*settings,
        };
        // Voxels only change during reconcile, so every particle sees the same world.
        let frozen: &W = &*world;
        particles.retain_mut(|particle| {
            let fate = particle.tick(view, frozen, wind, &mut *rng, &mut *ledger);
            stats.record(fate);
            fate.is_alive()
        });

        stats.absorb(self.ledger.reconcile(world, self.settings.smoke_material));
        log::debug!(
            "source at {:?}: spawned {}, live {}, ledger {}",
            self.anchor,
            stats.spawned,
            self.particles.len(),
            self.ledger.len()
        );
        self.last_tick = stats;
        true
    }

    /// Clear every voxel this source still shows as smoke and forget all
    /// particles and claims. Safe to call repeatedly.
    pub fn remove_all_smoke<W: VoxelWorld + ?Sized>(&mut self, world: &mut W) -> u32 {
        self.particles.clear();
        self.ledger.flush(world, self.settings.smoke_material)
    }
}

/// Particles to spawn this tick, drawn uniformly from the density range.
fn spawn_count<R: RandomSource + ?Sized>(settings: &SmokeSettings, rng: &mut R) -> u32 {
    rng.next_between(settings.density_min, settings.density_max)
}
