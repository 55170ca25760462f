//! Region and column lifecycle, and the persistence glue behind it.
//!
//! A region's sources are loaded when the region activates and saved when it
//! deactivates. Within an active region only sources whose anchor column is
//! loaded tick.

use plume_core::math::column_of;
use plume_core::types::ColumnCoord;
use plume_core::voxel::VoxelWorld;
use plume_persist::{load_region, save_region, PersistError, PersistenceStore, SourceRecord};
use plume_sim::Source;

use crate::engine::{RegionSources, SmokeEngine};

impl SmokeEngine {
    /// Snapshot every source in a region, sorted by anchor. Particles are not
    /// part of the snapshot.
    pub fn sources_for_persistence(&self, region: &str) -> Vec<SourceRecord> {
        self.sources(region)
            .into_iter()
            .map(|source| SourceRecord {
                anchor: source.anchor(),
                anchor_material: source.anchor_material(),
                settings: source.settings().clone(),
                ledger: source.ledger().sorted_entries(),
            })
            .collect()
    }

    /// Rebuild sources from persisted records. They start inactive; activate
    /// their columns to make them tick. Records with unusable settings are
    /// skipped. Returns how many were restored.
    pub fn restore_sources(&mut self, region: &str, records: Vec<SourceRecord>) -> usize {
        let mut restored = 0;
        for record in records {
            let stale = record.ledger.iter().map(|(coord, _)| *coord);
            let seed = self.seed_for(record.anchor);
            match Source::restore(record.anchor, record.anchor_material, record.settings.clone(), stale, seed) {
                Ok(source) => {
                    let entry = self.regions.entry(region.to_string()).or_default();
                    entry.active.remove(&record.anchor);
                    entry.sources.insert(record.anchor, source);
                    restored += 1;
                }
                Err(e) => log::warn!(
                    "skipping persisted source at {:?} in region {region}: {e}",
                    record.anchor
                ),
            }
        }
        restored
    }

    /// Load a region's sources from `store` and activate those in the loaded
    /// columns. A region already in memory is not reloaded.
    ///
    /// A load failure is logged and returned; the region then simply starts
    /// with no sources.
    pub fn activate_region<W, S>(
        &mut self,
        region: &str,
        world: &mut W,
        loaded_columns: &[ColumnCoord],
        store: &S,
    ) -> Result<usize, PersistError>
    where
        W: VoxelWorld + ?Sized,
        S: PersistenceStore + ?Sized,
    {
        log::info!("activating region {region}");
        if !self.regions.contains_key(region) {
            let records = load_region(store, region).map_err(|e| {
                log::error!("could not load smoke sources for region {region}: {e}");
                e
            })?;
            self.restore_sources(region, records);
        }
        let mut activated = 0;
        for column in loaded_columns {
            activated += self.activate_column(region, *column, world);
        }
        Ok(activated)
    }

    /// Flush every source's smoke, persist the region, and drop it from
    /// memory. The in-memory state is dropped even if saving fails.
    pub fn deactivate_region<W, S>(
        &mut self,
        region: &str,
        world: &mut W,
        store: &mut S,
    ) -> Result<(), PersistError>
    where
        W: VoxelWorld + ?Sized,
        S: PersistenceStore + ?Sized,
    {
        log::info!("deactivating region {region}");
        if let Some(sources) = self.regions.get_mut(region) {
            for source in sources.sources.values_mut() {
                source.remove_all_smoke(world);
            }
        }
        let result = self.save_region(region, store);
        self.regions.remove(region);
        result
    }

    /// Persist a region's sources as they are now. An empty region deletes
    /// its blob.
    pub fn save_region<S: PersistenceStore + ?Sized>(
        &self,
        region: &str,
        store: &mut S,
    ) -> Result<(), PersistError> {
        let records = self.sources_for_persistence(region);
        save_region(store, region, &records).map_err(|e| {
            log::error!("could not save smoke sources for region {region}: {e}");
            e
        })
    }

    /// Start ticking every source anchored in `column`. While paused, any
    /// smoke such a source left in the world is cleared instead.
    pub fn activate_column<W: VoxelWorld + ?Sized>(
        &mut self,
        region: &str,
        column: ColumnCoord,
        world: &mut W,
    ) -> usize {
        let paused = self.paused;
        let Some(entry) = self.regions.get_mut(region) else {
            return 0;
        };
        let RegionSources { sources, active } = entry;
        let mut activated = 0;
        for (anchor, source) in sources.iter_mut() {
            if column_of(*anchor) != column {
                continue;
            }
            log::debug!("activating source at {anchor:?} in region {region}");
            active.insert(*anchor);
            if paused {
                source.remove_all_smoke(world);
            }
            activated += 1;
        }
        activated
    }

    /// Stop ticking the sources anchored in `column`. Their smoke and
    /// particles stay as they are until the column comes back.
    pub fn deactivate_column(&mut self, region: &str, column: ColumnCoord) -> usize {
        let Some(entry) = self.regions.get_mut(region) else {
            return 0;
        };
        let before = entry.active.len();
        entry.active.retain(|anchor| column_of(*anchor) != column);
        let deactivated = before - entry.active.len();
        if deactivated > 0 {
            log::debug!("deactivated {deactivated} sources in column {column:?} of region {region}");
        }
        deactivated
    }
}
