//! Operator commands. Each returns the message to show the operator.

use thiserror::Error;

use plume_config::{apply_options, describe_settings, OptionError};
use plume_core::error::SettingsError;
use plume_core::types::{GridCoord, MaterialId};
use plume_core::voxel::{VoxelWorld, WorldProvider};
use plume_sim::Source;

use crate::engine::SmokeEngine;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No target block")]
    NoTargetBlock,
    #[error("The targeted block (type: {material}, coords: {x},{y},{z}) is not a smoke source")]
    NotASource {
        material: String,
        x: i32,
        y: i32,
        z: i32,
    },
    #[error("Smoke sources already paused")]
    AlreadyPaused,
    #[error("Smoke sources are not paused")]
    NotPaused,
    #[error(transparent)]
    Option(#[from] OptionError),
    #[error("Invalid {field}: {0}", field = .0.field())]
    Settings(#[from] SettingsError),
}

fn coords(c: GridCoord) -> String {
    format!("{},{},{}", c.x, c.y, c.z)
}

impl SmokeEngine {
    /// A usable command target is any block that is neither air nor smoke.
    fn target_material<W: VoxelWorld + ?Sized>(
        &self,
        world: &W,
        target: GridCoord,
    ) -> Result<MaterialId, CommandError> {
        let material = world.material_at(target);
        if material.is_air() || material == self.default_smoke() {
            return Err(CommandError::NoTargetBlock);
        }
        Ok(material)
    }

    fn not_a_source(&self, material: MaterialId, target: GridCoord) -> CommandError {
        CommandError::NotASource {
            material: self.materials.name_of(material),
            x: target.x,
            y: target.y,
            z: target.z,
        }
    }

    /// Create a source on the target block, or replace the one already there.
    ///
    /// Options override the engine defaults. Bad options or settings leave
    /// any existing source untouched. The new source is active immediately.
    pub fn create_or_update<W, S>(
        &mut self,
        region: &str,
        target: GridCoord,
        world: &mut W,
        options: &[S],
    ) -> Result<String, CommandError>
    where
        W: VoxelWorld + ?Sized,
        S: AsRef<str>,
    {
        let anchor_material = self.target_material(&*world, target)?;
        let settings = apply_options(options, &self.defaults, &self.materials)?;
        let source = Source::new(target, anchor_material, settings, self.seed_for(target))?;

        let entry = self.regions.entry(region.to_string()).or_default();
        let existing = entry.sources.remove(&target);
        let updated = existing.is_some();
        if let Some(mut old) = existing {
            old.remove_all_smoke(world);
        }
        entry.sources.insert(target, source);
        entry.active.insert(target);
        log::info!(
            "smoke source {} at {target:?} in region {region}",
            if updated { "updated" } else { "created" }
        );

        let mut message = format!(
            "Smoke source {} at {}; {}",
            if updated { "updated" } else { "created" },
            coords(target),
            self.describe_source(region, target, false).unwrap_or_default()
        );
        if self.paused {
            message.push_str("\nPlease note: smoke sources are currently paused!");
        }
        Ok(message)
    }

    /// Remove the source on the target block and clear its smoke.
    pub fn remove<W: VoxelWorld + ?Sized>(
        &mut self,
        region: &str,
        target: GridCoord,
        world: &mut W,
    ) -> Result<String, CommandError> {
        let material = self.target_material(&*world, target)?;
        let removed = self.regions.get_mut(region).and_then(|entry| {
            let source = entry.remove(target)?;
            Some((source, entry.sources.is_empty()))
        });
        let Some((mut source, region_empty)) = removed else {
            return Err(self.not_a_source(material, target));
        };
        source.remove_all_smoke(world);
        if region_empty {
            self.regions.remove(region);
        }
        log::info!("smoke source at {target:?} in region {region} removed");
        Ok("Smoke source deleted".to_string())
    }

    /// Remove every source in a region and clear all their smoke.
    pub fn remove_all<W: VoxelWorld + ?Sized>(&mut self, region: &str, world: &mut W) -> String {
        let mut removed = 0;
        if let Some(entry) = self.regions.remove(region) {
            for mut source in entry.sources.into_values() {
                source.remove_all_smoke(world);
                removed += 1;
            }
        }
        log::info!("removed all {removed} smoke sources from region {region}");
        format!("All smoke sources deleted from region {region}")
    }

    /// Stop ticking and clear the smoke of every active source. Source
    /// definitions survive; their particles do not.
    pub fn pause<P: WorldProvider + ?Sized>(&mut self, worlds: &mut P) -> Result<String, CommandError> {
        if self.paused {
            return Err(CommandError::AlreadyPaused);
        }
        for (name, entry) in self.regions.iter_mut() {
            let Some(world) = worlds.world_mut(name) else {
                log::warn!("region {name} has no world to clear while pausing");
                continue;
            };
            for anchor in entry.active.iter() {
                if let Some(source) = entry.sources.get_mut(anchor) {
                    source.remove_all_smoke(world);
                }
            }
        }
        self.paused = true;
        log::info!("smoke sources paused");
        Ok("All smoke sources paused".to_string())
    }

    /// Resume ticking. Sources restart cold from their anchors.
    pub fn resume(&mut self) -> Result<String, CommandError> {
        if !self.paused {
            return Err(CommandError::NotPaused);
        }
        self.paused = false;
        log::info!("smoke sources resumed");
        Ok("All smoke sources unpaused".to_string())
    }

    /// Describe the source on the target block.
    pub fn describe<W: VoxelWorld + ?Sized>(
        &self,
        region: &str,
        target: GridCoord,
        world: &W,
    ) -> Result<String, CommandError> {
        let material = self.target_material(world, target)?;
        let description = self
            .describe_source(region, target, true)
            .ok_or_else(|| self.not_a_source(material, target))?;
        Ok(format!(
            "Smoke source @ {} has the following settings: {description}",
            coords(target)
        ))
    }

    /// Settings summary of one source, or None if there is none at `anchor`.
    pub fn describe_source(&self, region: &str, anchor: GridCoord, include_type: bool) -> Option<String> {
        let source = self.source(region, anchor)?;
        Some(describe_settings(
            source.settings(),
            &self.materials,
            self.default_smoke(),
            include_type,
        ))
    }
}
