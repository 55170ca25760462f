//! Where region blobs live. A region with no sources has no blob.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistError;
use crate::load::load;
use crate::record::SourceRecord;
use crate::save::save;

/// Opaque blob storage keyed by region name.
pub trait PersistenceStore {
    fn read(&self, region: &str) -> Result<Option<Vec<u8>>, PersistError>;

    fn write(&mut self, region: &str, blob: &[u8]) -> Result<(), PersistError>;

    /// Remove a region's blob. Removing a missing blob is not an error.
    fn delete(&mut self, region: &str) -> Result<(), PersistError>;
}

/// Persist a region's sources. An empty set deletes any existing blob.
pub fn save_region<S: PersistenceStore + ?Sized>(
    store: &mut S,
    region: &str,
    sources: &[SourceRecord],
) -> Result<(), PersistError> {
    if sources.is_empty() {
        log::debug!("region {region} has no sources, deleting its blob");
        return store.delete(region);
    }
    store.write(region, &save(sources))?;
    log::info!("saved {} sources for region {region}", sources.len());
    Ok(())
}

/// Load a region's sources; a missing blob is an empty set.
pub fn load_region<S: PersistenceStore + ?Sized>(
    store: &S,
    region: &str,
) -> Result<Vec<SourceRecord>, PersistError> {
    let Some(blob) = store.read(region)? else {
        return Ok(Vec::new());
    };
    let loaded = load(&blob)?;
    for warning in &loaded.warnings {
        log::warn!("region {region}: {warning}");
    }
    log::info!("loaded {} sources for region {region}", loaded.sources.len());
    Ok(loaded.sources)
}

/// One `smokers_<region>.bin` file per region under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File for a region. Anything but ASCII letters and digits becomes `_`.
    pub fn blob_path(&self, region: &str) -> PathBuf {
        let sanitized: String = region
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.root.join(format!("smokers_{sanitized}.bin"))
    }
}

impl PersistenceStore for DirectoryStore {
    fn read(&self, region: &str) -> Result<Option<Vec<u8>>, PersistError> {
        match fs::read(self.blob_path(region)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, region: &str, blob: &[u8]) -> Result<(), PersistError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.blob_path(region), blob)?;
        Ok(())
    }

    fn delete(&mut self, region: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.blob_path(region)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Blobs held in memory; for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, region: &str) -> bool {
        self.blobs.contains_key(region)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn read(&self, region: &str) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.blobs.get(region).cloned())
    }

    fn write(&mut self, region: &str, blob: &[u8]) -> Result<(), PersistError> {
        self.blobs.insert(region.to_string(), blob.to_vec());
        Ok(())
    }

    fn delete(&mut self, region: &str) -> Result<(), PersistError> {
        self.blobs.remove(region);
        Ok(())
    }
}
