//! Binary persistence of a region's smoke sources.

pub mod compat;
pub mod compress;
pub mod error;
pub mod format;
pub mod load;
pub mod record;
pub mod save;
pub mod store;

pub use error::PersistError;
pub use format::BlobHeader;
pub use load::{load, LoadedSources};
pub use record::SourceRecord;
pub use save::save;
pub use store::{load_region, save_region, DirectoryStore, MemoryStore, PersistenceStore};
