/// Magic bytes identifying a persisted source set.
pub const MAGIC: [u8; 4] = *b"PLUM";

/// Current format version.
pub const FORMAT_VERSION: u16 = 1;

/// Header flags understood by this version. None are defined yet.
pub const KNOWN_FLAGS: u16 = 0;

/// Size of the blob header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Size of one fixed-width source record in bytes.
pub const SOURCE_RECORD_SIZE: usize = 40;

/// Size of one ledger entry in bytes.
pub const LEDGER_ENTRY_SIZE: usize = 16;

/// Wind code meaning "no window, follow the global wind".
pub const NO_WIND: u8 = 0xFF;

/// Blob header. Fixed 16 bytes, repr(C) for byte-level serialization.
/// The compressed payload follows immediately.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlobHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: u16,
    pub source_count: u32,
    /// Uncompressed payload size.
    pub payload_size: u32,
}

/// One source's configuration, 40 bytes. Followed in the payload by
/// `ledger_len` ledger entries.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawSource {
    pub anchor: [i32; 3],
    pub anchor_material: u16,
    pub smoke_material: u16,
    pub density_min: u32,
    pub density_max: u32,
    pub max_distance: u32,
    pub decay_chance: f32,
    /// Direction ordinal 0..=7, or `NO_WIND`.
    pub wind_from: u8,
    pub wind_to: u8,
    pub random_spread: u8,
    pub _pad: u8,
    pub ledger_len: u32,
}

/// A claimed cell and its particle count, 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawLedgerEntry {
    pub coord: [i32; 3],
    pub count: u32,
}
