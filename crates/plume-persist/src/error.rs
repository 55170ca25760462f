/// Errors that can occur while loading or storing a region's source set.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected PLUM)")]
    InvalidMagic,

    #[error("unsupported source set format version {0}")]
    UnsupportedVersion(u16),

    #[error("blob too small ({0} bytes, minimum {1})")]
    BlobTooSmall(usize, usize),

    #[error("truncated payload: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("{0} unexpected bytes after the last source record")]
    TrailingBytes(usize),

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("payload size mismatch: header says {expected}, decompressed {actual}")]
    PayloadSizeMismatch { expected: usize, actual: usize },

    #[error("invalid wind direction code {0}")]
    InvalidDirection(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
