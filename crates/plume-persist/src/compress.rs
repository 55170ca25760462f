use crate::error::PersistError;

/// Compress a source-set payload with LZ4, size-prepended.
pub fn compress_payload(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

/// Upper bound on the LZ4 block expansion ratio.
const MAX_EXPANSION: usize = 255;

/// Decompress a payload, checking it against the size recorded in the header.
/// The declared size is checked before anything is allocated.
pub fn decompress_payload(compressed: &[u8], expected: usize) -> Result<Vec<u8>, PersistError> {
    let Some((prefix, block)) = compressed.split_first_chunk::<4>() else {
        return Err(PersistError::DecompressError(format!(
            "{} bytes is too short for a size prefix",
            compressed.len()
        )));
    };
    let declared = u32::from_le_bytes(*prefix) as usize;
    if declared != expected {
        return Err(PersistError::PayloadSizeMismatch {
            expected,
            actual: declared,
        });
    }
    if expected > block.len().saturating_mul(MAX_EXPANSION) {
        return Err(PersistError::DecompressError(format!(
            "{} compressed bytes cannot expand to {expected}",
            block.len()
        )));
    }

    let decompressed = lz4_flex::decompress(block, expected)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;

    if decompressed.len() != expected {
        return Err(PersistError::PayloadSizeMismatch {
            expected,
            actual: decompressed.len(),
        });
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress_roundtrip() {
        let data: Vec<u8> = (0..4096).map(|i| (i % 251) as u8).collect();
        let compressed = compress_payload(&data);
        let decompressed = decompress_payload(&compressed, data.len()).expect("decompress should succeed");
        assert_eq!(data, decompressed);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let compressed = compress_payload(&[1, 2, 3, 4]);
        let result = decompress_payload(&compressed, 5);
        assert!(matches!(
            result,
            Err(PersistError::PayloadSizeMismatch { expected: 5, actual: 4 })
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let result = decompress_payload(&[16, 0, 0, 0, 0xFF, 0xFF], 16);
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_declared_size_rejected_before_allocating() {
        let mut compressed = compress_payload(&[7u8; 32]);
        compressed[..4].copy_from_slice(&u32::MAX.to_le_bytes());
        let result = decompress_payload(&compressed, u32::MAX as usize);
        assert!(matches!(result, Err(PersistError::DecompressError(_))));
    }

    #[test]
    fn test_missing_size_prefix_rejected() {
        assert!(matches!(
            decompress_payload(&[1, 2], 0),
            Err(PersistError::DecompressError(_))
        ));
    }

    #[test]
    fn test_repetitive_ledgers_compress_well() {
        let data = vec![0u8; 16 * 1024];
        let compressed = compress_payload(&data);
        assert!(
            compressed.len() < data.len() / 10,
            "zeroed payload should compress to <10% (got {} bytes)",
            compressed.len()
        );
    }
}
