use glam::IVec3;

use crate::compat;
use crate::compress;
use crate::error::PersistError;
use crate::format::*;
use crate::record::SourceRecord;

/// Parsed source set ready to be turned back into live sources.
pub struct LoadedSources {
    pub header: BlobHeader,
    pub sources: Vec<SourceRecord>,
    /// Compatibility warnings (e.g., unknown flags).
    pub warnings: Vec<String>,
}

/// Load and parse a source-set blob from raw bytes.
pub fn load(bytes: &[u8]) -> Result<LoadedSources, PersistError> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::BlobTooSmall(bytes.len(), HEADER_SIZE));
    }

    let header: BlobHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
    let warnings = compat::validate_header(&header)?;

    let payload = compress::decompress_payload(&bytes[HEADER_SIZE..], header.payload_size as usize)?;

    let mut cursor = 0usize;
    let table_end = (header.source_count as usize).saturating_mul(SOURCE_RECORD_SIZE);
    if table_end > payload.len() {
        return Err(PersistError::Truncated {
            expected: table_end,
            actual: payload.len(),
        });
    }
    let mut sources = Vec::with_capacity(header.source_count as usize);
    for _ in 0..header.source_count {
        let raw: RawSource = bytemuck::pod_read_unaligned(take(&payload, &mut cursor, SOURCE_RECORD_SIZE)?);

        let ledger_bytes = (raw.ledger_len as usize).saturating_mul(LEDGER_ENTRY_SIZE);
        if ledger_bytes > payload.len() - cursor {
            return Err(PersistError::Truncated {
                expected: cursor.saturating_add(ledger_bytes),
                actual: payload.len(),
            });
        }
        let mut ledger = Vec::with_capacity(raw.ledger_len as usize);
        for _ in 0..raw.ledger_len {
            let entry: RawLedgerEntry =
                bytemuck::pod_read_unaligned(take(&payload, &mut cursor, LEDGER_ENTRY_SIZE)?);
            ledger.push((IVec3::from_array(entry.coord), entry.count));
        }

        sources.push(SourceRecord::from_raw(&raw, ledger)?);
    }

    if cursor != payload.len() {
        return Err(PersistError::TrailingBytes(payload.len() - cursor));
    }

    Ok(LoadedSources {
        header,
        sources,
        warnings,
    })
}

/// Next `len` bytes of the payload, advancing the cursor.
fn take<'a>(payload: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8], PersistError> {
    let end = *cursor + len;
    if end > payload.len() {
        return Err(PersistError::Truncated {
            expected: end,
            actual: payload.len(),
        });
    }
    let slice = &payload[*cursor..end];
    *cursor = end;
    Ok(slice)
}
