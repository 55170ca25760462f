use crate::compress;
use crate::format::*;
use crate::record::SourceRecord;

/// Serialize a region's sources into the binary source-set format.
///
/// Layout: header (16B) + LZ4 payload. The payload is, per source, one 40B
/// record followed by its 16B ledger entries.
pub fn save(sources: &[SourceRecord]) -> Vec<u8> {
    let ledger_entries: usize = sources.iter().map(|s| s.ledger.len()).sum();
    let mut payload =
        Vec::with_capacity(sources.len() * SOURCE_RECORD_SIZE + ledger_entries * LEDGER_ENTRY_SIZE);

    for source in sources {
        payload.extend_from_slice(bytemuck::bytes_of(&source.to_raw()));
        for entry in source.ledger_to_raw() {
            payload.extend_from_slice(bytemuck::bytes_of(&entry));
        }
    }

    let header = BlobHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        flags: 0,
        source_count: sources.len() as u32,
        payload_size: payload.len() as u32,
    };

    let compressed = compress::compress_payload(&payload);
    let mut output = Vec::with_capacity(HEADER_SIZE + compressed.len());
    output.extend_from_slice(bytemuck::bytes_of(&header));
    output.extend_from_slice(&compressed);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use plume_core::settings::SmokeSettings;
    use plume_core::types::MaterialId;

    fn record(ledger_len: i32) -> SourceRecord {
        SourceRecord {
            anchor: IVec3::new(4, 64, -9),
            anchor_material: MaterialId(5),
            settings: SmokeSettings::new(MaterialId(30)),
            ledger: (0..ledger_len).map(|y| (IVec3::new(4, 65 + y, -9), 1)).collect(),
        }
    }

    #[test]
    fn test_save_header_fields_correct() {
        let data = save(&[record(3), record(0)]);

        let header: BlobHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);
        assert_eq!(header.magic, MAGIC);
        assert_eq!(header.version, FORMAT_VERSION);
        assert_eq!(header.flags, 0);
        assert_eq!(header.source_count, 2);
        assert_eq!(
            header.payload_size as usize,
            2 * SOURCE_RECORD_SIZE + 3 * LEDGER_ENTRY_SIZE
        );
    }

    #[test]
    fn test_save_starts_with_magic() {
        let data = save(&[]);
        assert_eq!(&data[0..4], b"PLUM");
        let version = u16::from_le_bytes([data[4], data[5]]);
        assert_eq!(version, FORMAT_VERSION);
    }
}
