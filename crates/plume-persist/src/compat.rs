use crate::error::PersistError;
use crate::format::{BlobHeader, FORMAT_VERSION, KNOWN_FLAGS, MAGIC};

/// Validate a blob header and return any compatibility warnings.
///
/// Returns Ok(warnings) on success, Err on fatal errors.
/// Unknown flag bits produce a warning, not an error.
pub fn validate_header(header: &BlobHeader) -> Result<Vec<String>, PersistError> {
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }
    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    let mut warnings = Vec::new();

    let unknown = header.flags & !KNOWN_FLAGS;
    if unknown != 0 {
        warnings.push(format!(
            "Source set carries unknown flags {unknown:#06x}; they will be ignored."
        ));
    }
    if header.source_count == 0 {
        warnings.push("Source set is empty; an empty region normally has no blob.".to_string());
    }

    Ok(warnings)
}
