use crate::buffer_store::BufferStore;
use crate::error::CacheError;
use crate::types::MAX_SPECIFIERS;
use tracing::debug;

// ─── Append ─────────────────────────────────────────────────────────────────

/// Append one record: count byte, specifiers, then field bytes as given.
///
/// Every byte goes through [`BufferStore::write_byte`], so the first byte that
/// would pass capacity stops the append with `BufferFull`. Nothing is rolled
/// back: the cursor covers the partial record, which the decoder will later
/// report as truncated. Callers check [`BufferStore::has_space`] first.
///
/// `field_bytes` is not checked against the specifier widths here.
pub fn append_record(
    store: &mut BufferStore,
    specifiers: &[u8],
    field_bytes: &[u8],
) -> Result<(), CacheError> {
    if specifiers.len() > MAX_SPECIFIERS {
        return Err(CacheError::TooManySpecifiers(specifiers.len()));
    }
    let start = store.cursor();

    store.write_byte(specifiers.len() as u8)?;
    for &spec in specifiers {
        store.write_byte(spec)?;
    }
    for &b in field_bytes {
        store.write_byte(b)?;
    }

    debug!(
        start,
        end = store.cursor(),
        fields = specifiers.len(),
        "record appended"
    );
    Ok(())
}
