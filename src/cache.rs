use crate::buffer_store::BufferStore;
use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::record::{RecordBuilder, RecordReader, append_record, decode_all, decode_and_emit};
use crate::sink::LineSink;
use crate::types::*;
use tracing::{debug, info, warn};

/// Producer-facing staging cache.
///
/// Appends go through a space check first, so a rejected record leaves the
/// buffer untouched. A flush clears the buffer only when every line reached
/// the sink.
#[derive(Debug, Clone, Default)]
pub struct OnboardCache {
    store: BufferStore,
}

impl OnboardCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: BufferStore::new(&config),
        }
    }

    /// Cache one record of raw fields.
    ///
    /// Fails with `LengthMismatch` if the field bytes do not add up to the
    /// specifier widths, and with `BufferFull` (nothing written) if the record
    /// does not fit.
    pub fn cache_record(&mut self, specifiers: &[u8], field_bytes: &[u8]) -> Result<(), CacheError> {
        if specifiers.len() > MAX_SPECIFIERS {
            return Err(CacheError::TooManySpecifiers(specifiers.len()));
        }
        let expected: usize = specifiers.iter().map(|&w| w as usize).sum();
        if expected != field_bytes.len() {
            return Err(CacheError::LengthMismatch {
                expected,
                actual: field_bytes.len(),
            });
        }

        let needed = encoded_len(specifiers);
        if !self.store.has_space(needed) {
            warn!(
                needed,
                cursor = self.store.cursor(),
                capacity = self.store.capacity(),
                "record rejected, cache full"
            );
            return Err(CacheError::BufferFull {
                cursor: self.store.cursor(),
                capacity: self.store.capacity(),
            });
        }
        append_record(&mut self.store, specifiers, field_bytes)
    }

    #[inline]
    pub fn cache_builder(&mut self, builder: &RecordBuilder) -> Result<(), CacheError> {
        self.cache_record(builder.specifiers(), builder.field_bytes())
    }

    /// Cache readings, each packed at its minimal width.
    pub fn cache_values(&mut self, values: &[u32]) -> Result<(), CacheError> {
        let builder = RecordBuilder::from_values(values)?;
        self.cache_builder(&builder)
    }

    /// Emit every record to `sink`, then clear the buffer.
    ///
    /// A malformed record (`Truncated` or `Desync`) ends the flush after the
    /// records before it were emitted. The rest of the buffer cannot be
    /// framed, so it is cleared and the error returned. A sink error keeps
    /// the buffer so the caller can retry; lines written before the failure
    /// are written again on retry.
    pub fn flush<S: LineSink>(&mut self, sink: S) -> Result<FlushSummary, CacheError> {
        let summary = match decode_and_emit(&self.store, sink) {
            Ok(summary) => summary,
            Err(e @ (CacheError::Truncated { .. } | CacheError::Desync { .. })) => {
                warn!(error = %e, discarded = self.store.cursor(), "corrupt record, cache cleared");
                self.store.reset();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        self.store.reset();
        info!(
            records = summary.records,
            fields = summary.fields,
            overflow_fields = summary.overflow_fields,
            bytes = summary.bytes,
            "cache flushed"
        );
        Ok(summary)
    }

    /// Drop all records without emitting them.
    pub fn erase(&mut self) {
        debug!(discarded = self.store.cursor(), "cache erased");
        self.store.reset();
    }

    /// Decoded view of the buffer, without emitting or clearing.
    pub fn records(&self) -> Result<Vec<DecodedRecord>, CacheError> {
        decode_all(&self.store)
    }

    /// Lazy record iterator; stops after the first malformed record.
    pub fn iter_records(&self) -> RecordReader<'_> {
        RecordReader::new(&self.store)
    }

    #[inline]
    pub fn has_space(&self, n: usize) -> bool {
        self.store.has_space(n)
    }

    /// Bytes still available to the checked append path.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.store
            .capacity()
            .saturating_sub(self.store.cursor())
            .saturating_sub(1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.cursor()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.cursor() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn set_cursor(&mut self, offset: usize) -> Result<(), CacheError> {
        self.store.set_cursor(offset)
    }

    pub fn clear_byte_at_cursor(&mut self) {
        self.store.clear_byte_at_cursor();
    }

    #[inline]
    pub fn store(&self) -> &BufferStore {
        &self.store
    }

    /// Raw store access for callers driving the byte-level protocol directly.
    ///
    /// Writes through this handle skip the length and space checks of
    /// [`cache_record`](Self::cache_record). A partial record left here is
    /// reported by the next flush as `Truncated`.
    #[inline]
    pub fn store_mut(&mut self) -> &mut BufferStore {
        &mut self.store
    }
}
