use crate::buffer_store::BufferStore;
use crate::error::CacheError;
use crate::types::*;

// ─── Field Reassembly ───────────────────────────────────────────────────────

/// Rebuild a big-endian value of `width` bytes starting at `offset`.
///
/// Widths outside 1..=4 yield [`FieldValue::Overflow`] without touching the
/// buffer.
#[inline]
pub fn read_field(store: &BufferStore, offset: usize, width: u8) -> Result<FieldValue, CacheError> {
    if !(1..=MAX_FIELD_WIDTH).contains(&width) {
        return Ok(FieldValue::Overflow);
    }
    let mut value = 0u32;
    for i in 0..width as usize {
        value = (value << 8) | u32::from(store.read_byte(offset + i)?);
    }
    Ok(FieldValue::Number(value))
}

// ─── Record Reader ──────────────────────────────────────────────────────────

/// Walks `[0, cursor)` one record at a time.
///
/// A record with zero specifiers spans only its count byte and decodes to an
/// empty field list. A record whose declared end passes the cursor (only
/// possible through an unsupported width) is reported as `Desync`. After the
/// first error the reader yields nothing more.
pub struct RecordReader<'a> {
    store: &'a BufferStore,
    pos: usize,
    done: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(store: &'a BufferStore) -> Self {
        Self {
            store,
            pos: 0,
            done: false,
        }
    }

    /// Offset where the next record would start.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Next record without the end-of-record check. A record running past
    /// the cursor is still returned so its fields can be emitted; the reader
    /// is exhausted afterwards.
    pub(crate) fn next_unchecked(&mut self) -> Option<Result<DecodedRecord, CacheError>> {
        if self.done || self.pos >= self.store.cursor() {
            return None;
        }
        let result = self.read_record(self.pos);
        match &result {
            Ok(record) => self.pos = record.end,
            Err(_) => self.done = true,
        }
        Some(result)
    }

    fn read_record(&self, start: usize) -> Result<DecodedRecord, CacheError> {
        let cursor = self.store.cursor();
        let truncated = |end: usize| CacheError::Truncated {
            record_start: start,
            end,
            cursor,
        };

        let count = self.store.read_byte(start)? as usize;
        let field_region = start + 1 + count;
        let mut next = field_region;
        let mut fields = Vec::with_capacity(count);

        for i in 0..count {
            let width = self
                .store
                .read_byte(start + 1 + i)
                .map_err(|_| truncated(field_region))?;
            let value = read_field(self.store, next, width)
                .map_err(|_| truncated(next + width as usize))?;
            fields.push(DecodedField { width, value });
            next += width as usize;
        }

        Ok(DecodedRecord {
            start,
            end: next,
            fields,
        })
    }
}

/// `Desync` for a record that claims bytes past the cursor.
#[inline]
pub(crate) fn check_end(record: &DecodedRecord, cursor: usize) -> Result<(), CacheError> {
    if record.end > cursor {
        return Err(CacheError::Desync {
            end: record.end,
            cursor,
        });
    }
    Ok(())
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Result<DecodedRecord, CacheError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.next_unchecked()?;
        Some(result.and_then(|record| {
            check_end(&record, self.store.cursor())?;
            Ok(record)
        }))
    }
}

/// Decode every committed record, failing on the first malformed one.
pub fn decode_all(store: &BufferStore) -> Result<Vec<DecodedRecord>, CacheError> {
    RecordReader::new(store).collect()
}
