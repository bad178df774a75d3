use crate::error::CacheError;
use crate::types::*;
use arrayvec::ArrayVec;

/// Fewest big-endian bytes that hold `value`. Zero still takes one byte.
#[inline]
pub fn minimal_width(value: u32) -> u8 {
    let bits = u32::BITS - value.leading_zeros();
    bits.div_ceil(8).max(1) as u8
}

// ─── RecordBuilder ──────────────────────────────────────────────────────────

/// Accumulates one record's specifiers and field bytes.
///
/// Specifiers live in a stack buffer sized to the 255-field limit of the
/// count byte.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    specifiers: ArrayVec<u8, MAX_SPECIFIERS>,
    field_bytes: Vec<u8>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from readings, each at its minimal width.
    pub fn from_values(values: &[u32]) -> Result<Self, CacheError> {
        if values.len() > MAX_SPECIFIERS {
            return Err(CacheError::TooManySpecifiers(values.len()));
        }
        let mut builder = Self::new();
        for &v in values {
            builder.push_value(v)?;
        }
        Ok(builder)
    }

    /// Push raw big-endian field bytes. The slice length is the width.
    pub fn push_field(&mut self, bytes: &[u8]) -> Result<&mut Self, CacheError> {
        let width = u8::try_from(bytes.len()).unwrap_or(u8::MAX);
        if !(1..=MAX_FIELD_WIDTH).contains(&width) {
            return Err(CacheError::InvalidWidth(width));
        }
        self.specifiers
            .try_push(width)
            .map_err(|_| CacheError::TooManySpecifiers(MAX_SPECIFIERS + 1))?;
        self.field_bytes.extend_from_slice(bytes);
        Ok(self)
    }

    #[inline]
    pub fn push_value(&mut self, value: u32) -> Result<&mut Self, CacheError> {
        self.push_value_with_width(value, minimal_width(value))
    }

    /// Push `value` at a fixed width, e.g. a 2-byte temperature slot.
    pub fn push_value_with_width(&mut self, value: u32, width: u8) -> Result<&mut Self, CacheError> {
        if !(1..=MAX_FIELD_WIDTH).contains(&width) {
            return Err(CacheError::InvalidWidth(width));
        }
        if minimal_width(value) > width {
            return Err(CacheError::ValueTooWide { value, width });
        }
        let be = value.to_be_bytes();
        self.push_field(&be[be.len() - width as usize..])
    }

    #[inline]
    pub fn specifiers(&self) -> &[u8] {
        &self.specifiers
    }

    #[inline]
    pub fn field_bytes(&self) -> &[u8] {
        &self.field_bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// Bytes this record takes in the buffer.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        1 + self.specifiers.len() + self.field_bytes.len()
    }

    pub fn clear(&mut self) {
        self.specifiers.clear();
        self.field_bytes.clear();
    }
}
