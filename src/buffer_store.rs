use crate::config::CacheConfig;
use crate::error::CacheError;
use tracing::trace;

// ─── BufferStore ────────────────────────────────────────────────────────────

/// Fixed-capacity byte region with a single write cursor.
///
/// Bytes below `cursor` are committed record data. Bytes at or above it are
/// stale and never read back.
#[derive(Debug, Clone)]
pub struct BufferStore {
    storage: Box<[u8]>,
    cursor: usize,
}

impl BufferStore {
    /// Create a zeroed store of `config.capacity` bytes.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            storage: vec![0u8; config.capacity.get()].into_boxed_slice(),
            cursor: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Logically clear the buffer. Contents are left in place.
    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// True iff `n` more bytes fit while keeping one byte of headroom.
    #[inline]
    pub fn has_space(&self, n: usize) -> bool {
        self.cursor
            .checked_add(n)
            .is_some_and(|end| end < self.capacity())
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) -> Result<(), CacheError> {
        if self.cursor >= self.capacity() {
            return Err(CacheError::BufferFull {
                cursor: self.cursor,
                capacity: self.capacity(),
            });
        }
        self.storage[self.cursor] = b;
        self.cursor += 1;
        Ok(())
    }

    /// Read a committed byte. Offsets at or past the cursor are rejected.
    #[inline]
    pub fn read_byte(&self, offset: usize) -> Result<u8, CacheError> {
        if offset >= self.cursor {
            return Err(CacheError::OutOfBounds {
                offset,
                cursor: self.cursor,
            });
        }
        Ok(self.storage[offset])
    }

    /// Committed bytes, `[0, cursor)`.
    #[inline]
    pub fn committed(&self) -> &[u8] {
        &self.storage[..self.cursor]
    }

    /// Move the cursor. Bytes below the new cursor become committed as-is.
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), CacheError> {
        if offset > self.capacity() {
            return Err(CacheError::InvalidCursor {
                offset,
                capacity: self.capacity(),
            });
        }
        trace!(from = self.cursor, to = offset, "cursor moved");
        self.cursor = offset;
        Ok(())
    }

    /// Zero the byte under the cursor without advancing. No-op when full.
    pub fn clear_byte_at_cursor(&mut self) {
        if let Some(b) = self.storage.get_mut(self.cursor) {
            *b = 0;
        }
    }
}

impl Default for BufferStore {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(capacity: usize) -> BufferStore {
        BufferStore::new(&CacheConfig::with_capacity(capacity).unwrap())
    }

    #[test]
    fn test_new_store_is_zeroed_and_empty() {
        let s = BufferStore::default();
        assert_eq!(s.capacity(), 256);
        assert_eq!(s.cursor(), 0);
        assert!(s.committed().is_empty());
        assert!(s.storage.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_has_space_is_strict() {
        let mut s = store(8);
        assert!(s.has_space(7));
        assert!(!s.has_space(8));

        for b in 0..5 {
            s.write_byte(b).unwrap();
        }
        assert!(s.has_space(2));
        assert!(!s.has_space(3));
        assert!(!s.has_space(usize::MAX));
    }

    #[test]
    fn test_write_up_to_capacity_then_fail() {
        let mut s = store(4);
        for b in 1..=4 {
            s.write_byte(b).unwrap();
        }
        assert_eq!(s.cursor(), 4);
        assert!(!s.has_space(0));

        let err = s.write_byte(9).unwrap_err();
        assert!(matches!(
            err,
            CacheError::BufferFull {
                cursor: 4,
                capacity: 4
            }
        ));
        assert_eq!(s.cursor(), 4);
        assert_eq!(s.committed(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_read_byte_is_bounds_checked() {
        let mut s = store(4);
        s.write_byte(0xAB).unwrap();
        assert_eq!(s.read_byte(0).unwrap(), 0xAB);
        assert!(matches!(
            s.read_byte(1),
            Err(CacheError::OutOfBounds {
                offset: 1,
                cursor: 1
            })
        ));
    }

    #[test]
    fn test_reset_keeps_contents_but_drops_them_logically() {
        let mut s = store(4);
        s.write_byte(7).unwrap();
        s.reset();
        assert_eq!(s.cursor(), 0);
        assert!(s.read_byte(0).is_err());
        assert!(s.has_space(3));
        // Stale byte still physically present.
        assert_eq!(s.storage[0], 7);
    }

    #[test]
    fn test_set_cursor_and_clear_byte() {
        let mut s = store(4);
        s.write_byte(1).unwrap();
        s.write_byte(2).unwrap();
        s.set_cursor(1).unwrap();
        s.clear_byte_at_cursor();
        s.set_cursor(2).unwrap();
        assert_eq!(s.committed(), &[1, 0]);

        assert!(matches!(
            s.set_cursor(5),
            Err(CacheError::InvalidCursor {
                offset: 5,
                capacity: 4
            })
        ));

        s.set_cursor(4).unwrap();
        s.clear_byte_at_cursor();
        assert_eq!(s.cursor(), 4);
    }
}
